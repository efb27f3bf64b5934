//! Link behaviour configuration

/// How the receiver reacts to transport and checksum failures
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct LinkConfig {
    /// Treat a read error as a link reset: the next byte is parsed as a header
    pub reset_on_read_error: bool,
    /// Return CMD messages with a bad checksum as errors instead of dropping them
    pub surface_bad_checksum: bool,
}

impl Default for LinkConfig {
    fn default() -> Self {
        Self {
            reset_on_read_error: true,
            surface_bad_checksum: false,
        }
    }
}
