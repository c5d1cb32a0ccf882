// Data loader for the bundled question bank
// Embedded at compile time so the binary works without any file on disk

/// Bundled sample question bank (INI text)
pub const SAMPLE_BANK: &str = include_str!("../data/sample_bank.ini");

/// Data loader utility
pub struct DataLoader;

impl DataLoader {
    /// Get the bundled question bank text
    pub fn sample_bank() -> &'static str {
        SAMPLE_BANK
    }

    /// Get bundled data info
    pub fn info() -> DataInfo {
        DataInfo {
            size: SAMPLE_BANK.len(),
            lines: SAMPLE_BANK.lines().count(),
        }
    }
}

/// Information about the bundled data
#[derive(Debug, Clone)]
pub struct DataInfo {
    /// Size of the bundled bank in bytes
    pub size: usize,
    /// Number of text lines
    pub lines: usize,
}
