use thiserror::Error;

#[derive(PartialEq, Eq, Debug, Error)]
pub enum Error {
    #[error("unknown file type, expected iNES or NES 2.0")]
    UnknownFileType,

    #[error("invalid NES rom header")]
    InvalidHeader,

    #[error("rom is truncated: expected {expected} bytes of {section}, found {found}")]
    TruncatedRom {
        section: &'static str,
        expected: usize,
        found: usize,
    },
}
