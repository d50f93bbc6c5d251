use thiserror::Error;

#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Error {
    #[error("unknown opcode: {0:#04x}")]
    UnknownOpcode(u8),
}
