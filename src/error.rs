use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("usage: emunes <rom-path> [--steps N]")]
    Usage,

    #[error("failed to read rom file: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse rom: {0}")]
    Rom(#[from] emunes_rom::Error),

    #[error("cpu error: {0}")]
    Cpu(#[from] emunes_mos6502::Error),

    #[error("failed to write trace log: {0}")]
    TraceWrite(std::io::Error),
}
