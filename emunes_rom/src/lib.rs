mod nesrom;

pub use nesrom::error::Error;
pub use nesrom::file_type::FileType;
pub use nesrom::header::Header;
pub use nesrom::mirroring_type::MirroringType;
pub use nesrom::NesRom;

pub type Result<A> = std::result::Result<A, Error>;
