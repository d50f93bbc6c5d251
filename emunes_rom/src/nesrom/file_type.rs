use super::error::Error;
use super::Result;

#[derive(PartialEq, Eq, Debug, Clone, Copy)]
pub enum FileType {
    /// The original iNES file format.
    INES,

    /// The NES 2.0 format, a backwards-compatible extension of iNES.
    NES2,
}

impl FileType {
    pub fn from_bytes(rom_bytes: [u8; 16]) -> Result<FileType> {
        // iNES and NES 2.0 both start with "NES<EOF>", where EOF is the DOS end-of-file
        // byte 0x1A. If that's missing we're not looking at a NES rom at all.
        let has_magic_header = rom_bytes[0..4] == *b"NES\x1A";

        if !has_magic_header {
            return Err(Error::UnknownFileType);
        }

        // NES 2.0 sets bit 3 and clears bit 2 of byte 7.
        let has_nes2_identifier = rom_bytes[7] & 0b0000_1100 == 0b0000_1000;

        if has_nes2_identifier {
            Ok(FileType::NES2)
        } else {
            Ok(FileType::INES)
        }
    }
}
