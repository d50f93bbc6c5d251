use std::convert::TryInto;

use super::error::Error;
use super::file_type::FileType;
use super::mirroring_type::MirroringType;
use super::Result;

/// The 16-byte header shared by iNES and NES 2.0 roms.
#[derive(PartialEq, Debug)]
pub struct Header {
    pub file_type: FileType,

    /// Number of bytes of program rom data that follow the header (and trainer, if present).
    pub prg_rom_bytes: u32,

    /// Number of bytes of character rom data that follow the program rom.
    pub chr_rom_bytes: u32,

    /// The nametable mirroring wired by the cartridge.
    pub mirroring_type: MirroringType,

    /// True if the cartridge carries battery-backed memory at `$6000`-`$7FFF`.
    pub has_persistent_memory: bool,

    /// True if a 512-byte trainer follows the header, mapped to `$7000`-`$71FF`.
    pub has_trainer: bool,

    /// The iNES mapper number. Not consulted anywhere outside of `Header` itself: mapper
    /// chips aren't emulated, only straight PRG/CHR mirroring.
    pub mapper_number: u16,
}

impl Header {
    pub fn from_bytes(rom_bytes: &[u8]) -> Result<Header> {
        if rom_bytes.len() < 16 {
            return Err(Error::InvalidHeader);
        }

        let rom_bytes: [u8; 16] = rom_bytes[0..16].try_into().map_err(|_| Error::InvalidHeader)?;

        let file_type = FileType::from_bytes(rom_bytes)?;
        match file_type {
            FileType::INES => Header::from_bytes_ines(rom_bytes),
            FileType::NES2 => Header::from_bytes_nes2(rom_bytes),
        }
    }

    fn from_bytes_ines(rom_bytes: [u8; 16]) -> Result<Header> {
        let prg_rom_bytes = (rom_bytes[4] as u32) * 16384;
        let chr_rom_bytes = (rom_bytes[5] as u32) * 8192;

        let mirroring_type = MirroringType::from_ines_byte_6(rom_bytes[6]);
        let has_persistent_memory = (rom_bytes[6] & 0b0000_0010) != 0;
        let has_trainer = (rom_bytes[6] & 0b0000_0100) != 0;

        let mapper_lower_nibble = (rom_bytes[6] & 0b1111_0000) >> 4;
        let mapper_upper_nibble = rom_bytes[7] & 0b1111_0000;
        let mapper_number = (mapper_upper_nibble | mapper_lower_nibble) as u16;

        Ok(Header {
            file_type: FileType::INES,
            prg_rom_bytes,
            chr_rom_bytes,
            mirroring_type,
            has_persistent_memory,
            has_trainer,
            mapper_number,
        })
    }

    /// NES 2.0 is backwards-compatible with iNES for the fields this emulator consults
    /// (prg/chr size, mirroring, trainer, mapper number), so we reuse the iNES parser and
    /// just relabel the file type.
    fn from_bytes_nes2(rom_bytes: [u8; 16]) -> Result<Header> {
        let mut header = Header::from_bytes_ines(rom_bytes)?;
        header.file_type = FileType::NES2;
        Ok(header)
    }
}
