pub mod error;
pub mod file_type;
pub mod header;
pub mod mirroring_type;

use error::Error;
use header::Header;

use super::Result;

/// A parsed iNES/NES 2.0 rom image: header plus the raw program and character rom data.
#[derive(PartialEq, Debug)]
pub struct NesRom {
    pub header: Header,

    /// 512 bytes of trainer data mapped to `$7000`-`$71FF`, if `header.has_trainer`.
    pub trainer: Option<Vec<u8>>,

    pub prg_rom: Vec<u8>,
    pub chr_rom: Vec<u8>,
}

impl NesRom {
    pub fn from_bytes(bytes: Vec<u8>) -> Result<NesRom> {
        let mut bytes = bytes.into_iter();

        let header_bytes: Vec<u8> = bytes.by_ref().take(16).collect();
        let header = Header::from_bytes(&header_bytes)?;

        log::debug!(
            "parsed rom header: {:?}, prg_rom_bytes={}, chr_rom_bytes={}, mapper={}",
            header.file_type,
            header.prg_rom_bytes,
            header.chr_rom_bytes,
            header.mapper_number
        );

        let trainer = if header.has_trainer {
            Some(take_exact(&mut bytes, 512, "trainer")?)
        } else {
            None
        };

        let prg_rom = take_exact(&mut bytes, header.prg_rom_bytes as usize, "prg_rom")?;
        let chr_rom = take_exact(&mut bytes, header.chr_rom_bytes as usize, "chr_rom")?;

        Ok(NesRom {
            header,
            trainer,
            prg_rom,
            chr_rom,
        })
    }
}

fn take_exact(bytes: &mut impl Iterator<Item = u8>, count: usize, section: &'static str) -> Result<Vec<u8>> {
    let data: Vec<u8> = bytes.take(count).collect();

    if data.len() != count {
        return Err(Error::TruncatedRom {
            section,
            expected: count,
            found: data.len(),
        });
    }

    Ok(data)
}
