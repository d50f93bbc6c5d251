pub mod bus;
pub mod error;
pub mod trace;

use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use bus::NesBus;
use emunes_mos6502::{Cpu, StepTrace};
use emunes_rom::NesRom;
use error::Error;

/// Initialize console logging, honoring `EMUNES_MUTE` so the nestest conformance test can
/// silence console noise without touching the collected trace.
pub fn init_logging() {
    if std::env::var_os("EMUNES_MUTE").is_some() {
        env_logger::Builder::new().filter_level(log::LevelFilter::Off).init();
    } else {
        env_logger::init();
    }
}

pub fn trace_log_path(rom_path: &Path) -> PathBuf {
    rom_path.with_extension("log")
}

/// Load `rom_path`, run it to completion (or `step_budget` instructions, if given) starting
/// from its own reset vector, and return the collected trace.
pub fn run_rom(rom_path: &Path, step_budget: Option<u64>) -> Result<Vec<StepTrace>, Error> {
    let rom_bytes = fs::read(rom_path)?;
    let rom = NesRom::from_bytes(rom_bytes)?;
    log::info!(
        "loaded {:?} ({} bytes prg, {} bytes chr, mapper {})",
        rom_path,
        rom.prg_rom.len(),
        rom.chr_rom.len(),
        rom.header.mapper_number
    );

    let mut bus = NesBus::new(rom.prg_rom);
    let mut cpu = Cpu::new();
    cpu.reset(&bus);

    Ok(cpu.run(&mut bus, step_budget)?)
}

/// Run `cpu`/`bus` (already reset) to completion and write the collected trace to
/// `<rom_path with .log extension>`. Shared by the CLI and the nestest conformance test so
/// both go through identical trace-writing logic.
pub fn write_trace(rom_path: &Path, trace: &[StepTrace]) -> Result<PathBuf, Error> {
    let log_path = trace_log_path(rom_path);
    let mut log_file = fs::File::create(&log_path).map_err(Error::TraceWrite)?;
    for step in trace {
        writeln!(log_file, "{}", trace::format_line(step)).map_err(Error::TraceWrite)?;
    }
    Ok(log_path)
}
