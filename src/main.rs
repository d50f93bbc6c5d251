use std::path::PathBuf;
use std::process::ExitCode;

use emunes::error::Error;

struct Args {
    rom_path: PathBuf,
    step_budget: Option<u64>,
}

fn parse_args() -> Result<Args, Error> {
    let mut rom_path = None;
    let mut step_budget = None;
    let mut args = std::env::args().skip(1);

    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--steps" => {
                let value = args.next().ok_or(Error::Usage)?;
                step_budget = Some(value.parse().map_err(|_| Error::Usage)?);
            }
            _ if rom_path.is_none() => rom_path = Some(PathBuf::from(arg)),
            _ => return Err(Error::Usage),
        }
    }

    Ok(Args {
        rom_path: rom_path.ok_or(Error::Usage)?,
        step_budget,
    })
}

fn run() -> Result<(), Error> {
    let args = parse_args()?;

    let trace = emunes::run_rom(&args.rom_path, args.step_budget)?;
    let log_path = emunes::write_trace(&args.rom_path, &trace)?;

    log::info!("executed {} instructions, trace written to {:?}", trace.len(), log_path);

    Ok(())
}

fn main() -> ExitCode {
    emunes::init_logging();

    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(err @ Error::Usage) => {
            eprintln!("{}", err);
            ExitCode::from(1)
        }
        Err(err @ (Error::Io(_) | Error::Rom(_))) => {
            log::error!("{}", err);
            ExitCode::from(2)
        }
        Err(err) => {
            log::error!("{}", err);
            ExitCode::from(3)
        }
    }
}
