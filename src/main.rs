use std::io::{self, Write};
use std::process::ExitCode;

use lectern::commands::{Command, CommandError, USAGE};
use lectern::logger::{self, LogSeverity::Fatal};

fn main() -> ExitCode {
    if let Err(err) = logger::init_from_env() {
        eprintln!("could not install logger: {}", err);
    }

    let args: Vec<String> = std::env::args().skip(1).collect();
    let result = Command::parse(&args).and_then(|command| {
        let stdout = io::stdout();
        let mut out = stdout.lock();
        command.run(&mut out)?;
        out.flush()?;
        Ok(())
    });

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(err @ CommandError::Usage(_)) => {
            eprintln!("{}\n{}", err, USAGE);
            ExitCode::FAILURE
        }
        Err(err) => {
            logger::log(err, Fatal);
            ExitCode::FAILURE
        }
    }
}
