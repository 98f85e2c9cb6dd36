use anyhow::Result;
use modal::repl::{run_once, Repl};
use std::process::ExitCode;

fn main() -> Result<ExitCode> {
    let args: Vec<String> = std::env::args().skip(1).collect();
    if !args.is_empty() {
        let ok = run_once(&args.join(" "));
        return Ok(if ok { ExitCode::SUCCESS } else { ExitCode::FAILURE });
    }

    let mut repl = Repl::new()?;
    repl.run()?;
    Ok(ExitCode::SUCCESS)
}
