mod logging;

use std::io::{self, Write};
use std::path::PathBuf;

use fungen_core::RunEnv;
use fungen_engine::{execute, read_job_request, ClientSettings};

fn main() -> anyhow::Result<()> {
    logging::initialize();

    let request = read_job_request(io::stdin().lock());
    let report = execute(&request, &run_env(), &ClientSettings::default());

    let mut stdout = io::stdout().lock();
    writeln!(stdout, "{}", report.to_json_line())?;
    stdout.flush()?;
    Ok(())
}

fn run_env() -> RunEnv {
    let working_dir = std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."));
    let env = RunEnv::new(working_dir);
    match std::env::var_os("HOME").or_else(|| std::env::var_os("USERPROFILE")) {
        Some(home) => env.with_home(home),
        None => env,
    }
}
