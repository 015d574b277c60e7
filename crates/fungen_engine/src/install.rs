use std::fs;
use std::io;
use std::path::PathBuf;

use fungen_core::{git_checkout_command, git_clone_command, git_pull_command, InstallOptions};
use fungen_logging::fungen_info;
use thiserror::Error;

use crate::process::CommandRunner;

#[derive(Debug, Error)]
pub enum InstallError {
    #[error("Missing fungen_repo for install (set it in the Install FunGen CLI task)")]
    MissingRepoUrl,
    #[error("Could not create install directory {path:?}: {source}")]
    CreateDir { path: PathBuf, source: io::Error },
    #[error("Install failed: {0}")]
    Fetch(String),
    #[error("Checkout failed: {0}")]
    Checkout(String),
}

/// Clones the repository, or fast-forwards an existing checkout, then
/// optionally checks out the requested ref.
pub fn run_install(
    options: &InstallOptions,
    runner: &dyn CommandRunner,
) -> Result<String, InstallError> {
    if options.repo_url.is_empty() {
        return Err(InstallError::MissingRepoUrl);
    }
    let install_dir = &options.install_dir;
    fs::create_dir_all(install_dir).map_err(|source| InstallError::CreateDir {
        path: install_dir.clone(),
        source,
    })?;

    let cmd = if options.git_dir().is_dir() {
        git_pull_command(install_dir)
    } else {
        git_clone_command(&options.repo_url, install_dir)
    };
    run_git(runner, &cmd).map_err(InstallError::Fetch)?;

    if !options.repo_ref.is_empty() {
        let checkout = git_checkout_command(install_dir, &options.repo_ref);
        run_git(runner, &checkout).map_err(InstallError::Checkout)?;
    }

    Ok(format!("Installed FunGen to {}", install_dir.display()))
}

fn run_git(runner: &dyn CommandRunner, cmd: &[String]) -> Result<(), String> {
    fungen_info!("Running: {:?}", cmd);
    match runner.run(cmd) {
        Ok(output) if output.success() => Ok(()),
        Ok(output) => Err(output.failure_detail()),
        Err(err) => Err(err.to_string()),
    }
}
