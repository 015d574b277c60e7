use std::path::{Path, PathBuf};

use crate::resolve::{FungenOptions, RunEnv};

/// File run when the tool location is a checkout directory.
pub const ENTRYPOINT_FILE: &str = "main.py";
pub const SCRIPT_EXTENSION: &str = ".py";
/// Extension of the artifact the tool writes beside each video.
pub const FUNSCRIPT_EXTENSION: &str = "funscript";

/// A script path is used as-is; anything else is treated as the checkout directory.
/// Relative locations resolve against the run's working directory.
pub fn resolve_entrypoint(location: &str, env: &RunEnv) -> PathBuf {
    let path = env.absolutize(location);
    if location.ends_with(SCRIPT_EXTENSION) {
        path
    } else {
        path.join(ENTRYPOINT_FILE)
    }
}

/// `<video stem>.funscript` in the video's directory.
pub fn funscript_path(video_path: &str) -> PathBuf {
    Path::new(video_path).with_extension(FUNSCRIPT_EXTENSION)
}

pub fn build_fungen_command(options: &FungenOptions, video_path: &str) -> Vec<String> {
    let mut cmd = vec![
        options.python_path.clone(),
        options.entrypoint.to_string_lossy().into_owned(),
        video_path.to_string(),
    ];
    if !options.mode.is_empty() {
        cmd.extend(["--mode".to_string(), options.mode.clone()]);
    }
    if !options.od_mode.is_empty() {
        cmd.extend(["--od-mode".to_string(), options.od_mode.clone()]);
    }
    if options.overwrite {
        cmd.push("--overwrite".to_string());
    }
    if options.no_autotune {
        cmd.push("--no-autotune".to_string());
    }
    if options.no_copy {
        cmd.push("--no-copy".to_string());
    }
    cmd.extend(options.extra_args.iter().cloned());
    cmd
}

pub fn git_clone_command(repo_url: &str, install_dir: &Path) -> Vec<String> {
    vec![
        "git".to_string(),
        "clone".to_string(),
        repo_url.to_string(),
        install_dir.to_string_lossy().into_owned(),
    ]
}

pub fn git_pull_command(install_dir: &Path) -> Vec<String> {
    vec![
        "git".to_string(),
        "-C".to_string(),
        install_dir.to_string_lossy().into_owned(),
        "pull".to_string(),
        "--ff-only".to_string(),
    ]
}

pub fn git_checkout_command(install_dir: &Path, repo_ref: &str) -> Vec<String> {
    vec![
        "git".to_string(),
        "-C".to_string(),
        install_dir.to_string_lossy().into_owned(),
        "checkout".to_string(),
        repo_ref.to_string(),
    ]
}
