use std::path::{Path, PathBuf};

use fungen_core::{
    build_fungen_command, funscript_path, git_checkout_command, git_clone_command,
    git_pull_command, resolve_entrypoint, FungenOptions, RunEnv,
};
use pretty_assertions::assert_eq;

fn options() -> FungenOptions {
    FungenOptions {
        python_path: "python3".into(),
        entrypoint: PathBuf::from("/opt/FunGen/main.py"),
        mode: "stage2".into(),
        od_mode: "current".into(),
        overwrite: true,
        no_autotune: false,
        no_copy: false,
        extra_args: vec!["--foo".into(), "bar".into()],
    }
}

#[test]
fn builds_full_argument_vector_in_order() {
    let cmd = build_fungen_command(&options(), "/videos/a.mp4");
    assert_eq!(
        cmd,
        vec![
            "python3",
            "/opt/FunGen/main.py",
            "/videos/a.mp4",
            "--mode",
            "stage2",
            "--od-mode",
            "current",
            "--overwrite",
            "--foo",
            "bar",
        ]
    );
}

#[test]
fn omits_unset_options() {
    let opts = FungenOptions {
        mode: String::new(),
        od_mode: String::new(),
        overwrite: false,
        no_autotune: true,
        no_copy: true,
        extra_args: Vec::new(),
        ..options()
    };
    assert_eq!(
        build_fungen_command(&opts, "/videos/b.mkv"),
        vec![
            "python3",
            "/opt/FunGen/main.py",
            "/videos/b.mkv",
            "--no-autotune",
            "--no-copy",
        ]
    );
}

#[test]
fn entrypoint_appends_main_for_directories() {
    let env = RunEnv::new("/work").with_home("/home/user");
    assert_eq!(
        resolve_entrypoint("/opt/FunGen", &env),
        PathBuf::from("/opt/FunGen/main.py")
    );
    assert_eq!(
        resolve_entrypoint("/opt/FunGen/cli.py", &env),
        PathBuf::from("/opt/FunGen/cli.py")
    );
    assert_eq!(
        resolve_entrypoint("~/FunGen", &env),
        PathBuf::from("/home/user/FunGen/main.py")
    );
    assert_eq!(
        resolve_entrypoint("vendor/FunGen", &env),
        PathBuf::from("/work/vendor/FunGen/main.py")
    );
    assert_eq!(
        resolve_entrypoint("scripts/run.py", &env),
        PathBuf::from("/work/scripts/run.py")
    );
}

#[test]
fn funscript_sits_beside_the_video() {
    assert_eq!(
        funscript_path("/videos/clip.mp4"),
        PathBuf::from("/videos/clip.funscript")
    );
    assert_eq!(
        funscript_path("/videos/clip.v2.mkv"),
        PathBuf::from("/videos/clip.v2.funscript")
    );
    assert_eq!(funscript_path("/videos/raw"), PathBuf::from("/videos/raw.funscript"));
}

#[test]
fn git_commands_target_the_install_dir() {
    let dir = Path::new("/opt/FunGen");
    assert_eq!(
        git_clone_command("https://example.com/fungen.git", dir),
        vec!["git", "clone", "https://example.com/fungen.git", "/opt/FunGen"]
    );
    assert_eq!(
        git_pull_command(dir),
        vec!["git", "-C", "/opt/FunGen", "pull", "--ff-only"]
    );
    assert_eq!(
        git_checkout_command(dir, "v0.5"),
        vec!["git", "-C", "/opt/FunGen", "checkout", "v0.5"]
    );
}
