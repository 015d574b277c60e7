use std::cell::RefCell;
use std::collections::VecDeque;
use std::fs;
use std::io;
use std::path::PathBuf;

use fungen_core::{FungenOptions, RunSummary, Scene, SceneOutcome};
use fungen_engine::{process_scenes, run_for_scene, should_skip, CommandOutput, CommandRunner};
use pretty_assertions::assert_eq;
use tempfile::TempDir;

/// Records every command line and replays scripted results (success by default).
#[derive(Default)]
struct ScriptedRunner {
    calls: RefCell<Vec<Vec<String>>>,
    results: RefCell<VecDeque<io::Result<CommandOutput>>>,
}

impl ScriptedRunner {
    fn then(self, result: io::Result<CommandOutput>) -> Self {
        self.results.borrow_mut().push_back(result);
        self
    }

    fn calls(&self) -> Vec<Vec<String>> {
        self.calls.borrow().clone()
    }
}

impl CommandRunner for ScriptedRunner {
    fn run(&self, argv: &[String]) -> io::Result<CommandOutput> {
        self.calls.borrow_mut().push(argv.to_vec());
        self.results.borrow_mut().pop_front().unwrap_or_else(|| {
            Ok(CommandOutput {
                exit_code: Some(0),
                ..CommandOutput::default()
            })
        })
    }
}

fn exited(code: i32, stdout: &str, stderr: &str) -> io::Result<CommandOutput> {
    Ok(CommandOutput {
        exit_code: Some(code),
        stdout: stdout.into(),
        stderr: stderr.into(),
    })
}

fn options() -> FungenOptions {
    FungenOptions {
        python_path: "python3".into(),
        entrypoint: PathBuf::from("/opt/FunGen/main.py"),
        mode: String::new(),
        od_mode: "current".into(),
        overwrite: false,
        no_autotune: false,
        no_copy: false,
        extra_args: Vec::new(),
    }
}

fn video(dir: &TempDir, name: &str) -> String {
    let path = dir.path().join(name);
    fs::write(&path, b"video").unwrap();
    path.to_string_lossy().into_owned()
}

fn scene(id: i64, path: &str) -> Scene {
    Scene::new(id, path)
}

#[test]
fn skip_check_looks_for_sibling_funscript() {
    let dir = TempDir::new().unwrap();
    let path = video(&dir, "clip.mp4");
    assert!(!should_skip(&path));
    fs::write(dir.path().join("clip.funscript"), b"{}").unwrap();
    assert!(should_skip(&path));
}

#[test]
fn existing_funscript_is_skipped_without_running() {
    let dir = TempDir::new().unwrap();
    let path = video(&dir, "clip.mp4");
    fs::write(dir.path().join("clip.funscript"), b"{}").unwrap();
    let runner = ScriptedRunner::default();

    let outcome = run_for_scene(&scene(5, &path), &options(), &runner);

    assert_eq!(
        outcome,
        SceneOutcome::Skipped("Scene 5 already has funscript".into())
    );
    assert!(runner.calls().is_empty());
}

#[test]
fn overwrite_runs_even_when_funscript_exists() {
    let dir = TempDir::new().unwrap();
    let path = video(&dir, "clip.mp4");
    fs::write(dir.path().join("clip.funscript"), b"{}").unwrap();
    let runner = ScriptedRunner::default();
    let opts = FungenOptions {
        overwrite: true,
        ..options()
    };

    let outcome = run_for_scene(&scene(5, &path), &opts, &runner);

    assert_eq!(outcome, SceneOutcome::Processed("Scene 5 ok".into()));
    assert_eq!(
        runner.calls(),
        vec![vec![
            "python3".to_string(),
            "/opt/FunGen/main.py".to_string(),
            path,
            "--od-mode".to_string(),
            "current".to_string(),
            "--overwrite".to_string(),
        ]]
    );
}

#[test]
fn missing_path_fails_without_running() {
    let runner = ScriptedRunner::default();
    let outcome = run_for_scene(&Scene { id: Some(3), path: None }, &options(), &runner);
    assert_eq!(outcome, SceneOutcome::Failed("Scene 3 has no path".into()));
    assert!(runner.calls().is_empty());
}

#[test]
fn nonzero_exit_reports_stderr_then_stdout() {
    let dir = TempDir::new().unwrap();
    let path = video(&dir, "clip.mp4");
    let runner = ScriptedRunner::default()
        .then(exited(1, "stdout text", "  CUDA not available \n"))
        .then(exited(2, " only stdout ", ""))
        .then(exited(3, "", ""));

    let first = run_for_scene(&scene(1, &path), &options(), &runner);
    let second = run_for_scene(&scene(1, &path), &options(), &runner);
    let third = run_for_scene(&scene(1, &path), &options(), &runner);

    assert_eq!(
        first,
        SceneOutcome::Failed("Scene 1 failed: CUDA not available".into())
    );
    assert_eq!(second, SceneOutcome::Failed("Scene 1 failed: only stdout".into()));
    assert_eq!(third, SceneOutcome::Failed("Scene 1 failed: unknown error".into()));
}

#[test]
fn spawn_error_is_a_scene_failure() {
    let dir = TempDir::new().unwrap();
    let path = video(&dir, "clip.mp4");
    let runner = ScriptedRunner::default().then(Err(io::Error::new(
        io::ErrorKind::NotFound,
        "No such file or directory",
    )));

    let outcome = run_for_scene(&scene(8, &path), &options(), &runner);
    match outcome {
        SceneOutcome::Failed(message) => {
            assert!(message.starts_with("Scene 8 failed: could not start python3"))
        }
        other => panic!("unexpected outcome: {other:?}"),
    }
}

#[test]
fn every_scene_lands_in_exactly_one_counter() {
    fungen_logging::initialize_for_tests();
    let dir = TempDir::new().unwrap();
    let done = video(&dir, "done.mp4");
    fs::write(dir.path().join("done.funscript"), b"{}").unwrap();
    let ok = video(&dir, "ok.mp4");
    let broken = video(&dir, "broken.mp4");
    let scenes = vec![
        scene(1, &done),
        scene(2, &ok),
        Scene { id: Some(3), path: None },
        scene(4, &broken),
    ];
    // Only scenes 2 and 4 reach the runner.
    let runner = ScriptedRunner::default()
        .then(exited(0, "", ""))
        .then(exited(1, "", "decode error"));

    let summary = process_scenes(&scenes, &options(), &runner);

    assert_eq!(
        summary,
        RunSummary {
            processed: 1,
            skipped: 1,
            failed: 2
        }
    );
    assert_eq!(summary.total(), scenes.len());
    assert_eq!(runner.calls().len(), 2);
    assert_eq!(runner.calls()[0][2], ok);
    assert_eq!(runner.calls()[1][2], broken);
}

#[test]
fn unreadable_id_is_a_scene_failure() {
    let runner = ScriptedRunner::default();
    let listed = Scene {
        id: None,
        path: Some("/videos/odd.mp4".into()),
    };

    let outcome = run_for_scene(&listed, &options(), &runner);

    assert_eq!(
        outcome,
        SceneOutcome::Failed(
            "Scene with unreadable id (path /videos/odd.mp4) cannot be processed".into()
        )
    );
    assert!(runner.calls().is_empty());
}
