use fungen_core::{
    build_fungen_command, funscript_path, FungenOptions, RunSummary, Scene, SceneOutcome,
};
use fungen_logging::{fungen_info, fungen_warn};

use crate::process::CommandRunner;

/// True when the video already has a funscript beside it.
pub fn should_skip(video_path: &str) -> bool {
    funscript_path(video_path).exists()
}

pub fn run_for_scene(
    scene: &Scene,
    options: &FungenOptions,
    runner: &dyn CommandRunner,
) -> SceneOutcome {
    let Some(scene_id) = scene.id else {
        return SceneOutcome::Failed(format!(
            "Scene with unreadable id (path {}) cannot be processed",
            scene.path.as_deref().unwrap_or("unknown")
        ));
    };
    let Some(video_path) = scene.video_path() else {
        return SceneOutcome::Failed(format!("Scene {scene_id} has no path"));
    };

    if !options.overwrite && should_skip(video_path) {
        return SceneOutcome::Skipped(format!("Scene {scene_id} already has funscript"));
    }

    let cmd = build_fungen_command(options, video_path);
    fungen_info!("Running: {:?}", cmd);
    match runner.run(&cmd) {
        Ok(output) if output.success() => SceneOutcome::Processed(format!("Scene {scene_id} ok")),
        Ok(output) => SceneOutcome::Failed(format!(
            "Scene {scene_id} failed: {}",
            output.failure_detail()
        )),
        Err(err) => SceneOutcome::Failed(format!(
            "Scene {scene_id} failed: could not start {}: {err}",
            options.python_path
        )),
    }
}

/// Runs the tool for every scene in order and tallies the outcomes.
pub fn process_scenes(
    scenes: &[Scene],
    options: &FungenOptions,
    runner: &dyn CommandRunner,
) -> RunSummary {
    let mut summary = RunSummary::default();
    for scene in scenes {
        let outcome = run_for_scene(scene, options, runner);
        match &outcome {
            SceneOutcome::Failed(message) => fungen_warn!("{}", message),
            other => fungen_info!("{}", other.message()),
        }
        summary.record(&outcome);
    }
    fungen_info!(
        "Finished: processed={} skipped={} failed={}",
        summary.processed,
        summary.skipped,
        summary.failed
    );
    summary
}

