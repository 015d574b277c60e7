//! FunGen plugin core: request model, option resolution and pure helpers.
mod command;
mod outcome;
mod request;
mod resolve;
mod scene;
mod server;

pub use command::{
    build_fungen_command, funscript_path, git_checkout_command, git_clone_command,
    git_pull_command, resolve_entrypoint, ENTRYPOINT_FILE, FUNSCRIPT_EXTENSION,
};
pub use outcome::{InstallReport, Report, ReportOutput, RunSummary, SceneOutcome};
pub use request::{
    is_truthy, non_empty_text, JobRequest, JsonMap, RequestError, ServerConnection,
    SessionCookieFields,
};
pub use resolve::{
    expand_plugin_dir, resolve_extra_args, resolve_fungen_path, resolve_hook_scene_id,
    resolve_install_dir, resolve_mode, resolve_no_autotune, resolve_no_copy, resolve_od_mode,
    resolve_overwrite, resolve_plugin_dir, resolve_python_path, resolve_repo_ref,
    resolve_repo_url, resolve_scene_id, resolve_scope, FungenOptions, InstallOptions,
    ResolveError, RunEnv, Scope, DEFAULT_OD_MODE, DEFAULT_PYTHON,
};
pub use scene::{parse_scene_id, Scene, SceneId, ScenePage};
pub use server::{build_cookie, build_server_url, SessionCookie, DEFAULT_HOST, DEFAULT_PORT};
