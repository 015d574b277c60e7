//! Resolution of plugin options.
//!
//! Every configurable value follows the same precedence: explicit task
//! argument, then plugin setting, then a built-in default. Each field has its
//! own function so the precedence can be exercised in isolation.

use std::path::PathBuf;

use serde_json::Value;
use thiserror::Error;

use crate::request::{is_truthy, non_empty_text, JobRequest, JsonMap};
use crate::scene::{parse_scene_id, SceneId};

pub const DEFAULT_PYTHON: &str = "python3";
pub const DEFAULT_OD_MODE: &str = "current";
pub const PLUGIN_DIR_PLACEHOLDER: &str = "{pluginDir}";

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ResolveError {
    #[error("Missing required arg: {0}")]
    MissingArgument(&'static str),
    #[error("Missing scene_id for scope=scene")]
    MissingSceneId,
    #[error("Hook context missing scene id")]
    MissingHookSceneId,
    #[error("Invalid scene id: {0}")]
    InvalidSceneId(String),
    #[error("Missing install_dir for scope=install")]
    MissingInstallDir,
    #[error("Invalid extra_args: {0}")]
    InvalidExtraArgs(String),
}

/// Process-level facts the resolution needs, passed in rather than read globally.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunEnv {
    pub working_dir: PathBuf,
    pub home_dir: Option<PathBuf>,
}

impl RunEnv {
    pub fn new(working_dir: impl Into<PathBuf>) -> Self {
        Self {
            working_dir: working_dir.into(),
            home_dir: None,
        }
    }

    pub fn with_home(mut self, home_dir: impl Into<PathBuf>) -> Self {
        self.home_dir = Some(home_dir.into());
        self
    }

    /// Expands a leading `~` using the configured home directory.
    pub fn expand_home(&self, path: &str) -> PathBuf {
        let Some(home) = self.home_dir.as_deref() else {
            return PathBuf::from(path);
        };
        if path == "~" {
            return home.to_path_buf();
        }
        match path.strip_prefix("~/") {
            Some(rest) => home.join(rest),
            None => PathBuf::from(path),
        }
    }

    /// Expands `~` and anchors relative paths at the working directory.
    pub fn absolutize(&self, path: &str) -> PathBuf {
        let expanded = self.expand_home(path);
        if expanded.is_absolute() {
            expanded
        } else {
            self.working_dir.join(expanded)
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Scope {
    All,
    Scene,
    Hook,
    Install,
}

impl Scope {
    /// Unknown values fall back to processing every scene.
    pub fn parse(raw: &str) -> Self {
        match raw {
            "scene" => Scope::Scene,
            "hook" => Scope::Hook,
            "install" => Scope::Install,
            _ => Scope::All,
        }
    }
}

pub fn resolve_scope(args: &JsonMap) -> Scope {
    non_empty_text(args.get("scope"))
        .map(|raw| Scope::parse(&raw))
        .unwrap_or(Scope::All)
}

fn text_setting(args: &JsonMap, settings: &JsonMap, key: &str) -> Option<String> {
    non_empty_text(args.get(key)).or_else(|| non_empty_text(settings.get(key)))
}

fn flag_setting(args: &JsonMap, settings: &JsonMap, key: &str) -> bool {
    match args.get(key) {
        Some(value) if !value.is_null() => is_truthy(Some(value)),
        _ => is_truthy(settings.get(key)),
    }
}

pub fn resolve_python_path(args: &JsonMap, settings: &JsonMap) -> String {
    text_setting(args, settings, "python_path").unwrap_or_else(|| DEFAULT_PYTHON.to_string())
}

/// Raw tool location, before placeholder expansion. Empty when unset.
pub fn resolve_fungen_path(args: &JsonMap, settings: &JsonMap) -> String {
    text_setting(args, settings, "fungen_path").unwrap_or_default()
}

pub fn resolve_mode(args: &JsonMap, settings: &JsonMap) -> String {
    text_setting(args, settings, "mode").unwrap_or_default()
}

pub fn resolve_od_mode(args: &JsonMap, settings: &JsonMap) -> String {
    text_setting(args, settings, "od_mode").unwrap_or_else(|| DEFAULT_OD_MODE.to_string())
}

pub fn resolve_overwrite(args: &JsonMap, settings: &JsonMap) -> bool {
    flag_setting(args, settings, "overwrite")
}

pub fn resolve_no_autotune(args: &JsonMap, settings: &JsonMap) -> bool {
    flag_setting(args, settings, "no_autotune")
}

pub fn resolve_no_copy(args: &JsonMap, settings: &JsonMap) -> bool {
    flag_setting(args, settings, "no_copy")
}

/// Extra tool arguments, given either as a list or as a shell-style string.
pub fn resolve_extra_args(args: &JsonMap, settings: &JsonMap) -> Result<Vec<String>, ResolveError> {
    let value = match args.get("extra_args") {
        Some(value) if is_truthy(Some(value)) => value,
        _ => match settings.get("extra_args") {
            Some(value) if is_truthy(Some(value)) => value,
            _ => return Ok(Vec::new()),
        },
    };
    match value {
        Value::String(raw) => {
            shlex::split(raw).ok_or_else(|| ResolveError::InvalidExtraArgs(raw.clone()))
        }
        Value::Array(items) => Ok(items
            .iter()
            .filter_map(|item| match item {
                Value::String(text) => Some(text.clone()),
                Value::Null => None,
                other => Some(other.to_string()),
            })
            .collect()),
        _ => Ok(Vec::new()),
    }
}

pub fn resolve_install_dir(args: &JsonMap, settings: &JsonMap) -> String {
    text_setting(args, settings, "install_dir").unwrap_or_default()
}

pub fn resolve_repo_url(args: &JsonMap, settings: &JsonMap) -> String {
    text_setting(args, settings, "fungen_repo").unwrap_or_default()
}

pub fn resolve_repo_ref(args: &JsonMap, settings: &JsonMap) -> String {
    text_setting(args, settings, "fungen_ref").unwrap_or_default()
}

/// Scene id for `scope=scene`.
pub fn resolve_scene_id(args: &JsonMap) -> Result<SceneId, ResolveError> {
    match args.get("scene_id") {
        None | Some(Value::Null) => Err(ResolveError::MissingSceneId),
        Some(value) => {
            parse_scene_id(value).ok_or_else(|| ResolveError::InvalidSceneId(value.to_string()))
        }
    }
}

/// Scene id for `scope=hook`, taken from the hook context.
pub fn resolve_hook_scene_id(args: &JsonMap) -> Result<SceneId, ResolveError> {
    let id = args
        .get("hookContext")
        .and_then(Value::as_object)
        .and_then(|context| context.get("id"));
    match id {
        None | Some(Value::Null) => Err(ResolveError::MissingHookSceneId),
        Some(value) => {
            parse_scene_id(value).ok_or_else(|| ResolveError::InvalidSceneId(value.to_string()))
        }
    }
}

/// Directory the plugin lives in: top-level `pluginDir`, then the argument,
/// then the server connection, then the working directory.
pub fn resolve_plugin_dir(request: &JobRequest, env: &RunEnv) -> PathBuf {
    let configured = request
        .plugin_dir
        .clone()
        .filter(|dir| !dir.is_empty())
        .or_else(|| non_empty_text(request.args.get("pluginDir")))
        .or_else(|| {
            request
                .server_connection
                .plugin_dir
                .clone()
                .filter(|dir| !dir.is_empty())
        });
    match configured {
        Some(dir) => env.absolutize(&dir),
        None => env.working_dir.clone(),
    }
}

/// Replaces the `{pluginDir}` placeholder, if present.
pub fn expand_plugin_dir(value: &str, request: &JobRequest, env: &RunEnv) -> String {
    if !value.contains(PLUGIN_DIR_PLACEHOLDER) {
        return value.to_string();
    }
    let plugin_dir = resolve_plugin_dir(request, env);
    value.replace(PLUGIN_DIR_PLACEHOLDER, &plugin_dir.to_string_lossy())
}

/// Everything needed to invoke the external tool for one scene.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FungenOptions {
    pub python_path: String,
    pub entrypoint: PathBuf,
    pub mode: String,
    pub od_mode: String,
    pub overwrite: bool,
    pub no_autotune: bool,
    pub no_copy: bool,
    pub extra_args: Vec<String>,
}

impl FungenOptions {
    /// Resolves the processing options; fails when no tool location is configured.
    pub fn resolve(request: &JobRequest, env: &RunEnv) -> Result<Self, ResolveError> {
        let args = &request.args;
        let settings = &request.settings;
        let fungen_path = expand_plugin_dir(&resolve_fungen_path(args, settings), request, env);
        if fungen_path.is_empty() {
            return Err(ResolveError::MissingArgument("fungen_path"));
        }
        Ok(Self {
            python_path: resolve_python_path(args, settings),
            entrypoint: crate::command::resolve_entrypoint(&fungen_path, env),
            mode: resolve_mode(args, settings),
            od_mode: resolve_od_mode(args, settings),
            overwrite: resolve_overwrite(args, settings),
            no_autotune: resolve_no_autotune(args, settings),
            no_copy: resolve_no_copy(args, settings),
            extra_args: resolve_extra_args(args, settings)?,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InstallOptions {
    pub install_dir: PathBuf,
    pub repo_url: String,
    pub repo_ref: String,
}

impl InstallOptions {
    /// Resolves the install target. The repository URL is checked by the installer.
    pub fn resolve(request: &JobRequest, env: &RunEnv) -> Result<Self, ResolveError> {
        let args = &request.args;
        let settings = &request.settings;
        let install_dir = expand_plugin_dir(&resolve_install_dir(args, settings), request, env);
        if install_dir.is_empty() {
            return Err(ResolveError::MissingInstallDir);
        }
        Ok(Self {
            install_dir: env.absolutize(&install_dir),
            repo_url: resolve_repo_url(args, settings),
            repo_ref: resolve_repo_ref(args, settings),
        })
    }

    pub fn git_dir(&self) -> PathBuf {
        self.install_dir.join(".git")
    }
}
