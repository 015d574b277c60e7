use std::io;
use std::path::PathBuf;

use fungen_core::{
    build_cookie, build_server_url, resolve_hook_scene_id, resolve_scene_id, resolve_scope,
    FungenOptions, InstallOptions, InstallReport, JobRequest, Report, ResolveError, RunEnv, Scope,
};
use fungen_logging::{fungen_debug, fungen_error, fungen_info};
use thiserror::Error;

use crate::graphql::{ClientSettings, GraphqlClient, GraphqlError, ReqwestGraphqlClient};
use crate::install::{run_install, InstallError};
use crate::jobs::process_scenes;
use crate::process::{CommandRunner, SystemCommandRunner};
use crate::scenes::{fetch_all_scenes, fetch_scenes};

/// Failures that end a run without a summary.
#[derive(Debug, Error)]
pub enum RunError {
    #[error(transparent)]
    Resolve(#[from] ResolveError),
    #[error("FunGen entrypoint not found: {}", .0.display())]
    EntrypointNotFound(PathBuf),
    #[error(transparent)]
    Graphql(#[from] GraphqlError),
    #[error(transparent)]
    Install(#[from] InstallError),
    #[error("Failed to start runtime: {0}")]
    Runtime(io::Error),
}

/// Runs one plugin invocation and produces the report for standard output.
pub async fn run(
    request: &JobRequest,
    env: &RunEnv,
    client: &dyn GraphqlClient,
    runner: &dyn CommandRunner,
) -> Report {
    match dispatch(request, env, client, runner).await {
        Ok(report) => report,
        Err(err) => {
            fungen_error!("{}", err);
            Report::error(err)
        }
    }
}

async fn dispatch(
    request: &JobRequest,
    env: &RunEnv,
    client: &dyn GraphqlClient,
    runner: &dyn CommandRunner,
) -> Result<Report, RunError> {
    let scope = resolve_scope(&request.args);
    if scope == Scope::Install {
        let options = InstallOptions::resolve(request, env)?;
        let message = run_install(&options, runner)?;
        fungen_info!("{}", message);
        return Ok(Report::install(InstallReport::installed(message)));
    }

    let options = FungenOptions::resolve(request, env)?;
    if !options.entrypoint.exists() {
        return Err(RunError::EntrypointNotFound(options.entrypoint));
    }

    let scenes = match scope {
        Scope::Hook => {
            let scene_id = resolve_hook_scene_id(&request.args)?;
            fetch_scenes(client, &[scene_id]).await?.1
        }
        Scope::Scene => {
            let scene_id = resolve_scene_id(&request.args)?;
            fetch_scenes(client, &[scene_id]).await?.1
        }
        Scope::All | Scope::Install => fetch_all_scenes(client).await?,
    };

    let summary = process_scenes(&scenes, &options, runner);
    Ok(Report::summary(summary))
}

/// Wires the real GraphQL client and process runner and drives [`run`] to
/// completion on a single-threaded runtime.
pub fn execute(request: &JobRequest, env: &RunEnv, settings: &ClientSettings) -> Report {
    match try_execute(request, env, settings) {
        Ok(report) => report,
        Err(err) => {
            fungen_error!("{}", err);
            Report::error(err)
        }
    }
}

fn try_execute(
    request: &JobRequest,
    env: &RunEnv,
    settings: &ClientSettings,
) -> Result<Report, RunError> {
    let endpoint = build_server_url(&request.server_connection, &request.args);
    let cookie = build_cookie(&request.server_connection);
    let client = ReqwestGraphqlClient::new(endpoint, cookie, settings)?;
    fungen_debug!("GraphQL endpoint: {}", client.endpoint());
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .map_err(RunError::Runtime)?;
    Ok(runtime.block_on(run(request, env, &client, &SystemCommandRunner)))
}
