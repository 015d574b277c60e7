//! FunGen plugin engine: GraphQL access, process execution and the run loop.
mod graphql;
mod input;
mod install;
mod jobs;
mod process;
mod run;
mod scenes;

pub use graphql::{
    decode_response, ClientSettings, GraphqlClient, GraphqlError, ReqwestGraphqlClient,
};
pub use input::read_job_request;
pub use install::{run_install, InstallError};
pub use jobs::{process_scenes, run_for_scene, should_skip};
pub use process::{CommandOutput, CommandRunner, SystemCommandRunner};
pub use run::{execute, run, RunError};
pub use scenes::{fetch_all_scenes, fetch_scenes, FIND_SCENES_QUERY, PAGE_SIZE};
