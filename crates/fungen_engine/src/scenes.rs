use fungen_core::{Scene, SceneId, ScenePage};
use fungen_logging::{fungen_debug, fungen_info};
use serde_json::{json, Value};

use crate::graphql::{GraphqlClient, GraphqlError};

pub const PAGE_SIZE: u64 = 200;

pub const FIND_SCENES_QUERY: &str = concat!(
    "query FindScenes($filter: FindFilterType, $scene_filter: SceneFilterType, $scene_ids: [Int!]) {",
    "  findScenes(filter: $filter, scene_filter: $scene_filter, scene_ids: $scene_ids) {",
    "    count",
    "    scenes { id path }",
    "  }",
    "}",
);

fn find_scenes_variables(page: u64, scene_ids: Option<&[SceneId]>) -> Value {
    json!({
        "filter": { "per_page": PAGE_SIZE, "page": page },
        "scene_filter": null,
        "scene_ids": scene_ids,
    })
}

async fn find_scenes_page(
    client: &dyn GraphqlClient,
    page: u64,
    scene_ids: Option<&[SceneId]>,
) -> Result<ScenePage, GraphqlError> {
    let mut data = client
        .request(FIND_SCENES_QUERY, find_scenes_variables(page, scene_ids))
        .await?;
    match data.get_mut("findScenes").map(Value::take) {
        Some(Value::Null) | None => Ok(ScenePage::default()),
        Some(find) => {
            serde_json::from_value(find).map_err(|err| GraphqlError::Decode(err.to_string()))
        }
    }
}

/// Looks up specific scenes; returns the reported count and the scenes.
pub async fn fetch_scenes(
    client: &dyn GraphqlClient,
    scene_ids: &[SceneId],
) -> Result<(u64, Vec<Scene>), GraphqlError> {
    let page = find_scenes_page(client, 1, Some(scene_ids)).await?;
    Ok((page.total(), page.into_scenes()))
}

/// Pages through every scene on the server.
///
/// Stops on the first empty page or once the total reported by the first
/// page has been collected.
pub async fn fetch_all_scenes(client: &dyn GraphqlClient) -> Result<Vec<Scene>, GraphqlError> {
    let mut all_scenes = Vec::new();
    let mut total: Option<u64> = None;
    let mut page = 1;
    loop {
        let result = find_scenes_page(client, page, None).await?;
        let expected = *total.get_or_insert_with(|| {
            fungen_info!("Total scenes: {}", result.total());
            result.total()
        });
        let scenes = result.into_scenes();
        if scenes.is_empty() {
            break;
        }
        fungen_debug!("Fetched page {} with {} scenes", page, scenes.len());
        all_scenes.extend(scenes);
        page += 1;
        if all_scenes.len() as u64 >= expected {
            break;
        }
    }
    Ok(all_scenes)
}
