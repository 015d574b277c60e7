use serde::{Deserialize, Deserializer};
use serde_json::Value;

use crate::request::lenient;

pub type SceneId = i64;

/// One unit of work as listed by the server.
///
/// Listing entries are read leniently so one malformed scene becomes a
/// per-scene failure rather than failing the whole listing.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct Scene {
    /// `None` when the server sent an id that is not an integer.
    #[serde(deserialize_with = "deserialize_scene_id")]
    pub id: Option<SceneId>,
    #[serde(deserialize_with = "lenient")]
    pub path: Option<String>,
}

impl Scene {
    pub fn new(id: SceneId, path: impl Into<String>) -> Self {
        Self {
            id: Some(id),
            path: Some(path.into()),
        }
    }

    /// The video path, when the server reported a non-empty one.
    pub fn video_path(&self) -> Option<&str> {
        self.path.as_deref().filter(|path| !path.is_empty())
    }
}

/// Payload of the `findScenes` query.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ScenePage {
    #[serde(deserialize_with = "lenient")]
    pub count: Option<u64>,
    #[serde(deserialize_with = "deserialize_scene_list")]
    pub scenes: Option<Vec<Scene>>,
}

impl ScenePage {
    pub fn total(&self) -> u64 {
        self.count.unwrap_or(0)
    }

    pub fn into_scenes(self) -> Vec<Scene> {
        self.scenes.unwrap_or_default()
    }
}

/// GraphQL `ID`s arrive as strings; plugin arguments may carry plain numbers.
pub fn parse_scene_id(value: &Value) -> Option<SceneId> {
    match value {
        Value::Number(number) => number.as_i64(),
        Value::String(text) => text.trim().parse().ok(),
        _ => None,
    }
}

fn deserialize_scene_id<'de, D>(deserializer: D) -> Result<Option<SceneId>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Value::deserialize(deserializer)?;
    Ok(parse_scene_id(&raw))
}

fn deserialize_scene_list<'de, D>(deserializer: D) -> Result<Option<Vec<Scene>>, D::Error>
where
    D: Deserializer<'de>,
{
    match Value::deserialize(deserializer)? {
        Value::Array(items) => Ok(Some(
            items
                .into_iter()
                .map(|item| serde_json::from_value(item).unwrap_or_default())
                .collect(),
        )),
        _ => Ok(None),
    }
}
