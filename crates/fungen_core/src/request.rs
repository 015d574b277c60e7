use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::{Map, Value};
use thiserror::Error;

/// Free-form JSON object, as used for plugin `args` and `settings`.
pub type JsonMap = Map<String, Value>;

#[derive(Debug, Error)]
pub enum RequestError {
    #[error("failed to parse input JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("input JSON is not an object")]
    NotAnObject,
}

/// Job description handed to the plugin on standard input.
///
/// Every field is read leniently: a value of the wrong type falls back to
/// its default instead of rejecting the whole request.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct JobRequest {
    #[serde(deserialize_with = "lenient")]
    pub server_connection: ServerConnection,
    #[serde(deserialize_with = "lenient")]
    pub args: JsonMap,
    #[serde(deserialize_with = "lenient")]
    pub settings: JsonMap,
    #[serde(rename = "pluginDir", deserialize_with = "lenient")]
    pub plugin_dir: Option<String>,
}

impl JobRequest {
    /// Parses a raw request. Blank input yields the empty request; only
    /// malformed JSON or a non-object document is an error.
    pub fn parse(raw: &str) -> Result<Self, RequestError> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Ok(Self::default());
        }
        let value: Value = serde_json::from_str(trimmed)?;
        if !value.is_object() {
            return Err(RequestError::NotAnObject);
        }
        Ok(serde_json::from_value(value)?)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default, rename_all = "PascalCase")]
pub struct ServerConnection {
    #[serde(deserialize_with = "lenient")]
    pub scheme: Option<String>,
    #[serde(deserialize_with = "lenient")]
    pub host: Option<String>,
    /// The host sends a number, but older setups pass a string.
    pub port: Option<Value>,
    #[serde(deserialize_with = "lenient")]
    pub session_cookie: Option<SessionCookieFields>,
    #[serde(deserialize_with = "lenient")]
    pub plugin_dir: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default, rename_all = "PascalCase")]
pub struct SessionCookieFields {
    #[serde(deserialize_with = "lenient")]
    pub name: Option<String>,
    #[serde(deserialize_with = "lenient")]
    pub value: Option<String>,
}

/// Reads a field, substituting the default when it is null or of the wrong type.
pub(crate) fn lenient<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: serde::Deserializer<'de>,
    T: DeserializeOwned + Default,
{
    let value = Value::deserialize(deserializer)?;
    Ok(serde_json::from_value(value).unwrap_or_default())
}

/// Python-style truthiness for loosely typed plugin arguments.
pub fn is_truthy(value: Option<&Value>) -> bool {
    match value {
        None | Some(Value::Null) => false,
        Some(Value::Bool(flag)) => *flag,
        Some(Value::Number(number)) => number.as_f64().is_some_and(|n| n != 0.0),
        Some(Value::String(text)) => !text.is_empty(),
        Some(Value::Array(items)) => !items.is_empty(),
        Some(Value::Object(map)) => !map.is_empty(),
    }
}

/// Returns the value as text when it is a non-empty string or a number.
pub fn non_empty_text(value: Option<&Value>) -> Option<String> {
    match value? {
        Value::String(text) if !text.is_empty() => Some(text.clone()),
        Value::Number(number) => Some(number.to_string()),
        _ => None,
    }
}
