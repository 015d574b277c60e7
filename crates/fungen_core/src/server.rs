use std::fmt;

use serde_json::Value;

use crate::request::{non_empty_text, JsonMap, ServerConnection};

pub const DEFAULT_SCHEME: &str = "http";
pub const DEFAULT_HOST: &str = "localhost";
pub const DEFAULT_PORT: u16 = 9999;

/// `<scheme>://<host>:<port>/graphql` for the connection the host handed us.
pub fn build_server_url(connection: &ServerConnection, args: &JsonMap) -> String {
    let scheme = connection
        .scheme
        .as_deref()
        .filter(|scheme| !scheme.is_empty())
        .unwrap_or(DEFAULT_SCHEME)
        .to_ascii_lowercase();
    let host = non_empty_text(args.get("host"))
        .or_else(|| connection.host.clone().filter(|host| !host.is_empty()))
        .unwrap_or_else(|| DEFAULT_HOST.to_string());
    let port = match connection.port.as_ref() {
        Some(Value::Number(number)) if number.as_u64() != Some(0) => number.to_string(),
        Some(Value::String(text)) if !text.is_empty() => text.clone(),
        _ => DEFAULT_PORT.to_string(),
    };
    format!("{scheme}://{host}:{port}/graphql")
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionCookie {
    pub name: String,
    pub value: String,
}

impl SessionCookie {
    /// Value for the `Cookie` request header.
    pub fn header_value(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for SessionCookie {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}={}", self.name, self.value)
    }
}

/// The session cookie, when the connection carries both a name and a value.
pub fn build_cookie(connection: &ServerConnection) -> Option<SessionCookie> {
    let cookie = connection.session_cookie.as_ref()?;
    let name = cookie.name.as_deref().filter(|name| !name.is_empty())?;
    let value = cookie.value.as_deref().filter(|value| !value.is_empty())?;
    Some(SessionCookie {
        name: name.to_string(),
        value: value.to_string(),
    })
}
