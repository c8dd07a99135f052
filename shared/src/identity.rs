//! Page-context identity handshake shared by the resolver and the content script.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Discriminator carried by the `postMessage` payload.
pub const USERNAME_MESSAGE_TYPE: &str = "LEETCODE_USERNAME";

pub const GRAPHQL_URL: &str = "https://leetcode.com/graphql";
pub const USER_STATUS_QUERY: &str = "query { userStatus { username } }";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IdentityMessage {
    #[serde(rename = "type")]
    pub kind: String,
    pub username: String,
}

impl IdentityMessage {
    pub fn new(username: impl Into<String>) -> Self {
        Self {
            kind: USERNAME_MESSAGE_TYPE.to_string(),
            username: username.into(),
        }
    }

    /// Username carried by a window message, if it is ours and non-empty.
    pub fn username_from(data: &Value) -> Option<String> {
        if data.get("type").and_then(Value::as_str) != Some(USERNAME_MESSAGE_TYPE) {
            return None;
        }
        data.get("username")
            .and_then(Value::as_str)
            .map(str::trim)
            .filter(|name| !name.is_empty())
            .map(str::to_string)
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct GraphQlRequest<'a> {
    pub query: &'a str,
}

impl GraphQlRequest<'static> {
    pub fn user_status() -> Self {
        Self {
            query: USER_STATUS_QUERY,
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct UserStatusResponse {
    pub data: Option<UserStatusData>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct UserStatusData {
    pub user_status: Option<UserStatus>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct UserStatus {
    pub username: Option<String>,
}

impl UserStatusResponse {
    /// Logged-in username, or `None` for anonymous sessions.
    pub fn username(self) -> Option<String> {
        self.data?
            .user_status?
            .username
            .filter(|name| !name.trim().is_empty())
    }
}
