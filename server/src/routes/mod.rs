pub mod requests;
pub mod users;

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use friends_shared::api::MessageBody;
use serde::Deserialize;

use crate::graph::GraphError;

#[derive(Debug, Deserialize)]
pub struct UsernameQuery {
    pub username: String,
}

/// Error reply in the backend's `{ "error": "..." }` shape.
#[derive(Debug)]
pub struct ApiFailure {
    status: StatusCode,
    message: String,
}

impl From<GraphError> for ApiFailure {
    fn from(error: GraphError) -> Self {
        Self {
            status: error.status(),
            message: error.to_string(),
        }
    }
}

impl IntoResponse for ApiFailure {
    fn into_response(self) -> Response {
        (self.status, Json(MessageBody::error(self.message))).into_response()
    }
}

pub type ApiResponse<T> = Result<Json<T>, ApiFailure>;

#[cfg(test)]
mod tests {
    use serde_json::{Value, json};

    use crate::app::testing::spawn_test_server;
    use crate::state::AppState;

    #[tokio::test]
    async fn register_reports_registered_both_times() {
        let (addr, server_handle) = spawn_test_server(AppState::default()).await;
        let base_url = format!("http://{addr}");
        let client = reqwest::Client::new();

        for expected in ["User registered successfully", "User already registered"] {
            let body = client
                .post(format!("{base_url}/register"))
                .json(&json!({ "username": "dana" }))
                .send()
                .await
                .expect("register request")
                .error_for_status()
                .expect("register status")
                .json::<Value>()
                .await
                .expect("parse register response");
            assert_eq!(body["message"], expected);
        }

        let registered = client
            .get(format!("{base_url}/user-is-registered?username=dana"))
            .send()
            .await
            .expect("registered request")
            .json::<Value>()
            .await
            .expect("parse registered response");
        assert_eq!(registered["is_registered"], true);

        server_handle.abort();
        let _ = server_handle.await;
    }

    #[tokio::test]
    async fn errors_use_error_body_and_status() {
        let (addr, server_handle) = spawn_test_server(AppState::default()).await;
        let base_url = format!("http://{addr}");
        let client = reqwest::Client::new();

        let self_request = client
            .post(format!("{base_url}/friend-request/send"))
            .json(&json!({ "sender_username": "erin", "receiver_username": "erin" }))
            .send()
            .await
            .expect("send request");
        assert_eq!(self_request.status(), reqwest::StatusCode::BAD_REQUEST);
        let body = self_request.json::<Value>().await.expect("parse error body");
        assert!(body["error"].as_str().is_some_and(|text| !text.is_empty()));

        let missing = client
            .post(format!("{base_url}/friend-request/accept"))
            .json(&json!({ "sender_username": "x", "receiver_username": "y" }))
            .send()
            .await
            .expect("accept request");
        assert_eq!(missing.status(), reqwest::StatusCode::NOT_FOUND);
        let body = missing.json::<Value>().await.expect("parse error body");
        assert_eq!(body["error"], "friend request not found");

        server_handle.abort();
        let _ = server_handle.await;
    }

    #[tokio::test]
    async fn unknown_user_reads_are_empty_not_errors() {
        let (addr, server_handle) = spawn_test_server(AppState::default()).await;
        let base_url = format!("http://{addr}");
        let client = reqwest::Client::new();

        let friends = client
            .get(format!("{base_url}/friends?username=nobody"))
            .header("Origin", "https://leetcode.com")
            .send()
            .await
            .expect("friends request");
        assert!(
            friends
                .headers()
                .contains_key(reqwest::header::ACCESS_CONTROL_ALLOW_ORIGIN)
        );
        let body = friends.json::<Value>().await.expect("parse friends");
        assert_eq!(body["friends"], json!([]));

        let incoming = client
            .get(format!("{base_url}/friend-request/incoming?username=nobody"))
            .send()
            .await
            .expect("incoming request")
            .json::<Value>()
            .await
            .expect("parse incoming");
        assert_eq!(incoming["incoming_friend_requests"], json!([]));

        let no_query = client
            .get(format!("{base_url}/friends"))
            .send()
            .await
            .expect("friends without query");
        assert_eq!(no_query.status(), reqwest::StatusCode::BAD_REQUEST);

        server_handle.abort();
        let _ = server_handle.await;
    }
}
