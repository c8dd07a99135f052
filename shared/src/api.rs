use std::future::Future;

use chrono::{DateTime, Utc};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::activity::{Submission, flatten_submissions};
use crate::error::{ApiError, ApiResult};
use crate::leaderboard::{Leaderboard, build_leaderboard};
use crate::profile::{Friend, FriendRecord, ProfileData, UserProfile};
use crate::requests::{
    FriendRequests, IncomingRequestsResponse, OutgoingRequestsResponse, RequestPair,
};

pub mod paths {
    pub const FRIENDS: &str = "/friends";
    pub const CURRENT_USER_INFO: &str = "/current-user-info";
    pub const USER_IS_REGISTERED: &str = "/user-is-registered";
    pub const REGISTER: &str = "/register";
    pub const INCOMING_REQUESTS: &str = "/friend-request/incoming";
    pub const OUTGOING_REQUESTS: &str = "/friend-request/outgoing";
    pub const SEND_REQUEST: &str = "/friend-request/send";
    pub const ACCEPT_REQUEST: &str = "/friend-request/accept";
    pub const DECLINE_REQUEST: &str = "/friend-request/decline";
}

/// `path?username=<encoded>`
pub fn query_path(path: &str, username: &str) -> String {
    let encoded: String = url::form_urlencoded::byte_serialize(username.as_bytes()).collect();
    format!("{path}?username={encoded}")
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FriendsResponse {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub friends: Option<Vec<FriendRecord>>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CurrentUserResponse {
    #[serde(default)]
    pub data: Option<ProfileData>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RegisteredResponse {
    #[serde(default)]
    pub is_registered: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegisterBody {
    pub username: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MessageBody {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl MessageBody {
    pub fn message(text: impl Into<String>) -> Self {
        Self {
            message: Some(text.into()),
            error: None,
        }
    }

    pub fn error(text: impl Into<String>) -> Self {
        Self {
            message: None,
            error: Some(text.into()),
        }
    }
}

/// Raw HTTP response as seen by the API layer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpReply {
    pub status: u16,
    pub body: String,
}

impl HttpReply {
    pub fn new(status: u16, body: impl Into<String>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }

    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    /// Server-provided error text, falling back to the status code.
    fn error_message(&self) -> String {
        serde_json::from_str::<MessageBody>(&self.body)
            .ok()
            .and_then(|body| body.error.or(body.message))
            .filter(|text| !text.trim().is_empty())
            .unwrap_or_else(|| format!("Request failed with HTTP {}", self.status))
    }

    fn ensure_success(self) -> ApiResult<Self> {
        if self.is_success() {
            Ok(self)
        } else {
            Err(ApiError::Status {
                status: self.status,
                message: self.error_message(),
            })
        }
    }

    fn decode<T: DeserializeOwned>(self) -> ApiResult<T> {
        let reply = self.ensure_success()?;
        serde_json::from_str(&reply.body).map_err(|e| ApiError::Decode(e.to_string()))
    }
}

/// HTTP seam between the API layer and whatever actually moves bytes
/// (browser fetch in the extension, reqwest in tests).
pub trait Transport {
    fn get(&self, path: &str) -> impl Future<Output = ApiResult<HttpReply>>;
    fn post_json(&self, path: &str, body: String) -> impl Future<Output = ApiResult<HttpReply>>;
}

/// Result of one friends-data load: the raw material for the activity feed,
/// friend grid and leaderboard.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FriendsSnapshot {
    pub friends: Vec<Friend>,
    pub current_user: Option<UserProfile>,
}

impl FriendsSnapshot {
    pub fn feed(&self) -> Vec<Submission> {
        flatten_submissions(&self.friends)
    }

    pub fn leaderboard(&self, current_handle: &str, now: DateTime<Utc>) -> Leaderboard {
        build_leaderboard(current_handle, self.current_user.as_ref(), &self.friends, now)
    }
}

/// A user-triggered mutation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RequestAction {
    Send { receiver: String },
    Accept { sender: String },
    Decline { sender: String },
    Register,
}

/// Which views must be re-fetched after an action succeeds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Refresh {
    pub friends: bool,
    pub requests: bool,
}

impl RequestAction {
    pub fn refresh(&self) -> Refresh {
        match self {
            Self::Send { .. } | Self::Decline { .. } => Refresh {
                friends: false,
                requests: true,
            },
            Self::Accept { .. } | Self::Register => Refresh {
                friends: true,
                requests: true,
            },
        }
    }

    pub fn verb(&self) -> &'static str {
        match self {
            Self::Send { .. } => "send friend request",
            Self::Accept { .. } => "accept friend request",
            Self::Decline { .. } => "decline friend request",
            Self::Register => "register",
        }
    }
}

/// Typed client for the friends backend.
#[derive(Debug, Clone)]
pub struct FriendsApi<T> {
    transport: T,
}

impl<T: Transport> FriendsApi<T> {
    pub fn new(transport: T) -> Self {
        Self { transport }
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Fetch the friends list and the current user's profile concurrently.
    ///
    /// Both must succeed; a `/friends` payload without a `friends` key is an error.
    pub async fn load_friends_data(&self, username: &str) -> ApiResult<FriendsSnapshot> {
        let friends_path = query_path(paths::FRIENDS, username);
        let user_path = query_path(paths::CURRENT_USER_INFO, username);
        let (friends_reply, user_reply) = futures::join!(
            self.transport.get(&friends_path),
            self.transport.get(&user_path)
        );

        let friends: FriendsResponse = friends_reply?.decode()?;
        let records = friends.friends.ok_or(ApiError::MissingField("friends"))?;
        let current: CurrentUserResponse = user_reply?.decode()?;

        Ok(FriendsSnapshot {
            friends: records.into_iter().map(Friend::from).collect(),
            current_user: current.data.as_ref().map(ProfileData::to_profile),
        })
    }

    pub async fn load_friend_requests(&self, username: &str) -> ApiResult<FriendRequests> {
        let incoming_path = query_path(paths::INCOMING_REQUESTS, username);
        let outgoing_path = query_path(paths::OUTGOING_REQUESTS, username);
        let (incoming_reply, outgoing_reply) = futures::join!(
            self.transport.get(&incoming_path),
            self.transport.get(&outgoing_path)
        );

        let incoming: IncomingRequestsResponse = incoming_reply?.decode()?;
        let outgoing: OutgoingRequestsResponse = outgoing_reply?.decode()?;
        Ok(FriendRequests::from_responses(incoming, outgoing))
    }

    pub async fn is_registered(&self, username: &str) -> ApiResult<bool> {
        let path = query_path(paths::USER_IS_REGISTERED, username);
        let reply: RegisteredResponse = self.transport.get(&path).await?.decode()?;
        Ok(reply.is_registered)
    }

    pub async fn register(&self, username: &str) -> ApiResult<()> {
        let body = encode(&RegisterBody {
            username: username.to_string(),
        })?;
        let reply: MessageBody = self
            .transport
            .post_json(paths::REGISTER, body)
            .await?
            .decode()?;
        match reply.message {
            Some(message) if message.contains("registered") => Ok(()),
            other => Err(ApiError::Rejected(
                reply
                    .error
                    .or(other)
                    .unwrap_or_else(|| "Registration failed".to_string()),
            )),
        }
    }

    pub async fn send_request(&self, sender: &str, receiver: &str) -> ApiResult<()> {
        self.post_pair(paths::SEND_REQUEST, RequestPair::new(sender, receiver))
            .await
    }

    pub async fn accept_request(&self, sender: &str, receiver: &str) -> ApiResult<()> {
        self.post_pair(paths::ACCEPT_REQUEST, RequestPair::new(sender, receiver))
            .await
    }

    pub async fn decline_request(&self, sender: &str, receiver: &str) -> ApiResult<()> {
        self.post_pair(paths::DECLINE_REQUEST, RequestPair::new(sender, receiver))
            .await
    }

    /// Run `action` on behalf of `username` and report what needs re-fetching.
    pub async fn perform(&self, username: &str, action: &RequestAction) -> ApiResult<Refresh> {
        match action {
            RequestAction::Send { receiver } => self.send_request(username, receiver).await?,
            RequestAction::Accept { sender } => self.accept_request(sender, username).await?,
            RequestAction::Decline { sender } => self.decline_request(sender, username).await?,
            RequestAction::Register => self.register(username).await?,
        }
        Ok(action.refresh())
    }

    async fn post_pair(&self, path: &str, pair: RequestPair) -> ApiResult<()> {
        let body = encode(&pair)?;
        self.transport.post_json(path, body).await?.ensure_success()?;
        Ok(())
    }
}

fn encode<B: Serialize>(body: &B) -> ApiResult<String> {
    serde_json::to_string(body).map_err(|e| ApiError::Decode(e.to_string()))
}


#[cfg(test)]
mod tests {
    use futures::executor::block_on;
    use serde_json::json;

    use super::testing::FakeTransport;
    use super::{FriendsApi, RequestAction, query_path};
    use crate::error::ApiError;

    #[test]
    fn query_path_encodes_username() {
        assert_eq!(query_path("/friends", "a b&c"), "/friends?username=a+b%26c");
    }

    #[test]
    fn loads_friends_and_current_user() {
        let transport = FakeTransport::default()
            .with(
                "/friends?username=me",
                200,
                json!({ "friends": [{ "friend_username": "alice", "data": {} }] }),
            )
            .with(
                "/current-user-info?username=me",
                200,
                json!({ "data": { "userPublicProfile": { "profile": { "ranking": 9 } } } }),
            );
        let api = FriendsApi::new(transport);

        let snapshot = block_on(api.load_friends_data("me")).expect("snapshot");
        assert_eq!(snapshot.friends.len(), 1);
        assert_eq!(snapshot.friends[0].username, "alice");
        assert_eq!(
            snapshot.current_user.and_then(|profile| profile.ranking),
            Some(9)
        );
    }

    #[test]
    fn one_bad_timestamp_keeps_every_friend() {
        let transport = FakeTransport::default()
            .with(
                "/friends?username=me",
                200,
                json!({ "friends": [
                    { "friend_username": "alice", "data": { "recentAcSubmissions": [
                        { "title": "Two Sum", "titleSlug": "two-sum", "timestamp": "1700000000" }
                    ] } },
                    { "friend_username": "bob", "data": { "recentAcSubmissions": [
                        { "title": "Broken", "titleSlug": "broken", "timestamp": "" }
                    ] } }
                ] }),
            )
            .with("/current-user-info?username=me", 200, json!({ "data": {} }));
        let api = FriendsApi::new(transport);

        let snapshot = block_on(api.load_friends_data("me")).expect("snapshot");
        assert_eq!(snapshot.friends.len(), 2);
        let feed = snapshot.feed();
        assert_eq!(feed.len(), 1);
        assert_eq!(feed[0].friend_username, "alice");
        assert_eq!(feed[0].timestamp_secs, 1_700_000_000);
    }

    #[test]
    fn missing_friends_key_is_an_error() {
        let transport = FakeTransport::default()
            .with("/friends?username=me", 200, json!({ "message": "hi" }))
            .with("/current-user-info?username=me", 200, json!({ "data": {} }));
        let api = FriendsApi::new(transport);

        let err = block_on(api.load_friends_data("me")).expect_err("should fail");
        assert_eq!(err, ApiError::MissingField("friends"));
    }

    #[test]
    fn missing_request_queues_are_empty() {
        let transport = FakeTransport::default()
            .with("/friend-request/incoming?username=me", 200, json!({}))
            .with("/friend-request/outgoing?username=me", 200, json!({}));
        let api = FriendsApi::new(transport);

        let requests = block_on(api.load_friend_requests("me")).expect("requests");
        assert!(requests.incoming.is_empty());
        assert!(requests.outgoing.is_empty());
    }

    #[test]
    fn send_failure_surfaces_server_error() {
        let transport = FakeTransport::default().with(
            "/friend-request/send",
            400,
            json!({ "error": "User ghost does not exist" }),
        );
        let api = FriendsApi::new(transport);

        let err = block_on(api.send_request("me", "ghost")).expect_err("should fail");
        assert_eq!(err.user_message(), "User ghost does not exist");
        let bodies = api.transport().bodies.borrow();
        let sent: serde_json::Value = serde_json::from_str(&bodies[0]).expect("json body");
        assert_eq!(
            sent,
            json!({ "sender_username": "me", "receiver_username": "ghost" })
        );
    }

    #[test]
    fn accept_posts_sender_and_current_user() {
        let transport =
            FakeTransport::default().with("/friend-request/accept", 200, json!({ "message": "ok" }));
        let api = FriendsApi::new(transport);

        let refresh = block_on(api.perform(
            "me",
            &RequestAction::Accept {
                sender: "carol".to_string(),
            },
        ))
        .expect("accept");
        assert!(refresh.friends && refresh.requests);
        let bodies = api.transport().bodies.borrow();
        let sent: serde_json::Value = serde_json::from_str(&bodies[0]).expect("json body");
        assert_eq!(
            sent,
            json!({ "sender_username": "carol", "receiver_username": "me" })
        );
    }

    #[test]
    fn register_requires_registered_message() {
        let ok = FakeTransport::default().with(
            "/register",
            200,
            json!({ "message": "User me registered successfully" }),
        );
        assert!(block_on(FriendsApi::new(ok).register("me")).is_ok());

        let odd = FakeTransport::default().with("/register", 200, json!({ "message": "hmm" }));
        assert_eq!(
            block_on(FriendsApi::new(odd).register("me")),
            Err(ApiError::Rejected("hmm".to_string()))
        );
    }

    #[test]
    fn registration_gate_reads_flag() {
        let transport = FakeTransport::default().with(
            "/user-is-registered?username=me",
            200,
            json!({ "is_registered": false }),
        );
        assert_eq!(
            block_on(FriendsApi::new(transport).is_registered("me")),
            Ok(false)
        );
    }

    #[test]
    fn decline_and_send_only_refresh_requests() {
        let decline = RequestAction::Decline {
            sender: "x".to_string(),
        };
        let send = RequestAction::Send {
            receiver: "y".to_string(),
        };
        assert!(!decline.refresh().friends && decline.refresh().requests);
        assert!(!send.refresh().friends && send.refresh().requests);
    }
}
