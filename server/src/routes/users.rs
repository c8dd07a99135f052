use axum::Json;
use axum::extract::{Query, State};
use friends_shared::api::{
    CurrentUserResponse, FriendsResponse, MessageBody, RegisterBody, RegisteredResponse,
};
use friends_shared::profile::FriendRecord;

use super::{ApiResponse, UsernameQuery};
use crate::state::AppState;

pub async fn register(
    State(state): State<AppState>,
    Json(body): Json<RegisterBody>,
) -> ApiResponse<MessageBody> {
    let outcome = state.graph.write().await.register(&body.username)?;
    tracing::info!(username = body.username.trim(), ?outcome, "register");
    Ok(Json(MessageBody::message(outcome.message())))
}

pub async fn is_registered(
    State(state): State<AppState>,
    Query(query): Query<UsernameQuery>,
) -> Json<RegisteredResponse> {
    let is_registered = state.graph.read().await.is_registered(&query.username);
    Json(RegisteredResponse { is_registered })
}

/// Friends of `username` with their profile payloads. Unknown users have no friends.
pub async fn friends(
    State(state): State<AppState>,
    Query(query): Query<UsernameQuery>,
) -> Json<FriendsResponse> {
    let names = state.graph.read().await.friends_of(&query.username);
    let friends = names
        .into_iter()
        .map(|name| FriendRecord {
            data: Some(state.profile(&name)),
            friend_username: name,
        })
        .collect();
    Json(FriendsResponse {
        friends: Some(friends),
    })
}

pub async fn current_user_info(
    State(state): State<AppState>,
    Query(query): Query<UsernameQuery>,
) -> Json<CurrentUserResponse> {
    Json(CurrentUserResponse {
        data: Some(state.profile(query.username.trim())),
    })
}
