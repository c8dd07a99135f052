use axum::Json;
use axum::extract::{Query, State};
use friends_shared::api::MessageBody;
use friends_shared::requests::{
    IncomingRequestsResponse, OutgoingRequestsResponse, RequestPair,
};

use super::{ApiResponse, UsernameQuery};
use crate::state::AppState;

pub async fn incoming(
    State(state): State<AppState>,
    Query(query): Query<UsernameQuery>,
) -> Json<IncomingRequestsResponse> {
    Json(IncomingRequestsResponse {
        incoming_friend_requests: state.graph.read().await.incoming(&query.username),
    })
}

pub async fn outgoing(
    State(state): State<AppState>,
    Query(query): Query<UsernameQuery>,
) -> Json<OutgoingRequestsResponse> {
    Json(OutgoingRequestsResponse {
        outgoing_friend_requests: state.graph.read().await.outgoing(&query.username),
    })
}

pub async fn send(
    State(state): State<AppState>,
    Json(pair): Json<RequestPair>,
) -> ApiResponse<MessageBody> {
    let outcome = state
        .graph
        .write()
        .await
        .send(&pair.sender_username, &pair.receiver_username)?;
    tracing::info!(
        sender = %pair.sender_username,
        receiver = %pair.receiver_username,
        ?outcome,
        "friend request sent"
    );
    Ok(Json(MessageBody::message(outcome.message())))
}

pub async fn accept(
    State(state): State<AppState>,
    Json(pair): Json<RequestPair>,
) -> ApiResponse<MessageBody> {
    state
        .graph
        .write()
        .await
        .accept(&pair.sender_username, &pair.receiver_username)?;
    tracing::info!(
        sender = %pair.sender_username,
        receiver = %pair.receiver_username,
        "friend request accepted"
    );
    Ok(Json(MessageBody::message("Friend request accepted")))
}

pub async fn decline(
    State(state): State<AppState>,
    Json(pair): Json<RequestPair>,
) -> ApiResponse<MessageBody> {
    state
        .graph
        .write()
        .await
        .decline(&pair.sender_username, &pair.receiver_username)?;
    tracing::info!(
        sender = %pair.sender_username,
        receiver = %pair.receiver_username,
        "friend request declined"
    );
    Ok(Json(MessageBody::message("Friend request declined")))
}
