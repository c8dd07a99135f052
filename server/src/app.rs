use axum::Router;
use axum::routing::{get, post};
use friends_shared::api::paths;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::routes;
use crate::state::AppState;

pub(crate) fn build_app(state: AppState) -> Router {
    Router::new()
        .route(paths::FRIENDS, get(routes::users::friends))
        .route(paths::CURRENT_USER_INFO, get(routes::users::current_user_info))
        .route(paths::USER_IS_REGISTERED, get(routes::users::is_registered))
        .route(paths::REGISTER, post(routes::users::register))
        .route(paths::INCOMING_REQUESTS, get(routes::requests::incoming))
        .route(paths::OUTGOING_REQUESTS, get(routes::requests::outgoing))
        .route(paths::SEND_REQUEST, post(routes::requests::send))
        .route(paths::ACCEPT_REQUEST, post(routes::requests::accept))
        .route(paths::DECLINE_REQUEST, post(routes::requests::decline))
        // The content script calls in from the host site's origin.
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

#[cfg(test)]
pub(crate) mod testing {
    use std::net::SocketAddr;

    use crate::state::AppState;

    pub(crate) async fn spawn_test_server(
        state: AppState,
    ) -> (SocketAddr, tokio::task::JoinHandle<()>) {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("bind test listener");
        let addr = listener.local_addr().expect("listener address");
        let app = super::build_app(state);
        let handle = tokio::spawn(async move {
            axum::serve(listener, app).await.expect("serve test app");
        });
        (addr, handle)
    }
}
