//! Runs in the page's own JS context so the GraphQL request carries the
//! site session cookies. Announces the logged-in username to the content
//! script with `window.postMessage`; anonymous sessions announce nothing.

use friends_shared::IdentityMessage;
use friends_shared::identity::{GRAPHQL_URL, GraphQlRequest, UserStatusResponse};
use gloo_net::http::Request;
use wasm_bindgen_futures::spawn_local;

async fn fetch_username() -> Result<Option<String>, String> {
    let resp = Request::post(GRAPHQL_URL)
        .json(&GraphQlRequest::user_status())
        .map_err(|e| format!("encode error: {e}"))?
        .send()
        .await
        .map_err(|e| format!("fetch error: {e}"))?;
    if !resp.ok() {
        return Err(format!("HTTP {}", resp.status()));
    }
    let status: UserStatusResponse = resp
        .json()
        .await
        .map_err(|e| format!("parse error: {e}"))?;
    Ok(status.username())
}

fn announce(username: String) -> Result<(), String> {
    let window = web_sys::window().ok_or("no window")?;
    let message = serde_wasm_bindgen::to_value(&IdentityMessage::new(username))
        .map_err(|e| format!("encode error: {e}"))?;
    window
        .post_message(&message, "*")
        .map_err(|e| format!("postMessage failed: {e:?}"))
}

fn main() {
    console_error_panic_hook::set_once();
    spawn_local(async {
        let result = match fetch_username().await {
            Ok(Some(username)) => announce(username),
            Ok(None) => Ok(()),
            Err(e) => Err(e),
        };
        if let Err(e) = result {
            web_sys::console::warn_1(&format!("[friends] username lookup failed: {e}").into());
        }
    });
}
