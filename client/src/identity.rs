use std::cell::RefCell;
use std::rc::Rc;
use std::time::Duration;

use friends_shared::IdentityMessage;
use futures::channel::oneshot;
use futures::future::{Either, select};
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::{Document, HtmlScriptElement, MessageEvent};

use crate::config::RESOLVER_SCRIPT;
use crate::error::{ClientError, ClientResult};

#[wasm_bindgen]
extern "C" {
    #[wasm_bindgen(js_namespace = ["chrome", "runtime"], js_name = getURL, catch)]
    fn extension_url(path: &str) -> Result<String, JsValue>;
}

/// Load the page-context resolver. The tag removes itself once loaded.
fn inject_resolver(document: &Document) -> ClientResult<()> {
    let script: HtmlScriptElement = document
        .create_element("script")?
        .dyn_into()
        .map_err(|_| ClientError::Dom("created element is not a script".to_string()))?;
    script.set_src(&extension_url(RESOLVER_SCRIPT)?);

    let loaded = script.clone();
    let onload = Closure::once_into_js(move || loaded.remove());
    script.set_onload(Some(onload.unchecked_ref()));

    let parent = document
        .query_selector("head")?
        .or_else(|| document.document_element())
        .ok_or(ClientError::NoDocument)?;
    parent.append_child(&script)?;
    Ok(())
}

/// Wait for the page-context resolver to announce the logged-in username.
///
/// Only same-window messages tagged with the identity discriminator count.
/// Anonymous sessions never announce anything, which surfaces here as
/// [`ClientError::IdentityTimeout`].
pub async fn resolve_username(timeout: Duration) -> ClientResult<String> {
    let window = web_sys::window().ok_or(ClientError::NoDocument)?;
    let document = window.document().ok_or(ClientError::NoDocument)?;

    let (tx, rx) = oneshot::channel::<String>();
    let sender = Rc::new(RefCell::new(Some(tx)));

    let own_window = window.clone();
    let handler = Closure::<dyn FnMut(MessageEvent)>::new(move |event: MessageEvent| {
        let from_page = event
            .source()
            .is_some_and(|source| js_sys::Object::is(source.as_ref(), own_window.as_ref()));
        if !from_page {
            return;
        }
        let Ok(data) = serde_wasm_bindgen::from_value::<serde_json::Value>(event.data()) else {
            return;
        };
        let Some(username) = IdentityMessage::username_from(&data) else {
            return;
        };
        if let Some(tx) = sender.borrow_mut().take() {
            let _ = tx.send(username);
        }
    });
    window.add_event_listener_with_callback("message", handler.as_ref().unchecked_ref())?;

    let injected = inject_resolver(&document);

    let deadline = gloo_timers::future::sleep(timeout);
    futures::pin_mut!(deadline);
    let outcome = match injected {
        Ok(()) => Some(select(rx, deadline).await),
        Err(e) => {
            tracing::warn!(error = %e, "failed to inject identity resolver");
            None
        }
    };
    let _ = window
        .remove_event_listener_with_callback("message", handler.as_ref().unchecked_ref());
    drop(handler);

    match outcome {
        Some(Either::Left((Ok(username), _))) => {
            tracing::info!(username, "resolved LeetCode username");
            Ok(username)
        }
        _ => Err(ClientError::IdentityTimeout),
    }
}
