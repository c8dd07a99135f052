use std::cell::RefCell;
use std::rc::Rc;
use std::time::Duration;

use futures::channel::oneshot;
use futures::future::{Either, select};
use wasm_bindgen::JsCast;
use wasm_bindgen::closure::Closure;
use web_sys::{Element, MutationObserver, MutationObserverInit};

use crate::error::{ClientError, ClientResult};

/// Resolve with the first element matching `selector`, watching DOM
/// mutations until it shows up or `timeout` elapses.
///
/// The observer is disconnected and the timer cleared on every exit path.
pub async fn wait_for_element(selector: &str, timeout: Duration) -> ClientResult<Element> {
    let document = web_sys::window()
        .and_then(|window| window.document())
        .ok_or(ClientError::NoDocument)?;
    if let Some(found) = document.query_selector(selector)? {
        return Ok(found);
    }

    let (tx, rx) = oneshot::channel::<Element>();
    let sender = Rc::new(RefCell::new(Some(tx)));

    let observed = document.clone();
    let wanted = selector.to_string();
    let on_mutation = Closure::<dyn FnMut(js_sys::Array, MutationObserver)>::new(
        move |_records: js_sys::Array, _observer: MutationObserver| {
            let Ok(Some(found)) = observed.query_selector(&wanted) else {
                return;
            };
            if let Some(tx) = sender.borrow_mut().take() {
                let _ = tx.send(found);
            }
        },
    );

    let observer = MutationObserver::new(on_mutation.as_ref().unchecked_ref())?;
    let options = MutationObserverInit::new();
    options.set_child_list(true);
    options.set_subtree(true);
    observer.observe_with_options(&document, &options)?;

    let deadline = gloo_timers::future::sleep(timeout);
    futures::pin_mut!(deadline);
    let outcome = select(rx, deadline).await;
    observer.disconnect();
    drop(on_mutation);

    match outcome {
        Either::Left((Ok(found), _)) => Ok(found),
        _ => {
            tracing::warn!(selector, "element did not appear before timeout");
            Err(ClientError::ElementNotFound(selector.to_string()))
        }
    }
}
