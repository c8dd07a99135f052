mod app;
mod config;
mod element_waiter;
mod error;
mod identity;
mod logging;
mod navbar;
mod transport;
mod views;

use wasm_bindgen_futures::spawn_local;

fn main() {
    console_error_panic_hook::set_once();
    logging::init();
    spawn_local(async {
        if let Err(e) = navbar::install().await {
            tracing::warn!(error = %e, "friends button not installed");
        }
    });
}
