use std::any::Any;
use std::cell::RefCell;

use leptos::mount::mount_to;
use wasm_bindgen::JsCast;
use wasm_bindgen::closure::Closure;
use web_sys::{Document, Element, HtmlElement, KeyboardEvent, MouseEvent, Node};

use crate::app::FriendsPanel;
use crate::config::{
    self, ELEMENT_WAIT_TIMEOUT, POPUP_HOST_ID, POPUP_VIEWPORT_MARGIN_PX, POPUP_WIDTH_PX,
};
use crate::element_waiter::wait_for_element;
use crate::error::{ClientError, ClientResult};
use crate::views::palette;

const BUTTON_ID: &str = "friends-navbar-button";
const BUTTON_CLASS: &str = "group relative flex h-8 items-center justify-center rounded p-1 hover:bg-fill-3 dark:hover:bg-dark-fill-3 cursor-pointer";
const ACTIVE_CLASSES: [&str; 2] = ["bg-fill-3", "dark:bg-dark-fill-3"];
const POPUP_CLASS: &str = "absolute text-text-secondary dark:text-dark-text-secondary rounded shadow-2xl p-2 pt-3 text-sm transition-opacity duration-200";

const FRIENDS_ICON: &str = r#"<svg xmlns="http://www.w3.org/2000/svg" fill="none" stroke="currentColor" stroke-width="2" viewBox="0 0 24 24" width="22" height="22" class="text-text-secondary dark:text-text-secondary hover:text-text-primary dark:hover:text-text-primary"><path d="M16 11c1.66 0 2.99-1.34 2.99-3S17.66 5 16 5s-3 1.34-3 3 1.34 3 3 3zm-8 0c1.66 0 2.99-1.34 2.99-3S9.66 5 8 5s-3 1.34-3 3 1.34 3 3 3zm0 2c-2.33 0-7 1.17-7 3.5V19h14v-2.5c0-2.33-4.67-3.5-7-3.5zm8 0c-.29 0-.62.02-.97.05 1.16.84 1.97 2.01 1.97 3.45V19h6v-2.5c0-2.33-4.67-3.5-7-3.5z"/></svg>"#;

/// Listeners that must live as long as the page.
struct PopupBindings {
    document: Document,
    button: Element,
    on_button_click: Closure<dyn Fn(MouseEvent)>,
    on_document_click: Closure<dyn Fn(MouseEvent)>,
    on_keydown: Closure<dyn Fn(KeyboardEvent)>,
}

impl PopupBindings {
    fn detach(&self) {
        let _ = self.button.remove_event_listener_with_callback(
            "click",
            self.on_button_click.as_ref().unchecked_ref(),
        );
        let _ = self.document.remove_event_listener_with_callback(
            "click",
            self.on_document_click.as_ref().unchecked_ref(),
        );
        let _ = self
            .document
            .remove_event_listener_with_callback("keydown", self.on_keydown.as_ref().unchecked_ref());
    }
}

thread_local! {
    static POPUP_BINDINGS: RefCell<Option<PopupBindings>> = const { RefCell::new(None) };
    static PANEL_MOUNT_HANDLE: RefCell<Option<Box<dyn Any>>> = const { RefCell::new(None) };
}

/// The friends button and the floating container the panel is mounted into.
#[derive(Clone)]
struct Popup {
    host: HtmlElement,
    button: Element,
}

impl Popup {
    fn is_open(&self) -> bool {
        self.host
            .style()
            .get_property_value("opacity")
            .is_ok_and(|opacity| opacity == "1")
    }

    fn contains(&self, node: &Node) -> bool {
        self.host.contains(Some(node)) || self.button.contains(Some(node))
    }

    fn open(&self) -> ClientResult<()> {
        let window = web_sys::window().ok_or(ClientError::NoDocument)?;
        let rect = self.button.get_bounding_client_rect();
        let top = rect.bottom() + window.scroll_y()? + 12.0;
        let viewport_height = window.inner_height()?.as_f64().unwrap_or_default();

        let style = self.host.style();
        style.set_property("top", &format!("{top}px"))?;
        style.set_property("right", "3px")?;
        style.set_property("width", &format!("{POPUP_WIDTH_PX}px"))?;
        style.set_property(
            "max-height",
            &format!("{}px", viewport_height - POPUP_VIEWPORT_MARGIN_PX),
        )?;
        style.set_property("opacity", "1")?;
        style.set_property("pointer-events", "auto")?;
        self.button
            .class_list()
            .add_2(ACTIVE_CLASSES[0], ACTIVE_CLASSES[1])?;
        Ok(())
    }

    fn close(&self) -> ClientResult<()> {
        let style = self.host.style();
        style.set_property("opacity", "0")?;
        style.set_property("pointer-events", "none")?;
        self.button
            .class_list()
            .remove_2(ACTIVE_CLASSES[0], ACTIVE_CLASSES[1])?;
        Ok(())
    }

    fn toggle(&self) {
        let result = if self.is_open() { self.close() } else { self.open() };
        if let Err(e) = result {
            tracing::warn!(error = %e, "failed to toggle friends popup");
        }
    }
}

fn create_button(document: &Document) -> ClientResult<Element> {
    let button = document.create_element("a")?;
    button.set_id(BUTTON_ID);
    button.set_class_name(BUTTON_CLASS);
    button.set_inner_html(FRIENDS_ICON);
    button.set_attribute("title", "Friends")?;
    Ok(button)
}

fn create_host(document: &Document) -> ClientResult<HtmlElement> {
    let host: HtmlElement = document
        .create_element("div")?
        .dyn_into()
        .map_err(|_| ClientError::Dom("popup host is not an HTML element".to_string()))?;
    host.set_id(POPUP_HOST_ID);
    host.set_class_name(POPUP_CLASS);
    let style = host.style();
    style.set_property("opacity", "0")?;
    style.set_property("pointer-events", "none")?;
    style.set_property("z-index", "9999")?;
    style.set_property("overflow-y", "auto")?;
    style.set_property("box-shadow", "0 4px 10px rgba(0, 0, 0, 0.4)")?;
    style.set_property("background-color", palette().popup)?;
    document
        .body()
        .ok_or(ClientError::NoDocument)?
        .append_child(&host)?;
    Ok(host)
}

fn bind(document: &Document, popup: Popup) -> ClientResult<PopupBindings> {
    let on_button_click = {
        let popup = popup.clone();
        Closure::<dyn Fn(MouseEvent)>::new(move |_: MouseEvent| popup.toggle())
    };
    popup
        .button
        .add_event_listener_with_callback("click", on_button_click.as_ref().unchecked_ref())?;

    let on_document_click = {
        let popup = popup.clone();
        Closure::<dyn Fn(MouseEvent)>::new(move |event: MouseEvent| {
            if !popup.is_open() {
                return;
            }
            let inside = event
                .target()
                .and_then(|target| target.dyn_into::<Node>().ok())
                .is_some_and(|node| popup.contains(&node));
            if !inside && let Err(e) = popup.close() {
                tracing::warn!(error = %e, "failed to close friends popup");
            }
        })
    };
    document
        .add_event_listener_with_callback("click", on_document_click.as_ref().unchecked_ref())?;

    let on_keydown = {
        let popup = popup.clone();
        Closure::<dyn Fn(KeyboardEvent)>::new(move |event: KeyboardEvent| {
            if event.key() == "Escape"
                && popup.is_open()
                && let Err(e) = popup.close()
            {
                tracing::warn!(error = %e, "failed to close friends popup");
            }
        })
    };
    document.add_event_listener_with_callback("keydown", on_keydown.as_ref().unchecked_ref())?;

    Ok(PopupBindings {
        document: document.clone(),
        button: popup.button,
        on_button_click,
        on_document_click,
        on_keydown,
    })
}

/// Insert the friends button into the site navbar and mount the panel behind it.
///
/// Pages without a known navbar are left alone. Running twice on the same
/// document is a no-op.
pub async fn install() -> ClientResult<()> {
    let window = web_sys::window().ok_or(ClientError::NoDocument)?;
    let document = window.document().ok_or(ClientError::NoDocument)?;
    let href = window.location().href()?;
    let Some(anchor) = config::anchor_for(&href) else {
        tracing::debug!(href, "no navbar anchor for this page");
        return Ok(());
    };

    let container = wait_for_element(anchor.selector, ELEMENT_WAIT_TIMEOUT).await?;
    if document.get_element_by_id(BUTTON_ID).is_some() {
        return Ok(());
    }

    let button = create_button(&document)?;
    let reference = container.children().item(anchor.insert_index);
    container.insert_before(&button, reference.as_deref())?;

    let host = create_host(&document)?;
    let handle = mount_to(host.clone(), FriendsPanel);
    PANEL_MOUNT_HANDLE.with(move |slot| {
        *slot.borrow_mut() = Some(Box::new(handle));
    });

    let bindings = bind(&document, Popup { host, button })?;
    POPUP_BINDINGS.with(move |slot| {
        if let Some(stale) = slot.borrow_mut().replace(bindings) {
            stale.detach();
        }
    });

    tracing::info!(selector = anchor.selector, "friends button installed");
    Ok(())
}
