use thiserror::Error;
use wasm_bindgen::JsValue;

#[derive(Debug, Error)]
pub enum ClientError {
    #[error("no window or document available")]
    NoDocument,
    #[error("element `{0}` not found before timeout")]
    ElementNotFound(String),
    #[error("no username received from the page before timeout")]
    IdentityTimeout,
    #[error("DOM error: {0}")]
    Dom(String),
}

impl From<JsValue> for ClientError {
    fn from(value: JsValue) -> Self {
        Self::Dom(
            value
                .as_string()
                .unwrap_or_else(|| format!("{value:?}")),
        )
    }
}

pub type ClientResult<T> = Result<T, ClientError>;
