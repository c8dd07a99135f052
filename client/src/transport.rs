use friends_shared::{ApiError, ApiResult, HttpReply, Transport};
use gloo_net::http::{Request, Response};

/// Browser `fetch` transport rooted at the backend base URL.
#[derive(Debug, Clone)]
pub struct GlooTransport {
    base_url: String,
}

impl GlooTransport {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }
}

async fn into_reply(resp: Response) -> ApiResult<HttpReply> {
    let status = resp.status();
    let body = resp
        .text()
        .await
        .map_err(|e| ApiError::Decode(e.to_string()))?;
    Ok(HttpReply::new(status, body))
}

impl Transport for GlooTransport {
    async fn get(&self, path: &str) -> ApiResult<HttpReply> {
        let resp = Request::get(&self.url(path))
            .send()
            .await
            .map_err(|e| ApiError::Network(e.to_string()))?;
        into_reply(resp).await
    }

    async fn post_json(&self, path: &str, body: String) -> ApiResult<HttpReply> {
        let resp = Request::post(&self.url(path))
            .header("Content-Type", "application/json")
            .body(body)
            .map_err(|e| ApiError::Network(e.to_string()))?
            .send()
            .await
            .map_err(|e| ApiError::Network(e.to_string()))?;
        into_reply(resp).await
    }
}
