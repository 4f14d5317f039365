use std::sync::Arc;

use axum::{extract::Request, http::HeaderMap, middleware::Next, response::IntoResponse};

/// Scheme, host and path prefix under which a client reached the api.
/// Reverse proxies announce them with the `x-forwarded-*` headers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BaseUrl {
    scheme: String,
    host: String,
    prefix: String,
}

fn header<'a>(headers: &'a HeaderMap, name: &str) -> Option<&'a str> {
    headers
        .get(name)
        .and_then(|value| value.to_str().ok())
        .map(str::trim)
        .filter(|value| !value.is_empty())
}

impl BaseUrl {
    pub fn from_headers(headers: &HeaderMap) -> Self {
        let scheme = header(headers, "x-forwarded-proto").unwrap_or("http");
        let host = header(headers, "x-forwarded-host")
            .or_else(|| header(headers, "host"))
            .unwrap_or("localhost");
        let prefix = header(headers, "x-forwarded-prefix")
            .unwrap_or("")
            .trim_end_matches('/');

        Self {
            scheme: scheme.to_owned(),
            host: host.to_owned(),
            prefix: prefix.to_owned(),
        }
    }

    /// `path` is expected to start with a slash.
    pub fn full_url<S: Into<String>>(&self, path: S) -> String {
        format!("{}://{}{}{}", self.scheme, self.host, self.prefix, path.into())
    }
}

/// Makes the `BaseUrl` of the request available as `Extension<Arc<BaseUrl>>`.
pub async fn base_url_middleware(mut req: Request, next: Next) -> impl IntoResponse {
    let base_url = BaseUrl::from_headers(req.headers());
    req.extensions_mut().insert(Arc::new(base_url));
    next.run(req).await
}
