use std::sync::Arc;

use axum::Json;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::middleware::base_url::BaseUrl;

/// Points from a response to a related resource of the api.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct Link {
    #[serde(rename = "rel")]
    pub relation: String,
    #[serde(rename = "href")]
    pub target: String,
}

/// `content` extended by the links a client can follow from it.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct Response<T> {
    #[serde(flatten)]
    pub content: T,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub links: Vec<Link>,
}

impl<T> Response<T> {
    pub fn new(content: T) -> Self {
        Self {
            content,
            links: Vec::new(),
        }
    }

    pub fn builder(content: T, base_url: Arc<BaseUrl>) -> Linker<T> {
        Linker {
            response: Self::new(content),
            base_url,
        }
    }

    pub fn link(&self, relation: &str) -> Option<&Link> {
        self.links.iter().find(|link| link.relation == relation)
    }

    pub fn json(self) -> Json<Self> {
        Json(self)
    }
}

/// Collects the links of a `Response`, resolving paths against the base url
/// the request came in on.
pub struct Linker<T> {
    response: Response<T>,
    base_url: Arc<BaseUrl>,
}

impl<T> Linker<T> {
    pub fn link<R, P>(mut self, relation: R, path: P) -> Self
    where
        R: Into<String>,
        P: Into<String>,
    {
        self.response.links.push(Link {
            relation: relation.into(),
            target: self.base_url.full_url(path),
        });
        self
    }

    pub fn build(self) -> Response<T> {
        self.response
    }
}
