use axum::{
    extract::{OriginalUri, Query, Request},
    http::{Method, StatusCode},
    response::IntoResponse,
    routing::MethodFilter,
    Json,
};
use model::ExampleData;
use schemars::{schema_for, schema_for_value, JsonSchema};
use serde::{Deserialize, Serialize, Serializer};
use transit::RequestError;

use crate::hateoas;

pub type RouteResult<O> = Result<O, RouteErrorResponse>;
pub type HateoasResult<O> = RouteResult<Json<hateoas::Response<O>>>;

/// Matches every method a route of this api can be called with.
pub(crate) const METHOD_FILTER_ALL: MethodFilter = MethodFilter::GET
    .or(MethodFilter::POST)
    .or(MethodFilter::PATCH)
    .or(MethodFilter::PUT)
    .or(MethodFilter::DELETE);

/// A collection together with its size.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct VecResponse<T> {
    pub count: usize,
    pub data: Vec<T>,
}

impl<T> VecResponse<T> {
    pub fn new(data: Vec<T>) -> Self {
        Self {
            count: data.len(),
            data,
        }
    }

    pub fn hateoas(self) -> hateoas::Response<Self> {
        hateoas::Response::new(self)
    }

    pub fn json(self) -> Json<Self> {
        Json(self)
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct SchemaParams {
    #[serde(default)]
    example_data: bool,
}

/// Json schema of `T`, or the schema of its example value with
/// `?exampleData=true`.
pub(crate) async fn schema<T: ExampleData + JsonSchema + Serialize>(
    Query(params): Query<SchemaParams>,
) -> impl IntoResponse {
    if params.example_data {
        Json(schema_for_value!(T::example_data()))
    } else {
        Json(schema_for!(T))
    }
}

pub(crate) async fn route_not_found(original_uri: OriginalUri, req: Request) -> impl IntoResponse {
    RouteErrorResponse::new(StatusCode::NOT_FOUND).at(req.method(), &original_uri)
}

fn serialize_status<S: Serializer>(status: &StatusCode, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_u16(status.as_u16())
}

/// Error body of every failed request.
#[serde_with::skip_serializing_none]
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RouteErrorResponse {
    #[serde(rename = "status", serialize_with = "serialize_status")]
    pub status_code: StatusCode,
    pub http_method: Option<String>,
    pub requested_uri: Option<String>,
    pub message: String,
}

impl RouteErrorResponse {
    /// Carries the canonical reason of `status_code` as message.
    pub fn new(status_code: StatusCode) -> Self {
        Self {
            status_code,
            http_method: None,
            requested_uri: None,
            message: status_code
                .canonical_reason()
                .unwrap_or("request failed")
                .to_owned(),
        }
    }

    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = message.into();
        self
    }

    /// Names the request that failed.
    pub fn at(mut self, method: &Method, original_uri: &OriginalUri) -> Self {
        self.http_method = Some(method.to_string());
        self.requested_uri = Some(original_uri.0.path().to_owned());
        self
    }
}

impl From<RequestError> for RouteErrorResponse {
    fn from(why: RequestError) -> Self {
        let status_code = match &why {
            RequestError::NotFound => {
                return Self::new(StatusCode::NOT_FOUND).with_message("not found")
            }
            RequestError::UnknownLine(_) | RequestError::Invalid(_) | RequestError::IdMissing => {
                StatusCode::BAD_REQUEST
            }
            RequestError::LineInUse => StatusCode::CONFLICT,
            RequestError::Other(other) => {
                log::error!("request failed: {}", other);
                return Self::new(StatusCode::INTERNAL_SERVER_ERROR);
            }
        };
        Self::new(status_code).with_message(why.to_string())
    }
}

impl IntoResponse for RouteErrorResponse {
    fn into_response(self) -> axum::response::Response {
        (self.status_code, Json(self)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn maps_request_errors_to_status() {
        let status = |why: RequestError| RouteErrorResponse::from(why).status_code;
        assert_eq!(status(RequestError::NotFound), StatusCode::NOT_FOUND);
        assert_eq!(
            status(RequestError::UnknownLine("7".to_owned())),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(status(RequestError::LineInUse), StatusCode::CONFLICT);
        assert_eq!(
            status(RequestError::other(std::fmt::Error)),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn error_body() {
        let response = RouteErrorResponse::from(RequestError::NotFound)
            .at(&Method::GET, &OriginalUri("/api/v1/stations/99".parse().unwrap()));
        assert_eq!(
            serde_json::to_value(response).unwrap(),
            json!({
                "status": 404,
                "httpMethod": "GET",
                "requestedUri": "/api/v1/stations/99",
                "message": "not found"
            })
        );
    }
}
