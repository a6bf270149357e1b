//! Request body extraction shared by the public endpoints.
//!
//! Bodies are accepted either as JSON or as `application/x-www-form-urlencoded`
//! fields, chosen by the request's `Content-Type`.

use axum::{
    Form, Json,
    extract::{
        FromRequest, Request,
        rejection::{FormRejection, JsonRejection},
    },
    http::header,
    response::{IntoResponse, Response},
};
use serde::de::DeserializeOwned;

const FORM_CONTENT_TYPE: &str = "application/x-www-form-urlencoded";

/// A request body decoded from JSON or form fields.
pub struct Payload<T>(pub T);

/// Why a body could not be decoded.
#[derive(Debug)]
pub enum PayloadRejection {
    Json(JsonRejection),
    Form(FormRejection),
}

impl PayloadRejection {
    pub fn body_text(&self) -> String {
        match self {
            PayloadRejection::Json(rejection) => rejection.body_text(),
            PayloadRejection::Form(rejection) => rejection.body_text(),
        }
    }
}

impl IntoResponse for PayloadRejection {
    fn into_response(self) -> Response {
        match self {
            PayloadRejection::Json(rejection) => rejection.into_response(),
            PayloadRejection::Form(rejection) => rejection.into_response(),
        }
    }
}

fn is_form(req: &Request) -> bool {
    req.headers()
        .get(header::CONTENT_TYPE)
        .and_then(|value| value.to_str().ok())
        .is_some_and(|content_type| content_type.to_ascii_lowercase().starts_with(FORM_CONTENT_TYPE))
}

impl<T, S> FromRequest<S> for Payload<T>
where
    T: DeserializeOwned + Send,
    S: Send + Sync,
{
    type Rejection = PayloadRejection;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        if is_form(&req) {
            let Form(value) = Form::<T>::from_request(req, state)
                .await
                .map_err(PayloadRejection::Form)?;
            Ok(Payload(value))
        } else {
            let Json(value) = Json::<T>::from_request(req, state)
                .await
                .map_err(PayloadRejection::Json)?;
            Ok(Payload(value))
        }
    }
}
