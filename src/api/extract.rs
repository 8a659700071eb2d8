//! Request body extraction
//!
//! Contact bodies may arrive as JSON or as an urlencoded form. Any rejection
//! becomes a `400` with a JSON error body.

use axum::{
    async_trait,
    extract::{FromRequest, Request},
    http::{header::CONTENT_TYPE, HeaderValue},
    Form, Json,
};
use serde::de::DeserializeOwned;

use crate::error::ContactError;

/// Body extractor accepting `application/json` or
/// `application/x-www-form-urlencoded`.
#[derive(Debug, Clone)]
pub struct ContactPayload<T>(pub T);

const FORM_CONTENT_TYPE: &str = "application/x-www-form-urlencoded";

/// Matches the media type without parameters, ignoring case.
fn is_form(req: &Request) -> bool {
    req.headers()
        .get(CONTENT_TYPE)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.split(';').next())
        .is_some_and(|essence| essence.trim().eq_ignore_ascii_case(FORM_CONTENT_TYPE))
}

#[async_trait]
impl<S, T> FromRequest<S> for ContactPayload<T>
where
    S: Send + Sync,
    T: DeserializeOwned + Send,
{
    type Rejection = ContactError;

    async fn from_request(mut req: Request, state: &S) -> Result<Self, Self::Rejection> {
        if is_form(&req) {
            // `Form` only recognises the lowercase media type
            req.headers_mut()
                .insert(CONTENT_TYPE, HeaderValue::from_static(FORM_CONTENT_TYPE));
            let Form(value) = Form::<T>::from_request(req, state)
                .await
                .map_err(|rejection| {
                    ContactError::InvalidRequest(format!(
                        "error parsing request: {}",
                        rejection.body_text()
                    ))
                })?;
            Ok(Self(value))
        } else {
            let Json(value) = Json::<T>::from_request(req, state)
                .await
                .map_err(|rejection| {
                    ContactError::InvalidRequest(format!(
                        "error parsing request: {}",
                        rejection.body_text()
                    ))
                })?;
            Ok(Self(value))
        }
    }
}
