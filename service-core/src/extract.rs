//! Lenient JSON body extractor.
//!
//! axum's `Json` rejects absent or malformed bodies with a plain-text 4xx
//! before the handler runs. The services instead report such requests as a
//! missing field, so this extractor only yields the top-level object (if any)
//! and leaves field checks to the handler.

use crate::error::AppError;
use axum::async_trait;
use axum::body::Bytes;
use axum::extract::{FromRequest, Request};
use serde_json::{Map, Value};

#[derive(Debug, Clone, Default)]
pub struct JsonObject(pub Option<Map<String, Value>>);

impl JsonObject {
    /// Parse a raw body. Anything that is not a JSON object counts as absent.
    pub fn from_bytes(bytes: &[u8]) -> Self {
        if bytes.iter().all(u8::is_ascii_whitespace) {
            return JsonObject(None);
        }

        match serde_json::from_slice::<Value>(bytes) {
            Ok(Value::Object(map)) => JsonObject(Some(map)),
            Ok(_) => JsonObject(None),
            Err(e) => {
                tracing::debug!(error = %e, "Request body is not valid JSON");
                JsonObject(None)
            }
        }
    }

    /// The raw value of `field`, if the body had one.
    pub fn get(&self, field: &str) -> Option<&Value> {
        self.0.as_ref().and_then(|map| map.get(field))
    }

    /// The string value of `field`.
    ///
    /// A missing body, missing field or JSON `null` is reported as the
    /// missing-field error; any other non-string value is a type error.
    pub fn required_str(&self, field: &str) -> Result<&str, AppError> {
        match self.get(field) {
            None | Some(Value::Null) => Err(AppError::missing_field(field)),
            Some(Value::String(s)) => Ok(s.as_str()),
            Some(_) => Err(AppError::bad_request(format!(
                "'{}' must be a string",
                field
            ))),
        }
    }
}

#[async_trait]
impl<S> FromRequest<S> for JsonObject
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let bytes = Bytes::from_request(req, state)
            .await
            .map_err(|e| AppError::bad_request(e.body_text()))?;

        Ok(JsonObject::from_bytes(&bytes))
    }
}
