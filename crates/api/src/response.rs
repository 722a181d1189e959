//! Shared response envelope.
//!
//! Most endpoints answer `{ "success": true, ...fields }`. Handlers build a
//! typed payload struct and wrap it in [`Success`] instead of writing
//! ad-hoc `json!` objects.

use serde::Serialize;

/// `{ "success": true }` merged with the fields of `T`.
///
/// # Example
///
/// ```ignore
/// Ok(Json(Success::new(MessagePayload { message })))
/// ```
#[derive(Debug, Serialize)]
pub struct Success<T: Serialize> {
    pub success: bool,
    #[serde(flatten)]
    pub body: T,
}

impl<T: Serialize> Success<T> {
    pub fn new(body: T) -> Self {
        Self {
            success: true,
            body,
        }
    }
}
