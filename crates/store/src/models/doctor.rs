//! Doctor record and registration DTO.

use medvision_core::types::{EntityId, Timestamp};
use serde::{Deserialize, Serialize};
use validator::Validate;

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Doctor {
    pub id: EntityId,
    pub name: String,
    pub specialty: String,
    /// Years of practice.
    pub experience: i32,
    pub rating: f64,
    pub avatar: Option<String>,
    pub bio: Option<String>,
    /// In cents.
    pub hourly_rate: i64,
    pub availability: Option<serde_json::Value>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub is_active: bool,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// `POST /api/register-doctor` body. `hourlyRate` is in whole currency units.
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct RegisterDoctor {
    #[serde(default)]
    #[validate(length(min = 1, message = "name is required"))]
    pub name: String,
    #[serde(default)]
    #[validate(email(message = "email must be a valid address"))]
    pub email: String,
    #[serde(default)]
    #[validate(length(min = 1, message = "phone is required"))]
    pub phone: String,
    #[serde(default)]
    #[validate(length(min = 1, message = "specialty is required"))]
    pub specialty: String,
    pub experience: Option<i32>,
    pub bio: Option<String>,
    pub hourly_rate: Option<i64>,
    pub avatar: Option<String>,
}

/// Fully resolved insert, after defaults are applied.
#[derive(Debug, Clone)]
pub struct NewDoctor {
    pub name: String,
    pub specialty: String,
    pub experience: i32,
    pub rating: f64,
    pub avatar: Option<String>,
    pub bio: Option<String>,
    pub hourly_rate: i64,
    pub email: Option<String>,
    pub phone: Option<String>,
}
