//! Wire DTOs for the storefront REST API.
//!
//! DESIGN
//! ======
//! The backend speaks camelCase JSON wrapped in a `{statusCode, message,
//! timestamp, data}` envelope. Response types keep that envelope visible so
//! callers (the session cache in particular) can apply the `statusCode`
//! check themselves. Request bodies omit unset optional fields instead of
//! sending `null`, which the update endpoints would treat as a clear.

#[cfg(test)]
#[path = "types_test.rs"]
mod types_test;

use std::fmt;

use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

// =============================================================================
// ENVELOPES
// =============================================================================

/// Single-resource response envelope.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiResponse<T> {
    pub status_code: u16,
    #[serde(default)]
    pub message: String,
    pub timestamp: Option<String>,
    pub data: Option<T>,
}

impl<T> ApiResponse<T> {
    /// The payload, only when the envelope reports success.
    pub fn into_ok_data(self) -> Option<T> {
        if self.status_code == 200 { self.data } else { None }
    }
}

/// Paged collection response envelope.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiListResponse<T> {
    pub status_code: u16,
    #[serde(default)]
    pub message: String,
    pub timestamp: Option<String>,
    pub data: ListPage<T>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ListPage<T> {
    pub data: Vec<T>,
    pub meta: Pagination,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Pagination {
    pub page: u32,
    pub limit: u32,
    pub total: u64,
    pub total_pages: u32,
    pub has_next_page: bool,
    pub has_prev_page: bool,
}

/// Query parameters for paged list endpoints.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PageParams {
    pub page: u32,
    pub limit: u32,
}

impl Default for PageParams {
    fn default() -> Self {
        Self { page: 1, limit: 10 }
    }
}

impl PageParams {
    /// Query string in the order the backend documents: `limit=L&page=P`.
    /// Zero values are replaced by the defaults.
    #[must_use]
    pub fn query(&self) -> String {
        let defaults = Self::default();
        let limit = if self.limit == 0 { defaults.limit } else { self.limit };
        let page = if self.page == 0 { defaults.page } else { self.page };
        format!("limit={limit}&page={page}")
    }
}

// =============================================================================
// USERS
// =============================================================================

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Admin,
    #[default]
    User,
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Admin => "admin",
            Self::User => "user",
        })
    }
}

/// A user account as the application sees it.
///
/// This is also the identity snapshot the session cache hands out.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: String,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: Option<String>,
    pub email_verified: bool,
    pub phone_verified: bool,
    pub role: Role,
    pub is_active: bool,
    pub avatar: Option<String>,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
    #[serde(with = "time::serde::rfc3339")]
    pub updated_at: OffsetDateTime,
    #[serde(default, with = "time::serde::rfc3339::option")]
    pub deleted_at: Option<OffsetDateTime>,
}

impl User {
    #[must_use]
    pub fn is_admin(&self) -> bool {
        self.role == Role::Admin
    }

    #[must_use]
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name).trim().to_owned()
    }
}

/// User record returned by `GET /auth/me`.
///
/// The backend also sends `passwordHash`; it is deliberately not declared
/// here so it is dropped during deserialization.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserDto {
    pub id: String,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub email_verified: bool,
    pub phone: Option<String>,
    pub phone_verified: bool,
    pub avatar: Option<String>,
    pub is_active: bool,
    pub role: Role,
    pub provider: Option<String>,
    pub provider_id: Option<String>,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
    #[serde(with = "time::serde::rfc3339")]
    pub updated_at: OffsetDateTime,
    #[serde(default, with = "time::serde::rfc3339::option")]
    pub last_active_at: Option<OffsetDateTime>,
}

impl From<UserDto> for User {
    fn from(dto: UserDto) -> Self {
        Self {
            id: dto.id,
            first_name: dto.first_name,
            last_name: dto.last_name,
            email: dto.email,
            phone: dto.phone.filter(|p| !p.is_empty()),
            email_verified: dto.email_verified,
            phone_verified: dto.phone_verified,
            role: dto.role,
            is_active: dto.is_active,
            avatar: dto.avatar.filter(|a| !a.is_empty()),
            created_at: dto.created_at,
            updated_at: dto.updated_at,
            deleted_at: None,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserCreate {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    pub password: String,
    pub role: Role,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub avatar: Option<String>,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub first_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email_verified: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone_verified: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub role: Option<Role>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_active: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub avatar: Option<String>,
}

// =============================================================================
// PRODUCTS
// =============================================================================

/// A vehicle listing.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub id: String,
    pub model: String,
    pub power: String,
    pub gearbox: String,
    pub price: f64,
    pub new_price: Option<f64>,
    pub range: String,
    pub autonomy: Option<String>,
    pub image: String,
    pub quantity: u32,
    pub is_active: bool,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
}

impl Product {
    /// Discounted price when one is set below the list price.
    #[must_use]
    pub fn sale_price(&self) -> Option<f64> {
        self.new_price.filter(|p| *p < self.price)
    }
}

#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductCreate {
    pub model: String,
    pub power: String,
    pub gearbox: String,
    pub price: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub new_price: Option<f64>,
    pub range: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub autonomy: Option<String>,
    pub image: String,
    pub quantity: u32,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub model: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub power: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub gearbox: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub price: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub new_price: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub range: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub autonomy: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub quantity: Option<u32>,
}

// =============================================================================
// AUTH REQUESTS
// =============================================================================

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
    pub remember_me: bool,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterRequest {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub password: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ResetPasswordRequest {
    pub reset_token: String,
    pub password: String,
    pub confirm_password: String,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct OtpRequest {
    pub email: String,
    pub otp: String,
}

/// Payload of a successful `POST /auth/verify-otp`.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OtpVerification {
    #[serde(default)]
    pub message: String,
    pub success: bool,
    pub reset_token: String,
    pub expires_at: String,
}
