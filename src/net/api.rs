//! REST client for the storefront backend.
//!
//! Auth endpoints sit behind the [`AuthBackend`] trait so the session cache
//! and the auth flows can be driven by fakes in tests. Catalog and user
//! administration calls are inherent methods on [`ApiClient`].
//!
//! ERROR HANDLING
//! ==============
//! Non-2xx responses become [`ApiError::Status`] carrying the backend's
//! `message` (a string, or the first entries of a validation array). Every
//! request carries the browser's cookies: the backend keeps the session in
//! HttpOnly cookies and refreshes tokens itself.

use reqwest::{Method, RequestBuilder, Response};
use serde::Serialize;
use serde::de::DeserializeOwned;

use super::types::{
    ApiListResponse, ApiResponse, LoginRequest, OtpRequest, OtpVerification, PageParams, Product, ProductCreate,
    ProductUpdate, RegisterRequest, ResetPasswordRequest, User, UserCreate, UserDto, UserUpdate,
};
use crate::config::ClientConfig;
use crate::error::ApiError;

// =============================================================================
// AUTH BACKEND TRAIT
// =============================================================================

/// Auth endpoints consumed by the session cache and the auth flows.
///
/// Futures are not required to be `Send`: browser fetch futures are not.
#[async_trait::async_trait(?Send)]
pub trait AuthBackend {
    /// `GET /auth/me`. Returns the raw envelope; callers apply the status check.
    async fn me(&self) -> Result<ApiResponse<UserDto>, ApiError>;

    /// `POST /auth/login`. The backend answers with Set-Cookie.
    async fn login(&self, request: &LoginRequest) -> Result<(), ApiError>;

    /// `POST /auth/logout`. The backend clears its HttpOnly cookies.
    async fn logout(&self) -> Result<(), ApiError>;

    async fn register(&self, request: &RegisterRequest) -> Result<(), ApiError>;

    async fn request_password_reset(&self, email: &str) -> Result<(), ApiError>;

    async fn validate_reset_token(&self, reset_token: &str) -> Result<(), ApiError>;

    async fn reset_password(&self, request: &ResetPasswordRequest) -> Result<(), ApiError>;

    async fn verify_otp(&self, request: &OtpRequest) -> Result<ApiResponse<OtpVerification>, ApiError>;
}

// =============================================================================
// CLIENT
// =============================================================================

pub struct ApiClient {
    http: reqwest::Client,
    config: ClientConfig,
}

impl ApiClient {
    /// Build a client for `config.api_url`.
    ///
    /// Native builds keep a cookie jar so the session survives between
    /// calls the way it does in the browser.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::ClientBuild`] if the HTTP client cannot be built.
    pub fn new(config: ClientConfig) -> Result<Self, ApiError> {
        let builder = reqwest::Client::builder();
        #[cfg(not(target_arch = "wasm32"))]
        let builder = builder
            .cookie_store(true)
            .timeout(std::time::Duration::from_secs(config.request_timeout_secs))
            .connect_timeout(std::time::Duration::from_secs(config.connect_timeout_secs));
        let http = builder.build().map_err(|e| ApiError::ClientBuild(e.to_string()))?;
        Ok(Self { http, config })
    }

    #[must_use]
    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    fn request(&self, method: Method, path: &str) -> RequestBuilder {
        let builder = self.http.request(method, self.config.endpoint(path));
        #[cfg(target_arch = "wasm32")]
        let builder = builder.fetch_credentials_include();
        builder
    }

    async fn send(&self, builder: RequestBuilder) -> Result<Response, ApiError> {
        let resp = builder.send().await?;
        let status = resp.status();
        if status.is_success() {
            return Ok(resp);
        }
        let body = resp.text().await.unwrap_or_default();
        tracing::debug!(status = status.as_u16(), "api request rejected");
        Err(ApiError::Status { status: status.as_u16(), message: backend_message(&body) })
    }

    async fn send_json<T: DeserializeOwned>(&self, builder: RequestBuilder) -> Result<T, ApiError> {
        let resp = self.send(builder).await?;
        let text = resp.text().await?;
        Ok(serde_json::from_str(&text)?)
    }

    async fn send_empty(&self, builder: RequestBuilder) -> Result<(), ApiError> {
        self.send(builder).await.map(drop)
    }

    async fn post_empty<B: Serialize + ?Sized>(&self, path: &str, body: &B) -> Result<(), ApiError> {
        self.send_empty(self.request(Method::POST, path).json(body)).await
    }

    // -------------------------------------------------------------------------
    // Products
    // -------------------------------------------------------------------------

    /// `GET /products?limit=L&page=P`
    ///
    /// # Errors
    ///
    /// Returns an [`ApiError`] on transport failure, non-2xx status, or a
    /// body that is not a product list envelope.
    pub async fn list_products(&self, params: PageParams) -> Result<ApiListResponse<Product>, ApiError> {
        self.send_json(self.request(Method::GET, &paged_path("products", params)))
            .await
    }

    /// `GET /products/{id}`
    ///
    /// # Errors
    ///
    /// See [`ApiClient::list_products`].
    pub async fn get_product(&self, id: &str) -> Result<ApiResponse<Product>, ApiError> {
        self.send_json(self.request(Method::GET, &resource_path("products", id, None)))
            .await
    }

    /// `POST /products`
    ///
    /// # Errors
    ///
    /// See [`ApiClient::list_products`].
    pub async fn create_product(&self, product: &ProductCreate) -> Result<ApiResponse<Product>, ApiError> {
        self.send_json(self.request(Method::POST, "products").json(product))
            .await
    }

    /// `PUT /products/{id}`
    ///
    /// # Errors
    ///
    /// See [`ApiClient::list_products`].
    pub async fn update_product(&self, id: &str, product: &ProductUpdate) -> Result<ApiResponse<Product>, ApiError> {
        self.send_json(
            self.request(Method::PUT, &resource_path("products", id, None))
                .json(product),
        )
        .await
    }

    /// `DELETE /products/{id}`
    ///
    /// # Errors
    ///
    /// See [`ApiClient::list_products`].
    pub async fn delete_product(&self, id: &str) -> Result<(), ApiError> {
        self.send_empty(self.request(Method::DELETE, &resource_path("products", id, None)))
            .await
    }

    // -------------------------------------------------------------------------
    // Users
    // -------------------------------------------------------------------------

    /// `GET /users?limit=L&page=P`
    ///
    /// # Errors
    ///
    /// See [`ApiClient::list_products`].
    pub async fn list_users(&self, params: PageParams) -> Result<ApiListResponse<User>, ApiError> {
        self.send_json(self.request(Method::GET, &paged_path("users", params)))
            .await
    }

    /// `GET /users/{id}`
    ///
    /// # Errors
    ///
    /// See [`ApiClient::list_products`].
    pub async fn get_user(&self, id: &str) -> Result<ApiResponse<User>, ApiError> {
        self.send_json(self.request(Method::GET, &resource_path("users", id, None)))
            .await
    }

    /// `POST /users`
    ///
    /// # Errors
    ///
    /// See [`ApiClient::list_products`].
    pub async fn create_user(&self, user: &UserCreate) -> Result<ApiResponse<User>, ApiError> {
        self.send_json(self.request(Method::POST, "users").json(user)).await
    }

    /// `PUT /users/{id}`
    ///
    /// # Errors
    ///
    /// See [`ApiClient::list_products`].
    pub async fn update_user(&self, id: &str, user: &UserUpdate) -> Result<ApiResponse<User>, ApiError> {
        self.send_json(self.request(Method::PUT, &resource_path("users", id, None)).json(user))
            .await
    }

    /// `DELETE /users/{id}`, a soft delete; see [`ApiClient::restore_user`].
    ///
    /// # Errors
    ///
    /// See [`ApiClient::list_products`].
    pub async fn delete_user(&self, id: &str) -> Result<(), ApiError> {
        self.send_empty(self.request(Method::DELETE, &resource_path("users", id, None)))
            .await
    }

    /// `DELETE /users/{id}/permanent`
    ///
    /// # Errors
    ///
    /// See [`ApiClient::list_products`].
    pub async fn delete_user_permanent(&self, id: &str) -> Result<(), ApiError> {
        self.send_empty(self.request(Method::DELETE, &resource_path("users", id, Some("permanent"))))
            .await
    }

    /// `PUT /users/{id}/restore`
    ///
    /// # Errors
    ///
    /// See [`ApiClient::list_products`].
    pub async fn restore_user(&self, id: &str) -> Result<ApiResponse<User>, ApiError> {
        self.user_action(id, "restore").await
    }

    /// `PUT /users/{id}/revoke-access`
    ///
    /// # Errors
    ///
    /// See [`ApiClient::list_products`].
    pub async fn revoke_access(&self, id: &str) -> Result<ApiResponse<User>, ApiError> {
        self.user_action(id, "revoke-access").await
    }

    /// `PUT /users/{id}/blacklist`
    ///
    /// # Errors
    ///
    /// See [`ApiClient::list_products`].
    pub async fn blacklist_user(&self, id: &str) -> Result<ApiResponse<User>, ApiError> {
        self.user_action(id, "blacklist").await
    }

    async fn user_action(&self, id: &str, action: &str) -> Result<ApiResponse<User>, ApiError> {
        let builder = self
            .request(Method::PUT, &resource_path("users", id, Some(action)))
            .json(&serde_json::json!({}));
        self.send_json(builder).await
    }
}

#[async_trait::async_trait(?Send)]
impl AuthBackend for ApiClient {
    async fn me(&self) -> Result<ApiResponse<UserDto>, ApiError> {
        self.send_json(self.request(Method::GET, "auth/me")).await
    }

    async fn login(&self, request: &LoginRequest) -> Result<(), ApiError> {
        self.post_empty("auth/login", request).await
    }

    async fn logout(&self) -> Result<(), ApiError> {
        self.post_empty("auth/logout", &serde_json::json!({})).await
    }

    async fn register(&self, request: &RegisterRequest) -> Result<(), ApiError> {
        self.post_empty("auth/register", request).await
    }

    async fn request_password_reset(&self, email: &str) -> Result<(), ApiError> {
        self.post_empty("auth/request-password-reset", &serde_json::json!({ "email": email }))
            .await
    }

    async fn validate_reset_token(&self, reset_token: &str) -> Result<(), ApiError> {
        self.post_empty("auth/validate-reset-token", &serde_json::json!({ "resetToken": reset_token }))
            .await
    }

    async fn reset_password(&self, request: &ResetPasswordRequest) -> Result<(), ApiError> {
        self.post_empty("auth/reset-password", request).await
    }

    async fn verify_otp(&self, request: &OtpRequest) -> Result<ApiResponse<OtpVerification>, ApiError> {
        self.send_json(self.request(Method::POST, "auth/verify-otp").json(request))
            .await
    }
}

// =============================================================================
// HELPERS
// =============================================================================

fn paged_path(collection: &str, params: PageParams) -> String {
    format!("{collection}?{}", params.query())
}

fn resource_path(collection: &str, id: &str, action: Option<&str>) -> String {
    let id = urlencoding::encode(id);
    match action {
        Some(action) => format!("{collection}/{id}/{action}"),
        None => format!("{collection}/{id}"),
    }
}

/// Extract the human-readable `message` from an error body.
///
/// Validation failures send `message` as an array of strings; those are
/// joined with `; `.
fn backend_message(body: &str) -> Option<String> {
    let value: serde_json::Value = serde_json::from_str(body).ok()?;
    match value.get("message")? {
        serde_json::Value::String(s) if !s.trim().is_empty() => Some(s.clone()),
        serde_json::Value::Array(items) => {
            let parts: Vec<&str> = items.iter().filter_map(serde_json::Value::as_str).collect();
            (!parts.is_empty()).then(|| parts.join("; "))
        }
        _ => None,
    }
}

#[cfg(test)]
#[path = "api_test.rs"]
mod api_test;
