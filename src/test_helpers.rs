//! Scripted fakes shared by unit tests.

use std::cell::{Cell, RefCell};
use std::collections::VecDeque;

use time::OffsetDateTime;

use crate::error::ApiError;
use crate::net::api::AuthBackend;
use crate::net::types::{
    ApiResponse, LoginRequest, OtpRequest, OtpVerification, RegisterRequest, ResetPasswordRequest, Role, UserDto,
};
use crate::routing::navigate::{NavTarget, Navigator};

/// What one `GET /auth/me` call answers.
#[derive(Clone, Copy, Debug)]
pub enum MeOutcome {
    Signed(Role),
    Unauthorized,
    NetworkError,
}

/// Fake auth backend.
///
/// `me()` pops scripted outcomes; the last one repeats forever. Every call
/// yields once before answering so concurrent readers overlap.
pub struct FakeBackend {
    me_script: RefCell<VecDeque<MeOutcome>>,
    pub me_calls: Cell<usize>,
    /// While set, `me()` waits for `release_me` before answering.
    pub hold_me: Cell<bool>,
    pub release_me: tokio::sync::Notify,
    pub calls: RefCell<Vec<String>>,
    pub fail_logout: Cell<bool>,
    pub fail_login: Cell<bool>,
    pub fail_reset_request: Cell<bool>,
    pub last_register: RefCell<Option<RegisterRequest>>,
    pub last_login: RefCell<Option<LoginRequest>>,
}

impl FakeBackend {
    pub fn new(script: &[MeOutcome]) -> Self {
        Self {
            me_script: RefCell::new(script.iter().copied().collect()),
            me_calls: Cell::new(0),
            hold_me: Cell::new(false),
            release_me: tokio::sync::Notify::new(),
            calls: RefCell::new(Vec::new()),
            fail_logout: Cell::new(false),
            fail_login: Cell::new(false),
            fail_reset_request: Cell::new(false),
            last_register: RefCell::new(None),
            last_login: RefCell::new(None),
        }
    }

    pub fn signed_in(role: Role) -> Self {
        Self::new(&[MeOutcome::Signed(role)])
    }

    pub fn signed_out() -> Self {
        Self::new(&[MeOutcome::Unauthorized])
    }

    fn next_me(&self) -> MeOutcome {
        let mut script = self.me_script.borrow_mut();
        if script.len() > 1 {
            script.pop_front().unwrap_or(MeOutcome::Unauthorized)
        } else {
            script.front().copied().unwrap_or(MeOutcome::Unauthorized)
        }
    }

    fn record(&self, call: &str) {
        self.calls.borrow_mut().push(call.to_owned());
    }

    pub fn called(&self, call: &str) -> bool {
        self.calls.borrow().iter().any(|c| c == call)
    }
}

pub fn dummy_user_dto(role: Role) -> UserDto {
    UserDto {
        id: format!("{role}-1"),
        first_name: "Test".into(),
        last_name: "User".into(),
        email: format!("{role}@example.com"),
        email_verified: true,
        phone: None,
        phone_verified: false,
        avatar: None,
        is_active: true,
        role,
        provider: None,
        provider_id: None,
        created_at: OffsetDateTime::UNIX_EPOCH,
        updated_at: OffsetDateTime::UNIX_EPOCH,
        last_active_at: None,
    }
}

fn ok<T>(data: Option<T>) -> ApiResponse<T> {
    ApiResponse { status_code: 200, message: "OK".into(), timestamp: None, data }
}

#[async_trait::async_trait(?Send)]
impl AuthBackend for FakeBackend {
    async fn me(&self) -> Result<ApiResponse<UserDto>, ApiError> {
        self.me_calls.set(self.me_calls.get() + 1);
        let outcome = self.next_me();
        if self.hold_me.get() {
            self.release_me.notified().await;
        }
        tokio::task::yield_now().await;
        match outcome {
            MeOutcome::Signed(role) => Ok(ok(Some(dummy_user_dto(role)))),
            MeOutcome::Unauthorized => {
                Ok(ApiResponse { status_code: 401, message: "Unauthorized".into(), timestamp: None, data: None })
            }
            MeOutcome::NetworkError => Err(ApiError::Transport("connection reset".into())),
        }
    }

    async fn login(&self, request: &LoginRequest) -> Result<(), ApiError> {
        self.record("login");
        *self.last_login.borrow_mut() = Some(request.clone());
        if self.fail_login.get() {
            return Err(ApiError::Status { status: 401, message: Some("Invalid credentials".into()) });
        }
        Ok(())
    }

    async fn logout(&self) -> Result<(), ApiError> {
        self.record("logout");
        tokio::task::yield_now().await;
        if self.fail_logout.get() {
            return Err(ApiError::Transport("backend unreachable".into()));
        }
        Ok(())
    }

    async fn register(&self, request: &RegisterRequest) -> Result<(), ApiError> {
        self.record("register");
        *self.last_register.borrow_mut() = Some(request.clone());
        Ok(())
    }

    async fn request_password_reset(&self, _email: &str) -> Result<(), ApiError> {
        self.record("request_password_reset");
        if self.fail_reset_request.get() {
            return Err(ApiError::Status { status: 404, message: Some("User not found".into()) });
        }
        Ok(())
    }

    async fn validate_reset_token(&self, reset_token: &str) -> Result<(), ApiError> {
        self.record("validate_reset_token");
        if reset_token == "expired" {
            return Err(ApiError::Status { status: 400, message: Some("Token expired".into()) });
        }
        Ok(())
    }

    async fn reset_password(&self, _request: &ResetPasswordRequest) -> Result<(), ApiError> {
        self.record("reset_password");
        Ok(())
    }

    async fn verify_otp(&self, request: &OtpRequest) -> Result<ApiResponse<OtpVerification>, ApiError> {
        self.record("verify_otp");
        if request.otp != "123456" {
            return Err(ApiError::Status { status: 400, message: Some("Invalid OTP".into()) });
        }
        Ok(ok(Some(OtpVerification {
            message: "verified".into(),
            success: true,
            reset_token: "reset-abc".into(),
            expires_at: "2025-03-01T00:15:00Z".into(),
        })))
    }
}

/// Navigator that records every target.
#[derive(Default)]
pub struct RecordingNavigator {
    pub visits: RefCell<Vec<NavTarget>>,
}

impl RecordingNavigator {
    pub fn last(&self) -> Option<NavTarget> {
        self.visits.borrow().last().cloned()
    }
}

impl Navigator for RecordingNavigator {
    fn navigate(&self, target: &NavTarget) {
        self.visits.borrow_mut().push(target.clone());
    }
}
