//! # Auth flow: the two-phase OTP sign-up / sign-in state machine
//!
//! Sign-up and sign-in are the same flow with different required fields:
//!
//! ```text
//!   CollectingIdentity --request OTP ok--> OtpSent --verify OTP ok--> Authenticated
//!          ^    |                           ^   |
//!          +----+ validation / send error   +---+ resend OTP, validation / verify error
//! ```
//!
//! Sign-up needs name, date of birth and email; sign-in needs only the email.
//! Once the OTP is sent the identity fields are locked so the code always matches
//! the address it was sent to.
//!
//! ## Split transitions
//!
//! Each transition is a pair of synchronous steps around the network call:
//! `begin_*` validates and marks the flow busy, returning what to send, and
//! `finish_*` applies the backend's answer. UI code holds the flow in a signal and
//! calls the backend between the two; [`AuthFlow::request_otp`],
//! [`AuthFlow::resend_otp`] and [`AuthFlow::submit_otp`] compose them for callers
//! that own the flow outright.
//!
//! Delegated sign-in bypasses all of this: it is a plain redirect to the backend's
//! authorization endpoint, see [`AuthFlow::delegated_auth_url`].

use std::time::Duration;

use store::{Identity, OtpRequest, Persistence, Session};

use crate::client::Backend;
use crate::error::ApiError;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FlowKind {
    SignUp,
    SignIn,
}

/// Switches that replace the separate sign-in/sign-up page variants.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FlowOptions {
    /// Offer the email OTP path. When off, only delegated sign-in is available.
    pub require_otp: bool,
    /// Offer the "continue with Google" redirect.
    pub allow_delegated_auth: bool,
}

impl FlowOptions {
    /// Defaults per flow: both use OTP, only sign-up offers delegated sign-in.
    pub fn for_kind(kind: FlowKind) -> Self {
        Self {
            require_otp: true,
            allow_delegated_auth: kind == FlowKind::SignUp,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Phase {
    CollectingIdentity,
    OtpSent,
    Authenticated,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Field {
    Name,
    Dob,
    Email,
    Otp,
}

/// Inline message shown under the form.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Notice {
    Info(String),
    Error(String),
}

impl Notice {
    pub fn text(&self) -> &str {
        match self {
            Notice::Info(text) | Notice::Error(text) => text,
        }
    }

    pub fn is_error(&self) -> bool {
        matches!(self, Notice::Error(_))
    }
}

/// Raw form values.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct AuthForm {
    pub name: String,
    pub dob: String,
    pub email: String,
    pub otp: String,
    /// "Keep me logged in" (sign-in only). Starts unchecked.
    pub remember: bool,
}

/// Navigation to the notes view, to happen once `after` has elapsed.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ScheduledRedirect {
    pub after: Duration,
}

#[derive(Clone, Debug, PartialEq)]
pub struct AuthFlow {
    kind: FlowKind,
    options: FlowOptions,
    phase: Phase,
    form: AuthForm,
    notice: Option<Notice>,
    busy: bool,
}

impl AuthFlow {
    pub fn new(kind: FlowKind, options: FlowOptions) -> Self {
        Self {
            kind,
            options,
            phase: Phase::CollectingIdentity,
            form: AuthForm::default(),
            notice: None,
            busy: false,
        }
    }

    pub fn sign_up() -> Self {
        Self::new(FlowKind::SignUp, FlowOptions::for_kind(FlowKind::SignUp))
    }

    pub fn sign_in() -> Self {
        Self::new(FlowKind::SignIn, FlowOptions::for_kind(FlowKind::SignIn))
    }

    pub fn kind(&self) -> FlowKind {
        self.kind
    }

    pub fn options(&self) -> FlowOptions {
        self.options
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn form(&self) -> &AuthForm {
        &self.form
    }

    pub fn notice(&self) -> Option<&Notice> {
        self.notice.as_ref()
    }

    pub fn is_busy(&self) -> bool {
        self.busy
    }

    /// Identity fields are read-only once an OTP has been sent.
    pub fn fields_locked(&self) -> bool {
        self.phase != Phase::CollectingIdentity
    }

    /// Fields the current flow asks for in the identity phase.
    pub fn identity_fields(&self) -> &'static [Field] {
        match self.kind {
            FlowKind::SignUp => &[Field::Name, Field::Dob, Field::Email],
            FlowKind::SignIn => &[Field::Email],
        }
    }

    /// Update a form field. Returns `false` when the field is locked.
    pub fn set_field(&mut self, field: Field, value: impl Into<String>) -> bool {
        let value = value.into();
        let slot = match field {
            Field::Otp => {
                if self.phase != Phase::OtpSent {
                    return false;
                }
                &mut self.form.otp
            }
            _ if self.fields_locked() => return false,
            Field::Name => &mut self.form.name,
            Field::Dob => &mut self.form.dob,
            Field::Email => &mut self.form.email,
        };
        *slot = value;
        self.notice = None;
        true
    }

    pub fn set_remember(&mut self, remember: bool) {
        self.form.remember = remember;
    }

    /// How the issued token should be stored.
    pub fn persistence(&self) -> Persistence {
        match self.kind {
            FlowKind::SignIn if !self.form.remember => Persistence::Ephemeral,
            _ => Persistence::Durable,
        }
    }

    /// The redirect target for delegated sign-in, if this flow offers it.
    pub fn delegated_auth_url<B: Backend>(&self, backend: &B) -> Option<String> {
        self.options
            .allow_delegated_auth
            .then(|| backend.delegated_auth_url())
    }

    /// Validate the identity and mark the flow busy. In `OtpSent` this is a resend
    /// of the already locked identity.
    pub fn begin_otp_request(&mut self) -> Result<OtpRequest, ApiError> {
        self.ensure_idle()?;
        if self.phase == Phase::Authenticated {
            return Err(ApiError::Validation("Already signed in.".to_string()));
        }
        if !self.options.require_otp {
            return self.reject(ApiError::Validation(
                "Sign-in with a one-time passcode is disabled.".to_string(),
            ));
        }

        let form = &self.form;
        let request = match self.kind {
            FlowKind::SignUp => {
                if [&form.name, &form.dob, &form.email]
                    .iter()
                    .any(|v| v.trim().is_empty())
                {
                    return self.reject(ApiError::Validation("All fields are required.".to_string()));
                }
                OtpRequest::from(Identity::new(
                    form.name.trim(),
                    form.dob.trim(),
                    form.email.trim(),
                ))
            }
            FlowKind::SignIn => {
                if form.email.trim().is_empty() {
                    return self.reject(ApiError::Validation("Email is required.".to_string()));
                }
                OtpRequest::email_only(form.email.trim())
            }
        };

        self.notice = None;
        self.busy = true;
        Ok(request)
    }

    /// Apply the result of `send_otp`.
    pub fn finish_otp_request(&mut self, result: Result<(), ApiError>) -> Result<(), ApiError> {
        self.busy = false;
        match result {
            Ok(()) => {
                let message = if self.phase == Phase::OtpSent {
                    "OTP resent to your email."
                } else {
                    "OTP sent to your email."
                };
                tracing::info!(kind = ?self.kind, "OTP sent");
                self.phase = Phase::OtpSent;
                self.notice = Some(Notice::Info(message.to_string()));
                Ok(())
            }
            Err(e) => self.reject(e),
        }
    }

    /// Validate the OTP and mark the flow busy. Returns `(email, otp)` to verify.
    pub fn begin_otp_verification(&mut self) -> Result<(String, String), ApiError> {
        self.ensure_idle()?;
        if self.phase != Phase::OtpSent {
            return self.reject(ApiError::Validation("Request an OTP first.".to_string()));
        }
        let otp = self.form.otp.trim();
        if otp.is_empty() {
            return self.reject(ApiError::Validation("OTP is required.".to_string()));
        }

        let pair = (self.form.email.trim().to_string(), otp.to_string());
        self.notice = None;
        self.busy = true;
        Ok(pair)
    }

    /// Apply the result of `verify_otp`: store the token and schedule the redirect.
    pub fn finish_otp_verification(
        &mut self,
        result: Result<String, ApiError>,
        session: &Session,
        redirect_delay: Duration,
    ) -> Result<ScheduledRedirect, ApiError> {
        self.busy = false;
        let token = match result {
            Ok(token) if !token.is_empty() => token,
            Ok(_) => {
                return self.reject(ApiError::Server(
                    "Server did not return a session token.".to_string(),
                ))
            }
            Err(e) => return self.reject(e),
        };

        session.set_token(token, self.persistence());
        self.phase = Phase::Authenticated;
        let message = match self.kind {
            FlowKind::SignUp => "Signup successful! Redirecting...",
            FlowKind::SignIn => "Signed in! Redirecting...",
        };
        self.notice = Some(Notice::Info(message.to_string()));
        tracing::info!(kind = ?self.kind, "authenticated");
        Ok(ScheduledRedirect {
            after: redirect_delay,
        })
    }

    /// collecting-identity → otp-sent.
    pub async fn request_otp<B: Backend>(&mut self, backend: &B) -> Result<(), ApiError> {
        let request = self.begin_otp_request()?;
        let result = backend.send_otp(&request).await;
        self.finish_otp_request(result)
    }

    /// Send a fresh code to the locked identity without leaving `OtpSent`.
    pub async fn resend_otp<B: Backend>(&mut self, backend: &B) -> Result<(), ApiError> {
        if self.phase != Phase::OtpSent {
            return self.reject(ApiError::Validation("Request an OTP first.".to_string()));
        }
        self.request_otp(backend).await
    }

    /// otp-sent → authenticated.
    pub async fn submit_otp<B: Backend>(
        &mut self,
        backend: &B,
        session: &Session,
        redirect_delay: Duration,
    ) -> Result<ScheduledRedirect, ApiError> {
        let (email, otp) = self.begin_otp_verification()?;
        let result = backend.verify_otp(&email, &otp).await;
        self.finish_otp_verification(result, session, redirect_delay)
    }

    fn ensure_idle(&self) -> Result<(), ApiError> {
        if self.busy {
            Err(ApiError::Validation("Please wait for the current request.".to_string()))
        } else {
            Ok(())
        }
    }

    fn reject<T>(&mut self, error: ApiError) -> Result<T, ApiError> {
        tracing::info!(kind = ?self.kind, phase = ?self.phase, "auth step failed: {}", error);
        self.notice = Some(Notice::Error(error.to_string()));
        Err(error)
    }
}
