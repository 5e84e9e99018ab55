//! Recording backend double shared by the controller tests.

use std::cell::RefCell;
use std::collections::VecDeque;

use store::{Note, NoteId, OtpRequest, UserProfile};

use crate::client::Backend;
use crate::error::ApiError;

#[derive(Clone, Debug, PartialEq)]
pub enum Call {
    SendOtp(OtpRequest),
    VerifyOtp { email: String, otp: String },
    FetchProfile { token: String },
    ListNotes { token: String },
    CreateNote { token: String, text: String },
    DeleteNote { token: String, id: String },
}

/// Scripted [`Backend`]: each operation pops its next queued result, or falls
/// back to a success when nothing is queued.
#[derive(Default)]
pub struct MockBackend {
    pub calls: RefCell<Vec<Call>>,
    pub send_otp: RefCell<VecDeque<Result<(), ApiError>>>,
    pub verify_otp: RefCell<VecDeque<Result<String, ApiError>>>,
    pub profile: RefCell<VecDeque<Result<UserProfile, ApiError>>>,
    pub notes: RefCell<VecDeque<Result<Vec<Note>, ApiError>>>,
    pub created: RefCell<VecDeque<Result<Note, ApiError>>>,
    pub deleted: RefCell<VecDeque<Result<(), ApiError>>>,
    next_id: RefCell<u64>,
}

impl MockBackend {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.borrow().clone()
    }

    pub fn call_count(&self) -> usize {
        self.calls.borrow().len()
    }

    fn record(&self, call: Call) {
        self.calls.borrow_mut().push(call);
    }
}

pub fn profile(name: &str, email: &str) -> UserProfile {
    UserProfile {
        name: name.to_string(),
        email: email.to_string(),
        dob: "2000-01-01".to_string(),
        avatar: None,
    }
}

pub fn server_note(id: &str, text: &str) -> Note {
    Note::new(NoteId::Server(id.to_string()), text)
}

impl Backend for MockBackend {
    async fn send_otp(&self, request: &OtpRequest) -> Result<(), ApiError> {
        self.record(Call::SendOtp(request.clone()));
        self.send_otp.borrow_mut().pop_front().unwrap_or(Ok(()))
    }

    async fn verify_otp(&self, email: &str, otp: &str) -> Result<String, ApiError> {
        self.record(Call::VerifyOtp {
            email: email.to_string(),
            otp: otp.to_string(),
        });
        self.verify_otp
            .borrow_mut()
            .pop_front()
            .unwrap_or_else(|| Ok("token-from-mock".to_string()))
    }

    async fn fetch_profile(&self, token: &str) -> Result<UserProfile, ApiError> {
        self.record(Call::FetchProfile {
            token: token.to_string(),
        });
        self.profile
            .borrow_mut()
            .pop_front()
            .unwrap_or_else(|| Ok(profile("Ann", "ann@x.com")))
    }

    async fn list_notes(&self, token: &str) -> Result<Vec<Note>, ApiError> {
        self.record(Call::ListNotes {
            token: token.to_string(),
        });
        self.notes.borrow_mut().pop_front().unwrap_or(Ok(Vec::new()))
    }

    async fn create_note(&self, token: &str, text: &str) -> Result<Note, ApiError> {
        self.record(Call::CreateNote {
            token: token.to_string(),
            text: text.to_string(),
        });
        if let Some(result) = self.created.borrow_mut().pop_front() {
            return result;
        }
        let mut next = self.next_id.borrow_mut();
        *next += 1;
        Ok(server_note(&format!("srv-{next}"), text))
    }

    async fn delete_note(&self, token: &str, id: &str) -> Result<(), ApiError> {
        self.record(Call::DeleteNote {
            token: token.to_string(),
            id: id.to_string(),
        });
        self.deleted.borrow_mut().pop_front().unwrap_or(Ok(()))
    }

    fn delegated_auth_url(&self) -> String {
        "http://mock.test/auth/google".to_string()
    }
}
