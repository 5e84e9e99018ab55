//! # Backend client
//!
//! [`Backend`] is the seam between the controllers and the notes service. The
//! production implementation, [`HttpBackend`], is a thin reqwest wrapper: one
//! request per call, no retries, every failure folded into an [`ApiError`].
//!
//! | Call | Request | Auth |
//! |------|---------|------|
//! | [`send_otp`](Backend::send_otp) | `POST /auth/send-otp` | none |
//! | [`verify_otp`](Backend::verify_otp) | `POST /auth/verify-otp` | none |
//! | [`fetch_profile`](Backend::fetch_profile) | `GET /me` | bearer |
//! | [`list_notes`](Backend::list_notes) | `GET /notes` | bearer |
//! | [`create_note`](Backend::create_note) | `POST /notes` | bearer |
//! | [`delete_note`](Backend::delete_note) | `DELETE /notes/:id` | bearer |
//!
//! Error bodies look like `{"error": "..."}`. When the body carries no message
//! the operation's fallback text is used instead.

use std::future::Future;

use reqwest::{RequestBuilder, Response, Url};
use serde::Deserialize;
use store::{ClientConfig, Note, OtpRequest, UserProfile};

use crate::error::ApiError;

/// Async interface to the notes backend.
pub trait Backend {
    fn send_otp(&self, request: &OtpRequest) -> impl Future<Output = Result<(), ApiError>>;
    fn verify_otp(
        &self,
        email: &str,
        otp: &str,
    ) -> impl Future<Output = Result<String, ApiError>>;
    fn fetch_profile(&self, token: &str) -> impl Future<Output = Result<UserProfile, ApiError>>;
    fn list_notes(&self, token: &str) -> impl Future<Output = Result<Vec<Note>, ApiError>>;
    fn create_note(
        &self,
        token: &str,
        text: &str,
    ) -> impl Future<Output = Result<Note, ApiError>>;
    fn delete_note(&self, token: &str, id: &str) -> impl Future<Output = Result<(), ApiError>>;
    /// Endpoint the browser is sent to for delegated (Google) sign-in.
    fn delegated_auth_url(&self) -> String;
}

#[derive(Deserialize)]
struct TokenResponse {
    token: String,
}

#[derive(Deserialize)]
struct ProfileResponse {
    user: UserProfile,
}

#[derive(Deserialize)]
struct ErrorBody {
    #[serde(default)]
    error: Option<String>,
    #[serde(default)]
    message: Option<String>,
}

/// reqwest-backed [`Backend`].
#[derive(Clone, Debug)]
pub struct HttpBackend {
    http: reqwest::Client,
    base_url: String,
}

impl HttpBackend {
    pub fn new(config: &ClientConfig) -> Self {
        Self::with_base_url(config.api.base_url.clone())
    }

    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        let base_url: String = base_url.into();
        Self {
            http: reqwest::Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// `<base>/notes/<id>` with `id` percent-encoded as a single path segment.
    fn note_url(&self, id: &str) -> Result<Url, ApiError> {
        let invalid = || {
            tracing::warn!("Base URL {} cannot carry a note path", self.base_url);
            ApiError::Server("Invalid backend URL.".to_string())
        };
        let mut url = Url::parse(&self.url("/notes")).map_err(|_| invalid())?;
        url.path_segments_mut().map_err(|_| invalid())?.push(id);
        Ok(url)
    }

    /// Send a request and turn transport failures and error statuses into [`ApiError`].
    async fn execute(&self, request: RequestBuilder, fallback: &str) -> Result<Response, ApiError> {
        self.execute_as(request, fallback, ApiError::from_status).await
    }

    /// [`execute`](Self::execute) with a per-operation status mapping.
    async fn execute_as(
        &self,
        request: RequestBuilder,
        fallback: &str,
        classify: fn(u16, String) -> ApiError,
    ) -> Result<Response, ApiError> {
        let response = request.send().await.map_err(|e| {
            tracing::warn!("Request failed before a response arrived: {}", e);
            ApiError::Connectivity
        })?;

        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let body = response.text().await.unwrap_or_default();
        let message = serde_json::from_str::<ErrorBody>(&body)
            .ok()
            .and_then(|b| b.error.or(b.message))
            .filter(|m| !m.trim().is_empty())
            .unwrap_or_else(|| fallback.to_string());
        tracing::warn!(status = status.as_u16(), "Backend rejected request: {}", message);
        Err(classify(status.as_u16(), message))
    }

    async fn decode<T: serde::de::DeserializeOwned>(response: Response) -> Result<T, ApiError> {
        response.json::<T>().await.map_err(|e| {
            tracing::warn!("Malformed response body: {}", e);
            ApiError::Server("Unexpected response from server.".to_string())
        })
    }
}

fn require(value: &str, message: &str) -> Result<(), ApiError> {
    if value.trim().is_empty() {
        Err(ApiError::Validation(message.to_string()))
    } else {
        Ok(())
    }
}

impl Backend for HttpBackend {
    async fn send_otp(&self, request: &OtpRequest) -> Result<(), ApiError> {
        require(&request.email, "Email is required.")?;
        let identity_fields = [request.name.as_deref(), request.dob.as_deref()];
        if identity_fields.iter().flatten().any(|v| v.trim().is_empty()) {
            return Err(ApiError::Validation("All fields are required.".to_string()));
        }

        let builder = self.http.post(self.url("/auth/send-otp")).json(request);
        self.execute(builder, "Failed to send OTP. Please try again.")
            .await?;
        Ok(())
    }

    async fn verify_otp(&self, email: &str, otp: &str) -> Result<String, ApiError> {
        require(email, "Email is required.")?;
        require(otp, "OTP is required.")?;

        let builder = self
            .http
            .post(self.url("/auth/verify-otp"))
            .json(&serde_json::json!({ "email": email, "otp": otp }));
        let response = self
            .execute_as(builder, "Invalid OTP or sign-in failed.", |status, message| {
                match status {
                    // Wrong, expired or unknown code
                    400 | 404 => ApiError::Auth(message),
                    _ => ApiError::from_status(status, message),
                }
            })
            .await?;
        let body: TokenResponse = Self::decode(response).await?;
        Ok(body.token)
    }

    async fn fetch_profile(&self, token: &str) -> Result<UserProfile, ApiError> {
        let builder = self.http.get(self.url("/me")).bearer_auth(token);
        let response = self.execute(builder, "Failed to load profile.").await?;
        let body: ProfileResponse = Self::decode(response).await?;
        Ok(body.user)
    }

    async fn list_notes(&self, token: &str) -> Result<Vec<Note>, ApiError> {
        let builder = self.http.get(self.url("/notes")).bearer_auth(token);
        let response = self.execute(builder, "Failed to load notes.").await?;
        Self::decode(response).await
    }

    async fn create_note(&self, token: &str, text: &str) -> Result<Note, ApiError> {
        require(text, "Note text is required.")?;

        let builder = self
            .http
            .post(self.url("/notes"))
            .bearer_auth(token)
            .json(&serde_json::json!({ "text": text }));
        let response = self.execute(builder, "Failed to add note.").await?;
        Self::decode(response).await
    }

    async fn delete_note(&self, token: &str, id: &str) -> Result<(), ApiError> {
        let builder = self
            .http
            .delete(self.note_url(id)?)
            .bearer_auth(token);
        self.execute(builder, "Failed to delete note.").await?;
        Ok(())
    }

    fn delegated_auth_url(&self) -> String {
        self.url("/auth/google")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mockito::{Matcher, Server};
    use store::{Identity, NoteId};

    #[tokio::test]
    async fn send_otp_posts_identity_fields() {
        let mut server = Server::new_async().await;
        let mock = server
            .mock("POST", "/auth/send-otp")
            .match_body(Matcher::Json(serde_json::json!({
                "name": "Ann",
                "dob": "2000-01-01",
                "email": "ann@x.com"
            })))
            .with_status(200)
            .with_body("{}")
            .create_async()
            .await;

        let backend = HttpBackend::with_base_url(server.url());
        let request = OtpRequest::from(Identity::new("Ann", "2000-01-01", "ann@x.com"));
        backend.send_otp(&request).await.expect("otp should be sent");

        mock.assert_async().await;
    }

    #[tokio::test]
    async fn send_otp_surfaces_backend_error_message() {
        let mut server = Server::new_async().await;
        let _mock = server
            .mock("POST", "/auth/send-otp")
            .with_status(500)
            .with_body(r#"{"error": "Mailer is down"}"#)
            .create_async()
            .await;

        let backend = HttpBackend::with_base_url(server.url());
        let err = backend
            .send_otp(&OtpRequest::email_only("ann@x.com"))
            .await
            .unwrap_err();
        assert_eq!(err, ApiError::Server("Mailer is down".to_string()));
    }

    #[tokio::test]
    async fn send_otp_falls_back_when_body_has_no_message() {
        let mut server = Server::new_async().await;
        let _mock = server
            .mock("POST", "/auth/send-otp")
            .with_status(503)
            .with_body("<html>gateway</html>")
            .create_async()
            .await;

        let backend = HttpBackend::with_base_url(server.url());
        let err = backend
            .send_otp(&OtpRequest::email_only("ann@x.com"))
            .await
            .unwrap_err();
        assert_eq!(
            err,
            ApiError::Server("Failed to send OTP. Please try again.".to_string())
        );
    }

    #[tokio::test]
    async fn send_otp_with_blank_field_never_hits_network() {
        let mut server = Server::new_async().await;
        let mock = server
            .mock("POST", "/auth/send-otp")
            .expect(0)
            .create_async()
            .await;

        let backend = HttpBackend::with_base_url(server.url());
        let request = OtpRequest::from(Identity::new("Ann", "", "ann@x.com"));
        let err = backend.send_otp(&request).await.unwrap_err();

        assert!(matches!(err, ApiError::Validation(_)));
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn verify_otp_returns_token() {
        let mut server = Server::new_async().await;
        let mock = server
            .mock("POST", "/auth/verify-otp")
            .match_body(Matcher::Json(
                serde_json::json!({ "email": "ann@x.com", "otp": "123456" }),
            ))
            .with_status(200)
            .with_body(r#"{"token": "jwt-abc"}"#)
            .create_async()
            .await;

        let backend = HttpBackend::with_base_url(server.url());
        let token = backend.verify_otp("ann@x.com", "123456").await.unwrap();

        assert_eq!(token, "jwt-abc");
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn verify_otp_rejection_is_auth_error() {
        let mut server = Server::new_async().await;
        let _mock = server
            .mock("POST", "/auth/verify-otp")
            .with_status(400)
            .with_body(r#"{"error": "OTP expired"}"#)
            .create_async()
            .await;

        let backend = HttpBackend::with_base_url(server.url());
        let err = backend.verify_otp("ann@x.com", "000000").await.unwrap_err();
        assert_eq!(err, ApiError::Auth("OTP expired".to_string()));
    }

    #[tokio::test]
    async fn fetch_profile_sends_bearer_token() {
        let mut server = Server::new_async().await;
        let mock = server
            .mock("GET", "/me")
            .match_header("authorization", "Bearer jwt-abc")
            .with_status(200)
            .with_body(
                r#"{"user": {"name": "Ann", "email": "ann@x.com", "dob": "2000-01-01", "avatar": null}}"#,
            )
            .create_async()
            .await;

        let backend = HttpBackend::with_base_url(server.url());
        let profile = backend.fetch_profile("jwt-abc").await.unwrap();

        assert_eq!(profile.name, "Ann");
        assert_eq!(profile.dob, "2000-01-01");
        assert_eq!(profile.avatar, None);
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn fetch_profile_with_bad_token_is_auth_error() {
        let mut server = Server::new_async().await;
        let _mock = server
            .mock("GET", "/me")
            .with_status(401)
            .with_body(r#"{"error": "Invalid token"}"#)
            .create_async()
            .await;

        let backend = HttpBackend::with_base_url(server.url());
        let err = backend.fetch_profile("stale").await.unwrap_err();
        assert!(err.is_auth());
    }

    #[tokio::test]
    async fn list_notes_accepts_both_id_styles() {
        let mut server = Server::new_async().await;
        let _mock = server
            .mock("GET", "/notes")
            .match_header("authorization", "Bearer t")
            .with_status(200)
            .with_body(r#"[{"id": 1, "text": "first"}, {"_id": "65ab", "text": "second"}]"#)
            .create_async()
            .await;

        let backend = HttpBackend::with_base_url(server.url());
        let notes = backend.list_notes("t").await.unwrap();

        assert_eq!(notes.len(), 2);
        assert_eq!(notes[0].id, NoteId::Server("1".to_string()));
        assert_eq!(notes[1].id, NoteId::Server("65ab".to_string()));
        assert_eq!(notes[1].text, "second");
    }

    #[tokio::test]
    async fn create_note_returns_server_note() {
        let mut server = Server::new_async().await;
        let mock = server
            .mock("POST", "/notes")
            .match_header("authorization", "Bearer t")
            .match_body(Matcher::Json(serde_json::json!({ "text": "buy milk" })))
            .with_status(201)
            .with_body(r#"{"_id": "n1", "text": "buy milk"}"#)
            .create_async()
            .await;

        let backend = HttpBackend::with_base_url(server.url());
        let note = backend.create_note("t", "buy milk").await.unwrap();

        assert_eq!(note, Note::new(NoteId::Server("n1".into()), "buy milk"));
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn delete_note_unknown_id_is_not_found() {
        let mut server = Server::new_async().await;
        let mock = server
            .mock("DELETE", "/notes/42")
            .with_status(404)
            .with_body(r#"{"error": "Note not found"}"#)
            .create_async()
            .await;

        let backend = HttpBackend::with_base_url(server.url());
        let err = backend.delete_note("t", "42").await.unwrap_err();

        assert_eq!(err, ApiError::NotFound("Note not found".to_string()));
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn delete_note_escapes_id_in_path() {
        let mut server = Server::new_async().await;
        let mock = server
            .mock("DELETE", "/notes/a%2Fb%3Fc")
            .match_header("authorization", "Bearer t")
            .with_status(200)
            .with_body("{}")
            .create_async()
            .await;

        let backend = HttpBackend::with_base_url(server.url());
        backend.delete_note("t", "a/b?c").await.unwrap();

        mock.assert_async().await;
    }

    #[tokio::test]
    async fn send_otp_rejected_by_backend_is_server_error() {
        let mut server = Server::new_async().await;
        let _mock = server
            .mock("POST", "/auth/send-otp")
            .with_status(400)
            .with_body(r#"{"error": "User already exists"}"#)
            .create_async()
            .await;

        let backend = HttpBackend::with_base_url(server.url());
        let err = backend
            .send_otp(&OtpRequest::email_only("ann@x.com"))
            .await
            .unwrap_err();
        assert_eq!(err, ApiError::Server("User already exists".to_string()));
    }

    #[tokio::test]
    async fn create_note_rejected_by_backend_is_server_error() {
        let mut server = Server::new_async().await;
        let _mock = server
            .mock("POST", "/notes")
            .with_status(422)
            .with_body(r#"{"error": "Text too long"}"#)
            .create_async()
            .await;

        let backend = HttpBackend::with_base_url(server.url());
        let err = backend.create_note("t", "x").await.unwrap_err();
        assert_eq!(err, ApiError::Server("Text too long".to_string()));
    }

    #[tokio::test]
    async fn verify_otp_server_failure_stays_server_error() {
        let mut server = Server::new_async().await;
        let _mock = server
            .mock("POST", "/auth/verify-otp")
            .with_status(500)
            .with_body(r#"{"error": "Database unavailable"}"#)
            .create_async()
            .await;

        let backend = HttpBackend::with_base_url(server.url());
        let err = backend.verify_otp("ann@x.com", "123456").await.unwrap_err();
        assert_eq!(err, ApiError::Server("Database unavailable".to_string()));
    }

    #[tokio::test]
    async fn unreachable_server_is_connectivity_error() {
        // Port 9 (discard) is not listening on test machines.
        let backend = HttpBackend::with_base_url("http://127.0.0.1:9");
        let err = backend
            .send_otp(&OtpRequest::email_only("ann@x.com"))
            .await
            .unwrap_err();
        assert_eq!(err, ApiError::Connectivity);
    }

    #[test]
    fn delegated_auth_url_is_under_base() {
        let backend = HttpBackend::with_base_url("https://notes.example.com/");
        assert_eq!(
            backend.delegated_auth_url(),
            "https://notes.example.com/auth/google"
        );
    }
}
