//! REST API client for the NexusTrack HTTP endpoints.
//!
//! Every call goes through [`ApiClient::request`], which attaches the stored
//! bearer token, and [`ApiClient::dispatch`], which handles failures in one
//! place: a 401 clears the token and raises [`Notice::SessionExpired`], and
//! other non-2xx statuses become [`ClientError::Api`].

use std::sync::Arc;

use nexustrack_core::task_status::TaskStatus;
use nexustrack_core::types::DbId;
use reqwest::{Method, StatusCode};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::json;

use crate::error::ClientError;
use crate::models::{AuthResponse, NewTask, Project, ProjectInput, Task, TaskPatch, TaskStats, User};
use crate::notify::{Notice, Notifier, TracingNotifier};
use crate::token_store::{MemoryTokenStore, TokenStore};

/// HTTP client for one NexusTrack API.
#[derive(Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
    tokens: Arc<dyn TokenStore>,
    notifier: Arc<dyn Notifier>,
}

/// Error body produced by the API.
#[derive(Debug, Deserialize)]
struct ErrorBody {
    error: String,
}

impl ApiClient {
    /// Create a client with an in-memory token store that logs notices.
    ///
    /// * `base_url` - API root including the `/api` prefix, e.g.
    ///   `http://localhost:5000/api`.
    pub fn new(base_url: impl Into<String>) -> Self {
        Self::with_parts(
            reqwest::Client::new(),
            base_url,
            Arc::new(MemoryTokenStore::new()),
            Arc::new(TracingNotifier),
        )
    }

    /// Create a client from explicit parts, reusing an existing
    /// [`reqwest::Client`] for connection pooling.
    pub fn with_parts(
        http: reqwest::Client,
        base_url: impl Into<String>,
        tokens: Arc<dyn TokenStore>,
        notifier: Arc<dyn Notifier>,
    ) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self {
            http,
            base_url,
            tokens,
            notifier,
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Whether a session token is currently stored.
    pub fn is_authenticated(&self) -> bool {
        self.tokens.get().is_some()
    }

    // ---- auth ----

    /// Create an account and keep its token.
    pub async fn register(
        &self,
        name: &str,
        email: &str,
        password: &str,
    ) -> Result<AuthResponse, ClientError> {
        let body = json!({ "name": name, "email": email, "password": password });
        let auth: AuthResponse = self
            .send_json(self.request(Method::POST, "/auth/register").json(&body))
            .await?;
        self.tokens.set(&auth.token)?;
        Ok(auth)
    }

    /// Sign in and keep the token.
    pub async fn login(&self, email: &str, password: &str) -> Result<AuthResponse, ClientError> {
        let body = json!({ "email": email, "password": password });
        let auth: AuthResponse = self
            .send_json(self.request(Method::POST, "/auth/login").json(&body))
            .await?;
        self.tokens.set(&auth.token)?;
        Ok(auth)
    }

    /// Forget the stored token. Tokens are stateless, so the server is not contacted.
    pub fn logout(&self) -> Result<(), ClientError> {
        self.tokens.clear()
    }

    pub async fn me(&self) -> Result<User, ClientError> {
        self.send_json(self.request(Method::GET, "/auth/me")).await
    }

    // ---- users ----

    pub async fn update_profile(&self, name: &str) -> Result<User, ClientError> {
        let body = json!({ "name": name });
        self.send_json(self.request(Method::PUT, "/users/profile").json(&body))
            .await
    }

    pub async fn update_password(
        &self,
        current_password: &str,
        new_password: &str,
    ) -> Result<(), ClientError> {
        let body = json!({ "currentPassword": current_password, "newPassword": new_password });
        self.send_empty(self.request(Method::PUT, "/users/password").json(&body))
            .await
    }

    // ---- projects ----

    pub async fn list_projects(&self) -> Result<Vec<Project>, ClientError> {
        self.send_json(self.request(Method::GET, "/projects")).await
    }

    pub async fn create_project(&self, input: &ProjectInput) -> Result<Project, ClientError> {
        self.send_json(self.request(Method::POST, "/projects").json(input))
            .await
    }

    pub async fn update_project(
        &self,
        id: DbId,
        input: &ProjectInput,
    ) -> Result<Project, ClientError> {
        self.send_json(
            self.request(Method::PUT, &format!("/projects/{id}"))
                .json(input),
        )
        .await
    }

    /// Delete a project together with its tasks.
    pub async fn delete_project(&self, id: DbId) -> Result<(), ClientError> {
        self.send_empty(self.request(Method::DELETE, &format!("/projects/{id}")))
            .await
    }

    // ---- tasks ----

    pub async fn list_tasks(&self, project_id: Option<DbId>) -> Result<Vec<Task>, ClientError> {
        let mut builder = self.request(Method::GET, "/tasks");
        if let Some(project_id) = project_id {
            builder = builder.query(&[("projectId", project_id)]);
        }
        self.send_json(builder).await
    }

    pub async fn create_task(&self, input: &NewTask) -> Result<Task, ClientError> {
        self.send_json(self.request(Method::POST, "/tasks").json(input))
            .await
    }

    pub async fn update_task(&self, id: DbId, patch: &TaskPatch) -> Result<Task, ClientError> {
        self.send_json(self.request(Method::PUT, &format!("/tasks/{id}")).json(patch))
            .await
    }

    pub async fn update_task_status(
        &self,
        id: DbId,
        status: TaskStatus,
    ) -> Result<Task, ClientError> {
        let body = json!({ "status": status });
        self.send_json(
            self.request(Method::PUT, &format!("/tasks/{id}/status"))
                .json(&body),
        )
        .await
    }

    pub async fn delete_task(&self, id: DbId) -> Result<(), ClientError> {
        self.send_empty(self.request(Method::DELETE, &format!("/tasks/{id}")))
            .await
    }

    pub async fn task_stats(&self, project_id: Option<DbId>) -> Result<TaskStats, ClientError> {
        let mut builder = self.request(Method::GET, "/tasks/stats");
        if let Some(project_id) = project_id {
            builder = builder.query(&[("projectId", project_id)]);
        }
        self.send_json(builder).await
    }

    // ---- private helpers ----

    /// Start a request to `path`, attaching the bearer token when one is stored.
    fn request(&self, method: Method, path: &str) -> reqwest::RequestBuilder {
        let builder = self
            .http
            .request(method, format!("{}{}", self.base_url, path));
        match self.tokens.get() {
            Some(token) => builder.bearer_auth(token),
            None => builder,
        }
    }

    /// Send a request and turn every non-2xx response into an error.
    async fn dispatch(
        &self,
        builder: reqwest::RequestBuilder,
    ) -> Result<reqwest::Response, ClientError> {
        let response = builder.send().await?;
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let text = response.text().await.unwrap_or_default();
        let message = serde_json::from_str::<ErrorBody>(&text)
            .map(|body| body.error)
            .unwrap_or_else(|_| {
                if text.is_empty() {
                    status.canonical_reason().unwrap_or("Request failed").to_string()
                } else {
                    text
                }
            });

        if status == StatusCode::UNAUTHORIZED {
            if let Err(e) = self.tokens.clear() {
                tracing::warn!(error = %e, "Failed to clear token after 401");
            }
            self.notifier.notify(&Notice::SessionExpired);
        } else {
            self.notifier.notify(&Notice::RequestFailed {
                status: status.as_u16(),
                message: message.clone(),
            });
        }

        Err(ClientError::Api {
            status: status.as_u16(),
            message,
        })
    }

    async fn send_json<T: DeserializeOwned>(
        &self,
        builder: reqwest::RequestBuilder,
    ) -> Result<T, ClientError> {
        let response = self.dispatch(builder).await?;
        Ok(response.json::<T>().await?)
    }

    async fn send_empty(&self, builder: reqwest::RequestBuilder) -> Result<(), ClientError> {
        self.dispatch(builder).await?;
        Ok(())
    }
}
