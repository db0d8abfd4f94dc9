//! This module provides a client to the board's REST API
//!
//! Every reply is wrapped in the server's `{ success, data, error }` envelope; the
//! client unwraps it and turns `success: false` into an error carrying the
//! server-supplied message. All authenticated calls send the bearer token granted at
//! login.

use std::error::Error;

use async_trait::async_trait;
use reqwest::multipart::{Form, Part};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use url::Url;

use crate::config;
use crate::session::Credentials;
use crate::task::{Priority, Task, TaskDraft, TaskUpdate};
use crate::todo::{TodoDraft, TodoEntry};
use crate::traits::BoardSource;
use crate::workspace::{Account, Document, GalleryPage, ReportPage};

/// The reply envelope every endpoint wraps its payload in
#[derive(Debug, Deserialize)]
struct Envelope<T> {
    #[serde(default)]
    success: bool,
    data: Option<T>,
    #[serde(default)]
    error: Option<String>,
}

impl<T> Envelope<T> {
    fn into_data(self) -> Result<T, Box<dyn Error>> {
        if self.success == false {
            return Err(self
                .error
                .unwrap_or_else(|| "The server reported a failure".to_string())
                .into());
        }
        match self.data {
            Some(data) => Ok(data),
            None => Err("The server reply carried no data".into()),
        }
    }

    fn into_ack(self) -> Result<(), Box<dyn Error>> {
        if self.success == false {
            return Err(self
                .error
                .unwrap_or_else(|| "The server reported a failure".to_string())
                .into());
        }
        Ok(())
    }
}

/// The login endpoint does not use the envelope: it returns the token and account
/// at the top level
#[derive(Debug, Deserialize)]
struct LoginReply {
    #[serde(default)]
    success: bool,
    #[serde(default)]
    token: Option<String>,
    #[serde(default)]
    user: Option<Account>,
    #[serde(default)]
    error: Option<String>,
}

/// An upload submitted to the document endpoints: metadata plus either a PDF file
/// or an external link
#[derive(Clone, Debug)]
pub struct DocumentUpload {
    pub title: String,
    pub kind: String,
    pub assigned_to: Option<String>,
    pub source: DocumentSource,
}

#[derive(Clone, Debug)]
pub enum DocumentSource {
    Pdf { file_name: String, bytes: Vec<u8> },
    Link(String),
}

impl DocumentUpload {
    fn into_form(self) -> Form {
        let mut form = Form::new().text("title", self.title).text("type", self.kind);
        if let Some(assigned_to) = self.assigned_to {
            form = form.text("assignedTo", assigned_to);
        }
        match self.source {
            DocumentSource::Pdf { file_name, bytes } => {
                form.part("pdf", Part::bytes(bytes).file_name(file_name))
            }
            DocumentSource::Link(url) => form.text("url", url),
        }
    }
}

/// A new field report with its photos, submitted as a multipart form
#[derive(Clone, Debug, Default)]
pub struct ReportDraft {
    pub title: String,
    pub place: String,
    pub content: String,
    pub priority: Option<Priority>,
    pub assigned_to: Option<String>,
    /// `(file name, bytes)` pairs, one per photo
    pub images: Vec<(String, Vec<u8>)>,
}

impl ReportDraft {
    fn into_form(self) -> Form {
        let mut form = Form::new()
            .text("reportTitle", self.title)
            .text("place", self.place)
            .text("content", self.content);
        if let Some(priority) = self.priority {
            form = form.text("priority", priority.as_wire_str());
        }
        if let Some(assigned_to) = self.assigned_to {
            form = form.text("assignedTo", assigned_to);
        }
        for (file_name, bytes) in self.images {
            form = form.part("images", Part::bytes(bytes).file_name(file_name));
        }
        form
    }
}

/// A client bound to one board service and one signed-in account
pub struct Client {
    api_base: Url,
    token: String,
    http: reqwest::Client,
}

impl Client {
    /// Create a client from an already-granted token. This does not contact the server.
    ///
    /// `api_base` should end with a `/` so that endpoint paths join cleanly.
    pub fn new<S: AsRef<str>, T: ToString>(api_base: S, token: T) -> Result<Self, Box<dyn Error>> {
        let api_base = Url::parse(api_base.as_ref())?;
        Ok(Self {
            api_base,
            token: token.to_string(),
            http: new_http_client()?,
        })
    }

    /// Authenticate against the server and build a client from the granted token.
    /// The returned [`Credentials`] are the caller's to store.
    pub async fn log_in<S: AsRef<str>, E: ToString, P: ToString>(
        api_base: S,
        email: E,
        password: P,
    ) -> Result<(Self, Credentials), Box<dyn Error>> {
        let api_base = Url::parse(api_base.as_ref())?;
        let http = new_http_client()?;

        let response = http
            .post(api_base.join("login")?)
            .json(&serde_json::json!({
                "email": email.to_string(),
                "password": password.to_string(),
            }))
            .send()
            .await?;
        let status = response.status();
        let reply: LoginReply = response.json().await?;

        if reply.success == false {
            return Err(reply
                .error
                .unwrap_or_else(|| format!("Login refused (HTTP {})", status))
                .into());
        }
        let token = match reply.token {
            Some(token) => token,
            None => return Err("The login reply carried no token".into()),
        };

        let credentials = Credentials::new(token.clone(), reply.user);
        let client = Self { api_base, token, http };
        Ok((client, credentials))
    }

    /// Invalidate the server-side session. Clearing the local credential store is
    /// the caller's concern (see [`Session`](crate::session::Session)).
    pub async fn log_out(&self) -> Result<(), Box<dyn Error>> {
        let response = self
            .http
            .post(self.endpoint("logout")?)
            .bearer_auth(&self.token)
            .send()
            .await?;
        if response.status().is_success() == false {
            return Err(format!("Unexpected HTTP status code {:?}", response.status()).into());
        }
        Ok(())
    }

    pub fn api_base(&self) -> &Url {
        &self.api_base
    }

    /// The tasks assigned to the signed-in account
    pub async fn assigned_tasks(&self) -> Result<Vec<Task>, Box<dyn Error>> {
        self.get("task/my/assigned").await
    }

    /// A single task
    pub async fn task(&self, id: &str) -> Result<Task, Box<dyn Error>> {
        self.get(&format!("task/{}", id)).await
    }

    /// Create a task (admin only)
    pub async fn create_task(&self, draft: &TaskDraft) -> Result<Task, Box<dyn Error>> {
        self.post("admin/task", draft).await
    }

    /// Update a task (admin only). Progress is reported by sending the full,
    /// appended-to history in the update
    pub async fn update_task(&self, id: &str, update: &TaskUpdate) -> Result<Task, Box<dyn Error>> {
        self.put(&format!("admin/task/{}", id), update).await
    }

    /// Delete a task (admin only)
    pub async fn delete_task(&self, id: &str) -> Result<(), Box<dyn Error>> {
        self.delete(&format!("admin/task/{}", id)).await
    }

    /// The signed-in account's to-do notes
    pub async fn my_todos(&self) -> Result<Vec<TodoEntry>, Box<dyn Error>> {
        self.get("ToDo/my-toDo").await
    }

    /// Create a to-do note (admin only)
    pub async fn create_todo(&self, draft: &TodoDraft) -> Result<TodoEntry, Box<dyn Error>> {
        self.post("admin/ToDo", draft).await
    }

    /// The documents shared with the signed-in account
    pub async fn my_documents(&self) -> Result<Vec<Document>, Box<dyn Error>> {
        self.get("officials/my/assigned").await
    }

    /// Every document (admin only)
    pub async fn all_documents(&self) -> Result<Vec<Document>, Box<dyn Error>> {
        self.get("admin/officials").await
    }

    /// Upload a new document
    pub async fn create_document(&self, upload: DocumentUpload) -> Result<Document, Box<dyn Error>> {
        self.post_form("officials", upload.into_form()).await
    }

    /// Replace a document's metadata or file
    pub async fn update_document(
        &self,
        id: &str,
        upload: DocumentUpload,
    ) -> Result<Document, Box<dyn Error>> {
        self.put_form(&format!("officials/{}", id), upload.into_form()).await
    }

    /// Delete a document
    pub async fn delete_document(&self, id: &str) -> Result<(), Box<dyn Error>> {
        self.delete(&format!("officials/{}", id)).await
    }

    /// The image gallery pages shared with the signed-in account
    pub async fn my_gallery_pages(&self) -> Result<Vec<GalleryPage>, Box<dyn Error>> {
        self.get("page/my/assigned").await
    }

    /// A single gallery page with its images
    pub async fn gallery_page(&self, id: &str) -> Result<GalleryPage, Box<dyn Error>> {
        self.get(&format!("page/{}", id)).await
    }

    /// One page of the reports list (admin only)
    pub async fn reports(&self, page: u32, limit: u32) -> Result<Vec<ReportPage>, Box<dyn Error>> {
        self.get(&format!("admin/rapport?page={}&limit={}", page, limit)).await
    }

    /// A single report
    pub async fn report(&self, id: &str) -> Result<ReportPage, Box<dyn Error>> {
        self.get(&format!("report/{}", id)).await
    }

    /// Submit a new report with its photos
    pub async fn create_report(&self, draft: ReportDraft) -> Result<ReportPage, Box<dyn Error>> {
        self.post_form("report", draft.into_form()).await
    }

    /// Delete a report (admin only)
    pub async fn delete_report(&self, id: &str) -> Result<(), Box<dyn Error>> {
        self.delete(&format!("admin/report/{}", id)).await
    }

    /// Every user account (admin only), e.g. to populate an assignee picker
    pub async fn accounts(&self) -> Result<Vec<Account>, Box<dyn Error>> {
        self.get("admin/accounts").await
    }

    fn endpoint(&self, path: &str) -> Result<Url, Box<dyn Error>> {
        Ok(self.api_base.join(path)?)
    }

    async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T, Box<dyn Error>> {
        log::debug!("GET {}", path);
        let url = self.endpoint(path)?;
        let response = self
            .http
            .get(url)
            .bearer_auth(&self.token)
            .send()
            .await?;
        Self::decode(response).await
    }

    async fn post<B: Serialize, T: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T, Box<dyn Error>> {
        log::debug!("POST {}", path);
        let url = self.endpoint(path)?;
        let response = self
            .http
            .post(url)
            .bearer_auth(&self.token)
            .json(body)
            .send()
            .await?;
        Self::decode(response).await
    }

    async fn put<B: Serialize, T: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T, Box<dyn Error>> {
        log::debug!("PUT {}", path);
        let url = self.endpoint(path)?;
        let response = self
            .http
            .put(url)
            .bearer_auth(&self.token)
            .json(body)
            .send()
            .await?;
        Self::decode(response).await
    }

    async fn post_form<T: DeserializeOwned>(&self, path: &str, form: Form) -> Result<T, Box<dyn Error>> {
        log::debug!("POST {} (multipart)", path);
        let url = self.endpoint(path)?;
        let response = self
            .http
            .post(url)
            .bearer_auth(&self.token)
            .multipart(form)
            .send()
            .await?;
        Self::decode(response).await
    }

    async fn put_form<T: DeserializeOwned>(&self, path: &str, form: Form) -> Result<T, Box<dyn Error>> {
        log::debug!("PUT {} (multipart)", path);
        let url = self.endpoint(path)?;
        let response = self
            .http
            .put(url)
            .bearer_auth(&self.token)
            .multipart(form)
            .send()
            .await?;
        Self::decode(response).await
    }

    async fn delete(&self, path: &str) -> Result<(), Box<dyn Error>> {
        log::debug!("DELETE {}", path);
        let url = self.endpoint(path)?;
        let response = self
            .http
            .delete(url)
            .bearer_auth(&self.token)
            .send()
            .await?;
        let status = response.status();
        if status.is_success() == false {
            return Err(Self::error_from_reply(response, status).await);
        }
        let envelope: Envelope<serde_json::Value> = response.json().await?;
        envelope.into_ack()
    }

    async fn decode<T: DeserializeOwned>(response: reqwest::Response) -> Result<T, Box<dyn Error>> {
        let status = response.status();
        if status.is_success() == false {
            return Err(Self::error_from_reply(response, status).await);
        }
        let envelope: Envelope<T> = response.json().await?;
        envelope.into_data()
    }

    /// A failed reply usually still carries an envelope whose `error` field is more
    /// helpful than the bare status code
    async fn error_from_reply(
        response: reqwest::Response,
        status: reqwest::StatusCode,
    ) -> Box<dyn Error> {
        match response.json::<Envelope<serde_json::Value>>().await {
            Ok(envelope) => envelope
                .error
                .unwrap_or_else(|| format!("Unexpected HTTP status code {:?}", status))
                .into(),
            Err(_) => format!("Unexpected HTTP status code {:?}", status).into(),
        }
    }
}

#[async_trait]
impl BoardSource for Client {
    async fn assigned_tasks(&self) -> Result<Vec<Task>, Box<dyn Error>> {
        Client::assigned_tasks(self).await
    }

    async fn task(&self, id: &str) -> Result<Task, Box<dyn Error>> {
        Client::task(self, id).await
    }

    async fn my_todos(&self) -> Result<Vec<TodoEntry>, Box<dyn Error>> {
        Client::my_todos(self).await
    }

    async fn my_documents(&self) -> Result<Vec<Document>, Box<dyn Error>> {
        Client::my_documents(self).await
    }

    async fn my_gallery_pages(&self) -> Result<Vec<GalleryPage>, Box<dyn Error>> {
        Client::my_gallery_pages(self).await
    }
}

fn new_http_client() -> Result<reqwest::Client, Box<dyn Error>> {
    let user_agent = config::USER_AGENT.lock().unwrap().clone();
    Ok(reqwest::Client::builder().user_agent(user_agent).build()?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn envelope_unwraps_data() {
        let envelope: Envelope<Vec<u32>> =
            serde_json::from_str(r#"{ "success": true, "data": [1, 2, 3] }"#).unwrap();
        assert_eq!(envelope.into_data().unwrap(), vec![1, 2, 3]);
    }

    #[test]
    fn envelope_surfaces_the_server_error() {
        let envelope: Envelope<Vec<u32>> =
            serde_json::from_str(r#"{ "success": false, "error": "Token invalide" }"#).unwrap();
        let err = envelope.into_data().unwrap_err();
        assert_eq!(err.to_string(), "Token invalide");
    }

    #[test]
    fn successful_envelope_without_data_is_an_error() {
        let envelope: Envelope<Vec<u32>> =
            serde_json::from_str(r#"{ "success": true }"#).unwrap();
        assert!(envelope.into_data().is_err());
    }

    #[test]
    fn login_reply_carries_token_and_account() {
        let reply: LoginReply = serde_json::from_str(r#"{
            "success": true,
            "token": "tok-123",
            "user": { "_id": "65aa01", "email": "sam@example.com", "role": "admin" }
        }"#).unwrap();
        assert_eq!(reply.token.as_deref(), Some("tok-123"));
        assert!(reply.user.unwrap().is_admin());
    }
}
