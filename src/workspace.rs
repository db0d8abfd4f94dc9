//! Records of the shared workspace: official documents, field reports, image galleries
//! and the accounts they are assigned to.
//!
//! These are plain data carriers. The server owns their lifecycle; this crate only
//! reads them and submits new ones through the [`client`](crate::client) module.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::task::{lenient_priority, lenient_status, Priority, TaskStatus};

/// An official document: either an uploaded PDF or a link
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Document {
    #[serde(rename = "_id", default)]
    pub id: String,
    #[serde(default)]
    pub title: String,
    /// The document category, a free-form server-side label
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pdf: Option<String>,
    #[serde(rename = "assignedTo", default, skip_serializing_if = "Option::is_none")]
    pub assigned_to: Option<String>,
}

/// One hosted image of a gallery or report
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct GalleryImage {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub public_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
}

/// A page of the image gallery
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct GalleryPage {
    #[serde(rename = "_id", default)]
    pub id: String,
    #[serde(rename = "pageName", default)]
    pub name: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub images: Vec<GalleryImage>,
}

/// Whom a report is assigned to. Unlike tasks, reports embed the account details.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Assignee {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(rename = "projectName", default, skip_serializing_if = "Option::is_none")]
    pub project_name: Option<String>,
}

/// A field report with its photos
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ReportPage {
    #[serde(rename = "_id", default)]
    pub id: String,
    #[serde(rename = "reportTitle", default)]
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub css: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub place: Option<String>,
    #[serde(default, deserialize_with = "lenient_priority", skip_serializing_if = "Option::is_none")]
    pub priority: Option<Priority>,
    #[serde(default, deserialize_with = "lenient_status", skip_serializing_if = "Option::is_none")]
    pub status: Option<TaskStatus>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub owner: Option<String>,
    #[serde(rename = "assignedTo", default, skip_serializing_if = "Option::is_none")]
    pub assigned_to: Option<Assignee>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub images: Vec<GalleryImage>,
    #[serde(rename = "createdAt", default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
}

/// The role a signed-in account holds.
///
/// The server stores this as a string. Roles this crate does not know about are kept
/// verbatim in [`Role::Other`] so that round-tripping an account never loses them.
#[derive(Clone, Debug, PartialEq)]
pub enum Role {
    Admin,
    User,
    Other(String),
}

impl Role {
    pub fn is_admin(&self) -> bool {
        match self {
            Role::Admin => true,
            _ => false,
        }
    }
}

impl Default for Role {
    fn default() -> Self {
        Role::User
    }
}

/// Used to support serde
impl Serialize for Role {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let raw = match self {
            Role::Admin => "admin",
            Role::User => "user",
            Role::Other(other) => other.as_str(),
        };
        serializer.serialize_str(raw)
    }
}
/// Used to support serde
impl<'de> Deserialize<'de> for Role {
    fn deserialize<D>(deserializer: D) -> Result<Role, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        Ok(match raw.as_str() {
            "admin" => Role::Admin,
            "user" => Role::User,
            _ => Role::Other(raw),
        })
    }
}

/// A user account, as the server describes it
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Account {
    #[serde(rename = "_id", default)]
    pub id: String,
    #[serde(default)]
    pub email: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
    #[serde(default)]
    pub role: Role,
}

impl Account {
    pub fn is_admin(&self) -> bool {
        self.role.is_admin()
    }
}
