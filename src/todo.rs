//! Stand-alone to-do notes (the fourth board column)
//!
//! Unlike tasks, to-do notes carry no progress history: the board displays them as-is.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::task::{lenient_priority, lenient_status, Comment, Priority, TaskStatus};

/// A to-do note
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct TodoEntry {
    /// The server-side identifier of this note
    #[serde(rename = "_id")]
    id: String,

    /// The display title of the note
    #[serde(rename = "ToDoTitle")]
    title: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    content: Option<String>,

    /// Free-form style hints attached by the author
    #[serde(default, skip_serializing_if = "Option::is_none")]
    css: Option<String>,

    #[serde(default, deserialize_with = "lenient_priority", skip_serializing_if = "Option::is_none")]
    priority: Option<Priority>,
    #[serde(default, deserialize_with = "lenient_status", skip_serializing_if = "Option::is_none")]
    status: Option<TaskStatus>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    owner: Option<String>,
    #[serde(rename = "assignedTo", default, skip_serializing_if = "Option::is_none")]
    assigned_to: Option<String>,

    #[serde(rename = "createdAt", default, skip_serializing_if = "Option::is_none")]
    created_at: Option<DateTime<Utc>>,
    #[serde(rename = "updatedAt", default, skip_serializing_if = "Option::is_none")]
    updated_at: Option<DateTime<Utc>>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    comments: Vec<Comment>,
}

impl TodoEntry {
    /// Create a brand new note that is not on the server yet.
    /// This will pick a new (random) ID.
    pub fn new(title: String) -> Self {
        Self {
            id: Uuid::new_v4().to_hyphenated().to_string(),
            title,
            content: None,
            css: None,
            priority: None,
            status: None,
            owner: None,
            assigned_to: None,
            created_at: Some(Utc::now()),
            updated_at: None,
            comments: Vec::new(),
        }
    }

    pub fn id(&self) -> &str      { &self.id    }
    pub fn title(&self) -> &str   { &self.title }
    pub fn content(&self) -> Option<&str>       { self.content.as_deref()     }
    pub fn css(&self) -> Option<&str>           { self.css.as_deref()         }
    pub fn priority(&self) -> Option<Priority>  { self.priority }
    pub fn status(&self) -> Option<TaskStatus>  { self.status   }
    pub fn owner(&self) -> Option<&str>         { self.owner.as_deref()       }
    pub fn assigned_to(&self) -> Option<&str>   { self.assigned_to.as_deref() }
    pub fn created_at(&self) -> Option<&DateTime<Utc>> { self.created_at.as_ref() }
    pub fn updated_at(&self) -> Option<&DateTime<Utc>> { self.updated_at.as_ref() }
    pub fn comments(&self) -> &[Comment]        { &self.comments }

    pub fn set_content(&mut self, content: Option<String>) {
        self.content = content;
    }

    pub fn set_assigned_to(&mut self, assigned_to: Option<String>) {
        self.assigned_to = assigned_to;
    }
}

/// The payload to create a new to-do note (an admin-only operation on the server side)
#[derive(Clone, Debug, Default, Serialize)]
pub struct TodoDraft {
    #[serde(rename = "ToDoTitle")]
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
    #[serde(rename = "assignedTo", skip_serializing_if = "Option::is_none")]
    pub assigned_to: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub priority: Option<Priority>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<TaskStatus>,
}

impl TodoDraft {
    pub fn new(title: String) -> Self {
        Self { title, ..Default::default() }
    }
}
