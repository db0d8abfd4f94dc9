use std::error::Error;

use async_trait::async_trait;

use crate::task::Task;
use crate::todo::TodoEntry;
use crate::workspace::{Document, GalleryPage};

/// The read surface the board views are built from.
///
/// Implemented by the HTTP [`Client`](crate::client::Client), and by the in-memory
/// board of the [`memory`](crate::memory) module, which mocks the server in tests.
#[async_trait]
pub trait BoardSource {
    /// The tasks assigned to the signed-in account
    async fn assigned_tasks(&self) -> Result<Vec<Task>, Box<dyn Error>>;
    /// A single task
    async fn task(&self, id: &str) -> Result<Task, Box<dyn Error>>;
    /// The signed-in account's to-do notes
    async fn my_todos(&self) -> Result<Vec<TodoEntry>, Box<dyn Error>>;
    /// The documents shared with the signed-in account
    async fn my_documents(&self) -> Result<Vec<Document>, Box<dyn Error>>;
    /// The image gallery pages shared with the signed-in account
    async fn my_gallery_pages(&self) -> Result<Vec<GalleryPage>, Box<dyn Error>>;
}
