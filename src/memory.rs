//! An in-memory board, used to mock the remote server in integration tests

use std::error::Error;

use async_trait::async_trait;

use crate::task::Task;
use crate::todo::TodoEntry;
use crate::traits::BoardSource;
use crate::workspace::{Document, GalleryPage};

/// A [`BoardSource`] whose records live in plain vectors.
///
/// Records keep their insertion order, like the server keeps assignment order.
#[derive(Debug, Default)]
pub struct InMemoryBoard {
    tasks: Vec<Task>,
    todos: Vec<TodoEntry>,
    documents: Vec<Document>,
    pages: Vec<GalleryPage>,
}

impl InMemoryBoard {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_task(&mut self, task: Task) {
        self.tasks.push(task);
    }

    pub fn add_todo(&mut self, todo: TodoEntry) {
        self.todos.push(todo);
    }

    pub fn add_document(&mut self, document: Document) {
        self.documents.push(document);
    }

    pub fn add_page(&mut self, page: GalleryPage) {
        self.pages.push(page);
    }
}

#[async_trait]
impl BoardSource for InMemoryBoard {
    async fn assigned_tasks(&self) -> Result<Vec<Task>, Box<dyn Error>> {
        Ok(self.tasks.clone())
    }

    async fn task(&self, id: &str) -> Result<Task, Box<dyn Error>> {
        self.tasks
            .iter()
            .find(|task| task.id() == id)
            .cloned()
            .ok_or_else(|| format!("No task with ID {}", id).into())
    }

    async fn my_todos(&self) -> Result<Vec<TodoEntry>, Box<dyn Error>> {
        Ok(self.todos.clone())
    }

    async fn my_documents(&self) -> Result<Vec<Document>, Box<dyn Error>> {
        Ok(self.documents.clone())
    }

    async fn my_gallery_pages(&self) -> Result<Vec<GalleryPage>, Box<dyn Error>> {
        Ok(self.pages.clone())
    }
}
