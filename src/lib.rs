//! This crate provides a way to work with a project-management board service.
//!
//! It provides a REST client in the [`client`] module, that fetches the records a
//! dashboard displays (tasks, to-do notes, shared documents, image galleries,
//! reports) with a bearer token, and submits new records back.
//!
//! The view-side logic that does not depend on the server lives in two pure modules: \
//! [`schedule`] derives the day/week/month calendar grids, and [`board`] partitions
//! tasks into the Kanban columns. \
//! Both are deterministic, free of I/O, and safe to drive from any UI loop.
//!
//! Credentials are kept in one place, behind the store abstraction of the
//! [`session`] module.

pub mod traits;

pub mod schedule;
pub mod board;

mod task;
pub use task::{
    priority_colors, ColorScheme, Comment, DeployTarget, Priority, ProgressEntry, ResourceKinds,
    ResourceLinks, Task, TaskDraft, TaskStatus, TaskUpdate,
};
mod todo;
pub use todo::{TodoDraft, TodoEntry};
pub mod workspace;

pub mod client;
pub use client::Client;
pub mod session;
pub use session::Session;

#[cfg(feature = "in_memory_mocks_remote_source")]
pub mod memory;

pub mod config;
pub mod utils;
