//! Board tasks and their progress history

use bitflags::bitflags;
use chrono::{DateTime, Utc};
use csscolorparser::Color;
use once_cell::sync::Lazy;
use serde::{Deserialize, Deserializer, Serialize};
use uuid::Uuid;

bitflags! {
    /// Which kinds of deployment resources a task carries
    pub struct ResourceKinds: u8 {
        /// A deployed web site
        const SITE = 1;
        /// An Android build
        const APK = 2;
        /// A backend service
        const BACKEND = 4;
    }
}

/// A percentage-complete snapshot. Appended to a task's history whenever someone reports progress.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ProgressEntry {
    /// When this snapshot was recorded
    pub date: DateTime<Utc>,
    /// Percent complete, 0 to 100
    #[serde(deserialize_with = "clamped_percentage")]
    pub percentage: u8,
}

/// Task priority, as the server spells it.
///
/// The server stores this as a free-form string; values this crate does not know about
/// deserialize to `None` on the containing record and get the neutral colour scheme.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    High,
    Medium,
    Low,
}

impl Priority {
    fn from_wire(raw: &str) -> Option<Self> {
        match raw {
            "high" => Some(Priority::High),
            "medium" => Some(Priority::Medium),
            "low" => Some(Priority::Low),
            _ => None,
        }
    }

    pub fn as_wire_str(&self) -> &'static str {
        match self {
            Priority::High => "high",
            Priority::Medium => "medium",
            Priority::Low => "low",
        }
    }

    /// The colour scheme task cards of this priority are drawn with
    pub fn color_scheme(&self) -> &'static ColorScheme {
        match self {
            Priority::High => &HIGH_COLORS,
            Priority::Medium => &MEDIUM_COLORS,
            Priority::Low => &LOW_COLORS,
        }
    }
}

/// The workflow status a task or to-do note is tagged with
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum TaskStatus {
    ToDo,
    InProgress,
    Completed,
}

impl TaskStatus {
    fn from_wire(raw: &str) -> Option<Self> {
        match raw {
            "to-do" => Some(TaskStatus::ToDo),
            "in-progress" => Some(TaskStatus::InProgress),
            "completed" => Some(TaskStatus::Completed),
            _ => None,
        }
    }
}

/// The background/border/text colour triple of a task card
#[derive(Clone, Debug)]
pub struct ColorScheme {
    pub background: Color,
    pub border: Color,
    pub text: Color,
}

impl ColorScheme {
    fn from_hex(background: &str, border: &str, text: &str) -> Self {
        Self {
            background: csscolorparser::parse(background).unwrap(/* the hex literals below are valid CSS colors */),
            border: csscolorparser::parse(border).unwrap(),
            text: csscolorparser::parse(text).unwrap(),
        }
    }
}

static HIGH_COLORS: Lazy<ColorScheme> = Lazy::new(|| ColorScheme::from_hex("#ffebee", "#ef5350", "#c62828"));
static MEDIUM_COLORS: Lazy<ColorScheme> = Lazy::new(|| ColorScheme::from_hex("#fff8e1", "#ffca28", "#f57f17"));
static LOW_COLORS: Lazy<ColorScheme> = Lazy::new(|| ColorScheme::from_hex("#e8f5e9", "#66bb6a", "#2e7d32"));
static DEFAULT_COLORS: Lazy<ColorScheme> = Lazy::new(|| ColorScheme::from_hex("#e3f2fd", "#42a5f5", "#1565c0"));

/// The colour scheme for an optional priority. Missing and unknown priorities share the neutral scheme.
pub fn priority_colors(priority: Option<Priority>) -> &'static ColorScheme {
    match priority {
        Some(priority) => priority.color_scheme(),
        None => &DEFAULT_COLORS,
    }
}

/// One `dev` or `official` deployment of a task's site, APK or backend
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct DeployTarget {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
}

/// The `dev`/`official` pair of deployments for one resource kind.
/// Absence at any level is a first-class `None`, never a missing JSON property to probe for.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct ResourceLinks {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dev: Option<DeployTarget>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub official: Option<DeployTarget>,
}

impl ResourceLinks {
    /// Whether at least one of the two deployments has a URL
    pub fn has_any_url(&self) -> bool {
        let has_url = |target: &Option<DeployTarget>| {
            target.as_ref().map(|t| t.url.is_some()).unwrap_or(false)
        };
        has_url(&self.dev) || has_url(&self.official)
    }
}

/// A comment left on a task or to-do note
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Comment {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub author: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date: Option<DateTime<Utc>>,
}

/// A board task
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Task {
    /// The server-side identifier of this task
    #[serde(rename = "_id")]
    id: String,

    /// The display name of the task
    #[serde(rename = "taskName")]
    name: String,

    /// Whether this task has been explicitly marked complete
    #[serde(rename = "Done", default)]
    done: bool,

    /// The append-only progress history. Insertion order is chronological order:
    /// the most recently appended entry wins, whatever its embedded timestamp says.
    #[serde(rename = "Progression", default)]
    progression: Vec<ProgressEntry>,

    /// When this task is due. A malformed server value deserializes to `None` rather
    /// than failing the whole payload.
    #[serde(rename = "dueDate", default, deserialize_with = "lenient_instant", skip_serializing_if = "Option::is_none")]
    due_date: Option<DateTime<Utc>>,

    #[serde(rename = "Duration", default, skip_serializing_if = "Option::is_none")]
    duration: Option<String>,
    #[serde(rename = "Description", default, skip_serializing_if = "Option::is_none")]
    description: Option<String>,
    #[serde(rename = "Problem", default, skip_serializing_if = "Option::is_none")]
    problem: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    owner: Option<String>,
    #[serde(rename = "assignedTo", default, skip_serializing_if = "Option::is_none")]
    assigned_to: Option<String>,

    #[serde(default, deserialize_with = "lenient_priority", skip_serializing_if = "Option::is_none")]
    priority: Option<Priority>,
    #[serde(default, deserialize_with = "lenient_status", skip_serializing_if = "Option::is_none")]
    status: Option<TaskStatus>,

    #[serde(rename = "Site", default, skip_serializing_if = "Option::is_none")]
    site: Option<ResourceLinks>,
    #[serde(rename = "Apk", default, skip_serializing_if = "Option::is_none")]
    apk: Option<ResourceLinks>,
    #[serde(rename = "Backend", default, skip_serializing_if = "Option::is_none")]
    backend: Option<ResourceLinks>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    comments: Vec<Comment>,
}

impl Task {
    /// Create a brand new Task that is not on the server yet.
    /// This will pick a new (random) task ID.
    pub fn new(name: String) -> Self {
        Self {
            id: Uuid::new_v4().to_hyphenated().to_string(),
            name,
            done: false,
            progression: Vec::new(),
            due_date: None,
            duration: None,
            description: None,
            problem: None,
            owner: None,
            assigned_to: None,
            priority: None,
            status: None,
            site: None,
            apk: None,
            backend: None,
            comments: Vec::new(),
        }
    }

    pub fn id(&self) -> &str        { &self.id       }
    pub fn name(&self) -> &str      { &self.name     }
    pub fn done(&self) -> bool      { self.done      }
    pub fn progression(&self) -> &[ProgressEntry]   { &self.progression }
    pub fn due_date(&self) -> Option<&DateTime<Utc>> { self.due_date.as_ref() }
    pub fn duration(&self) -> Option<&str>      { self.duration.as_deref()    }
    pub fn description(&self) -> Option<&str>   { self.description.as_deref() }
    pub fn problem(&self) -> Option<&str>       { self.problem.as_deref()     }
    pub fn owner(&self) -> Option<&str>         { self.owner.as_deref()       }
    pub fn assigned_to(&self) -> Option<&str>   { self.assigned_to.as_deref() }
    pub fn priority(&self) -> Option<Priority>  { self.priority }
    pub fn status(&self) -> Option<TaskStatus>  { self.status   }
    pub fn site(&self) -> Option<&ResourceLinks>    { self.site.as_ref()    }
    pub fn apk(&self) -> Option<&ResourceLinks>     { self.apk.as_ref()     }
    pub fn backend(&self) -> Option<&ResourceLinks> { self.backend.as_ref() }
    pub fn comments(&self) -> &[Comment]            { &self.comments        }

    /// The current percent-complete of this task: the last entry of the progress
    /// history, or 0 when no progress has ever been reported.
    pub fn current_progress(&self) -> u8 {
        self.progression.last().map(|entry| entry.percentage).unwrap_or(0)
    }

    /// Which deployment sections carry at least one URL
    pub fn resource_kinds(&self) -> ResourceKinds {
        let mut kinds = ResourceKinds::empty();
        let carries = |links: &Option<ResourceLinks>| {
            links.as_ref().map(|l| l.has_any_url()).unwrap_or(false)
        };
        if carries(&self.site)    { kinds.insert(ResourceKinds::SITE);    }
        if carries(&self.apk)     { kinds.insert(ResourceKinds::APK);     }
        if carries(&self.backend) { kinds.insert(ResourceKinds::BACKEND); }
        kinds
    }

    /// The file name of the most relevant APK build (`dev` preferred over `official`),
    /// derived from the task name, or `None` when no APK has been uploaded
    pub fn apk_file_name(&self) -> Option<String> {
        let apk = self.apk.as_ref()?;
        let with_url = |target: &Option<DeployTarget>| {
            target.clone().filter(|t| t.url.is_some())
        };
        let target = with_url(&apk.dev).or_else(|| with_url(&apk.official))?;
        let version = target.version.as_deref().unwrap_or("v1");

        let base = self.name.split_whitespace().collect::<Vec<_>>().join("_").to_lowercase();
        Some(sanitize_filename::sanitize(format!("{}_{}.apk", base, version)))
    }

    pub fn set_done(&mut self, done: bool) {
        self.done = done;
    }

    pub fn set_due_date(&mut self, due_date: Option<DateTime<Utc>>) {
        self.due_date = due_date;
    }

    pub fn set_priority(&mut self, priority: Option<Priority>) {
        self.priority = priority;
    }

    pub fn set_status(&mut self, status: Option<TaskStatus>) {
        self.status = status;
    }

    pub fn set_assigned_to(&mut self, assigned_to: Option<String>) {
        self.assigned_to = assigned_to;
    }

    /// Append a progress snapshot dated now. Percentages above 100 are clamped.
    pub fn push_progress(&mut self, percentage: u8) {
        self.progression.push(ProgressEntry {
            date: Utc::now(),
            percentage: percentage.min(100),
        });
    }
}

/// The payload to create a new task (an admin-only operation on the server side)
#[derive(Clone, Debug, Default, Serialize)]
pub struct TaskDraft {
    #[serde(rename = "taskName")]
    pub name: String,
    #[serde(rename = "Done")]
    pub done: bool,
    #[serde(rename = "dueDate", skip_serializing_if = "Option::is_none")]
    pub due_date: Option<DateTime<Utc>>,
    #[serde(rename = "Duration", skip_serializing_if = "Option::is_none")]
    pub duration: Option<String>,
    #[serde(rename = "Description", skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(rename = "Problem", skip_serializing_if = "Option::is_none")]
    pub problem: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub owner: Option<String>,
    #[serde(rename = "assignedTo", skip_serializing_if = "Option::is_none")]
    pub assigned_to: Option<String>,
    #[serde(rename = "Site", skip_serializing_if = "Option::is_none")]
    pub site: Option<ResourceLinks>,
    #[serde(rename = "Apk", skip_serializing_if = "Option::is_none")]
    pub apk: Option<ResourceLinks>,
    #[serde(rename = "Backend", skip_serializing_if = "Option::is_none")]
    pub backend: Option<ResourceLinks>,
}

impl TaskDraft {
    pub fn new(name: String) -> Self {
        Self { name, ..Default::default() }
    }
}

/// A partial task update. Only the populated fields are sent.
///
/// `progression` always carries the full history: reporting progress means appending
/// to it, never rewriting past entries.
#[derive(Clone, Debug, Default, Serialize)]
pub struct TaskUpdate {
    #[serde(rename = "taskName", skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(rename = "Done", skip_serializing_if = "Option::is_none")]
    pub done: Option<bool>,
    #[serde(rename = "dueDate", skip_serializing_if = "Option::is_none")]
    pub due_date: Option<DateTime<Utc>>,
    #[serde(rename = "Duration", skip_serializing_if = "Option::is_none")]
    pub duration: Option<String>,
    #[serde(rename = "Description", skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(rename = "Problem", skip_serializing_if = "Option::is_none")]
    pub problem: Option<String>,
    #[serde(rename = "assignedTo", skip_serializing_if = "Option::is_none")]
    pub assigned_to: Option<String>,
    #[serde(rename = "Site", skip_serializing_if = "Option::is_none")]
    pub site: Option<ResourceLinks>,
    #[serde(rename = "Apk", skip_serializing_if = "Option::is_none")]
    pub apk: Option<ResourceLinks>,
    #[serde(rename = "Backend", skip_serializing_if = "Option::is_none")]
    pub backend: Option<ResourceLinks>,
    #[serde(rename = "Progression", skip_serializing_if = "Option::is_none")]
    pub progression: Option<Vec<ProgressEntry>>,
}

impl TaskUpdate {
    /// Start an update from the task's current state, carrying over its progress history
    pub fn for_task(task: &Task) -> Self {
        Self {
            name: Some(task.name().to_string()),
            progression: Some(task.progression().to_vec()),
            ..Default::default()
        }
    }

    /// Append a new progress snapshot (dated now, clamped to 100) to the carried history
    pub fn record_progress(&mut self, percentage: u8) {
        let entry = ProgressEntry {
            date: Utc::now(),
            percentage: percentage.min(100),
        };
        match &mut self.progression {
            Some(history) => history.push(entry),
            None => self.progression = Some(vec![entry]),
        }
    }
}

fn clamped_percentage<'de, D>(deserializer: D) -> Result<u8, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = i64::deserialize(deserializer)?;
    Ok(raw.max(0).min(100) as u8)
}

fn lenient_instant<'de, D>(deserializer: D) -> Result<Option<DateTime<Utc>>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw: Option<String> = Option::deserialize(deserializer)?;
    Ok(raw.and_then(|text| match text.parse::<DateTime<Utc>>() {
        Ok(instant) => Some(instant),
        Err(err) => {
            log::warn!("Ignoring malformed date {:?}: {}", text, err);
            None
        }
    }))
}

pub(crate) fn lenient_priority<'de, D>(deserializer: D) -> Result<Option<Priority>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw: Option<String> = Option::deserialize(deserializer)?;
    Ok(raw.as_deref().and_then(Priority::from_wire))
}

pub(crate) fn lenient_status<'de, D>(deserializer: D) -> Result<Option<TaskStatus>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw: Option<String> = Option::deserialize(deserializer)?;
    Ok(raw.as_deref().and_then(TaskStatus::from_wire))
}

#[cfg(test)]
mod tests {
    use super::*;

    const EXAMPLE_TASK: &str = r#"{
        "_id": "65a1f0",
        "taskName": "Portail client",
        "Done": false,
        "dueDate": "2024-03-10T09:00:00.000Z",
        "Duration": "3 semaines",
        "priority": "high",
        "status": "in-progress",
        "Progression": [
            { "date": "2024-02-01T10:00:00.000Z", "percentage": 30 },
            { "date": "2024-02-20T10:00:00.000Z", "percentage": 70 }
        ],
        "Apk": { "dev": { "url": "https://cdn.example.com/portail.apk", "version": "2.1" } }
    }"#;

    #[test]
    fn deserialize_task_from_server_payload() {
        let task: Task = serde_json::from_str(EXAMPLE_TASK).unwrap();
        assert_eq!(task.id(), "65a1f0");
        assert_eq!(task.name(), "Portail client");
        assert_eq!(task.done(), false);
        assert_eq!(task.priority(), Some(Priority::High));
        assert_eq!(task.status(), Some(TaskStatus::InProgress));
        assert_eq!(task.current_progress(), 70);
        assert!(task.due_date().is_some());
    }

    #[test]
    fn last_appended_progress_wins() {
        let mut task = Task::new("test".to_string());
        assert_eq!(task.current_progress(), 0);
        task.push_progress(30);
        task.push_progress(70);
        assert_eq!(task.current_progress(), 70);
    }

    #[test]
    fn progress_is_clamped() {
        let mut task = Task::new("test".to_string());
        task.push_progress(250);
        assert_eq!(task.current_progress(), 100);

        let entry: ProgressEntry =
            serde_json::from_str(r#"{ "date": "2024-02-01T10:00:00Z", "percentage": 250 }"#).unwrap();
        assert_eq!(entry.percentage, 100);
        let entry: ProgressEntry =
            serde_json::from_str(r#"{ "date": "2024-02-01T10:00:00Z", "percentage": -5 }"#).unwrap();
        assert_eq!(entry.percentage, 0);
    }

    #[test]
    fn malformed_due_date_fails_open() {
        let task: Task = serde_json::from_str(
            r#"{ "_id": "1", "taskName": "t", "dueDate": "demain matin" }"#,
        ).unwrap();
        assert!(task.due_date().is_none());
    }

    #[test]
    fn unknown_priority_and_status_fail_open() {
        let task: Task = serde_json::from_str(
            r#"{ "_id": "1", "taskName": "t", "priority": "urgente", "status": "paused" }"#,
        ).unwrap();
        assert_eq!(task.priority(), None);
        assert_eq!(task.status(), None);
        // The neutral colour scheme applies
        let scheme = priority_colors(task.priority());
        assert_eq!(scheme.border.to_hex_string(), "#42a5f5");
    }

    #[test]
    fn apk_file_name_is_derived_from_the_task_name() {
        let task: Task = serde_json::from_str(EXAMPLE_TASK).unwrap();
        assert_eq!(task.apk_file_name(), Some("portail_client_2.1.apk".to_string()));

        let task = Task::new("No apk here".to_string());
        assert_eq!(task.apk_file_name(), None);
    }

    #[test]
    fn resource_kinds_reflect_which_sections_have_urls() {
        let task: Task = serde_json::from_str(EXAMPLE_TASK).unwrap();
        assert_eq!(task.resource_kinds(), ResourceKinds::APK);

        // A version without a URL does not count as a deployment
        let task: Task = serde_json::from_str(
            r#"{ "_id": "1", "taskName": "t", "Site": { "dev": { "version": "v3" } } }"#,
        ).unwrap();
        assert_eq!(task.resource_kinds(), ResourceKinds::empty());
    }

    #[test]
    fn update_appends_to_the_carried_history() {
        let mut task = Task::new("test".to_string());
        task.push_progress(40);

        let mut update = TaskUpdate::for_task(&task);
        update.record_progress(60);

        let history = update.progression.as_ref().unwrap();
        assert_eq!(history.len(), 2);
        assert_eq!(history[1].percentage, 60);

        let wire = serde_json::to_value(&update).unwrap();
        assert_eq!(wire["Progression"].as_array().unwrap().len(), 2);
        assert!(wire.get("Done").is_none());
    }
}
