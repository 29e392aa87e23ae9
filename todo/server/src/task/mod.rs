use chrono::{DateTime, SecondsFormat, Utc};
use parking_lot::RwLock;
use serde::{Deserialize, Serialize, Serializer};
use utoipa::ToSchema;

pub mod api;

pub type TaskId = i64;

/// Titles every fresh store starts with, in identity order.
pub const SEED_TITLES: [&str; 3] = ["Learn React", "Learn Next.js", "Build a todo app"];

/// A single to-do item.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    /// Unique identifier, assigned by the store
    pub id: TaskId,
    /// Trimmed, non-empty title
    pub title: String,
    /// Whether the task is done
    pub completed: bool,
    /// Creation time, ISO-8601
    #[serde(serialize_with = "serialize_timestamp")]
    pub created_at: DateTime<Utc>,
    /// Time of the last successful mutation, ISO-8601
    #[serde(serialize_with = "serialize_timestamp")]
    pub updated_at: DateTime<Utc>,
}

fn serialize_timestamp<S>(timestamp: &DateTime<Utc>, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    serializer.serialize_str(&timestamp.to_rfc3339_opts(SecondsFormat::Millis, true))
}

/// Fields of a task that may be replaced by [`TaskStore::update`].
/// `None` leaves the field unchanged.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TaskUpdate {
    pub title: Option<String>,
    pub completed: Option<bool>,
}

#[derive(Debug)]
struct TaskList {
    tasks: Vec<Task>,
    next_id: TaskId,
}

impl TaskList {
    fn empty() -> Self {
        Self {
            tasks: Vec::new(),
            next_id: 1,
        }
    }

    fn push(&mut self, title: String) -> Task {
        let now = Utc::now();
        let task = Task {
            id: self.next_id,
            title,
            completed: false,
            created_at: now,
            updated_at: now,
        };
        self.next_id += 1;
        self.tasks.push(task.clone());
        task
    }

    fn seed(&mut self) {
        for title in SEED_TITLES {
            self.push(title.to_string());
        }
    }
}

/// In-memory, process-lifetime collection of tasks.
///
/// The record list and the identity counter sit behind one lock, so identities stay
/// unique and increasing even when requests are served from several threads.
#[derive(Debug)]
pub struct TaskStore {
    inner: RwLock<TaskList>,
}

impl Default for TaskStore {
    fn default() -> Self {
        Self::new()
    }
}

impl TaskStore {
    /// Creates a store holding the three sample tasks with identities 1, 2 and 3.
    pub fn new() -> Self {
        let mut list = TaskList::empty();
        list.seed();
        Self {
            inner: RwLock::new(list),
        }
    }

    /// Creates a store with no tasks; the first created task gets identity 1.
    pub fn empty() -> Self {
        Self {
            inner: RwLock::new(TaskList::empty()),
        }
    }

    /// Returns a copy of every task in insertion order.
    pub fn list_all(&self) -> Vec<Task> {
        self.inner.read().tasks.clone()
    }

    pub fn get_by_id(&self, id: TaskId) -> Option<Task> {
        self.inner
            .read()
            .tasks
            .iter()
            .find(|task| task.id == id)
            .cloned()
    }

    /// Appends a new, not yet completed task. The title is stored as given.
    #[tracing::instrument(skip(self))]
    pub fn create(&self, title: String) -> Task {
        let task = self.inner.write().push(title);
        tracing::debug!(id = task.id, "Created task");
        task
    }

    /// Replaces the supplied fields of the task and refreshes its `updated_at`.
    /// Returns `None` when no task has the given identity.
    #[tracing::instrument(skip(self))]
    pub fn update(&self, id: TaskId, changes: TaskUpdate) -> Option<Task> {
        let mut list = self.inner.write();
        let task = list.tasks.iter_mut().find(|task| task.id == id)?;

        if let Some(title) = changes.title {
            task.title = title;
        }
        if let Some(completed) = changes.completed {
            task.completed = completed;
        }
        // Never earlier than the previous stamp, even if the wall clock steps back.
        task.updated_at = Utc::now().max(task.updated_at);

        Some(task.clone())
    }

    /// Removes the task with the given identity. Returns whether one was removed.
    #[tracing::instrument(skip(self))]
    pub fn delete(&self, id: TaskId) -> bool {
        let mut list = self.inner.write();
        let before = list.tasks.len();
        list.tasks.retain(|task| task.id != id);
        list.tasks.len() != before
    }

    /// Drops every task, restarts identities at 1 and re-seeds the sample tasks.
    #[tracing::instrument(skip(self))]
    pub fn reset(&self) {
        let mut list = self.inner.write();
        *list = TaskList::empty();
        list.seed();
    }

    pub fn len(&self) -> usize {
        self.inner.read().tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
