//! Shared test utilities for integration tests.
//!
//! Provides a fixture store with a small course catalogue, fake
//! collaborators that fail on demand, and helpers for building
//! notification records and fixture files.

#![allow(dead_code)]

use anyhow::{Result, bail};
use meedu_notify::{
    Actor, ActorDirectory, ActorId, ContentStore, CourseComment, FixtureStore, LinkBuilder,
    NotificationRecord, VideoComment,
};
use serde_json::json;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

/// Actors alice (1), bob (2) and dave (4), one course with one video, and
/// a comment of each type. Video comment 8 points at a deleted video.
pub const FIXTURES: &str = r#"{
    "actors": [
        {"id": 1, "nick_name": "alice"},
        {"id": 2, "nick_name": "bob"},
        {"id": 4, "nick_name": "dave"}
    ],
    "courses": [{"id": 3, "slug": "rust-basics"}],
    "videos": [{"id": 17, "course_id": 3, "slug": "ownership"}],
    "course_comments": [{"id": 5, "course_id": 3}],
    "video_comments": [{"id": 6, "video_id": 17}, {"id": 8, "video_id": 99}],
    "notifications": [
        {"id": "n1", "notifiable_id": 2, "data": {"from_user_id": 1, "from_id": 5, "from_type": "CourseComment"}},
        {"id": "n2", "notifiable_id": 2, "data": {"from_user_id": 77, "from_id": 5, "from_type": "CourseComment"}},
        {"id": "n3", "notifiable_id": 2, "data": {"from_user_id": 4, "from_id": 6, "from_type": "VideoComment"}},
        {"id": "n4", "notifiable_id": 1, "data": {"from_user_id": 2, "from_id": 1, "from_type": "ArticleComment"}}
    ]
}"#;

/// Parses [`FIXTURES`] into a shared store.
pub fn store() -> Arc<FixtureStore> {
    Arc::new(FixtureStore::from_json(FIXTURES).expect("Fixtures should parse"))
}

/// Builds a notification record with the standard payload fields.
pub fn record(
    id: &str,
    recipient: ActorId,
    from_user: ActorId,
    from_id: u64,
    from_type: &str,
) -> NotificationRecord {
    let data = json!({
        "from_user_id": from_user,
        "from_id": from_id,
        "from_type": from_type,
    });

    NotificationRecord {
        id: id.to_string(),
        notifiable_id: recipient,
        data: data.as_object().cloned().unwrap_or_default(),
    }
}

/// Writes fixture JSON into `dir` and returns the file path.
///
/// # Errors
///
/// Returns error if the file cannot be written
pub fn write_fixtures(dir: &Path, content: &str) -> Result<PathBuf> {
    let path = dir.join("fixtures.json");
    std::fs::write(&path, content)?;
    Ok(path)
}

/// Directory that fails lookups for one handle and delegates the rest.
pub struct FlakyDirectory {
    pub inner: Arc<FixtureStore>,
    pub broken_handle: &'static str,
    pub lookups: AtomicUsize,
}

impl FlakyDirectory {
    pub fn new(inner: Arc<FixtureStore>, broken_handle: &'static str) -> Self {
        Self {
            inner,
            broken_handle,
            lookups: AtomicUsize::new(0),
        }
    }

    pub fn lookups(&self) -> usize {
        self.lookups.load(Ordering::SeqCst)
    }
}

impl ActorDirectory for FlakyDirectory {
    fn find_by_handle(&self, handle: &str) -> Result<Option<Actor>> {
        self.lookups.fetch_add(1, Ordering::SeqCst);
        if handle == self.broken_handle {
            bail!("directory timeout");
        }
        self.inner.find_by_handle(handle)
    }

    fn find_by_id(&self, id: ActorId) -> Result<Option<Actor>> {
        self.inner.find_by_id(id)
    }
}

/// Directory where several handles name the same actor.
pub struct AliasDirectory;

impl ActorDirectory for AliasDirectory {
    fn find_by_handle(&self, handle: &str) -> Result<Option<Actor>> {
        let actor = match handle.to_lowercase().as_str() {
            "alice" => Some(Actor {
                id: 1,
                nick_name: "alice".to_string(),
            }),
            _ => None,
        };
        Ok(actor)
    }

    fn find_by_id(&self, _id: ActorId) -> Result<Option<Actor>> {
        Ok(None)
    }
}

/// Content store whose backend is unavailable.
pub struct BrokenContentStore;

impl ContentStore for BrokenContentStore {
    fn course_comment(&self, _id: u64) -> Result<Option<CourseComment>> {
        bail!("connection refused")
    }

    fn video_comment(&self, _id: u64) -> Result<Option<VideoComment>> {
        bail!("connection refused")
    }
}

/// Link builder that knows no routes.
pub struct NoRoutes;

impl LinkBuilder for NoRoutes {
    fn route(&self, name: &str, _params: &[&str]) -> Result<String> {
        bail!("Route not defined: {}", name)
    }
}
