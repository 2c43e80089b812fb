//! In-memory store loaded from a JSON fixture file.
//!
//! Serves as actor directory and content store for the command line tool
//! and for tests. Comments reference their course or video by id, and a
//! comment whose parent is missing resolves to nothing, the same as a
//! deleted comment.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use crate::content::{ContentStore, CourseComment, CourseRef, VideoComment, VideoRef};
use crate::directory::ActorDirectory;
use crate::model::{Actor, ActorId, NotificationRecord};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VideoRow {
    pub id: u64,
    pub course_id: u64,
    pub slug: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CourseCommentRow {
    pub id: u64,
    pub course_id: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VideoCommentRow {
    pub id: u64,
    pub video_id: u64,
}

/// Tables of a fixture file.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct FixtureStore {
    pub actors: Vec<Actor>,
    pub courses: Vec<CourseRef>,
    pub videos: Vec<VideoRow>,
    pub course_comments: Vec<CourseCommentRow>,
    pub video_comments: Vec<VideoCommentRow>,
    pub notifications: Vec<NotificationRecord>,
}

impl FixtureStore {
    /// Reads fixtures from a JSON file.
    ///
    /// # Errors
    ///
    /// Returns error if the file cannot be read or is not valid fixture JSON.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let raw = fs::read_to_string(path)
            .with_context(|| format!("Failed to read fixtures: {}", path.display()))?;
        Self::from_json(&raw).with_context(|| format!("Invalid fixtures: {}", path.display()))
    }

    /// Parses fixtures from a JSON string.
    ///
    /// # Errors
    ///
    /// Returns error if the JSON does not describe fixture tables.
    pub fn from_json(raw: &str) -> Result<Self> {
        serde_json::from_str(raw).context("Failed to parse fixture JSON")
    }

    /// Notifications addressed to `recipient`, in stored order.
    pub fn notifications_for(&self, recipient: ActorId) -> Vec<NotificationRecord> {
        self.notifications
            .iter()
            .filter(|n| n.notifiable_id == recipient)
            .cloned()
            .collect()
    }

    fn course(&self, id: u64) -> Option<CourseRef> {
        self.courses.iter().find(|c| c.id == id).cloned()
    }

    fn video(&self, id: u64) -> Option<VideoRef> {
        let row = self.videos.iter().find(|v| v.id == id)?;
        Some(VideoRef {
            id: row.id,
            slug: row.slug.clone(),
            course: self.course(row.course_id)?,
        })
    }
}

impl ActorDirectory for FixtureStore {
    fn find_by_handle(&self, handle: &str) -> Result<Option<Actor>> {
        Ok(self.actors.iter().find(|a| a.nick_name == handle).cloned())
    }

    fn find_by_id(&self, id: ActorId) -> Result<Option<Actor>> {
        Ok(self.actors.iter().find(|a| a.id == id).cloned())
    }
}

impl ContentStore for FixtureStore {
    fn course_comment(&self, id: u64) -> Result<Option<CourseComment>> {
        let comment = self
            .course_comments
            .iter()
            .find(|c| c.id == id)
            .and_then(|row| {
                Some(CourseComment {
                    id: row.id,
                    course: self.course(row.course_id)?,
                })
            });
        Ok(comment)
    }

    fn video_comment(&self, id: u64) -> Result<Option<VideoComment>> {
        let comment = self
            .video_comments
            .iter()
            .find(|c| c.id == id)
            .and_then(|row| {
                Some(VideoComment {
                    id: row.id,
                    video: self.video(row.video_id)?,
                })
            });
        Ok(comment)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const FIXTURES: &str = r#"{
        "actors": [{"id": 1, "nick_name": "alice"}, {"id": 2, "nick_name": "bob"}],
        "courses": [{"id": 3, "slug": "rust-basics"}],
        "videos": [{"id": 17, "course_id": 3, "slug": "ownership"}, {"id": 18, "course_id": 99, "slug": "orphan"}],
        "course_comments": [{"id": 5, "course_id": 3}],
        "video_comments": [{"id": 6, "video_id": 17}, {"id": 7, "video_id": 18}],
        "notifications": [
            {"id": "a", "notifiable_id": 2, "data": {"from_user_id": 1, "from_id": 5, "from_type": "CourseComment"}},
            {"id": "b", "notifiable_id": 1, "data": {"from_user_id": 2, "from_id": 6, "from_type": "VideoComment"}}
        ]
    }"#;

    #[test]
    fn test_find_by_handle_exact() {
        // Arrange
        let store = FixtureStore::from_json(FIXTURES).expect("Should parse");

        // Act
        let found = store.find_by_handle("alice").unwrap();
        let missing = store.find_by_handle("Alice").unwrap();

        // Assert
        assert_eq!(found.map(|a| a.id), Some(1));
        assert!(missing.is_none(), "Handle lookup should be exact");
    }

    #[test]
    fn test_find_by_id() {
        let store = FixtureStore::from_json(FIXTURES).unwrap();

        assert_eq!(store.find_by_id(2).unwrap().unwrap().nick_name, "bob");
        assert!(store.find_by_id(42).unwrap().is_none());
    }

    #[test]
    fn test_course_comment_resolves_course() {
        let store = FixtureStore::from_json(FIXTURES).unwrap();

        let comment = store.course_comment(5).unwrap().expect("Comment exists");

        assert_eq!(comment.course.id, 3);
        assert_eq!(comment.course.slug, "rust-basics");
    }

    #[test]
    fn test_video_comment_resolves_video_and_course() {
        let store = FixtureStore::from_json(FIXTURES).unwrap();

        let comment = store.video_comment(6).unwrap().expect("Comment exists");

        assert_eq!(comment.video.id, 17);
        assert_eq!(comment.video.slug, "ownership");
        assert_eq!(comment.video.course.id, 3);
    }

    #[test]
    fn test_comment_with_missing_parent_is_absent() {
        let store = FixtureStore::from_json(FIXTURES).unwrap();

        assert!(store.video_comment(7).unwrap().is_none());
        assert!(store.course_comment(404).unwrap().is_none());
    }

    #[test]
    fn test_notifications_for_recipient() {
        let store = FixtureStore::from_json(FIXTURES).unwrap();

        let notifications = store.notifications_for(2);

        assert_eq!(notifications.len(), 1);
        assert_eq!(notifications[0].id, "a");
    }

    #[test]
    fn test_missing_tables_default_to_empty() {
        let store = FixtureStore::from_json(r#"{"actors": []}"#).unwrap();

        assert!(store.notifications.is_empty());
        assert!(store.courses.is_empty());
    }

    #[test]
    fn test_invalid_json_rejected() {
        assert!(FixtureStore::from_json("{not json").is_err());
    }
}
