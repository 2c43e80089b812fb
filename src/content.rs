//! Content entities that notifications point back to.

use anyhow::Result;
use serde::{Deserialize, Serialize};

/// Course identity needed to build course links.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CourseRef {
    pub id: u64,
    pub slug: String,
}

/// Video identity together with its parent course.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VideoRef {
    pub id: u64,
    pub slug: String,
    pub course: CourseRef,
}

/// Comment left on a course page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CourseComment {
    pub id: u64,
    pub course: CourseRef,
}

/// Comment left under a video.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VideoComment {
    pub id: u64,
    pub video: VideoRef,
}

/// Loads comment entities by id, one method per source type.
///
/// `Ok(None)` means the entity no longer exists.
pub trait ContentStore: Send + Sync {
    fn course_comment(&self, id: u64) -> Result<Option<CourseComment>>;

    fn video_comment(&self, id: u64) -> Result<Option<VideoComment>>;
}
