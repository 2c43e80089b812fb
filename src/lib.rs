//! Mention extraction and notification rendering for course sites.
//!
//! Text written by users is scanned for `@handle` mentions which become
//! [`MentionEvent`]s. Stored notifications are rendered back into HTML
//! fragments linking to the comment that mentioned the recipient. A few
//! presentation helpers (flash messages, menu highlighting, markdown
//! cleaning, image URLs, video playback tokens) live alongside.

mod config;
mod content;
mod directory;
mod error;
mod fixtures;
pub mod flash;
mod image;
mod markdown;
pub mod mention;
pub mod menu;
mod model;
mod notification;
mod play_auth;
pub mod routes;
mod sink;

pub use config::{Command, Config};
pub use content::{ContentStore, CourseComment, CourseRef, VideoComment, VideoRef};
pub use directory::ActorDirectory;
pub use error::{ErrorResponse, NotifyError, record_error};
pub use fixtures::{CourseCommentRow, FixtureStore, VideoCommentRow, VideoRow};
pub use flash::{FlashBag, Level};
pub use image::image_url;
pub use markdown::{MarkdownRenderer, markdown_clean, markdown_to_html};
pub use mention::MentionExtractor;
pub use model::{
    Actor, ActorId, MentionCandidate, MentionContext, MentionEvent, NotificationRecord,
    ResolvedMention, SourceType,
};
pub use notification::{
    Link, NotificationRenderer, NotificationSource, PLACEHOLDER_HREF, RenderedNotification,
    notification_name,
};
pub use play_auth::{FALLBACK_PLAY_AUTH, PlayAuthClient, play_auth};
pub use routes::{LinkBuilder, RouteTable};
pub use sink::{ChannelSink, EventSink, RecordingSink};
