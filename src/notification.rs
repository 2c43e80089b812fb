//! Rendering of stored mention notifications into clickable fragments.

use maud::{Markup, PreEscaped, html};
use std::fmt;
use std::sync::Arc;

use crate::content::{ContentStore, CourseRef, VideoRef};
use crate::directory::ActorDirectory;
use crate::error::NotifyError;
use crate::model::{Actor, ActorId, NotificationRecord, SourceType};
use crate::routes::{COURSE_SHOW, LinkBuilder, VIDEO_SHOW};

/// Href of a link that goes nowhere.
pub const PLACEHOLDER_HREF: &str = "javascript:void(0)";

/// Target of a rendered notification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Link {
    Resolved(String),
    /// Source could not be resolved.
    Placeholder,
}

impl Link {
    pub fn href(&self) -> &str {
        match self {
            Self::Resolved(url) => url,
            Self::Placeholder => PLACEHOLDER_HREF,
        }
    }

    pub fn is_placeholder(&self) -> bool {
        matches!(self, Self::Placeholder)
    }
}

/// Source entity of a notification, carrying what its link needs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NotificationSource {
    CourseComment { course: CourseRef },
    VideoComment { video: VideoRef },
    /// Type tag this build does not know, kept for diagnostics.
    Unknown { from_type: String },
}

/// Rendered notification ready for the presentation layer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedNotification {
    pub id: String,
    pub recipient: ActorId,
    pub actor_name: String,
    pub link: Link,
    html: String,
}

impl RenderedNotification {
    /// HTML fragment, already escaped.
    pub fn html(&self) -> &str {
        &self.html
    }

    pub fn into_string(self) -> String {
        self.html
    }
}

impl fmt::Display for RenderedNotification {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.html)
    }
}

/// Renders mention notifications.
///
/// Holds the collaborators needed to resolve the acting actor, the source
/// entity, and the link to it. Rendering keeps no state between calls.
pub struct NotificationRenderer {
    directory: Arc<dyn ActorDirectory>,
    content: Arc<dyn ContentStore>,
    links: Arc<dyn LinkBuilder>,
}

impl NotificationRenderer {
    pub fn new(
        directory: Arc<dyn ActorDirectory>,
        content: Arc<dyn ContentStore>,
        links: Arc<dyn LinkBuilder>,
    ) -> Self {
        Self {
            directory,
            content,
            links,
        }
    }

    /// Renders a single notification.
    ///
    /// A source that is gone, of an unknown type, or whose lookup or link
    /// building fails is logged and rendered with the placeholder link.
    ///
    /// # Errors
    ///
    /// Returns [`NotifyError::ActorNotFound`] if the acting actor does not
    /// exist, [`NotifyError::MalformedPayload`] if the payload lacks the
    /// acting actor or source, and [`NotifyError::Lookup`] if the actor
    /// directory fails.
    pub fn render(&self, record: &NotificationRecord) -> Result<RenderedNotification, NotifyError> {
        let actor = self.acting_actor(record)?;

        let link = match self.link(record) {
            Ok(link) => link,
            Err(e @ NotifyError::MalformedPayload { .. }) => return Err(e),
            Err(e) => {
                tracing::warn!(
                    notification_id = %record.id,
                    recipient_id = record.notifiable_id,
                    source_type = record.from_type().unwrap_or_default(),
                    source_id = ?record.from_id().ok(),
                    error = %e,
                    "Notification source unresolved, using placeholder link"
                );
                Link::Placeholder
            }
        };

        let html = mention_markup(&link, &actor).into_string();

        Ok(RenderedNotification {
            id: record.id.clone(),
            recipient: record.notifiable_id,
            actor_name: actor.nick_name,
            link,
            html,
        })
    }

    /// Renders a batch of notifications, skipping the ones that fail.
    ///
    /// Each failure is logged with the notification and recipient ids and
    /// does not affect the remaining records.
    pub fn render_feed(&self, records: &[NotificationRecord]) -> Vec<RenderedNotification> {
        records
            .iter()
            .filter_map(|record| match self.render(record) {
                Ok(rendered) => Some(rendered),
                Err(e) => {
                    tracing::warn!(
                        notification_id = %record.id,
                        recipient_id = record.notifiable_id,
                        error = %e,
                        "Skipping notification"
                    );
                    None
                }
            })
            .collect()
    }

    /// Resolves the notification source and builds the link to it.
    ///
    /// # Errors
    ///
    /// Returns [`NotifyError::UnknownSourceType`] for unrecognized type tags,
    /// [`NotifyError::UnresolvedSource`] if the entity no longer exists,
    /// [`NotifyError::Lookup`] if the store or the route builder fails, and
    /// [`NotifyError::MalformedPayload`] for a missing type or id.
    pub fn link(&self, record: &NotificationRecord) -> Result<Link, NotifyError> {
        let url = match self.resolve_source(record)? {
            NotificationSource::CourseComment { course } => {
                let id = course.id.to_string();
                self.links.route(COURSE_SHOW, &[id.as_str(), course.slug.as_str()])
            }
            NotificationSource::VideoComment { video } => {
                let course_id = video.course.id.to_string();
                let id = video.id.to_string();
                self.links
                    .route(VIDEO_SHOW, &[course_id.as_str(), id.as_str(), video.slug.as_str()])
            }
            NotificationSource::Unknown { from_type } => {
                return Err(NotifyError::UnknownSourceType { from_type });
            }
        };

        url.map(Link::Resolved).map_err(NotifyError::Lookup)
    }

    /// Loads the entity a notification points at.
    ///
    /// # Errors
    ///
    /// Returns [`NotifyError::UnresolvedSource`] if the entity no longer
    /// exists, [`NotifyError::Lookup`] if the content store fails, and
    /// [`NotifyError::MalformedPayload`] for a missing type or id.
    pub fn resolve_source(
        &self,
        record: &NotificationRecord,
    ) -> Result<NotificationSource, NotifyError> {
        let from_type = record.from_type()?;
        let Ok(source_type) = from_type.parse::<SourceType>() else {
            return Ok(NotificationSource::Unknown {
                from_type: from_type.to_string(),
            });
        };
        let source_id = record.from_id()?;
        let unresolved = || NotifyError::UnresolvedSource {
            source_type,
            source_id,
        };

        match source_type {
            SourceType::CourseComment => {
                let comment = self
                    .content
                    .course_comment(source_id)
                    .map_err(NotifyError::Lookup)?
                    .ok_or_else(unresolved)?;
                Ok(NotificationSource::CourseComment {
                    course: comment.course,
                })
            }
            SourceType::VideoComment => {
                let comment = self
                    .content
                    .video_comment(source_id)
                    .map_err(NotifyError::Lookup)?
                    .ok_or_else(unresolved)?;
                Ok(NotificationSource::VideoComment {
                    video: comment.video,
                })
            }
        }
    }

    fn acting_actor(&self, record: &NotificationRecord) -> Result<Actor, NotifyError> {
        let actor_id = record.from_user_id()?;
        self.directory
            .find_by_id(actor_id)
            .map_err(NotifyError::Lookup)?
            .ok_or(NotifyError::ActorNotFound { actor_id })
    }
}

/// Builds the notification anchor.
fn mention_markup(link: &Link, actor: &Actor) -> Markup {
    html! {
        a href=(link.href()) {
            "user" (PreEscaped("&nbsp;")) b { (actor.nick_name) } (PreEscaped("&nbsp;")) "mentioned you."
        }
    }
}

/// Template name for a notification type path.
///
/// Takes the last segment of a `\` or `::` separated path and lower cases
/// it, so `App\Notifications\AtUserNotification` becomes `atusernotification`.
pub fn notification_name(type_path: &str) -> String {
    type_path
        .rsplit(['\\', ':'])
        .next()
        .unwrap_or(type_path)
        .to_lowercase()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn actor(name: &str) -> Actor {
        Actor {
            id: 1,
            nick_name: name.to_string(),
        }
    }

    #[test]
    fn test_markup_with_resolved_link() {
        // Arrange
        let link = Link::Resolved("/course/3/rust".to_string());

        // Act
        let html = mention_markup(&link, &actor("alice")).into_string();

        // Assert
        assert_eq!(
            html,
            r#"<a href="/course/3/rust">user&nbsp;<b>alice</b>&nbsp;mentioned you.</a>"#
        );
    }

    #[test]
    fn test_markup_with_placeholder() {
        let html = mention_markup(&Link::Placeholder, &actor("alice")).into_string();

        assert!(html.starts_with(r#"<a href="javascript:void(0)">"#));
    }

    #[test]
    fn test_markup_escapes_display_name() {
        let html = mention_markup(&Link::Placeholder, &actor("<script>x</script>")).into_string();

        assert!(!html.contains("<script>"));
        assert!(html.contains("&lt;script&gt;"));
    }

    #[test]
    fn test_link_href() {
        assert_eq!(Link::Placeholder.href(), PLACEHOLDER_HREF);
        assert_eq!(Link::Resolved("/x".to_string()).href(), "/x");
        assert!(Link::Placeholder.is_placeholder());
    }

    #[test]
    fn test_notification_name_backslash_path() {
        assert_eq!(
            notification_name(r"App\Notifications\AtUserNotification"),
            "atusernotification"
        );
    }

    #[test]
    fn test_notification_name_rust_path() {
        assert_eq!(
            notification_name("meedu_notify::notification::MentionNotice"),
            "mentionnotice"
        );
    }

    #[test]
    fn test_notification_name_plain() {
        assert_eq!(notification_name("Welcome"), "welcome");
    }
}
