//! Playback authorization for videos hosted on a third party platform.

use anyhow::{Context, Result};

use crate::error::record_error;

/// Token returned when the platform cannot be reached.
pub const FALLBACK_PLAY_AUTH: &str = "";

/// Exchanges a hosted video id for a short lived playback token.
///
/// Implementations perform the signed platform request.
pub trait PlayAuthClient: Send + Sync {
    fn play_auth(&self, video_id: &str) -> Result<String>;
}

/// Returns the playback token for `video_id`.
///
/// Any failure is recorded and yields [`FALLBACK_PLAY_AUTH`], so a page can
/// still render without the player.
pub fn play_auth(client: &dyn PlayAuthClient, video_id: &str) -> String {
    let result = if video_id.is_empty() {
        Err(anyhow::anyhow!("Video has no hosted id"))
    } else {
        client
            .play_auth(video_id)
            .with_context(|| format!("Failed to fetch play auth for video {}", video_id))
    };

    match result {
        Ok(token) => token,
        Err(e) => {
            record_error(&e);
            FALLBACK_PLAY_AUTH.to_string()
        }
    }
}
