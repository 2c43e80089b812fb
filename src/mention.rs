//! Detection of `@handle` mentions in user written text.
//!
//! A mention is an `@` preceded by whitespace and followed by a run of
//! non-whitespace characters and then whitespace again. Matches do not
//! overlap: the whitespace closing one mention cannot open the next, so in
//! `"hi @alice @bob ok"` only `alice` is found. A handle at the very start or
//! end of the text, or followed directly by punctuation without a space, is
//! not a mention either. Existing content relies on this behavior.

use regex::Regex;
use std::collections::HashSet;
use std::sync::{Arc, LazyLock};

use crate::directory::ActorDirectory;
use crate::model::{MentionCandidate, MentionContext, MentionEvent, ResolvedMention};
use crate::sink::EventSink;

static MENTION_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s@(\S+)\s").expect("mention pattern is valid"));

/// Finds every mention candidate in `text`, in order of appearance.
pub fn candidates(text: &str) -> Vec<MentionCandidate> {
    MENTION_PATTERN
        .captures_iter(text)
        .filter_map(|caps| caps.get(1))
        .map(|handle| MentionCandidate {
            handle: handle.as_str().to_string(),
            offset: handle.start(),
        })
        .collect()
}

/// Returns distinct handles in order of first appearance.
pub fn unique_handles(text: &str) -> Vec<String> {
    let mut seen = HashSet::new();
    candidates(text)
        .into_iter()
        .filter(|candidate| seen.insert(candidate.handle.clone()))
        .map(|candidate| candidate.handle)
        .collect()
}

/// Turns mentions in text into events for the mentioned actors.
pub struct MentionExtractor {
    directory: Arc<dyn ActorDirectory>,
    sink: Arc<dyn EventSink>,
}

impl MentionExtractor {
    pub fn new(directory: Arc<dyn ActorDirectory>, sink: Arc<dyn EventSink>) -> Self {
        Self { directory, sink }
    }

    /// Resolves mentions in `text` and publishes one event per mentioned actor.
    ///
    /// Handles that match no actor are dropped, as are handles whose lookup
    /// fails. Repeated handles, and distinct handles resolving to the same
    /// actor, produce a single event. Events are published in order of first
    /// appearance. Text without mentions publishes nothing.
    ///
    /// # Arguments
    ///
    /// * `text`: Content to scan
    /// * `context`: Author and source of the content
    ///
    /// # Returns
    ///
    /// Resolved mentions, one per published event
    pub fn extract(&self, text: &str, context: &MentionContext) -> Vec<ResolvedMention> {
        let mut targets = HashSet::new();
        let mut resolved = Vec::new();

        for handle in unique_handles(text) {
            let actor = match self.directory.find_by_handle(&handle) {
                Ok(Some(actor)) => actor,
                Ok(None) => {
                    tracing::debug!(handle = %handle, "Mention matches no actor");
                    continue;
                }
                Err(e) => {
                    tracing::warn!(handle = %handle, error = %e, "Actor lookup failed, skipping mention");
                    continue;
                }
            };

            if !targets.insert(actor.id) {
                continue;
            }

            self.sink.publish(MentionEvent::new(context, actor.id));
            resolved.push(ResolvedMention {
                handle,
                target: actor.id,
            });
        }

        resolved
    }
}
