//! Actor lookup used by both pipelines.

use anyhow::Result;

use crate::model::{Actor, ActorId};

/// Directory of known actors.
///
/// Lookups return `Ok(None)` when no actor matches. `Err` is reserved for
/// failures of the backing store itself.
pub trait ActorDirectory: Send + Sync {
    /// Finds the actor whose handle equals `handle` exactly.
    fn find_by_handle(&self, handle: &str) -> Result<Option<Actor>>;

    /// Finds an actor by identifier.
    fn find_by_id(&self, id: ActorId) -> Result<Option<Actor>>;
}
