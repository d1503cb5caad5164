//! Text surfaces the typewriter writes into

use parking_lot::Mutex;
use std::fmt;
use std::sync::Arc;

/// Identity of a text surface. Sessions are keyed by it.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TargetId(String);

impl TargetId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for TargetId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

impl fmt::Display for TargetId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A single-line text element with a cursor indicator
///
/// Implementations cannot fail; a surface that can't be drawn to should
/// log and drop the write.
pub trait TextTarget: Send + Sync {
    fn id(&self) -> TargetId;

    /// Replace the visible text
    fn set_text(&self, text: &str);

    fn set_cursor(&self, visible: bool);
}

/// Write access to a target for one session
///
/// Every target has a shared epoch that is bumped each time a new session
/// claims it. A writer only applies writes while its epoch is current, and
/// the check and the write happen under the same lock.
pub(crate) struct TargetWriter {
    target: Arc<dyn TextTarget>,
    epoch: Arc<Mutex<u64>>,
    mine: u64,
}

impl TargetWriter {
    pub(crate) fn new(target: Arc<dyn TextTarget>, epoch: Arc<Mutex<u64>>, mine: u64) -> Self {
        Self {
            target,
            epoch,
            mine,
        }
    }

    /// Apply `f` if this session still owns the target. Returns false when
    /// superseded.
    pub(crate) fn write(&self, f: impl FnOnce(&dyn TextTarget)) -> bool {
        let current = self.epoch.lock();
        if *current != self.mine {
            return false;
        }
        f(self.target.as_ref());
        true
    }

    pub(crate) fn set_text(&self, text: &str) -> bool {
        self.write(|t| t.set_text(text))
    }

    pub(crate) fn set_cursor(&self, visible: bool) -> bool {
        self.write(|t| t.set_cursor(visible))
    }
}
