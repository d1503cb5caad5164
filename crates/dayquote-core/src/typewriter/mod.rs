//! Typewriter renderer
//!
//! Types text into a [`TextTarget`] one character at a time, then blinks the
//! cursor for a fixed number of toggles. Each target holds at most one live
//! session; starting another one on the same target cancels the previous
//! session (and all its timers) before the target is touched.
//!
//! Sessions run as tokio tasks, so [`Typewriter::render`] and
//! [`Typewriter::show_loading`] must be called from within a runtime.

mod cancellation;
mod placeholder;
mod session;
mod target;
mod timing;

pub use cancellation::SessionKind;
pub use session::{Phase, TypewriterSession};
pub use target::{TargetId, TextTarget};
pub use timing::{CharClass, TypewriterConfig};

use std::collections::HashMap;
use std::future::Future;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;

use parking_lot::Mutex;
use tokio_util::sync::CancellationToken;
use tracing::debug;

use cancellation::{SessionContext, SessionHandle};
use target::TargetWriter;

#[derive(Default)]
struct Slot {
    /// Bumped every time a new session claims the target
    epoch: Arc<Mutex<u64>>,
    session: Option<SessionHandle>,
}

type Slots = Arc<Mutex<HashMap<TargetId, Slot>>>;

/// Registry of typewriter sessions, one per target
#[derive(Clone)]
pub struct Typewriter {
    config: Arc<TypewriterConfig>,
    slots: Slots,
    next_session: Arc<AtomicU64>,
}

impl Typewriter {
    pub fn new(config: TypewriterConfig) -> Self {
        Self {
            config: Arc::new(config),
            slots: Arc::new(Mutex::new(HashMap::new())),
            next_session: Arc::new(AtomicU64::new(1)),
        }
    }

    pub fn config(&self) -> &TypewriterConfig {
        &self.config
    }

    /// Type `text` into `target`, replacing whatever session it had.
    ///
    /// Returns immediately; the reveal runs in the background.
    pub fn render(&self, target: Arc<dyn TextTarget>, text: &str) {
        let text = text.to_string();
        self.start(target, SessionKind::Typing, move |ctx| session::run(ctx, text));
    }

    /// Show `label` with a cycling ellipsis until the next session starts
    pub fn show_loading(&self, target: Arc<dyn TextTarget>, label: &str, interval: Duration) {
        let label = label.to_string();
        self.start(target, SessionKind::Loading, move |ctx| {
            placeholder::run(ctx, label, interval)
        });
    }

    /// Cancel the current session and show static text
    pub fn show_message(&self, target: Arc<dyn TextTarget>, text: &str) {
        let mut slots = self.slots.lock();
        let writer = self.claim(&mut slots, &target);
        writer.set_text(text);
    }

    /// Cancel the current session on `id`, leaving the target as it is
    pub fn stop(&self, id: &TargetId) {
        let mut slots = self.slots.lock();
        if let Some(slot) = slots.get_mut(id) {
            *slot.epoch.lock() += 1;
            if let Some(previous) = slot.session.take() {
                debug!(target = %id, session = previous.id, "Stopping session");
                previous.cancel();
            }
        }
    }

    /// Cancel every session
    pub fn shutdown(&self) {
        let mut slots = self.slots.lock();
        for (id, slot) in slots.iter_mut() {
            *slot.epoch.lock() += 1;
            if let Some(previous) = slot.session.take() {
                debug!(target = %id, session = previous.id, "Shutting down session");
                previous.cancel();
            }
        }
    }

    /// Kind of the live session on `id`, if any
    pub fn active(&self, id: &TargetId) -> Option<SessionKind> {
        self.slots
            .lock()
            .get(id)
            .and_then(|slot| slot.session.as_ref())
            .map(|session| session.kind)
    }

    pub fn active_count(&self) -> usize {
        self.slots
            .lock()
            .values()
            .filter(|slot| slot.session.is_some())
            .count()
    }

    /// Wait until `id` has no live session.
    ///
    /// Follows replacements: if the session is superseded while waiting,
    /// this waits for the newer one too.
    pub async fn finished(&self, id: &TargetId) {
        loop {
            let done = {
                let slots = self.slots.lock();
                match slots.get(id).and_then(|slot| slot.session.as_ref()) {
                    Some(session) => session.done_token(),
                    None => return,
                }
            };
            done.cancelled().await;
        }
    }

    /// Cancel any previous session on the target, bump its epoch and clear
    /// it. Returns a writer bound to the new epoch.
    fn claim(
        &self,
        slots: &mut HashMap<TargetId, Slot>,
        target: &Arc<dyn TextTarget>,
    ) -> TargetWriter {
        let id = target.id();
        let slot = slots.entry(id.clone()).or_default();

        if let Some(previous) = slot.session.take() {
            debug!(target = %id, session = previous.id, kind = ?previous.kind, "Cancelling superseded session");
            previous.cancel();
        }

        let mut epoch = slot.epoch.lock();
        *epoch += 1;
        target.set_text("");
        target.set_cursor(false);
        let writer = TargetWriter::new(target.clone(), slot.epoch.clone(), *epoch);
        drop(epoch);

        writer
    }

    fn start<F, Fut>(&self, target: Arc<dyn TextTarget>, kind: SessionKind, body: F)
    where
        F: FnOnce(SessionContext) -> Fut,
        Fut: Future<Output = ()> + Send + 'static,
    {
        let id = target.id();
        let session_id = self.next_session.fetch_add(1, Ordering::Relaxed);
        let token = CancellationToken::new();
        let done = CancellationToken::new();

        // Hold the registry lock from claim to insert so a concurrent render
        // on the same target always sees this session's handle.
        let mut slots = self.slots.lock();
        let writer = self.claim(&mut slots, &target);
        let ctx = SessionContext::new(writer, self.config.clone(), token.clone());
        let future = body(ctx);

        let registry = self.slots.clone();
        let done_guard = done.clone().drop_guard();
        let task_id = id.clone();
        let task = tokio::spawn(async move {
            // Fires `done` even when the task is aborted
            let _done = done_guard;
            future.await;
            release(&registry, &task_id, session_id);
            debug!(target = %task_id, session = session_id, "Session finished");
        });

        debug!(target = %id, session = session_id, kind = ?kind, "Session started");
        if let Some(slot) = slots.get_mut(&id) {
            slot.session = Some(SessionHandle::new(session_id, kind, token, done, task));
        }
    }
}

impl Default for Typewriter {
    fn default() -> Self {
        Self::new(TypewriterConfig::default())
    }
}

/// Drop a finished session from the registry if it is still the current one
fn release(slots: &Slots, id: &TargetId, session_id: u64) {
    let mut slots = slots.lock();
    if let Some(slot) = slots.get_mut(id) {
        if slot.session.as_ref().is_some_and(|s| s.id == session_id) {
            slot.session = None;
        }
    }
}

#[cfg(test)]
pub(crate) mod testing {
    use super::*;

    #[derive(Debug, Clone, PartialEq, Eq)]
    pub enum Write {
        Text(String),
        Cursor(bool),
    }

    /// Target that records every write
    pub struct RecordingTarget {
        id: TargetId,
        writes: Mutex<Vec<Write>>,
    }

    impl RecordingTarget {
        pub fn new(id: &str) -> Arc<Self> {
            Arc::new(Self {
                id: TargetId::new(id),
                writes: Mutex::new(Vec::new()),
            })
        }

        pub fn writes(&self) -> Vec<Write> {
            self.writes.lock().clone()
        }

        pub fn texts(&self) -> Vec<String> {
            self.writes()
                .into_iter()
                .filter_map(|w| match w {
                    Write::Text(t) => Some(t),
                    Write::Cursor(_) => None,
                })
                .collect()
        }

        pub fn last_text(&self) -> Option<String> {
            self.texts().pop()
        }
    }

    impl TextTarget for RecordingTarget {
        fn id(&self) -> TargetId {
            self.id.clone()
        }

        fn set_text(&self, text: &str) {
            self.writes.lock().push(Write::Text(text.to_string()));
        }

        fn set_cursor(&self, visible: bool) {
            self.writes.lock().push(Write::Cursor(visible));
        }
    }

    pub fn quick_config() -> TypewriterConfig {
        TypewriterConfig {
            flash_chance: 0.0,
            blink_toggles: 6,
            ..Default::default()
        }
    }
}
