//! Cancellation support for typewriter sessions
//!
//! Each session owns a token; superseding a session cancels it and aborts
//! the task, which drops every pending timer.

use std::sync::Arc;
use std::time::Duration;

use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;

use super::target::TargetWriter;
use super::timing::TypewriterConfig;

/// What a session is doing with its target
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionKind {
    Loading,
    Typing,
}

/// Registry-side handle to a running session
pub(crate) struct SessionHandle {
    pub(crate) id: u64,
    pub(crate) kind: SessionKind,
    token: CancellationToken,
    /// Cancelled when the session task ends, however it ends
    done: CancellationToken,
    task: JoinHandle<()>,
}

impl SessionHandle {
    pub(crate) fn new(
        id: u64,
        kind: SessionKind,
        token: CancellationToken,
        done: CancellationToken,
        task: JoinHandle<()>,
    ) -> Self {
        Self {
            id,
            kind,
            token,
            done,
            task,
        }
    }

    /// Stop the session and drop its timers
    pub(crate) fn cancel(self) {
        self.token.cancel();
        self.task.abort();
    }

    pub(crate) fn done_token(&self) -> CancellationToken {
        self.done.clone()
    }
}

/// Session-side view: the target writer, timing and the cancel token
pub(crate) struct SessionContext {
    pub(crate) writer: TargetWriter,
    pub(crate) config: Arc<TypewriterConfig>,
    token: CancellationToken,
}

impl SessionContext {
    pub(crate) fn new(
        writer: TargetWriter,
        config: Arc<TypewriterConfig>,
        token: CancellationToken,
    ) -> Self {
        Self {
            writer,
            config,
            token,
        }
    }

    /// Sleep unless cancelled first. Returns false on cancellation.
    pub(crate) async fn sleep(&self, duration: Duration) -> bool {
        if duration.is_zero() {
            return !self.token.is_cancelled();
        }
        tokio::select! {
            _ = self.token.cancelled() => false,
            _ = tokio::time::sleep(duration) => true,
        }
    }
}
