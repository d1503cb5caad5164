//! Loading placeholder with a cycling ellipsis

use std::time::Duration;

use super::cancellation::SessionContext;

/// Longest ellipsis before wrapping back to none
const MAX_DOTS: usize = 3;

pub(crate) fn frame(label: &str, dots: usize) -> String {
    format!("{}{}", label, ".".repeat(dots % (MAX_DOTS + 1)))
}

/// Cycle `label`, `label.`, `label..`, `label...` until superseded
pub(crate) async fn run(ctx: SessionContext, label: String, interval: Duration) {
    let interval = interval.max(Duration::from_millis(1));
    let mut dots = 0;
    loop {
        if !ctx.writer.set_text(&frame(&label, dots)) {
            return;
        }
        if !ctx.sleep(interval).await {
            return;
        }
        dots = (dots + 1) % (MAX_DOTS + 1);
    }
}
