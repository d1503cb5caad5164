//! Typewriter session state and its reveal/blink loop

use tracing::debug;

use super::cancellation::SessionContext;

/// Where a session is in its lifecycle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Revealing,
    Blinking { toggles: u32 },
    Idle,
}

/// Reveal progress over one text
#[derive(Debug, Clone)]
pub struct TypewriterSession {
    chars: Vec<char>,
    index: usize,
    phase: Phase,
}

impl TypewriterSession {
    pub fn new(text: &str) -> Self {
        let chars: Vec<char> = text.chars().collect();
        let phase = if chars.is_empty() {
            Phase::Blinking { toggles: 0 }
        } else {
            Phase::Revealing
        };
        Self {
            chars,
            index: 0,
            phase,
        }
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn len(&self) -> usize {
        self.chars.len()
    }

    pub fn is_empty(&self) -> bool {
        self.chars.is_empty()
    }

    /// Reveal the next character.
    ///
    /// Returns the visible prefix and the character just revealed, or `None`
    /// once the whole text is shown (which moves the session to blinking).
    pub fn advance(&mut self) -> Option<(String, char)> {
        if self.phase != Phase::Revealing {
            return None;
        }
        let Some(&c) = self.chars.get(self.index) else {
            self.phase = Phase::Blinking { toggles: 0 };
            return None;
        };
        self.index += 1;
        let visible: String = self.chars[..self.index].iter().collect();
        if self.index == self.chars.len() {
            self.phase = Phase::Blinking { toggles: 0 };
        }
        Some((visible, c))
    }

    /// Record one cursor toggle. Returns the new cursor visibility, or
    /// `None` when the blink ceiling was already reached.
    pub fn toggle(&mut self, ceiling: u32) -> Option<bool> {
        match self.phase {
            Phase::Blinking { toggles } if toggles < ceiling => {
                let toggles = toggles + 1;
                self.phase = Phase::Blinking { toggles };
                // Odd toggles show the cursor
                Some(toggles % 2 == 1)
            }
            Phase::Blinking { .. } => {
                self.phase = Phase::Idle;
                None
            }
            _ => None,
        }
    }
}

/// Drive one session to completion. Returns early when superseded.
pub(crate) async fn run(ctx: SessionContext, text: String) {
    let mut session = TypewriterSession::new(&text);
    let config = ctx.config.clone();

    while let Some((visible, c)) = session.advance() {
        if !ctx.writer.set_text(&visible) {
            return;
        }

        let delay = config.delay_after(c);
        if config.roll_flash() {
            let flash = config.flash().min(delay);
            ctx.writer.set_cursor(true);
            if !ctx.sleep(flash).await {
                return;
            }
            if !ctx.writer.set_cursor(false) || !ctx.sleep(delay - flash).await {
                return;
            }
        } else if !ctx.sleep(delay).await {
            return;
        }
    }

    debug!(chars = session.len(), "Reveal complete, blinking");

    let interval = config.blink_interval();
    loop {
        if !ctx.sleep(interval).await {
            return;
        }
        match session.toggle(config.blink_toggles) {
            Some(visible) => {
                if !ctx.writer.set_cursor(visible) {
                    return;
                }
            }
            None => break,
        }
    }

    ctx.writer.set_cursor(false);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reveal_hi_in_three_ticks() {
        let mut session = TypewriterSession::new("Hi!");
        let mut shown = Vec::new();
        while let Some((visible, _)) = session.advance() {
            shown.push(visible);
        }
        assert_eq!(shown, vec!["H", "Hi", "Hi!"]);
        assert_eq!(session.phase(), Phase::Blinking { toggles: 0 });
    }

    #[test]
    fn test_reveal_counts_chars_not_bytes() {
        let mut session = TypewriterSession::new("你好");
        assert_eq!(session.advance().map(|(v, _)| v).as_deref(), Some("你"));
        assert_eq!(session.advance(), Some(("你好".to_string(), '好')));
        assert_eq!(session.advance(), None);
    }

    #[test]
    fn test_empty_text_starts_blinking() {
        let mut session = TypewriterSession::new("");
        assert!(session.is_empty());
        assert_eq!(session.advance(), None);
        assert_eq!(session.phase(), Phase::Blinking { toggles: 0 });
    }

    #[test]
    fn test_blink_ceiling() {
        let mut session = TypewriterSession::new("");
        let toggles: Vec<_> = std::iter::from_fn(|| session.toggle(4)).collect();
        assert_eq!(toggles, vec![true, false, true, false]);
        assert_eq!(session.phase(), Phase::Idle);
        assert_eq!(session.toggle(4), None);
    }

    #[test]
    fn test_toggle_ignored_while_revealing() {
        let mut session = TypewriterSession::new("ab");
        assert_eq!(session.toggle(120), None);
        assert_eq!(session.phase(), Phase::Revealing);
        assert_eq!(session.index(), 0);
    }
}
