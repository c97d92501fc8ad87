/// A status message with an optional expiry on the race clock.
#[derive(Debug, Clone, PartialEq)]
pub struct Message {
    pub text: String,
    pub expires_at: Option<f64>,
}

/// Holds at most one message; showing a new one replaces the old.
#[derive(Debug, Clone, Default)]
pub struct MessageBoard {
    current: Option<Message>,
}

impl MessageBoard {
    pub fn new() -> Self {
        Self::default()
    }

    /// Show `text` for `duration` seconds, or until replaced when `None`.
    pub fn show(&mut self, text: impl Into<String>, duration: Option<f64>, now: f64) {
        let text = text.into();
        if self.text() != Some(text.as_str()) {
            tracing::debug!(%text, "message");
        }
        self.current = Some(Message {
            text,
            expires_at: duration.map(|d| now + d),
        });
    }

    /// Drop the current message once it has expired.
    pub fn tick(&mut self, now: f64) {
        let expires_at = self.current.as_ref().and_then(|m| m.expires_at);
        if expires_at.is_some_and(|at| now >= at) {
            self.current = None;
        }
    }

    pub fn dismiss(&mut self) {
        self.current = None;
    }

    pub fn current(&self) -> Option<&Message> {
        self.current.as_ref()
    }

    pub fn text(&self) -> Option<&str> {
        self.current.as_ref().map(|m| m.text.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn timed_message_expires() {
        let mut board = MessageBoard::new();
        board.show("hello", Some(2.0), 1.0);
        board.tick(2.9);
        assert_eq!(board.text(), Some("hello"));
        board.tick(3.0);
        assert_eq!(board.text(), None);
    }

    #[test]
    fn persistent_message_stays() {
        let mut board = MessageBoard::new();
        board.show("rules", None, 0.0);
        board.tick(1e6);
        assert_eq!(board.text(), Some("rules"));
        board.dismiss();
        assert!(board.current().is_none());
    }

    #[test]
    fn reshow_extends_expiry() {
        let mut board = MessageBoard::new();
        board.show("near", Some(5.0), 0.0);
        board.show("near", Some(5.0), 4.0);
        board.tick(6.0);
        assert_eq!(board.text(), Some("near"));
        assert_eq!(board.current().unwrap().expires_at, Some(9.0));
    }

    #[test]
    fn new_message_replaces_old() {
        let mut board = MessageBoard::new();
        board.show("first", None, 0.0);
        board.show("second", Some(1.0), 0.0);
        assert_eq!(board.text(), Some("second"));
    }
}
