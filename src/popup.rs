/// Actions the finish banner can emit
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PopUpAction {
    Replay,
}

/// Finish banner shown over the field when a round ends
#[derive(Debug, Default, Clone)]
pub struct PopUp {
    message: Option<String>,
}

impl PopUp {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn show_with_text(&mut self, text: impl Into<String>) {
        self.message = Some(text.into());
    }

    pub fn hide(&mut self) {
        self.message = None;
    }

    pub fn is_visible(&self) -> bool {
        self.message.is_some()
    }

    pub fn message(&self) -> Option<&str> {
        self.message.as_deref()
    }

    /// The replay button: hides the banner. Pressing it while hidden does nothing.
    pub fn press_replay(&mut self) -> Option<PopUpAction> {
        if self.is_visible() {
            self.hide();
            Some(PopUpAction::Replay)
        } else {
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starts_hidden() {
        let popup = PopUp::new();
        assert!(!popup.is_visible());
        assert_eq!(popup.message(), None);
    }

    #[test]
    fn show_and_hide() {
        let mut popup = PopUp::new();
        popup.show_with_text("YOU WON");
        assert!(popup.is_visible());
        assert_eq!(popup.message(), Some("YOU WON"));

        popup.hide();
        assert!(!popup.is_visible());
    }

    #[test]
    fn replay_only_fires_while_visible() {
        let mut popup = PopUp::new();
        assert_eq!(popup.press_replay(), None);

        popup.show_with_text("YOU LOST");
        assert_eq!(popup.press_replay(), Some(PopUpAction::Replay));
        assert!(!popup.is_visible());
        assert_eq!(popup.press_replay(), None);
    }
}
