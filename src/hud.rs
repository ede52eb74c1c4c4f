/// Presentation capability the game drives. The game never touches a
/// rendering surface directly.
pub trait Presenter {
    fn show_timer_and_score(&mut self);
    fn update_timer(&mut self, remaining_secs: u32);
    fn update_score(&mut self, carrots_left: u32);
    fn show_stop_button(&mut self);
    fn show_play_button(&mut self);
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ButtonIcon {
    Play,
    Stop,
}

impl ButtonIcon {
    pub fn symbol(&self) -> &'static str {
        match self {
            ButtonIcon::Play => "▶",
            ButtonIcon::Stop => "■",
        }
    }
}

/// Timer text as `minutes : seconds`
pub fn format_timer(remaining_secs: u32) -> String {
    format!("{} : {}", remaining_secs / 60, remaining_secs % 60)
}

/// Heads-up display state rendered by the terminal UI
#[derive(Debug, Clone, PartialEq)]
pub struct Hud {
    pub timer_text: String,
    pub score_text: String,
    pub visible: bool,
    pub button: ButtonIcon,
}

impl Default for Hud {
    fn default() -> Self {
        Self {
            timer_text: String::new(),
            score_text: String::new(),
            visible: false,
            button: ButtonIcon::Play,
        }
    }
}

impl Presenter for Hud {
    fn show_timer_and_score(&mut self) {
        self.visible = true;
    }

    fn update_timer(&mut self, remaining_secs: u32) {
        self.timer_text = format_timer(remaining_secs);
    }

    fn update_score(&mut self, carrots_left: u32) {
        self.score_text = carrots_left.to_string();
    }

    fn show_stop_button(&mut self) {
        self.button = ButtonIcon::Stop;
    }

    fn show_play_button(&mut self) {
        self.button = ButtonIcon::Play;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn timer_format() {
        assert_eq!(format_timer(5), "0 : 5");
        assert_eq!(format_timer(60), "1 : 0");
        assert_eq!(format_timer(135), "2 : 15");
        assert_eq!(format_timer(0), "0 : 0");
    }

    #[test]
    fn hud_starts_hidden_with_play_button() {
        let hud = Hud::default();
        assert!(!hud.visible);
        assert_eq!(hud.button, ButtonIcon::Play);
    }

    #[test]
    fn hud_tracks_presenter_calls() {
        let mut hud = Hud::default();
        hud.show_timer_and_score();
        hud.update_timer(7);
        hud.update_score(2);
        hud.show_stop_button();

        assert!(hud.visible);
        assert_eq!(hud.timer_text, "0 : 7");
        assert_eq!(hud.score_text, "2");
        assert_eq!(hud.button.symbol(), "■");

        hud.show_play_button();
        assert_eq!(hud.button, ButtonIcon::Play);
    }
}
