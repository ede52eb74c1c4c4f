use std::sync::mpsc::{self, Receiver, Sender};
use std::time::Duration;

use tracing::{debug, info};

use crate::audio::{Audio, Sound};
use crate::config::GameConfig;
use crate::field::{Field, ItemClick, ItemKind};
use crate::hud::Presenter;
use crate::session::{Countdown, Session, SessionState};

/// Why a session ended
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum_macros::Display)]
pub enum StopReason {
    Win,
    Lose,
    Cancel,
}

impl StopReason {
    /// Banner text for the finish popup
    pub fn message(&self) -> &'static str {
        match self {
            StopReason::Win => "YOU WON 👍🏼",
            StopReason::Lose => "YOU LOST 👎🏼",
            StopReason::Cancel => "Go For It Again? ☝🏼",
        }
    }

    pub fn sound(&self) -> Sound {
        match self {
            StopReason::Win => Sound::Win,
            StopReason::Lose => Sound::BugPull,
            StopReason::Cancel => Sound::Alert,
        }
    }
}

/// Session lifecycle controller.
///
/// Owns the field, the score and the countdown. Rendering and sound go
/// through the injected [`Presenter`] and [`Audio`]; stop events are
/// delivered to every [`Receiver`] handed out by [`Game::subscribe`].
pub struct Game<P: Presenter, A: Audio> {
    config: GameConfig,
    session: Session,
    timer: Option<Countdown>,
    field: Field,
    presenter: P,
    audio: A,
    listeners: Vec<Sender<StopReason>>,
}

impl<P: Presenter, A: Audio> Game<P, A> {
    pub fn new(config: GameConfig, presenter: P, audio: A) -> Self {
        let field = Field::new(config.carrot_count(), config.bug_count());
        Self::with_field(config, field, presenter, audio)
    }

    /// Same as [`Game::new`] but with reproducible item placement
    pub fn seeded(config: GameConfig, seed: u64, presenter: P, audio: A) -> Self {
        let field = Field::seeded(config.carrot_count(), config.bug_count(), seed);
        Self::with_field(config, field, presenter, audio)
    }

    fn with_field(config: GameConfig, field: Field, presenter: P, audio: A) -> Self {
        Self {
            config,
            session: Session::default(),
            timer: None,
            field,
            presenter,
            audio,
            listeners: Vec::new(),
        }
    }

    /// Register a session-stop listener
    pub fn subscribe(&mut self) -> Receiver<StopReason> {
        let (tx, rx) = mpsc::channel();
        self.listeners.push(tx);
        rx
    }

    pub fn state(&self) -> SessionState {
        self.session.state
    }

    pub fn is_running(&self) -> bool {
        self.session.is_running()
    }

    pub fn score(&self) -> u32 {
        self.session.score
    }

    pub fn remaining_secs(&self) -> u32 {
        self.session.remaining_secs
    }

    pub fn timer_active(&self) -> bool {
        self.timer.is_some()
    }

    pub fn field(&self) -> &Field {
        &self.field
    }

    /// Report the size of the field container, in cells. Until this is
    /// called items are scattered over [`crate::field::DEFAULT_SIZE`].
    pub fn resize_field(&mut self, width: u16, height: u16) {
        self.field.resize(width, height);
    }

    pub fn presenter(&self) -> &P {
        &self.presenter
    }

    pub fn audio_mut(&mut self) -> &mut A {
        &mut self.audio
    }

    pub fn start(&mut self) {
        if self.session.is_running() {
            debug!("start ignored: session already running");
            return;
        }

        self.session.score = 0;
        self.session.state = SessionState::Running;
        self.session.remaining_secs = self.config.duration_secs();

        self.field.init();
        self.presenter.update_score(self.config.carrot_count());
        self.presenter.show_stop_button();
        self.presenter.show_timer_and_score();
        self.presenter.update_timer(self.session.remaining_secs);
        self.timer = Some(Countdown::new());
        self.audio.play(Sound::Background);

        info!(
            duration_secs = self.config.duration_secs(),
            carrots = self.config.carrot_count(),
            bugs = self.config.bug_count(),
            "session started"
        );
    }

    pub fn stop(&mut self, reason: StopReason) {
        if !self.session.is_running() {
            debug!(%reason, "stop ignored: no session running");
            return;
        }

        self.session.state = SessionState::Idle;
        self.timer = None;
        self.field.clear();
        self.audio.stop(Sound::Background);
        self.presenter.show_play_button();

        info!(%reason, score = self.session.score, "session stopped");
        self.listeners.retain(|tx| tx.send(reason).is_ok());
    }

    /// The play/stop button
    pub fn toggle(&mut self) {
        if self.session.is_running() {
            self.stop(StopReason::Cancel);
        } else {
            self.start();
        }
    }

    /// Feed elapsed wall time into the countdown
    pub fn on_tick(&mut self, elapsed: Duration) {
        let fired = match self.timer.as_mut() {
            Some(timer) => timer.advance(elapsed),
            None => return,
        };
        for _ in 0..fired {
            if self.timer.is_none() {
                break;
            }
            self.tick_second();
        }
    }

    fn tick_second(&mut self) {
        self.session.remaining_secs = self.session.remaining_secs.saturating_sub(1);
        self.presenter.update_timer(self.session.remaining_secs);

        if self.session.remaining_secs == 0 {
            let reason = if self.session.score == self.config.carrot_count() {
                StopReason::Win
            } else {
                StopReason::Lose
            };
            self.stop(reason);
        }
    }

    /// Raw click on the field, in field-local cells
    pub fn click_at(&mut self, col: u16, row: u16) -> Option<ItemClick> {
        if !self.session.is_running() {
            return None;
        }
        let click = self.field.notify_click(col, row)?;
        self.on_item_clicked(click);
        Some(click)
    }

    pub fn on_item_clicked(&mut self, click: ItemClick) {
        if !self.session.is_running() {
            return;
        }

        match click.kind {
            ItemKind::Carrot => {
                if !self.field.remove(click.id) {
                    debug!(id = ?click.id, "carrot already pulled");
                    return;
                }
                self.audio.play(Sound::CarrotPull);
                self.session.score += 1;
                self.presenter
                    .update_score(self.config.carrot_count() - self.session.score);

                if self.session.score == self.config.carrot_count() {
                    self.stop(StopReason::Win);
                }
            }
            ItemKind::Bug => self.stop(StopReason::Lose),
        }
    }
}
