use std::time::Duration;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    Idle,
    Running,
}

/// Per-round state owned by the game
#[derive(Debug, Clone)]
pub struct Session {
    pub state: SessionState,
    pub remaining_secs: u32,
    pub score: u32,
}

impl Default for Session {
    fn default() -> Self {
        Self {
            state: SessionState::Idle,
            remaining_secs: 0,
            score: 0,
        }
    }
}

impl Session {
    pub fn is_running(&self) -> bool {
        self.state == SessionState::Running
    }
}

/// Countdown handle. Elapsed time is fed in by the event loop and the
/// countdown fires once for each whole second that passes. Dropping it
/// cancels it.
#[derive(Debug, Default)]
pub struct Countdown {
    carry: Duration,
}

impl Countdown {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns how many second boundaries were crossed, saturating at
    /// `u32::MAX`
    pub fn advance(&mut self, elapsed: Duration) -> u32 {
        let total = self.carry.saturating_add(elapsed);
        self.carry = Duration::from_nanos(u64::from(total.subsec_nanos()));
        u32::try_from(total.as_secs()).unwrap_or(u32::MAX)
    }
}
