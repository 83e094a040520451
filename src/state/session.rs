use crate::state::challenge::ChallengeConfig;

/// Countdown firings that make up one coarse second.
pub const FINE_TICKS_PER_SECOND: u32 = 5;
/// Highest level a player can reach; higher assignments are ignored.
pub const MAX_LEVEL: u8 = 5;
/// Score needed per level.
pub const POINTS_PER_LEVEL: u32 = 50;

/// Editor contents a fresh session starts from.
pub const START_CODE: &str = "<html>\n  <head>\n    <style type=\"text/css\">\n       body {\n          padding: 0;\n          margin: 0;\n       }\n    </style>\n  </head>\n  <body>\n\n  </body>\n</html>";

/// Parameters supplied when a player starts a session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionSetup {
    /// Display name of the player.
    pub user_name: String,
    /// Configured duration of the countdown, in seconds.
    pub total_seconds: u32,
}

/// Result of a single countdown firing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Firing {
    /// The progress ticker advanced. `second_elapsed` is set when the fine
    /// tick rolled over and a coarse second was consumed.
    Ticked {
        /// Whether `remaining_seconds` changed during this firing.
        second_elapsed: bool,
    },
    /// The progress ticker was already exhausted: score and level were reset
    /// and the countdown must stop.
    Expired,
}

/// Observable state of one coding session.
///
/// This type only models in-memory transitions; mirroring into the store and
/// scheduling the countdown are handled by
/// [`SessionEngine`](crate::state::engine::SessionEngine).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionState {
    running: bool,
    finished: bool,
    user_name: String,
    remaining_seconds: u32,
    full_time: u32,
    level: u8,
    code: String,
    score: u32,
    challenge: ChallengeConfig,
    fine_tick: u32,
    progress_ticker: u32,
}

impl SessionState {
    /// Idle state: nothing running, `finished` set, default code.
    pub fn new(challenge: ChallengeConfig) -> Self {
        Self {
            running: false,
            finished: true,
            user_name: String::new(),
            remaining_seconds: 0,
            full_time: 0,
            level: 0,
            code: START_CODE.to_string(),
            score: 0,
            challenge,
            fine_tick: FINE_TICKS_PER_SECOND,
            progress_ticker: 0,
        }
    }

    /// Whether a session was started and not yet disposed.
    pub fn running(&self) -> bool {
        self.running
    }

    /// Whether no session is active.
    pub fn finished(&self) -> bool {
        self.finished
    }

    /// Display name of the player.
    pub fn user_name(&self) -> &str {
        &self.user_name
    }

    /// Coarse countdown, in seconds.
    pub fn remaining_seconds(&self) -> u32 {
        self.remaining_seconds
    }

    /// Configured session duration, in seconds.
    pub fn full_time(&self) -> u32 {
        self.full_time
    }

    /// Current level in `0..=MAX_LEVEL`.
    pub fn level(&self) -> u8 {
        self.level
    }

    /// Current editor contents.
    pub fn code(&self) -> &str {
        &self.code
    }

    /// Current score.
    pub fn score(&self) -> u32 {
        self.score
    }

    /// Selected challenge.
    pub fn challenge(&self) -> &ChallengeConfig {
        &self.challenge
    }

    /// Firings left before the next coarse second elapses.
    pub fn fine_tick(&self) -> u32 {
        self.fine_tick
    }

    /// Firings left before the countdown expires.
    pub fn progress_ticker(&self) -> u32 {
        self.progress_ticker
    }

    /// Assign the level unless it exceeds [`MAX_LEVEL`]. Returns whether the
    /// assignment was accepted.
    pub(crate) fn set_level(&mut self, level: u32) -> bool {
        match u8::try_from(level) {
            Ok(level) if level <= MAX_LEVEL => {
                self.level = level;
                true
            }
            _ => false,
        }
    }

    /// Record a new score and derive the level from it. Returns whether the
    /// derived level was accepted.
    pub(crate) fn set_score(&mut self, score: u32) -> bool {
        self.score = score;
        self.set_level(score / POINTS_PER_LEVEL)
    }

    pub(crate) fn set_challenge(&mut self, challenge: ChallengeConfig) {
        self.challenge = challenge;
    }

    pub(crate) fn set_code(&mut self, code: String) {
        self.code = code;
    }

    /// Enter a running session. The clock stays at zero until the first
    /// replenish so the countdown does not move before the player engages.
    pub(crate) fn begin(&mut self, setup: SessionSetup) {
        self.running = true;
        self.finished = false;
        self.user_name = setup.user_name;
        self.remaining_seconds = 0;
        self.full_time = setup.total_seconds;
        self.score = 0;
        self.level = 0;
        self.rearm_from_remaining();
    }

    /// Restore fields read back from the store.
    pub(crate) fn restore(&mut self, restored: RestoredFields) {
        self.running = restored.running;
        self.finished = restored.finished;
        self.user_name = restored.user_name;
        self.remaining_seconds = restored.remaining_seconds;
        // The configured duration is not persisted; what was left at reload
        // becomes the refill target for later updates.
        self.full_time = restored.remaining_seconds;
        self.code = restored.code;
        self.score = restored.score;
        self.rearm_from_remaining();
    }

    /// Refill the countdown to the configured duration.
    pub(crate) fn replenish(&mut self) {
        self.remaining_seconds = self.full_time;
        self.progress_ticker = self.full_time.saturating_mul(FINE_TICKS_PER_SECOND);
        self.fine_tick = FINE_TICKS_PER_SECOND;
    }

    /// Apply one countdown firing.
    pub(crate) fn fire(&mut self) -> Firing {
        if self.progress_ticker == 0 {
            self.score = 0;
            self.level = 0;
            return Firing::Expired;
        }

        self.progress_ticker -= 1;
        Firing::Ticked {
            second_elapsed: self.fine_tick_step(),
        }
    }

    /// Return to idle defaults. Level and challenge are preferences and stay.
    pub(crate) fn reset_to_idle(&mut self) {
        self.running = false;
        self.finished = true;
        self.user_name.clear();
        self.remaining_seconds = 0;
        self.full_time = 0;
        self.score = 0;
        self.code = START_CODE.to_string();
        self.progress_ticker = 0;
        self.fine_tick = FINE_TICKS_PER_SECOND;
    }

    fn fine_tick_step(&mut self) -> bool {
        self.fine_tick = self.fine_tick.saturating_sub(1);
        if self.fine_tick > 0 {
            return false;
        }
        self.remaining_seconds = self.remaining_seconds.saturating_sub(1);
        self.fine_tick = FINE_TICKS_PER_SECOND;
        true
    }

    fn rearm_from_remaining(&mut self) {
        self.progress_ticker = self.remaining_seconds.saturating_mul(FINE_TICKS_PER_SECOND);
        self.fine_tick = FINE_TICKS_PER_SECOND;
    }
}

/// Session fields recovered from the store, already coerced to their types.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct RestoredFields {
    pub running: bool,
    pub finished: bool,
    pub user_name: String,
    pub remaining_seconds: u32,
    pub code: String,
    pub score: u32,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn challenge() -> ChallengeConfig {
        ChallengeConfig {
            name: "landing".into(),
            title: "Landing".into(),
            target_url: "/landing.png".into(),
            description: None,
        }
    }

    fn started(total_seconds: u32) -> SessionState {
        let mut state = SessionState::new(challenge());
        state.begin(SessionSetup {
            user_name: "A".into(),
            total_seconds,
        });
        state
    }

    #[test]
    fn new_state_is_idle() {
        let state = SessionState::new(challenge());
        assert!(!state.running());
        assert!(state.finished());
        assert_eq!(state.code(), START_CODE);
        assert_eq!(state.level(), 0);
        assert_eq!(state.progress_ticker(), 0);
        assert_eq!(state.fine_tick(), FINE_TICKS_PER_SECOND);
    }

    #[test]
    fn begin_holds_clock_at_zero() {
        let state = started(60);
        assert!(state.running());
        assert!(!state.finished());
        assert_eq!(state.remaining_seconds(), 0);
        assert_eq!(state.progress_ticker(), 0);
        assert_eq!(state.full_time(), 60);
        assert_eq!(state.level(), 0);
    }

    #[test]
    fn replenish_refills_from_any_position() {
        let mut state = started(60);
        state.replenish();
        for _ in 0..37 {
            state.fire();
        }
        assert!(state.remaining_seconds() < 60);

        state.replenish();
        assert_eq!(state.remaining_seconds(), 60);
        assert_eq!(state.progress_ticker(), 300);
    }

    #[test]
    fn level_assignments_above_max_are_ignored() {
        let mut state = started(60);
        assert!(state.set_score(250));
        assert_eq!(state.level(), 5);

        assert!(!state.set_score(300));
        assert_eq!(state.score(), 300);
        assert_eq!(state.level(), 5);

        assert!(state.set_score(120));
        assert_eq!(state.level(), 2);
        assert!(!state.set_level(6));
        assert!(!state.set_level(u32::MAX));
        assert_eq!(state.level(), 2);
    }

    #[test]
    fn level_tracks_score_below_cap() {
        let mut state = started(60);
        for score in (0..=10_000).step_by(7) {
            let before = state.level();
            state.set_score(score);
            let derived = score / POINTS_PER_LEVEL;
            if derived <= u32::from(MAX_LEVEL) {
                assert_eq!(u32::from(state.level()), derived);
            } else {
                assert_eq!(state.level(), before);
            }
        }
    }

    #[test]
    fn five_firings_consume_one_second() {
        let mut state = started(10);
        state.replenish();
        assert_eq!(state.fine_tick(), 5);

        for firing in 1..=4 {
            assert_eq!(
                state.fire(),
                Firing::Ticked {
                    second_elapsed: false
                },
                "firing {firing}"
            );
        }
        assert_eq!(
            state.fire(),
            Firing::Ticked {
                second_elapsed: true
            }
        );
        assert_eq!(state.remaining_seconds(), 9);
        assert_eq!(state.fine_tick(), 5);
        assert_eq!(state.progress_ticker(), 45);
    }

    #[test]
    fn ticker_and_clock_reach_zero_together() {
        let mut state = started(3);
        state.replenish();
        while state.progress_ticker() > 0 {
            state.fire();
            assert_eq!(
                state.progress_ticker() / FINE_TICKS_PER_SECOND
                    + u32::from(state.progress_ticker() % FINE_TICKS_PER_SECOND != 0),
                state.remaining_seconds()
            );
        }
        assert_eq!(state.remaining_seconds(), 0);
    }

    #[test]
    fn exhausted_ticker_expires_without_finishing() {
        let mut state = started(1);
        state.set_score(120);
        state.progress_ticker = 1;

        assert!(matches!(state.fire(), Firing::Ticked { .. }));
        assert_eq!(state.progress_ticker(), 0);

        assert_eq!(state.fire(), Firing::Expired);
        assert_eq!(state.score(), 0);
        assert_eq!(state.level(), 0);
        assert_eq!(state.progress_ticker(), 0);
        assert!(state.running());
        assert!(!state.finished());
    }

    #[test]
    fn reset_keeps_level_and_challenge() {
        let mut state = started(60);
        state.set_score(100);
        state.set_code("<p>hi</p>".into());
        state.reset_to_idle();

        assert!(!state.running());
        assert!(state.finished());
        assert_eq!(state.user_name(), "");
        assert_eq!(state.score(), 0);
        assert_eq!(state.code(), START_CODE);
        assert_eq!(state.level(), 2);
        assert_eq!(state.challenge().name, "landing");
    }
}
