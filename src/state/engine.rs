//! Session engine: owns the session state, mirrors it into the key-value
//! store, and drives the resumable countdown.
//!
//! Every operation locks the session, mutates it, writes the affected keys
//! through to the store and publishes a fresh snapshot before releasing the
//! lock, so no partially applied state is ever observable. Countdown firings
//! take the same lock.

use std::{
    ops::ControlFlow,
    sync::{Arc, Weak},
    time::Duration,
};

use tokio::sync::{Mutex, watch};
use tracing::{debug, info, warn};

use crate::{
    dao::{
        kv_store::KeyValueStore,
        models::{StoreKey, StoredValue},
    },
    state::{
        challenge::{ChallengeCatalog, ChallengeConfig},
        coerce::{bool_or_default, count_or_default, string_or_default},
        countdown::{self, CountdownHandle},
        session::{Firing, RestoredFields, START_CODE, SessionSetup, SessionState},
    },
};

/// Default period between countdown firings.
pub const DEFAULT_TICK_INTERVAL: Duration = Duration::from_millis(200);

/// Stateful engine managing exactly one coding session.
///
/// Independent sessions need independent engines.
pub struct SessionEngine {
    shared: Arc<Shared>,
}

struct Shared {
    core: Mutex<SessionCore>,
    updates: watch::Sender<SessionState>,
    catalog: Arc<ChallengeCatalog>,
    tick_interval: Duration,
}

struct SessionCore {
    state: SessionState,
    store: Arc<dyn KeyValueStore>,
    countdown: Option<CountdownHandle>,
    generation: u64,
}

impl SessionEngine {
    /// Build an idle engine. A challenge selection left in the store by a
    /// previous session is re-applied.
    pub fn new(
        store: Arc<dyn KeyValueStore>,
        catalog: Arc<ChallengeCatalog>,
        tick_interval: Duration,
    ) -> Self {
        let mut core = SessionCore {
            state: SessionState::new(catalog.first().clone()),
            store,
            countdown: None,
            generation: 0,
        };
        core.restore_challenge(&catalog);

        let (updates, _rx) = watch::channel(core.state.clone());
        Self {
            shared: Arc::new(Shared {
                core: Mutex::new(core),
                updates,
                catalog,
                tick_interval,
            }),
        }
    }

    /// Copy of the current session state.
    pub fn snapshot(&self) -> SessionState {
        self.shared.updates.borrow().clone()
    }

    /// Receive a new snapshot after every mutation and countdown firing.
    pub fn subscribe(&self) -> watch::Receiver<SessionState> {
        self.shared.updates.subscribe()
    }

    /// Catalog used to resolve persisted challenge names.
    pub fn catalog(&self) -> &ChallengeCatalog {
        &self.shared.catalog
    }

    /// Whether a countdown task currently owns this session.
    pub async fn countdown_active(&self) -> bool {
        self.shared.core.lock().await.countdown.is_some()
    }

    /// Start a new session for `setup.user_name`.
    ///
    /// The clock is held at zero and no countdown is scheduled; the first
    /// [`update`](Self::update) fills it and starts ticking.
    pub async fn start(&self, setup: SessionSetup) {
        let mut core = self.shared.core.lock().await;
        let total_seconds = setup.total_seconds;

        core.state.begin(setup);
        let challenge = core.state.challenge().clone();
        core.apply_challenge(challenge);

        core.persist(StoreKey::UserName, core.state.user_name());
        core.persist(StoreKey::GameTimer, total_seconds);
        core.persist(StoreKey::Score, 0u32);
        core.persist(StoreKey::Code, core.state.code());
        core.persist(StoreKey::Level, 0u8);
        core.persist(StoreKey::GameStarted, true);
        core.persist(StoreKey::Finish, false);

        info!(
            user = %core.state.user_name(),
            total_seconds,
            challenge = %core.state.challenge().name,
            "session started"
        );
        self.shared.publish(&core);
    }

    /// Rebuild the session from the store, e.g. after a process restart.
    ///
    /// Absent or malformed values fall back to defaults. A running, unfinished
    /// session gets its countdown back.
    pub async fn resume(&self) {
        let mut core = self.shared.core.lock().await;

        let restored = RestoredFields {
            running: bool_or_default(core.read(StoreKey::GameStarted).as_ref()),
            // No `finish` key means no session was ever recorded.
            finished: core
                .read(StoreKey::Finish)
                .is_none_or(|value| bool_or_default(Some(&value))),
            user_name: string_or_default(core.read(StoreKey::UserName).as_ref(), ""),
            remaining_seconds: count_or_default(core.read(StoreKey::GameTimer).as_ref()),
            code: string_or_default(core.read(StoreKey::Code).as_ref(), START_CODE),
            score: count_or_default(core.read(StoreKey::Score).as_ref()),
        };
        let level = count_or_default(core.read(StoreKey::Level).as_ref());

        core.state.restore(restored);
        core.assign_level(level);
        core.restore_challenge(&self.shared.catalog);

        let active = core.state.running() && !core.state.finished();
        if active {
            self.ensure_countdown(&mut core);
        }

        info!(
            user = %core.state.user_name(),
            remaining_seconds = core.state.remaining_seconds(),
            active,
            "session resumed from store"
        );
        self.shared.publish(&core);
    }

    /// Record the latest editor contents and refill the countdown.
    ///
    /// Starts the countdown if none is running. Calls before
    /// [`start`](Self::start) are accepted.
    pub async fn update(&self, code: impl Into<String>) {
        let mut core = self.shared.core.lock().await;
        self.ensure_countdown(&mut core);

        let code = code.into();
        core.persist(StoreKey::Code, code.as_str());
        core.state.set_code(code);
        core.state.replenish();

        self.shared.publish(&core);
    }

    /// Record a new score; the level follows as `score / 50` while it stays
    /// within the maximum.
    pub async fn update_score(&self, score: u32) {
        let mut core = self.shared.core.lock().await;

        let level_accepted = core.state.set_score(score);
        core.persist(StoreKey::Score, score);
        if level_accepted {
            core.persist(StoreKey::Level, core.state.level());
        } else {
            debug!(score, level = core.state.level(), "level capped; keeping previous level");
        }

        self.shared.publish(&core);
    }

    /// Select a challenge and remember it across sessions.
    pub async fn set_challenge(&self, challenge: ChallengeConfig) {
        let mut core = self.shared.core.lock().await;
        info!(challenge = %challenge.name, "challenge selected");
        core.apply_challenge(challenge);
        self.shared.publish(&core);
    }

    /// Tear the session down: idle defaults in memory, session keys removed
    /// from the store, countdown cancelled. The challenge selection and level
    /// are kept. Safe to call repeatedly.
    pub async fn dispose(&self) {
        let mut core = self.shared.core.lock().await;

        core.state.reset_to_idle();
        for key in StoreKey::SESSION_SCOPED {
            core.forget(key);
        }
        if let Some(handle) = core.countdown.take() {
            info!(generation = handle.generation(), "countdown cancelled");
            handle.cancel();
        }

        info!("session disposed");
        self.shared.publish(&core);
    }

    /// Schedule the countdown unless one is already active.
    fn ensure_countdown(&self, core: &mut SessionCore) {
        if core.countdown.is_some() {
            return;
        }

        core.generation += 1;
        let generation = core.generation;
        let shared = Arc::downgrade(&self.shared);
        let handle = countdown::spawn(generation, self.shared.tick_interval, move || {
            let shared: Weak<Shared> = shared.clone();
            async move {
                match shared.upgrade() {
                    Some(shared) => shared.fire_countdown(generation).await,
                    None => ControlFlow::Break(()),
                }
            }
        });

        core.countdown = Some(handle);
        debug!(generation, "countdown scheduled");
    }
}

impl Shared {
    fn publish(&self, core: &SessionCore) {
        self.updates.send_replace(core.state.clone());
    }

    /// Body of one countdown firing.
    async fn fire_countdown(&self, generation: u64) -> ControlFlow<()> {
        let mut core = self.core.lock().await;
        if core.countdown.as_ref().map(CountdownHandle::generation) != Some(generation) {
            return ControlFlow::Break(());
        }

        let firing = core.fire();
        if firing == Firing::Expired {
            // Dropping our own handle detaches the task, which exits right after.
            core.countdown = None;
            info!(generation, "countdown expired; score and level reset");
        }
        self.publish(&core);

        match firing {
            Firing::Expired => ControlFlow::Break(()),
            Firing::Ticked { .. } => ControlFlow::Continue(()),
        }
    }
}

impl SessionCore {
    fn fire(&mut self) -> Firing {
        let firing = self.state.fire();
        match firing {
            Firing::Expired => {
                self.persist(StoreKey::Score, 0u32);
                self.persist(StoreKey::Level, 0u8);
            }
            Firing::Ticked {
                second_elapsed: true,
            } => {
                let remaining = self.state.remaining_seconds();
                self.persist(StoreKey::GameTimer, remaining);
                debug!(remaining_seconds = remaining, "countdown second elapsed");
            }
            Firing::Ticked { .. } => {}
        }
        firing
    }

    fn apply_challenge(&mut self, challenge: ChallengeConfig) {
        self.persist(StoreKey::Challenge, challenge.name.as_str());
        self.state.set_challenge(challenge);
    }

    /// Re-apply the persisted challenge name when the catalog knows it.
    fn restore_challenge(&mut self, catalog: &ChallengeCatalog) {
        let Some(name) = self.read(StoreKey::Challenge).map(|value| value.as_text()) else {
            return;
        };
        match catalog.find(&name) {
            Some(challenge) => self.apply_challenge(challenge.clone()),
            None => warn!(challenge = %name, "persisted challenge not in catalog; ignoring"),
        }
    }

    fn assign_level(&mut self, level: u32) {
        if self.state.set_level(level) {
            self.persist(StoreKey::Level, self.state.level());
        } else {
            debug!(level, "level above maximum ignored");
        }
    }

    fn read(&self, key: StoreKey) -> Option<StoredValue> {
        match self.store.get(key.as_str()) {
            Ok(value) => value,
            Err(err) => {
                warn!(error = %err, %key, "store read failed; using default");
                None
            }
        }
    }

    fn persist(&self, key: StoreKey, value: impl Into<StoredValue>) {
        if let Err(err) = self.store.set(key.as_str(), value.into()) {
            warn!(error = %err, %key, "store write failed");
        }
    }

    fn forget(&self, key: StoreKey) {
        if let Err(err) = self.store.remove(key.as_str()) {
            warn!(error = %err, %key, "store remove failed");
        }
    }
}
