//! Restart behaviour: a second engine over the same store file picks the
//! session back up.

use std::{sync::Arc, time::Duration};

use code_in_the_dark_back::{
    dao::kv_store::{FileStore, KeyValueStore},
    state::{
        SessionEngine,
        challenge::ChallengeCatalog,
        session::{SessionSetup, START_CODE},
    },
};
use tempfile::TempDir;

const TICK: Duration = Duration::from_millis(200);

fn engine_at(dir: &TempDir) -> SessionEngine {
    let store: Arc<dyn KeyValueStore> =
        Arc::new(FileStore::open(dir.path().join("session.json")).unwrap());
    SessionEngine::new(store, Arc::new(ChallengeCatalog::default()), TICK)
}

fn setup(user_name: &str, total_seconds: u32) -> SessionSetup {
    SessionSetup {
        user_name: user_name.into(),
        total_seconds,
    }
}

#[tokio::test(start_paused = true)]
async fn restarted_engine_resumes_running_session() {
    let dir = TempDir::new().unwrap();

    let first = engine_at(&dir);
    first.start(setup("Ada", 60)).await;
    first.update("<p>draft</p>").await;
    first.update_score(120).await;
    let before = first.snapshot();
    drop(first);

    let second = engine_at(&dir);
    second.resume().await;
    let after = second.snapshot();

    assert!(after.running());
    assert!(!after.finished());
    assert_eq!(after.user_name(), before.user_name());
    assert_eq!(after.remaining_seconds(), before.remaining_seconds());
    assert_eq!(after.code(), before.code());
    assert_eq!(after.score(), before.score());
    assert_eq!(after.level(), before.level());
    assert_eq!(after.challenge(), before.challenge());
    assert!(second.countdown_active().await);
}

#[tokio::test(start_paused = true)]
async fn resumed_countdown_keeps_ticking_from_persisted_seconds() {
    let dir = TempDir::new().unwrap();

    let first = engine_at(&dir);
    first.start(setup("Ada", 10)).await;
    first.update("<p>draft</p>").await;
    // Three full seconds.
    tokio::time::sleep(TICK * 15 + Duration::from_millis(1)).await;
    assert_eq!(first.snapshot().remaining_seconds(), 7);
    drop(first);

    let second = engine_at(&dir);
    second.resume().await;
    assert_eq!(second.snapshot().remaining_seconds(), 7);
    assert_eq!(second.snapshot().full_time(), 7);

    tokio::time::sleep(TICK * 5 + Duration::from_millis(1)).await;
    assert_eq!(second.snapshot().remaining_seconds(), 6);
}

#[tokio::test]
async fn dispose_survives_restart_with_preferences() {
    let dir = TempDir::new().unwrap();

    let first = engine_at(&dir);
    let profile = first.catalog().find("profile-card").cloned().unwrap();
    first.set_challenge(profile).await;
    first.start(setup("Ada", 60)).await;
    first.update_score(100).await;
    first.dispose().await;
    drop(first);

    let second = engine_at(&dir);
    second.resume().await;
    let state = second.snapshot();

    assert!(!state.running());
    assert!(state.finished());
    assert_eq!(state.user_name(), "");
    assert_eq!(state.code(), START_CODE);
    assert_eq!(state.score(), 0);
    assert_eq!(state.level(), 2);
    assert_eq!(state.challenge().name, "profile-card");
    assert!(!second.countdown_active().await);
}
