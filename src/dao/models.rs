use std::fmt;

use serde::{Deserialize, Serialize};

/// Keys under which the session engine mirrors its fields.
///
/// The string forms are part of the persisted format and must not change,
/// otherwise a reload would no longer find the previous session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StoreKey {
    /// Display name of the player.
    UserName,
    /// Coarse countdown in whole seconds.
    GameTimer,
    /// Current score.
    Score,
    /// Editor contents.
    Code,
    /// Derived level (0..=5).
    Level,
    /// `"true"` while a session is running.
    GameStarted,
    /// `"true"` when no session is active.
    Finish,
    /// Name of the selected challenge.
    Challenge,
}

impl StoreKey {
    /// Keys cleared when a session is disposed. `Challenge` and `Level` are
    /// sticky preferences and survive disposal.
    pub const SESSION_SCOPED: [StoreKey; 6] = [
        StoreKey::Score,
        StoreKey::UserName,
        StoreKey::GameTimer,
        StoreKey::GameStarted,
        StoreKey::Code,
        StoreKey::Finish,
    ];

    /// Persisted key name.
    pub fn as_str(self) -> &'static str {
        match self {
            StoreKey::UserName => "userName",
            StoreKey::GameTimer => "gameTimer",
            StoreKey::Score => "score",
            StoreKey::Code => "code",
            StoreKey::Level => "level",
            StoreKey::GameStarted => "gameStarted",
            StoreKey::Finish => "finish",
            StoreKey::Challenge => "challenge",
        }
    }
}

impl fmt::Display for StoreKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A value held by the key-value store: either text or an integer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum StoredValue {
    /// Integer payload (timers, score, level).
    Number(i64),
    /// Free-form text payload (names, code, boolean flags).
    Text(String),
}

impl StoredValue {
    /// Render the value the way a string-only store would see it.
    pub fn as_text(&self) -> String {
        match self {
            StoredValue::Number(value) => value.to_string(),
            StoredValue::Text(value) => value.clone(),
        }
    }
}

impl From<String> for StoredValue {
    fn from(value: String) -> Self {
        StoredValue::Text(value)
    }
}

impl From<&str> for StoredValue {
    fn from(value: &str) -> Self {
        StoredValue::Text(value.to_string())
    }
}

impl From<i64> for StoredValue {
    fn from(value: i64) -> Self {
        StoredValue::Number(value)
    }
}

impl From<u32> for StoredValue {
    fn from(value: u32) -> Self {
        StoredValue::Number(i64::from(value))
    }
}

impl From<u8> for StoredValue {
    fn from(value: u8) -> Self {
        StoredValue::Number(i64::from(value))
    }
}

impl From<bool> for StoredValue {
    fn from(value: bool) -> Self {
        StoredValue::Text(value.to_string())
    }
}
