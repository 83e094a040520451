/// Key-value persistence backends for session fields.
pub mod kv_store;
/// Persisted key names and value representation.
pub mod models;
/// Storage error types shared by every backend.
pub mod storage;
