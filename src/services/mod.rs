/// OpenAPI documentation generation.
pub mod documentation;
/// Health check service.
pub mod health_service;
/// Session operations exposed to HTTP callers.
pub mod session_service;
/// Server-Sent Events streaming of session snapshots.
pub mod sse_service;
