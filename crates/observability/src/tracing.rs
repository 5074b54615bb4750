//! Utility functions for tracing

/// Create a span for one LLM request
///
/// `duration_ms` and `error` are declared empty so they can be recorded
/// once the call returns.
///
/// # Example
///
/// ```rust
/// use ketname_observability::llm_request_span;
///
/// let span = llm_request_span!("gemini", "gemini-2.5-flash-lite");
/// let _guard = span.enter();
/// // ... provider call ...
/// ```
#[macro_export]
macro_rules! llm_request_span {
    ($provider:expr, $model:expr) => {
        tracing::info_span!(
            "llm.request",
            llm.provider = $provider,
            llm.model = $model,
            duration_ms = tracing::field::Empty,
            error = tracing::field::Empty,
            error.message = tracing::field::Empty,
        )
    };
}

/// Record an error on the current span
///
/// Marks the span as failed, stores the message and emits a warning event.
///
/// # Example
///
/// ```rust
/// use ketname_observability::record_error;
///
/// let err = std::io::Error::other("disk full");
/// record_error(&err);
/// ```
pub fn record_error<E: std::fmt::Display + ?Sized>(error: &E) {
    let span = tracing::Span::current();
    span.record("error", true);
    span.record("error.message", error.to_string().as_str());
    tracing::warn!(error = %error, "Operation failed");
}

/// Record latency/duration on the current span
///
/// # Example
///
/// ```rust
/// use ketname_observability::record_duration;
/// use std::time::Instant;
///
/// let start = Instant::now();
/// // ... operation ...
/// record_duration("duration_ms", start.elapsed());
/// ```
pub fn record_duration(key: &str, duration: std::time::Duration) {
    let span = tracing::Span::current();
    span.record(key, duration.as_millis() as u64);
}
