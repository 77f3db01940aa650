//! Named lifecycle events with structured fields.

/// The binary finished loading its corpus and encoder.
pub fn service_ready(records: usize, dims: usize, provider: &str, fingerprint: &str) {
    tracing::info!(
        event = "service_ready",
        records,
        dims,
        provider = %provider,
        fingerprint = %fingerprint,
        "search service ready"
    );
}

/// Startup failed; the process is about to exit.
pub fn startup_failed(error: &dyn std::fmt::Display) {
    tracing::error!(event = "startup_failed", error = %error, "startup failed");
}

/// A presenter finished one request.
pub fn request_completed(status: &str, hits: usize, elapsed_ms: u128) {
    tracing::info!(
        event = "request_completed",
        status = %status,
        hits,
        elapsed_ms = elapsed_ms as u64,
        "request completed"
    );
}

/// The corpus matrix was (re)built from the records file.
pub fn embeddings_prepared(rows: usize, dims: usize, output: &str) {
    tracing::info!(
        event = "embeddings_prepared",
        rows,
        dims,
        output = %output,
        "embedding matrix written"
    );
}
