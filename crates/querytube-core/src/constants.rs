/// QueryTube version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Maximum description length shown on a result card before truncation.
pub const DESCRIPTION_PREVIEW_CHARS: usize = 150;

/// Base URL for watching a video by its external identifier.
pub const WATCH_URL_BASE: &str = "https://www.youtube.com/watch?v=";

/// Base URL for embedding a video player by its external identifier.
pub const EMBED_URL_BASE: &str = "https://www.youtube.com/embed/";

/// Queries offered to first-time users.
pub const EXAMPLE_QUERIES: [&str; 4] = [
    "the fermi paradox",
    "what is the meaning of life",
    "could we live on mars?",
    "the science of aging",
];
