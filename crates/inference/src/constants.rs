//! Generation client constants
//!
//! Single source of truth for the service endpoint, model and media defaults.

/// Default values for generation configuration
pub mod defaults {
    /// Image model used for every generation call
    pub const MODEL: &str = "gemini-2.5-flash-image";
    /// Base URL of the Generative Language API
    pub const BASE_URL: &str = "https://generativelanguage.googleapis.com";
    /// API version path segment
    pub const API_VERSION: &str = "v1beta";
    /// Request timeout (seconds)
    pub const TIMEOUT_SECS: u64 = 120;
}

/// Environment variables read at process start
pub mod env {
    /// Service-access credential
    pub const API_KEY: &str = "API_KEY";
}

/// HTTP header names
pub mod headers {
    /// Header carrying the API key
    pub const API_KEY: &str = "x-goog-api-key";
}

/// Media types
pub mod media {
    /// Media type used when rendering or exporting generated images
    pub const PNG: &str = "image/png";
}
