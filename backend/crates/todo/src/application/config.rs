//! Application Configuration

/// Default request body limit for todo routes (10 MiB)
pub const DEFAULT_MAX_UPLOAD_BYTES: usize = 10 << 20;

/// Todo application configuration
#[derive(Debug, Clone)]
pub struct TodoConfig {
    /// Upper bound on a create/update request body, photo included
    pub max_upload_bytes: usize,
}

impl Default for TodoConfig {
    fn default() -> Self {
        Self {
            max_upload_bytes: DEFAULT_MAX_UPLOAD_BYTES,
        }
    }
}
