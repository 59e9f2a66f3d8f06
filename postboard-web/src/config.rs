//! Frontend configuration module
//!
//! Values are baked in at compile time, since the browser has no environment.

/// Frontend configuration for the API location and log verbosity
#[derive(Debug, Clone)]
pub struct FrontendConfig {
    /// Root of the posts backend; may be relative to the page origin
    pub api_base_url: String,
    /// `tracing` filter directive for the console logger
    pub log_level: String,
}

impl Default for FrontendConfig {
    fn default() -> Self {
        Self {
            api_base_url: option_env!("POSTBOARD_API_URL")
                .unwrap_or("http://localhost:5000")
                .to_string(),
            log_level: option_env!("POSTBOARD_LOG_LEVEL")
                .unwrap_or("info")
                .to_string(),
        }
    }
}

impl FrontendConfig {
    /// Create a new frontend configuration instance
    pub fn new() -> Self {
        Self::default()
    }

    pub fn api_base_url(&self) -> &str {
        &self.api_base_url
    }

    pub fn log_level(&self) -> &str {
        &self.log_level
    }
}
