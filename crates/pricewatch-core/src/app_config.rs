use std::net::SocketAddr;
use std::path::PathBuf;

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub bind_addr: SocketAddr,
    pub log_level: String,
    /// YAML store registry; `None` means the built-in registry.
    pub stores_path: Option<PathBuf>,
    pub scraper_request_timeout_secs: u64,
    pub scraper_max_redirects: usize,
    pub scraper_pacing_min_ms: u64,
    pub scraper_pacing_max_ms: u64,
    /// Replacement user-agent pool; `None` keeps the built-in browser pool.
    pub scraper_user_agents: Option<Vec<String>>,
    pub scraper_accept_language: String,
    pub rate_limit_max_requests: usize,
    pub rate_limit_window_secs: u64,
}
