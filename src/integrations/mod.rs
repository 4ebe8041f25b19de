pub mod corpus;

use once_cell::sync::Lazy;
use std::time::Duration;

/// Shared HTTP client for all corpus requests to enable connection pooling
pub static HTTP_CLIENT: Lazy<reqwest::Client> = Lazy::new(|| {
    reqwest::Client::builder()
        .timeout(Duration::from_secs(30))
        .connect_timeout(Duration::from_secs(10))
        .pool_max_idle_per_host(5)
        .user_agent(concat!("tmux-learn/", env!("CARGO_PKG_VERSION")))
        .build()
        .expect("Failed to create HTTP client")
});
