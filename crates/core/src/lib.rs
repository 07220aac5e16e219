pub mod client;
pub mod domain;
pub mod presenter;
pub mod session;
pub mod store;
pub mod time;

pub mod config {
    use anyhow::Context;
    use std::path::PathBuf;

    const DEFAULT_HTTP_TIMEOUT_SECS: u64 = 15;

    #[derive(Debug, Clone)]
    pub struct Settings {
        pub api_base_url: Option<String>,
        pub api_token: Option<String>,
        pub http_timeout_secs: u64,
        pub store_path: Option<PathBuf>,
        pub sentry_dsn: Option<String>,
    }

    impl Default for Settings {
        fn default() -> Self {
            Self {
                api_base_url: None,
                api_token: None,
                http_timeout_secs: DEFAULT_HTTP_TIMEOUT_SECS,
                store_path: None,
                sentry_dsn: None,
            }
        }
    }

    impl Settings {
        pub fn from_env() -> anyhow::Result<Self> {
            let http_timeout_secs = match std::env::var("DASHBOARD_HTTP_TIMEOUT_SECS") {
                Ok(s) => s
                    .trim()
                    .parse::<u64>()
                    .with_context(|| format!("DASHBOARD_HTTP_TIMEOUT_SECS is not a number: {s}"))?,
                Err(_) => DEFAULT_HTTP_TIMEOUT_SECS,
            };

            Ok(Self {
                api_base_url: non_empty_var("DASHBOARD_API_BASE_URL"),
                api_token: non_empty_var("DASHBOARD_API_TOKEN"),
                http_timeout_secs,
                store_path: non_empty_var("SCANBOARD_STORE_PATH").map(PathBuf::from),
                sentry_dsn: non_empty_var("SENTRY_DSN"),
            })
        }

        pub fn require_api_base_url(&self) -> anyhow::Result<&str> {
            self.api_base_url
                .as_deref()
                .context("DASHBOARD_API_BASE_URL is required")
        }
    }

    fn non_empty_var(key: &str) -> Option<String> {
        std::env::var(key).ok().filter(|s| !s.trim().is_empty())
    }
}
