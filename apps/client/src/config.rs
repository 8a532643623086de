use std::path::PathBuf;

use anyhow::Result;

/// Client configuration loaded from environment variables.
/// Every key has a workable default so a plain `client` invocation talks to
/// a locally running API server.
#[derive(Debug, Clone)]
pub struct Config {
    /// Base URL of the TalentIQ API server, without a trailing slash.
    pub api_base_url: String,
    /// Where the persisted session (token + role) lives between runs.
    pub session_file: PathBuf,
    /// Directory that `download` saves resumes into.
    pub download_dir: PathBuf,
    pub rust_log: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        let api_base_url = normalize_base_url(
            &std::env::var("TALENTIQ_API_URL")
                .unwrap_or_else(|_| "http://127.0.0.1:8000".to_string()),
        );

        let session_file = std::env::var("TALENTIQ_SESSION_FILE")
            .map(PathBuf::from)
            .unwrap_or_else(|_| default_session_file());

        let download_dir = std::env::var("TALENTIQ_DOWNLOAD_DIR")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from("."));

        Ok(Config {
            api_base_url,
            session_file,
            download_dir,
            rust_log: std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
        })
    }
}

fn normalize_base_url(url: &str) -> String {
    url.trim_end_matches('/').to_string()
}

/// `$HOME/.talentiq/session.json`, falling back to the working directory when
/// no home is set (containers, bare CI runners).
fn default_session_file() -> PathBuf {
    let base = std::env::var_os("HOME")
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from("."));
    base.join(".talentiq").join("session.json")
}
