// src/config.rs

use std::env;
use std::net::SocketAddr;

use dotenvy::dotenv;
use url::Url;

pub const DEFAULT_OLLAMA_URL: &str = "http://localhost:11434/api/generate";
pub const DEFAULT_OLLAMA_MODEL: &str = "llama3.1";
pub const DEFAULT_QUESTION_COUNT: u32 = 5;
/// Upper bound accepted by the generate form.
pub const MAX_QUESTION_COUNT: u32 = 50;

#[derive(Debug, Clone)]
pub struct Config {
    pub bind_addr: SocketAddr,
    /// Full URL of the `/api/generate` endpoint.
    pub ollama_url: Url,
    pub ollama_model: String,
    /// Office-to-PDF converter executable (LibreOffice).
    pub converter_bin: String,
    pub max_upload_bytes: usize,
    pub session_idle_secs: u64,
    pub log_dir: String,
    pub rust_log: String,
}

impl Config {
    pub fn from_env() -> Self {
        dotenv().ok();

        let bind_addr = env::var("BIND_ADDR")
            .unwrap_or_else(|_| "0.0.0.0:3000".to_string())
            .parse()
            .expect("BIND_ADDR must be a socket address, e.g. 0.0.0.0:3000");

        let ollama_url = env::var("OLLAMA_URL")
            .unwrap_or_else(|_| DEFAULT_OLLAMA_URL.to_string())
            .parse()
            .expect("OLLAMA_URL must be a valid URL");

        let ollama_model =
            env::var("OLLAMA_MODEL").unwrap_or_else(|_| DEFAULT_OLLAMA_MODEL.to_string());

        let converter_bin = env::var("CONVERTER_BIN").unwrap_or_else(|_| "soffice".to_string());

        let max_upload_bytes = env::var("MAX_UPLOAD_BYTES")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(20 * 1024 * 1024);

        let session_idle_secs = env::var("SESSION_IDLE_SECS")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(3600);

        let log_dir = env::var("LOG_DIR").unwrap_or_else(|_| "logs".to_string());

        let rust_log = env::var("RUST_LOG")
            .unwrap_or_else(|_| "info".to_string());

        Self {
            bind_addr,
            ollama_url,
            ollama_model,
            converter_bin,
            max_upload_bytes,
            session_idle_secs,
            log_dir,
            rust_log,
        }
    }
}
