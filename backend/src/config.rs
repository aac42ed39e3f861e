use std::env;

pub const MAX_FILE_SIZE: usize = 5 * 1024 * 1024;
// Probe order for resolving an image id back to a file.
pub const ALLOWED_EXTENSIONS: [&str; 3] = [".jpg", ".jpeg", ".png"];
pub const ALLOWED_CONTENT_TYPES: [&str; 2] = ["image/jpeg", "image/png"];

pub const DEFAULT_API_KEY: &str = "dev-api-key-12345";

#[derive(Clone)]
pub struct Config {
    pub api_key: String,
    pub upload_dir: String,
    pub port: String,
}

impl Config {
    pub fn from_env() -> Self {
        Self {
            api_key: env::var("API_KEY").unwrap_or_else(|_| DEFAULT_API_KEY.to_string()),
            upload_dir: env::var("UPLOAD_DIR").unwrap_or_else(|_| "uploads".to_string()),
            port: env::var("PORT").unwrap_or_else(|_| "8000".to_string()),
        }
    }
}
