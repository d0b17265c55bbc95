/// Server configuration, read once at startup.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Path to the sqlite database file.
    pub db_path: String,
    /// Directory of static frontend assets.
    pub static_dir: String,
    pub port: u16,
    /// Install the default skill dictionary when the skills table is empty.
    pub seed_defaults: bool,
}

const DEFAULT_PORT: u16 = 4117;

impl ServerConfig {
    pub fn from_env() -> Self {
        Self {
            db_path: std::env::var("SKILLSCAN_DB").unwrap_or_else(|_| "skillscan.db".to_string()),
            static_dir: std::env::var("SKILLSCAN_STATIC")
                .unwrap_or_else(|_| concat!(env!("CARGO_MANIFEST_DIR"), "/static").to_string()),
            port: std::env::var("SKILLSCAN_PORT")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(DEFAULT_PORT),
            seed_defaults: std::env::var("SKILLSCAN_SEED")
                .map(|v| v == "1" || v.eq_ignore_ascii_case("true"))
                .unwrap_or(true),
        }
    }
}
