/// CLI configuration parsed from environment variables.
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Default `tracing` filter when `RUST_LOG` is unset.
    pub log_filter: String,
    /// Print the board after every accepted move.
    pub show_board: bool,
    /// FEN piece placement to start from instead of the standard position.
    pub starting_fen: Option<String>,
}

impl AppConfig {
    /// Load configuration from environment variables with defaults.
    pub fn from_env() -> Self {
        let defaults = AppConfig::default();
        AppConfig {
            log_filter: std::env::var("CHESS_LOG").unwrap_or(defaults.log_filter),
            show_board: std::env::var("CHESS_SHOW_BOARD")
                .ok()
                .and_then(|v| parse_flag(&v))
                .unwrap_or(defaults.show_board),
            starting_fen: std::env::var("CHESS_START_FEN")
                .ok()
                .filter(|v| !v.trim().is_empty()),
        }
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        AppConfig {
            log_filter: "chess_rules=info".to_string(),
            show_board: true,
            starting_fen: None,
        }
    }
}

fn parse_flag(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}
