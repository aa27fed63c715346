//! LIA Brain Configuration
//!
//! Runtime settings of the binary. The cognitive tunables live in
//! `lia_core::LiaConfig`.

use std::env;
use std::path::PathBuf;

use lia_core::LiaConfig;

/// Brain configuration
#[derive(Debug, Clone)]
pub struct BrainConfig {
    /// HTTP/WebSocket port
    pub port: u16,
    /// Where memory.bin and world.bin live
    pub data_dir: PathBuf,
    /// JSON feeds polled every cycle
    pub feeds: Vec<String>,
    /// Include the simulated social feeds
    pub simulated: bool,
}

impl Default for BrainConfig {
    fn default() -> Self {
        Self {
            port: 8780,
            data_dir: PathBuf::from("data"),
            feeds: Vec::new(),
            simulated: true,
        }
    }
}

impl BrainConfig {
    /// Create config from environment variables
    pub fn from_env() -> Self {
        let mut config = Self::default();

        if let Ok(port) = env::var("LIA_PORT") {
            match port.parse() {
                Ok(p) => config.port = p,
                Err(_) => tracing::warn!("Ignoring LIA_PORT={:?}", port),
            }
        }

        if let Ok(dir) = env::var("LIA_DATA_DIR") {
            if !dir.trim().is_empty() {
                config.data_dir = PathBuf::from(dir);
            }
        }

        if let Ok(feeds) = env::var("LIA_FEEDS") {
            config.feeds = parse_feeds(&feeds);
        }

        if let Ok(flag) = env::var("LIA_SIMULATED") {
            config.simulated = parse_flag(&flag);
        }

        config
    }
}

fn parse_feeds(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|url| !url.is_empty())
        .map(str::to_string)
        .collect()
}

fn parse_flag(raw: &str) -> bool {
    matches!(raw.trim().to_lowercase().as_str(), "1" | "true" | "yes" | "on")
}

/// Print startup banner with config info
pub fn print_banner(config: &BrainConfig, lia: &LiaConfig) {
    println!();
    println!("╔══════════════════════════════════════════════════════════╗");
    println!("║             🌱 LIA Brain - Cognitive Cycle 🌱            ║");
    println!("╠══════════════════════════════════════════════════════════╣");
    println!("║  Port: {:>11}                                       ║", config.port);
    println!("║  Cycle: {:>9}s                                       ║", lia.cognitive_interval().as_secs());
    println!("║  Memories: {:>7}                                       ║", lia.max_memories);
    println!("║  Feeds: {:>10}                                       ║", config.feeds.len());
    println!("║  Simulated: {:>6}                                       ║", if config.simulated { "on" } else { "off" });
    println!("║  Data: {}", config.data_dir.display());
    println!("╚══════════════════════════════════════════════════════════╝");
    println!();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = BrainConfig::default();
        assert_eq!(config.port, 8780);
        assert_eq!(config.data_dir, PathBuf::from("data"));
        assert!(config.feeds.is_empty());
        assert!(config.simulated);
    }

    #[test]
    fn test_parse_feeds_and_flags() {
        assert_eq!(
            parse_feeds(" http://a/feed, ,http://b/feed "),
            vec!["http://a/feed".to_string(), "http://b/feed".to_string()]
        );
        assert!(parse_feeds("").is_empty());
        assert!(parse_flag("TRUE"));
        assert!(parse_flag("1"));
        assert!(!parse_flag("0"));
        assert!(!parse_flag("nope"));
    }
}
