use cricxi_api::client::{Endpoints, FantasyApi};
use log::LevelFilter;
use std::path::PathBuf;
use std::time::Duration;

const DEFAULT_TIMEOUT_SECS: u64 = 10;
const DEFAULT_RETRIES: u32 = 1;
const DEFAULT_INSTRUCTIONS: &str = include_str!("../../assets/instructions.txt");

#[derive(Debug, Clone)]
pub struct AppSettings {
    pub full_screen: bool,
    pub log_level: Option<LevelFilter>,
    pub endpoints: Endpoints,
    pub timeout: Duration,
    pub retries: u32,
    pub instructions_path: Option<PathBuf>,
    pub player_images_path: Option<PathBuf>,
    pub export_dir: PathBuf,
}

impl Default for AppSettings {
    fn default() -> Self {
        Self::from_lookup(|_| None)
    }
}

impl AppSettings {
    /// Read `CRICXI_*` overrides from the environment.
    pub fn load() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let var = |key: &str| {
            lookup(key)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };

        let defaults = Endpoints::default();
        let endpoints = Endpoints {
            squads: var("CRICXI_SQUADS_URL").unwrap_or(defaults.squads),
            model: var("CRICXI_MODEL_URL").unwrap_or(defaults.model),
            stats: var("CRICXI_STATS_URL").unwrap_or(defaults.stats),
        };

        let timeout_secs = var("CRICXI_TIMEOUT_SECS")
            .and_then(|v| v.parse::<u64>().ok())
            .unwrap_or(DEFAULT_TIMEOUT_SECS)
            .clamp(1, 600);
        let retries = var("CRICXI_RETRIES")
            .and_then(|v| v.parse::<u32>().ok())
            .unwrap_or(DEFAULT_RETRIES)
            .min(5);

        let export_dir = var("CRICXI_EXPORT_DIR")
            .map(PathBuf::from)
            .unwrap_or_else(|| config_dir(var("XDG_CONFIG_HOME"), var("HOME")));

        Self {
            full_screen: false,
            log_level: var("CRICXI_LOG_LEVEL").and_then(|v| v.parse::<LevelFilter>().ok()),
            endpoints,
            timeout: Duration::from_secs(timeout_secs),
            retries,
            instructions_path: var("CRICXI_INSTRUCTIONS").map(PathBuf::from),
            player_images_path: var("CRICXI_PLAYER_IMAGES").map(PathBuf::from),
            export_dir,
        }
    }

    pub fn api_client(&self) -> FantasyApi {
        FantasyApi::new(self.endpoints.clone())
            .with_timeout(self.timeout)
            .with_retries(self.retries)
    }

    /// Instruction lines from the override file, or the bundled text.
    pub fn instructions(&self) -> Vec<String> {
        let text = self
            .instructions_path
            .as_ref()
            .and_then(|path| match std::fs::read_to_string(path) {
                Ok(text) => Some(text),
                Err(e) => {
                    log::warn!("could not read {}: {e}", path.display());
                    None
                }
            })
            .unwrap_or_else(|| DEFAULT_INSTRUCTIONS.to_string());
        text.lines().map(|l| l.trim().to_string()).collect()
    }
}

fn config_dir(xdg_config_home: Option<String>, home: Option<String>) -> PathBuf {
    if let Some(config_dir) = xdg_config_home {
        return PathBuf::from(config_dir).join("cricxi");
    }
    if let Some(home) = home {
        return PathBuf::from(home).join(".config").join("cricxi");
    }
    PathBuf::from(".")
}
