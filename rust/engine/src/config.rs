//! Deck configuration resolved from defaults, an optional TOML file and
//! environment overrides, in that order of precedence (lowest first).
//!
//! | Variable                   | Field                    |
//! |----------------------------|--------------------------|
//! | `CARDECK_CONFIG`           | path to a TOML file      |
//! | `CARDECK_PLAYERS`          | `rules.players`          |
//! | `CARDECK_CARDS_PER_PLAYER` | `rules.cards_per_player` |
//! | `CARDECK_STATE`            | `rules.state`            |
//! | `CARDECK_SEED`             | `seed`                   |
//! | `CARDECK_MAX_CARDS`        | `max_cards`              |

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::cards::MAX_CARDS;
use crate::rules::Rules;

pub const ENV_CONFIG: &str = "CARDECK_CONFIG";
pub const ENV_PLAYERS: &str = "CARDECK_PLAYERS";
pub const ENV_CARDS_PER_PLAYER: &str = "CARDECK_CARDS_PER_PLAYER";
pub const ENV_STATE: &str = "CARDECK_STATE";
pub const ENV_SEED: &str = "CARDECK_SEED";
pub const ENV_MAX_CARDS: &str = "CARDECK_MAX_CARDS";

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct DeckConfig {
    pub rules: Rules,
    pub seed: Option<u64>,
    pub max_cards: usize,
}

impl Default for DeckConfig {
    fn default() -> Self {
        Self {
            rules: Rules::default(),
            seed: None,
            max_cards: MAX_CARDS,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ValueSource {
    Default,
    File,
    Env,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ConfigSources {
    pub players: ValueSource,
    pub cards_per_player: ValueSource,
    pub state: ValueSource,
    pub seed: ValueSource,
    pub max_cards: ValueSource,
}

impl Default for ConfigSources {
    fn default() -> Self {
        Self {
            players: ValueSource::Default,
            cards_per_player: ValueSource::Default,
            state: ValueSource::Default,
            seed: ValueSource::Default,
            max_cards: ValueSource::Default,
        }
    }
}

#[derive(Debug, Clone)]
pub struct ConfigResolved {
    pub config: DeckConfig,
    pub sources: ConfigSources,
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse config file: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("invalid configuration: {0}")]
    Invalid(String),
}

#[derive(Debug, Default, Deserialize)]
struct FileConfig {
    #[serde(default)]
    players: Option<u32>,
    #[serde(default)]
    cards_per_player: Option<u32>,
    #[serde(default)]
    state: Option<String>,
    #[serde(default)]
    deck_type: Option<String>,
    #[serde(default)]
    dealer: Option<bool>,
    #[serde(default)]
    last_card: Option<String>,
    #[serde(default)]
    seed: Option<u64>,
    #[serde(default)]
    max_cards: Option<usize>,
}

pub fn load() -> Result<DeckConfig, ConfigError> {
    load_with_sources().map(|resolved| resolved.config)
}

/// Resolves the configuration from the process environment.
pub fn load_with_sources() -> Result<ConfigResolved, ConfigError> {
    resolve(|key| std::env::var(key).ok())
}

/// Parses a TOML document on top of the defaults, without consulting the
/// environment.
pub fn from_toml_str(s: &str) -> Result<DeckConfig, ConfigError> {
    let file: FileConfig = toml::from_str(s)?;
    let mut resolved = ConfigResolved {
        config: DeckConfig::default(),
        sources: ConfigSources::default(),
    };
    apply_file(&mut resolved, file);
    validate(&resolved.config)?;
    Ok(resolved.config)
}

pub fn from_file<P: AsRef<Path>>(path: P) -> Result<DeckConfig, ConfigError> {
    let s = fs::read_to_string(path)?;
    from_toml_str(&s)
}

fn resolve<F>(lookup: F) -> Result<ConfigResolved, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    let mut resolved = ConfigResolved {
        config: DeckConfig::default(),
        sources: ConfigSources::default(),
    };
    let var = |key: &str| lookup(key).filter(|v| !v.is_empty());

    if let Some(path) = var(ENV_CONFIG) {
        let s = fs::read_to_string(&path)?;
        let file: FileConfig = toml::from_str(&s)?;
        tracing::debug!(path = %path, "loaded deck config file");
        apply_file(&mut resolved, file);
    }

    let cfg = &mut resolved.config;
    let sources = &mut resolved.sources;
    if let Some(v) = var(ENV_PLAYERS) {
        cfg.rules.players = parse_env(ENV_PLAYERS, &v)?;
        sources.players = ValueSource::Env;
    }
    if let Some(v) = var(ENV_CARDS_PER_PLAYER) {
        cfg.rules.cards_per_player = parse_env(ENV_CARDS_PER_PLAYER, &v)?;
        sources.cards_per_player = ValueSource::Env;
    }
    if let Some(v) = var(ENV_STATE) {
        cfg.rules.state = v;
        sources.state = ValueSource::Env;
    }
    if let Some(v) = var(ENV_SEED) {
        cfg.seed = Some(parse_env(ENV_SEED, &v)?);
        sources.seed = ValueSource::Env;
    }
    if let Some(v) = var(ENV_MAX_CARDS) {
        cfg.max_cards = parse_env(ENV_MAX_CARDS, &v)?;
        sources.max_cards = ValueSource::Env;
    }

    validate(&resolved.config)?;
    Ok(resolved)
}

fn apply_file(resolved: &mut ConfigResolved, f: FileConfig) {
    let cfg = &mut resolved.config;
    let sources = &mut resolved.sources;
    if let Some(v) = f.players {
        cfg.rules.players = v;
        sources.players = ValueSource::File;
    }
    if let Some(v) = f.cards_per_player {
        cfg.rules.cards_per_player = v;
        sources.cards_per_player = ValueSource::File;
    }
    if let Some(v) = f.state {
        cfg.rules.state = v;
        sources.state = ValueSource::File;
    }
    if let Some(v) = f.seed {
        cfg.seed = Some(v);
        sources.seed = ValueSource::File;
    }
    if let Some(v) = f.max_cards {
        cfg.max_cards = v;
        sources.max_cards = ValueSource::File;
    }
    // metadata has no env override, so its source is not tracked
    cfg.rules.deck_type = f.deck_type.or(cfg.rules.deck_type.take());
    cfg.rules.dealer = f.dealer.or(cfg.rules.dealer);
    cfg.rules.last_card = f.last_card.or(cfg.rules.last_card.take());
}

fn parse_env<T: std::str::FromStr>(key: &str, value: &str) -> Result<T, ConfigError> {
    value
        .parse()
        .map_err(|_| ConfigError::Invalid(format!("{} has invalid value '{}'", key, value)))
}

fn validate(cfg: &DeckConfig) -> Result<(), ConfigError> {
    cfg.rules
        .validate()
        .map_err(|e| ConfigError::Invalid(e.to_string()))?;
    if cfg.max_cards > MAX_CARDS {
        return Err(ConfigError::Invalid(format!(
            "max_cards must be at most {}",
            MAX_CARDS
        )));
    }
    Ok(())
}
