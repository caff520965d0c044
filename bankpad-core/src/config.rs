use std::path::PathBuf;

use serde::Deserialize;

use crate::engine::EngineSettings;

const DEFAULT_CONFIG: &str = include_str!("../config.toml");

#[derive(Deserialize, Default)]
struct ConfigFile {
    #[serde(default)]
    engine: EngineConfig,
    #[serde(default)]
    bank: BankConfig,
}

#[derive(Deserialize, Default)]
struct EngineConfig {
    channel: Option<u8>,
    velocity: Option<u8>,
    gain: Option<f32>,
}

#[derive(Deserialize, Default)]
struct BankConfig {
    extensions: Option<Vec<String>>,
}

#[derive(Clone)]
pub struct Config {
    engine: EngineSettings,
    bank_extensions: Vec<String>,
}

impl Config {
    /// Embedded defaults, overridden key by key from the user config file if present.
    pub fn load() -> Self {
        let mut base = embedded();

        if let Some(path) = user_config_path() {
            if path.exists() {
                match std::fs::read_to_string(&path) {
                    Ok(contents) => match toml::from_str::<ConfigFile>(&contents) {
                        Ok(user) => merge(&mut base, user),
                        Err(e) => {
                            log::warn!(target: "config", "ignoring malformed config {}: {}", path.display(), e)
                        }
                    },
                    Err(e) => {
                        log::warn!(target: "config", "could not read config {}: {}", path.display(), e)
                    }
                }
            }
        }

        Self::from_file(base)
    }

    fn from_file(file: ConfigFile) -> Self {
        let fallback = EngineSettings::default();
        let engine = EngineSettings {
            channel: file.engine.channel.unwrap_or(fallback.channel).min(15),
            velocity: file
                .engine
                .velocity
                .unwrap_or(fallback.velocity)
                .clamp(1, 127),
            gain: file.engine.gain.unwrap_or(fallback.gain).clamp(0.0, 10.0),
        };
        let bank_extensions = file
            .bank
            .extensions
            .filter(|exts| !exts.is_empty())
            .unwrap_or_else(|| vec!["sf2".to_string()]);
        Self {
            engine,
            bank_extensions,
        }
    }

    pub fn engine_settings(&self) -> EngineSettings {
        self.engine
    }

    /// Extensions offered by the bank file picker, without the dot.
    pub fn bank_extensions(&self) -> &[String] {
        &self.bank_extensions
    }
}

fn embedded() -> ConfigFile {
    match toml::from_str(DEFAULT_CONFIG) {
        Ok(file) => file,
        Err(e) => {
            log::error!(target: "config", "embedded config.toml is invalid: {}", e);
            ConfigFile::default()
        }
    }
}

fn user_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join("bankpad").join("config.toml"))
}

fn merge(base: &mut ConfigFile, user: ConfigFile) {
    if user.engine.channel.is_some() {
        base.engine.channel = user.engine.channel;
    }
    if user.engine.velocity.is_some() {
        base.engine.velocity = user.engine.velocity;
    }
    if user.engine.gain.is_some() {
        base.engine.gain = user.engine.gain;
    }
    if user.bank.extensions.is_some() {
        base.bank.extensions = user.bank.extensions;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_embedded_defaults() {
        let config = Config::from_file(embedded());
        let engine = config.engine_settings();
        assert_eq!(engine.channel, 0);
        assert_eq!(engine.velocity, 100);
        assert!((engine.gain - 1.0).abs() < f32::EPSILON);
        assert_eq!(config.bank_extensions(), ["sf2", "sf3"]);
    }

    #[test]
    fn test_user_override_is_partial() {
        let mut base = embedded();
        let user: ConfigFile = toml::from_str("[engine]\nvelocity = 64\n").unwrap();
        merge(&mut base, user);
        let config = Config::from_file(base);
        assert_eq!(config.engine_settings().velocity, 64);
        assert_eq!(config.engine_settings().channel, 0);
        assert_eq!(config.bank_extensions().len(), 2);
    }

    #[test]
    fn test_values_are_clamped() {
        let file: ConfigFile = toml::from_str(
            "[engine]\nchannel = 40\nvelocity = 0\ngain = 99.0\n[bank]\nextensions = []\n",
        )
        .unwrap();
        let config = Config::from_file(file);
        let engine = config.engine_settings();
        assert_eq!(engine.channel, 15);
        assert_eq!(engine.velocity, 1);
        assert!((engine.gain - 10.0).abs() < f32::EPSILON);
        assert_eq!(config.bank_extensions(), ["sf2"]);
    }

    #[test]
    fn test_empty_file_uses_fallbacks() {
        let file: ConfigFile = toml::from_str("").unwrap();
        let config = Config::from_file(file);
        assert_eq!(config.engine_settings(), EngineSettings::default());
    }
}
