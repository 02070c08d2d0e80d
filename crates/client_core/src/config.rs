use std::{
    collections::HashSet,
    fs,
    path::{Path, PathBuf},
};

use anyhow::{bail, Context};
use serde::Deserialize;
use shared::domain::{EntitySpec, Outcome};
use url::Url;

pub const DEFAULT_CONFIG_PATH: &str = "surface.toml";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub server_url: String,
    pub entities: Vec<EntitySpec>,
    pub outcomes: Vec<Outcome>,
    pub default_outcome: Outcome,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            server_url: "http://127.0.0.1:5000".into(),
            entities: vec![
                EntitySpec::new("tamu", "Texas A&M"),
                EntitySpec::new("bama", "Alabama"),
                EntitySpec::new("uga", "Georgia"),
                EntitySpec::new("miss", "Ole Miss"),
            ],
            outcomes: vec![Outcome::win(), Outcome::loss()],
            default_outcome: Outcome::win(),
        }
    }
}

#[derive(Debug, Default, Deserialize)]
struct FileSettings {
    server_url: Option<String>,
    entities: Option<Vec<EntitySpec>>,
    outcomes: Option<Vec<Outcome>>,
    default_outcome: Option<Outcome>,
}

impl Settings {
    pub fn validate(&self) -> anyhow::Result<()> {
        if self.entities.is_empty() {
            bail!("at least one entity must be configured");
        }
        let mut seen = HashSet::new();
        for entity in &self.entities {
            if !seen.insert(&entity.id) {
                bail!("entity '{}' is configured more than once", entity.id);
            }
        }
        if !self.outcomes.contains(&self.default_outcome) {
            bail!(
                "default outcome '{}' is not one of the configured outcomes",
                self.default_outcome
            );
        }
        Url::parse(&self.server_url)
            .with_context(|| format!("invalid server url '{}'", self.server_url))?;
        Ok(())
    }

    fn apply_file(&mut self, file_cfg: FileSettings) {
        if let Some(v) = file_cfg.server_url {
            self.server_url = v;
        }
        if let Some(v) = file_cfg.entities {
            self.entities = v;
        }
        if let Some(v) = file_cfg.outcomes {
            self.outcomes = v;
        }
        if let Some(v) = file_cfg.default_outcome {
            self.default_outcome = v;
        }
    }
}

/// Defaults, then the TOML file (if present), then environment overrides.
pub fn load_settings() -> anyhow::Result<Settings> {
    let path = std::env::var("APP__CONFIG")
        .map(PathBuf::from)
        .unwrap_or_else(|_| PathBuf::from(DEFAULT_CONFIG_PATH));
    let mut settings = load_settings_from(&path)?;

    if let Ok(v) = std::env::var("SERVER_URL") {
        settings.server_url = v;
    }
    if let Ok(v) = std::env::var("APP__SERVER_URL") {
        settings.server_url = v;
    }

    settings.validate()?;
    Ok(settings)
}

pub fn load_settings_from(path: &Path) -> anyhow::Result<Settings> {
    let mut settings = Settings::default();
    let raw = match fs::read_to_string(path) {
        Ok(raw) => raw,
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => return Ok(settings),
        Err(err) => {
            return Err(err).with_context(|| format!("failed to read '{}'", path.display()))
        }
    };
    let file_cfg: FileSettings = toml::from_str(&raw)
        .with_context(|| format!("failed to parse '{}'", path.display()))?;
    settings.apply_file(file_cfg);
    Ok(settings)
}
