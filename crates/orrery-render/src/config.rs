//! Viewer configuration

use anyhow::{Context, Result};
use hifitime::Epoch;
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};
use std::str::FromStr;

/// Viewer settings, loadable from JSON; every field has a default so
/// the viewer runs with no config file and no assets.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct ViewerConfig {
    pub width: u32,
    pub height: u32,
    /// Stars in the backdrop
    pub star_count: usize,
    /// Particles in the main asteroid belt
    pub asteroid_count: usize,
    /// Particles in the Kuiper belt
    pub kuiper_count: usize,
    /// Seed for stars and belts
    pub seed: u64,
    /// Directory of equirectangular body textures (earth.png, mars.jpg, ...)
    pub texture_dir: Option<PathBuf>,
    /// Starting epoch, e.g. "2000-01-01T12:00:00 UTC"
    pub start_epoch: Option<String>,
    /// Initial simulation rate in days per wall second
    pub rate_days_per_second: f64,
}

impl Default for ViewerConfig {
    fn default() -> Self {
        Self {
            width: 1600,
            height: 900,
            star_count: 4000,
            asteroid_count: 3000,
            kuiper_count: 2500,
            seed: 2000,
            texture_dir: None,
            start_epoch: None,
            rate_days_per_second: 1.0,
        }
    }
}

impl ViewerConfig {
    /// Load a config from a JSON file
    pub fn load(path: &Path) -> Result<Self> {
        let file = File::open(path)
            .with_context(|| format!("Failed to open config: {}", path.display()))?;
        serde_json::from_reader(BufReader::new(file))
            .with_context(|| format!("Failed to parse config: {}", path.display()))
    }

    /// Parse `start_epoch`, if set
    pub fn resolve_start_epoch(&self) -> Result<Option<Epoch>> {
        match &self.start_epoch {
            None => Ok(None),
            Some(s) => {
                let epoch = Epoch::from_str(s)
                    .map_err(|e| anyhow::anyhow!("Invalid epoch {:?}: {}", s, e))?;
                Ok(Some(epoch))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_run_without_assets() {
        let config = ViewerConfig::default();
        assert!(config.texture_dir.is_none());
        assert!(config.start_epoch.is_none());
        assert!(config.width > 0 && config.height > 0);
        assert!(config.star_count > 0);
    }

    #[test]
    fn test_json_roundtrip() {
        let mut config = ViewerConfig::default();
        config.star_count = 123;
        config.texture_dir = Some(PathBuf::from("assets/textures"));

        let json = serde_json::to_string(&config).unwrap();
        let back: ViewerConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(back.star_count, 123);
        assert_eq!(back.texture_dir, config.texture_dir);
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let config: ViewerConfig = serde_json::from_str(r#"{"star_count": 7}"#).unwrap();
        assert_eq!(config.star_count, 7);
        assert_eq!(config.width, ViewerConfig::default().width);
    }

    #[test]
    fn test_epoch_parsing() {
        let mut config = ViewerConfig::default();
        assert!(config.resolve_start_epoch().unwrap().is_none());

        config.start_epoch = Some("2000-01-01T12:00:00 UTC".to_string());
        let epoch = config.resolve_start_epoch().unwrap().unwrap();
        assert_eq!(epoch, Epoch::from_gregorian_utc(2000, 1, 1, 12, 0, 0, 0));

        config.start_epoch = Some("not an epoch".to_string());
        assert!(config.resolve_start_epoch().is_err());
    }
}
