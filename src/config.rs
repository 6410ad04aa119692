// src/config.rs
//! Umbrella engine configuration (TOML) with mtime-based hot reload.
//!
//! Every policy constant — confidence thresholds, gate bars, merge
//! slice size, ranking weights, domain lists — is overridable here
//! without a code change. Missing file or missing keys fall back to the
//! shipped defaults.
//!
//! TOML shape:
//! ```toml
//! [thresholds]
//! web = 0.5
//! rag = 0.35
//!
//! [gate]
//! min_score = 0.5
//! min_mean_topk = 0.30
//! top_k = 5
//!
//! [merge]
//! topk = 5
//!
//! [rank]
//! deadline_window_days = 30
//! gov_domains = ["nipa.kr", "bizinfo.go.kr"]
//! ```

use anyhow::{Context, Result};
use serde::Deserialize;
use std::{
    fs,
    path::{Path, PathBuf},
    sync::RwLock,
    time::SystemTime,
};
use tracing::info;

use crate::confidence::ConfidenceThresholds;
use crate::gate::GateParams;
use crate::merge::MergeConfig;
use crate::notice::RankConfig;

pub const DEFAULT_ENGINE_CONFIG_PATH: &str = "config/engine.toml";
pub const ENV_ENGINE_CONFIG_PATH: &str = "ENGINE_CONFIG_PATH";

#[derive(Debug, Clone, Default, Deserialize)]
pub struct EngineConfig {
    #[serde(default)]
    pub thresholds: ConfidenceThresholds,
    #[serde(default)]
    pub gate: GateParams,
    #[serde(default)]
    pub merge: MergeConfig,
    #[serde(default)]
    pub rank: RankConfig,
}

impl EngineConfig {
    /// Parse configuration from a TOML file.
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let s = fs::read_to_string(path)
            .with_context(|| format!("reading engine config {}", path.display()))?;
        let cfg: Self = toml::from_str(&s)
            .with_context(|| format!("parsing engine config {}", path.display()))?;
        Ok(cfg)
    }

    /// Resolve the config path from `ENGINE_CONFIG_PATH` (default
    /// `config/engine.toml`) and load it; shipped defaults when the file
    /// is absent or invalid.
    pub fn from_env_or_default() -> Self {
        let path = std::env::var(ENV_ENGINE_CONFIG_PATH)
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from(DEFAULT_ENGINE_CONFIG_PATH));
        match Self::load_from_file(&path) {
            Ok(cfg) => {
                info!(path = %path.display(), "engine config loaded");
                cfg
            }
            Err(_) => Self::default(),
        }
    }
}

/// Hot-reload wrapper: reloads when the config file mtime changes.
#[derive(Debug)]
pub struct HotReloadEngineConfig {
    path: PathBuf,
    inner: RwLock<State>,
}

#[derive(Debug)]
struct State {
    config: EngineConfig,
    last_modified: Option<SystemTime>,
}

impl HotReloadEngineConfig {
    /// Create with a path (defaults to `config/engine.toml` if `None`).
    pub fn new(path: Option<&Path>) -> Self {
        let path = path
            .map(Path::to_path_buf)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_ENGINE_CONFIG_PATH));
        Self {
            path,
            inner: RwLock::new(State {
                config: EngineConfig::default(),
                last_modified: None,
            }),
        }
    }

    /// Get the latest config, reloading if the file changed.
    pub fn current(&self) -> EngineConfig {
        let needs_reload = match fs::metadata(&self.path).and_then(|m| m.modified()) {
            Ok(mtime) => {
                let guard = self.inner.read().unwrap();
                guard.last_modified != Some(mtime)
            }
            // If the file isn't there, keep defaults; no reload.
            Err(_) => false,
        };

        if !needs_reload {
            return self.inner.read().unwrap().config.clone();
        }

        let mut guard = self.inner.write().unwrap();
        // Double-check in case of races.
        if let Ok(meta) = fs::metadata(&self.path) {
            if let Ok(mtime) = meta.modified() {
                if guard.last_modified != Some(mtime) {
                    if let Ok(cfg) = EngineConfig::load_from_file(&self.path) {
                        guard.config = cfg;
                        guard.last_modified = Some(mtime);
                    }
                }
            }
        }
        guard.config.clone()
    }
}
