use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::Path;

// ============================================================================
// Top-level config
// ============================================================================

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct TotemConfig {
    pub store: StoreConfig,
    pub tuning: StoreTuning,
}

impl TotemConfig {
    /// Load config from a TOML file, falling back to defaults for missing fields.
    /// After loading, env var overrides are applied.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path.as_ref())
            .with_context(|| format!("Failed to read config file: {}", path.as_ref().display()))?;
        let mut config: TotemConfig =
            toml::from_str(&content).with_context(|| "Failed to parse TOML config")?;
        config.apply_env_overrides();
        Ok(config)
    }

    /// Try to load from path, falling back to defaults with env overrides.
    /// A missing file is the normal no-config case; an unreadable or
    /// unparsable file is logged as a warning.
    pub fn load_or_default<P: AsRef<Path>>(path: P) -> Self {
        let path = path.as_ref();
        match Self::load(path) {
            Ok(cfg) => cfg,
            Err(e) => {
                let missing = e
                    .downcast_ref::<std::io::Error>()
                    .is_some_and(|io| io.kind() == std::io::ErrorKind::NotFound);
                if missing {
                    tracing::info!("No config file at {}, using defaults", path.display());
                } else {
                    tracing::warn!("Config file {} is invalid ({:#}), using defaults", path.display(), e);
                }
                let mut cfg = Self::default();
                cfg.apply_env_overrides();
                cfg
            }
        }
    }

    /// Apply environment variable overrides on top of file-based config.
    fn apply_env_overrides(&mut self) {
        if let Ok(v) = std::env::var("TOTEM_DATA_PATH") {
            self.store.data_path = v;
        }
        if let Ok(v) = std::env::var("TOTEM_SAVE_INTERVAL") {
            if let Ok(n) = v.parse() {
                self.tuning.save_interval = n;
            }
        }
    }
}

// ============================================================================
// Sub-configs
// ============================================================================

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct StoreConfig {
    /// Path of the JSON snapshot file.
    pub data_path: String,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            data_path: "totem.json".to_string(),
        }
    }
}

/// Tuning constants for decay, drift, the co-occurrence network and
/// retention. Injected at store construction; never read from globals.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct StoreTuning {
    /// Exponential decay rate per hour. 0.004 gives roughly a one-week
    /// half-life.
    pub decay_rate: f32,

    /// Minimum decay multiplier. An association never decays below this
    /// fraction of its original weight.
    pub decay_floor: f32,

    /// Drift amount above which a drift event fires automatically.
    pub drift_threshold: f32,

    /// How much meaning stability drops on an automatic drift event.
    pub stability_decay: f32,

    /// How much meaning stability drops on a forced drift.
    pub forced_drift_penalty: f32,

    /// Floor for meaning stability.
    pub min_stability: f32,

    /// Starting stability for symbols seeded from the archetype table.
    pub archetype_stability: f32,

    /// Starting stability for symbols first seen in conversation.
    pub emergent_stability: f32,

    /// Edge weight increment per co-occurrence.
    pub co_occurrence_step: f32,

    /// Edge weight cap.
    pub max_edge_weight: f32,

    /// Minimum edge weight followed during network traversal.
    pub traversal_min_weight: f32,

    /// Autosave after every Nth recorded use of a symbol. 0 disables autosave.
    pub save_interval: u32,

    /// Retention: maximum associations kept per symbol. Oldest are dropped.
    pub max_associations_per_symbol: usize,

    /// Retention: associations whose effective weight falls below this are
    /// compacted away.
    pub prune_weight_threshold: f32,

    /// Retention: maximum drift history entries kept.
    pub max_drift_history: usize,
}

impl Default for StoreTuning {
    fn default() -> Self {
        Self {
            decay_rate: 0.004,
            decay_floor: 0.1,
            drift_threshold: 0.3,
            stability_decay: 0.05,
            forced_drift_penalty: 0.2,
            min_stability: 0.1,
            archetype_stability: 1.0,
            emergent_stability: 0.8,
            co_occurrence_step: 0.1,
            max_edge_weight: 1.0,
            traversal_min_weight: 0.1,
            save_interval: 5,
            max_associations_per_symbol: 64,
            prune_weight_threshold: 0.01,
            max_drift_history: 256,
        }
    }
}

// ============================================================================
// Tests
// ============================================================================
