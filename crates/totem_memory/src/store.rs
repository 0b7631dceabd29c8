//! The symbol memory store
//!
//! Owns all engine state: the symbol table, the emotion → symbols index, the
//! co-occurrence network and the drift history. All configuration (tuning
//! constants, emotion lexicon, archetype seed table) is injected at
//! construction so multiple stores can coexist in tests.
//!
//! The recording entry points keep a "never crash the conversation"
//! contract: internal faults are logged and surfaced as `false`, never
//! propagated. Fallible internals return `Result<_, StoreError>` for callers
//! that want the distinction.
//!
//! Persistence is a whole-file JSON snapshot written to a temp file in the
//! same directory and atomically renamed into place.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};
use std::path::PathBuf;

use totem_core::{
    default_archetypes, ArchetypeSeed, EmotionLexicon, MoodContext, StoreError, StoreTuning,
};

use crate::dream;
use crate::drift::{drift_amount, drift_meaning, DriftEvent};
use crate::meaning;
use crate::network::{SymbolConnection, SymbolNetwork};
use crate::symbol::{EmotionalAssociation, SymbolicMemory};

/// One row of a `get_symbols_by_emotion` query.
#[derive(Debug, Clone)]
pub struct EmotionalSymbol {
    pub name: String,
    pub meaning: String,
    /// Mean effective weight of the symbol's associations matching the
    /// queried emotion exactly.
    pub emotion_weight: f32,
    pub recurrence_count: u32,
    pub last_used: DateTime<Utc>,
    pub stability: f32,
}

/// The full-state snapshot persisted to disk.
#[derive(Debug, Serialize, Deserialize)]
struct Snapshot {
    symbols: HashMap<String, SymbolicMemory>,
    emotion_symbol_map: HashMap<String, Vec<String>>,
    symbol_networks: SymbolNetwork,
    drift_history: Vec<DriftEvent>,
    last_saved: DateTime<Utc>,
}

pub struct SymbolStore {
    symbols: HashMap<String, SymbolicMemory>,
    emotion_index: HashMap<String, Vec<String>>,
    network: SymbolNetwork,
    drift_history: Vec<DriftEvent>,
    tuning: StoreTuning,
    lexicon: EmotionLexicon,
    archetypes: Vec<ArchetypeSeed>,
    data_path: PathBuf,
}

impl SymbolStore {
    /// An empty, unseeded store. Nothing is read from or written to
    /// `data_path` until a save triggers.
    pub fn new(
        data_path: impl Into<PathBuf>,
        tuning: StoreTuning,
        lexicon: EmotionLexicon,
        archetypes: Vec<ArchetypeSeed>,
    ) -> Self {
        Self {
            symbols: HashMap::new(),
            emotion_index: HashMap::new(),
            network: SymbolNetwork::new(),
            drift_history: Vec::new(),
            tuning,
            lexicon,
            archetypes,
            data_path: data_path.into(),
        }
    }

    /// Open a store at `data_path` with default tuning, lexicon and
    /// archetype table, loading the snapshot if one exists.
    pub fn open(data_path: impl Into<PathBuf>) -> Self {
        Self::load(
            data_path,
            StoreTuning::default(),
            EmotionLexicon::default(),
            default_archetypes(),
        )
    }

    /// Load a store from `data_path`. A missing snapshot is the normal
    /// first-run path and seeds the archetype table; a corrupt snapshot is
    /// logged with the underlying error before the same fallback.
    pub fn load(
        data_path: impl Into<PathBuf>,
        tuning: StoreTuning,
        lexicon: EmotionLexicon,
        archetypes: Vec<ArchetypeSeed>,
    ) -> Self {
        let data_path = data_path.into();
        let mut store = Self::new(data_path.clone(), tuning, lexicon, archetypes);

        match std::fs::read_to_string(&data_path) {
            Ok(content) => match serde_json::from_str::<Snapshot>(&content) {
                Ok(snapshot) => {
                    store.apply_snapshot(snapshot);
                    tracing::info!(
                        path = %data_path.display(),
                        symbols = store.symbols.len(),
                        "symbol memory loaded"
                    );
                }
                Err(e) => {
                    tracing::warn!(
                        path = %data_path.display(),
                        error = %e,
                        "snapshot is corrupt, seeding archetypes instead"
                    );
                    store.seed_archetypes();
                }
            },
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                tracing::info!(
                    path = %data_path.display(),
                    "no snapshot found, seeding archetypes"
                );
                store.seed_archetypes();
            }
            Err(e) => {
                tracing::warn!(
                    path = %data_path.display(),
                    error = %e,
                    "failed to read snapshot, seeding archetypes instead"
                );
                store.seed_archetypes();
            }
        }
        store
    }

    fn apply_snapshot(&mut self, snapshot: Snapshot) {
        self.symbols = snapshot.symbols;
        for symbol in self.symbols.values_mut() {
            symbol.normalize(&self.tuning);
        }
        self.emotion_index = snapshot.emotion_symbol_map;
        self.network = snapshot.symbol_networks;
        self.drift_history = snapshot.drift_history;
    }

    /// Seed the store from its archetype table: full stability, one
    /// pre-populated association per symbol.
    pub fn seed_archetypes(&mut self) {
        let now = Utc::now();
        let seeds = self.archetypes.clone();
        for seed in seeds {
            let mut symbol = SymbolicMemory::new(
                &seed.name,
                &seed.birth_context,
                self.tuning.archetype_stability,
            );
            symbol
                .emotional_associations
                .push(EmotionalAssociation::new(
                    &seed.emotion,
                    seed.weight,
                    &seed.birth_context,
                ));
            symbol.recompute_dominants(now, &self.tuning);
            self.symbols.insert(seed.name.clone(), symbol);
            self.reindex_symbol(&seed.name);
        }
    }

    // ========================================================================
    // Recording
    // ========================================================================

    /// Record one usage of a symbol. Never raises: internal faults are
    /// logged and returned as `false` so the conversation keeps going.
    pub fn record_symbol_use(
        &mut self,
        symbol_name: &str,
        mood: &MoodContext,
        ritual_connection: Option<&str>,
        co_occurring: Option<&[String]>,
    ) -> bool {
        match self.try_record_symbol_use(symbol_name, mood, ritual_connection, co_occurring) {
            Ok(()) => true,
            Err(e) => {
                tracing::warn!(symbol = symbol_name, error = %e, "record_symbol_use failed");
                false
            }
        }
    }

    /// Fallible recording path. Returns the typed error so embedding hosts
    /// can distinguish bad input from an internal fault.
    pub fn try_record_symbol_use(
        &mut self,
        symbol_name: &str,
        mood: &MoodContext,
        ritual_connection: Option<&str>,
        co_occurring: Option<&[String]>,
    ) -> Result<(), StoreError> {
        let name = symbol_name.trim();
        if name.is_empty() {
            return Err(StoreError::EmptySymbolName);
        }
        let now = Utc::now();

        let symbol = self.symbols.entry(name.to_string()).or_insert_with(|| {
            tracing::debug!(symbol = name, "new symbol born");
            SymbolicMemory::new(name, mood.context.clone(), self.tuning.emergent_stability)
        });

        // Drift is judged against what dominated *before* this use; the new
        // association would otherwise vote for itself.
        let prior_dominants = symbol.dominant_emotions.clone();

        let mut assoc = EmotionalAssociation::new(
            mood.dominant_emotion.clone(),
            mood.intensity,
            mood.context.clone(),
        );
        assoc.ritual_connection = ritual_connection.map(|r| r.to_string());
        assoc.dream_echo = mood.dream_context;
        symbol.emotional_associations.push(assoc);

        symbol.recurrence_count += 1;
        symbol.last_used = now;
        symbol.compact(now, &self.tuning);
        symbol.recompute_dominants(now, &self.tuning);

        let amount = drift_amount(
            &prior_dominants,
            &mood.dominant_emotion,
            mood.intensity,
            symbol.meaning_stability,
            &self.lexicon,
        );
        let mut drift_event = None;
        if amount > self.tuning.drift_threshold {
            let old_emotion = prior_dominants.first().cloned().unwrap_or_default();
            let drifted = drift_meaning(name, &old_emotion, &mood.dominant_emotion);
            symbol.symbolic_drift = Some(drifted.clone());
            symbol.lower_stability(self.tuning.stability_decay, self.tuning.min_stability);
            drift_event = Some(DriftEvent {
                symbol: name.to_string(),
                old_emotion,
                new_emotion: mood.dominant_emotion.clone(),
                context: mood.context.clone(),
                drift_meaning: drifted,
                timestamp: now,
                stability_after: symbol.meaning_stability,
            });
        }
        let recurrence = symbol.recurrence_count;

        if let Some(event) = drift_event {
            tracing::info!(
                symbol = name,
                old = %event.old_emotion,
                new = %event.new_emotion,
                amount,
                "symbolic drift detected"
            );
            self.push_drift_event(event);
        }

        if let Some(others) = co_occurring {
            self.network.record_co_occurrence(
                name,
                others,
                self.tuning.co_occurrence_step,
                self.tuning.max_edge_weight,
            );
        }

        self.reindex_symbol(name);

        if self.tuning.save_interval > 0 && recurrence % self.tuning.save_interval == 0 {
            // Disk and memory may diverge until the next successful save.
            if let Err(e) = self.save() {
                tracing::warn!(error = %e, "autosave failed");
            }
        }
        Ok(())
    }

    /// Force a drift regardless of the threshold. Fails only for unknown
    /// symbols. Persists immediately.
    pub fn drift_symbol(&mut self, symbol_name: &str, new_emotion: &str, context: &str) -> bool {
        match self.try_drift_symbol(symbol_name, new_emotion, context) {
            Ok(()) => true,
            Err(e) => {
                tracing::debug!(symbol = symbol_name, error = %e, "drift_symbol failed");
                false
            }
        }
    }

    /// Fallible forced-drift path.
    pub fn try_drift_symbol(
        &mut self,
        symbol_name: &str,
        new_emotion: &str,
        context: &str,
    ) -> Result<(), StoreError> {
        let now = Utc::now();
        let Some(symbol) = self.symbols.get_mut(symbol_name) else {
            return Err(StoreError::UnknownSymbol(symbol_name.to_string()));
        };

        let old_emotion = symbol.dominant_emotions.first().cloned().unwrap_or_default();
        symbol.lower_stability(self.tuning.forced_drift_penalty, self.tuning.min_stability);
        symbol
            .emotional_associations
            .push(EmotionalAssociation::new(new_emotion, 0.9, context));
        symbol.compact(now, &self.tuning);
        symbol.recompute_dominants(now, &self.tuning);

        let drifted = drift_meaning(symbol_name, &old_emotion, new_emotion);
        symbol.symbolic_drift = Some(drifted.clone());
        let stability_after = symbol.meaning_stability;

        self.push_drift_event(DriftEvent {
            symbol: symbol_name.to_string(),
            old_emotion,
            new_emotion: new_emotion.to_string(),
            context: context.to_string(),
            drift_meaning: drifted,
            timestamp: now,
            stability_after,
        });
        self.reindex_symbol(symbol_name);

        if let Err(e) = self.save() {
            tracing::warn!(error = %e, "save after forced drift failed");
        }
        Ok(())
    }

    fn push_drift_event(&mut self, event: DriftEvent) {
        self.drift_history.push(event);
        let len = self.drift_history.len();
        if len > self.tuning.max_drift_history {
            self.drift_history.drain(0..len - self.tuning.max_drift_history);
        }
    }

    /// Remove-then-reinsert the symbol's entries in the emotion index so
    /// they track its current dominant emotions.
    fn reindex_symbol(&mut self, name: &str) {
        for bucket in self.emotion_index.values_mut() {
            bucket.retain(|n| n != name);
        }
        self.emotion_index.retain(|_, bucket| !bucket.is_empty());

        let Some(symbol) = self.symbols.get(name) else {
            return;
        };
        for emotion in symbol.dominant_emotions.clone() {
            self.emotion_index
                .entry(emotion)
                .or_default()
                .push(name.to_string());
        }
    }

    // ========================================================================
    // Queries
    // ========================================================================

    /// Current meaning phrase for a symbol. Pure query, no side effects.
    pub fn get_symbol_meaning(&self, symbol_name: &str) -> String {
        match self.symbols.get(symbol_name) {
            Some(symbol) => meaning::describe(symbol),
            None => meaning::unknown_symbol_phrase(symbol_name),
        }
    }

    /// Symbols currently indexed under `emotion`, heaviest first.
    pub fn get_symbols_by_emotion(&self, emotion: &str, limit: usize) -> Vec<EmotionalSymbol> {
        let now = Utc::now();
        let Some(names) = self.emotion_index.get(emotion) else {
            return Vec::new();
        };
        let mut rows: Vec<EmotionalSymbol> = names
            .iter()
            .filter_map(|n| self.symbols.get(n))
            .map(|s| EmotionalSymbol {
                name: s.name.clone(),
                meaning: meaning::describe(s),
                emotion_weight: s.mean_weight_for(emotion, now, &self.tuning),
                recurrence_count: s.recurrence_count,
                last_used: s.last_used,
                stability: s.meaning_stability,
            })
            .collect();
        rows.sort_by(|a, b| {
            b.emotion_weight
                .partial_cmp(&a.emotion_weight)
                .unwrap_or(std::cmp::Ordering::Equal)
                .then(b.last_used.cmp(&a.last_used))
        });
        rows.truncate(limit);
        rows
    }

    /// Connections reachable from a symbol within `depth` hops, each
    /// annotated with the target's current meaning.
    pub fn get_symbol_network(&self, symbol_name: &str, depth: u32) -> Vec<SymbolConnection> {
        self.network
            .connections_from(symbol_name, depth, self.tuning.traversal_min_weight)
            .into_iter()
            .map(|(symbol, weight, hop)| SymbolConnection {
                meaning: self.get_symbol_meaning(&symbol),
                symbol,
                weight,
                depth: hop,
            })
            .collect()
    }

    /// Pick up to `count` distinct symbols worth surfacing in a dream under
    /// the given mood: candidates match the dominant emotion or one of up to
    /// two family members, scored by weight, instability and recency.
    pub fn generate_dream_symbols(&self, mood: &MoodContext, count: usize) -> Vec<String> {
        let now = Utc::now();
        let mut emotions: Vec<String> = vec![mood.dominant_emotion.clone()];
        emotions.extend(
            self.lexicon
                .related(&mood.dominant_emotion)
                .iter()
                .take(2)
                .cloned(),
        );

        let mut seen: HashSet<&str> = HashSet::new();
        let mut scored: Vec<(String, f32)> = Vec::new();
        for emotion in &emotions {
            let Some(bucket) = self.emotion_index.get(emotion) else {
                continue;
            };
            for name in bucket {
                if !seen.insert(name.as_str()) {
                    continue;
                }
                let Some(symbol) = self.symbols.get(name) else {
                    continue;
                };
                let hours_since_use = (now - symbol.last_used).num_seconds() as f32 / 3600.0;
                let score = dream::dream_score(
                    symbol.mean_weight_for(emotion, now, &self.tuning),
                    symbol.meaning_stability,
                    dream::dream_recency_score(hours_since_use),
                );
                scored.push((name.clone(), score));
            }
        }
        scored.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(std::cmp::Ordering::Equal));
        scored.truncate(count);
        scored.into_iter().map(|(name, _)| name).collect()
    }

    // ========================================================================
    // Persistence
    // ========================================================================

    /// Write the full snapshot: serialize to a temp file in the same
    /// directory, then rename into place so a crash never leaves a
    /// truncated snapshot behind.
    pub fn save(&self) -> Result<(), StoreError> {
        let snapshot = Snapshot {
            symbols: self.symbols.clone(),
            emotion_symbol_map: self.emotion_index.clone(),
            symbol_networks: self.network.clone(),
            drift_history: self.drift_history.clone(),
            last_saved: Utc::now(),
        };
        let json = serde_json::to_string_pretty(&snapshot)?;

        if let Some(parent) = self.data_path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }
        let mut tmp = self.data_path.as_os_str().to_owned();
        tmp.push(".tmp");
        let tmp = PathBuf::from(tmp);
        std::fs::write(&tmp, json)?;
        std::fs::rename(&tmp, &self.data_path)?;
        tracing::debug!(path = %self.data_path.display(), "snapshot saved");
        Ok(())
    }

    // ========================================================================
    // Accessors
    // ========================================================================

    pub fn symbol(&self, name: &str) -> Option<&SymbolicMemory> {
        self.symbols.get(name)
    }

    pub fn symbol_count(&self) -> usize {
        self.symbols.len()
    }

    pub fn drift_history(&self) -> &[DriftEvent] {
        &self.drift_history
    }

    pub fn network(&self) -> &SymbolNetwork {
        &self.network
    }

    /// Names currently indexed under an emotion (empty if none).
    pub fn indexed_symbols(&self, emotion: &str) -> &[String] {
        self.emotion_index
            .get(emotion)
            .map(|v| v.as_slice())
            .unwrap_or(&[])
    }
}
