//! Symbol records and weight decay
//!
//! An association's `weight` field holds the *original* weight, immutably.
//! The decayed value is computed on demand as a pure function of age, so
//! repeated reads never compound the decay. Older snapshot files that carry
//! null `dominant_emotions` or non-finite weights deserialize safely.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use totem_core::StoreTuning;

/// Guard against NaN and Infinity in persisted weights.
/// If the value is NaN or Inf, replace with 0.0.
fn deserialize_safe_f32<'de, D>(deserializer: D) -> Result<f32, D::Error>
where
    D: Deserializer<'de>,
{
    let v = f32::deserialize(deserializer)?;
    if v.is_finite() {
        Ok(v)
    } else {
        tracing::warn!("NaN/Inf detected in snapshot, resetting to 0.0");
        Ok(0.0)
    }
}

/// Accept `null` where an older snapshot never computed the field.
fn deserialize_null_as_empty<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let opt = Option::<Vec<String>>::deserialize(deserializer)?;
    Ok(opt.unwrap_or_default())
}

/// One weighted emotional tag applied to a symbol at a point in time.
///
/// Created once, never mutated. The effective weight is derived from the
/// original weight and the timestamp.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EmotionalAssociation {
    pub emotion: String,

    /// Original weight as recorded (equal to the mood intensity). Nominally
    /// in [0, 1] but not enforced defensively.
    #[serde(deserialize_with = "deserialize_safe_f32")]
    pub weight: f32,

    pub timestamp: DateTime<Utc>,

    /// Free-text label describing how the association arose.
    pub context: String,

    /// Optional link to a triggering ritual/event id.
    pub ritual_connection: Option<String>,

    /// Marks associations that originated from dream content. Downstream
    /// filtering only; never affects scoring.
    pub dream_echo: bool,
}

impl EmotionalAssociation {
    pub fn new(emotion: impl Into<String>, weight: f32, context: impl Into<String>) -> Self {
        Self {
            emotion: emotion.into(),
            weight,
            timestamp: Utc::now(),
            context: context.into(),
            ritual_connection: None,
            dream_echo: false,
        }
    }

    /// The decay multiplier for an association `hours_old` hours old:
    /// `max(decay_floor, exp(-decay_rate * hours_old))`.
    pub fn decay_multiplier(hours_old: f32, tuning: &StoreTuning) -> f32 {
        (-tuning.decay_rate * hours_old.max(0.0))
            .exp()
            .max(tuning.decay_floor)
    }

    /// Current weight at `now`: a pure function of the original weight and
    /// the association's age. Never mutates the record.
    pub fn effective_weight(&self, now: DateTime<Utc>, tuning: &StoreTuning) -> f32 {
        let hours_old = (now - self.timestamp).num_seconds() as f32 / 3600.0;
        self.weight * Self::decay_multiplier(hours_old, tuning)
    }
}

/// The aggregate record for one symbol name.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SymbolicMemory {
    pub name: String,

    /// Insertion order is chronological.
    pub emotional_associations: Vec<EmotionalAssociation>,

    /// Incremented once per recorded use.
    pub recurrence_count: u32,

    pub last_used: DateTime<Utc>,

    /// The current drifted meaning, set once a drift event fires.
    pub symbolic_drift: Option<String>,

    /// Description of first creation context.
    pub birth_context: String,

    /// Top-3 emotions by summed effective weight, descending. Derived;
    /// recomputed after every use.
    #[serde(deserialize_with = "deserialize_null_as_empty")]
    pub dominant_emotions: Vec<String>,

    /// Confidence that the symbol's meaning is settled, in
    /// [min_stability, 1.0]. Only ever decreases after creation.
    #[serde(deserialize_with = "deserialize_safe_f32")]
    pub meaning_stability: f32,
}

impl SymbolicMemory {
    pub fn new(
        name: impl Into<String>,
        birth_context: impl Into<String>,
        meaning_stability: f32,
    ) -> Self {
        Self {
            name: name.into(),
            emotional_associations: Vec::new(),
            recurrence_count: 0,
            last_used: Utc::now(),
            symbolic_drift: None,
            birth_context: birth_context.into(),
            dominant_emotions: Vec::new(),
            meaning_stability,
        }
    }

    /// Recompute `dominant_emotions`: top-3 emotions by summed effective
    /// weight. Ties break toward the first-seen emotion (stable sort over
    /// insertion-ordered aggregation).
    pub fn recompute_dominants(&mut self, now: DateTime<Utc>, tuning: &StoreTuning) {
        let mut totals: Vec<(String, f32)> = Vec::new();
        for assoc in &self.emotional_associations {
            let w = assoc.effective_weight(now, tuning);
            match totals.iter_mut().find(|(e, _)| e == &assoc.emotion) {
                Some((_, total)) => *total += w,
                None => totals.push((assoc.emotion.clone(), w)),
            }
        }
        totals.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(std::cmp::Ordering::Equal));
        self.dominant_emotions = totals.into_iter().take(3).map(|(e, _)| e).collect();
    }

    /// Lower meaning stability by `amount`, floored at `min`.
    pub fn lower_stability(&mut self, amount: f32, min: f32) {
        self.meaning_stability = (self.meaning_stability - amount).max(min);
    }

    /// Mean effective weight of associations matching `emotion` exactly.
    /// Zero if none match.
    pub fn mean_weight_for(&self, emotion: &str, now: DateTime<Utc>, tuning: &StoreTuning) -> f32 {
        let matching: Vec<f32> = self
            .emotional_associations
            .iter()
            .filter(|a| a.emotion == emotion)
            .map(|a| a.effective_weight(now, tuning))
            .collect();
        if matching.is_empty() {
            0.0
        } else {
            matching.iter().sum::<f32>() / matching.len() as f32
        }
    }

    /// Retention compaction: drop associations whose effective weight has
    /// become negligible, then cap the list length by dropping the oldest.
    pub fn compact(&mut self, now: DateTime<Utc>, tuning: &StoreTuning) {
        self.emotional_associations
            .retain(|a| a.effective_weight(now, tuning) >= tuning.prune_weight_threshold);
        let len = self.emotional_associations.len();
        if len > tuning.max_associations_per_symbol {
            self.emotional_associations
                .drain(0..len - tuning.max_associations_per_symbol);
        }
    }

    /// Clamp stability into its documented range after deserialization.
    pub fn normalize(&mut self, tuning: &StoreTuning) {
        self.meaning_stability = self
            .meaning_stability
            .clamp(tuning.min_stability, 1.0);
    }
}
