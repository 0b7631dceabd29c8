//! Emotion lexicon based on a Valence × Arousal coordinate plane
//!
//! Instead of treating emotion labels as opaque strings, each known label is
//! placed in a continuous 2D space. Distance between two labels is Euclidean
//! distance in this plane, normalized to [0, 1]. Unknown labels map to the
//! origin, so distance to them is still defined.
//!
//! The lexicon also carries a family adjacency map ("yearning" is kin to
//! "wistful" and "melancholy") used when widening a dream-symbol search
//! beyond the literal mood.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// A point in the Valence × Arousal plane.
///
/// - Valence: negative/positive (-1.0 to 1.0)
/// - Arousal: calm/activated (-1.0 to 1.0)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EmotionPoint {
    pub valence: f32,
    pub arousal: f32,
}

impl EmotionPoint {
    pub fn new(valence: f32, arousal: f32) -> Self {
        Self {
            valence: valence.clamp(-1.0, 1.0),
            arousal: arousal.clamp(-1.0, 1.0),
        }
    }

    /// Origin of the plane; the coordinate assigned to unknown labels.
    pub fn origin() -> Self {
        Self {
            valence: 0.0,
            arousal: 0.0,
        }
    }

    /// Raw Euclidean distance to another point.
    pub fn distance_to(&self, other: &EmotionPoint) -> f32 {
        let dv = self.valence - other.valence;
        let da = self.arousal - other.arousal;
        (dv * dv + da * da).sqrt()
    }
}

/// Immutable emotion vocabulary injected at store construction.
///
/// Holds the coordinate table and the family adjacency map. Built once,
/// never mutated; clone freely between stores in tests.
#[derive(Debug, Clone)]
pub struct EmotionLexicon {
    coordinates: HashMap<String, EmotionPoint>,
    families: HashMap<String, Vec<String>>,
}

impl Default for EmotionLexicon {
    fn default() -> Self {
        let mut coordinates = HashMap::new();
        let mut insert = |name: &str, v: f32, a: f32| {
            coordinates.insert(name.to_string(), EmotionPoint::new(v, a));
        };

        // Positive valence
        insert("joyful", 0.8, 0.7);
        insert("luminous", 0.7, 0.5);
        insert("hopeful", 0.6, 0.4);
        insert("tender", 0.5, 0.0);
        insert("peaceful", 0.5, -0.6);
        insert("serene", 0.4, -0.7);
        insert("curious", 0.4, 0.5);

        // Near-neutral valence
        insert("contemplative", 0.1, -0.4);
        insert("yearning", -0.1, 0.3);
        insert("wistful", -0.2, -0.2);
        insert("restless", -0.2, 0.6);

        // Negative valence
        insert("weary", -0.4, -0.6);
        insert("anxious", -0.5, 0.7);
        insert("melancholy", -0.6, -0.4);
        insert("storming", -0.7, 0.9);
        insert("grieving", -0.8, -0.1);

        let mut families = HashMap::new();
        let mut family = |name: &str, kin: &[&str]| {
            families.insert(
                name.to_string(),
                kin.iter().map(|k| k.to_string()).collect(),
            );
        };

        family("joyful", &["luminous", "hopeful", "curious"]);
        family("luminous", &["joyful", "hopeful"]);
        family("hopeful", &["luminous", "curious", "tender"]);
        family("tender", &["hopeful", "peaceful"]);
        family("peaceful", &["serene", "tender"]);
        family("serene", &["peaceful", "contemplative"]);
        family("curious", &["restless", "hopeful"]);
        family("contemplative", &["serene", "wistful"]);
        family("yearning", &["wistful", "melancholy", "hopeful"]);
        family("wistful", &["yearning", "melancholy"]);
        family("restless", &["anxious", "curious"]);
        family("weary", &["melancholy", "serene"]);
        family("anxious", &["restless", "storming"]);
        family("melancholy", &["grieving", "wistful", "weary"]);
        family("storming", &["anxious", "restless"]);
        family("grieving", &["melancholy", "yearning"]);

        Self {
            coordinates,
            families,
        }
    }
}

impl EmotionLexicon {
    /// Build a lexicon from explicit tables (for tests and alternate vocabularies).
    pub fn new(
        coordinates: HashMap<String, EmotionPoint>,
        families: HashMap<String, Vec<String>>,
    ) -> Self {
        Self {
            coordinates,
            families,
        }
    }

    /// Coordinate of a label; unknown labels map to the origin.
    pub fn point(&self, emotion: &str) -> EmotionPoint {
        self.coordinates
            .get(emotion)
            .copied()
            .unwrap_or_else(EmotionPoint::origin)
    }

    pub fn knows(&self, emotion: &str) -> bool {
        self.coordinates.contains_key(emotion)
    }

    /// Normalized emotional distance between two labels, in [0, 1].
    ///
    /// Raw Euclidean distance divided by 2 and clamped. The plane is bounded,
    /// so most pairs land well inside the range.
    pub fn distance(&self, a: &str, b: &str) -> f32 {
        let d = self.point(a).distance_to(&self.point(b)) / 2.0;
        d.clamp(0.0, 1.0)
    }

    /// Family members of a label (empty for unknown labels).
    pub fn related(&self, emotion: &str) -> &[String] {
        self.families
            .get(emotion)
            .map(|v| v.as_slice())
            .unwrap_or(&[])
    }

    pub fn labels(&self) -> impl Iterator<Item = &str> {
        self.coordinates.keys().map(|s| s.as_str())
    }
}

/// The mood a usage event arrived under.
///
/// This is the input record for `record_symbol_use` and
/// `generate_dream_symbols`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MoodContext {
    /// The emotion label dominating this event.
    pub dominant_emotion: String,

    /// Intensity of the mood, nominally in [0, 1]. Not clamped defensively;
    /// an over-unity intensity simply produces a heavier association.
    pub intensity: f32,

    /// Free-text description of how the event arose.
    pub context: String,

    /// Whether this event originated from dream content. Affects downstream
    /// filtering only, never scoring.
    pub dream_context: bool,
}

impl MoodContext {
    pub fn new(dominant_emotion: impl Into<String>, intensity: f32) -> Self {
        Self {
            dominant_emotion: dominant_emotion.into(),
            intensity,
            context: String::new(),
            dream_context: false,
        }
    }

    pub fn with_context(mut self, context: impl Into<String>) -> Self {
        self.context = context.into();
        self
    }

    pub fn from_dream(mut self) -> Self {
        self.dream_context = true;
        self
    }
}
