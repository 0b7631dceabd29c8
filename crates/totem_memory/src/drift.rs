//! Symbolic drift: detecting when a symbol's meaning is shifting
//!
//! Drift fires when a newly-used emotion lands far from the symbol's primary
//! dominant emotion. Low meaning stability amplifies the signal: a symbol
//! already in flux drifts more readily than a settled one.

use chrono::{DateTime, Utc};
use rand::seq::SliceRandom;
use serde::{Deserialize, Serialize};
use totem_core::EmotionLexicon;

/// One entry of the append-only drift history.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DriftEvent {
    pub symbol: String,
    pub old_emotion: String,
    pub new_emotion: String,
    pub context: String,
    pub drift_meaning: String,
    pub timestamp: DateTime<Utc>,
    pub stability_after: f32,
}

/// Compute the drift amount for a usage event.
///
/// Zero when the symbol has no dominants yet, or when `new_emotion` is
/// already among them. Otherwise:
/// `distance(new, primary) * intensity * (1 + (1 - stability)) / 2`.
pub fn drift_amount(
    dominants: &[String],
    new_emotion: &str,
    intensity: f32,
    stability: f32,
    lexicon: &EmotionLexicon,
) -> f32 {
    let Some(primary) = dominants.first() else {
        return 0.0;
    };
    if dominants.iter().any(|e| e == new_emotion) {
        return 0.0;
    }
    let distance = lexicon.distance(new_emotion, primary);
    distance * intensity * (1.0 + (1.0 - stability)) / 2.0
}

/// Generate the free-text drifted meaning for a symbol.
///
/// Purely textual; every template mentions the symbol name and the new
/// emotion so downstream phrasing stays grounded.
pub fn drift_meaning(symbol: &str, old_emotion: &str, new_emotion: &str) -> String {
    let mut rng = rand::thread_rng();
    if old_emotion.is_empty() {
        let templates = [
            format!("{symbol} has begun to carry {new_emotion}"),
            format!("{symbol} is taking on the shape of {new_emotion}"),
        ];
        return templates.choose(&mut rng).cloned().unwrap_or_default();
    }
    let templates = [
        format!("{symbol} no longer speaks only of {old_emotion}; lately it carries {new_emotion}"),
        format!("what was {old_emotion} in {symbol} has been shading into {new_emotion}"),
        format!("{symbol} has drifted: {new_emotion} now colors what {old_emotion} once held"),
    ];
    templates.choose(&mut rng).cloned().unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lex() -> EmotionLexicon {
        EmotionLexicon::default()
    }

    #[test]
    fn test_drift_zero_without_dominants() {
        let amount = drift_amount(&[], "storming", 0.9, 0.8, &lex());
        assert_eq!(amount, 0.0);
    }

    #[test]
    fn test_drift_zero_when_already_dominant() {
        let dominants = vec!["contemplative".to_string(), "yearning".to_string()];
        let amount = drift_amount(&dominants, "yearning", 0.9, 0.5, &lex());
        assert_eq!(amount, 0.0);
    }

    #[test]
    fn test_drift_positive_for_distant_emotion() {
        let dominants = vec!["joyful".to_string()];
        let amount = drift_amount(&dominants, "grieving", 0.9, 0.8, &lex());
        assert!(amount > 0.3, "expected threshold-crossing drift, got {amount}");
    }

    #[test]
    fn test_drift_scales_with_intensity() {
        let dominants = vec!["joyful".to_string()];
        let weak = drift_amount(&dominants, "grieving", 0.2, 0.8, &lex());
        let strong = drift_amount(&dominants, "grieving", 0.9, 0.8, &lex());
        assert!(strong > weak);
    }

    #[test]
    fn test_low_stability_amplifies_drift() {
        let dominants = vec!["joyful".to_string()];
        let settled = drift_amount(&dominants, "grieving", 0.7, 1.0, &lex());
        let in_flux = drift_amount(&dominants, "grieving", 0.7, 0.2, &lex());
        assert!(in_flux > settled);
    }

    #[test]
    fn test_drift_meaning_mentions_symbol_and_emotion() {
        for _ in 0..20 {
            let m = drift_meaning("mirror", "contemplative", "storming");
            assert!(m.contains("mirror"), "missing symbol in: {m}");
            assert!(m.contains("storming"), "missing new emotion in: {m}");
        }
    }

    #[test]
    fn test_drift_meaning_without_old_emotion() {
        let m = drift_meaning("mirror", "", "storming");
        assert!(m.contains("mirror"));
        assert!(m.contains("storming"));
    }
}
