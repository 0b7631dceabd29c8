//! Dream symbol selection scoring
//!
//! Symbols surface in dreams when they match the current mood (directly or
//! through an emotion family member), when their meaning is in flux, and
//! when they were used recently, but not *too* recently. The recency curve
//! peaks for symbols last touched between one and seven days ago.

/// Recency score for dream selection, from hours since the symbol was last
/// used. Freshly-used symbols are penalized so dreams reach a little further
/// back than the immediate conversation.
pub fn dream_recency_score(hours_since_use: f32) -> f32 {
    if hours_since_use < 24.0 {
        0.3
    } else if hours_since_use < 168.0 {
        1.0
    } else if hours_since_use < 336.0 {
        0.7
    } else {
        0.1
    }
}

/// Combined dream-worthiness score for a candidate symbol.
pub fn dream_score(emotion_weight: f32, stability: f32, recency: f32) -> f32 {
    0.4 * emotion_weight + 0.3 * (1.0 - stability) + 0.3 * recency
}
