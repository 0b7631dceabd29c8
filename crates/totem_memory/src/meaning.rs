//! Meaning phrase generation
//!
//! Turns a symbol's current state into a short natural-language phrase for
//! text generators. A drifted meaning is returned verbatim; otherwise the
//! phrase is built from the dominant emotions plus a recurrence-based
//! embellishment. Template choice is random, content is deterministic.

use crate::symbol::SymbolicMemory;
use rand::seq::SliceRandom;

/// Phrase for a symbol the store has never recorded.
pub fn unknown_symbol_phrase(name: &str) -> String {
    format!("unknown symbol '{name}'... it carries a mystery not yet named")
}

/// Describe a known symbol's current meaning.
pub fn describe(symbol: &SymbolicMemory) -> String {
    if let Some(drifted) = &symbol.symbolic_drift {
        return drifted.clone();
    }

    let Some(primary) = symbol.dominant_emotions.first() else {
        return format!("{} carries unspoken significance", symbol.name);
    };

    let mut rng = rand::thread_rng();
    let base = match symbol.dominant_emotions.get(1) {
        Some(secondary) => {
            let templates = [
                format!("{} speaks of {primary}, shaded with {secondary}", symbol.name),
                format!("{} holds {primary} with an undertone of {secondary}", symbol.name),
            ];
            templates.choose(&mut rng).cloned().unwrap_or_default()
        }
        None => {
            let templates = [
                format!("{} resonates with {primary}", symbol.name),
                format!("{} carries the feeling of {primary}", symbol.name),
            ];
            templates.choose(&mut rng).cloned().unwrap_or_default()
        }
    };

    if symbol.recurrence_count > 10 {
        format!("{base}, deepened by repetition")
    } else if symbol.recurrence_count > 5 {
        format!("{base}, familiar yet evolving")
    } else {
        base
    }
}
