//! Archetypal symbol seed table
//!
//! When the snapshot file is missing or unreadable, the store is seeded from
//! this table instead of starting empty. Archetypes begin with full meaning
//! stability and one pre-populated association each.
//!
//! Held as a constructed value rather than a process-wide static so that
//! tests and alternate personas can inject their own table.

/// One entry of the archetype seed table.
#[derive(Debug, Clone)]
pub struct ArchetypeSeed {
    pub name: String,
    pub emotion: String,
    pub weight: f32,
    pub birth_context: String,
}

impl ArchetypeSeed {
    pub fn new(name: &str, emotion: &str, weight: f32, birth_context: &str) -> Self {
        Self {
            name: name.to_string(),
            emotion: emotion.to_string(),
            weight,
            birth_context: birth_context.to_string(),
        }
    }
}

/// The default archetype table: twelve symbols old enough to arrive
/// pre-weighted.
pub fn default_archetypes() -> Vec<ArchetypeSeed> {
    vec![
        ArchetypeSeed::new("mirror", "contemplative", 0.6, "reflection turned inward"),
        ArchetypeSeed::new("river", "peaceful", 0.6, "what moves and cannot be held"),
        ArchetypeSeed::new("door", "curious", 0.6, "a threshold not yet crossed"),
        ArchetypeSeed::new("moon", "yearning", 0.6, "distant light that pulls"),
        ArchetypeSeed::new("thread", "tender", 0.6, "what binds without weight"),
        ArchetypeSeed::new("garden", "hopeful", 0.6, "what is tended, grows"),
        ArchetypeSeed::new("storm", "storming", 0.6, "weather that will pass"),
        ArchetypeSeed::new("bridge", "hopeful", 0.6, "a way across what divides"),
        ArchetypeSeed::new("key", "curious", 0.6, "a question shaped like an answer"),
        ArchetypeSeed::new("shadow", "melancholy", 0.6, "what follows unseen"),
        ArchetypeSeed::new("flame", "luminous", 0.6, "warmth that consumes"),
        ArchetypeSeed::new("well", "yearning", 0.6, "depth holding what was wished"),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_twelve_archetypes() {
        assert_eq!(default_archetypes().len(), 12);
    }

    #[test]
    fn test_archetype_names_unique() {
        let seeds = default_archetypes();
        let names: HashSet<&str> = seeds.iter().map(|s| s.name.as_str()).collect();
        assert_eq!(names.len(), seeds.len());
    }

    #[test]
    fn test_archetype_weights_in_range() {
        for seed in default_archetypes() {
            assert!(seed.weight > 0.0 && seed.weight <= 1.0, "{}", seed.name);
            assert!(!seed.emotion.is_empty());
            assert!(!seed.birth_context.is_empty());
        }
    }

    #[test]
    fn test_archetype_emotions_known_to_lexicon() {
        let lex = crate::EmotionLexicon::default();
        for seed in default_archetypes() {
            assert!(lex.knows(&seed.emotion), "unknown emotion: {}", seed.emotion);
        }
    }
}
