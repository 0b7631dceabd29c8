//! Store-level scenario tests.

use crate::store::SymbolStore;
use tempfile::TempDir;
use totem_core::{EmotionLexicon, MoodContext, StoreError, StoreTuning};

/// Fresh unseeded store backed by a throwaway directory.
fn empty_store() -> (SymbolStore, TempDir) {
    let dir = tempfile::tempdir().expect("tempdir");
    let store = SymbolStore::new(
        dir.path().join("totem.json"),
        StoreTuning::default(),
        EmotionLexicon::default(),
        vec![],
    );
    (store, dir)
}

fn mood(emotion: &str, intensity: f32) -> MoodContext {
    MoodContext::new(emotion, intensity).with_context("test conversation")
}

#[test]
fn test_first_use_creates_symbol() {
    let (mut store, _dir) = empty_store();
    assert!(store.record_symbol_use("mirror", &mood("contemplative", 0.7), None, None));

    let sym = store.symbol("mirror").expect("symbol created");
    assert_eq!(sym.recurrence_count, 1);
    assert_eq!(sym.dominant_emotions, vec!["contemplative"]);
    assert!((sym.meaning_stability - 0.8).abs() < 1e-6);
    assert_eq!(sym.birth_context, "test conversation");
    assert_eq!(sym.emotional_associations.len(), 1);
    assert!((sym.emotional_associations[0].weight - 0.7).abs() < 1e-6);
}

#[test]
fn test_empty_symbol_name_rejected() {
    let (mut store, _dir) = empty_store();
    assert!(!store.record_symbol_use("", &mood("contemplative", 0.7), None, None));
    assert!(!store.record_symbol_use("   ", &mood("contemplative", 0.7), None, None));
    assert_eq!(store.symbol_count(), 0);

    let err = store
        .try_record_symbol_use("", &mood("contemplative", 0.7), None, None)
        .unwrap_err();
    assert!(matches!(err, StoreError::EmptySymbolName));
}

#[test]
fn test_recurrence_accumulates() {
    let (mut store, _dir) = empty_store();
    for _ in 0..3 {
        store.record_symbol_use("river", &mood("peaceful", 0.5), None, None);
    }
    assert_eq!(store.symbol("river").unwrap().recurrence_count, 3);
    assert_eq!(
        store.symbol("river").unwrap().emotional_associations.len(),
        3
    );
}

#[test]
fn test_ritual_and_dream_flags_recorded() {
    let (mut store, _dir) = empty_store();
    let dreamy = mood("yearning", 0.6).from_dream();
    store.record_symbol_use("moon", &dreamy, Some("ritual-7"), None);

    let assoc = &store.symbol("moon").unwrap().emotional_associations[0];
    assert_eq!(assoc.ritual_connection.as_deref(), Some("ritual-7"));
    assert!(assoc.dream_echo);
}

#[test]
fn test_unknown_symbol_meaning() {
    let (store, _dir) = empty_store();
    let phrase = store.get_symbol_meaning("nonexistent");
    assert!(phrase.contains("unknown symbol"), "got: {phrase}");
}

#[test]
fn test_repeated_emotion_never_drifts() {
    let (mut store, _dir) = empty_store();
    for _ in 0..10 {
        store.record_symbol_use("moon", &mood("yearning", 0.9), None, None);
    }
    assert!(store.drift_history().is_empty());
    assert!(store.symbol("moon").unwrap().symbolic_drift.is_none());
    // Stability untouched
    assert!((store.symbol("moon").unwrap().meaning_stability - 0.8).abs() < 1e-6);
}

#[test]
fn test_distant_emotion_triggers_drift() {
    let (mut store, _dir) = empty_store();
    store.record_symbol_use("sun", &mood("joyful", 0.8), None, None);
    store.record_symbol_use("sun", &mood("grieving", 0.9), None, None);

    assert_eq!(store.drift_history().len(), 1);
    let event = &store.drift_history()[0];
    assert_eq!(event.symbol, "sun");
    assert_eq!(event.old_emotion, "joyful");
    assert_eq!(event.new_emotion, "grieving");
    assert!((event.stability_after - 0.75).abs() < 1e-6);

    let sym = store.symbol("sun").unwrap();
    assert!((sym.meaning_stability - 0.75).abs() < 1e-6);
    let drifted = sym.symbolic_drift.as_ref().expect("drift meaning set");
    assert!(drifted.contains("sun"));
    assert!(drifted.contains("grieving"));
}

#[test]
fn test_nearby_emotion_below_threshold() {
    let (mut store, _dir) = empty_store();
    store.record_symbol_use("garden", &mood("hopeful", 0.6), None, None);
    // luminous sits next to hopeful; too close to cross the threshold
    store.record_symbol_use("garden", &mood("luminous", 0.6), None, None);
    assert!(store.drift_history().is_empty());
}

#[test]
fn test_forced_drift() {
    let (mut store, _dir) = empty_store();
    store.record_symbol_use("mirror", &mood("contemplative", 0.7), None, None);

    assert!(store.drift_symbol("mirror", "storming", "forced in test"));

    let sym = store.symbol("mirror").unwrap();
    assert!((sym.meaning_stability - 0.6).abs() < 1e-6, "0.8 - 0.2");
    let drifted = sym.symbolic_drift.as_ref().expect("drift meaning set");
    assert!(drifted.contains("mirror"));
    assert!(drifted.contains("storming"));
    assert_eq!(store.drift_history().len(), 1);
    // The 0.9-weight association pushes storming into the dominants
    assert!(sym.dominant_emotions.contains(&"storming".to_string()));
}

#[test]
fn test_forced_drift_unknown_symbol() {
    let (mut store, _dir) = empty_store();
    assert!(!store.drift_symbol("nonexistent", "storming", "test"));
    assert!(store.drift_history().is_empty());

    let err = store
        .try_drift_symbol("nonexistent", "storming", "test")
        .unwrap_err();
    assert!(matches!(err, StoreError::UnknownSymbol(name) if name == "nonexistent"));
}

#[test]
fn test_stability_floors_at_minimum() {
    let (mut store, _dir) = empty_store();
    store.record_symbol_use("mirror", &mood("contemplative", 0.7), None, None);
    for _ in 0..6 {
        store.drift_symbol("mirror", "storming", "again");
    }
    let sym = store.symbol("mirror").unwrap();
    assert!((sym.meaning_stability - 0.1).abs() < 1e-6);
}

#[test]
fn test_co_occurrence_network_symmetric() {
    let (mut store, _dir) = empty_store();
    let others = vec!["river".to_string(), "moon".to_string()];
    store.record_symbol_use("mirror", &mood("contemplative", 0.7), None, Some(&others));

    let net = store.network();
    assert!((net.edge("mirror", "river") - 0.1).abs() < 1e-6);
    assert!((net.edge("river", "mirror") - 0.1).abs() < 1e-6);
    assert!((net.edge("mirror", "moon") - 0.1).abs() < 1e-6);
    assert!(net.edge("river", "moon") < 1e-6, "no edge between co-occurrers");
}

#[test]
fn test_symbol_network_query_annotates_meaning() {
    let (mut store, _dir) = empty_store();
    store.record_symbol_use("river", &mood("peaceful", 0.8), None, None);
    let others = vec!["river".to_string()];
    // Two co-occurrences lift the edge above the traversal floor
    store.record_symbol_use("mirror", &mood("contemplative", 0.7), None, Some(&others));
    store.record_symbol_use("mirror", &mood("contemplative", 0.7), None, Some(&others));

    let connections = store.get_symbol_network("mirror", 2);
    assert_eq!(connections.len(), 1);
    assert_eq!(connections[0].symbol, "river");
    assert_eq!(connections[0].depth, 1);
    assert!((connections[0].weight - 0.2).abs() < 1e-6);
    assert!(connections[0].meaning.contains("peaceful"));
}

#[test]
fn test_emotion_index_tracks_dominants() {
    let (mut store, _dir) = empty_store();
    store.record_symbol_use("moon", &mood("yearning", 0.8), None, None);
    assert_eq!(store.indexed_symbols("yearning"), ["moon".to_string()]);

    // Bury yearning under a heavier emotion repeated enough to push it
    // out of the top 3
    for e in ["grieving", "melancholy", "weary"] {
        for _ in 0..3 {
            store.record_symbol_use("moon", &mood(e, 0.9), None, None);
        }
    }
    assert!(store.indexed_symbols("yearning").is_empty());
    assert_eq!(store.indexed_symbols("grieving"), ["moon".to_string()]);
}

#[test]
fn test_get_symbols_by_emotion_sorted() {
    let (mut store, _dir) = empty_store();
    store.record_symbol_use("moon", &mood("yearning", 0.9), None, None);
    store.record_symbol_use("well", &mood("yearning", 0.4), None, None);

    let rows = store.get_symbols_by_emotion("yearning", 10);
    assert_eq!(rows.len(), 2);
    assert_eq!(rows[0].name, "moon");
    assert!(rows[0].emotion_weight > rows[1].emotion_weight);
    assert_eq!(rows[0].recurrence_count, 1);
    assert!((rows[0].stability - 0.8).abs() < 1e-6);

    let limited = store.get_symbols_by_emotion("yearning", 1);
    assert_eq!(limited.len(), 1);
    assert_eq!(limited[0].name, "moon");
}

#[test]
fn test_get_symbols_by_emotion_unknown_bucket() {
    let (store, _dir) = empty_store();
    assert!(store.get_symbols_by_emotion("joyful", 5).is_empty());
}

#[test]
fn test_generate_dream_symbols_from_family() {
    let (mut store, _dir) = empty_store();
    // yearning's first two family members are wistful and melancholy
    store.record_symbol_use("moon", &mood("yearning", 0.8), None, None);
    store.record_symbol_use("sea", &mood("wistful", 0.7), None, None);
    store.record_symbol_use("ash", &mood("melancholy", 0.6), None, None);
    store.record_symbol_use("lantern", &mood("joyful", 0.9), None, None);

    let picked = store.generate_dream_symbols(&mood("yearning", 0.7), 3);
    assert!(picked.len() <= 3);
    assert!(!picked.is_empty());
    for name in &picked {
        assert!(
            ["moon", "sea", "ash"].contains(&name.as_str()),
            "unexpected dream symbol: {name}"
        );
    }
}

#[test]
fn test_generate_dream_symbols_distinct_and_capped() {
    let (mut store, _dir) = empty_store();
    for name in ["moon", "well", "tide", "door"] {
        store.record_symbol_use(name, &mood("yearning", 0.7), None, None);
    }
    let picked = store.generate_dream_symbols(&mood("yearning", 0.7), 3);
    assert_eq!(picked.len(), 3);
    let mut unique = picked.clone();
    unique.sort();
    unique.dedup();
    assert_eq!(unique.len(), 3);
}

#[test]
fn test_generate_dream_symbols_empty_store() {
    let (store, _dir) = empty_store();
    assert!(store
        .generate_dream_symbols(&mood("yearning", 0.7), 3)
        .is_empty());
}

#[test]
fn test_meaning_reflects_drift() {
    let (mut store, _dir) = empty_store();
    store.record_symbol_use("mirror", &mood("contemplative", 0.7), None, None);
    let before = store.get_symbol_meaning("mirror");
    assert!(before.contains("contemplative"));

    store.drift_symbol("mirror", "storming", "test");
    let after = store.get_symbol_meaning("mirror");
    assert!(after.contains("storming"));
}

#[test]
fn test_drift_history_capped() {
    let mut tuning = StoreTuning::default();
    tuning.max_drift_history = 3;
    let dir = tempfile::tempdir().unwrap();
    let mut store = SymbolStore::new(
        dir.path().join("totem.json"),
        tuning,
        EmotionLexicon::default(),
        vec![],
    );
    store.record_symbol_use("mirror", &mood("contemplative", 0.7), None, None);
    for i in 0..6 {
        store.drift_symbol("mirror", "storming", &format!("round {i}"));
    }
    assert_eq!(store.drift_history().len(), 3);
    assert_eq!(store.drift_history()[2].context, "round 5");
}
