//! Symbol co-occurrence network
//!
//! An undirected weighted graph over symbol names. Both directed edges are
//! written identically, so symmetry holds by construction. Edge weights grow
//! by a fixed step per co-occurrence and are capped.

use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};

/// A connection discovered during network traversal, annotated with the hop
/// depth at which it was first reached and the target's current meaning.
#[derive(Debug, Clone)]
pub struct SymbolConnection {
    pub symbol: String,
    pub weight: f32,
    pub depth: u32,
    pub meaning: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SymbolNetwork {
    edges: HashMap<String, HashMap<String, f32>>,
}

impl SymbolNetwork {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record one usage event where `name` appeared alongside `others`.
    /// Self-loops and blank names are ignored; both directions are updated
    /// identically and clamped to `cap`.
    pub fn record_co_occurrence(&mut self, name: &str, others: &[String], step: f32, cap: f32) {
        for other in others {
            if other == name || other.trim().is_empty() {
                continue;
            }
            for (from, to) in [(name, other.as_str()), (other.as_str(), name)] {
                let weight = self
                    .edges
                    .entry(from.to_string())
                    .or_default()
                    .entry(to.to_string())
                    .or_insert(0.0);
                *weight = (*weight + step).min(cap);
            }
        }
    }

    /// Current weight of the edge `a -> b` (0.0 if absent).
    pub fn edge(&self, a: &str, b: &str) -> f32 {
        self.edges
            .get(a)
            .and_then(|n| n.get(b))
            .copied()
            .unwrap_or(0.0)
    }

    pub fn is_empty(&self) -> bool {
        self.edges.is_empty()
    }

    /// Breadth-first traversal from `start`, following edges with weight
    /// above `min_weight`, up to `max_depth` hops. Each node is visited at
    /// most once (the hop recorded is the minimal one). Results are sorted
    /// by (depth ascending, weight descending).
    pub fn connections_from(
        &self,
        start: &str,
        max_depth: u32,
        min_weight: f32,
    ) -> Vec<(String, f32, u32)> {
        let mut visited: HashSet<String> = HashSet::new();
        visited.insert(start.to_string());

        let mut results: Vec<(String, f32, u32)> = Vec::new();
        let mut frontier = vec![start.to_string()];

        for hop in 1..=max_depth {
            let mut next = Vec::new();
            for node in &frontier {
                let Some(neighbors) = self.edges.get(node) else {
                    continue;
                };
                for (target, &weight) in neighbors {
                    if weight > min_weight && visited.insert(target.clone()) {
                        results.push((target.clone(), weight, hop));
                        next.push(target.clone());
                    }
                }
            }
            if next.is_empty() {
                break;
            }
            frontier = next;
        }

        results.sort_by(|a, b| {
            a.2.cmp(&b.2)
                .then(b.1.partial_cmp(&a.1).unwrap_or(std::cmp::Ordering::Equal))
        });
        results
    }
}
