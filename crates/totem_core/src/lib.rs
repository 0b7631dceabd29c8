//! # Totem Core
//!
//! Shared vocabulary for the symbolic memory engine:
//!
//! - **Emotion lexicon**: a fixed 2D coordinate table (Valence × Arousal) over
//!   named emotions, plus a family adjacency map. Emotional distance between
//!   two labels is Euclidean distance in this plane.
//! - **Mood context**: the normalized input record describing one usage event.
//! - **Configuration**: TOML-loadable tuning constants for decay, drift and
//!   retention. Injected at store construction so multiple stores can coexist.
//! - **Errors**: the typed failure model shared across the workspace.

pub mod archetype;
pub mod config;
pub mod emotion;
pub mod error;

pub use archetype::{default_archetypes, ArchetypeSeed};
pub use config::{StoreTuning, TotemConfig};
pub use emotion::{EmotionLexicon, EmotionPoint, MoodContext};
pub use error::StoreError;
