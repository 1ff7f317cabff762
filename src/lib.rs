//! # Meimei-RS: Religion-Aware Kanji Name Scoring Engine
//!
//! A Rust library that scores and ranks combinations of Japanese kanji
//! characters as candidate personal names. Each combination is weighted by
//! religious/cultural compatibility and by general sentiment attributes:
//!
//! - **Compatibility Scoring**: per-character religious compatibility with
//!   hard vetoes on taboo concepts and an open, extensible rule registry
//! - **General Scoring**: sentiment/energy blending weighted toward the
//!   requester's preferred naming style, plus lexical-overlap bonuses
//! - **Ranked Generation**: bounded combinatorial assembly, deterministic
//!   ranking, and human-readable explanations for every surviving candidate
//!
//! ## Architecture
//!
//! ```text
//! ┌────────────────────────────────────────────────────────┐
//! │                     NameGenerator                      │
//! ├────────────────────────────────────────────────────────┤
//! │  KanjiCatalog  │  CompatibilityChecker  │  Config      │
//! │                │                        │              │
//! │ • glyph data   │ • rule registry        │ • caps       │
//! │ • validation   │ • veto + affinity      │ • weights    │
//! │ • YAML load    │ • aggregate scoring    │ • YAML load  │
//! └────────────────────────────────────────────────────────┘
//! ```
//!
//! Data flows one direction: catalog → generator (candidate lookup) →
//! compatibility checker (scoring) → generator (ranking, explanation) →
//! caller. The catalog and rule tables are read-only after construction,
//! so a generator can be shared freely across threads.
//!
//! ## Quick Start
//!
//! ```rust
//! use meimei_rs::{NameGenerator, PersonalityProfile, ReligiousContext};
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let generator = NameGenerator::builtin()?;
//!
//!     let profile = PersonalityProfile::new(ReligiousContext::secular())
//!         .with_primary_traits(["hope", "courage"])
//!         .with_preferred_style("energetic");
//!
//!     let results = generator.generate("Ada", &profile)?;
//!     for candidate in &results {
//!         println!("{}: {:.2}", candidate.glyph_string(), candidate.score);
//!     }
//!     Ok(())
//! }
//! ```

#![warn(missing_docs)]
#![warn(unsafe_code)]
#![warn(clippy::all)]
#![allow(clippy::module_name_repetitions)]

// Core scoring engine modules
pub mod core {
    //! Core scoring algorithms and data structures.

    pub mod catalog;
    pub mod compatibility;
    pub mod config;
    pub mod errors;
    pub mod generator;
    pub mod profile;
}

// Re-export primary types for convenience
pub use crate::core::catalog::{KanjiCatalog, KanjiMetadata, Religion};
pub use crate::core::compatibility::{CompatibilityChecker, ReligionRuleSet};
pub use crate::core::config::{GeneratorConfig, ToneWeights};
pub use crate::core::errors::{MeimeiError, Result};
pub use crate::core::generator::{CharacterDetail, NameGenerator, ScoredName};
pub use crate::core::profile::{PersonalityProfile, ReligiousContext};

/// Library version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
