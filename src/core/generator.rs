//! Name generation pipeline.
//!
//! `NameGenerator` orchestrates the full flow: filter the catalog down to a
//! candidate pool for the profile, enumerate ordered character sequences of
//! the requested length, score each sequence (religious compatibility plus
//! general tone), attach explanation text, and return the top-ranked
//! candidates.
//!
//! Enumeration policy: ordered sequences **without repetition** of the
//! candidate pool (k-permutations), emitted lazily in lexicographic pool
//! order and hard-capped by `GeneratorConfig::max_combinations`. With the
//! pool itself capped, runtime stays bounded for realistic inputs.

use std::cmp::Ordering;

use indexmap::IndexSet;
use serde::Serialize;
use tracing::{debug, info, warn};

use crate::core::catalog::{KanjiCatalog, KanjiMetadata, Religion};
use crate::core::compatibility::CompatibilityChecker;
use crate::core::config::{GeneratorConfig, ToneWeights};
use crate::core::errors::{MeimeiError, Result};
use crate::core::profile::PersonalityProfile;

/// Maximum number of results returned per request.
pub const MAX_RESULTS: usize = 3;

/// Narrative emitted for secular profiles.
const UNIVERSAL_VALUES_SENTENCE: &str =
    "This name has been chosen to reflect universal human values.";

/// Style keywords that weight energy over sentiment.
const ENERGETIC_KEYWORDS: &[&str] = &["energetic", "dynamic", "bold", "vibrant"];

/// Style keywords that weight sentiment over energy.
const CALM_KEYWORDS: &[&str] = &["calm", "traditional", "serene", "gentle", "quiet"];

/// Per-character detail included in results.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CharacterDetail {
    /// The glyph
    pub glyph: char,
    /// English meanings
    pub meanings: Vec<String>,
    /// On readings
    pub readings_on: Vec<String>,
    /// Kun readings
    pub readings_kun: Vec<String>,
}

impl CharacterDetail {
    fn from_metadata(kanji: &KanjiMetadata) -> Self {
        Self {
            glyph: kanji.character,
            meanings: kanji.meanings.clone(),
            readings_on: kanji.readings_on.clone(),
            readings_kun: kanji.readings_kun.clone(),
        }
    }
}

/// One ranked name candidate.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScoredName {
    /// Glyphs in name order
    pub kanji: Vec<char>,
    /// Per-character detail (meanings and readings)
    pub characters: Vec<CharacterDetail>,
    /// Combined score in [0, 1]
    pub score: f64,
    /// Aggregate religious compatibility in [0, 1]
    pub religious_score: f64,
    /// General tone/overlap score in [0, 1]
    pub general_score: f64,
    /// Human-readable explanation of the match
    pub explanation: String,
    /// Religious-context narrative
    pub religious_context: String,
}

impl ScoredName {
    /// The glyphs joined into a single string
    pub fn glyph_string(&self) -> String {
        self.kanji.iter().collect()
    }
}

/// Lazy enumerator of k-permutations of `0..n` in lexicographic order.
///
/// Stops after `cap` sequences regardless of how many remain, which keeps
/// the pipeline bounded if the pool or target length grows.
struct SequenceIter {
    n: usize,
    k: usize,
    cap: usize,
    emitted: usize,
    current: Vec<usize>,
    used: Vec<bool>,
    started: bool,
    done: bool,
}

impl SequenceIter {
    fn new(n: usize, k: usize, cap: usize) -> Self {
        Self {
            n,
            k,
            cap,
            emitted: 0,
            current: Vec::with_capacity(k),
            used: vec![false; n],
            started: false,
            done: k == 0 || k > n,
        }
    }

    /// Advance `current` to the next permutation in lexicographic order.
    fn advance(&mut self) -> bool {
        let mut i = self.k;
        while i > 0 {
            i -= 1;
            let old = self.current[i];
            self.used[old] = false;

            // Smallest unused index greater than the one we just freed
            if let Some(next) = (old + 1..self.n).find(|&j| !self.used[j]) {
                self.current[i] = next;
                self.used[next] = true;

                // Refill the tail with the smallest unused indices
                for pos in i + 1..self.k {
                    if let Some(j) = (0..self.n).find(|&j| !self.used[j]) {
                        self.current[pos] = j;
                        self.used[j] = true;
                    }
                }
                return true;
            }
        }
        false
    }
}

impl Iterator for SequenceIter {
    type Item = Vec<usize>;

    fn next(&mut self) -> Option<Vec<usize>> {
        if self.done {
            return None;
        }
        if self.emitted >= self.cap {
            debug!(cap = self.cap, "combination cap reached, stopping enumeration");
            self.done = true;
            return None;
        }

        if !self.started {
            self.started = true;
            self.current = (0..self.k).collect();
            for &i in &self.current {
                self.used[i] = true;
            }
        } else if !self.advance() {
            self.done = true;
            return None;
        }

        self.emitted += 1;
        Some(self.current.clone())
    }
}

/// End-to-end candidate production: selection, enumeration, scoring,
/// ranking, and explanation generation.
///
/// Holds only read-only state, so one generator can serve any number of
/// independent `generate` calls.
#[derive(Debug, Clone)]
pub struct NameGenerator {
    catalog: KanjiCatalog,
    checker: CompatibilityChecker,
    config: GeneratorConfig,
}

impl NameGenerator {
    /// Create a generator from a catalog, rule registry, and configuration
    pub fn new(
        catalog: KanjiCatalog,
        checker: CompatibilityChecker,
        config: GeneratorConfig,
    ) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            catalog,
            checker,
            config,
        })
    }

    /// Generator backed by the built-in catalog and rule tables
    pub fn builtin() -> Result<Self> {
        Self::new(
            KanjiCatalog::builtin()?,
            CompatibilityChecker::builtin(),
            GeneratorConfig::default(),
        )
    }

    /// The catalog backing this generator
    pub fn catalog(&self) -> &KanjiCatalog {
        &self.catalog
    }

    /// The compatibility checker backing this generator
    pub fn checker(&self) -> &CompatibilityChecker {
        &self.checker
    }

    /// The active configuration
    pub fn config(&self) -> &GeneratorConfig {
        &self.config
    }

    /// Generate up to [`MAX_RESULTS`] ranked name candidates whose length
    /// matches the character count of `original_name`.
    ///
    /// All "no result" situations (no compatible candidates, every
    /// combination vetoed, too few candidates for the requested length)
    /// yield an empty list, not an error. Output is deterministic for
    /// identical inputs.
    pub fn generate(
        &self,
        original_name: &str,
        profile: &PersonalityProfile,
    ) -> Result<Vec<ScoredName>> {
        profile.validate()?;

        let length = original_name.chars().count();
        if length == 0 {
            return Err(MeimeiError::validation("original name must not be empty"));
        }
        if length > self.config.max_name_length {
            warn!(
                length,
                max = self.config.max_name_length,
                "requested name length exceeds configured maximum"
            );
            return Ok(Vec::new());
        }

        let lexicon = profile.lexicon();
        let candidates = self.select_candidates(profile, &lexicon);
        debug!(
            candidates = candidates.len(),
            length, "selected candidate pool"
        );
        if candidates.is_empty() {
            return Ok(Vec::new());
        }

        let mut scored: Vec<(Vec<usize>, ScoredName)> = Vec::new();
        for indices in SequenceIter::new(candidates.len(), length, self.config.max_combinations) {
            let combo: Vec<&KanjiMetadata> = indices.iter().map(|&i| candidates[i]).collect();

            let religious_score = self
                .checker
                .combination_score(&combo, &profile.religious_context);
            // Zero-tolerance filter on religious incompatibility
            if religious_score == 0.0 {
                continue;
            }

            let general_score = self.general_score(&combo, profile, &lexicon);
            let score = (religious_score + general_score) / 2.0;

            let tie_key: Vec<usize> = combo
                .iter()
                .map(|kanji| self.catalog.position(kanji.character).unwrap_or(usize::MAX))
                .collect();

            scored.push((
                tie_key,
                ScoredName {
                    kanji: combo.iter().map(|kanji| kanji.character).collect(),
                    characters: combo
                        .iter()
                        .map(|kanji| CharacterDetail::from_metadata(kanji))
                        .collect(),
                    score,
                    religious_score,
                    general_score,
                    explanation: self.explanation(&combo, profile, &lexicon),
                    religious_context: self.religious_narrative(&combo, profile),
                },
            ));
        }

        // Descending score, ties broken by catalog order of the glyphs
        scored.sort_by(|a, b| {
            b.1.score
                .partial_cmp(&a.1.score)
                .unwrap_or(Ordering::Equal)
                .then_with(|| a.0.cmp(&b.0))
        });

        let results: Vec<ScoredName> = scored
            .into_iter()
            .take(MAX_RESULTS)
            .map(|(_, name)| name)
            .collect();
        info!(results = results.len(), "generated name candidates");
        Ok(results)
    }

    /// Filter the catalog down to characters relevant to the profile.
    ///
    /// Every religiously compatible character is eligible; a relevance
    /// prescore (lexical overlap plus style-weighted tone) ranks them and
    /// the pool keeps the top `max_candidates`. The sort is stable, so
    /// catalog order breaks prescore ties.
    fn select_candidates<'a>(
        &'a self,
        profile: &PersonalityProfile,
        lexicon: &IndexSet<String>,
    ) -> Vec<&'a KanjiMetadata> {
        let weights = self.tone_weights(&profile.preferred_style);

        let mut ranked: Vec<(f64, &KanjiMetadata)> = self
            .catalog
            .iter()
            .filter(|kanji| {
                self.checker
                    .check_compatibility(kanji, &profile.religious_context)
                    > 0.0
            })
            .map(|kanji| {
                let overlap = Self::overlap_count(kanji, lexicon);
                let tone = weights.blend(kanji.sentiment_score, kanji.energy_level);
                (overlap as f64 + tone, kanji)
            })
            .collect();

        ranked.sort_by(|a, b| b.0.partial_cmp(&a.0).unwrap_or(Ordering::Equal));
        ranked.truncate(self.config.max_candidates);
        ranked.into_iter().map(|(_, kanji)| kanji).collect()
    }

    /// Tone weights implied by the preferred style keywords
    fn tone_weights(&self, style: &str) -> ToneWeights {
        let style = style.to_lowercase();
        if ENERGETIC_KEYWORDS.iter().any(|kw| style.contains(kw)) {
            self.config.energetic_weights
        } else if CALM_KEYWORDS.iter().any(|kw| style.contains(kw)) {
            self.config.calm_weights
        } else {
            self.config.balanced_weights
        }
    }

    /// Number of distinct lexicon terms matching this character's
    /// meanings or associations (case-insensitive exact match).
    fn overlap_count(kanji: &KanjiMetadata, lexicon: &IndexSet<String>) -> usize {
        lexicon
            .iter()
            .filter(|term| Self::kanji_matches_term(kanji, term.as_str()))
            .count()
    }

    fn kanji_matches_term(kanji: &KanjiMetadata, term: &str) -> bool {
        kanji
            .meanings
            .iter()
            .chain(&kanji.associations)
            .any(|word| word.to_lowercase() == term)
    }

    /// General score: style-weighted sentiment/energy blend plus a bonus
    /// per distinct matched profile term, clamped to [0, 1].
    fn general_score(
        &self,
        combo: &[&KanjiMetadata],
        profile: &PersonalityProfile,
        lexicon: &IndexSet<String>,
    ) -> f64 {
        let n = combo.len() as f64;
        let mean_sentiment = combo.iter().map(|k| k.sentiment_score).sum::<f64>() / n;
        let mean_energy = combo.iter().map(|k| k.energy_level).sum::<f64>() / n;

        let base = self
            .tone_weights(&profile.preferred_style)
            .blend(mean_sentiment, mean_energy);

        let matched = lexicon
            .iter()
            .filter(|term| combo.iter().any(|k| Self::kanji_matches_term(k, term.as_str())))
            .count();

        (base + matched as f64 * self.config.overlap_bonus).clamp(0.0, 1.0)
    }

    /// General explanation: which profile terms matched which characters.
    fn explanation(
        &self,
        combo: &[&KanjiMetadata],
        profile: &PersonalityProfile,
        lexicon: &IndexSet<String>,
    ) -> String {
        let mut sentences = Vec::new();
        for kanji in combo {
            let matched: Vec<&str> = lexicon
                .iter()
                .filter(|term| Self::kanji_matches_term(kanji, term.as_str()))
                .map(String::as_str)
                .collect();
            if matched.is_empty() {
                continue;
            }
            let meanings = if kanji.meanings.is_empty() {
                kanji.character.to_string()
            } else {
                kanji.meanings.join(", ")
            };
            sentences.push(format!(
                "The character {} ({}) reflects your {}.",
                kanji.character,
                meanings,
                matched.join(", ")
            ));
        }

        if sentences.is_empty() {
            if profile.preferred_style.is_empty() {
                "The characters were chosen for their overall sentiment and energy.".to_string()
            } else {
                format!(
                    "The characters were chosen for a {} tone.",
                    profile.preferred_style
                )
            }
        } else {
            sentences.join(" ")
        }
    }

    /// Religious-context narrative for a combination.
    ///
    /// Secular profiles get a fixed universal-values sentence. Otherwise
    /// each character contributes a sentence listing its religious concepts,
    /// with any concept containing a context taboo (substring match)
    /// filtered out; characters with nothing left contribute nothing.
    fn religious_narrative(&self, combo: &[&KanjiMetadata], profile: &PersonalityProfile) -> String {
        let context = &profile.religious_context;
        if context.religion == Religion::Secular {
            return UNIVERSAL_VALUES_SENTENCE.to_string();
        }

        let mut sentences = Vec::new();
        for kanji in combo {
            let relevant: Vec<&str> = kanji
                .religious_concepts
                .iter()
                .filter(|concept| !context.taboos.iter().any(|taboo| concept.contains(taboo.as_str())))
                .map(String::as_str)
                .collect();
            if !relevant.is_empty() {
                sentences.push(format!(
                    "The character {} represents {} in {} tradition.",
                    kanji.character,
                    relevant.join(", "),
                    context.religion
                ));
            }
        }
        sentences.join(" ")
    }
}
