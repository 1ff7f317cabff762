//! Religious compatibility scoring.
//!
//! A `CompatibilityChecker` holds an open registry mapping religion tags to
//! rule sets. Scoring a character is a short fixed sequence: secular always
//! passes, unregistered religions fall back to a default score, any taboo
//! match against the rule set's prohibited concepts vetoes the character
//! outright, and otherwise preferred-concept matches and recorded affinity
//! raise the score up to the 1.0 cap.

use std::path::PathBuf;

use indexmap::{IndexMap, IndexSet};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::core::catalog::{KanjiMetadata, Religion};
use crate::core::errors::{MeimeiError, Result};
use crate::core::profile::ReligiousContext;

/// Compatibility score for religions with no registered rule set.
/// Unknown but not disqualifying.
pub const DEFAULT_UNREGISTERED_SCORE: f64 = 0.8;

/// Score bonus per religious concept matching a preferred concept.
pub const PREFERRED_CONCEPT_BONUS: f64 = 0.2;

/// Scoring rules for one religion.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReligionRuleSet {
    /// Concepts that veto a character outright
    #[serde(default)]
    pub prohibited_concepts: IndexSet<String>,

    /// Concepts that raise a character's score
    #[serde(default)]
    pub preferred_concepts: IndexSet<String>,

    /// Weight applied to a character's recorded affinity, in [0, 1]
    pub sensitivity_level: f64,
}

impl ReligionRuleSet {
    /// Create a rule set with the given sensitivity and no concept lists
    pub fn new(sensitivity_level: f64) -> Self {
        Self {
            prohibited_concepts: IndexSet::new(),
            preferred_concepts: IndexSet::new(),
            sensitivity_level,
        }
    }

    /// Set the prohibited concepts
    pub fn with_prohibited<I, S>(mut self, concepts: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.prohibited_concepts = concepts.into_iter().map(Into::into).collect();
        self
    }

    /// Set the preferred concepts
    pub fn with_preferred<I, S>(mut self, concepts: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.preferred_concepts = concepts.into_iter().map(Into::into).collect();
        self
    }

    /// Validate the sensitivity range
    pub fn validate(&self) -> Result<()> {
        if !(0.0..=1.0).contains(&self.sensitivity_level) {
            return Err(MeimeiError::validation(format!(
                "sensitivity_level {} outside [0, 1]",
                self.sensitivity_level
            )));
        }
        Ok(())
    }
}

/// Open registry of per-religion rule sets plus the scoring contract.
///
/// New religions and denominational variants can be registered without
/// touching the scoring logic; religions with no rule set always score via
/// the default and never veto.
#[derive(Debug, Clone, Default)]
pub struct CompatibilityChecker {
    rules: IndexMap<Religion, ReligionRuleSet>,
}

impl CompatibilityChecker {
    /// Create an empty checker with no registered rule sets
    pub fn new() -> Self {
        Self::default()
    }

    /// Checker preloaded with the built-in christianity / islam / buddhism
    /// rule tables.
    pub fn builtin() -> Self {
        let mut rules = IndexMap::new();
        rules.insert(
            Religion::Islam,
            ReligionRuleSet::new(0.9)
                .with_prohibited(["酒", "豚", "賭"])
                .with_preferred(["光", "善", "真", "正", "信"]),
        );
        rules.insert(
            Religion::Christianity,
            ReligionRuleSet::new(0.7)
                .with_prohibited(["魔", "邪", "悪"])
                .with_preferred(["愛", "光", "恵", "祈", "信"]),
        );
        rules.insert(
            Religion::Buddhism,
            ReligionRuleSet::new(0.6)
                .with_prohibited(["殺", "痛"])
                .with_preferred(["慈", "悟", "智", "道", "禅"]),
        );
        Self { rules }
    }

    /// Register (or replace) the rule set for a religion
    pub fn register(&mut self, religion: Religion, rules: ReligionRuleSet) -> Result<()> {
        rules.validate()?;
        self.rules.insert(religion, rules);
        Ok(())
    }

    /// Look up the rule set registered for a religion
    pub fn rule_set(&self, religion: &Religion) -> Option<&ReligionRuleSet> {
        self.rules.get(religion)
    }

    /// Number of registered rule sets
    pub fn len(&self) -> usize {
        self.rules.len()
    }

    /// True when no rule sets are registered
    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// Load rule tables from a YAML mapping of religion tag to rule set
    pub fn from_yaml_str(content: &str) -> Result<Self> {
        let rules: IndexMap<Religion, ReligionRuleSet> = serde_yaml::from_str(content)?;
        let mut checker = Self::new();
        for (religion, rule_set) in rules {
            checker.register(religion, rule_set)?;
        }
        Ok(checker)
    }

    /// Load rule tables from a YAML file
    pub fn from_yaml_file(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        let content = std::fs::read_to_string(&path).map_err(|e| {
            MeimeiError::io(
                format!("Failed to read rules file: {}", path.display()),
                e,
            )
        })?;
        Self::from_yaml_str(&content)
    }

    /// Score one character's compatibility with a religious context.
    ///
    /// Always within [0, 1]: a taboo match returns exactly 0.0, everything
    /// else starts at 1.0 or the unregistered default and is capped at 1.0.
    pub fn check_compatibility(&self, kanji: &KanjiMetadata, context: &ReligiousContext) -> f64 {
        if context.religion == Religion::Secular {
            return 1.0;
        }

        let Some(rules) = self.rules.get(&context.religion) else {
            return DEFAULT_UNREGISTERED_SCORE;
        };

        // Hard veto overrides all other scoring
        for concept in &kanji.taboo_concepts {
            if rules.prohibited_concepts.contains(concept.as_str()) {
                debug!(
                    glyph = %kanji.character,
                    religion = %context.religion,
                    concept = %concept,
                    "character vetoed by prohibited concept"
                );
                return 0.0;
            }
        }

        let mut score = 1.0;

        let preferred_matches = kanji
            .religious_concepts
            .iter()
            .filter(|concept| rules.preferred_concepts.contains(concept.as_str()))
            .count();
        score += preferred_matches as f64 * PREFERRED_CONCEPT_BONUS;

        score += kanji.affinity(&context.religion) * rules.sensitivity_level;

        score.min(1.0)
    }

    /// Score a whole combination.
    ///
    /// Zero if any member character vetoes, otherwise the arithmetic mean
    /// of the per-character scores. Empty combinations score zero.
    pub fn combination_score(
        &self,
        combo: &[&KanjiMetadata],
        context: &ReligiousContext,
    ) -> f64 {
        if combo.is_empty() {
            return 0.0;
        }

        let mut total = 0.0;
        for kanji in combo {
            let score = self.check_compatibility(kanji, context);
            if score == 0.0 {
                return 0.0;
            }
            total += score;
        }
        total / combo.len() as f64
    }
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;
    use proptest::prelude::*;

    use super::*;
    use crate::core::catalog::KanjiCatalog;

    fn hikari() -> KanjiMetadata {
        KanjiCatalog::builtin().unwrap().get('光').unwrap().clone()
    }

    #[test]
    fn test_secular_always_passes() {
        let checker = CompatibilityChecker::builtin();
        let context = ReligiousContext::secular();

        let catalog = KanjiCatalog::builtin().unwrap();
        for kanji in catalog.iter() {
            assert_eq!(checker.check_compatibility(kanji, &context), 1.0);
        }
    }

    #[test]
    fn test_unregistered_religion_scores_default() {
        let checker = CompatibilityChecker::builtin();
        let context = ReligiousContext::new(Religion::Hinduism);

        let score = checker.check_compatibility(&hikari(), &context);
        assert_relative_eq!(score, DEFAULT_UNREGISTERED_SCORE);
    }

    #[test]
    fn test_unregistered_religion_never_vetoes() {
        let checker = CompatibilityChecker::builtin();
        let context = ReligiousContext::new(Religion::Other("animism".into()));
        let kanji = KanjiMetadata::new('宴').with_taboo_concepts(["酒"]);

        let score = checker.check_compatibility(&kanji, &context);
        assert_relative_eq!(score, DEFAULT_UNREGISTERED_SCORE);
    }

    #[test]
    fn test_taboo_concept_vetoes_regardless_of_affinity() {
        let checker = CompatibilityChecker::builtin();
        let context = ReligiousContext::new(Religion::Islam);

        let kanji = KanjiMetadata::new('宴')
            .with_affinity(Religion::Islam, 1.0)
            .with_religious_concepts(["光"])
            .with_taboo_concepts(["酒"]);

        assert_eq!(checker.check_compatibility(&kanji, &context), 0.0);
    }

    #[test]
    fn test_affinity_and_preferred_concepts_cap_at_one() {
        let checker = CompatibilityChecker::builtin();
        let context = ReligiousContext::new(Religion::Christianity);

        // 1.0 base + affinity bonus would exceed the cap
        let score = checker.check_compatibility(&hikari(), &context);
        assert_relative_eq!(score, 1.0);
    }

    #[test]
    fn test_preferred_concept_bonus_counts_exact_matches() {
        let mut checker = CompatibilityChecker::new();
        checker
            .register(
                Religion::Christianity,
                ReligionRuleSet::new(0.0).with_preferred(["faith", "grace"]),
            )
            .unwrap();

        let kanji = KanjiMetadata::new('信').with_religious_concepts(["faith", "devotion"]);
        let context = ReligiousContext::new(Religion::Christianity);

        // Base 1.0 + one match * 0.2, capped at 1.0
        assert_relative_eq!(checker.check_compatibility(&kanji, &context), 1.0);
    }

    #[test]
    fn test_rule_set_rejects_out_of_range_sensitivity() {
        let mut checker = CompatibilityChecker::new();
        let result = checker.register(Religion::Shinto, ReligionRuleSet::new(1.5));
        assert!(result.is_err());
    }

    #[test]
    fn test_registry_is_open_for_extension() {
        let mut checker = CompatibilityChecker::builtin();
        let before = checker.len();
        checker
            .register(
                Religion::Shinto,
                ReligionRuleSet::new(0.5).with_preferred(["道", "海"]),
            )
            .unwrap();

        assert_eq!(checker.len(), before + 1);
        assert!(checker.rule_set(&Religion::Shinto).is_some());
    }

    #[test]
    fn test_combination_score_vetoes_whole_combination() {
        let checker = CompatibilityChecker::builtin();
        let context = ReligiousContext::new(Religion::Islam);

        let clean = hikari();
        let vetoed = KanjiMetadata::new('宴').with_taboo_concepts(["酒"]);

        assert_eq!(checker.combination_score(&[&clean, &vetoed], &context), 0.0);
        assert!(checker.combination_score(&[&clean], &context) > 0.0);
    }

    #[test]
    fn test_combination_score_is_mean_of_members() {
        let mut checker = CompatibilityChecker::new();
        checker
            .register(Religion::Judaism, ReligionRuleSet::new(1.0))
            .unwrap();
        let context = ReligiousContext::new(Religion::Judaism);

        let a = KanjiMetadata::new('光').with_affinity(Religion::Judaism, 0.0);
        let b = KanjiMetadata::new('信').with_affinity(Religion::Judaism, 0.0);

        // Both score exactly 1.0 (base, no bonuses), so the mean is 1.0
        assert_relative_eq!(checker.combination_score(&[&a, &b], &context), 1.0);
    }

    #[test]
    fn test_empty_combination_scores_zero() {
        let checker = CompatibilityChecker::builtin();
        let context = ReligiousContext::secular();
        assert_eq!(checker.combination_score(&[], &context), 0.0);
    }

    #[test]
    fn test_rules_yaml_round_trip() {
        let yaml = "\
islam:
  prohibited_concepts: [酒, 豚, 賭]
  preferred_concepts: [光, 善]
  sensitivity_level: 0.9
animism:
  sensitivity_level: 0.4
";
        let checker = CompatibilityChecker::from_yaml_str(yaml).unwrap();
        assert_eq!(checker.len(), 2);
        assert!(checker.rule_set(&Religion::Islam).is_some());
        assert!(checker
            .rule_set(&Religion::Other("animism".into()))
            .is_some());
    }

    #[test]
    fn test_rules_yaml_rejects_invalid_sensitivity() {
        let yaml = "islam:\n  sensitivity_level: 2.0\n";
        assert!(CompatibilityChecker::from_yaml_str(yaml).is_err());
    }

    proptest! {
        #[test]
        fn compatibility_stays_within_bounds(
            affinity in 0.0..=1.0f64,
            sentiment in 0.0..=1.0f64,
            concept_count in 0usize..6,
        ) {
            let checker = CompatibilityChecker::builtin();
            let concepts: Vec<String> =
                (0..concept_count).map(|i| format!("concept-{i}")).collect();

            let kanji = KanjiMetadata::new('光')
                .with_sentiment(sentiment)
                .with_affinity(Religion::Christianity, affinity)
                .with_religious_concepts(concepts);

            for religion in [
                Religion::Christianity,
                Religion::Islam,
                Religion::Buddhism,
                Religion::Hinduism,
                Religion::Secular,
            ] {
                let context = ReligiousContext::new(religion);
                let score = checker.check_compatibility(&kanji, &context);
                prop_assert!((0.0..=1.0).contains(&score));
            }
        }
    }
}
