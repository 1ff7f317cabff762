//! Request-side data: religious context and personality profile.
//!
//! One `PersonalityProfile` arrives per generation request and is read-only
//! during scoring. The embedded `ReligiousContext` drives both the hard
//! veto filter and the narrative text attached to each result.

use indexmap::IndexSet;
use serde::{Deserialize, Serialize};

use crate::core::catalog::Religion;
use crate::core::errors::{MeimeiError, Result};

/// Religious context supplied with a generation request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReligiousContext {
    /// Religion tag used to look up the rule set
    pub religion: Religion,

    /// Optional denomination label, narrative only
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub specific_denomination: Option<String>,

    /// How strongly religious considerations should weigh, in [0, 1]
    #[serde(default = "default_sensitivity")]
    pub religious_sensitivity: f64,

    /// Concepts the requester wants avoided
    #[serde(default)]
    pub taboos: IndexSet<String>,

    /// Concepts the requester favors
    #[serde(default)]
    pub preferred_concepts: IndexSet<String>,
}

fn default_sensitivity() -> f64 {
    0.5
}

impl ReligiousContext {
    /// Create a context for a religion with neutral defaults
    pub fn new(religion: Religion) -> Self {
        Self {
            religion,
            specific_denomination: None,
            religious_sensitivity: default_sensitivity(),
            taboos: IndexSet::new(),
            preferred_concepts: IndexSet::new(),
        }
    }

    /// Context with no religious filtering at all
    pub fn secular() -> Self {
        Self::new(Religion::Secular)
    }

    /// Set the denomination label
    pub fn with_denomination(mut self, denomination: impl Into<String>) -> Self {
        self.specific_denomination = Some(denomination.into());
        self
    }

    /// Set the sensitivity weight
    pub fn with_sensitivity(mut self, sensitivity: f64) -> Self {
        self.religious_sensitivity = sensitivity;
        self
    }

    /// Set the taboo concepts
    pub fn with_taboos<I, S>(mut self, taboos: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.taboos = taboos.into_iter().map(Into::into).collect();
        self
    }

    /// Set the preferred concepts
    pub fn with_preferred_concepts<I, S>(mut self, concepts: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.preferred_concepts = concepts.into_iter().map(Into::into).collect();
        self
    }

    /// Validate the sensitivity range
    pub fn validate(&self) -> Result<()> {
        if !(0.0..=1.0).contains(&self.religious_sensitivity) {
            return Err(MeimeiError::validation(format!(
                "religious_sensitivity {} outside [0, 1]",
                self.religious_sensitivity
            )));
        }
        Ok(())
    }
}

/// Personality profile supplied per generation request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PersonalityProfile {
    /// Primary character traits, free text
    #[serde(default)]
    pub primary_traits: Vec<String>,

    /// Aspirations, free text
    #[serde(default)]
    pub aspirations: Vec<String>,

    /// Interests, free text
    #[serde(default)]
    pub interests: Vec<String>,

    /// Cultural background description
    #[serde(default)]
    pub cultural_background: String,

    /// Preferred naming style ("energetic", "calm", "traditional", ...)
    #[serde(default)]
    pub preferred_style: String,

    /// Religious context for compatibility scoring
    pub religious_context: ReligiousContext,
}

impl PersonalityProfile {
    /// Create a profile with the given religious context
    pub fn new(religious_context: ReligiousContext) -> Self {
        Self {
            primary_traits: Vec::new(),
            aspirations: Vec::new(),
            interests: Vec::new(),
            cultural_background: String::new(),
            preferred_style: String::new(),
            religious_context,
        }
    }

    /// Set the primary traits
    pub fn with_primary_traits<I, S>(mut self, traits: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.primary_traits = traits.into_iter().map(Into::into).collect();
        self
    }

    /// Set the aspirations
    pub fn with_aspirations<I, S>(mut self, aspirations: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.aspirations = aspirations.into_iter().map(Into::into).collect();
        self
    }

    /// Set the interests
    pub fn with_interests<I, S>(mut self, interests: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.interests = interests.into_iter().map(Into::into).collect();
        self
    }

    /// Set the cultural background
    pub fn with_cultural_background(mut self, background: impl Into<String>) -> Self {
        self.cultural_background = background.into();
        self
    }

    /// Set the preferred naming style
    pub fn with_preferred_style(mut self, style: impl Into<String>) -> Self {
        self.preferred_style = style.into();
        self
    }

    /// All trait/aspiration/interest terms, lowercased, in declaration
    /// order with duplicates removed. This is the lexicon matched against
    /// kanji meanings and associations.
    pub fn lexicon(&self) -> IndexSet<String> {
        self.primary_traits
            .iter()
            .chain(&self.aspirations)
            .chain(&self.interests)
            .map(|term| term.trim().to_lowercase())
            .filter(|term| !term.is_empty())
            .collect()
    }

    /// Validate the embedded religious context
    pub fn validate(&self) -> Result<()> {
        self.religious_context.validate()
    }
}
