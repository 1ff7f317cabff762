//! Kanji catalog: glyph metadata and the religion tag set.
//!
//! The catalog is the static leaf of the pipeline: a mapping from glyph to
//! its meanings, readings, sentiment attributes, and religious associations.
//! Entries are validated at construction time so the scoring layers can
//! assume every score field is already within [0, 1]. Once built, a catalog
//! is never mutated.

use std::fmt;
use std::path::PathBuf;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::core::errors::{MeimeiError, Result};

/// Religion tag used as a lookup key for rule sets and affinity scores.
///
/// The tag set is closed apart from `Other`, which carries a free-text
/// label for traditions outside the enumerated ones. Unrecognized string
/// tags deserialize into `Other` with the label preserved, never silently
/// coerced to a different variant.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Religion {
    /// Christian traditions
    Christianity,
    /// Islamic traditions
    Islam,
    /// Buddhist traditions
    Buddhism,
    /// Hindu traditions
    Hinduism,
    /// Jewish traditions
    Judaism,
    /// Shinto traditions
    Shinto,
    /// No religious filtering applies
    Secular,
    /// Custom or unspecified tradition with a free-text label
    Other(String),
}

impl Religion {
    /// The canonical string tag for this religion.
    pub fn tag(&self) -> &str {
        match self {
            Self::Christianity => "christianity",
            Self::Islam => "islam",
            Self::Buddhism => "buddhism",
            Self::Hinduism => "hinduism",
            Self::Judaism => "judaism",
            Self::Shinto => "shinto",
            Self::Secular => "secular",
            Self::Other(label) => label,
        }
    }
}

impl fmt::Display for Religion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

impl From<String> for Religion {
    fn from(value: String) -> Self {
        match value.trim().to_lowercase().as_str() {
            "christianity" => Self::Christianity,
            "islam" => Self::Islam,
            "buddhism" => Self::Buddhism,
            "hinduism" => Self::Hinduism,
            "judaism" => Self::Judaism,
            "shinto" => Self::Shinto,
            "secular" => Self::Secular,
            _ => Self::Other(value.trim().to_string()),
        }
    }
}

impl From<Religion> for String {
    fn from(value: Religion) -> Self {
        value.tag().to_string()
    }
}

fn default_strokes() -> u32 {
    1
}

fn default_half() -> f64 {
    0.5
}

/// Metadata for one catalog character.
///
/// All score fields live in [0, 1]; `KanjiCatalog::from_entries` rejects
/// entries that violate that range rather than clamping them, since a
/// clamped entry would silently misrepresent its source data.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KanjiMetadata {
    /// The glyph itself, unique within a catalog
    pub character: char,

    /// English meanings, most common first
    #[serde(default)]
    pub meanings: Vec<String>,

    /// On (Sino-Japanese) readings
    #[serde(default)]
    pub readings_on: Vec<String>,

    /// Kun (native Japanese) readings
    #[serde(default)]
    pub readings_kun: Vec<String>,

    /// Stroke count, at least 1
    #[serde(default = "default_strokes")]
    pub stroke_count: u32,

    /// General positivity of the glyph (0 = negative, 1 = positive)
    #[serde(default = "default_half")]
    pub sentiment_score: f64,

    /// Energy the glyph conveys (0 = calm, 1 = dynamic)
    #[serde(default = "default_half")]
    pub energy_level: f64,

    /// Free-text associations used for profile matching
    #[serde(default)]
    pub associations: Vec<String>,

    /// Short cultural note shown alongside explanations
    #[serde(default)]
    pub cultural_notes: String,

    /// Affinity with each religion's symbolism; absent religions score 0
    #[serde(default)]
    pub religious_associations: IndexMap<Religion, f64>,

    /// Religious concepts the glyph evokes
    #[serde(default)]
    pub religious_concepts: Vec<String>,

    /// Concepts that may be religiously or culturally sensitive
    #[serde(default)]
    pub taboo_concepts: Vec<String>,
}

impl KanjiMetadata {
    /// Create a new entry for a glyph with neutral defaults
    pub fn new(character: char) -> Self {
        Self {
            character,
            meanings: Vec::new(),
            readings_on: Vec::new(),
            readings_kun: Vec::new(),
            stroke_count: 1,
            sentiment_score: 0.5,
            energy_level: 0.5,
            associations: Vec::new(),
            cultural_notes: String::new(),
            religious_associations: IndexMap::new(),
            religious_concepts: Vec::new(),
            taboo_concepts: Vec::new(),
        }
    }

    /// Set the English meanings
    pub fn with_meanings<I, S>(mut self, meanings: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.meanings = meanings.into_iter().map(Into::into).collect();
        self
    }

    /// Set the on readings
    pub fn with_readings_on<I, S>(mut self, readings: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.readings_on = readings.into_iter().map(Into::into).collect();
        self
    }

    /// Set the kun readings
    pub fn with_readings_kun<I, S>(mut self, readings: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.readings_kun = readings.into_iter().map(Into::into).collect();
        self
    }

    /// Set the stroke count
    pub fn with_strokes(mut self, strokes: u32) -> Self {
        self.stroke_count = strokes;
        self
    }

    /// Set the sentiment score
    pub fn with_sentiment(mut self, sentiment: f64) -> Self {
        self.sentiment_score = sentiment;
        self
    }

    /// Set the energy level
    pub fn with_energy(mut self, energy: f64) -> Self {
        self.energy_level = energy;
        self
    }

    /// Set the free-text associations
    pub fn with_associations<I, S>(mut self, associations: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.associations = associations.into_iter().map(Into::into).collect();
        self
    }

    /// Set the cultural note
    pub fn with_cultural_notes(mut self, notes: impl Into<String>) -> Self {
        self.cultural_notes = notes.into();
        self
    }

    /// Add one religious affinity score
    pub fn with_affinity(mut self, religion: Religion, affinity: f64) -> Self {
        self.religious_associations.insert(religion, affinity);
        self
    }

    /// Set the religious concepts
    pub fn with_religious_concepts<I, S>(mut self, concepts: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.religious_concepts = concepts.into_iter().map(Into::into).collect();
        self
    }

    /// Set the taboo concepts
    pub fn with_taboo_concepts<I, S>(mut self, concepts: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.taboo_concepts = concepts.into_iter().map(Into::into).collect();
        self
    }

    /// Affinity with a religion, 0.0 when none is recorded
    pub fn affinity(&self, religion: &Religion) -> f64 {
        self.religious_associations
            .get(religion)
            .copied()
            .unwrap_or(0.0)
    }

    /// Validate all score fields against the data-model invariants
    pub fn validate(&self) -> Result<()> {
        if self.stroke_count == 0 {
            return Err(MeimeiError::catalog(
                self.character,
                "stroke_count must be at least 1",
            ));
        }

        if !(0.0..=1.0).contains(&self.sentiment_score) {
            return Err(MeimeiError::catalog(
                self.character,
                format!(
                    "sentiment_score {} outside [0, 1]",
                    self.sentiment_score
                ),
            ));
        }

        if !(0.0..=1.0).contains(&self.energy_level) {
            return Err(MeimeiError::catalog(
                self.character,
                format!("energy_level {} outside [0, 1]", self.energy_level),
            ));
        }

        for (religion, affinity) in &self.religious_associations {
            if !(0.0..=1.0).contains(affinity) {
                return Err(MeimeiError::catalog(
                    self.character,
                    format!(
                        "religious affinity {affinity} for '{religion}' outside [0, 1]"
                    ),
                ));
            }
        }

        Ok(())
    }
}

/// Immutable mapping from glyph to metadata.
///
/// Insertion order is preserved and doubles as the deterministic
/// tie-break key during ranking.
#[derive(Debug, Clone, Default)]
pub struct KanjiCatalog {
    entries: IndexMap<char, KanjiMetadata>,
}

impl KanjiCatalog {
    /// Build a catalog from a list of entries, validating each one.
    ///
    /// Duplicate glyphs and out-of-range scores are rejected here so the
    /// scoring layers never see an invalid entry.
    pub fn from_entries(entries: Vec<KanjiMetadata>) -> Result<Self> {
        let mut map = IndexMap::with_capacity(entries.len());
        for entry in entries {
            entry.validate()?;
            if map.contains_key(&entry.character) {
                return Err(MeimeiError::catalog(
                    entry.character,
                    "duplicate catalog entry",
                ));
            }
            map.insert(entry.character, entry);
        }
        Ok(Self { entries: map })
    }

    /// Load a catalog from a YAML sequence of entries
    pub fn from_yaml_str(content: &str) -> Result<Self> {
        let entries: Vec<KanjiMetadata> = serde_yaml::from_str(content)?;
        Self::from_entries(entries)
    }

    /// Load a catalog from a YAML file
    pub fn from_yaml_file(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        let content = std::fs::read_to_string(&path).map_err(|e| {
            MeimeiError::io(
                format!("Failed to read catalog file: {}", path.display()),
                e,
            )
        })?;
        Self::from_yaml_str(&content)
    }

    /// Serialize the catalog back to YAML
    pub fn to_yaml_string(&self) -> Result<String> {
        let entries: Vec<&KanjiMetadata> = self.entries.values().collect();
        serde_yaml::to_string(&entries).map_err(Into::into)
    }

    /// Look up a glyph's metadata
    pub fn get(&self, glyph: char) -> Option<&KanjiMetadata> {
        self.entries.get(&glyph)
    }

    /// Catalog position of a glyph (the deterministic tie-break key)
    pub fn position(&self, glyph: char) -> Option<usize> {
        self.entries.get_index_of(&glyph)
    }

    /// Iterate over entries in catalog order
    pub fn iter(&self) -> impl Iterator<Item = &KanjiMetadata> {
        self.entries.values()
    }

    /// Number of entries
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// True when the catalog has no entries
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// The curated built-in catalog.
    ///
    /// A small fixed character set covering the positive vocabulary of the
    /// built-in rule sets, plus a few glyphs carrying taboo concepts so the
    /// veto path stays exercised with real data.
    pub fn builtin() -> Result<Self> {
        Self::from_entries(vec![
            KanjiMetadata::new('光')
                .with_meanings(["light", "shine", "brilliant"])
                .with_readings_on(["コウ"])
                .with_readings_kun(["ひかり"])
                .with_strokes(6)
                .with_sentiment(0.9)
                .with_energy(0.8)
                .with_associations(["brilliance", "future", "hope"])
                .with_cultural_notes("Universal symbol of wisdom and guidance")
                .with_affinity(Religion::Christianity, 0.9)
                .with_affinity(Religion::Islam, 0.9)
                .with_affinity(Religion::Buddhism, 0.8)
                .with_affinity(Religion::Hinduism, 0.8)
                .with_affinity(Religion::Judaism, 0.9)
                .with_affinity(Religion::Shinto, 0.7)
                .with_religious_concepts(["divine light", "wisdom", "guidance"]),
            KanjiMetadata::new('信')
                .with_meanings(["faith", "truth", "trust"])
                .with_readings_on(["シン"])
                .with_readings_kun(["まこと"])
                .with_strokes(9)
                .with_sentiment(0.8)
                .with_energy(0.6)
                .with_associations(["faith", "trust", "reliability"])
                .with_cultural_notes("Represents spiritual and interpersonal trust")
                .with_affinity(Religion::Christianity, 0.9)
                .with_affinity(Religion::Islam, 0.9)
                .with_affinity(Religion::Buddhism, 0.8)
                .with_affinity(Religion::Hinduism, 0.8)
                .with_affinity(Religion::Judaism, 0.9)
                .with_affinity(Religion::Shinto, 0.8)
                .with_religious_concepts(["faith", "belief", "devotion"]),
            KanjiMetadata::new('愛')
                .with_meanings(["love", "affection"])
                .with_readings_on(["アイ"])
                .with_readings_kun(["いと"])
                .with_strokes(13)
                .with_sentiment(0.9)
                .with_energy(0.7)
                .with_associations(["love", "compassion", "warmth"])
                .with_cultural_notes("Central to family names and devotional language")
                .with_affinity(Religion::Christianity, 0.9)
                .with_affinity(Religion::Islam, 0.7)
                .with_affinity(Religion::Buddhism, 0.8)
                .with_affinity(Religion::Hinduism, 0.8)
                .with_affinity(Religion::Judaism, 0.8)
                .with_affinity(Religion::Shinto, 0.7)
                .with_religious_concepts(["love", "charity", "compassion"]),
            KanjiMetadata::new('恵')
                .with_meanings(["blessing", "grace", "favor"])
                .with_readings_on(["ケイ", "エ"])
                .with_readings_kun(["めぐみ"])
                .with_strokes(10)
                .with_sentiment(0.85)
                .with_energy(0.5)
                .with_associations(["blessing", "kindness", "generosity"])
                .with_cultural_notes("A classic element of given names for both sexes")
                .with_affinity(Religion::Christianity, 0.9)
                .with_affinity(Religion::Islam, 0.8)
                .with_affinity(Religion::Buddhism, 0.8)
                .with_affinity(Religion::Judaism, 0.8)
                .with_religious_concepts(["grace", "blessing", "mercy"]),
            KanjiMetadata::new('慈')
                .with_meanings(["mercy", "compassion"])
                .with_readings_on(["ジ"])
                .with_readings_kun(["いつく"])
                .with_strokes(13)
                .with_sentiment(0.85)
                .with_energy(0.4)
                .with_associations(["compassion", "kindness", "care"])
                .with_cultural_notes("Strongly tied to the Buddhist ideal of loving kindness")
                .with_affinity(Religion::Buddhism, 0.9)
                .with_affinity(Religion::Christianity, 0.7)
                .with_affinity(Religion::Hinduism, 0.7)
                .with_religious_concepts(["compassion", "mercy", "loving kindness"]),
            KanjiMetadata::new('智')
                .with_meanings(["wisdom", "intellect"])
                .with_readings_on(["チ"])
                .with_readings_kun(["さと"])
                .with_strokes(12)
                .with_sentiment(0.8)
                .with_energy(0.6)
                .with_associations(["wisdom", "learning", "insight"])
                .with_cultural_notes("Names the prajna wisdom of Buddhist philosophy")
                .with_affinity(Religion::Buddhism, 0.9)
                .with_affinity(Religion::Hinduism, 0.7)
                .with_affinity(Religion::Judaism, 0.6)
                .with_religious_concepts(["wisdom", "insight"]),
            KanjiMetadata::new('道')
                .with_meanings(["way", "path", "road"])
                .with_readings_on(["ドウ"])
                .with_readings_kun(["みち"])
                .with_strokes(12)
                .with_sentiment(0.75)
                .with_energy(0.5)
                .with_associations(["path", "journey", "discipline"])
                .with_cultural_notes("Shared vocabulary of Buddhist practice and Shinto")
                .with_affinity(Religion::Buddhism, 0.8)
                .with_affinity(Religion::Shinto, 0.8)
                .with_religious_concepts(["the way", "practice"]),
            KanjiMetadata::new('真')
                .with_meanings(["truth", "genuine", "real"])
                .with_readings_on(["シン"])
                .with_readings_kun(["ま", "まこと"])
                .with_strokes(10)
                .with_sentiment(0.8)
                .with_energy(0.6)
                .with_associations(["truth", "sincerity", "authenticity"])
                .with_cultural_notes("Marks sincerity in names across traditions")
                .with_affinity(Religion::Islam, 0.8)
                .with_affinity(Religion::Christianity, 0.7)
                .with_affinity(Religion::Buddhism, 0.7)
                .with_religious_concepts(["truth", "sincerity"]),
            KanjiMetadata::new('勇')
                .with_meanings(["courage", "bravery"])
                .with_readings_on(["ユウ"])
                .with_readings_kun(["いさ"])
                .with_strokes(9)
                .with_sentiment(0.75)
                .with_energy(0.9)
                .with_associations(["courage", "boldness", "adventure"])
                .with_cultural_notes("A perennial element of energetic given names")
                .with_affinity(Religion::Shinto, 0.5)
                .with_religious_concepts(["courage"]),
            KanjiMetadata::new('翔')
                .with_meanings(["soar", "fly"])
                .with_readings_on(["ショウ"])
                .with_readings_kun(["かけ"])
                .with_strokes(12)
                .with_sentiment(0.8)
                .with_energy(0.9)
                .with_associations(["flight", "freedom", "ambition"])
                .with_cultural_notes("Popular in modern names for its upward imagery"),
            KanjiMetadata::new('静')
                .with_meanings(["quiet", "calm"])
                .with_readings_on(["セイ"])
                .with_readings_kun(["しず"])
                .with_strokes(14)
                .with_sentiment(0.7)
                .with_energy(0.2)
                .with_associations(["calm", "serenity", "peace"])
                .with_cultural_notes("Evokes the stillness prized in meditative practice")
                .with_affinity(Religion::Buddhism, 0.7)
                .with_religious_concepts(["stillness", "peace"]),
            KanjiMetadata::new('海')
                .with_meanings(["sea", "ocean"])
                .with_readings_on(["カイ"])
                .with_readings_kun(["うみ"])
                .with_strokes(9)
                .with_sentiment(0.7)
                .with_energy(0.6)
                .with_associations(["ocean", "vastness", "nature"])
                .with_cultural_notes("Nature imagery common in Shinto-influenced names")
                .with_affinity(Religion::Shinto, 0.6),
            KanjiMetadata::new('宴')
                .with_meanings(["banquet", "feast"])
                .with_readings_on(["エン"])
                .with_readings_kun(["うたげ"])
                .with_strokes(10)
                .with_sentiment(0.6)
                .with_energy(0.7)
                .with_associations(["celebration", "festivity", "gathering"])
                .with_cultural_notes("Festive imagery linked to drinking culture")
                .with_taboo_concepts(["酒"]),
            KanjiMetadata::new('狩')
                .with_meanings(["hunt", "hunting"])
                .with_readings_on(["シュ"])
                .with_readings_kun(["か"])
                .with_strokes(9)
                .with_sentiment(0.5)
                .with_energy(0.8)
                .with_associations(["pursuit", "wilderness", "instinct"])
                .with_cultural_notes("Carries imagery of the chase and the kill")
                .with_taboo_concepts(["殺"]),
            KanjiMetadata::new('幻')
                .with_meanings(["illusion", "phantom"])
                .with_readings_on(["ゲン"])
                .with_readings_kun(["まぼろし"])
                .with_strokes(4)
                .with_sentiment(0.5)
                .with_energy(0.5)
                .with_associations(["illusion", "mystery", "dream"])
                .with_cultural_notes("Occult overtones make it sensitive in some traditions")
                .with_taboo_concepts(["魔"]),
        ])
    }
}
