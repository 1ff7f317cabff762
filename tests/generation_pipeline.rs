//! End-to-end tests for the name generation pipeline.

use meimei_rs::{
    CompatibilityChecker, GeneratorConfig, KanjiCatalog, KanjiMetadata, NameGenerator,
    PersonalityProfile, Religion, ReligiousContext,
};

fn hikari() -> KanjiMetadata {
    KanjiMetadata::new('光')
        .with_meanings(["light", "shine", "brilliant"])
        .with_readings_on(["コウ"])
        .with_readings_kun(["ひかり"])
        .with_strokes(6)
        .with_sentiment(0.9)
        .with_energy(0.8)
        .with_associations(["brilliance", "future", "hope"])
        .with_affinity(Religion::Christianity, 0.9)
        .with_affinity(Religion::Islam, 0.9)
        .with_religious_concepts(["divine light", "wisdom", "guidance"])
}

fn shin() -> KanjiMetadata {
    KanjiMetadata::new('信')
        .with_meanings(["faith", "truth", "trust"])
        .with_readings_on(["シン"])
        .with_readings_kun(["まこと"])
        .with_strokes(9)
        .with_sentiment(0.8)
        .with_energy(0.6)
        .with_associations(["faith", "trust", "reliability"])
        .with_affinity(Religion::Christianity, 0.9)
        .with_affinity(Religion::Islam, 0.9)
        .with_religious_concepts(["faith", "belief", "devotion"])
}

fn generator_with(entries: Vec<KanjiMetadata>) -> NameGenerator {
    NameGenerator::new(
        KanjiCatalog::from_entries(entries).unwrap(),
        CompatibilityChecker::builtin(),
        GeneratorConfig::default(),
    )
    .unwrap()
}

#[test]
fn christianity_profile_gets_high_scoring_light_and_faith_pair() {
    let generator = generator_with(vec![hikari(), shin()]);
    let profile = PersonalityProfile::new(
        ReligiousContext::new(Religion::Christianity).with_sensitivity(0.7),
    )
    .with_primary_traits(["faith", "hope"]);

    // Two-character original name
    let results = generator.generate("Jo", &profile).unwrap();
    assert!(!results.is_empty());

    let best = &results[0];
    assert_eq!(best.kanji.len(), 2);
    assert!(best.kanji.iter().all(|g| *g == '光' || *g == '信'));
    assert!(best.score > 0.8, "expected score > 0.8, got {}", best.score);

    // Both characters have non-empty religious concepts, so both contribute
    // a sentence to the narrative.
    let mentions = best
        .religious_context
        .matches("christianity tradition")
        .count();
    assert_eq!(mentions, 2);
    assert!(best.religious_context.contains("The character 光 represents"));
    assert!(best.religious_context.contains("The character 信 represents"));
}

#[test]
fn islam_profile_never_sees_vetoed_characters() {
    let banquet = KanjiMetadata::new('宴')
        .with_meanings(["banquet", "feast"])
        .with_sentiment(0.9)
        .with_energy(0.9)
        .with_taboo_concepts(["酒"]);

    let generator = generator_with(vec![hikari(), shin(), banquet]);
    let profile = PersonalityProfile::new(
        ReligiousContext::new(Religion::Islam).with_sensitivity(0.9),
    );

    let results = generator.generate("Omar", &profile).unwrap();
    // 宴 is vetoed outright; only 光/信 remain, so only 2-permutations of
    // those two could ever appear, and a 4-character name has none.
    assert!(results.is_empty());

    let results = generator.generate("Jo", &profile).unwrap();
    assert!(!results.is_empty());
    for result in &results {
        assert!(
            !result.kanji.contains(&'宴'),
            "vetoed glyph appeared in {:?}",
            result.kanji
        );
    }
}

#[test]
fn too_few_candidates_for_requested_length_yields_empty_list() {
    let config = GeneratorConfig {
        max_name_length: 6,
        ..GeneratorConfig::default()
    };
    let generator = NameGenerator::new(
        KanjiCatalog::from_entries(vec![hikari(), shin()]).unwrap(),
        CompatibilityChecker::builtin(),
        config,
    )
    .unwrap();

    let profile = PersonalityProfile::new(ReligiousContext::secular());
    // Five characters requested, two candidates available, repetition
    // disallowed: nothing to enumerate.
    let results = generator.generate("Maria", &profile).unwrap();
    assert!(results.is_empty());
}

#[test]
fn results_are_sorted_limited_and_idempotent() {
    let generator = NameGenerator::builtin().unwrap();
    let profile = PersonalityProfile::new(ReligiousContext::secular())
        .with_primary_traits(["hope", "courage"])
        .with_interests(["nature"])
        .with_preferred_style("energetic");

    let first = generator.generate("Ada", &profile).unwrap();
    let second = generator.generate("Ada", &profile).unwrap();

    assert_eq!(first, second, "identical inputs must give identical output");
    assert!(first.len() <= 3);
    for pair in first.windows(2) {
        assert!(pair[0].score >= pair[1].score);
    }
    for result in &first {
        assert!((0.0..=1.0).contains(&result.score));
        assert!((0.0..=1.0).contains(&result.religious_score));
        assert!((0.0..=1.0).contains(&result.general_score));
    }
}

#[test]
fn secular_profile_gets_universal_values_narrative() {
    let generator = NameGenerator::builtin().unwrap();
    let profile = PersonalityProfile::new(ReligiousContext::secular());

    let results = generator.generate("Kim", &profile).unwrap();
    assert!(!results.is_empty());
    for result in &results {
        assert_eq!(
            result.religious_context,
            "This name has been chosen to reflect universal human values."
        );
    }
}

#[test]
fn unknown_religion_scores_by_default_and_still_generates() {
    let generator = NameGenerator::builtin().unwrap();
    let profile = PersonalityProfile::new(ReligiousContext::new(Religion::Other(
        "zoroastrianism".to_string(),
    )));

    let results = generator.generate("Jo", &profile).unwrap();
    assert!(!results.is_empty());
    for result in &results {
        // Every character scores the 0.8 default, so the aggregate does too
        assert!((result.religious_score - 0.8).abs() < 1e-9);
    }
}

#[test]
fn generated_results_carry_character_detail_and_serialize() {
    let generator = generator_with(vec![hikari(), shin()]);
    let profile = PersonalityProfile::new(ReligiousContext::secular());

    let results = generator.generate("Jo", &profile).unwrap();
    let best = &results[0];
    assert_eq!(best.characters.len(), 2);
    assert!(!best.characters[0].meanings.is_empty());
    assert!(!best.characters[0].readings_on.is_empty());

    let json = serde_json::to_string(&results).unwrap();
    assert!(json.contains("religious_context"));
}
