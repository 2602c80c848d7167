//! Fixture Tests for CV Loading
//!
//! Runs realistic CV files through validation, normalization and the loader.

use std::path::Path;
use std::sync::Arc;

use cv_data::document::{Education, Language, Project, Reference, Skill, Work};
use cv_data::{
    normalize, validate_cv, BuildEnv, CvConfig, CvDocument, CvLoader, FileSource, PageLayout,
    Section, StaticSource,
};
use serde_json::Value;

fn fixture(name: &str) -> Value {
    let path = Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("tests/fixtures")
        .join(name);
    serde_json::from_str(&std::fs::read_to_string(path).unwrap()).unwrap()
}

// =============================================================================
// Validation
// =============================================================================

#[test]
fn test_full_cv_is_clean() {
    let result = validate_cv(&fixture("full_cv.json"));
    assert!(result.is_valid(), "{:?}", result.errors);
    assert!(!result.has_warnings(), "{:?}", result.warnings);
}

#[test]
fn test_legacy_cv_diagnostics() {
    let result = validate_cv(&fixture("legacy_cv.json"));

    let errors: Vec<(&str, &str)> = result
        .errors
        .iter()
        .map(|e| (e.code, e.path.as_str()))
        .collect();
    assert_eq!(
        errors,
        vec![("INVALID_LAYOUT", "pageLayout"), ("NOT_AN_ARRAY", "work")]
    );

    let warnings: Vec<(&str, &str)> = result
        .warnings
        .iter()
        .map(|w| (w.code, w.path.as_str()))
        .collect();
    assert_eq!(
        warnings,
        vec![
            ("INCOMPLETE_PROFILE", "basics.profiles[0]"),
            ("LEGACY_TAG", "basics.about.tags[1]"),
        ]
    );
}

#[test]
fn test_broken_about_reports_index_and_field() {
    let raw = fixture("broken_about.json");
    let result = validate_cv(&raw);
    assert_eq!(result.errors.len(), 1);
    assert_eq!(result.errors[0].path, "basics.about.personalInfo[1]");
    assert!(result.errors[0].message.contains("value"));

    // Normalization still passes the entry through untouched
    let doc = normalize(&raw).unwrap();
    assert_eq!(doc.basics.about.as_ref(), raw["basics"].get("about"));
}

#[test]
fn test_no_basics_is_invalid() {
    let result = validate_cv(&fixture("no_basics.json"));
    assert!(!result.is_valid());
    assert!(result.has_error("MISSING_BASICS"));
    assert!(result.errors[0].message.contains("basics"));
}

// =============================================================================
// Normalization
// =============================================================================

#[test]
fn test_full_cv_normalization() {
    let doc = normalize(&fixture("full_cv.json")).unwrap();

    assert_eq!(doc.analytics_code, "G-ABC123");
    assert_eq!(doc.page_layout, PageLayout::Single);
    assert_eq!(doc.basics.name, "Ada Lovelace");
    assert_eq!(doc.basics.profiles.len(), 2);
    for section in Section::ALL {
        assert!(!doc.section(section).is_empty(), "{}", section.key());
    }
    assert!(doc.images.is_some());
}

#[test]
fn test_legacy_cv_normalization() {
    let doc = normalize(&fixture("legacy_cv.json")).unwrap();
    assert_eq!(doc.page_layout, PageLayout::Two);
    assert!(doc.work.is_empty());
    assert!(doc.awards.is_empty());
    assert_eq!(doc.basics.profiles.len(), 1);
}

#[test]
fn test_normalization_round_trips_for_fixtures() {
    for name in ["full_cv.json", "legacy_cv.json", "broken_about.json"] {
        let once = normalize(&fixture(name)).unwrap();
        let value = serde_json::to_value(&once).unwrap();
        let twice = normalize(&value).unwrap();
        assert_eq!(once, twice, "{name}");
        assert_eq!(value, serde_json::to_value(&twice).unwrap(), "{name}");
    }
}

#[test]
fn test_typed_records() {
    let doc = normalize(&fixture("full_cv.json")).unwrap();

    let work: Vec<Work> = doc.records();
    assert_eq!(work.len(), 1);
    assert_eq!(work[0].location_type.as_deref(), Some("On-site"));
    assert_eq!(work[0].skills.get("Mathematics").map(String::as_str), Some("expert"));
    assert!(!work[0].is_current());

    let education: Vec<Education> = doc.records();
    assert_eq!(education[0].study_type, "Tutoring");

    let skills: Vec<Skill> = doc.records();
    assert_eq!(skills[0].keywords, vec!["Algorithms", "Calculus"]);

    let languages: Vec<Language> = doc.records();
    assert_eq!(languages.len(), 2);

    let references: Vec<Reference> = doc.records();
    assert_eq!(references[0].name, "Charles Babbage");

    let projects: Vec<Project> = doc.records();
    assert!(!projects[0].is_active);
    assert_eq!(
        projects[0].image.as_ref().and_then(|i| i.dark.as_deref()),
        Some("/img/note-g-dark.png")
    );

    let profiles = doc.basics.typed_profiles();
    assert_eq!(profiles[0].icon.as_deref(), Some("github"));
    assert_eq!(doc.basics.typed_location().unwrap().city.as_deref(), Some("London"));

    let images = doc.typed_images().unwrap();
    assert_eq!(images.list[0].image, "/images/portrait.png");
}

// =============================================================================
// Loader
// =============================================================================

#[test]
fn test_loader_reads_file_once() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("cv.json");
    std::fs::write(&path, include_str!("fixtures/full_cv.json")).unwrap();

    let loader = CvLoader::new(FileSource::new(&path));
    let first = loader.load_cv();
    assert_eq!(first.basics.name, "Ada Lovelace");

    // Deleting the file doesn't matter once loaded
    std::fs::remove_file(&path).unwrap();
    let second = loader.load_cv();
    assert!(Arc::ptr_eq(&first, &second));

    loader.clear_cache();
    assert!(loader.load_cv().is_fallback());
}

#[test]
fn test_loader_reloads_edited_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("cv.json");
    std::fs::write(&path, include_str!("fixtures/broken_about.json")).unwrap();

    let loader = CvLoader::new(FileSource::new(&path));
    assert_eq!(loader.basics().name, "Alan Turing");
    let checksum = loader.loaded_checksum().unwrap();

    std::fs::write(&path, include_str!("fixtures/legacy_cv.json")).unwrap();
    assert!(loader.refresh_if_changed());
    assert_eq!(loader.basics().name, "Grace Hopper");
    assert_ne!(loader.loaded_checksum().unwrap(), checksum);
}

#[test]
fn test_loader_falls_back_without_basics() {
    let loader = CvLoader::new(StaticSource::new(
        "no_basics.json",
        include_str!("fixtures/no_basics.json"),
    ));
    let doc = loader.load_cv();
    assert_eq!(doc.basics.name, CvDocument::FALLBACK_NAME);
    assert_eq!(doc.page_layout, PageLayout::Two);
    assert!(doc.work.is_empty());
    assert!(!loader.is_loaded());
}

#[test]
fn test_loader_from_config() {
    let dir = tempfile::tempdir().unwrap();
    let cv_path = dir.path().join("resume.json");
    std::fs::write(&cv_path, include_str!("fixtures/legacy_cv.json")).unwrap();

    let mut config = CvConfig::default();
    config.source.path = cv_path;
    config.diagnostics.environment = BuildEnv::Production;

    let loader = CvLoader::from_config(&config);
    let doc = loader.load_cv();
    assert_eq!(doc.basics.name, "Grace Hopper");
    assert_eq!(doc.page_layout, PageLayout::Two);
}
