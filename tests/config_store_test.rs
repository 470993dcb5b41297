mod common;

use cloudrank::config::{load_config_from, AnalysisSettings, WeightConfig, CONFIG_FILE_NAME};
use cloudrank::overrides::{FileStore, KeyValueStore, OverrideSet, ScoreOverride, OVERRIDES_KEY};
use cloudrank::CloudAnalyzer;
use common::builtin_catalog;
use indoc::indoc;
use std::fs;
use tempfile::TempDir;

#[test]
fn test_config_file_drives_analyzer() {
    let temp = TempDir::new().unwrap();
    let store_path = temp.path().join("state").join("store.json");
    let config = indoc! {r#"
        [weights]
        control = 0
        performance = 0
        availability = 0
        cost = 100

        [rates]
        fte_monthly_rate = 0

        [overrides]
        path = "STORE"
    "#}
    .replace("STORE", &store_path.display().to_string().replace('\\', "/"));
    fs::write(temp.path().join(CONFIG_FILE_NAME), config).unwrap();

    let loaded = load_config_from(temp.path().to_path_buf());
    assert_eq!(loaded.weights.cost, 100.0);
    assert_eq!(loaded.overrides.path.as_deref(), Some(store_path.as_path()));

    let analyzer = CloudAnalyzer::from_config(builtin_catalog(), &loaded);
    let results = analyzer.analyze_for_components(
        &["compute"],
        &loaded.weights,
        None,
        &loaded.settings(),
    );
    for result in &results {
        assert_eq!(result.tco.operations.monthly_personnel_cost, 0.0);
    }
    let best = results.iter().map(|r| r.score.cost).fold(f64::MIN, f64::max);
    let worst = results.iter().map(|r| r.score.cost).fold(f64::MAX, f64::min);
    assert_eq!((best, worst), (100.0, 30.0));
    // Only cost is weighted
    assert_eq!(results[0].score.base, results[0].score.cost);
}

#[test]
fn test_file_store_overrides_survive_reload() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("store.json");

    let mut overrides = OverrideSet::new();
    overrides
        .set(
            "ionos",
            ScoreOverride {
                price_factor: Some(1.5),
                ..Default::default()
            },
        )
        .unwrap();
    overrides.save(&FileStore::new(&path)).unwrap();

    let mut analyzer = CloudAnalyzer::with_store(builtin_catalog(), Box::new(FileStore::new(&path)));
    assert_eq!(
        analyzer.resolver().resolve("ionos", cloudrank::overrides::ScoreField::PriceFactor),
        Some(1.5)
    );

    FileStore::new(&path).remove(OVERRIDES_KEY).unwrap();
    analyzer.reload_overrides();
    assert_eq!(
        analyzer.resolver().resolve("ionos", cloudrank::overrides::ScoreField::PriceFactor),
        Some(0.75)
    );
}

#[test]
fn test_corrupt_store_file_fails_open() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("store.json");
    fs::write(&path, "{ definitely not json").unwrap();

    let analyzer = CloudAnalyzer::with_store(builtin_catalog(), Box::new(FileStore::new(&path)));
    assert!(analyzer.overrides().is_empty());

    // Analysis still runs on catalog values
    let results = analyzer.analyze_for_components(
        &["compute"],
        &WeightConfig::default(),
        None,
        &AnalysisSettings::default(),
    );
    assert!(!results.is_empty());
}
