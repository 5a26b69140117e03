//! End-to-end resolution against on-disk feature databases.

use baseline_index::{
    BaselineStatus, CompatibilityIndex, DatabaseLocator, DatasetState, FeatureDatabase,
    LoadedIndex, PACKAGE_DATA_PATH,
};
use camino::Utf8PathBuf;
use pretty_assertions::assert_eq;
use std::collections::BTreeSet;
use std::fs;

const SAMPLE_DB: &str = r#"{
    "browsers": {},
    "features": {
        "flex-prop": {
            "status": {"baseline": "high"},
            "compat_features": ["css.properties.display.flex"]
        },
        "vt": {
            "name": "View Transitions",
            "status": {"baseline": false},
            "compat_features": ["css.properties.view-transition-name"]
        },
        "ac": {
            "name": "Animation Composition",
            "status": {"baseline": "low", "baseline_low_date": "2023-07-04"},
            "compat_features": ["css.properties.animation-composition"]
        },
        "subgrid": {
            "name": "Subgrid",
            "status": {"baseline": false},
            "compat_features": ["css.properties.display.subgrid", "css.properties.grid-template-columns.subgrid"]
        },
        "moved-feature": {"kind": "moved", "redirect_target": "flex-prop"}
    },
    "groups": {}
}"#;

struct Workspace {
    _dir: tempfile::TempDir,
    root: Utf8PathBuf,
}

fn workspace_with_package(data: &str) -> Workspace {
    let dir = tempfile::tempdir().unwrap();
    let root = Utf8PathBuf::try_from(dir.path().to_path_buf()).unwrap();
    let path = root.join(PACKAGE_DATA_PATH);
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(&path, data).unwrap();
    Workspace { _dir: dir, root }
}

#[test]
fn test_sample_database_verdicts() {
    let index = CompatibilityIndex::build(&FeatureDatabase::from_json(SAMPLE_DB).unwrap());
    let resolver = index.resolver();

    assert_eq!(resolver.resolve("display").status, BaselineStatus::High);

    let vt = resolver.resolve("view-transition-name");
    assert_eq!(vt.status, BaselineStatus::NoBaseline);
    assert_eq!(vt.contributing.len(), 1);
    assert_eq!(vt.contributing[0].display_name, "View Transitions");

    let ac = resolver.resolve("animation-composition");
    assert_eq!(ac.status, BaselineStatus::Low);
    assert_eq!(ac.feature_names(), "Animation Composition");

    assert_eq!(resolver.resolve("margin").status, BaselineStatus::Unknown);
    assert_eq!(
        resolver.resolve("grid-template-columns").status,
        BaselineStatus::NoBaseline
    );
}

#[test]
fn test_high_record_hides_lower_records() {
    let index = CompatibilityIndex::build(&FeatureDatabase::from_json(SAMPLE_DB).unwrap());
    let verdict = index.resolver().resolve("display");

    assert_eq!(index.get("display").map(<[_]>::len), Some(2));
    let ids: Vec<&str> = verdict
        .contributing
        .iter()
        .map(|record| record.feature_id.as_str())
        .collect();
    assert_eq!(ids, vec!["flex-prop"]);
}

#[test]
fn test_no_duplicate_feature_ids_per_property() {
    let index = CompatibilityIndex::build(&FeatureDatabase::from_json(SAMPLE_DB).unwrap());
    for (property, records) in index.properties() {
        let unique: BTreeSet<&str> = records.iter().map(|r| r.feature_id.as_str()).collect();
        assert_eq!(unique.len(), records.len(), "duplicates under {property}");
    }
}

#[test]
fn test_loads_installed_package() {
    let workspace = workspace_with_package(SAMPLE_DB);
    let nested = workspace.root.join("src").join("styles");
    fs::create_dir_all(&nested).unwrap();

    let loaded = LoadedIndex::load(&DatabaseLocator::new(&nested));
    match &loaded.state {
        DatasetState::Loaded { path, features } => {
            assert_eq!(path, &workspace.root.join(PACKAGE_DATA_PATH));
            assert_eq!(*features, 5);
        }
        other => panic!("expected loaded dataset, got {other:?}"),
    }
    assert_eq!(loaded.index.len(), 4);
}

#[test]
fn test_malformed_database_degrades_to_empty() {
    let workspace = workspace_with_package("{ this is not json");
    let loaded = LoadedIndex::load(&DatabaseLocator::new(&workspace.root));

    assert!(matches!(loaded.state, DatasetState::Invalid { .. }));
    assert!(loaded.index.is_empty());
    for property in ["display", "view-transition-name", "animation-composition"] {
        assert_eq!(
            loaded.index.resolver().resolve(property).status,
            BaselineStatus::Unknown
        );
    }
}

#[test]
fn test_wrong_top_level_shape_degrades_to_empty() {
    let workspace = workspace_with_package(r#"{"features": ["flex-prop"]}"#);
    let loaded = LoadedIndex::load(&DatabaseLocator::new(&workspace.root));

    assert!(!loaded.state.is_loaded());
    assert_eq!(loaded.index.len(), 0);
}
