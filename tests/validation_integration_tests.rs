//! Integration tests for the preprocess/validate pipeline
//!
//! These tests verify:
//! - Extension, directory and id well-formedness rules
//! - Source and target directory rules against real directories
//! - Filter, preset and thread-count conflicts
//! - The prepared options handed to the copy engine

use camino::Utf8PathBuf;
use indexmap::IndexSet;
use proptest::prelude::*;
use stowaway::presets::try_expand;
use stowaway::services::collect_violations;
use stowaway::{BackupOptions, ErrorKind, Preset, prepare, preprocess, validate};
use tempfile::TempDir;

fn create_test_dirs() -> (TempDir, Utf8PathBuf, Utf8PathBuf) {
    let temp_dir = TempDir::new().unwrap();
    let root = Utf8PathBuf::try_from(temp_dir.path().to_path_buf()).unwrap();
    let source = root.join("Photos");
    let target = root.join("backup");
    std::fs::create_dir_all(&source).unwrap();
    std::fs::create_dir_all(&target).unwrap();
    (temp_dir, source, target)
}

fn base_options(source: &Utf8PathBuf, target: &Utf8PathBuf) -> BackupOptions {
    BackupOptions {
        source_directory: Some(source.clone()),
        target_directory: Some(target.clone()),
        ..Default::default()
    }
}

fn set(values: &[&str]) -> IndexSet<String> {
    values.iter().map(|s| s.to_string()).collect()
}

fn preprocessed_kind(mut options: BackupOptions) -> Option<ErrorKind> {
    preprocess(&mut options);
    validate(&options).err().map(|e| e.kind())
}

#[test]
fn test_dotted_inclusion_fails() {
    let (_temp_dir, source, target) = create_test_dirs();
    let options = BackupOptions {
        file_inclusions: set(&[".txt"]),
        ..base_options(&source, &target)
    };
    assert_eq!(preprocessed_kind(options), Some(ErrorKind::InvalidExtension));
}

#[test]
fn test_bare_inclusion_passes() {
    let (_temp_dir, source, target) = create_test_dirs();
    let options = BackupOptions {
        file_inclusions: set(&["txt"]),
        ..base_options(&source, &target)
    };
    assert_eq!(preprocessed_kind(options), None);
}

#[test]
fn test_dir_exclusion_rules() {
    let (_temp_dir, source, target) = create_test_dirs();

    let nested = BackupOptions {
        dir_exclusions: set(&["a/b"]),
        ..base_options(&source, &target)
    };
    assert_eq!(
        preprocessed_kind(nested),
        Some(ErrorKind::InvalidDirExclusion)
    );

    let bare = BackupOptions {
        dir_exclusions: set(&["node_modules"]),
        ..base_options(&source, &target)
    };
    assert_eq!(preprocessed_kind(bare), None);
}

#[test]
fn test_id_prefixed_once() {
    let mut options = BackupOptions {
        id: Some("foo".to_string()),
        ..Default::default()
    };
    preprocess(&mut options);
    assert_eq!(options.id.as_deref(), Some("_foo"));
}

#[test]
fn test_conflicting_filters_regardless_of_other_fields() {
    let options = BackupOptions {
        file_inclusions: set(&["jpg"]),
        file_exclusions: set(&["png"]),
        source_directory_current: true,
        source_directory: Some(Utf8PathBuf::from("X")),
        max_size: 1,
        threads: 0,
        ..Default::default()
    };
    assert_eq!(
        preprocessed_kind(options),
        Some(ErrorKind::ConflictingFilters)
    );
}

#[test]
fn test_images_preset_expands_and_validates() {
    let (_temp_dir, source, target) = create_test_dirs();
    let mut options = BackupOptions {
        preset: Preset::Images,
        ..base_options(&source, &target)
    };

    preprocess(&mut options);

    let info = try_expand(Preset::Images).unwrap();
    assert_eq!(options.file_exclusions, info.exclusion_set());
    assert_eq!(options.dir_exclusions, info.directory_set());
    assert!(validate(&options).is_ok());
}

#[test]
fn test_source_rules() {
    let (_temp_dir, _source, target) = create_test_dirs();

    let missing = BackupOptions {
        source_directory: Some(Utf8PathBuf::from("")),
        source_directory_current: false,
        target_directory: Some(target.clone()),
        ..Default::default()
    };
    assert_eq!(preprocessed_kind(missing), Some(ErrorKind::MissingSource));

    let conflicting = BackupOptions {
        source_directory: Some(Utf8PathBuf::from("X")),
        source_directory_current: true,
        target_directory: Some(target),
        ..Default::default()
    };
    assert_eq!(
        preprocessed_kind(conflicting),
        Some(ErrorKind::ConflictingSource)
    );
}

#[test]
fn test_source_must_be_a_directory() {
    let (_temp_dir, source, target) = create_test_dirs();
    let file = source.join("image.jpg");
    std::fs::write(&file, b"jpeg").unwrap();

    let options = BackupOptions {
        source_directory: Some(file),
        ..base_options(&source, &target)
    };
    assert_eq!(
        preprocessed_kind(options),
        Some(ErrorKind::MissingOrInvalidSourceDir)
    );
}

#[test]
fn test_target_must_exist() {
    let (_temp_dir, source, target) = create_test_dirs();
    let options = BackupOptions {
        target_directory: Some(target.join("not-yet")),
        ..base_options(&source, &target)
    };
    assert_eq!(
        preprocessed_kind(options),
        Some(ErrorKind::MissingOrInvalidTargetDir)
    );
}

#[test]
fn test_thread_count_rules() {
    let (_temp_dir, source, target) = create_test_dirs();

    let single = BackupOptions {
        multithread: true,
        threads: 1,
        ..base_options(&source, &target)
    };
    assert_eq!(
        preprocessed_kind(single),
        Some(ErrorKind::InvalidThreadCount)
    );

    let four = BackupOptions {
        multithread: true,
        threads: 4,
        ..base_options(&source, &target)
    };
    assert_eq!(preprocessed_kind(four), None);
}

#[test]
fn test_max_size_rules() {
    let (_temp_dir, source, target) = create_test_dirs();

    let small = BackupOptions {
        max_size: 50,
        ..base_options(&source, &target)
    };
    assert_eq!(preprocessed_kind(small), Some(ErrorKind::InvalidMaxSize));

    let ok = BackupOptions {
        max_size: 101,
        ..base_options(&source, &target)
    };
    assert_eq!(preprocessed_kind(ok), None);
}

#[test]
fn test_prepare_produces_handoff_values() {
    let (_temp_dir, source, target) = create_test_dirs();
    let validated = prepare(BackupOptions {
        id: Some("nightly".to_string()),
        multithread: true,
        threads: 3,
        ..base_options(&source, &target)
    })
    .unwrap();

    assert_eq!(validated.backup_folder_name().unwrap(), "Photos_nightly");
    assert_eq!(validated.effective_threads(), 3);
    assert_eq!(validated.target_path(), target.as_path());
    assert_eq!(validated.source_path().unwrap(), source);
}

#[test]
fn test_prepare_rejects_preset_with_inclusions() {
    let (_temp_dir, source, target) = create_test_dirs();
    let err = prepare(BackupOptions {
        preset: Preset::Code,
        file_inclusions: set(&["rs"]),
        ..base_options(&source, &target)
    })
    .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::ConflictingPreset);
}

#[test]
fn test_prepare_reports_both_filters_with_preset_as_filter_conflict() {
    let (_temp_dir, source, target) = create_test_dirs();
    let options = BackupOptions {
        preset: Preset::Images,
        file_inclusions: set(&["jpg"]),
        file_exclusions: set(&["png"]),
        ..base_options(&source, &target)
    };

    assert_eq!(
        preprocessed_kind(options.clone()),
        Some(ErrorKind::ConflictingFilters)
    );
    assert_eq!(
        prepare(options).unwrap_err().kind(),
        ErrorKind::ConflictingFilters
    );
}

#[test]
fn test_every_preset_prepares_cleanly() {
    let (_temp_dir, source, target) = create_test_dirs();
    for preset in Preset::ALL {
        let result = prepare(BackupOptions {
            preset,
            ..base_options(&source, &target)
        });
        assert!(result.is_ok(), "{}: {:?}", preset, result.err());
    }
}

#[test]
fn test_first_violation_matches_aggregate() {
    let options = BackupOptions {
        dir_exclusions: set(&["x/y"]),
        max_size: 7,
        ..Default::default()
    };
    let all = collect_violations(&options);
    assert_eq!(all.len(), 4);
    assert_eq!(validate(&options).unwrap_err(), all[0]);
}

proptest! {
    #[test]
    fn prop_extensions_with_dot_fail(prefix in "[a-z0-9]{0,5}", suffix in "[a-z0-9]{0,5}") {
        let (_temp_dir, source, target) = create_test_dirs();
        let ext = format!("{}.{}", prefix, suffix);
        let options = BackupOptions {
            file_exclusions: [ext].into_iter().collect(),
            ..base_options(&source, &target)
        };
        prop_assert_eq!(preprocessed_kind(options), Some(ErrorKind::InvalidExtension));
    }

    #[test]
    fn prop_alphanumeric_extensions_pass(ext in "[a-zA-Z0-9]{1,8}") {
        let (_temp_dir, source, target) = create_test_dirs();
        let options = BackupOptions {
            file_inclusions: [ext].into_iter().collect(),
            ..base_options(&source, &target)
        };
        prop_assert_eq!(preprocessed_kind(options), None);
    }

    #[test]
    fn prop_dir_exclusions_with_separator_fail(head in "[a-z_]{0,6}", tail in "[a-z_]{0,6}") {
        let (_temp_dir, source, target) = create_test_dirs();
        let options = BackupOptions {
            dir_exclusions: [format!("{}/{}", head, tail)].into_iter().collect(),
            ..base_options(&source, &target)
        };
        prop_assert_eq!(preprocessed_kind(options), Some(ErrorKind::InvalidDirExclusion));
    }

    #[test]
    fn prop_max_size_floor(max_size in 0u64..=100) {
        let (_temp_dir, source, target) = create_test_dirs();
        let options = BackupOptions {
            max_size,
            ..base_options(&source, &target)
        };
        prop_assert_eq!(preprocessed_kind(options), Some(ErrorKind::InvalidMaxSize));
    }

    #[test]
    fn prop_id_gets_single_prefix(id in "[a-z0-9-]{1,12}") {
        let mut options = BackupOptions {
            id: Some(id.clone()),
            ..Default::default()
        };
        preprocess(&mut options);
        prop_assert_eq!(options.id, Some(format!("_{}", id)));
    }
}
