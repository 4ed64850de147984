//! Integration tests for input discovery and concurrent loading
//!
//! These tests write small oil test exports to temporary directories and run
//! them through discovery, the polars CSV reader and the record parser.

use dga_processor::app::services::record_loader::{RecordLoader, discover_inputs};
use dga_processor::Error;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

const HEADER: &str = "SampleName,InjDateTime,TCG,TAN,BreakdownVoltage,WaterContents,DDF,CH4,C2H6,C2H4,C2H2,ASROG";

fn write_csv(dir: &Path, name: &str, rows: &[&str]) -> PathBuf {
    let path = dir.join(name);
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).unwrap();
    }
    let mut content = String::from(HEADER);
    for row in rows {
        content.push('\n');
        content.push_str(row);
    }
    content.push('\n');
    fs::write(&path, content).unwrap();
    path
}

fn to_strings(paths: &[PathBuf]) -> Vec<String> {
    paths.iter().map(|p| p.display().to_string()).collect()
}

/// Test discovery over a file, a directory and a glob pattern
///
/// Purpose: Validate that every input form resolves to CSV files in a stable order
/// Benefit: Ensures repeated runs load files, and therefore rows, in the same order
#[test]
fn test_discover_inputs_mixed_forms() {
    let dir = TempDir::new().unwrap();
    let single = write_csv(dir.path(), "single.csv", &[]);
    write_csv(dir.path(), "nested/b.csv", &[]);
    write_csv(dir.path(), "nested/a.CSV", &[]);
    fs::write(dir.path().join("nested/notes.txt"), "not a table").unwrap();
    write_csv(dir.path(), "glob/x1.csv", &[]);
    write_csv(dir.path(), "glob/x2.csv", &[]);

    let inputs = vec![
        single.display().to_string(),
        dir.path().join("nested").display().to_string(),
        dir.path().join("glob").join("x*.csv").display().to_string(),
        single.display().to_string(),
    ];

    let files = discover_inputs(&inputs).unwrap();
    let names: Vec<String> = files
        .iter()
        .map(|p| p.file_name().unwrap().to_string_lossy().into_owned())
        .collect();

    assert_eq!(names, vec!["single.csv", "a.CSV", "b.csv", "x1.csv", "x2.csv"]);
}

/// Test discovery errors for missing paths and empty matches
///
/// Purpose: Validate that unusable inputs are reported instead of silently skipped
/// Benefit: A typo in an input path stops the run with a clear message
#[test]
fn test_discover_inputs_errors() {
    let dir = TempDir::new().unwrap();

    let missing = dir.path().join("missing.csv").display().to_string();
    let err = discover_inputs(&[missing]).unwrap_err();
    assert!(matches!(err, Error::FileNotFound { .. }));

    let no_match = dir.path().join("*.csv").display().to_string();
    let err = discover_inputs(&[no_match]).unwrap_err();
    assert!(matches!(err, Error::NoInputFiles { .. }));

    let empty_dir = dir.path().join("empty");
    fs::create_dir_all(&empty_dir).unwrap();
    let err = discover_inputs(&[empty_dir.display().to_string()]).unwrap_err();
    assert!(matches!(err, Error::NoInputFiles { .. }));
}

/// Test loading several files concurrently
///
/// Purpose: Validate that records come back in input order regardless of worker count
/// Benefit: Top-N tie-breaks and first-seen zone ordering stay reproducible
#[tokio::test]
async fn test_load_files_in_input_order() {
    let dir = TempDir::new().unwrap();
    let first = write_csv(
        dir.path(),
        "first.csv",
        &[
            "6515A T1 SANATI BAHARESTAN 1404-09-29,2025-12-20 10:30:00,1500,0.05,60,20,0.01,1126,525,1669,8,بدون عیب",
            "5165I T2 ANDISHEH3 1404-09-28,,3500,0.25,35,45,,100,20,40,50,حالت 5",
        ],
    );
    let second = write_csv(
        dir.path(),
        "second.csv",
        &["7427T T1 HEMATI 1404-09-27,,800,0.08,55,25,,,,,,تخلیه جزیی"],
    );

    let files = discover_inputs(&to_strings(&[second.clone(), first.clone()])).unwrap();
    let loader = RecordLoader::new(4).unwrap();
    let loaded = loader.load_files(files, None).await.unwrap();

    assert_eq!(loaded.records.len(), 3);
    assert_eq!(loaded.files, vec![(second, 1), (first, 2)]);

    let stations: Vec<Option<&str>> = loaded
        .records
        .iter()
        .map(|r| r.station_name.as_deref())
        .collect();
    assert_eq!(
        stations,
        vec![Some("HEMATI"), Some("SANATI BAHARESTAN"), Some("ANDISHEH3")]
    );

    assert_eq!(loaded.stats.total_rows, 3);
    assert_eq!(loaded.stats.primary_labels, 3);

    let first_record = &loaded.records[1];
    assert_eq!(first_record.gases.methane, Some(1126.0));
    assert_eq!(first_record.oil.dissipation_factor, Some(0.01));
    assert!(first_record.sample_datetime.is_some());

    // Empty measurement cells are missing, not zero
    assert_eq!(loaded.records[0].gases.methane, None);
}

/// Test that a file without the label column aborts the load
///
/// Purpose: Validate the fatal input-shape error for a missing SampleName column
/// Benefit: A wrong export type is rejected rather than producing unlabeled records
#[tokio::test]
async fn test_missing_label_column_is_fatal() {
    let dir = TempDir::new().unwrap();
    let good = write_csv(dir.path(), "good.csv", &["6515A T1 HEMATI 1404-09-29,,100,,,,,,,,,"]);
    let bad = dir.path().join("bad.csv");
    fs::write(&bad, "TCG,TAN\n100,0.1\n").unwrap();

    let loader = RecordLoader::new(2).unwrap();
    let err = loader.load_files(vec![good, bad], None).await.unwrap_err();

    assert!(err.is_input_shape_error());
    assert!(err.to_string().contains("SampleName"));
}

/// Test loading a file with only the label column and bad numeric cells
///
/// Purpose: Validate that missing optional columns and unparseable cells degrade to missing values
/// Benefit: Partial exports still produce classifiable records
#[tokio::test]
async fn test_partial_export_loads() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("partial.csv");
    fs::write(
        &path,
        "SampleName,TCG,C2H2\n6515A T1 HEMATI 1404-09-29,n/a,-3\nbroken label,2500,4\n",
    )
    .unwrap();

    let loader = RecordLoader::new(1).unwrap();
    let loaded = loader.load_files(vec![path], None).await.unwrap();

    assert_eq!(loaded.records.len(), 2);
    assert_eq!(loaded.records[0].oil.total_combustible_gas, None);
    assert_eq!(loaded.records[0].gases.acetylene, None);
    assert_eq!(loaded.records[1].oil.total_combustible_gas, Some(2500.0));

    assert_eq!(loaded.stats.fallback_labels, 1);
    assert_eq!(loaded.stats.cells_coerced_to_null, 2);
    assert!(loaded.stats.missing_columns.contains(&"TAN".to_string()));
}
