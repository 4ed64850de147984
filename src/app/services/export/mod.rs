//! Export of enriched records to CSV or Parquet
//!
//! Records are laid out as one polars DataFrame (identity columns, input
//! measurements, then every derived field) and written with the polars
//! writers.

use crate::app::models::EnrichedRecord;
use crate::app::services::duval::duval_projection;
use crate::config::{CompressionAlgorithm, ExportFormat};
use crate::constants::columns;
use crate::{Error, Result};
use polars::prelude::*;
use std::fs::File;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Timestamp layout used for the injection time column
const DATETIME_OUTPUT_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Suffix inserted before the extension of the top-N export
const TOP_SUFFIX: &str = "_top";

/// Result of one export
#[derive(Debug, Clone, PartialEq)]
pub struct ExportSummary {
    pub path: PathBuf,
    pub rows: usize,
    pub format: ExportFormat,
}

/// Lay out enriched records as a DataFrame, one row per record
pub fn records_to_frame<'a, I>(records: I) -> Result<DataFrame>
where
    I: IntoIterator<Item = &'a EnrichedRecord>,
{
    let records: Vec<&EnrichedRecord> = records.into_iter().collect();

    let text = |f: &dyn Fn(&EnrichedRecord) -> Option<String>| -> Vec<Option<String>> {
        records.iter().map(|&r| f(r)).collect()
    };
    let number = |f: &dyn Fn(&EnrichedRecord) -> Option<f64>| -> Vec<Option<f64>> {
        records.iter().map(|&r| f(r)).collect()
    };

    let projections: Vec<Option<(f64, f64)>> = records
        .iter()
        .map(|r| {
            r.duval
                .percentages
                .map(|p| duval_projection(p.ch4, p.c2h4, p.c2h2))
        })
        .collect();

    let mut frame_columns = vec![
        Column::new("site_code".into(), text(&|r| r.record.site_code.clone())),
        Column::new("equipment_id".into(), text(&|r| r.record.equipment_id.clone())),
        Column::new("station_name".into(), text(&|r| r.record.station_name.clone())),
        Column::new("sample_date".into(), text(&|r| r.record.sample_date.clone())),
        Column::new(
            "sample_datetime".into(),
            text(&|r| {
                r.record
                    .sample_datetime
                    .map(|dt| dt.format(DATETIME_OUTPUT_FORMAT).to_string())
            }),
        ),
        Column::new(
            columns::TCG.into(),
            number(&|r| r.record.oil.total_combustible_gas),
        ),
        Column::new(columns::TAN.into(), number(&|r| r.record.oil.acid_number)),
        Column::new(
            columns::BREAKDOWN_VOLTAGE.into(),
            number(&|r| r.record.oil.breakdown_voltage),
        ),
        Column::new(
            columns::WATER_CONTENTS.into(),
            number(&|r| r.record.oil.water_content),
        ),
        Column::new(
            columns::DDF.into(),
            number(&|r| r.record.oil.dissipation_factor),
        ),
    ];

    for gas in [
        columns::HYDROGEN,
        columns::METHANE,
        columns::ETHANE,
        columns::ETHYLENE,
        columns::ACETYLENE,
        columns::CARBON_MONOXIDE,
        columns::CARBON_DIOXIDE,
        columns::PROPANE,
        columns::PROPYLENE,
    ] {
        frame_columns.push(Column::new(gas.into(), number(&|r| r.record.gases.get(gas))));
    }

    frame_columns.extend([
        Column::new(
            columns::CONDITION_NOTES.into(),
            text(&|r| r.record.condition_notes.clone()),
        ),
        Column::new(
            "risk_score".into(),
            records.iter().map(|r| r.risk_score).collect::<Vec<u32>>(),
        ),
        Column::new(
            "risk_flag".into(),
            text(&|r| Some(r.risk_flag.as_str().to_string())),
        ),
        Column::new(
            "duval_ch4_pct".into(),
            number(&|r| r.duval.percentages.map(|p| p.ch4)),
        ),
        Column::new(
            "duval_c2h4_pct".into(),
            number(&|r| r.duval.percentages.map(|p| p.c2h4)),
        ),
        Column::new(
            "duval_c2h2_pct".into(),
            number(&|r| r.duval.percentages.map(|p| p.c2h2)),
        ),
        Column::new(
            "duval_raw_ch4_pct".into(),
            number(&|r| r.duval.raw_percentages.map(|p| p.ch4)),
        ),
        Column::new(
            "duval_raw_c2h4_pct".into(),
            number(&|r| r.duval.raw_percentages.map(|p| p.c2h4)),
        ),
        Column::new(
            "duval_raw_c2h2_pct".into(),
            number(&|r| r.duval.raw_percentages.map(|p| p.c2h2)),
        ),
        Column::new(
            "duval_x".into(),
            projections.iter().map(|p| p.map(|(x, _)| x)).collect::<Vec<_>>(),
        ),
        Column::new(
            "duval_y".into(),
            projections.iter().map(|p| p.map(|(_, y)| y)).collect::<Vec<_>>(),
        ),
        Column::new(
            "duval_zone".into(),
            text(&|r| Some(r.duval.zone.as_str().to_string())),
        ),
        Column::new(
            "ternary_p1".into(),
            number(&|r| r.ternary.percentages.map(|p| p.p1)),
        ),
        Column::new(
            "ternary_p2".into(),
            number(&|r| r.ternary.percentages.map(|p| p.p2)),
        ),
        Column::new(
            "ternary_p3".into(),
            number(&|r| r.ternary.percentages.map(|p| p.p3)),
        ),
        Column::new(
            "ternary_zone".into(),
            text(&|r| Some(r.ternary.zone.as_str().to_string())),
        ),
    ]);

    DataFrame::new(frame_columns).map_err(|e| Error::table("Failed to build export table", e))
}

/// Write records to `path` in the requested format
pub fn write_records<'a, I>(
    records: I,
    path: &Path,
    format: ExportFormat,
    compression: CompressionAlgorithm,
) -> Result<ExportSummary>
where
    I: IntoIterator<Item = &'a EnrichedRecord>,
{
    let mut df = records_to_frame(records)?;
    let rows = df.height();

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent).map_err(|e| {
            Error::io(
                format!("Failed to create output directory {}", parent.display()),
                e,
            )
        })?;
    }

    let file = File::create(path)
        .map_err(|e| Error::io(format!("Failed to create {}", path.display()), e))?;

    debug!("Writing {} rows as {:?} to {}", rows, format, path.display());

    match format {
        ExportFormat::Csv => {
            let mut file = file;
            CsvWriter::new(&mut file)
                .include_header(true)
                .finish(&mut df)
                .map_err(|e| Error::export(path.display().to_string(), e.to_string()))?;
        }
        ExportFormat::Parquet => {
            ParquetWriter::new(file)
                .with_compression(compression.to_polars_compression())
                .finish(&mut df)
                .map_err(|e| Error::export(path.display().to_string(), e.to_string()))?;
        }
    }

    info!("Wrote {} records to {}", rows, path.display());

    Ok(ExportSummary {
        path: path.to_path_buf(),
        rows,
        format,
    })
}

/// Companion path for the top-N export (`report.csv` -> `report_top.csv`)
pub fn top_n_path(path: &Path) -> PathBuf {
    let stem = path
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();
    let file_name = match path.extension() {
        Some(ext) => format!("{}{}.{}", stem, TOP_SUFFIX, ext.to_string_lossy()),
        None => format!("{}{}", stem, TOP_SUFFIX),
    };
    path.with_file_name(file_name)
}

/// Output path with the extension that matches the format
pub fn with_format_extension(path: &Path, format: ExportFormat) -> PathBuf {
    if path.extension().is_some() {
        path.to_path_buf()
    } else {
        path.with_extension(format.extension())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::models::{GasConcentrations, SampleRecord};
    use crate::app::services::diagnostic_engine::classify_batch;
    use tempfile::TempDir;

    fn sample_records() -> Vec<EnrichedRecord> {
        classify_batch(vec![
            SampleRecord {
                site_code: Some("6515A".to_string()),
                equipment_id: Some("T1".to_string()),
                station_name: Some("SANATI BAHARESTAN".to_string()),
                sample_date: Some("1404-09-29".to_string()),
                gases: GasConcentrations {
                    hydrogen: Some(200.0),
                    ..GasConcentrations::duval(1126.0, 525.0, 1669.0, 8.0)
                },
                condition_notes: Some("حالت 5".to_string()),
                ..Default::default()
            },
            SampleRecord::default(),
        ])
    }

    #[test]
    fn test_frame_layout() {
        let records = sample_records();
        let df = records_to_frame(&records).unwrap();

        assert_eq!(df.height(), 2);
        for name in [
            "site_code",
            "station_name",
            "TCG",
            "C2H2",
            "ASROG",
            "risk_score",
            "risk_flag",
            "duval_x",
            "duval_zone",
            "ternary_zone",
        ] {
            assert!(df.column(name).is_ok(), "missing column {}", name);
        }

        let zones = df.column("duval_zone").unwrap().as_materialized_series().str().unwrap();
        assert_eq!(zones.get(0), Some("D1_corona"));
        assert_eq!(zones.get(1), Some("INSUFFICIENT_DATA"));

        let x = df.column("duval_x").unwrap().as_materialized_series().f64().unwrap();
        assert!(x.get(0).is_some());
        assert_eq!(x.get(1), None);
    }

    #[test]
    fn test_frame_carries_raw_and_rescaled_duval_shares() {
        let records = sample_records();
        let df = records_to_frame(&records).unwrap();
        let share = |name: &str, row: usize| {
            df.column(name)
                .unwrap()
                .as_materialized_series()
                .f64()
                .unwrap()
                .get(row)
        };

        // Ethane sits in the raw denominator: 1126 / 3328 of the gas total
        let raw_ch4 = share("duval_raw_ch4_pct", 0).unwrap();
        assert!((raw_ch4 - 33.834).abs() < 0.01);
        let raw_sum: f64 = ["duval_raw_ch4_pct", "duval_raw_c2h4_pct", "duval_raw_c2h2_pct"]
            .iter()
            .map(|name| share(name, 0).unwrap())
            .sum();
        assert!(raw_sum < 100.0);

        let rescaled_sum: f64 = ["duval_ch4_pct", "duval_c2h4_pct", "duval_c2h2_pct"]
            .iter()
            .map(|name| share(name, 0).unwrap())
            .sum();
        assert!((rescaled_sum - 100.0).abs() < 1e-6);

        assert_eq!(share("duval_raw_ch4_pct", 1), None);
    }

    #[test]
    fn test_empty_frame() {
        let df = records_to_frame(&Vec::<EnrichedRecord>::new()).unwrap();
        assert_eq!(df.height(), 0);
        assert!(df.column("risk_score").is_ok());
    }

    #[test]
    fn test_write_csv_and_read_back() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("out").join("report.csv");
        let records = sample_records();

        let summary = write_records(
            &records,
            &path,
            ExportFormat::Csv,
            CompressionAlgorithm::Snappy,
        )
        .unwrap();
        assert_eq!(summary.rows, 2);

        let df = CsvReadOptions::default()
            .with_has_header(true)
            .try_into_reader_with_file_path(Some(path.clone()))
            .unwrap()
            .finish()
            .unwrap();
        assert_eq!(df.height(), 2);
        assert!(df.column("risk_flag").is_ok());
    }

    #[test]
    fn test_write_parquet_and_read_back() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("report.parquet");
        let records = sample_records();

        write_records(
            &records,
            &path,
            ExportFormat::Parquet,
            CompressionAlgorithm::Zstd,
        )
        .unwrap();

        let df = ParquetReader::new(File::open(&path).unwrap())
            .finish()
            .unwrap();
        assert_eq!(df.height(), 2);
        let scores = df.column("risk_score").unwrap().as_materialized_series().u32().unwrap();
        assert_eq!(scores.get(0), Some(records[0].risk_score));
    }

    #[test]
    fn test_output_paths() {
        assert_eq!(
            top_n_path(Path::new("/tmp/report.csv")),
            PathBuf::from("/tmp/report_top.csv")
        );
        assert_eq!(top_n_path(Path::new("report")), PathBuf::from("report_top"));
        assert_eq!(
            with_format_extension(Path::new("report"), ExportFormat::Parquet),
            PathBuf::from("report.parquet")
        );
        assert_eq!(
            with_format_extension(Path::new("report.txt"), ExportFormat::Csv),
            PathBuf::from("report.txt")
        );
    }
}
