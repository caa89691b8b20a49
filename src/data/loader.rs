use std::fs::File;
use std::io::Read;
use std::path::Path;
use std::sync::Arc;

use arrow::array::{Array, AsArray, Float32Array, Float64Array, Int32Array, Int64Array, StringArray};
use arrow::datatypes::DataType;
use arrow::record_batch::RecordBatch;
use parquet::arrow::arrow_reader::ParquetRecordBatchReaderBuilder;
use serde::Deserialize;
use serde_json::Value as JsonValue;

use super::error::DataLoadError;
use super::model::{LaunchDataset, LaunchRecord, Outcome};

pub const COL_FLIGHT_NUMBER: &str = "Flight Number";
pub const COL_LAUNCH_SITE: &str = "Launch Site";
pub const COL_PAYLOAD_MASS: &str = "Payload Mass (kg)";
pub const COL_CLASS: &str = "class";
pub const COL_BOOSTER_VERSION: &str = "Booster Version";
pub const COL_BOOSTER_CATEGORY: &str = "Booster Version Category";

/// Columns every source must provide.
pub const REQUIRED_COLUMNS: [&str; 4] = [
    COL_LAUNCH_SITE,
    COL_PAYLOAD_MASS,
    COL_CLASS,
    COL_BOOSTER_CATEGORY,
];

// ---------------------------------------------------------------------------
// Public entry-point
// ---------------------------------------------------------------------------

/// Load a launch table from a file.  Dispatch by extension.
///
/// Supported formats:
/// * `.csv`     – header row with the launch columns (extra columns ignored)
/// * `.json`    – `[{ "Launch Site": "...", "class": 1, ... }, ...]`
/// * `.parquet` – one column per field, string or numeric types
pub fn load_file(path: &Path) -> Result<LaunchDataset, DataLoadError> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_ascii_lowercase();

    match ext.as_str() {
        "csv" => read_csv(open(path)?),
        "json" => read_json(open(path)?),
        "parquet" | "pq" => load_parquet(path),
        other => Err(DataLoadError::UnsupportedFormat(other.to_string())),
    }
}

fn open(path: &Path) -> Result<File, DataLoadError> {
    File::open(path).map_err(|source| DataLoadError::Io {
        path: path.to_path_buf(),
        source,
    })
}

fn check_columns<'a>(present: impl IntoIterator<Item = &'a str>) -> Result<(), DataLoadError> {
    let present: Vec<&str> = present.into_iter().collect();
    match REQUIRED_COLUMNS.iter().find(|c| !present.contains(*c)) {
        Some(missing) => Err(DataLoadError::MissingColumn(missing.to_string())),
        None => Ok(()),
    }
}

// ---------------------------------------------------------------------------
// Row validation shared by all formats
// ---------------------------------------------------------------------------

/// One row as it appears in the source, before validation.
#[derive(Debug, Deserialize)]
struct RawLaunch {
    #[serde(
        rename = "Flight Number",
        default,
        deserialize_with = "csv::invalid_option"
    )]
    flight_number: Option<f64>,
    #[serde(rename = "Launch Site")]
    launch_site: String,
    #[serde(rename = "Payload Mass (kg)")]
    payload_mass_kg: f64,
    #[serde(rename = "class")]
    class: f64,
    #[serde(rename = "Booster Version", default)]
    booster_version: Option<String>,
    #[serde(rename = "Booster Version Category")]
    booster_category: String,
}

impl RawLaunch {
    fn into_record(self, row: usize) -> Result<LaunchRecord, DataLoadError> {
        let invalid = |column: &str, message: String| DataLoadError::InvalidValue {
            row,
            column: column.to_string(),
            message,
        };

        let launch_site = self.launch_site.trim().to_string();
        if launch_site.is_empty() {
            return Err(invalid(COL_LAUNCH_SITE, "empty site name".into()));
        }
        if !self.payload_mass_kg.is_finite() || self.payload_mass_kg < 0.0 {
            return Err(invalid(
                COL_PAYLOAD_MASS,
                format!("{} is not a non-negative mass", self.payload_mass_kg),
            ));
        }
        let outcome = Outcome::from_class(self.class)
            .ok_or_else(|| invalid(COL_CLASS, format!("{} is not 0 or 1", self.class)))?;

        Ok(LaunchRecord {
            flight_number: self.flight_number.and_then(flight_number_from),
            launch_site,
            payload_mass_kg: self.payload_mass_kg,
            booster_version: self
                .booster_version
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty()),
            booster_category: self.booster_category.trim().to_string(),
            outcome,
        })
    }
}

/// Whole, non-negative values that fit a `u32`; pandas writes integer
/// columns holding NaN as floats (`1.0`). Anything else reads as absent.
fn flight_number_from(n: f64) -> Option<u32> {
    if n.fract() == 0.0 && n >= 0.0 && n <= u32::MAX as f64 {
        Some(n as u32)
    } else {
        None
    }
}

// ---------------------------------------------------------------------------
// CSV loader
// ---------------------------------------------------------------------------

/// Parse a CSV launch table (header row required) from any reader.
///
/// The leading unnamed index column pandas writes is ignored like any other
/// unknown column.
pub fn read_csv<R: Read>(source: R) -> Result<LaunchDataset, DataLoadError> {
    let mut reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(source);
    let headers = reader.headers()?.clone();
    check_columns(headers.iter())?;

    let mut records = Vec::new();
    for (row, result) in reader.deserialize::<RawLaunch>().enumerate() {
        let raw = result?;
        records.push(raw.into_record(row)?);
    }

    Ok(LaunchDataset::from_records(records))
}

// ---------------------------------------------------------------------------
// JSON loader
// ---------------------------------------------------------------------------

/// Records-oriented JSON, the `df.to_json(orient='records')` layout:
///
/// ```json
/// [
///   { "Launch Site": "CCAFS LC-40", "Payload Mass (kg)": 525.0,
///     "class": 0, "Booster Version Category": "v1.0" },
///   ...
/// ]
/// ```
pub fn read_json<R: Read>(source: R) -> Result<LaunchDataset, DataLoadError> {
    let root: JsonValue = serde_json::from_reader(source)?;
    let rows = root
        .as_array()
        .ok_or_else(|| DataLoadError::Malformed("expected top-level JSON array".into()))?;

    let mut records = Vec::with_capacity(rows.len());
    for (row, value) in rows.iter().enumerate() {
        let obj = value
            .as_object()
            .ok_or_else(|| DataLoadError::Malformed(format!("row {row} is not a JSON object")))?;
        check_columns(obj.keys().map(String::as_str))?;

        let raw: RawLaunch = serde_json::from_value(value.clone())
            .map_err(|e| DataLoadError::Malformed(format!("row {row}: {e}")))?;
        records.push(raw.into_record(row)?);
    }

    Ok(LaunchDataset::from_records(records))
}

// ---------------------------------------------------------------------------
// Parquet loader
// ---------------------------------------------------------------------------

/// Load a Parquet file with one column per launch field.
///
/// Text columns may be `Utf8` or `LargeUtf8`; numeric columns may be any of
/// `Int32`, `Int64`, `Float32`, `Float64`. Works with files written by both
/// **Pandas** (`df.to_parquet()`) and **Polars** (`df.write_parquet()`).
fn load_parquet(path: &Path) -> Result<LaunchDataset, DataLoadError> {
    let builder = ParquetRecordBatchReaderBuilder::try_new(open(path)?)?;
    check_columns(
        builder
            .schema()
            .fields()
            .iter()
            .map(|f| f.name().as_str()),
    )?;
    let reader = builder.build()?;

    let mut records = Vec::new();

    for batch_result in reader {
        let batch = batch_result?;

        let site_col = column(&batch, COL_LAUNCH_SITE)?;
        let payload_col = column(&batch, COL_PAYLOAD_MASS)?;
        let class_col = column(&batch, COL_CLASS)?;
        let category_col = column(&batch, COL_BOOSTER_CATEGORY)?;
        let flight_col = column(&batch, COL_FLIGHT_NUMBER).ok();
        let version_col = column(&batch, COL_BOOSTER_VERSION).ok();

        for i in 0..batch.num_rows() {
            let row = records.len();
            let missing = |col: &str| DataLoadError::InvalidValue {
                row,
                column: col.to_string(),
                message: "null or unsupported type".into(),
            };

            let raw = RawLaunch {
                flight_number: flight_col.and_then(|c| number_at(c, i)),
                launch_site: string_at(site_col, i).ok_or_else(|| missing(COL_LAUNCH_SITE))?,
                payload_mass_kg: number_at(payload_col, i)
                    .ok_or_else(|| missing(COL_PAYLOAD_MASS))?,
                class: number_at(class_col, i).ok_or_else(|| missing(COL_CLASS))?,
                booster_version: version_col.and_then(|c| string_at(c, i)),
                booster_category: string_at(category_col, i)
                    .ok_or_else(|| missing(COL_BOOSTER_CATEGORY))?,
            };
            records.push(raw.into_record(row)?);
        }
    }

    Ok(LaunchDataset::from_records(records))
}

// -- Parquet / Arrow helpers --

fn column<'a>(batch: &'a RecordBatch, name: &str) -> Result<&'a Arc<dyn Array>, DataLoadError> {
    batch
        .schema()
        .index_of(name)
        .map(|i| batch.column(i))
        .map_err(|_| DataLoadError::MissingColumn(name.to_string()))
}

/// Read a text cell; `None` for nulls and non-string columns.
fn string_at(col: &Arc<dyn Array>, row: usize) -> Option<String> {
    if col.is_null(row) {
        return None;
    }
    match col.data_type() {
        DataType::Utf8 => col
            .as_any()
            .downcast_ref::<StringArray>()
            .map(|s| s.value(row).to_string()),
        DataType::LargeUtf8 => Some(col.as_string::<i64>().value(row).to_string()),
        _ => None,
    }
}

/// Read a numeric cell as `f64`; `None` for nulls and non-numeric columns.
fn number_at(col: &Arc<dyn Array>, row: usize) -> Option<f64> {
    if col.is_null(row) {
        return None;
    }
    let any = col.as_any();
    match col.data_type() {
        DataType::Int32 => any
            .downcast_ref::<Int32Array>()
            .map(|a| a.value(row) as f64),
        DataType::Int64 => any
            .downcast_ref::<Int64Array>()
            .map(|a| a.value(row) as f64),
        DataType::Float32 => any
            .downcast_ref::<Float32Array>()
            .map(|a| a.value(row) as f64),
        DataType::Float64 => any.downcast_ref::<Float64Array>().map(|a| a.value(row)),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use arrow::datatypes::{Field, Schema};
    use parquet::arrow::ArrowWriter;

    use super::*;

    const SAMPLE_CSV: &str = "\
,Flight Number,Launch Site,class,Payload Mass (kg),Booster Version,Booster Version Category
0,1,CCAFS LC-40,0,0.0,F9 v1.0  B0003,v1.0
1,2,CCAFS LC-40,0,525.0,F9 v1.0  B0005,v1.0
2,3,VAFB SLC-4E,1,9600.0,F9 FT B1029.1,FT
3,4,KSC LC-39A,1,2490.0,F9 FT B1031.1,FT
";

    #[test]
    fn reads_original_csv_layout() {
        let ds = read_csv(SAMPLE_CSV.as_bytes()).unwrap();
        assert_eq!(ds.len(), 4);
        assert_eq!(ds.min_payload_kg(), 0.0);
        assert_eq!(ds.max_payload_kg(), 9600.0);
        assert_eq!(
            ds.distinct_sites(),
            ["CCAFS LC-40", "VAFB SLC-4E", "KSC LC-39A"]
        );

        let first = &ds.records()[0];
        assert_eq!(first.flight_number, Some(1));
        assert_eq!(first.outcome, Outcome::Failure);
        assert_eq!(first.booster_version.as_deref(), Some("F9 v1.0  B0003"));
        assert_eq!(first.booster_category, "v1.0");
        assert_eq!(ds.records()[2].outcome, Outcome::Success);
    }

    #[test]
    fn optional_columns_may_be_absent() {
        let csv = "Launch Site,Payload Mass (kg),class,Booster Version Category\nA,500,1,FT\n";
        let ds = read_csv(csv.as_bytes()).unwrap();
        assert_eq!(ds.records()[0].flight_number, None);
        assert_eq!(ds.records()[0].booster_version, None);
    }

    #[test]
    fn flight_number_written_as_float_still_loads() {
        let csv = "\
Flight Number,Launch Site,Payload Mass (kg),class,Booster Version Category
1.0,A,500,1,FT
,A,600,0,FT
2.5,B,700,1,FT
-3,B,800,1,FT
n/a,B,900,0,FT
";
        let ds = read_csv(csv.as_bytes()).unwrap();
        let numbers: Vec<Option<u32>> = ds.records().iter().map(|r| r.flight_number).collect();
        assert_eq!(numbers, vec![Some(1), None, None, None, None]);
    }

    #[test]
    fn json_flight_number_as_float_or_null() {
        let json = r#"[
            {"Flight Number": 7.0, "Launch Site": "A", "class": 1,
             "Payload Mass (kg)": 500, "Booster Version Category": "FT"},
            {"Flight Number": null, "Launch Site": "A", "class": 0,
             "Payload Mass (kg)": 600, "Booster Version Category": "FT"}
        ]"#;
        let ds = read_json(json.as_bytes()).unwrap();
        assert_eq!(ds.records()[0].flight_number, Some(7));
        assert_eq!(ds.records()[1].flight_number, None);
    }

    #[test]
    fn flight_number_conversion_rejects_non_integral_values() {
        assert_eq!(flight_number_from(12.0), Some(12));
        assert_eq!(flight_number_from(0.0), Some(0));
        assert_eq!(flight_number_from(1.5), None);
        assert_eq!(flight_number_from(-1.0), None);
        assert_eq!(flight_number_from(f64::NAN), None);
        assert_eq!(flight_number_from(1e12), None);
    }

    #[test]
    fn missing_required_column_is_reported() {
        let csv = "Launch Site,Payload Mass (kg),Booster Version Category\nA,500,FT\n";
        match read_csv(csv.as_bytes()) {
            Err(DataLoadError::MissingColumn(col)) => assert_eq!(col, "class"),
            other => panic!("expected MissingColumn, got {other:?}"),
        }
    }

    #[test]
    fn invalid_class_names_row_and_column() {
        let csv = "Launch Site,Payload Mass (kg),class,Booster Version Category\nA,500,1,FT\nA,600,2,FT\n";
        match read_csv(csv.as_bytes()) {
            Err(DataLoadError::InvalidValue { row, column, .. }) => {
                assert_eq!(row, 1);
                assert_eq!(column, "class");
            }
            other => panic!("expected InvalidValue, got {other:?}"),
        }
    }

    #[test]
    fn negative_payload_is_rejected() {
        let csv = "Launch Site,Payload Mass (kg),class,Booster Version Category\nA,-1,1,FT\n";
        assert!(matches!(
            read_csv(csv.as_bytes()),
            Err(DataLoadError::InvalidValue { .. })
        ));
    }

    #[test]
    fn header_only_csv_is_an_empty_dataset() {
        let csv = "Launch Site,Payload Mass (kg),class,Booster Version Category\n";
        let ds = read_csv(csv.as_bytes()).unwrap();
        assert!(ds.is_empty());
        assert_eq!(ds.max_payload_kg(), 0.0);
    }

    #[test]
    fn reads_records_oriented_json() {
        let json = r#"[
            {"Flight Number": 1, "Launch Site": "A", "class": 1,
             "Payload Mass (kg)": 500, "Booster Version Category": "FT"},
            {"Launch Site": "B", "class": 0, "Payload Mass (kg)": 2000.5,
             "Booster Version": null, "Booster Version Category": "B4"}
        ]"#;
        let ds = read_json(json.as_bytes()).unwrap();
        assert_eq!(ds.len(), 2);
        assert_eq!(ds.records()[0].flight_number, Some(1));
        assert_eq!(ds.records()[1].outcome, Outcome::Failure);
        assert_eq!(ds.max_payload_kg(), 2000.5);
    }

    #[test]
    fn json_row_missing_column_is_reported() {
        let json = r#"[{"Launch Site": "A", "class": 1, "Payload Mass (kg)": 500}]"#;
        assert!(matches!(
            read_json(json.as_bytes()),
            Err(DataLoadError::MissingColumn(col)) if col == "Booster Version Category"
        ));
    }

    #[test]
    fn json_must_be_an_array() {
        assert!(matches!(
            read_json(r#"{"rows": []}"#.as_bytes()),
            Err(DataLoadError::Malformed(_))
        ));
    }

    #[test]
    fn load_file_dispatches_on_extension() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("launches.csv");
        let mut file = File::create(&path).unwrap();
        file.write_all(SAMPLE_CSV.as_bytes()).unwrap();
        drop(file);

        let ds = load_file(&path).unwrap();
        assert_eq!(ds.len(), 4);

        assert!(matches!(
            load_file(&dir.path().join("launches.xlsx")),
            Err(DataLoadError::UnsupportedFormat(ext)) if ext == "xlsx"
        ));
        assert!(matches!(
            load_file(&dir.path().join("absent.csv")),
            Err(DataLoadError::Io { .. })
        ));
    }

    #[test]
    fn reads_parquet_with_mixed_numeric_types() {
        let schema = Arc::new(Schema::new(vec![
            Field::new(COL_LAUNCH_SITE, DataType::Utf8, false),
            Field::new(COL_PAYLOAD_MASS, DataType::Float64, false),
            Field::new(COL_CLASS, DataType::Int64, false),
            Field::new(COL_BOOSTER_CATEGORY, DataType::Utf8, false),
        ]));
        let batch = RecordBatch::try_new(
            schema.clone(),
            vec![
                Arc::new(StringArray::from(vec!["A", "B"])),
                Arc::new(Float64Array::from(vec![500.0, 1500.0])),
                Arc::new(Int64Array::from(vec![1, 0])),
                Arc::new(StringArray::from(vec!["FT", "B4"])),
            ],
        )
        .unwrap();

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("launches.parquet");
        let mut writer = ArrowWriter::try_new(File::create(&path).unwrap(), schema, None).unwrap();
        writer.write(&batch).unwrap();
        writer.close().unwrap();

        let ds = load_file(&path).unwrap();
        assert_eq!(ds.len(), 2);
        assert_eq!(ds.records()[0].outcome, Outcome::Success);
        assert_eq!(ds.records()[1].booster_category, "B4");
        assert_eq!(ds.distinct_sites(), ["A", "B"]);
    }
}
