use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{Context, Result};
use arrow::array::{Float64Array, Int64Array, StringArray};
use arrow::datatypes::{DataType, Field, Schema};
use arrow::record_batch::RecordBatch;
use clap::Parser;
use parquet::arrow::ArrowWriter;
use serde::Serialize;

/// Write a synthetic launch table for trying out the dashboard.
#[derive(Debug, Parser)]
#[command(name = "generate_sample")]
struct Args {
    /// Output path; `.parquet` writes Parquet, anything else CSV.
    #[arg(long, default_value = "spacex_launch_dash.csv")]
    out: PathBuf,

    /// Number of launches.
    #[arg(long, default_value_t = 56)]
    rows: usize,

    #[arg(long, default_value_t = 42)]
    seed: u64,
}

const SITES: [&str; 4] = ["CCAFS LC-40", "VAFB SLC-4E", "KSC LC-39A", "CCAFS SLC-40"];

/// Booster generations in flight order: (category, version prefix,
/// max payload kg, success probability).
const BOOSTERS: [(&str, &str, f64, f64); 5] = [
    ("v1.0", "F9 v1.0  B", 700.0, 0.2),
    ("v1.1", "F9 v1.1  B", 4500.0, 0.35),
    ("FT", "F9 FT B", 9600.0, 0.75),
    ("B4", "F9 B4 B", 9600.0, 0.6),
    ("B5", "F9 B5 B", 9600.0, 0.95),
];

/// Minimal deterministic PRNG (xoshiro256**)
struct SimpleRng {
    state: [u64; 4],
}

impl SimpleRng {
    fn new(seed: u64) -> Self {
        let mut s = [0u64; 4];
        let mut x = seed;
        for slot in &mut s {
            x = x.wrapping_mul(6364136223846793005).wrapping_add(1);
            *slot = x;
        }
        SimpleRng { state: s }
    }

    fn next_u64(&mut self) -> u64 {
        let result = (self.state[1].wrapping_mul(5))
            .rotate_left(7)
            .wrapping_mul(9);
        let t = self.state[1] << 17;
        self.state[2] ^= self.state[0];
        self.state[3] ^= self.state[1];
        self.state[1] ^= self.state[2];
        self.state[0] ^= self.state[3];
        self.state[2] ^= t;
        self.state[3] = self.state[3].rotate_left(45);
        result
    }

    fn next_f64(&mut self) -> f64 {
        (self.next_u64() >> 11) as f64 / (1u64 << 53) as f64
    }

    fn pick<'a, T>(&mut self, items: &'a [T]) -> &'a T {
        &items[(self.next_u64() % items.len() as u64) as usize]
    }
}

/// One row in the layout the dashboard reads.
#[derive(Debug, Serialize)]
struct LaunchRow {
    #[serde(rename = "Flight Number")]
    flight_number: i64,
    #[serde(rename = "Launch Site")]
    launch_site: String,
    #[serde(rename = "class")]
    class: i64,
    #[serde(rename = "Payload Mass (kg)")]
    payload_mass_kg: f64,
    #[serde(rename = "Booster Version")]
    booster_version: String,
    #[serde(rename = "Booster Version Category")]
    booster_category: String,
}

fn generate(rows: usize, seed: u64) -> Vec<LaunchRow> {
    let mut rng = SimpleRng::new(seed);

    (0..rows)
        .map(|i| {
            // Later flights fly later booster generations.
            let generation = (i * BOOSTERS.len() / rows.max(1)).min(BOOSTERS.len() - 1);
            let (category, prefix, max_payload, p_success) = BOOSTERS[generation];
            let payload = (rng.next_f64() * max_payload).round();
            LaunchRow {
                flight_number: i as i64 + 1,
                launch_site: rng.pick(&SITES[..]).to_string(),
                class: i64::from(rng.next_f64() < p_success),
                payload_mass_kg: payload,
                booster_version: format!("{prefix}{}", 1000 + i),
                booster_category: category.to_string(),
            }
        })
        .collect()
}

fn write_csv(path: &Path, rows: &[LaunchRow]) -> Result<()> {
    let mut writer = csv::Writer::from_path(path).context("creating CSV file")?;
    for row in rows {
        writer.serialize(row).context("writing CSV row")?;
    }
    writer.flush().context("flushing CSV")?;
    Ok(())
}

fn write_parquet(path: &Path, rows: &[LaunchRow]) -> Result<()> {
    let schema = Arc::new(Schema::new(vec![
        Field::new("Flight Number", DataType::Int64, false),
        Field::new("Launch Site", DataType::Utf8, false),
        Field::new("class", DataType::Int64, false),
        Field::new("Payload Mass (kg)", DataType::Float64, false),
        Field::new("Booster Version", DataType::Utf8, false),
        Field::new("Booster Version Category", DataType::Utf8, false),
    ]));

    let batch = RecordBatch::try_new(
        schema.clone(),
        vec![
            Arc::new(Int64Array::from_iter_values(rows.iter().map(|r| r.flight_number))),
            Arc::new(StringArray::from_iter_values(rows.iter().map(|r| &r.launch_site))),
            Arc::new(Int64Array::from_iter_values(rows.iter().map(|r| r.class))),
            Arc::new(Float64Array::from_iter_values(rows.iter().map(|r| r.payload_mass_kg))),
            Arc::new(StringArray::from_iter_values(rows.iter().map(|r| &r.booster_version))),
            Arc::new(StringArray::from_iter_values(rows.iter().map(|r| &r.booster_category))),
        ],
    )
    .context("building record batch")?;

    let file = std::fs::File::create(path).context("creating Parquet file")?;
    let mut writer = ArrowWriter::try_new(file, schema, None).context("creating writer")?;
    writer.write(&batch).context("writing batch")?;
    writer.close().context("closing writer")?;
    Ok(())
}

fn main() -> Result<()> {
    let args = Args::parse();
    let rows = generate(args.rows, args.seed);

    let is_parquet = args
        .out
        .extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| e.eq_ignore_ascii_case("parquet"));
    if is_parquet {
        write_parquet(&args.out, &rows)?;
    } else {
        write_csv(&args.out, &rows)?;
    }

    println!("Wrote {} launches to {}", rows.len(), args.out.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn same_seed_same_table() {
        let a = generate(30, 7);
        let b = generate(30, 7);
        assert_eq!(a.len(), 30);
        for (x, y) in a.iter().zip(&b) {
            assert_eq!(x.launch_site, y.launch_site);
            assert_eq!(x.class, y.class);
            assert_eq!(x.payload_mass_kg, y.payload_mass_kg);
        }
    }

    #[test]
    fn rows_respect_booster_limits() {
        for row in generate(100, 1) {
            let (_, _, max_payload, _) = BOOSTERS
                .iter()
                .find(|b| b.0 == row.booster_category)
                .copied()
                .unwrap();
            assert!((0.0..=max_payload).contains(&row.payload_mass_kg));
            assert!(row.class == 0 || row.class == 1);
            assert!(SITES.contains(&row.launch_site.as_str()));
        }
    }
}
