use std::path::PathBuf;

use clap::Parser;

/// Launch records dashboard.
#[derive(Debug, Clone, Parser)]
#[command(name = "launch-dash", version, about)]
pub struct Cli {
    /// Launch table to load at startup (.csv, .json or .parquet).
    pub data: Option<PathBuf>,

    /// Initially selected launch site ("ALL" for every site).
    #[arg(long, default_value = "ALL")]
    pub site: String,

    /// Step of the payload range sliders, in kg.
    #[arg(long, default_value_t = 1000.0, value_parser = parse_step)]
    pub payload_step: f64,

    /// Initial window width.
    #[arg(long, default_value_t = 1200.0)]
    pub width: f32,

    /// Initial window height.
    #[arg(long, default_value_t = 800.0)]
    pub height: f32,
}

fn parse_step(s: &str) -> Result<f64, String> {
    let step: f64 = s.parse().map_err(|e| format!("{e}"))?;
    if step.is_finite() && step > 0.0 {
        Ok(step)
    } else {
        Err(format!("step must be a positive number, got {s}"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_original_slider() {
        let cli = Cli::try_parse_from(["launch-dash"]).unwrap();
        assert_eq!(cli.data, None);
        assert_eq!(cli.payload_step, 1000.0);
        assert_eq!(cli.site, "ALL");
    }

    #[test]
    fn data_path_and_step() {
        let cli =
            Cli::try_parse_from(["launch-dash", "launches.csv", "--payload-step", "250"]).unwrap();
        assert_eq!(cli.data, Some(PathBuf::from("launches.csv")));
        assert_eq!(cli.payload_step, 250.0);
    }

    #[test]
    fn non_positive_step_is_rejected() {
        assert!(Cli::try_parse_from(["launch-dash", "--payload-step", "0"]).is_err());
        assert!(Cli::try_parse_from(["launch-dash", "--payload-step", "-5"]).is_err());
    }
}
