/// Data layer: core types, loading, and the two chart queries.
///
/// Architecture:
/// ```text
///  .csv / .json / .parquet
///        │
///        ▼
///   ┌──────────┐
///   │  loader   │  parse + validate rows → LaunchDataset
///   └──────────┘
///        │
///        ▼
///   ┌───────────────┐
///   │ LaunchDataset  │  Vec<LaunchRecord>, payload bounds, site list
///   └───────────────┘
///        │
///        ├──────────────┐
///        ▼              ▼
///   ┌──────────┐   ┌──────────┐
///   │ summary   │   │  filter   │
///   └──────────┘   └──────────┘
///   site/outcome     site + payload range
///   counts (pie)     → row indices (scatter)
/// ```

pub mod error;
pub mod filter;
pub mod loader;
pub mod model;
pub mod summary;

#[cfg(test)]
pub(crate) mod test_support {
    use super::model::{LaunchDataset, LaunchRecord, Outcome, SiteSelector};

    impl SiteSelector {
        pub fn site(name: impl Into<String>) -> Self {
            SiteSelector::Site(name.into())
        }
    }

    pub fn rec(site: &str, payload: f64, outcome: Outcome) -> LaunchRecord {
        LaunchRecord {
            flight_number: None,
            launch_site: site.to_string(),
            payload_mass_kg: payload,
            booster_version: None,
            booster_category: "FT".to_string(),
            outcome,
        }
    }

    /// Three launches at sites A and B.
    pub fn scenario() -> LaunchDataset {
        LaunchDataset::from_records(vec![
            rec("A", 500.0, Outcome::Success),
            rec("A", 1500.0, Outcome::Failure),
            rec("B", 2000.0, Outcome::Success),
        ])
    }

    /// A larger table: four sites, one of them without any success.
    pub fn varied() -> LaunchDataset {
        let sites = ["CCAFS LC-40", "VAFB SLC-4E", "KSC LC-39A", "CCAFS SLC-40"];
        let records = (0..40)
            .map(|i| {
                let site = sites[i % sites.len()];
                let outcome = if site != "CCAFS SLC-40" && i % 3 != 0 {
                    Outcome::Success
                } else {
                    Outcome::Failure
                };
                let mut r = rec(site, (i * 250) as f64, outcome);
                r.booster_category = ["v1.1", "FT", "B4", "B5"][i % 3].to_string();
                r
            })
            .collect();
        LaunchDataset::from_records(records)
    }
}
