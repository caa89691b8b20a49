use std::fmt;

use super::error::UnknownSiteError;

/// Raw selector value used by the site dropdown for "all sites".
pub const ALL_SITES_VALUE: &str = "ALL";

// ---------------------------------------------------------------------------
// Outcome – the `class` column
// ---------------------------------------------------------------------------

/// Launch outcome. Stored as `0`/`1` in the `class` column of the source.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Outcome {
    Failure,
    Success,
}

impl Outcome {
    /// Decode a `class` cell. Only exact `0` and `1` are accepted.
    pub fn from_class(class: f64) -> Option<Self> {
        if class == 0.0 {
            Some(Outcome::Failure)
        } else if class == 1.0 {
            Some(Outcome::Success)
        } else {
            None
        }
    }

    /// The `class` encoding, also used as the scatter y value.
    pub fn class(self) -> u8 {
        match self {
            Outcome::Failure => 0,
            Outcome::Success => 1,
        }
    }

    pub fn is_success(self) -> bool {
        self == Outcome::Success
    }

    pub fn label(self) -> &'static str {
        match self {
            Outcome::Failure => "Failure",
            Outcome::Success => "Success",
        }
    }
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

// ---------------------------------------------------------------------------
// LaunchRecord – one row of the table
// ---------------------------------------------------------------------------

/// A single historical launch.
#[derive(Debug, Clone, PartialEq)]
pub struct LaunchRecord {
    pub flight_number: Option<u32>,
    pub launch_site: String,
    pub payload_mass_kg: f64,
    /// Full booster version, e.g. `F9 FT B1021.1`. Optional in the source.
    pub booster_version: Option<String>,
    pub booster_category: String,
    pub outcome: Outcome,
}

// ---------------------------------------------------------------------------
// LaunchDataset – the complete loaded table
// ---------------------------------------------------------------------------

/// The loaded launch table with bounds and choice lists computed once.
///
/// Never mutated after construction; both chart operations only borrow it.
#[derive(Debug, Clone, Default)]
pub struct LaunchDataset {
    records: Vec<LaunchRecord>,
    min_payload_kg: f64,
    max_payload_kg: f64,
    /// Distinct launch sites in order of first appearance.
    sites: Vec<String>,
    /// Distinct booster categories in order of first appearance.
    booster_categories: Vec<String>,
}

impl LaunchDataset {
    /// Build the dataset and its derived values in one pass over `records`.
    /// An empty table gets the bounds `(0, 0)`.
    pub fn from_records(records: Vec<LaunchRecord>) -> Self {
        let mut min_payload_kg = f64::INFINITY;
        let mut max_payload_kg = f64::NEG_INFINITY;
        let mut sites: Vec<String> = Vec::new();
        let mut booster_categories: Vec<String> = Vec::new();

        for rec in &records {
            min_payload_kg = min_payload_kg.min(rec.payload_mass_kg);
            max_payload_kg = max_payload_kg.max(rec.payload_mass_kg);
            if !sites.contains(&rec.launch_site) {
                sites.push(rec.launch_site.clone());
            }
            if !booster_categories.contains(&rec.booster_category) {
                booster_categories.push(rec.booster_category.clone());
            }
        }

        if records.is_empty() {
            min_payload_kg = 0.0;
            max_payload_kg = 0.0;
        }

        LaunchDataset {
            records,
            min_payload_kg,
            max_payload_kg,
            sites,
            booster_categories,
        }
    }

    pub fn records(&self) -> &[LaunchRecord] {
        &self.records
    }

    /// Number of launches.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether the dataset is empty.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn min_payload_kg(&self) -> f64 {
        self.min_payload_kg
    }

    pub fn max_payload_kg(&self) -> f64 {
        self.max_payload_kg
    }

    /// Distinct launch sites, ordered by first appearance in the source.
    pub fn distinct_sites(&self) -> &[String] {
        &self.sites
    }

    /// Distinct booster categories, ordered by first appearance in the source.
    pub fn booster_categories(&self) -> &[String] {
        &self.booster_categories
    }

    /// Dropdown choices: [`SiteSelector::AllSites`] first, then every site.
    pub fn site_choices(&self) -> Vec<SiteSelector> {
        std::iter::once(SiteSelector::AllSites)
            .chain(self.sites.iter().cloned().map(SiteSelector::Site))
            .collect()
    }

    /// The full payload range `[min, max]` of this dataset.
    pub fn full_payload_range(&self) -> PayloadRange {
        PayloadRange::new(self.min_payload_kg, self.max_payload_kg)
    }

    pub fn has_site(&self, site: &str) -> bool {
        self.sites.iter().any(|s| s == site)
    }

    /// Map a raw dropdown value (`"ALL"` or a site name) to a selector.
    pub fn resolve_site(&self, value: &str) -> Result<SiteSelector, UnknownSiteError> {
        if value == ALL_SITES_VALUE {
            return Ok(SiteSelector::AllSites);
        }
        if self.has_site(value) {
            Ok(SiteSelector::Site(value.to_string()))
        } else {
            Err(UnknownSiteError(value.to_string()))
        }
    }

    /// Ensure `selector` refers to a site of this dataset.
    pub fn check_selector(&self, selector: &SiteSelector) -> Result<(), UnknownSiteError> {
        match selector {
            SiteSelector::AllSites => Ok(()),
            SiteSelector::Site(name) if self.has_site(name) => Ok(()),
            SiteSelector::Site(name) => Err(UnknownSiteError(name.clone())),
        }
    }
}

// ---------------------------------------------------------------------------
// SiteSelector
// ---------------------------------------------------------------------------

/// "All sites" or one specific launch site.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub enum SiteSelector {
    #[default]
    AllSites,
    Site(String),
}

impl SiteSelector {
    /// Whether a record at `launch_site` passes this selector.
    pub fn matches(&self, launch_site: &str) -> bool {
        match self {
            SiteSelector::AllSites => true,
            SiteSelector::Site(name) => name == launch_site,
        }
    }

    /// Raw dropdown value, the inverse of [`LaunchDataset::resolve_site`].
    pub fn value(&self) -> &str {
        match self {
            SiteSelector::AllSites => ALL_SITES_VALUE,
            SiteSelector::Site(name) => name,
        }
    }
}

impl fmt::Display for SiteSelector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SiteSelector::AllSites => f.write_str("All Sites"),
            SiteSelector::Site(name) => f.write_str(name),
        }
    }
}

// ---------------------------------------------------------------------------
// PayloadRange
// ---------------------------------------------------------------------------

/// Inclusive payload interval in kilograms.
///
/// `low > high` is allowed and denotes the empty interval.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PayloadRange {
    pub low: f64,
    pub high: f64,
}

impl PayloadRange {
    pub fn new(low: f64, high: f64) -> Self {
        PayloadRange { low, high }
    }

    pub fn is_empty(&self) -> bool {
        !(self.low <= self.high)
    }

    pub fn contains(&self, payload_mass_kg: f64) -> bool {
        self.low <= payload_mass_kg && payload_mass_kg <= self.high
    }

    /// Clamp both ends into `[min, max]`, keeping an empty range empty.
    pub fn clamped(&self, min: f64, max: f64) -> Self {
        PayloadRange {
            low: self.low.clamp(min, max),
            high: self.high.clamp(min, max),
        }
    }
}
