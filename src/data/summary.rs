//! Success counts for the proportion (pie) chart.

use super::error::UnknownSiteError;
use super::model::{LaunchDataset, Outcome, SiteSelector};

/// Successful launches at one site.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SiteCount {
    pub site: String,
    pub success_count: usize,
}

/// Occurrences of one outcome among a site's launches.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutcomeCount {
    pub outcome: Outcome,
    pub count: usize,
}

/// Result of [`summarize`]; the shape depends on the selector.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SiteSuccessSummary {
    /// One entry per site with at least one success, in first-appearance order.
    BySite(Vec<SiteCount>),
    /// Outcomes present at `site`, most frequent first.
    ByOutcome {
        site: String,
        counts: Vec<OutcomeCount>,
    },
}

/// One pie slice: label, count and share of the total.
#[derive(Debug, Clone, PartialEq)]
pub struct Slice {
    pub label: String,
    pub count: usize,
    pub fraction: f64,
}

impl SiteSuccessSummary {
    pub fn title(&self) -> String {
        match self {
            SiteSuccessSummary::BySite(_) => "Total Success Launches By Launch Site".to_string(),
            SiteSuccessSummary::ByOutcome { site, .. } => {
                format!("Total Success Launches By Site: {site}")
            }
        }
    }

    /// Sum of all counts.
    pub fn total(&self) -> usize {
        match self {
            SiteSuccessSummary::BySite(sites) => sites.iter().map(|s| s.success_count).sum(),
            SiteSuccessSummary::ByOutcome { counts, .. } => counts.iter().map(|c| c.count).sum(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.total() == 0
    }

    /// Slices in summary order. Fractions sum to 1 unless the summary is empty.
    pub fn slices(&self) -> Vec<Slice> {
        let pairs: Vec<(String, usize)> = match self {
            SiteSuccessSummary::BySite(sites) => sites
                .iter()
                .map(|s| (s.site.clone(), s.success_count))
                .collect(),
            SiteSuccessSummary::ByOutcome { counts, .. } => counts
                .iter()
                .map(|c| (c.outcome.to_string(), c.count))
                .collect(),
        };
        let total = self.total();
        pairs
            .into_iter()
            .map(|(label, count)| Slice {
                label,
                count,
                fraction: if total == 0 {
                    0.0
                } else {
                    count as f64 / total as f64
                },
            })
            .collect()
    }
}

/// Summarise launch success for the pie chart.
///
/// * `AllSites`: successful launches grouped by site. Sites without a
///   success are left out.
/// * A single site: count of each outcome occurring at that site. Outcomes
///   that never occur there get no entry.
///
/// Fails when the selector names a site the dataset does not contain.
pub fn summarize(
    dataset: &LaunchDataset,
    selector: &SiteSelector,
) -> Result<SiteSuccessSummary, UnknownSiteError> {
    dataset.check_selector(selector)?;

    match selector {
        SiteSelector::AllSites => {
            let counts = dataset
                .distinct_sites()
                .iter()
                .map(|site| SiteCount {
                    site: site.clone(),
                    success_count: dataset
                        .records()
                        .iter()
                        .filter(|r| r.outcome.is_success() && &r.launch_site == site)
                        .count(),
                })
                .filter(|c| c.success_count > 0)
                .collect();
            Ok(SiteSuccessSummary::BySite(counts))
        }
        SiteSelector::Site(site) => {
            // First-appearance order, then a stable sort keeps it for ties.
            let mut counts: Vec<OutcomeCount> = Vec::new();
            for rec in dataset.records().iter().filter(|r| &r.launch_site == site) {
                match counts.iter_mut().find(|c| c.outcome == rec.outcome) {
                    Some(entry) => entry.count += 1,
                    None => counts.push(OutcomeCount {
                        outcome: rec.outcome,
                        count: 1,
                    }),
                }
            }
            counts.sort_by(|a, b| b.count.cmp(&a.count));
            Ok(SiteSuccessSummary::ByOutcome {
                site: site.clone(),
                counts,
            })
        }
    }
}
