use super::error::UnknownSiteError;
use super::model::{LaunchDataset, LaunchRecord, PayloadRange, SiteSelector};

// ---------------------------------------------------------------------------
// Scatter selection: rows passing the site and payload filters
// ---------------------------------------------------------------------------

/// Rows for the payload vs. outcome scatter chart.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScatterSelection {
    pub title: String,
    /// Indices into the dataset, ascending (original row order).
    pub indices: Vec<usize>,
}

impl ScatterSelection {
    pub fn len(&self) -> usize {
        self.indices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.indices.is_empty()
    }

    /// Selected records in dataset order.
    pub fn rows<'a>(
        &'a self,
        dataset: &'a LaunchDataset,
    ) -> impl Iterator<Item = &'a LaunchRecord> + 'a {
        self.indices.iter().map(move |&i| &dataset.records()[i])
    }

    /// Number of successful launches in the selection.
    pub fn success_count(&self, dataset: &LaunchDataset) -> usize {
        self.rows(dataset).filter(|r| r.outcome.is_success()).count()
    }
}

/// Chart title for the scatter view of `selector`.
pub fn scatter_title(selector: &SiteSelector) -> String {
    match selector {
        SiteSelector::AllSites => "Total Success Launches (All Sites)".to_string(),
        SiteSelector::Site(site) => format!("Total Success Launches at {site}"),
    }
}

/// Select the rows whose site passes `selector` and whose payload lies in
/// `range` (inclusive), keeping dataset order.
///
/// An inverted range (`low > high`) is the empty interval and selects
/// nothing. An unknown site is an error, as in
/// [`summarize`](super::summary::summarize).
pub fn filter_and_label(
    dataset: &LaunchDataset,
    selector: &SiteSelector,
    range: PayloadRange,
) -> Result<ScatterSelection, UnknownSiteError> {
    dataset.check_selector(selector)?;

    let indices = if range.is_empty() {
        Vec::new()
    } else {
        dataset
            .records()
            .iter()
            .enumerate()
            .filter(|(_, r)| range.contains(r.payload_mass_kg) && selector.matches(&r.launch_site))
            .map(|(i, _)| i)
            .collect()
    };

    Ok(ScatterSelection {
        title: scatter_title(selector),
        indices,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::Outcome;
    use crate::data::test_support::{rec, scenario, varied};

    #[test]
    fn all_sites_filters_on_payload_only() {
        let ds = scenario();
        let sel = filter_and_label(&ds, &SiteSelector::AllSites, PayloadRange::new(0.0, 1000.0))
            .unwrap();
        assert_eq!(sel.indices, vec![0]);
        assert_eq!(sel.title, "Total Success Launches (All Sites)");
        let row = sel.rows(&ds).next().unwrap();
        assert_eq!(row.launch_site, "A");
        assert_eq!(row.payload_mass_kg, 500.0);
    }

    #[test]
    fn single_site_filters_on_both() {
        let ds = scenario();
        let sel = filter_and_label(&ds, &SiteSelector::site("B"), PayloadRange::new(0.0, 10_000.0))
            .unwrap();
        assert_eq!(sel.indices, vec![2]);
        assert_eq!(sel.title, "Total Success Launches at B");
        assert_eq!(sel.success_count(&ds), 1);
    }

    #[test]
    fn bounds_are_inclusive() {
        let ds = scenario();
        let sel = filter_and_label(&ds, &SiteSelector::AllSites, PayloadRange::new(500.0, 1500.0))
            .unwrap();
        assert_eq!(sel.indices, vec![0, 1]);
    }

    #[test]
    fn inverted_range_selects_nothing() {
        let ds = varied();
        for selector in ds.site_choices() {
            let sel = filter_and_label(&ds, &selector, PayloadRange::new(5000.0, 100.0)).unwrap();
            assert!(sel.is_empty());
            assert_eq!(sel.title, scatter_title(&selector));
        }
    }

    #[test]
    fn full_range_keeps_every_matching_row() {
        let ds = varied();
        for selector in ds.site_choices() {
            let sel = filter_and_label(&ds, &selector, ds.full_payload_range()).unwrap();
            let expected: Vec<usize> = ds
                .records()
                .iter()
                .enumerate()
                .filter(|(_, r)| selector.matches(&r.launch_site))
                .map(|(i, _)| i)
                .collect();
            assert_eq!(sel.indices, expected);
        }
    }

    #[test]
    fn output_is_an_ordered_subsequence() {
        let ds = varied();
        let sel = filter_and_label(&ds, &SiteSelector::AllSites, PayloadRange::new(1000.0, 6000.0))
            .unwrap();
        assert!(sel.indices.windows(2).all(|w| w[0] < w[1]));
        assert!(sel.indices.iter().all(|&i| i < ds.len()));
        assert!(sel
            .rows(&ds)
            .all(|r| (1000.0..=6000.0).contains(&r.payload_mass_kg)));
    }

    #[test]
    fn unknown_site_fails_fast() {
        let ds = LaunchDataset::from_records(vec![rec("A", 1.0, Outcome::Success)]);
        assert_eq!(
            filter_and_label(&ds, &SiteSelector::site("Z"), PayloadRange::new(0.0, 1.0)),
            Err(UnknownSiteError("Z".into()))
        );
    }
}
