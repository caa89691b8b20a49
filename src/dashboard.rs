use crate::data::error::UnknownSiteError;
use crate::data::filter::{filter_and_label, ScatterSelection};
use crate::data::model::{LaunchDataset, PayloadRange, SiteSelector};
use crate::data::summary::{summarize, SiteSuccessSummary};

// ---------------------------------------------------------------------------
// Input-change entry point
// ---------------------------------------------------------------------------

/// The two inputs the dashboard watches.
#[derive(Debug, Clone, PartialEq)]
pub struct DashboardInputs {
    pub selector: SiteSelector,
    pub range: PayloadRange,
}

impl DashboardInputs {
    /// All sites over the full payload range of `dataset`.
    pub fn initial(dataset: &LaunchDataset) -> Self {
        DashboardInputs {
            selector: SiteSelector::AllSites,
            range: dataset.full_payload_range(),
        }
    }
}

/// Both chart results for one set of inputs.
#[derive(Debug, Clone, PartialEq)]
pub struct DashboardView {
    pub summary: Result<SiteSuccessSummary, UnknownSiteError>,
    pub scatter: Result<ScatterSelection, UnknownSiteError>,
}

impl DashboardView {
    /// The first error of either chart, if any.
    pub fn error(&self) -> Option<&UnknownSiteError> {
        self.summary.as_ref().err().or(self.scatter.as_ref().err())
    }
}

/// Recompute both charts after any input change.
///
/// The two queries are independent; each only borrows the dataset.
pub fn on_input_changed(dataset: &LaunchDataset, inputs: &DashboardInputs) -> DashboardView {
    let view = DashboardView {
        summary: summarize(dataset, &inputs.selector),
        scatter: filter_and_label(dataset, &inputs.selector, inputs.range),
    };
    match view.error() {
        Some(e) => log::warn!("Rejected selector: {e}"),
        None => log::debug!(
            "Recomputed view for {} in [{}, {}] kg",
            inputs.selector,
            inputs.range.low,
            inputs.range.high
        ),
    }
    view
}
