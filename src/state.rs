use crate::color::ColorMap;
use crate::dashboard::{on_input_changed, DashboardInputs, DashboardView};
use crate::data::model::{LaunchDataset, PayloadRange, SiteSelector};

// ---------------------------------------------------------------------------
// Application state
// ---------------------------------------------------------------------------

/// The full UI state, independent of rendering.
pub struct AppState {
    /// Loaded dataset (None until a file is loaded).
    pub dataset: Option<LaunchDataset>,

    /// Current dropdown and range slider values.
    pub inputs: DashboardInputs,

    /// Chart results for `inputs` (cached, recomputed on change).
    pub view: Option<DashboardView>,

    /// Colours per launch site (all-sites pie).
    pub site_colors: ColorMap,

    /// Colours per booster category (scatter).
    pub booster_colors: ColorMap,

    /// Step of the payload sliders in kg. Sliders snap to multiples of it,
    /// which may miss the dataset bounds; `set_payload_range` clamps the
    /// snapped values so `[min, max]` is still selectable.
    pub payload_step: f64,

    /// Status / error message shown in the UI.
    pub status_message: Option<String>,
}

impl AppState {
    pub fn new(payload_step: f64) -> Self {
        Self {
            dataset: None,
            inputs: DashboardInputs {
                selector: SiteSelector::AllSites,
                range: PayloadRange::new(0.0, 0.0),
            },
            view: None,
            site_colors: ColorMap::new(&[]),
            booster_colors: ColorMap::new(&[]),
            payload_step,
            status_message: None,
        }
    }

    /// Ingest a newly loaded dataset: reset inputs and colours, recompute.
    pub fn set_dataset(&mut self, dataset: LaunchDataset) {
        self.inputs = DashboardInputs::initial(&dataset);
        self.site_colors = ColorMap::new(dataset.distinct_sites());
        self.booster_colors = ColorMap::new(dataset.booster_categories());
        self.dataset = Some(dataset);
        self.status_message = None;
        self.refresh();
    }

    /// Recompute both charts from the current inputs.
    pub fn refresh(&mut self) {
        self.view = self
            .dataset
            .as_ref()
            .map(|ds| on_input_changed(ds, &self.inputs));
        if let Some(e) = self.view.as_ref().and_then(|v| v.error()) {
            self.status_message = Some(format!("Error: {e}"));
        }
    }

    pub fn select_site(&mut self, selector: SiteSelector) {
        if self.inputs.selector != selector {
            log::debug!("Site selector changed to {}", selector.value());
            self.inputs.selector = selector;
            self.status_message = None;
            self.refresh();
        }
    }

    /// Set the payload range, clamped to the dataset bounds.
    pub fn set_payload_range(&mut self, range: PayloadRange) {
        let range = match &self.dataset {
            Some(ds) => range.clamped(ds.min_payload_kg(), ds.max_payload_kg()),
            None => range,
        };
        if self.inputs.range != range {
            self.inputs.range = range;
            self.refresh();
        }
    }

    pub fn reset_payload_range(&mut self) {
        if let Some(range) = self.dataset.as_ref().map(|ds| ds.full_payload_range()) {
            self.set_payload_range(range);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::test_support::scenario;

    #[test]
    fn loading_a_dataset_computes_the_initial_view() {
        let mut state = AppState::new(1000.0);
        assert!(state.view.is_none());
        state.set_dataset(scenario());
        assert_eq!(state.inputs.range, PayloadRange::new(500.0, 2000.0));
        let view = state.view.as_ref().unwrap();
        assert_eq!(view.scatter.as_ref().unwrap().len(), 3);
    }

    #[test]
    fn input_changes_recompute_the_view() {
        let mut state = AppState::new(1000.0);
        state.set_dataset(scenario());

        state.select_site(SiteSelector::site("B"));
        let scatter = state.view.as_ref().unwrap().scatter.clone().unwrap();
        assert_eq!(scatter.indices, vec![2]);

        state.set_payload_range(PayloadRange::new(0.0, 1000.0));
        let scatter = state.view.as_ref().unwrap().scatter.clone().unwrap();
        assert!(scatter.is_empty());
        // Clamped to the dataset minimum.
        assert_eq!(state.inputs.range.low, 500.0);

        state.reset_payload_range();
        assert_eq!(state.inputs.range, PayloadRange::new(500.0, 2000.0));
    }

    #[test]
    fn snapped_slider_values_reach_the_dataset_bounds() {
        let mut state = AppState::new(1000.0);
        state.set_dataset(scenario());
        state.set_payload_range(PayloadRange::new(500.0, 1000.0));

        // Bounds are [500, 2000]; a 1000 kg step snaps the low end to 0 and
        // the high end past the maximum to 3000.
        state.set_payload_range(PayloadRange::new(0.0, 3000.0));
        assert_eq!(state.inputs.range, PayloadRange::new(500.0, 2000.0));
        let scatter = state.view.as_ref().unwrap().scatter.clone().unwrap();
        assert_eq!(scatter.indices, vec![0, 1, 2]);
    }

    #[test]
    fn unknown_site_sets_status_and_keeps_running() {
        let mut state = AppState::new(1000.0);
        state.set_dataset(scenario());
        state.select_site(SiteSelector::site("Atlantis"));
        assert!(state.status_message.as_deref().unwrap().contains("Atlantis"));

        state.select_site(SiteSelector::AllSites);
        assert!(state.status_message.is_none());
        assert!(state.view.as_ref().unwrap().error().is_none());
    }
}
