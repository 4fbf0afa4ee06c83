use std::path::PathBuf;

use crate::chart::config::ChartConfig;
use crate::chart::model::{ChartModel, ExtentPolicy, Hover};
use crate::color::SeasonColors;
use crate::data::loader::{self, SeasonSources};
use crate::data::model::{Season, Series};

// ---------------------------------------------------------------------------
// Application state
// ---------------------------------------------------------------------------

/// The full UI state, independent of rendering.
pub struct AppState {
    /// Canvas layout; fixed for the lifetime of the app.
    pub config: ChartConfig,

    /// Where each season was loaded from.
    pub sources: SeasonSources,

    /// Built once both seasons load; `None` after a failed startup.
    pub model: Option<ChartModel>,

    /// Extent policy applied on the next rebuild.
    pub extent_policy: ExtentPolicy,

    pub colors: SeasonColors,

    /// Sample under the pointer during the last frame.
    pub hover: Option<Hover>,

    /// Status / error message shown in the UI.
    pub status_message: Option<String>,
}

impl AppState {
    pub fn new(config: ChartConfig, sources: SeasonSources) -> Self {
        Self {
            config,
            sources,
            model: None,
            extent_policy: ExtentPolicy::default(),
            colors: SeasonColors::default(),
            hover: None,
            status_message: None,
        }
    }

    /// Load both seasons and build the model.  On failure nothing is drawn
    /// and the error is kept for the status line.
    pub fn initialize(&mut self) {
        match loader::load_seasons(&self.sources) {
            Ok((a, b)) => self.set_seasons(a, b),
            Err(e) => {
                log::error!("Failed to load seasons: {e:#}");
                self.model = None;
                self.status_message = Some(format!("Error: {e:#}"));
            }
        }
    }

    /// Reload both seasons from their current sources.  A failure keeps the
    /// chart already on screen.
    pub fn reload_all(&mut self) {
        match loader::load_seasons(&self.sources) {
            Ok((a, b)) => self.set_seasons(a, b),
            Err(e) => {
                log::error!("Failed to reload seasons: {e:#}");
                self.status_message = Some(format!("Error: {e:#}"));
            }
        }
    }

    pub fn set_seasons(&mut self, a: Series, b: Series) {
        self.model = Some(ChartModel::new(a, b, &self.config, self.extent_policy));
        self.hover = None;
        self.status_message = None;
    }

    /// Replace one season from a new file, keeping the current chart if the
    /// file is rejected.
    pub fn reload_season(&mut self, season: Season, path: PathBuf) {
        let series = match loader::load_series(&path) {
            Ok(series) => series,
            Err(e) => {
                log::error!("Failed to load {season} from {}: {e:#}", path.display());
                self.status_message = Some(format!("Error: {e:#}"));
                return;
            }
        };

        self.sources.set_path(season, path);
        match &self.model {
            Some(model) => {
                self.model = Some(model.with_series(&self.config, season, series));
                self.hover = None;
                self.status_message = None;
            }
            // The other season never loaded; retry it alongside the new file.
            None => self.initialize(),
        }
    }

    pub fn set_extent_policy(&mut self, policy: ExtentPolicy) {
        if policy == self.extent_policy {
            return;
        }
        self.extent_policy = policy;
        if let Some(model) = &self.model {
            self.model = Some(model.with_policy(&self.config, policy));
            self.hover = None;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    use crate::data::model::Sample;

    fn series(label: &str, year: i32, values: &[f64]) -> Series {
        let start = NaiveDate::from_ymd_opt(year, 11, 1).unwrap();
        let samples = values
            .iter()
            .enumerate()
            .map(|(i, &v)| Sample::new(start + chrono::TimeDelta::days(i as i64), v))
            .collect();
        Series::new(label, samples).unwrap()
    }

    fn missing_sources() -> SeasonSources {
        SeasonSources {
            a: PathBuf::from("no/such/a.csv"),
            b: PathBuf::from("no/such/b.csv"),
        }
    }

    #[test]
    fn test_failed_initialize_draws_nothing() {
        let mut state = AppState::new(ChartConfig::default(), missing_sources());
        state.initialize();
        assert!(state.model.is_none());
        assert!(state.status_message.as_deref().unwrap().starts_with("Error:"));
    }

    #[test]
    fn test_policy_change_rebuilds_model() {
        let mut state = AppState::new(ChartConfig::default(), SeasonSources::default());
        state.set_seasons(series("a", 2014, &[1.0, 4.0]), series("b", 2016, &[2.0, 9.0]));
        assert_eq!(state.model.as_ref().unwrap().extents().values.1, 4.0);

        state.set_extent_policy(ExtentPolicy::Merged);
        let model = state.model.as_ref().unwrap();
        assert_eq!(model.policy(), ExtentPolicy::Merged);
        assert_eq!(model.extents().values.1, 9.0);
    }

    #[test]
    fn test_failed_reload_keeps_chart() {
        let mut state = AppState::new(ChartConfig::default(), SeasonSources::default());
        state.set_seasons(series("a", 2014, &[1.0]), series("b", 2016, &[2.0]));

        state.reload_season(Season::B, PathBuf::from("no/such/file.csv"));
        assert!(state.model.is_some());
        assert!(state.status_message.is_some());
        assert_eq!(state.sources, SeasonSources::default());
    }

    #[test]
    fn test_failed_reload_all_keeps_chart() {
        let mut state = AppState::new(ChartConfig::default(), missing_sources());
        state.set_seasons(series("a", 2014, &[1.0, 3.0]), series("b", 2016, &[2.0]));

        state.reload_all();
        let model = state.model.as_ref().expect("chart kept after failed reload");
        assert_eq!(model.series(Season::A).label(), "a");
        assert!(state.status_message.as_deref().unwrap().starts_with("Error:"));
    }
}
