use chrono::{NaiveDate, NaiveDateTime};

use super::config::ChartConfig;
use super::scale::{LinearScale, TimeScale, midnight};
use crate::data::model::{Sample, Season, Series};

// ---------------------------------------------------------------------------
// Extents – how the scale domains are derived from the two seasons
// ---------------------------------------------------------------------------

/// Which data bounds the axes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ExtentPolicy {
    /// Dates run from the first date of season A to the last date of
    /// season B; values run from 0 to season A's maximum.  Season B values
    /// above that maximum are drawn outside the plot area.
    #[default]
    Reference,
    /// Dates and values cover both seasons.
    Merged,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Extents {
    pub dates: (NaiveDate, NaiveDate),
    pub values: (f64, f64),
}

impl Extents {
    pub fn compute(a: &Series, b: &Series, policy: ExtentPolicy) -> Self {
        match policy {
            ExtentPolicy::Reference => Extents {
                dates: (a.first_date(), b.last_date()),
                values: (0.0, a.max_value()),
            },
            ExtentPolicy::Merged => Extents {
                dates: (
                    a.first_date().min(b.first_date()),
                    a.last_date().max(b.last_date()),
                ),
                values: (0.0, a.max_value().max(b.max_value())),
            },
        }
    }
}

/// Describe every way `series` escapes `extents`.
fn out_of_extent_notes(series: &Series, extents: &Extents) -> Vec<String> {
    let mut notes = Vec::new();
    if series.first_date() < extents.dates.0 {
        notes.push(format!(
            "'{}' starts {}, before the x-axis begins ({})",
            series.label(),
            series.first_date(),
            extents.dates.0
        ));
    }
    if series.last_date() > extents.dates.1 {
        notes.push(format!(
            "'{}' ends {}, after the x-axis ends ({})",
            series.label(),
            series.last_date(),
            extents.dates.1
        ));
    }
    if series.max_value() > extents.values.1 {
        notes.push(format!(
            "'{}' peaks at {:.1} in, above the y-axis maximum ({:.1} in)",
            series.label(),
            series.max_value(),
            extents.values.1
        ));
    }
    notes
}

// ---------------------------------------------------------------------------
// CombinedIndex – both seasons in one date-ordered array
// ---------------------------------------------------------------------------

/// A sample tagged with the season it came from.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct IndexedSample {
    pub season: Season,
    pub sample: Sample,
}

/// Season A followed by season B.
///
/// Bisection needs the array sorted by date.  Concatenation only gives that
/// when season A ends before season B starts; otherwise the entries are
/// stably merged by date (A first on equal dates).
#[derive(Debug, Clone, PartialEq)]
pub struct CombinedIndex {
    entries: Vec<IndexedSample>,
    merged: bool,
}

impl CombinedIndex {
    pub fn new(a: &Series, b: &Series) -> Self {
        let tag = |season: Season| {
            move |sample: &Sample| IndexedSample {
                season,
                sample: *sample,
            }
        };
        let mut entries: Vec<IndexedSample> = a
            .samples()
            .iter()
            .map(tag(Season::A))
            .chain(b.samples().iter().map(tag(Season::B)))
            .collect();

        let sorted = entries
            .windows(2)
            .all(|w| w[0].sample.date <= w[1].sample.date);
        if !sorted {
            log::warn!(
                "Seasons '{}' and '{}' interleave in time; merging them by date for lookup",
                a.label(),
                b.label()
            );
            entries.sort_by_key(|e| e.sample.date);
        }

        CombinedIndex {
            entries,
            merged: !sorted,
        }
    }

    pub fn entries(&self) -> &[IndexedSample] {
        &self.entries
    }

    /// True when concatenation was not date-ordered and the entries were merged.
    pub fn is_merged(&self) -> bool {
        self.merged
    }

    /// First position whose date is not before `query`.
    pub fn bisect_left(&self, query: NaiveDateTime) -> usize {
        self.entries
            .partition_point(|e| midnight(e.sample.date) < query)
    }

    /// Entry closest in time to `query`.
    ///
    /// The two neighbours of the insertion point are compared; both indices
    /// are clamped to the array, so queries before the first or after the
    /// last entry return that entry.  An exact tie goes to the earlier one.
    pub fn nearest(&self, query: NaiveDateTime) -> Option<&IndexedSample> {
        let last = self.entries.len().checked_sub(1)?;
        let i = self.bisect_left(query);
        let before = &self.entries[i.saturating_sub(1).min(last)];
        let after = &self.entries[i.min(last)];

        let to_before = query - midnight(before.sample.date);
        let to_after = midnight(after.sample.date) - query;
        if to_before > to_after {
            Some(after)
        } else {
            Some(before)
        }
    }
}

// ---------------------------------------------------------------------------
// ChartModel
// ---------------------------------------------------------------------------

/// The hover overlay's target: a sample and where to draw it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Hover {
    pub season: Season,
    pub sample: Sample,
    /// Plot-area coordinates of the marker.
    pub x: f64,
    pub y: f64,
}

/// Two seasons plus the scales and lookup index derived from them.
/// Read-only once built; rebuild to change data or extent policy.
#[derive(Debug, Clone)]
pub struct ChartModel {
    seasons: [Series; 2],
    policy: ExtentPolicy,
    extents: Extents,
    x: TimeScale,
    y: LinearScale,
    index: CombinedIndex,
    notes: Vec<String>,
}

impl ChartModel {
    pub fn new(a: Series, b: Series, config: &ChartConfig, policy: ExtentPolicy) -> Self {
        let extents = Extents::compute(&a, &b, policy);
        let width = config.plot_width() as f64;
        let height = config.plot_height() as f64;

        let x = TimeScale::new(
            (midnight(extents.dates.0), midnight(extents.dates.1)),
            (0.0, width),
        );
        let y = LinearScale::new(extents.values, (height, 0.0));
        let index = CombinedIndex::new(&a, &b);

        let notes: Vec<String> = [&a, &b]
            .into_iter()
            .flat_map(|s| out_of_extent_notes(s, &extents))
            .collect();
        for note in &notes {
            log::warn!("{note}");
        }

        log::debug!(
            "Chart extents {:?}..{:?}, 0..{:.2} ({:?} policy)",
            extents.dates.0,
            extents.dates.1,
            extents.values.1,
            policy
        );

        ChartModel {
            seasons: [a, b],
            policy,
            extents,
            x,
            y,
            index,
            notes,
        }
    }

    /// Same seasons under a different extent policy.
    pub fn with_policy(&self, config: &ChartConfig, policy: ExtentPolicy) -> Self {
        let [a, b] = self.seasons.clone();
        ChartModel::new(a, b, config, policy)
    }

    /// Same config and policy with one season replaced.
    pub fn with_series(&self, config: &ChartConfig, season: Season, series: Series) -> Self {
        let [mut a, mut b] = self.seasons.clone();
        match season {
            Season::A => a = series,
            Season::B => b = series,
        }
        ChartModel::new(a, b, config, self.policy)
    }

    pub fn series(&self, season: Season) -> &Series {
        &self.seasons[season.index()]
    }

    pub fn policy(&self) -> ExtentPolicy {
        self.policy
    }

    pub fn extents(&self) -> &Extents {
        &self.extents
    }

    pub fn x_scale(&self) -> &TimeScale {
        &self.x
    }

    pub fn y_scale(&self) -> &LinearScale {
        &self.y
    }

    pub fn index(&self) -> &CombinedIndex {
        &self.index
    }

    /// Data the current extents leave outside the plot area.
    pub fn notes(&self) -> &[String] {
        &self.notes
    }

    pub fn width(&self) -> f64 {
        self.x.range().1
    }

    pub fn height(&self) -> f64 {
        self.y.range().0
    }

    pub fn map_date(&self, date: NaiveDate) -> f64 {
        self.x.map_date(date)
    }

    pub fn map_value(&self, value: f64) -> f64 {
        self.y.map(value)
    }

    /// Pointer x (plot-area coordinates) to the instant under it.
    pub fn pixel_to_date(&self, pointer_x: f64) -> NaiveDateTime {
        self.x.invert(pointer_x)
    }

    pub fn nearest(&self, query: NaiveDateTime) -> Option<&IndexedSample> {
        self.index.nearest(query)
    }

    /// Sample under the pointer and its marker position.
    pub fn hover(&self, pointer_x: f64) -> Option<Hover> {
        let query = self.pixel_to_date(pointer_x);
        let hit = self.nearest(query)?;
        Some(Hover {
            season: hit.season,
            sample: hit.sample,
            x: self.map_date(hit.sample.date),
            y: self.map_value(hit.sample.value),
        })
    }

    /// Polyline vertices for one season in plot-area coordinates.
    pub fn line_points(&self, season: Season) -> Vec<[f64; 2]> {
        self.series(season)
            .samples()
            .iter()
            .map(|s| [self.map_date(s.date), self.map_value(s.value)])
            .collect()
    }
}
