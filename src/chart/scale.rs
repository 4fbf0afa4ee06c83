use chrono::{Datelike, Months, NaiveDate, NaiveDateTime, NaiveTime, TimeDelta};

/// Midnight at the start of `date`; samples are daily so this is where they sit
/// on the time axis.
pub fn midnight(date: NaiveDate) -> NaiveDateTime {
    date.and_time(NaiveTime::MIN)
}

// ---------------------------------------------------------------------------
// Linear scale (values → pixels)
// ---------------------------------------------------------------------------

/// Continuous linear mapping from a numeric domain onto a pixel range.
/// The range may be inverted (`[height, 0]`) so larger values draw higher.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LinearScale {
    domain: (f64, f64),
    range: (f64, f64),
}

impl LinearScale {
    pub fn new(domain: (f64, f64), range: (f64, f64)) -> Self {
        LinearScale { domain, range }
    }

    pub fn range(&self) -> (f64, f64) {
        self.range
    }

    /// A zero-width domain maps everything to the middle of the range.
    pub fn map(&self, value: f64) -> f64 {
        let (d0, d1) = self.domain;
        let (r0, r1) = self.range;
        let span = d1 - d0;
        if span == 0.0 {
            return (r0 + r1) / 2.0;
        }
        r0 + (value - d0) / span * (r1 - r0)
    }

    pub fn invert(&self, pixel: f64) -> f64 {
        let (d0, d1) = self.domain;
        let (r0, r1) = self.range;
        let span = r1 - r0;
        if span == 0.0 {
            return d0;
        }
        d0 + (pixel - r0) / span * (d1 - d0)
    }

    /// Round tick values covering the domain, roughly `count` of them.
    pub fn ticks(&self, count: usize) -> Vec<f64> {
        let (lo, hi) = ordered(self.domain.0, self.domain.1);
        if count == 0 || lo == hi {
            return vec![lo];
        }
        let step = nice_step(lo, hi, count);
        let first = (lo / step).ceil() as i64;
        let last = (hi / step).floor() as i64;
        (first..=last).map(|i| i as f64 * step).collect()
    }
}

fn ordered(a: f64, b: f64) -> (f64, f64) {
    if a <= b { (a, b) } else { (b, a) }
}

/// Step of 1, 2 or 5 × 10^k closest to splitting `[lo, hi]` into `count` parts.
pub fn nice_step(lo: f64, hi: f64, count: usize) -> f64 {
    let raw = (hi - lo) / count as f64;
    let base = 10f64.powf(raw.log10().floor());
    let error = raw / base;
    let factor = if error >= 50f64.sqrt() {
        10.0
    } else if error >= 10f64.sqrt() {
        5.0
    } else if error >= 2f64.sqrt() {
        2.0
    } else {
        1.0
    };
    factor * base
}

// ---------------------------------------------------------------------------
// Time scale (instants → pixels)
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TimeScale {
    domain: (NaiveDateTime, NaiveDateTime),
    range: (f64, f64),
}

impl TimeScale {
    pub fn new(domain: (NaiveDateTime, NaiveDateTime), range: (f64, f64)) -> Self {
        TimeScale { domain, range }
    }

    pub fn range(&self) -> (f64, f64) {
        self.range
    }

    fn as_linear(&self) -> LinearScale {
        let span = (self.domain.1 - self.domain.0).num_milliseconds() as f64;
        LinearScale::new((0.0, span), self.range)
    }

    pub fn map(&self, instant: NaiveDateTime) -> f64 {
        let offset = (instant - self.domain.0).num_milliseconds() as f64;
        self.as_linear().map(offset)
    }

    pub fn map_date(&self, date: NaiveDate) -> f64 {
        self.map(midnight(date))
    }

    pub fn invert(&self, pixel: f64) -> NaiveDateTime {
        let offset = self.as_linear().invert(pixel).round() as i64;
        self.domain.0 + TimeDelta::milliseconds(offset)
    }

    /// Calendar-aligned tick dates inside the domain, roughly `count` of them.
    pub fn ticks(&self, count: usize) -> Vec<NaiveDate> {
        let (start, end) = self.domain;
        if end <= start || count == 0 {
            return vec![start.date()];
        }
        let span_days = (end - start).num_seconds() as f64 / 86_400.0;
        let interval = TickInterval::choose(span_days / count as f64);

        let mut ticks = Vec::new();
        let mut t = interval.floor(start.date());
        while midnight(t) < start {
            t = interval.next(t);
        }
        while midnight(t) <= end {
            ticks.push(t);
            t = interval.next(t);
        }
        ticks
    }
}

/// Axis label for a tick date: year on Jan 1, month name on the 1st,
/// abbreviated month and day otherwise.
pub fn tick_label(date: NaiveDate) -> String {
    if date.day() == 1 && date.month() == 1 {
        date.format("%Y").to_string()
    } else if date.day() == 1 {
        date.format("%B").to_string()
    } else {
        date.format("%b %d").to_string()
    }
}

// ---------------------------------------------------------------------------
// Tick intervals
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickInterval {
    Days(u32),
    Weeks,
    Months(u32),
    Years(i32),
}

impl TickInterval {
    const CANDIDATES: [TickInterval; 11] = [
        TickInterval::Days(1),
        TickInterval::Days(2),
        TickInterval::Weeks,
        TickInterval::Months(1),
        TickInterval::Months(3),
        TickInterval::Years(1),
        TickInterval::Years(2),
        TickInterval::Years(5),
        TickInterval::Years(10),
        TickInterval::Years(20),
        TickInterval::Years(50),
    ];

    fn approx_days(self) -> f64 {
        match self {
            TickInterval::Days(n) => n as f64,
            TickInterval::Weeks => 7.0,
            TickInterval::Months(n) => 30.0 * n as f64,
            TickInterval::Years(n) => 365.0 * n as f64,
        }
    }

    /// Candidate whose length is closest (by ratio) to `target_days`.
    pub fn choose(target_days: f64) -> TickInterval {
        Self::CANDIDATES
            .iter()
            .copied()
            .min_by(|a, b| {
                let da = (a.approx_days() / target_days).ln().abs();
                let db = (b.approx_days() / target_days).ln().abs();
                da.total_cmp(&db)
            })
            .unwrap_or(TickInterval::Months(1))
    }

    /// Last aligned boundary at or before `date`.
    pub fn floor(self, date: NaiveDate) -> NaiveDate {
        match self {
            TickInterval::Days(n) => date - TimeDelta::days((date.day0() % n) as i64),
            TickInterval::Weeks => {
                date - TimeDelta::days(date.weekday().num_days_from_sunday() as i64)
            }
            TickInterval::Months(n) => {
                let month0 = date.month0() - date.month0() % n;
                NaiveDate::from_ymd_opt(date.year(), month0 + 1, 1).unwrap_or(date)
            }
            TickInterval::Years(n) => {
                let year = date.year() - date.year().rem_euclid(n);
                NaiveDate::from_ymd_opt(year, 1, 1).unwrap_or(date)
            }
        }
    }

    /// Next aligned boundary after the aligned `date`.
    pub fn next(self, date: NaiveDate) -> NaiveDate {
        match self {
            TickInterval::Days(n) => {
                // restart counting on the 1st of each month
                let candidate = date + TimeDelta::days(n as i64);
                let month_start = first_of_next_month(date);
                candidate.min(month_start)
            }
            TickInterval::Weeks => date + TimeDelta::days(7),
            TickInterval::Months(n) => date + Months::new(n),
            TickInterval::Years(n) => date + Months::new(12 * n as u32),
        }
    }
}

fn first_of_next_month(date: NaiveDate) -> NaiveDate {
    let first = date.with_day(1).unwrap_or(date);
    first + Months::new(1)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Weekday;

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    #[test]
    fn test_linear_map_and_invert() {
        let y = LinearScale::new((0.0, 25.0), (350.0, 0.0));
        assert_eq!(y.map(0.0), 350.0);
        assert_eq!(y.map(25.0), 0.0);
        assert_eq!(y.map(12.5), 175.0);
        assert_eq!(y.invert(175.0), 12.5);
        // values above the domain extrapolate off the top
        assert!(y.map(30.0) < 0.0);
    }

    #[test]
    fn test_linear_degenerate_domain() {
        let y = LinearScale::new((0.0, 0.0), (350.0, 0.0));
        assert_eq!(y.map(0.0), 175.0);
        assert_eq!(y.map(5.0), 175.0);
        assert_eq!(y.invert(10.0), 0.0);
    }

    #[test]
    fn test_linear_ticks() {
        let y = LinearScale::new((0.0, 25.0), (350.0, 0.0));
        let ticks = y.ticks(10);
        assert_eq!(ticks.first(), Some(&0.0));
        assert_eq!(ticks.last(), Some(&24.0));
        assert_eq!(ticks.len(), 13);

        let wide = LinearScale::new((0.0, 100.0), (0.0, 1.0));
        assert_eq!(wide.ticks(5), vec![0.0, 20.0, 40.0, 60.0, 80.0, 100.0]);
    }

    #[test]
    fn test_nice_step() {
        assert_eq!(nice_step(0.0, 100.0, 10), 10.0);
        assert_eq!(nice_step(0.0, 25.0, 10), 2.0);
        assert_eq!(nice_step(0.0, 40.0, 10), 5.0);
    }

    #[test]
    fn test_time_map_is_order_preserving() {
        let x = TimeScale::new(
            (midnight(d(2014, 11, 1)), midnight(d(2016, 12, 1))),
            (0.0, 830.0),
        );
        assert_eq!(x.map_date(d(2014, 11, 1)), 0.0);
        assert_eq!(x.map_date(d(2016, 12, 1)), 830.0);

        let mut previous = f64::NEG_INFINITY;
        let mut day = d(2014, 11, 1);
        while day <= d(2016, 12, 1) {
            let px = x.map_date(day);
            assert!(px >= previous);
            previous = px;
            day += TimeDelta::days(9);
        }
    }

    #[test]
    fn test_time_invert_round_trips_to_the_millisecond() {
        let x = TimeScale::new(
            (midnight(d(2014, 11, 1)), midnight(d(2016, 12, 1))),
            (0.0, 830.0),
        );
        let px = x.map_date(d(2014, 12, 15));
        let back = x.invert(px);
        let diff = (back - midnight(d(2014, 12, 15))).num_milliseconds().abs();
        assert!(diff <= 1, "off by {diff} ms");
    }

    #[test]
    fn test_time_ticks_quarterly_over_two_years() {
        let x = TimeScale::new(
            (midnight(d(2014, 11, 1)), midnight(d(2016, 12, 1))),
            (0.0, 830.0),
        );
        let ticks = x.ticks(10);
        assert_eq!(ticks.first(), Some(&d(2015, 1, 1)));
        assert_eq!(ticks.last(), Some(&d(2016, 10, 1)));
        assert!(ticks.iter().all(|t| t.day() == 1 && t.month0() % 3 == 0));
    }

    #[test]
    fn test_time_ticks_monthly_over_one_season() {
        let x = TimeScale::new(
            (midnight(d(2014, 11, 1)), midnight(d(2015, 6, 30))),
            (0.0, 830.0),
        );
        let ticks = x.ticks(10);
        assert_eq!(
            ticks,
            vec![
                d(2014, 11, 1),
                d(2014, 12, 1),
                d(2015, 1, 1),
                d(2015, 2, 1),
                d(2015, 3, 1),
                d(2015, 4, 1),
                d(2015, 5, 1),
                d(2015, 6, 1),
            ]
        );
    }

    #[test]
    fn test_time_ticks_weekly_start_on_sunday() {
        let x = TimeScale::new(
            (midnight(d(2015, 1, 1)), midnight(d(2015, 3, 1))),
            (0.0, 830.0),
        );
        let ticks = x.ticks(10);
        assert!(!ticks.is_empty());
        assert!(ticks.iter().all(|t| t.weekday() == Weekday::Sun));
    }

    #[test]
    fn test_every_other_day_restarts_each_month() {
        let interval = TickInterval::Days(2);
        assert_eq!(interval.next(d(2015, 1, 29)), d(2015, 1, 31));
        assert_eq!(interval.next(d(2015, 1, 31)), d(2015, 2, 1));
        assert_eq!(interval.floor(d(2015, 1, 4)), d(2015, 1, 3));
    }

    #[test]
    fn test_time_ticks_degenerate_domain() {
        let t = midnight(d(2015, 1, 1));
        let x = TimeScale::new((t, t), (0.0, 830.0));
        assert_eq!(x.map(t), 415.0);
        assert_eq!(x.ticks(10), vec![d(2015, 1, 1)]);
    }

    #[test]
    fn test_tick_labels() {
        assert_eq!(tick_label(d(2015, 1, 1)), "2015");
        assert_eq!(tick_label(d(2015, 4, 1)), "April");
        assert_eq!(tick_label(d(2015, 4, 12)), "Apr 12");
    }
}
