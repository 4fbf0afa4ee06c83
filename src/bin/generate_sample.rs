use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use chrono::{NaiveDate, TimeDelta};
use serde::Serialize;

/// One output row, matching the viewer's `date,snowlvl` layout.
#[derive(Debug, Serialize)]
struct SnowRecord {
    date: String,
    snowlvl: f64,
}

/// Small deterministic generator (64-bit LCG, high bits only).
struct Lcg(u64);

impl Lcg {
    fn next_unit(&mut self) -> f64 {
        self.0 = self
            .0
            .wrapping_mul(6364136223846793005)
            .wrapping_add(1442695040888963407);
        (self.0 >> 11) as f64 / (1u64 << 53) as f64
    }
}

/// Nov 1 through Jun 30: storms build the pack until Apr 1, then it melts.
fn season(start_year: i32, peak: f64, seed: u64) -> Result<Vec<SnowRecord>> {
    let start = NaiveDate::from_ymd_opt(start_year, 11, 1).context("season start")?;
    let melt_start = NaiveDate::from_ymd_opt(start_year + 1, 4, 1).context("melt start")?;
    let end = NaiveDate::from_ymd_opt(start_year + 1, 6, 30).context("season end")?;

    let storm_chance = 0.35;
    let build_days = (melt_start - start).num_days() as f64;
    let melt_days = (end - melt_start).num_days() as f64;
    let mean_storm = peak / (build_days * storm_chance);

    let mut rng = Lcg(seed);
    let mut swe: f64 = 0.0;
    let mut melt_rate = 0.0;
    let mut rows = Vec::new();
    let mut date = start;

    while date <= end {
        if date < melt_start {
            if rng.next_unit() < storm_chance {
                swe += rng.next_unit() * 2.0 * mean_storm;
            }
        } else {
            if date == melt_start {
                melt_rate = swe / melt_days;
            }
            swe = (swe - melt_rate * (0.5 + rng.next_unit())).max(0.0);
        }

        rows.push(SnowRecord {
            date: date.format("%Y-%m-%d").to_string(),
            snowlvl: (swe * 10.0).round() / 10.0,
        });
        date += TimeDelta::days(1);
    }
    Ok(rows)
}

fn write_season(path: &Path, rows: &[SnowRecord]) -> Result<()> {
    let mut writer = csv::Writer::from_path(path)
        .with_context(|| format!("creating {}", path.display()))?;
    for row in rows {
        writer.serialize(row)?;
    }
    writer.flush()?;
    Ok(())
}

fn main() -> Result<()> {
    // Usage: generate_sample [OUTPUT_DIR]
    let out_dir = std::env::args_os()
        .nth(1)
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from("."));

    let seasons = [
        ("mt_hood_2014-2015_snow.csv", 2014, 28.0, 42),
        ("mt_hood_2016-2017_snow.csv", 2016, 55.0, 7),
    ];

    for (name, start_year, peak, seed) in seasons {
        let rows = season(start_year, peak, seed)?;
        let path = out_dir.join(name);
        write_season(&path, &rows)?;
        println!("Wrote {} days to {}", rows.len(), path.display());
    }
    Ok(())
}
