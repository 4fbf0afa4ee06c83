use std::io;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, anyhow, bail};
use chrono::NaiveDate;
use serde::Deserialize;

use super::model::{Sample, Season, Series};

/// Date format of the `date` column.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

pub const DEFAULT_SEASON_A: &str = "mt_hood_2014-2015_snow.csv";
pub const DEFAULT_SEASON_B: &str = "mt_hood_2016-2017_snow.csv";

// ---------------------------------------------------------------------------
// Where the two seasons come from
// ---------------------------------------------------------------------------

/// Paths of the two season files.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SeasonSources {
    pub a: PathBuf,
    pub b: PathBuf,
}

impl Default for SeasonSources {
    fn default() -> Self {
        Self {
            a: PathBuf::from(DEFAULT_SEASON_A),
            b: PathBuf::from(DEFAULT_SEASON_B),
        }
    }
}

impl SeasonSources {
    /// Build from positional arguments (program name already stripped).
    /// Missing arguments fall back to the default file names.
    pub fn from_args<I, S>(args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<PathBuf>,
    {
        let mut args = args.into_iter().map(Into::into);
        let defaults = Self::default();
        Self {
            a: args.next().unwrap_or(defaults.a),
            b: args.next().unwrap_or(defaults.b),
        }
    }

    pub fn path(&self, season: Season) -> &Path {
        match season {
            Season::A => &self.a,
            Season::B => &self.b,
        }
    }

    pub fn set_path(&mut self, season: Season, path: PathBuf) {
        match season {
            Season::A => self.a = path,
            Season::B => self.b = path,
        }
    }
}

// ---------------------------------------------------------------------------
// Public entry-points
// ---------------------------------------------------------------------------

/// Load both seasons concurrently.  Fails as a whole if either file fails.
pub fn load_seasons(sources: &SeasonSources) -> Result<(Series, Series)> {
    let (a, b) = std::thread::scope(|scope| {
        let a = scope.spawn(|| load_series(&sources.a));
        let b = scope.spawn(|| load_series(&sources.b));
        (join_loader(a), join_loader(b))
    });

    match (a, b) {
        (Ok(a), Ok(b)) => Ok((a, b)),
        (Err(e), Ok(_)) => Err(e.context(format!("loading {}", Season::A))),
        (Ok(_), Err(e)) => Err(e.context(format!("loading {}", Season::B))),
        (Err(ea), Err(eb)) => {
            log::error!("Failed to load {}: {eb:#}", Season::B);
            Err(ea.context(format!("loading {}", Season::A)))
        }
    }
}

fn join_loader(handle: std::thread::ScopedJoinHandle<'_, Result<Series>>) -> Result<Series> {
    handle
        .join()
        .map_err(|_| anyhow!("loader thread panicked"))?
}

/// Load one season from a CSV file with `date` and `snowlvl` columns.
pub fn load_series(path: &Path) -> Result<Series> {
    let file = std::fs::File::open(path)
        .with_context(|| format!("opening {}", path.display()))?;
    let series = read_series(file, series_label(path))
        .with_context(|| format!("reading {}", path.display()))?;

    log::info!(
        "Loaded {} samples from {} ({} .. {})",
        series.len(),
        path.display(),
        series.first_date(),
        series.last_date()
    );
    Ok(series)
}

/// Display label for a season file: its file stem.
pub fn series_label(path: &Path) -> String {
    path.file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

// ---------------------------------------------------------------------------
// CSV parsing
// ---------------------------------------------------------------------------

/// Raw row as it appears in the file; both columns are parsed by hand so
/// that errors can name the offending text.
#[derive(Debug, Deserialize)]
struct SnowRow {
    date: String,
    snowlvl: String,
}

/// CSV layout: header row, then one `date,snowlvl` row per day.
///
/// ```text
/// date,snowlvl
/// 2014-11-01,0
/// 2014-11-02,0.4
/// ```
///
/// Extra columns are ignored.  Every row must parse; a malformed date or
/// value rejects the whole file rather than producing a gap.
pub fn read_series<R: io::Read>(reader: R, label: impl Into<String>) -> Result<Series> {
    let mut reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(reader);

    let mut samples = Vec::new();
    for (row_no, result) in reader.deserialize::<SnowRow>().enumerate() {
        // +2: one for the header, one for 1-based line numbers
        let line = row_no + 2;
        let row = result.with_context(|| format!("CSV line {line}"))?;
        samples.push(parse_row(&row, line)?);
    }

    Series::new(label, samples).map_err(|e| match e.index() {
        // samples map one-to-one onto data rows
        Some(index) => {
            let line = index + 2;
            anyhow::Error::new(e).context(format!("line {line}"))
        }
        None => e.into(),
    })
}

fn parse_row(row: &SnowRow, line: usize) -> Result<Sample> {
    let date = NaiveDate::parse_from_str(&row.date, DATE_FORMAT)
        .with_context(|| format!("line {line}: '{}' is not a YYYY-MM-DD date", row.date))?;

    if row.snowlvl.is_empty() {
        bail!("line {line}: missing snowlvl value");
    }
    let value = row
        .snowlvl
        .parse::<f64>()
        .with_context(|| format!("line {line}: '{}' is not a number", row.snowlvl))?;

    Ok(Sample::new(date, value))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    #[test]
    fn test_read_series_basic() {
        let csv = "date,snowlvl\n2014-11-01,0\n2014-12-01,10\n2015-01-01,25.5\n";
        let series = read_series(csv.as_bytes(), "2014-2015").unwrap();

        assert_eq!(series.label(), "2014-2015");
        assert_eq!(
            series.samples(),
            &[
                Sample::new(d(2014, 11, 1), 0.0),
                Sample::new(d(2014, 12, 1), 10.0),
                Sample::new(d(2015, 1, 1), 25.5),
            ]
        );
    }

    #[test]
    fn test_read_series_trims_and_ignores_extra_columns() {
        let csv = "date, snowlvl, station\n 2016-11-01 , 5 ,MHM\n2016-12-01,15,MHM\n";
        let series = read_series(csv.as_bytes(), "b").unwrap();
        assert_eq!(series.len(), 2);
        assert_eq!(series.max_value(), 15.0);
    }

    #[test]
    fn test_read_series_rejects_bad_date() {
        let csv = "date,snowlvl\n2014-11-01,0\n11/02/2014,1\n";
        let err = read_series(csv.as_bytes(), "a").unwrap_err();
        let msg = format!("{err:#}");
        assert!(msg.contains("line 3"), "{msg}");
        assert!(msg.contains("11/02/2014"), "{msg}");
    }

    #[test]
    fn test_read_series_rejects_bad_number() {
        let csv = "date,snowlvl\n2014-11-01,lots\n";
        let err = read_series(csv.as_bytes(), "a").unwrap_err();
        assert!(format!("{err:#}").contains("'lots' is not a number"));
    }

    #[test]
    fn test_read_series_rejects_empty_value() {
        let csv = "date,snowlvl\n2014-11-01,\n";
        let err = read_series(csv.as_bytes(), "a").unwrap_err();
        assert!(format!("{err:#}").contains("missing snowlvl"));
    }

    #[test]
    fn test_read_series_rejects_missing_column() {
        let csv = "date,depth\n2014-11-01,3\n";
        assert!(read_series(csv.as_bytes(), "a").is_err());
    }

    #[test]
    fn test_read_series_rejects_negative_and_unordered() {
        let neg = "date,snowlvl\n2014-11-01,-1\n";
        assert!(read_series(neg.as_bytes(), "a").is_err());

        let unordered = "date,snowlvl\n2014-11-02,1\n2014-11-01,2\n";
        assert!(read_series(unordered.as_bytes(), "a").is_err());
    }

    #[test]
    fn test_series_errors_name_the_csv_line() {
        let csv = "date,snowlvl\n2014-11-01,1\n2014-11-03,2\n2014-11-02,3\n";
        let msg = format!("{:#}", read_series(csv.as_bytes(), "a").unwrap_err());
        assert!(msg.starts_with("line 4:"), "{msg}");
        assert!(msg.contains("2014-11-02 does not follow 2014-11-03"), "{msg}");

        let csv = "date,snowlvl\n2014-11-01,1\n2014-11-02,-3\n";
        let msg = format!("{:#}", read_series(csv.as_bytes(), "a").unwrap_err());
        assert!(msg.starts_with("line 3:"), "{msg}");
    }

    #[test]
    fn test_read_series_rejects_header_only() {
        let csv = "date,snowlvl\n";
        let err = read_series(csv.as_bytes(), "a").unwrap_err();
        assert!(format!("{err:#}").contains("no samples"));
    }

    #[test]
    fn test_load_seasons_fails_when_files_are_missing() {
        let sources = SeasonSources {
            a: PathBuf::from("definitely/not/here_a.csv"),
            b: PathBuf::from("definitely/not/here_b.csv"),
        };
        let err = load_seasons(&sources).unwrap_err();
        assert!(format!("{err:#}").contains("here_a.csv"));
    }

    #[test]
    fn test_load_seasons_fails_when_only_season_b_is_missing() {
        let a = std::env::temp_dir().join(format!("snow_season_a_{}.csv", std::process::id()));
        std::fs::write(&a, "date,snowlvl\n2014-11-01,0\n2014-12-01,10\n").unwrap();
        let sources = SeasonSources {
            a: a.clone(),
            b: PathBuf::from("definitely/not/here_b.csv"),
        };

        assert!(load_series(&a).is_ok());
        let err = load_seasons(&sources).unwrap_err();
        let msg = format!("{err:#}");
        assert!(msg.contains("season B"), "{msg}");
        assert!(msg.contains("here_b.csv"), "{msg}");

        std::fs::remove_file(&a).unwrap();
    }

    #[test]
    fn test_sources_from_args() {
        let sources = SeasonSources::from_args(["first.csv"]);
        assert_eq!(sources.a, PathBuf::from("first.csv"));
        assert_eq!(sources.b, PathBuf::from(DEFAULT_SEASON_B));

        let sources = SeasonSources::from_args(Vec::<String>::new());
        assert_eq!(sources, SeasonSources::default());
    }

    #[test]
    fn test_series_label_is_file_stem() {
        assert_eq!(
            series_label(Path::new("data/mt_hood_2014-2015_snow.csv")),
            "mt_hood_2014-2015_snow"
        );
    }
}
