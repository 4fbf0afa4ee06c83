use std::fmt;

use chrono::NaiveDate;
use thiserror::Error;

// ---------------------------------------------------------------------------
// Sample – one dated observation
// ---------------------------------------------------------------------------

/// A single snow-water equivalent reading (inches) on a calendar day.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Sample {
    pub date: NaiveDate,
    pub value: f64,
}

impl Sample {
    pub fn new(date: NaiveDate, value: f64) -> Self {
        Sample { date, value }
    }
}

impl fmt::Display for Sample {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} = {:.1} in", self.date.format("%Y-%m-%d"), self.value)
    }
}

// ---------------------------------------------------------------------------
// Season – which of the two series a sample belongs to
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Season {
    A,
    B,
}

impl Season {
    pub const ALL: [Season; 2] = [Season::A, Season::B];

    pub fn index(self) -> usize {
        match self {
            Season::A => 0,
            Season::B => 1,
        }
    }
}

impl fmt::Display for Season {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Season::A => write!(f, "season A"),
            Season::B => write!(f, "season B"),
        }
    }
}

// ---------------------------------------------------------------------------
// Series – validated, chronologically ordered samples
// ---------------------------------------------------------------------------

#[derive(Debug, Error, PartialEq)]
pub enum SeriesError {
    #[error("series '{label}' has no samples")]
    Empty { label: String },

    #[error("series '{label}', sample {index}: value {value} is not a finite number")]
    NonFinite {
        label: String,
        index: usize,
        value: f64,
    },

    #[error("series '{label}', sample {index}: value {value} is negative")]
    Negative {
        label: String,
        index: usize,
        value: f64,
    },

    #[error("series '{label}', sample {index}: date {date} does not follow {previous}")]
    NotIncreasing {
        label: String,
        index: usize,
        date: NaiveDate,
        previous: NaiveDate,
    },
}

impl SeriesError {
    /// Position of the offending sample, when the error concerns one.
    pub fn index(&self) -> Option<usize> {
        match self {
            SeriesError::Empty { .. } => None,
            SeriesError::NonFinite { index, .. }
            | SeriesError::Negative { index, .. }
            | SeriesError::NotIncreasing { index, .. } => Some(*index),
        }
    }
}

/// One season of samples.
///
/// Construction enforces the invariants every consumer relies on:
/// * at least one sample
/// * every value finite and `>= 0`
/// * dates strictly increasing (no duplicates)
#[derive(Debug, Clone, PartialEq)]
pub struct Series {
    label: String,
    samples: Vec<Sample>,
}

impl Series {
    pub fn new(label: impl Into<String>, samples: Vec<Sample>) -> Result<Self, SeriesError> {
        let label = label.into();
        if samples.is_empty() {
            return Err(SeriesError::Empty { label });
        }

        for (index, sample) in samples.iter().enumerate() {
            if !sample.value.is_finite() {
                return Err(SeriesError::NonFinite {
                    label,
                    index,
                    value: sample.value,
                });
            }
            if sample.value < 0.0 {
                return Err(SeriesError::Negative {
                    label,
                    index,
                    value: sample.value,
                });
            }
            if index > 0 {
                let previous = samples[index - 1].date;
                if sample.date <= previous {
                    return Err(SeriesError::NotIncreasing {
                        label,
                        index,
                        date: sample.date,
                        previous,
                    });
                }
            }
        }

        Ok(Series { label, samples })
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn samples(&self) -> &[Sample] {
        &self.samples
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn first_date(&self) -> NaiveDate {
        self.samples[0].date
    }

    pub fn last_date(&self) -> NaiveDate {
        self.samples[self.samples.len() - 1].date
    }

    pub fn max_value(&self) -> f64 {
        self.samples
            .iter()
            .map(|s| s.value)
            .fold(0.0, f64::max)
    }
}
