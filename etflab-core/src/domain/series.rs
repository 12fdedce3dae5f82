//! PriceSeries — validated, chronologically ordered history.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::PricePoint;

/// Input-contract violations for a price history.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SeriesError {
    #[error("price series is empty")]
    Empty,

    #[error("price series is not strictly increasing at index {index}: {date} follows {previous}")]
    NotChronological {
        index: usize,
        previous: NaiveDate,
        date: NaiveDate,
    },
}

/// Non-empty sequence of [`PricePoint`]s with strictly increasing dates.
///
/// The only way to build one is [`PriceSeries::new`], so every series seen by the
/// analysis components already satisfies the ordering contract.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Vec<PricePoint>", into = "Vec<PricePoint>")]
pub struct PriceSeries {
    points: Vec<PricePoint>,
}

impl PriceSeries {
    pub fn new(points: Vec<PricePoint>) -> Result<Self, SeriesError> {
        if points.is_empty() {
            return Err(SeriesError::Empty);
        }
        for (index, pair) in points.windows(2).enumerate() {
            if pair[1].date <= pair[0].date {
                return Err(SeriesError::NotChronological {
                    index: index + 1,
                    previous: pair[0].date,
                    date: pair[1].date,
                });
            }
        }
        Ok(Self { points })
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// Always false; kept for API symmetry with slices.
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn points(&self) -> &[PricePoint] {
        &self.points
    }

    /// Most recent session.
    pub fn last(&self) -> &PricePoint {
        &self.points[self.points.len() - 1]
    }

    /// Session before the most recent one, if any.
    pub fn previous(&self) -> Option<&PricePoint> {
        self.points.len().checked_sub(2).map(|i| &self.points[i])
    }

    pub fn closes(&self) -> Vec<f64> {
        self.points.iter().map(|p| p.close).collect()
    }

    pub fn volumes(&self) -> Vec<u64> {
        self.points.iter().map(|p| p.volume).collect()
    }

    /// The most recent `n` sessions (the whole series when it is shorter).
    ///
    /// A window of zero is treated as one session so the result stays non-empty.
    pub fn window(&self, n: usize) -> PriceSeries {
        let n = n.max(1);
        let start = self.points.len().saturating_sub(n);
        PriceSeries {
            points: self.points[start..].to_vec(),
        }
    }

    pub fn first_date(&self) -> NaiveDate {
        self.points[0].date
    }

    pub fn last_date(&self) -> NaiveDate {
        self.last().date
    }
}

impl TryFrom<Vec<PricePoint>> for PriceSeries {
    type Error = SeriesError;

    fn try_from(points: Vec<PricePoint>) -> Result<Self, Self::Error> {
        Self::new(points)
    }
}

impl From<PriceSeries> for Vec<PricePoint> {
    fn from(series: PriceSeries) -> Self {
        series.points
    }
}
