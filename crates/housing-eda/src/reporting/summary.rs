use crate::stats::Moments;
use serde::Serialize;
use std::fmt;

/// Absolute skewness below this is "not skewed".
pub const SKEW_THRESHOLD: f64 = 0.5;
/// Absolute excess kurtosis below this is "mesokurtic".
pub const KURTOSIS_THRESHOLD: f64 = 1.0;

/// Qualitative asymmetry of a distribution.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SkewShape {
    NotSkewed,
    RightSkewed,
    LeftSkewed,
}

impl SkewShape {
    /// Classify a skewness value.
    ///
    /// The neutral band is open: exactly ±0.5 is already skewed.
    pub fn classify(skewness: f64) -> Self {
        if skewness.abs() < SKEW_THRESHOLD {
            Self::NotSkewed
        } else if skewness > 0.0 {
            Self::RightSkewed
        } else {
            Self::LeftSkewed
        }
    }
}

impl fmt::Display for SkewShape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::NotSkewed => "not skewed",
            Self::RightSkewed => "right skewed",
            Self::LeftSkewed => "left skewed",
        })
    }
}

/// Qualitative tail weight of a distribution.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum TailShape {
    Mesokurtic,
    Leptokurtic,
    Platykurtic,
}

impl TailShape {
    /// Classify an excess kurtosis value.
    ///
    /// Same open neutral band as [`SkewShape::classify`]: exactly ±1.0 is
    /// already lepto-/platykurtic.
    pub fn classify(excess_kurtosis: f64) -> Self {
        if excess_kurtosis.abs() < KURTOSIS_THRESHOLD {
            Self::Mesokurtic
        } else if excess_kurtosis > 0.0 {
            Self::Leptokurtic
        } else {
            Self::Platykurtic
        }
    }
}

impl fmt::Display for TailShape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Mesokurtic => "mesokurtic",
            Self::Leptokurtic => "leptokurtic",
            Self::Platykurtic => "platykurtic",
        })
    }
}

/// Moments of one column with their qualitative reading.
///
/// `Display` renders the three-line text report; `Serialize` backs the
/// JSON output.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MomentsReport {
    pub column: String,
    pub moments: Moments,
    pub skew: SkewShape,
    pub tails: TailShape,
}

impl MomentsReport {
    pub fn new(column: impl Into<String>, moments: Moments) -> Self {
        Self {
            column: column.into(),
            skew: SkewShape::classify(moments.skewness),
            tails: TailShape::classify(moments.excess_kurtosis),
            moments,
        }
    }
}

impl fmt::Display for MomentsReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let m = &self.moments;
        writeln!(f, "For the attribute {}:", self.column)?;
        writeln!(
            f,
            "Mean = {:.2}, Standard Deviation = {:.2}, Skewness = {:.2}, and Excess Kurtosis = {:.2}.",
            m.mean, m.std_dev, m.skewness, m.excess_kurtosis
        )?;
        write!(f, "The data is {} and {}.", self.skew, self.tails)
    }
}
