//! Feature vector construction and amount scaling
//!
//! The model consumes a fixed-width vector built from a window of raw
//! amounts; its output lives in the same log scale the inputs were
//! normalized into, so the scale constant must be applied symmetrically on
//! the way in and the way out.

use crate::error::{Error, Result};

/// Number of inputs the regression model takes
pub const FEATURE_LEN: usize = 10;

/// Day-of-week index baked into the cyclical encoding. The shipped model
/// was trained with this fixed index rather than the request date's real
/// weekday, so it must stay fixed to match the artifact.
const ENCODED_DAY_INDEX: f64 = 2.0;

const DAYS_PER_WEEK: f64 = 7.0;

/// Single-category placeholder the model was trained with
const CATEGORY_ENCODED: f32 = 1.0;

/// Weekend flag placeholder, always off
const WEEKEND_FLAG: f32 = 0.0;

/// Constant the model expects in its final input slot
const TRAILING_CONSTANT: f32 = 10.0;

/// Ordered inputs for one model invocation
///
/// Layout, in order: lag1, lag2, category encoding, day-of-week sine and
/// cosine, weekend flag, smoothed log amount, 7-day rolling log average,
/// 30-day rolling log average, trailing constant. Fixed length; the
/// ordering is part of the artifact contract.
#[derive(Debug, Clone, PartialEq)]
pub struct FeatureVector {
    values: [f32; FEATURE_LEN],
}

impl FeatureVector {
    pub fn as_slice(&self) -> &[f32] {
        &self.values
    }

    pub fn to_vec(&self) -> Vec<f32> {
        self.values.to_vec()
    }

    /// Raw amount one position before the current point (zero when the
    /// window was too short)
    pub fn lag1(&self) -> f32 {
        self.values[0]
    }

    /// Raw amount two positions before the current point
    pub fn lag2(&self) -> f32 {
        self.values[1]
    }

    /// Log-scaled current amount (shared by the smoothed and rolling
    /// average slots)
    pub fn log_amount(&self) -> f32 {
        self.values[6]
    }
}

/// Builds model inputs from a window of raw expense amounts
///
/// The scale comes from the artifact metadata and ties feature
/// construction to the normalization the model was trained against.
#[derive(Debug, Clone)]
pub struct FeatureBuilder {
    scale: f64,
}

impl FeatureBuilder {
    pub fn new(scale: f64) -> Self {
        Self { scale }
    }

    pub fn scale(&self) -> f64 {
        self.scale
    }

    /// Scale an amount into the model's log space: ln(1 + amount / scale)
    pub fn log_amount(&self, amount: f64) -> f64 {
        (amount / self.scale).ln_1p()
    }

    /// Recover a raw amount from the model's log-space output:
    /// expm1(predicted) * scale. Exact inverse of [`Self::log_amount`].
    pub fn denormalize(&self, predicted_log: f64) -> f64 {
        predicted_log.exp_m1() * self.scale
    }

    /// Build the feature vector for the last point of `amounts`, which
    /// must be ordered ascending by date. Lags are zero-filled when the
    /// window holds fewer than three points; an empty window is an error.
    pub fn build(&self, amounts: &[f64]) -> Result<FeatureVector> {
        let last = *amounts.last().ok_or(Error::InsufficientHistory)?;
        let n = amounts.len();
        let lag1 = if n >= 2 { amounts[n - 2] } else { 0.0 };
        let lag2 = if n >= 3 { amounts[n - 3] } else { 0.0 };

        let log_amount = self.log_amount(last) as f32;
        let day_angle = 2.0 * std::f64::consts::PI * ENCODED_DAY_INDEX / DAYS_PER_WEEK;

        // The smoothed and both rolling-average slots all carry the
        // current log amount; the artifact was trained on vectors built
        // this way, with no true rolling window.
        let values = [
            lag1 as f32,
            lag2 as f32,
            CATEGORY_ENCODED,
            day_angle.sin() as f32,
            day_angle.cos() as f32,
            WEEKEND_FLAG,
            log_amount,
            log_amount,
            log_amount,
            TRAILING_CONSTANT,
        ];

        Ok(FeatureVector { values })
    }
}
