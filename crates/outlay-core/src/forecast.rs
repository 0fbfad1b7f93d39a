//! Forecast pipeline: expense history in, per-entry predictions out

use chrono::{Duration, NaiveDate};
use tracing::debug;

use crate::error::{Error, Result};
use crate::features::FeatureBuilder;
use crate::inference::{ForecastSession, InferenceBackend};
use crate::models::PredictionRecord;
use crate::range::TimeRange;

/// Read seam to the expense ledger
///
/// Amount sequences come back ascending by date (lag features depend on
/// position), except `latest_amounts` which is newest first. An empty
/// window is an empty vec, not an error; the pipeline decides what empty
/// means.
pub trait ExpenseHistory {
    /// Every parseable amount in the ledger
    fn all_amounts(&self) -> Result<Vec<f64>>;

    /// Amounts within date bounds; a `None` bound leaves that side open
    fn amounts_in_window(
        &self,
        start: Option<NaiveDate>,
        end: Option<NaiveDate>,
    ) -> Result<Vec<f64>>;

    /// The most recent amounts, newest first
    fn latest_amounts(&self, limit: u32) -> Result<Vec<f64>>;
}

/// How the pipeline walks a history window
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ForecastStrategy {
    /// One single-step prediction per point, each fed to the model as a
    /// one-element history. Lags are therefore always zero-filled and
    /// points never inform each other. This matches what the shipped
    /// artifact was tuned against; a window-aware mode would be a new
    /// variant, not a change to this one.
    #[default]
    SingletonStep,
}

/// Runs feature building, prediction, and denormalization over a history
/// window using one loaded session
pub struct Forecaster {
    session: ForecastSession,
    builder: FeatureBuilder,
    strategy: ForecastStrategy,
}

impl Forecaster {
    /// Wrap a loaded session. The feature builder picks up the artifact's
    /// scale so both directions of the normalization agree.
    pub fn new(session: ForecastSession) -> Self {
        let builder = FeatureBuilder::new(session.metadata().scale);
        Self {
            session,
            builder,
            strategy: ForecastStrategy::default(),
        }
    }

    pub fn strategy(&self) -> ForecastStrategy {
        self.strategy
    }

    /// One forecast value per historical amount, in order.
    ///
    /// An empty history is an error; no value is ever fabricated for a
    /// window with nothing in it.
    pub fn forecast_amounts(&self, history: &[f64]) -> Result<Vec<f64>> {
        if history.is_empty() {
            return Err(Error::InsufficientHistory);
        }

        let mut values = Vec::with_capacity(history.len());
        for &amount in history {
            let features = match self.strategy {
                ForecastStrategy::SingletonStep => self.builder.build(&[amount])?,
            };
            let predicted_log = self.session.predict(&features)?;
            values.push(self.builder.denormalize(predicted_log as f64));
        }

        debug!(points = values.len(), "Forecast batch complete");
        Ok(values)
    }

    /// Forecast the window a time range selects, stamping each point with
    /// a date that walks forward one day per point starting at `today`.
    pub fn forecast_range<H: ExpenseHistory>(
        &self,
        history: &H,
        range: TimeRange,
        today: NaiveDate,
    ) -> Result<Vec<PredictionRecord>> {
        let window = range.window(today);
        let amounts = match range {
            TimeRange::AllTime => history.all_amounts()?,
            _ => history.amounts_in_window(window.start, window.end)?,
        };

        let values = self.forecast_amounts(&amounts)?;
        Ok(values
            .into_iter()
            .enumerate()
            .map(|(i, value)| PredictionRecord {
                date: today + Duration::days(i as i64),
                value,
            })
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::inference::DEFAULT_SCALE;

    struct FixedHistory(Vec<f64>);

    impl ExpenseHistory for FixedHistory {
        fn all_amounts(&self) -> Result<Vec<f64>> {
            Ok(self.0.clone())
        }

        fn amounts_in_window(
            &self,
            _start: Option<NaiveDate>,
            _end: Option<NaiveDate>,
        ) -> Result<Vec<f64>> {
            Ok(self.0.clone())
        }

        fn latest_amounts(&self, limit: u32) -> Result<Vec<f64>> {
            Ok(self.0.iter().rev().take(limit as usize).copied().collect())
        }
    }

    fn identity_forecaster() -> Forecaster {
        Forecaster::new(ForecastSession::mock_identity())
    }

    #[test]
    fn test_empty_history_is_rejected() {
        let err = identity_forecaster().forecast_amounts(&[]).unwrap_err();
        assert!(matches!(err, Error::InsufficientHistory));
    }

    #[test]
    fn test_one_prediction_per_point() {
        let values = identity_forecaster()
            .forecast_amounts(&[10.0, 20.0, 30.0])
            .unwrap();
        assert_eq!(values.len(), 3);
    }

    #[test]
    fn test_identity_round_trip_reconstructs_amounts() {
        let values = identity_forecaster()
            .forecast_amounts(&[DEFAULT_SCALE, 50.0, 421.37])
            .unwrap();
        let expected = [DEFAULT_SCALE, 50.0, 421.37];
        for (got, want) in values.iter().zip(expected) {
            // Tolerance covers the f32 cast inside the feature vector
            assert!(
                (got - want).abs() < 1e-3,
                "expected {} got {}",
                want,
                got
            );
        }
    }

    #[test]
    fn test_points_are_independent_under_singleton_strategy() {
        let f = identity_forecaster();
        let alone = f.forecast_amounts(&[75.0]).unwrap()[0];
        let with_neighbors = f.forecast_amounts(&[10.0, 75.0, 300.0]).unwrap()[1];
        assert_eq!(alone, with_neighbors);
    }

    #[test]
    fn test_range_forecast_walks_dates_forward() {
        let history = FixedHistory(vec![10.0, 20.0, 30.0]);
        let today = NaiveDate::from_ymd_opt(2025, 3, 10).unwrap();

        let records = identity_forecaster()
            .forecast_range(&history, TimeRange::ThisWeek, today)
            .unwrap();

        assert_eq!(records.len(), 3);
        assert_eq!(records[0].date, today);
        assert_eq!(records[1].date, today + Duration::days(1));
        assert_eq!(records[2].date, today + Duration::days(2));
    }

    #[test]
    fn test_range_forecast_on_empty_ledger_is_rejected() {
        let history = FixedHistory(vec![]);
        let today = NaiveDate::from_ymd_opt(2025, 3, 10).unwrap();

        let err = identity_forecaster()
            .forecast_range(&history, TimeRange::AllTime, today)
            .unwrap_err();
        assert!(matches!(err, Error::InsufficientHistory));
    }

    #[test]
    fn test_fixed_backend_denormalizes_through_scale() {
        // ln(2) in log space denormalizes to exactly the scale amount
        let forecaster = Forecaster::new(ForecastSession::mock_fixed(
            std::f64::consts::LN_2 as f32,
        ));
        let values = forecaster.forecast_amounts(&[1.0]).unwrap();
        assert!((values[0] - DEFAULT_SCALE).abs() < 1e-3);
    }
}
