//! Skill model trait and test implementations
//!
//! The replay engine never touches the Bayesian update math directly. It only
//! needs the operations on [`SkillModel`]; the production implementation is
//! [`TrueSkillModel`](crate::rating::trueskill::TrueSkillModel).

use crate::error::Result;
use crate::types::{Side, SkillRating};
use statrs::function::erf::erfc;
use std::f64::consts::SQRT_2;
use std::sync::Mutex;

/// Two-team rating update and win-probability primitives
pub trait SkillModel: Send + Sync {
    /// Fresh rating given to every player at the start of a replay
    fn initial_rating(&self) -> SkillRating;

    /// Rate a single game between two teams.
    ///
    /// # Arguments
    /// * `team_one` - Ratings of the first side, in roster order
    /// * `team_two` - Ratings of the second side, in roster order
    /// * `winner` - Which side won the game
    ///
    /// # Returns
    /// Updated ratings for both sides, in the same order as given
    fn rate(
        &self,
        team_one: &[SkillRating],
        team_two: &[SkillRating],
        winner: Side,
    ) -> Result<(Vec<SkillRating>, Vec<SkillRating>)>;

    /// Standard normal cumulative distribution function
    fn cdf(&self, z: f64) -> f64;

    /// Per-player performance spread used by win-probability estimates
    fn beta(&self) -> f64;

    /// Current parameters as JSON
    fn config(&self) -> serde_json::Value;

    /// True when a rating is exactly the untouched starting rating
    fn is_initial(&self, rating: &SkillRating) -> bool {
        *rating == self.initial_rating()
    }
}

/// Standard normal CDF: 0.5 * erfc(-z / sqrt(2))
pub fn standard_normal_cdf(z: f64) -> f64 {
    0.5 * erfc(-z / SQRT_2)
}

/// One recorded call to [`MockSkillModel::rate`]
#[derive(Debug, Clone, PartialEq)]
pub struct RateCall {
    pub team_one: Vec<SkillRating>,
    pub team_two: Vec<SkillRating>,
    pub winner: Side,
}

/// Mock skill model for testing.
///
/// Each game moves every winner's mu up and every loser's mu down by a fixed
/// step, leaving sigma alone, and records the call.
#[derive(Debug)]
pub struct MockSkillModel {
    calls: Mutex<Vec<RateCall>>,
    initial_rating: SkillRating,
    step: f64,
    beta: f64,
}

impl MockSkillModel {
    pub fn new(step: f64) -> Self {
        Self {
            calls: Mutex::new(Vec::new()),
            initial_rating: SkillRating::default(),
            step,
            beta: 25.0 / 6.0,
        }
    }

    /// Get all rate calls made (for testing)
    pub fn calls(&self) -> Vec<RateCall> {
        self.calls
            .lock()
            .map(|calls| calls.clone())
            .unwrap_or_default()
    }

    /// Winners of each recorded call, in call order
    pub fn winners(&self) -> Vec<Side> {
        self.calls().iter().map(|call| call.winner).collect()
    }

    /// Clear recorded calls
    pub fn clear_calls(&self) {
        if let Ok(mut calls) = self.calls.lock() {
            calls.clear();
        }
    }
}

impl Default for MockSkillModel {
    fn default() -> Self {
        Self::new(1.0)
    }
}

impl SkillModel for MockSkillModel {
    fn initial_rating(&self) -> SkillRating {
        self.initial_rating
    }

    fn rate(
        &self,
        team_one: &[SkillRating],
        team_two: &[SkillRating],
        winner: Side,
    ) -> Result<(Vec<SkillRating>, Vec<SkillRating>)> {
        if let Ok(mut calls) = self.calls.lock() {
            calls.push(RateCall {
                team_one: team_one.to_vec(),
                team_two: team_two.to_vec(),
                winner,
            });
        }

        let shift = |ratings: &[SkillRating], side: Side| -> Vec<SkillRating> {
            let delta = if side == winner { self.step } else { -self.step };
            ratings
                .iter()
                .map(|r| SkillRating::new(r.mu + delta, r.sigma))
                .collect()
        };

        Ok((shift(team_one, Side::TeamOne), shift(team_two, Side::TeamTwo)))
    }

    fn cdf(&self, z: f64) -> f64 {
        standard_normal_cdf(z)
    }

    fn beta(&self) -> f64 {
        self.beta
    }

    fn config(&self) -> serde_json::Value {
        serde_json::json!({
            "type": "mock",
            "step": self.step,
            "initial_mu": self.initial_rating.mu,
            "initial_sigma": self.initial_rating.sigma
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mock_model_shifts_by_step() {
        let model = MockSkillModel::new(2.0);
        let team = vec![SkillRating::new(25.0, 8.0); 2];

        let (one, two) = model.rate(&team, &team, Side::TeamTwo).unwrap();

        assert!(one.iter().all(|r| r.mu == 23.0 && r.sigma == 8.0));
        assert!(two.iter().all(|r| r.mu == 27.0 && r.sigma == 8.0));
    }

    #[test]
    fn test_mock_model_records_calls() {
        let model = MockSkillModel::default();
        let team = vec![SkillRating::default()];

        model.rate(&team, &team, Side::TeamOne).unwrap();
        model.rate(&team, &team, Side::TeamTwo).unwrap();

        assert_eq!(model.winners(), vec![Side::TeamOne, Side::TeamTwo]);
        assert_eq!(model.calls()[0].team_one.len(), 1);

        model.clear_calls();
        assert!(model.calls().is_empty());
    }

    #[test]
    fn test_mock_model_cdf_is_standard_normal() {
        let model = MockSkillModel::default();
        assert!((model.cdf(0.0) - 0.5).abs() < 1e-12);
        assert!(model.cdf(3.0) > 0.99);
    }

    #[test]
    fn test_standard_normal_cdf_symmetry() {
        for z in [0.25, 1.0, 1.96, 2.5] {
            let sum = standard_normal_cdf(z) + standard_normal_cdf(-z);
            assert!((sum - 1.0).abs() < 1e-12);
        }
        assert!((standard_normal_cdf(1.96) - 0.975).abs() < 1e-3);
    }
}
