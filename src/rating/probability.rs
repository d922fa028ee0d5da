//! Win-probability estimation between arbitrary team compositions

use crate::error::{LeagueError, Result};
use crate::rating::model::SkillModel;
use crate::types::SkillRating;

/// Probability that `team_one` beats `team_two`.
///
/// `CDF((Σmu1 - Σmu2) / sqrt(n * beta² + Σσ1² + Σσ2²))` where `n` is the total
/// number of participants. Team sizes need not match.
pub fn win_probability(
    team_one: &[SkillRating],
    team_two: &[SkillRating],
    model: &dyn SkillModel,
) -> Result<f64> {
    if team_one.is_empty() {
        return Err(LeagueError::EmptyTeam { side: "team1" });
    }
    if team_two.is_empty() {
        return Err(LeagueError::EmptyTeam { side: "team2" });
    }

    let delta_mu: f64 =
        team_one.iter().map(|r| r.mu).sum::<f64>() - team_two.iter().map(|r| r.mu).sum::<f64>();
    let variance: f64 = team_one
        .iter()
        .chain(team_two.iter())
        .map(|r| r.sigma * r.sigma)
        .sum();
    let size = (team_one.len() + team_two.len()) as f64;
    let beta = model.beta();

    let denominator = (size * beta * beta + variance).sqrt();
    Ok(model.cdf(delta_mu / denominator))
}

/// Probability that five copies of `player_one` beat five copies of `player_two`
pub fn win_probability_single(
    player_one: SkillRating,
    player_two: SkillRating,
    team_size: usize,
    model: &dyn SkillModel,
) -> Result<f64> {
    win_probability(
        &vec![player_one; team_size],
        &vec![player_two; team_size],
        model,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::rating::SkillSettings;
    use crate::rating::trueskill::TrueSkillModel;

    fn model() -> TrueSkillModel {
        TrueSkillModel::new(SkillSettings::default()).unwrap()
    }

    #[test]
    fn test_equal_teams_are_even() {
        let model = model();
        let team = vec![SkillRating::default(); 5];
        let p = win_probability(&team, &team, &model).unwrap();
        assert!((p - 0.5).abs() < 1e-12);
    }

    #[test]
    fn test_stronger_team_favoured() {
        let model = model();
        let strong = vec![SkillRating::new(30.0, 2.0); 5];
        let weak = vec![SkillRating::new(20.0, 2.0); 5];

        let p = win_probability(&strong, &weak, &model).unwrap();
        let q = win_probability(&weak, &strong, &model).unwrap();

        assert!(p > 0.9);
        assert!((p + q - 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_matches_closed_form() {
        let model = model();
        let one = vec![SkillRating::new(27.0, 3.0)];
        let two = vec![SkillRating::new(25.0, 4.0)];

        let beta = 25.0 / 6.0;
        let expected = model.cdf(2.0 / (2.0 * beta * beta + 9.0 + 16.0_f64).sqrt());
        let actual = win_probability(&one, &two, &model).unwrap();
        assert!((actual - expected).abs() < 1e-12);
    }

    #[test]
    fn test_uneven_sizes_allowed() {
        let model = model();
        let one = vec![SkillRating::default(); 5];
        let two = vec![SkillRating::default(); 3];
        let p = win_probability(&one, &two, &model).unwrap();
        // Two extra players of mean skill tilt it towards the bigger side
        assert!(p > 0.5);
    }

    #[test]
    fn test_single_player_expansion() {
        let model = model();
        let p = win_probability_single(
            SkillRating::new(28.0, 3.0),
            SkillRating::new(24.0, 3.0),
            5,
            &model,
        )
        .unwrap();
        assert!(p > 0.5);
    }

    #[test]
    fn test_empty_team_rejected() {
        let model = model();
        let team = vec![SkillRating::default()];
        assert_eq!(
            win_probability(&[], &team, &model),
            Err(LeagueError::EmptyTeam { side: "team1" })
        );
        assert_eq!(
            win_probability(&team, &[], &model),
            Err(LeagueError::EmptyTeam { side: "team2" })
        );
    }
}
