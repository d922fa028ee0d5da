//! Bot padding for short-handed teams
//!
//! Teams that played with fewer than the nominal number of humans are assumed
//! to have filled the empty seats with bots. Bots take part in the rating
//! update as low-skill participants, but their ratings are thrown away.

use crate::config::replay::ReplaySettings;
use crate::types::SkillRating;
use tracing::{debug, warn};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BotPadding {
    team_size: usize,
    bot_rating: SkillRating,
}

impl BotPadding {
    pub fn new(team_size: usize, bot_rating: SkillRating) -> Self {
        Self {
            team_size,
            bot_rating,
        }
    }

    pub fn from_settings(settings: &ReplaySettings) -> Self {
        Self::new(settings.team_size, settings.bot_rating())
    }

    pub fn team_size(&self) -> usize {
        self.team_size
    }

    pub fn bot_rating(&self) -> SkillRating {
        self.bot_rating
    }

    /// Append bots until `ratings` holds a full team. Returns the number added.
    pub fn pad(&self, team: &str, ratings: &mut Vec<SkillRating>) -> usize {
        let humans = ratings.len();
        if humans > self.team_size {
            warn!(
                "{} has {} players, more than the team size of {}",
                team, humans, self.team_size
            );
            return 0;
        }

        let bots = self.team_size - humans;
        if bots > 0 {
            debug!("found team with <{} players: {}", self.team_size, team);
            ratings.resize(self.team_size, self.bot_rating);
        }
        bots
    }
}

impl Default for BotPadding {
    fn default() -> Self {
        Self::from_settings(&ReplaySettings::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_three_humans_get_two_bots() {
        let padding = BotPadding::default();
        let mut ratings = vec![SkillRating::default(); 3];

        let added = padding.pad("Bees", &mut ratings);

        assert_eq!(added, 2);
        assert_eq!(ratings.len(), 5);
        assert_eq!(&ratings[..3], &[SkillRating::default(); 3]);
        assert_eq!(&ratings[3..], &[SkillRating::new(5.0, 2.0); 2]);
    }

    #[test]
    fn test_full_team_untouched() {
        let padding = BotPadding::default();
        let mut ratings = vec![SkillRating::default(); 5];
        assert_eq!(padding.pad("Bees", &mut ratings), 0);
        assert_eq!(ratings, vec![SkillRating::default(); 5]);
    }

    #[test]
    fn test_oversize_team_left_alone() {
        let padding = BotPadding::default();
        let mut ratings = vec![SkillRating::default(); 6];
        assert_eq!(padding.pad("Bees", &mut ratings), 0);
        assert_eq!(ratings.len(), 6);
    }

    #[test]
    fn test_custom_team_size() {
        let padding = BotPadding::new(3, SkillRating::new(1.0, 1.0));
        let mut ratings = vec![SkillRating::default()];
        assert_eq!(padding.pad("Solo", &mut ratings), 2);
        assert_eq!(ratings[2], SkillRating::new(1.0, 1.0));
    }
}
