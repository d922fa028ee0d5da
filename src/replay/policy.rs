//! Game ordering within a match
//!
//! Match results only record how many games each side won, not the order the
//! games were played in. The replay needs an order to feed the skill model, so
//! it comes from a named policy.

use crate::types::Side;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WinOrder {
    /// Every team1 win first, then every team2 win
    #[default]
    TeamOneFirst,
    /// team1, team2, team1, ... until one side runs out, then the rest
    Alternating,
}

impl WinOrder {
    /// Winner of each game, in the order the games are rated
    pub fn sequence(self, team1_wins: u32, team2_wins: u32) -> Vec<Side> {
        let total = (team1_wins as usize).saturating_add(team2_wins as usize);
        let mut games = Vec::with_capacity(total);

        match self {
            WinOrder::TeamOneFirst => {
                games.extend(std::iter::repeat(Side::TeamOne).take(team1_wins as usize));
                games.extend(std::iter::repeat(Side::TeamTwo).take(team2_wins as usize));
            }
            WinOrder::Alternating => {
                let (mut left1, mut left2) = (team1_wins, team2_wins);
                while left1 > 0 || left2 > 0 {
                    if left1 > 0 {
                        games.push(Side::TeamOne);
                        left1 -= 1;
                    }
                    if left2 > 0 {
                        games.push(Side::TeamTwo);
                        left2 -= 1;
                    }
                }
            }
        }

        games
    }
}

impl std::fmt::Display for WinOrder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            WinOrder::TeamOneFirst => write!(f, "team_one_first"),
            WinOrder::Alternating => write!(f, "alternating"),
        }
    }
}

impl FromStr for WinOrder {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "team_one_first" => Ok(WinOrder::TeamOneFirst),
            "alternating" => Ok(WinOrder::Alternating),
            other => Err(format!("unknown win order: {}", other)),
        }
    }
}
