use serde::{Deserialize, Serialize};

use crate::{Outcome, UserId};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Participant {
    pub id: UserId,
    pub display_name: String,
    #[serde(default)]
    pub bot: bool,
}

impl Participant {
    pub fn mention(&self) -> String {
        format!("<@{}>", self.id)
    }
}

/// Per-user counters as stored in the stats file.
///
/// Draws count towards `played` only, so `won + lost <= played`.
/// The Dutch aliases keep files written by the first version of the bot readable.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatsRecord {
    #[serde(alias = "gespeeld")]
    pub played: u32,
    #[serde(alias = "gewonnen")]
    pub won: u32,
    #[serde(alias = "verloren")]
    pub lost: u32,
}

impl StatsRecord {
    pub fn apply(&mut self, outcome: Outcome) {
        self.played += 1;
        match outcome {
            Outcome::Win => self.won += 1,
            Outcome::Loss => self.lost += 1,
            Outcome::Draw => {}
        }
    }
}
