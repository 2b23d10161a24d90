//! End-of-run rank, judged purely on whole seconds survived

use serde::{Deserialize, Serialize};

/// Rank tiers, lowest to highest
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Rank {
    /// 0-5 s
    Rookie,
    /// 6-10 s
    Bronze,
    /// 11-20 s
    Silver,
    /// 21-30 s
    Gold,
    /// 31-40 s
    Diamond,
    /// 41-60 s
    Champion,
    /// 61-120 s
    Unreal,
    /// Over two minutes
    Suspicious,
}

impl Rank {
    /// Inclusive upper bounds (seconds) of every tier except the last
    const BANDS: [(u32, Rank); 7] = [
        (5, Rank::Rookie),
        (10, Rank::Bronze),
        (20, Rank::Silver),
        (30, Rank::Gold),
        (40, Rank::Diamond),
        (60, Rank::Champion),
        (120, Rank::Unreal),
    ];

    pub fn from_seconds(secs: u32) -> Self {
        Self::BANDS
            .iter()
            .find(|(limit, _)| secs <= *limit)
            .map(|&(_, rank)| rank)
            .unwrap_or(Rank::Suspicious)
    }

    /// Comment shown on the game-over panel
    pub fn comment(&self) -> &'static str {
        match self {
            Rank::Rookie => "Rookie.",
            Rank::Bronze => "Bronze",
            Rank::Silver => "Silver",
            Rank::Gold => "Gold",
            Rank::Diamond => "Diamond",
            Rank::Champion => "Champion",
            Rank::Unreal => "How did you even do that?",
            Rank::Suspicious => "Filthy hacker",
        }
    }
}

/// Final readout recorded when the session ends
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameOverReport {
    /// Floored seconds survived
    pub survival_secs: u32,
    pub rank: Rank,
}
