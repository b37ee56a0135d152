//! Boost catalog: purchasable, time-limited multipliers.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::ValidationError;

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BoostId {
    BrainSurge,
    GrandOpening,
    ClickFrenzy,
    MegaBoost,
}

impl BoostId {
    pub const ALL: [BoostId; 4] = [
        BoostId::BrainSurge,
        BoostId::GrandOpening,
        BoostId::ClickFrenzy,
        BoostId::MegaBoost,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            BoostId::BrainSurge => "brain_surge",
            BoostId::GrandOpening => "grand_opening",
            BoostId::ClickFrenzy => "click_frenzy",
            BoostId::MegaBoost => "mega_boost",
        }
    }

    pub fn def(self) -> &'static BoostDef {
        &BOOSTS[self as usize]
    }
}

impl fmt::Display for BoostId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for BoostId {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        BoostId::ALL
            .iter()
            .copied()
            .find(|id| id.as_str() == s)
            .ok_or_else(|| ValidationError::UnknownId(s.to_string()))
    }
}

/// What a boost multiplies. `All` is the mega boost and hits every category.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum BoostEffect {
    Production,
    Visitors,
    Clicks,
    All,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct BoostDef {
    pub id: BoostId,
    pub name: &'static str,
    pub description: &'static str,
    /// Price in money.
    pub cost: f64,
    pub duration_secs: u32,
    pub effect: BoostEffect,
    pub multiplier: f64,
}

/// Boost catalog, indexed by `BoostId as usize`.
pub static BOOSTS: [BoostDef; 4] = [
    BoostDef {
        id: BoostId::BrainSurge,
        name: "Brain Surge",
        description: "2x brain production for 60 seconds",
        cost: 100.0,
        duration_secs: 60,
        effect: BoostEffect::Production,
        multiplier: 2.0,
    },
    BoostDef {
        id: BoostId::GrandOpening,
        name: "Grand Opening",
        description: "3x visitor rate for 45 seconds",
        cost: 200.0,
        duration_secs: 45,
        effect: BoostEffect::Visitors,
        multiplier: 3.0,
    },
    BoostDef {
        id: BoostId::ClickFrenzy,
        name: "Click Frenzy",
        description: "5x click power for 30 seconds",
        cost: 75.0,
        duration_secs: 30,
        effect: BoostEffect::Clicks,
        multiplier: 5.0,
    },
    BoostDef {
        id: BoostId::MegaBoost,
        name: "Mega Boost",
        description: "2x everything for 90 seconds",
        cost: 500.0,
        duration_secs: 90,
        effect: BoostEffect::All,
        multiplier: 2.0,
    },
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn catalog_is_indexed_by_id() {
        for id in BoostId::ALL {
            assert_eq!(id.def().id, id);
            assert_eq!(id.as_str().parse::<BoostId>().unwrap(), id);
        }
    }

    #[test]
    fn only_mega_boost_hits_everything() {
        let all: Vec<_> = BOOSTS
            .iter()
            .filter(|b| b.effect == BoostEffect::All)
            .map(|b| b.id)
            .collect();
        assert_eq!(all, vec![BoostId::MegaBoost]);
    }

    #[test]
    fn unknown_boost_name_is_rejected() {
        assert!("turbo".parse::<BoostId>().is_err());
    }
}
