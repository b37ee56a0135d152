//! Achievement catalog and the per-player progress it is evaluated against.

use serde::{Deserialize, Serialize};

use crate::generators::GeneratorId;
use crate::machine::MAX_MACHINE_LEVEL;
use crate::state::GameState;

/// Cumulative counters that only ever grow.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct PlayerStats {
    pub total_clicks: u64,
    pub total_brains_earned: f64,
    pub total_visitors: u64,
    pub total_generators_bought: u64,
}

/// Unlock progress: `unlocked_ids` is kept in unlock order.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct AchievementState {
    pub unlocked_ids: Vec<AchievementId>,
    pub stats: PlayerStats,
    pub pending_unlock: Option<AchievementId>,
}

impl AchievementState {
    pub fn is_unlocked(&self, id: AchievementId) -> bool {
        self.unlocked_ids.contains(&id)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum AchievementCategory {
    Milestone,
    Collection,
    Activity,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AchievementId {
    FirstBrain,
    ThousandBrains,
    MillionBrains,
    BillionBrains,
    FirstUpgrade,
    MaxMachine,
    FirstZombie,
    TenZombies,
    HundredZombies,
    ThousandZombies,
    MonkeyMaster,
    WhaleOwner,
    OneOfEach,
    FirstClick,
    HundredClicks,
    ThousandClicks,
    FirstVisitor,
    HundredVisitors,
}

/// Unlock predicate over cumulative stats and the current snapshot.
pub type AchievementCheck = fn(&PlayerStats, &GameState) -> bool;

pub struct AchievementDef {
    pub id: AchievementId,
    pub name: &'static str,
    pub description: &'static str,
    pub category: AchievementCategory,
    pub check: AchievementCheck,
}

fn owns_all_types(state: &GameState) -> bool {
    GeneratorId::ALL.iter().all(|&id| state.owned(id) >= 1)
}

/// Catalog in evaluation order. Earlier entries win when several qualify.
pub static ACHIEVEMENTS: [AchievementDef; 18] = [
    AchievementDef {
        id: AchievementId::FirstBrain,
        name: "First Steps",
        description: "Earn your first brain",
        category: AchievementCategory::Milestone,
        check: |stats, _| stats.total_brains_earned >= 1.0,
    },
    AchievementDef {
        id: AchievementId::ThousandBrains,
        name: "Brain Collector",
        description: "Earn 1,000 total brains",
        category: AchievementCategory::Milestone,
        check: |stats, _| stats.total_brains_earned >= 1_000.0,
    },
    AchievementDef {
        id: AchievementId::MillionBrains,
        name: "Brain Millionaire",
        description: "Earn 1,000,000 total brains",
        category: AchievementCategory::Milestone,
        check: |stats, _| stats.total_brains_earned >= 1_000_000.0,
    },
    AchievementDef {
        id: AchievementId::BillionBrains,
        name: "Brain Billionaire",
        description: "Earn 1,000,000,000 total brains",
        category: AchievementCategory::Milestone,
        check: |stats, _| stats.total_brains_earned >= 1_000_000_000.0,
    },
    AchievementDef {
        id: AchievementId::FirstUpgrade,
        name: "Upgrading",
        description: "Upgrade the machine for the first time",
        category: AchievementCategory::Milestone,
        check: |_, state| state.machine_level >= 1,
    },
    AchievementDef {
        id: AchievementId::MaxMachine,
        name: "Fully Upgraded",
        description: "Reach maximum machine level",
        category: AchievementCategory::Milestone,
        check: |_, state| state.machine_level >= MAX_MACHINE_LEVEL,
    },
    AchievementDef {
        id: AchievementId::FirstZombie,
        name: "Zoo Keeper",
        description: "Buy your first zombie",
        category: AchievementCategory::Collection,
        check: |stats, _| stats.total_generators_bought >= 1,
    },
    AchievementDef {
        id: AchievementId::TenZombies,
        name: "Growing Horde",
        description: "Own 10 total zombies",
        category: AchievementCategory::Collection,
        check: |_, state| state.total_owned() >= 10,
    },
    AchievementDef {
        id: AchievementId::HundredZombies,
        name: "Zombie Army",
        description: "Own 100 total zombies",
        category: AchievementCategory::Collection,
        check: |_, state| state.total_owned() >= 100,
    },
    AchievementDef {
        id: AchievementId::ThousandZombies,
        name: "Zombie Empire",
        description: "Own 1,000 total zombies",
        category: AchievementCategory::Collection,
        check: |_, state| state.total_owned() >= 1_000,
    },
    AchievementDef {
        id: AchievementId::MonkeyMaster,
        name: "Monkey Business",
        description: "Own 25 monkeys",
        category: AchievementCategory::Collection,
        check: |_, state| state.owned(GeneratorId::Monkey) >= 25,
    },
    AchievementDef {
        id: AchievementId::WhaleOwner,
        name: "Whale Watcher",
        description: "Own at least 1 whale",
        category: AchievementCategory::Collection,
        check: |_, state| state.owned(GeneratorId::Whale) >= 1,
    },
    AchievementDef {
        id: AchievementId::OneOfEach,
        name: "Diversified",
        description: "Own at least 1 of each zombie type",
        category: AchievementCategory::Collection,
        check: |_, state| owns_all_types(state),
    },
    AchievementDef {
        id: AchievementId::FirstClick,
        name: "Click!",
        description: "Click the brain for the first time",
        category: AchievementCategory::Activity,
        check: |stats, _| stats.total_clicks >= 1,
    },
    AchievementDef {
        id: AchievementId::HundredClicks,
        name: "Clicker",
        description: "Click 100 times",
        category: AchievementCategory::Activity,
        check: |stats, _| stats.total_clicks >= 100,
    },
    AchievementDef {
        id: AchievementId::ThousandClicks,
        name: "Click Master",
        description: "Click 1,000 times",
        category: AchievementCategory::Activity,
        check: |stats, _| stats.total_clicks >= 1_000,
    },
    AchievementDef {
        id: AchievementId::FirstVisitor,
        name: "Grand Opening",
        description: "Attract your first visitor",
        category: AchievementCategory::Activity,
        check: |stats, _| stats.total_visitors >= 1,
    },
    AchievementDef {
        id: AchievementId::HundredVisitors,
        name: "Tourist Trap",
        description: "Attract 100 visitors",
        category: AchievementCategory::Activity,
        check: |stats, _| stats.total_visitors >= 100,
    },
];

pub fn achievement_def(id: AchievementId) -> Option<&'static AchievementDef> {
    ACHIEVEMENTS.iter().find(|a| a.id == id)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::initial_state;
    use chrono::DateTime;
    use std::collections::BTreeSet;

    #[test]
    fn every_id_has_exactly_one_definition() {
        let ids: BTreeSet<_> = ACHIEVEMENTS.iter().map(|a| a.id).collect();
        assert_eq!(ids.len(), ACHIEVEMENTS.len());
        assert_eq!(
            achievement_def(AchievementId::OneOfEach).unwrap().name,
            "Diversified"
        );
    }

    #[test]
    fn predicates_read_stats_and_state() {
        let mut state = initial_state(DateTime::from_timestamp(0, 0).unwrap());
        let stats = PlayerStats {
            total_clicks: 100,
            ..PlayerStats::default()
        };
        let hundred_clicks = achievement_def(AchievementId::HundredClicks).unwrap();
        assert!((hundred_clicks.check)(&stats, &state));

        let diversified = achievement_def(AchievementId::OneOfEach).unwrap();
        assert!(!(diversified.check)(&stats, &state));
        for g in state.generators.values_mut() {
            g.owned = 1;
        }
        assert!((diversified.check)(&stats, &state));
    }
}
