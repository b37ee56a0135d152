//! Machine upgrades gate which generator types may be bought.

use serde::Serialize;

use crate::generators::GeneratorId;

/// One tier of the brain machine.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct MachineUpgrade {
    /// Level reached after buying this upgrade (1-based).
    pub level: u32,
    /// Price in money.
    pub cost: f64,
    /// Generator type made purchasable at this level.
    pub unlocks: GeneratorId,
    /// Display name.
    pub name: &'static str,
}

/// Highest reachable machine level.
pub const MAX_MACHINE_LEVEL: u32 = 11;

/// Upgrade ladder in level order.
pub static MACHINE_UPGRADES: [MachineUpgrade; MAX_MACHINE_LEVEL as usize] = [
    MachineUpgrade { level: 1, cost: 150.0, unlocks: GeneratorId::Giraffe, name: "Giraffe Habitat" },
    MachineUpgrade { level: 2, cost: 750.0, unlocks: GeneratorId::Penguin, name: "Penguin Enclosure" },
    MachineUpgrade { level: 3, cost: 3_000.0, unlocks: GeneratorId::Elephant, name: "Elephant Sanctuary" },
    MachineUpgrade { level: 4, cost: 15_000.0, unlocks: GeneratorId::Crocodile, name: "Crocodile Swamp" },
    MachineUpgrade { level: 5, cost: 75_000.0, unlocks: GeneratorId::Gorilla, name: "Gorilla Jungle" },
    MachineUpgrade { level: 6, cost: 375_000.0, unlocks: GeneratorId::Moose, name: "Moose Meadow" },
    MachineUpgrade { level: 7, cost: 1_875_000.0, unlocks: GeneratorId::Rhino, name: "Rhino Ranch" },
    MachineUpgrade { level: 8, cost: 9_375_000.0, unlocks: GeneratorId::Narwhal, name: "Narwhal Iceberg" },
    MachineUpgrade { level: 9, cost: 46_875_000.0, unlocks: GeneratorId::Walrus, name: "Walrus Tundra" },
    MachineUpgrade { level: 10, cost: 234_375_000.0, unlocks: GeneratorId::Zebra, name: "Zebra Savanna" },
    MachineUpgrade { level: 11, cost: 1_171_875_000.0, unlocks: GeneratorId::Whale, name: "Whale Ocean" },
];

/// The upgrade that follows `current_level`, or `None` when maxed.
pub fn get_next_upgrade(current_level: u32) -> Option<&'static MachineUpgrade> {
    MACHINE_UPGRADES.iter().find(|u| u.level == current_level.saturating_add(1))
}

/// Whether `id` may be bought at `machine_level`.
pub fn is_generator_unlocked(id: GeneratorId, machine_level: u32) -> bool {
    machine_level >= id.def().unlock_tier
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_upgrade_unlocks_giraffe() {
        let up = get_next_upgrade(0).unwrap();
        assert_eq!(up.level, 1);
        assert_eq!(up.unlocks, GeneratorId::Giraffe);
        assert_eq!(get_next_upgrade(1).unwrap().unlocks, GeneratorId::Penguin);
    }

    #[test]
    fn no_upgrade_past_max() {
        assert!(get_next_upgrade(MAX_MACHINE_LEVEL).is_none());
        assert!(get_next_upgrade(MAX_MACHINE_LEVEL + 5).is_none());
    }

    #[test]
    fn monkey_is_always_unlocked() {
        assert!(is_generator_unlocked(GeneratorId::Monkey, 0));
        assert!(!is_generator_unlocked(GeneratorId::Giraffe, 0));
        assert!(is_generator_unlocked(GeneratorId::Giraffe, 1));
        assert!(!is_generator_unlocked(GeneratorId::Penguin, 1));
    }

    #[test]
    fn max_level_unlocks_everything() {
        for id in GeneratorId::ALL {
            assert!(is_generator_unlocked(id, MAX_MACHINE_LEVEL), "{id} locked at max");
        }
    }

    #[test]
    fn upgrade_unlocks_match_generator_tiers() {
        for up in &MACHINE_UPGRADES {
            assert_eq!(up.unlocks.def().unlock_tier, up.level);
        }
    }
}
