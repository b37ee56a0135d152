//! Synergies: standing bonuses for owning combinations of generator types.

use serde::Serialize;

use crate::generators::GeneratorId;

/// Which derived rate a synergy or boost multiplies.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SynergyBonus {
    Production,
    Visitors,
    Global,
}

/// Minimum owned count of one generator type.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct Requirement {
    pub generator: GeneratorId,
    pub min_count: u64,
}

const fn req(generator: GeneratorId, min_count: u64) -> Requirement {
    Requirement { generator, min_count }
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct SynergyDef {
    pub id: &'static str,
    pub name: &'static str,
    pub description: &'static str,
    pub requires: &'static [Requirement],
    pub bonus: SynergyBonus,
    pub multiplier: f64,
}

const EVERY_TYPE: [Requirement; 12] = [
    req(GeneratorId::Monkey, 1),
    req(GeneratorId::Giraffe, 1),
    req(GeneratorId::Penguin, 1),
    req(GeneratorId::Elephant, 1),
    req(GeneratorId::Crocodile, 1),
    req(GeneratorId::Gorilla, 1),
    req(GeneratorId::Moose, 1),
    req(GeneratorId::Rhino, 1),
    req(GeneratorId::Narwhal, 1),
    req(GeneratorId::Walrus, 1),
    req(GeneratorId::Zebra, 1),
    req(GeneratorId::Whale, 1),
];

pub static SYNERGIES: [SynergyDef; 6] = [
    SynergyDef {
        id: "primate_troop",
        name: "Primate Troop",
        description: "Monkeys and gorillas work the machine together",
        requires: &[req(GeneratorId::Monkey, 5), req(GeneratorId::Gorilla, 5)],
        bonus: SynergyBonus::Production,
        multiplier: 1.25,
    },
    SynergyDef {
        id: "arctic_exhibit",
        name: "Arctic Exhibit",
        description: "Penguins, narwhals, and walruses thrive together",
        requires: &[
            req(GeneratorId::Penguin, 3),
            req(GeneratorId::Narwhal, 1),
            req(GeneratorId::Walrus, 1),
        ],
        bonus: SynergyBonus::Visitors,
        multiplier: 1.5,
    },
    SynergyDef {
        id: "safari_zone",
        name: "Safari Zone",
        description: "African animals draw crowds",
        requires: &[
            req(GeneratorId::Elephant, 3),
            req(GeneratorId::Crocodile, 3),
            req(GeneratorId::Zebra, 1),
        ],
        bonus: SynergyBonus::Visitors,
        multiplier: 1.75,
    },
    SynergyDef {
        id: "mighty_beasts",
        name: "Mighty Beasts",
        description: "Large animals produce more brains",
        requires: &[
            req(GeneratorId::Gorilla, 5),
            req(GeneratorId::Rhino, 3),
            req(GeneratorId::Elephant, 5),
        ],
        bonus: SynergyBonus::Production,
        multiplier: 1.5,
    },
    SynergyDef {
        id: "ocean_world",
        name: "Ocean World",
        description: "Marine life spectacle",
        requires: &[
            req(GeneratorId::Narwhal, 3),
            req(GeneratorId::Walrus, 3),
            req(GeneratorId::Whale, 1),
        ],
        bonus: SynergyBonus::Global,
        multiplier: 1.5,
    },
    SynergyDef {
        id: "full_zoo",
        name: "Complete Collection",
        description: "Own every type of zombie",
        requires: &EVERY_TYPE,
        bonus: SynergyBonus::Global,
        multiplier: 2.0,
    },
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn full_zoo_requires_every_type() {
        let full = SYNERGIES.iter().find(|s| s.id == "full_zoo").unwrap();
        assert_eq!(full.requires.len(), GeneratorId::ALL.len());
        for (r, id) in full.requires.iter().zip(GeneratorId::ALL) {
            assert_eq!(r.generator, id);
        }
    }
}
