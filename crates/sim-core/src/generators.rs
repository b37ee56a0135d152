//! Generator catalog: the zombie types a player can own.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::ValidationError;

/// Identifier of a generator type. Declaration order is catalog order.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GeneratorId {
    Monkey,
    Giraffe,
    Penguin,
    Elephant,
    Crocodile,
    Gorilla,
    Moose,
    Rhino,
    Narwhal,
    Walrus,
    Zebra,
    Whale,
}

impl GeneratorId {
    /// Every generator id in catalog order.
    pub const ALL: [GeneratorId; 12] = [
        GeneratorId::Monkey,
        GeneratorId::Giraffe,
        GeneratorId::Penguin,
        GeneratorId::Elephant,
        GeneratorId::Crocodile,
        GeneratorId::Gorilla,
        GeneratorId::Moose,
        GeneratorId::Rhino,
        GeneratorId::Narwhal,
        GeneratorId::Walrus,
        GeneratorId::Zebra,
        GeneratorId::Whale,
    ];

    /// Stable snake_case key, matching the serialized form.
    pub fn as_str(self) -> &'static str {
        match self {
            GeneratorId::Monkey => "monkey",
            GeneratorId::Giraffe => "giraffe",
            GeneratorId::Penguin => "penguin",
            GeneratorId::Elephant => "elephant",
            GeneratorId::Crocodile => "crocodile",
            GeneratorId::Gorilla => "gorilla",
            GeneratorId::Moose => "moose",
            GeneratorId::Rhino => "rhino",
            GeneratorId::Narwhal => "narwhal",
            GeneratorId::Walrus => "walrus",
            GeneratorId::Zebra => "zebra",
            GeneratorId::Whale => "whale",
        }
    }

    /// Catalog definition for this id.
    pub fn def(self) -> &'static GeneratorDef {
        &GENERATORS[self as usize]
    }
}

impl fmt::Display for GeneratorId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for GeneratorId {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        GeneratorId::ALL
            .iter()
            .copied()
            .find(|id| id.as_str() == s)
            .ok_or_else(|| ValidationError::UnknownId(s.to_string()))
    }
}

/// Immutable definition of a generator type.
#[derive(Clone, Debug, Serialize)]
pub struct GeneratorDef {
    /// Catalog identifier.
    pub id: GeneratorId,
    /// Display name.
    pub name: &'static str,
    /// Price of the first unit.
    pub base_cost: f64,
    /// Geometric price growth per owned unit (> 1).
    pub cost_growth: f64,
    /// Brains per second produced by one unit before multipliers.
    pub base_prod: f64,
    /// Visitors per second attracted by one unit before multipliers.
    pub attraction: f64,
    /// Machine level required before the type can be bought.
    pub unlock_tier: u32,
}

/// The generator catalog, indexed by `GeneratorId as usize`.
pub static GENERATORS: [GeneratorDef; 12] = [
    GeneratorDef {
        id: GeneratorId::Monkey,
        name: "Monkey",
        base_cost: 10.0,
        cost_growth: 1.15,
        base_prod: 1.0,
        attraction: 0.05,
        unlock_tier: 0,
    },
    GeneratorDef {
        id: GeneratorId::Giraffe,
        name: "Giraffe",
        base_cost: 150.0,
        cost_growth: 1.15,
        base_prod: 8.0,
        attraction: 0.1,
        unlock_tier: 1,
    },
    GeneratorDef {
        id: GeneratorId::Penguin,
        name: "Penguin",
        base_cost: 1_500.0,
        cost_growth: 1.15,
        base_prod: 50.0,
        attraction: 0.2,
        unlock_tier: 2,
    },
    GeneratorDef {
        id: GeneratorId::Elephant,
        name: "Elephant",
        base_cost: 7_500.0,
        cost_growth: 1.15,
        base_prod: 200.0,
        attraction: 0.4,
        unlock_tier: 3,
    },
    GeneratorDef {
        id: GeneratorId::Crocodile,
        name: "Crocodile",
        base_cost: 40_000.0,
        cost_growth: 1.15,
        base_prod: 900.0,
        attraction: 0.6,
        unlock_tier: 4,
    },
    GeneratorDef {
        id: GeneratorId::Gorilla,
        name: "Gorilla",
        base_cost: 200_000.0,
        cost_growth: 1.15,
        base_prod: 4_000.0,
        attraction: 0.8,
        unlock_tier: 5,
    },
    GeneratorDef {
        id: GeneratorId::Moose,
        name: "Moose",
        base_cost: 1_000_000.0,
        cost_growth: 1.15,
        base_prod: 18_000.0,
        attraction: 1.0,
        unlock_tier: 6,
    },
    GeneratorDef {
        id: GeneratorId::Rhino,
        name: "Rhino",
        base_cost: 5_000_000.0,
        cost_growth: 1.15,
        base_prod: 80_000.0,
        attraction: 1.3,
        unlock_tier: 7,
    },
    GeneratorDef {
        id: GeneratorId::Narwhal,
        name: "Narwhal",
        base_cost: 25_000_000.0,
        cost_growth: 1.15,
        base_prod: 350_000.0,
        attraction: 1.6,
        unlock_tier: 8,
    },
    GeneratorDef {
        id: GeneratorId::Walrus,
        name: "Walrus",
        base_cost: 125_000_000.0,
        cost_growth: 1.15,
        base_prod: 1_500_000.0,
        attraction: 2.0,
        unlock_tier: 9,
    },
    GeneratorDef {
        id: GeneratorId::Zebra,
        name: "Zebra",
        base_cost: 600_000_000.0,
        cost_growth: 1.15,
        base_prod: 7_000_000.0,
        attraction: 2.5,
        unlock_tier: 10,
    },
    GeneratorDef {
        id: GeneratorId::Whale,
        name: "Whale",
        base_cost: 3_000_000_000.0,
        cost_growth: 1.15,
        base_prod: 30_000_000.0,
        attraction: 3.0,
        unlock_tier: 11,
    },
];

/// Validate a single generator definition.
pub fn validate_generator(def: &GeneratorDef) -> Result<(), ValidationError> {
    let numbers = [def.base_cost, def.cost_growth, def.base_prod, def.attraction];
    if numbers.iter().any(|v| !v.is_finite()) {
        return Err(ValidationError::NonFinite);
    }
    if def.base_cost <= 0.0 || def.base_prod < 0.0 || def.attraction < 0.0 {
        return Err(ValidationError::NegativeAmount);
    }
    if def.cost_growth <= 1.0 {
        return Err(ValidationError::CostGrowthTooSmall(def.id));
    }
    Ok(())
}
