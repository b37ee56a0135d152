//! Purchase pricing on geometric cost curves.

use sim_core::GeneratorDef;

/// Total price of `qty` more units when `owned` are already held.
///
/// Closed form of `sum(base * g^(owned + i))` for `i in 0..qty`:
/// `base * g^owned * (g^qty - 1) / (g - 1)`. Requires `g > 1`, which the
/// catalog validation guarantees.
pub fn cost_for_quantity(def: &GeneratorDef, owned: u64, qty: u64) -> f64 {
    let g = def.cost_growth;
    let first = def.base_cost * g.powf(owned as f64);
    first * (g.powf(qty as f64) - 1.0) / (g - 1.0)
}

/// Price of exactly one more unit, floored for display and affordability checks.
pub fn next_unit_cost(def: &GeneratorDef, owned: u64) -> f64 {
    (def.base_cost * def.cost_growth.powf(owned as f64)).floor()
}

/// Largest quantity whose total price fits in `budget`.
pub fn max_affordable(def: &GeneratorDef, owned: u64, budget: f64) -> u64 {
    if !(budget.is_finite() && budget > 0.0) {
        return 0;
    }
    let g = def.cost_growth;
    let first = def.base_cost * g.powf(owned as f64);
    // Invert the closed form, then correct for rounding on either side.
    let estimate = (budget * (g - 1.0) / first + 1.0).ln() / g.ln();
    if !estimate.is_finite() || estimate < 0.0 {
        return 0;
    }
    let mut n = estimate.floor() as u64;
    while n > 0 && cost_for_quantity(def, owned, n) > budget {
        n -= 1;
    }
    while cost_for_quantity(def, owned, n + 1) <= budget {
        n += 1;
    }
    n
}
