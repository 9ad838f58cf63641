//! Confidence scoring for field candidates.
//!
//! | rule                                         | points |
//! |----------------------------------------------|--------|
//! | base                                         | +0.50  |
//! | label found in the mapping table             | +0.30  |
//! | value is a dollar amount                     | +0.10  |
//! | else value is an `MM/DD/YYYY`-style date     | +0.10  |
//! | else value is a plain number                 | +0.05  |
//! | else value is an uppercase code              | +0.05  |
//! | value shorter than 2 characters              | -0.20  |
//! | else value longer than 100 characters        | -0.10  |
//!
//! The result is clamped to `[0.0, 1.0]`. Downstream consumers treat 0.8
//! as the high-confidence cutoff, so these weights are part of the output
//! contract.
//!
//! A label that misses the table but normalizes to one of its targets
//! gets no mapping bonus.

use crate::value::ValueShape;

use super::rules::char_len;

pub const BASE_SCORE: f32 = 0.5;
pub const MAPPING_HIT_BONUS: f32 = 0.3;
pub const SHORT_VALUE_PENALTY: f32 = 0.2;
pub const LONG_VALUE_PENALTY: f32 = 0.1;

/// Score bonus for a value shape.
pub fn shape_bonus(shape: ValueShape) -> f32 {
    match shape {
        ValueShape::Currency | ValueShape::Date => 0.1,
        ValueShape::Number | ValueShape::Code => 0.05,
        ValueShape::Text => 0.0,
    }
}

/// Score a candidate from its value and whether its label hit the mapping table.
pub fn score(value: &str, shape: ValueShape, mapping_hit: bool) -> f32 {
    let mut confidence = BASE_SCORE;

    if mapping_hit {
        confidence += MAPPING_HIT_BONUS;
    }

    confidence += shape_bonus(shape);

    let len = char_len(value);
    if len < 2 {
        confidence -= SHORT_VALUE_PENALTY;
    } else if len > 100 {
        confidence -= LONG_VALUE_PENALTY;
    }

    confidence.clamp(0.0, 1.0)
}
