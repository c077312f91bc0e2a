// SPDX-License-Identifier: LGPL-3.0-only
//
// This file is provided WITHOUT ANY WARRANTY;
// without even the implied warranty of MERCHANTABILITY
// or FITNESS FOR A PARTICULAR PURPOSE.

//! Field-element codec.
//!
//! Maps typed values, or values sampled from a [`SharedRng`], to the field
//! elements they are encoded as. Nothing here reduces modulo the sharing
//! field; the codec only guarantees the value range a type requires.

use crate::errors::{Result, TypeError};
use crate::rng::{with_rng, SharedRng};
use num_bigint::{BigInt, RandBigInt, Sign};
use num_traits::{One, Zero};
use prio_circuit::FieldElement;

/// Rejects widths below one bit.
pub fn check_width(n_bits: usize) -> Result<()> {
    if n_bits < 1 {
        return Err(TypeError::InvalidWidth { n_bits });
    }
    Ok(())
}

/// Converts `value` to a field element after checking `0 <= value < 2^n_bits`.
///
/// The value is never truncated or clamped.
pub fn to_field_element(n_bits: usize, value: &BigInt) -> Result<FieldElement> {
    check_width(n_bits)?;

    let magnitude = match value.sign() {
        Sign::Minus => {
            return Err(TypeError::NegativeValue {
                value: value.clone(),
            })
        }
        Sign::NoSign | Sign::Plus => value.magnitude(),
    };

    let bits = magnitude.bits();
    if bits > n_bits as u64 {
        return Err(TypeError::ValueTooLarge { bits, n_bits });
    }
    Ok(magnitude.clone())
}

pub fn bool_to_field_element(value: bool) -> FieldElement {
    if value {
        FieldElement::one()
    } else {
        FieldElement::zero()
    }
}

/// Samples uniformly from `[0, bound)`.
pub fn sample_below(rng: &SharedRng, bound: &FieldElement) -> FieldElement {
    with_rng(rng, |rng| rng.gen_biguint_below(bound))
}

/// Samples uniformly from `[0, 2^n_bits)`.
pub fn sample_bits(rng: &SharedRng, n_bits: usize) -> FieldElement {
    with_rng(rng, |rng| rng.gen_biguint(n_bits as u64))
}
