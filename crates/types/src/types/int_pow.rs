// SPDX-License-Identifier: LGPL-3.0-only
//
// This file is provided WITHOUT ANY WARRANTY;
// without even the implied warranty of MERCHANTABILITY
// or FITNESS FOR A PARTICULAR PURPOSE.

//! Bounded integers annotated with their successive squares.
//!
//! A value `v` of width `n` is encoded as `[v, v^2, v^4, ...]` up to the
//! configured power. The circuit proves, without learning `v`, that:
//!
//! 1. the first slot is a well-formed `n`-bit integer (bit-range node),
//! 2. every power slot is the square of the slot before it (mul-checks).
//!
//! All power slots carry the same `"{name}-pow"` tag and are told apart by
//! position only; the mul-checks reference them by wire, never by tag.

use crate::codec::{check_width, sample_bits, to_field_element};
use crate::errors::{Result, TypeError};
use crate::rng::SharedRng;
use crate::value_type::{EncodeValue, ValueType};
use num_bigint::BigInt;
use prio_circuit::{Circuit, CircuitBuilder, FieldElement, NodeId};
use std::fmt;
use std::iter;
use tracing::trace;

/// Highest power carried alongside the base value.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Power {
    Two,
    Four,
    Eight,
}

pub const ALLOWED_POWERS: [Power; 3] = [Power::Two, Power::Four, Power::Eight];

impl Power {
    /// `log2` of the power: the number of squarings.
    pub fn steps(self) -> usize {
        match self {
            Power::Two => 1,
            Power::Four => 2,
            Power::Eight => 3,
        }
    }

    pub fn value(self) -> u32 {
        1 << self.steps()
    }
}

impl TryFrom<u32> for Power {
    type Error = TypeError;

    fn try_from(pow: u32) -> Result<Self> {
        match pow {
            2 => Ok(Power::Two),
            4 => Ok(Power::Four),
            8 => Ok(Power::Eight),
            _ => Err(TypeError::UnsupportedPower { pow }),
        }
    }
}

impl fmt::Display for Power {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.value())
    }
}

/// Repeatedly squares `value`, returning `steps(pow)` elements:
/// `v^2, v^4, ...`.
pub fn compute_powers(pow: Power, value: &FieldElement) -> Vec<FieldElement> {
    let mut out: Vec<FieldElement> = Vec::with_capacity(pow.steps());
    for _ in 0..pow.steps() {
        let square = match out.last() {
            Some(prev) => prev * prev,
            None => value * value,
        };
        out.push(square);
    }
    out
}

/// Encodes `value` followed by its powers. `pow` is checked first.
pub fn encode(n_bits: usize, pow: u32, value: &BigInt) -> Result<Vec<FieldElement>> {
    IntPowType::new(n_bits, pow)?.encode(value)
}

pub fn encode_random(n_bits: usize, pow: u32, rng: &SharedRng) -> Result<Vec<FieldElement>> {
    Ok(IntPowType::new(n_bits, pow)?.encode_random(rng))
}

pub fn build_circuit(name: &str, n_bits: usize, pow: u32) -> Result<Circuit> {
    IntPowType::new(n_bits, pow)?.build_circuit(name)
}

/// Power-annotated integer with a validated width and power.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct IntPowType {
    n_bits: usize,
    pow: Power,
}

impl IntPowType {
    pub fn new(n_bits: usize, pow: u32) -> Result<Self> {
        let pow = Power::try_from(pow)?;
        check_width(n_bits)?;
        Ok(Self { n_bits, pow })
    }

    pub fn n_bits(&self) -> usize {
        self.n_bits
    }

    pub fn pow(&self) -> Power {
        self.pow
    }

    fn encode_element(&self, value: FieldElement) -> Vec<FieldElement> {
        let powers = compute_powers(self.pow, &value);
        iter::once(value).chain(powers).collect()
    }
}

impl ValueType for IntPowType {
    fn name(&self) -> &'static str {
        "int_pow"
    }

    fn encoded_len(&self) -> usize {
        1 + self.pow.steps()
    }

    fn encode_random(&self, rng: &SharedRng) -> Vec<FieldElement> {
        self.encode_element(sample_bits(rng, self.n_bits))
    }

    fn append_circuit(&self, builder: &mut CircuitBuilder, name: &str) -> Result<NodeId> {
        let int_node = builder.bit_range(name, self.n_bits)?;
        let the_int = builder.outputs(int_node)?[0];

        let steps = self.pow.steps();
        let pow_nodes: Vec<NodeId> = (0..steps)
            .map(|_| builder.unchecked_input(format!("{name}-pow")))
            .collect();

        let mut checks = Vec::with_capacity(steps);
        let mut base = the_int;
        for node in &pow_nodes {
            let square = builder.outputs(*node)?[0];
            checks.push(builder.check_mul(base, base, square)?);
            base = square;
        }

        trace!(name, n_bits = self.n_bits, pow = %self.pow, "appended power chain");
        Ok(builder.and(iter::once(int_node).chain(pow_nodes).chain(checks))?)
    }
}

impl EncodeValue for IntPowType {
    type Value = BigInt;

    fn encode(&self, value: &BigInt) -> Result<Vec<FieldElement>> {
        let value = to_field_element(self.n_bits, value)?;
        Ok(self.encode_element(value))
    }
}
