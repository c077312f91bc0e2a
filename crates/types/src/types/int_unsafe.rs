// SPDX-License-Identifier: LGPL-3.0-only
//
// This file is provided WITHOUT ANY WARRANTY;
// without even the implied warranty of MERCHANTABILITY
// or FITNESS FOR A PARTICULAR PURPOSE.

//! Bounded unsigned integers passed through as a single field element.
//!
//! The encoder checks `0 <= v < 2^n_bits` on the client; the circuit does not
//! re-verify the width. Range proofs live in the bit-range node used by
//! [`IntPowType`](crate::IntPowType).

use crate::codec::{check_width, sample_bits, to_field_element};
use crate::errors::Result;
use crate::rng::SharedRng;
use crate::value_type::{EncodeValue, ValueType};
use num_bigint::BigInt;
use prio_circuit::{Circuit, CircuitBuilder, FieldElement, NodeId};
use tracing::trace;

/// Encodes `value` as `[value]` after validating the width and range.
pub fn encode(n_bits: usize, value: &BigInt) -> Result<[FieldElement; 1]> {
    let element = to_field_element(n_bits, value)?;
    trace!(n_bits, %element, "encoded bounded integer");
    Ok([element])
}

/// Encodes a value drawn uniformly from `[0, 2^n_bits)`.
pub fn encode_random(n_bits: usize, rng: &SharedRng) -> Result<[FieldElement; 1]> {
    check_width(n_bits)?;
    Ok([sample_bits(rng, n_bits)])
}

pub fn build_circuit(name: &str) -> Circuit {
    Circuit::unchecked_input(name)
}

/// Integer of a validated width.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct IntUnsafeType {
    n_bits: usize,
}

impl IntUnsafeType {
    pub fn new(n_bits: usize) -> Result<Self> {
        check_width(n_bits)?;
        Ok(Self { n_bits })
    }

    pub fn n_bits(&self) -> usize {
        self.n_bits
    }
}

impl ValueType for IntUnsafeType {
    fn name(&self) -> &'static str {
        "int"
    }

    fn encoded_len(&self) -> usize {
        1
    }

    fn encode_random(&self, rng: &SharedRng) -> Vec<FieldElement> {
        vec![sample_bits(rng, self.n_bits)]
    }

    fn append_circuit(&self, builder: &mut CircuitBuilder, name: &str) -> Result<NodeId> {
        Ok(builder.unchecked_input(name))
    }
}

impl EncodeValue for IntUnsafeType {
    type Value = BigInt;

    fn encode(&self, value: &BigInt) -> Result<Vec<FieldElement>> {
        Ok(encode(self.n_bits, value)?.into())
    }
}
