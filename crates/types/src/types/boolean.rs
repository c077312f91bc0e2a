// SPDX-License-Identifier: LGPL-3.0-only
//
// This file is provided WITHOUT ANY WARRANTY;
// without even the implied warranty of MERCHANTABILITY
// or FITNESS FOR A PARTICULAR PURPOSE.

//! Boolean values, encoded as a single element in {0, 1}.
//!
//! The circuit is a bare unchecked input. It does not prove the element is a
//! bit; callers that need that guarantee add a width-one bit-range node over
//! the slot themselves.

use crate::codec::{bool_to_field_element, sample_below};
use crate::errors::Result;
use crate::rng::SharedRng;
use crate::value_type::{EncodeValue, ValueType};
use num_traits::One;
use prio_circuit::{Circuit, CircuitBuilder, FieldElement, NodeId};
use tracing::trace;

pub fn encode(value: bool) -> [FieldElement; 1] {
    [bool_to_field_element(value)]
}

pub fn encode_random(rng: &SharedRng) -> [FieldElement; 1] {
    let two = FieldElement::one() + FieldElement::one();
    let value = sample_below(rng, &two).is_one();
    trace!(value, "sampled boolean");
    encode(value)
}

pub fn build_circuit(name: &str) -> Circuit {
    Circuit::unchecked_input(name)
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct BoolType;

impl ValueType for BoolType {
    fn name(&self) -> &'static str {
        "bool"
    }

    fn encoded_len(&self) -> usize {
        1
    }

    fn encode_random(&self, rng: &SharedRng) -> Vec<FieldElement> {
        encode_random(rng).into()
    }

    fn append_circuit(&self, builder: &mut CircuitBuilder, name: &str) -> Result<NodeId> {
        Ok(builder.unchecked_input(name))
    }
}

impl EncodeValue for BoolType {
    type Value = bool;

    fn encode(&self, value: &bool) -> Result<Vec<FieldElement>> {
        Ok(encode(*value).into())
    }
}
