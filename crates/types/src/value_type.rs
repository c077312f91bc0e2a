// SPDX-License-Identifier: LGPL-3.0-only
//
// This file is provided WITHOUT ANY WARRANTY;
// without even the implied warranty of MERCHANTABILITY
// or FITNESS FOR A PARTICULAR PURPOSE.

//! The contract every supported value type fulfils.
//!
//! [`ValueType`] ties a type's encoding layout to its verification circuit and
//! is object safe, so heterogeneous fields can be composed behind
//! `Arc<dyn ValueType>`. [`EncodeValue`] adds the typed encoder.

use crate::errors::Result;
use crate::rng::SharedRng;
use prio_circuit::{Circuit, CircuitBuilder, FieldElement, NodeId};
use std::fmt::Debug;
use tracing::debug;

/// A value type with a random encoder and a matching verification circuit.
///
/// Implementations are stateless apart from their validated parameters, so
/// the circuit they build depends only on those parameters and can be cached.
pub trait ValueType: Send + Sync + Debug {
    fn name(&self) -> &'static str;

    /// Number of field elements produced by the encoder. Always equal to the
    /// circuit's input slot count.
    fn encoded_len(&self) -> usize;

    fn encode_random(&self, rng: &SharedRng) -> Vec<FieldElement>;

    /// Adds this type's circuit to `builder`, tagging input slots with `name`.
    fn append_circuit(&self, builder: &mut CircuitBuilder, name: &str) -> Result<NodeId>;

    fn build_circuit(&self, name: &str) -> Result<Circuit> {
        let mut builder = CircuitBuilder::new();
        let root = self.append_circuit(&mut builder, name)?;
        let circuit = builder.build(root)?;
        debug!(
            value_type = self.name(),
            name,
            inputs = circuit.num_inputs(),
            mul_gates = circuit.mul_gate_count(),
            "built verification circuit"
        );
        Ok(circuit)
    }
}

/// Encoding of a concrete plaintext value.
pub trait EncodeValue: ValueType {
    type Value: ?Sized;

    fn encode(&self, value: &Self::Value) -> Result<Vec<FieldElement>>;
}
