// SPDX-License-Identifier: LGPL-3.0-only
//
// This file is provided WITHOUT ANY WARRANTY;
// without even the implied warranty of MERCHANTABILITY
// or FITNESS FOR A PARTICULAR PURPOSE.

//! Resolved submission layout.
//!
//! A [`SubmissionSchema`] is built once from a validated configuration. It
//! holds the combined circuit (the conjunction of every field's circuit, in
//! declaration order) and encodes whole submissions field by field.

use anyhow::{Context, Result};
use prio_types::{Circuit, CircuitBuilder, FieldElement, SharedRng, ValueType};
use std::ops::Range;
use std::sync::Arc;
use tracing::debug;

/// A named field resolved to its value type.
#[derive(Debug, Clone)]
pub struct Field {
    pub name: String,
    pub value_type: Arc<dyn ValueType>,
}

#[derive(Debug, Clone)]
pub struct SubmissionSchema {
    fields: Vec<Field>,
    circuit: Arc<Circuit>,
}

impl SubmissionSchema {
    pub fn new(fields: Vec<Field>) -> Result<Self> {
        let mut builder = CircuitBuilder::new();
        let mut roots = Vec::with_capacity(fields.len());
        for field in &fields {
            let root = field
                .value_type
                .append_circuit(&mut builder, &field.name)
                .with_context(|| format!("could not build circuit for field '{}'", field.name))?;
            roots.push(root);
        }
        let root = builder
            .and(roots)
            .context("a submission needs at least one field")?;
        let circuit = builder.build(root)?;

        debug!(
            fields = fields.len(),
            inputs = circuit.num_inputs(),
            mul_gates = circuit.mul_gate_count(),
            "built submission circuit"
        );

        Ok(Self {
            fields,
            circuit: Arc::new(circuit),
        })
    }

    pub fn fields(&self) -> &[Field] {
        &self.fields
    }

    /// The combined circuit, shared with every verifier.
    pub fn circuit(&self) -> Arc<Circuit> {
        self.circuit.clone()
    }

    pub fn encoded_len(&self) -> usize {
        self.fields
            .iter()
            .map(|field| field.value_type.encoded_len())
            .sum()
    }

    /// Slots of the encoded submission that belong to `name`.
    pub fn slots_of(&self, name: &str) -> Option<Range<usize>> {
        let mut start = 0;
        for field in &self.fields {
            let end = start + field.value_type.encoded_len();
            if field.name == name {
                return Some(start..end);
            }
            start = end;
        }
        None
    }

    /// Random encoding of a whole submission: every field's encoding,
    /// concatenated in declaration order.
    pub fn encode_random(&self, rng: &SharedRng) -> Vec<FieldElement> {
        self.fields
            .iter()
            .flat_map(|field| field.value_type.encode_random(rng))
            .collect()
    }
}
