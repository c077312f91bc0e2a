// SPDX-License-Identifier: LGPL-3.0-only
//
// This file is provided WITHOUT ANY WARRANTY;
// without even the implied warranty of MERCHANTABILITY
// or FITNESS FOR A PARTICULAR PURPOSE.

use num_bigint::BigInt;
use prio_types::{
    boolean, int_pow, int_unsafe, shared_rng_from_seed, BoolType, EncodeValue, FieldElement,
    IntPowType, IntUnsafeType, ValueType,
};
use std::sync::Arc;
use std::thread;
use tracing_subscriber::{fmt, EnvFilter};

fn init_tracing() -> tracing::subscriber::DefaultGuard {
    let subscriber = fmt()
        .with_env_filter(EnvFilter::new("debug"))
        .with_test_writer()
        .finish();
    tracing::subscriber::set_default(subscriber)
}

#[test]
fn encoders_match_circuit_slot_counts() {
    let _guard = init_tracing();
    let rng = shared_rng_from_seed(5);

    let types: Vec<Arc<dyn ValueType>> = vec![
        Arc::new(BoolType),
        Arc::new(IntUnsafeType::new(16).unwrap()),
        Arc::new(IntPowType::new(12, 2).unwrap()),
        Arc::new(IntPowType::new(12, 4).unwrap()),
        Arc::new(IntPowType::new(12, 8).unwrap()),
    ];

    for value_type in types {
        let circuit = value_type.build_circuit(value_type.name()).unwrap();
        let encoded = value_type.encode_random(&rng);
        assert_eq!(encoded.len(), value_type.encoded_len());
        assert_eq!(encoded.len(), circuit.num_inputs());
        assert!(circuit.evaluate(&encoded).unwrap(), "{value_type:?}");
    }
}

#[test]
fn typed_encoders_agree_with_free_functions() {
    let value = BigInt::from(9);
    assert_eq!(
        IntUnsafeType::new(4).unwrap().encode(&value).unwrap(),
        int_unsafe::encode(4, &value).unwrap().to_vec()
    );
    assert_eq!(
        IntPowType::new(4, 8).unwrap().encode(&value).unwrap(),
        int_pow::encode(4, 8, &value).unwrap()
    );
    assert_eq!(
        BoolType.encode(&true).unwrap(),
        boolean::encode(true).to_vec()
    );
}

#[test]
fn concurrent_clients_share_one_source() {
    let _guard = init_tracing();
    let rng = shared_rng_from_seed(99);
    let int_pow = IntPowType::new(20, 8).unwrap();
    let circuit = Arc::new(int_pow.build_circuit("reading").unwrap());

    let handles: Vec<_> = (0..8)
        .map(|_| {
            let rng = rng.clone();
            let circuit = circuit.clone();
            thread::spawn(move || {
                (0..250)
                    .map(|_| {
                        let encoded = int_pow.encode_random(&rng);
                        assert!(circuit.evaluate(&encoded).unwrap());
                        encoded[0].clone()
                    })
                    .collect::<Vec<FieldElement>>()
            })
        })
        .collect();

    let mut values: Vec<FieldElement> = handles
        .into_iter()
        .flat_map(|handle| handle.join().unwrap())
        .collect();
    assert_eq!(values.len(), 2000);

    // 2000 draws from 2^20 values should be almost all distinct
    values.sort();
    values.dedup();
    assert!(values.len() > 1900, "only {} distinct values", values.len());
}
