//! End-to-end prover scenarios over BN254.

mod common;

use ark_bn254::Fr;
use baby_plonk::error::ProverError;
use baby_plonk::{prove, ProverOptions};
use common::{
    additions_circuit, build_witness, build_zkey, chain_circuit, chain_witness, square_circuit,
};

fn seeded(seed: u8) -> ProverOptions {
    ProverOptions { blinding_seed: Some([seed; 32]) }
}

#[test]
fn square_circuit_proves_and_reproduces() {
    let zkey = build_zkey(&square_circuit());
    // w = [w0, y, x, t] with x = 3, y = x² = 9.
    let witness = build_witness(&[
        Fr::from(0u64),
        Fr::from(9u64),
        Fr::from(3u64),
        Fr::from(9u64),
    ]);

    let out = prove(zkey.clone(), &witness, &seeded(1)).unwrap();
    assert_eq!(out.proof.protocol, "baby_plonk");
    assert_eq!(out.proof.curve, "bn254");
    assert_eq!(out.public_inputs, vec!["9".to_string()]);

    // Same seed, same inputs: byte-identical proof.
    let again = prove(zkey.clone(), &witness, &seeded(1)).unwrap();
    assert_eq!(
        serde_json::to_string(&out.proof).unwrap(),
        serde_json::to_string(&again.proof).unwrap()
    );

    // A different blinding seed moves every commitment but keeps the
    // statement.
    let other = prove(zkey, &witness, &seeded(2)).unwrap();
    assert_ne!(
        serde_json::to_string(&out.proof).unwrap(),
        serde_json::to_string(&other.proof).unwrap()
    );
    assert_eq!(other.public_inputs, vec!["9".to_string()]);
}

#[test]
fn square_circuit_rejects_inconsistent_public() {
    let zkey = build_zkey(&square_circuit());
    // y = 10 breaks the copy cycle tying the public wire to the square.
    let witness = build_witness(&[
        Fr::from(0u64),
        Fr::from(10u64),
        Fr::from(3u64),
        Fr::from(9u64),
    ]);

    let err = prove(zkey, &witness, &seeded(1)).unwrap_err();
    assert!(matches!(err, ProverError::CopyConstraintViolation), "got {err:?}");
}

#[test]
fn multiplication_chain_proves() {
    let zkey = build_zkey(&chain_circuit(true));
    let witness = build_witness(&chain_witness(3));

    let out = prove(zkey, &witness, &seeded(7)).unwrap();
    // out = 3⁴ = 81
    assert_eq!(out.public_inputs, vec!["81".to_string()]);
    // Every commitment is a real curve point, not the identity.
    for point in [
        &out.proof.a,
        &out.proof.b,
        &out.proof.z,
        &out.proof.t_low,
        &out.proof.t_high,
        &out.proof.wxi,
        &out.proof.wxiw,
    ] {
        assert_ne!((point.x.as_str(), point.y.as_str()), ("0", "0"));
    }
}

#[test]
fn multiplication_chain_without_publics() {
    let zkey = build_zkey(&chain_circuit(false));
    let witness = build_witness(&chain_witness(5));

    let out = prove(zkey.clone(), &witness, &seeded(7)).unwrap();
    assert!(out.public_inputs.is_empty());

    // With no public scalars absorbed before β, a witness with a different
    // chain base still proves, and the two proofs diverge.
    let other = prove(zkey, &build_witness(&chain_witness(6)), &seeded(7)).unwrap();
    assert_ne!(
        serde_json::to_string(&out.proof).unwrap(),
        serde_json::to_string(&other.proof).unwrap()
    );
}

#[test]
fn additions_section_feeds_internal_witness() {
    let zkey = build_zkey(&additions_circuit());
    // u = 5, v = 7, s = u + 2v = 19; the prover must compute the internal
    // wire itself from the additions section.
    let witness = build_witness(&[
        Fr::from(0u64),
        Fr::from(19u64),
        Fr::from(5u64),
        Fr::from(7u64),
    ]);
    let out = prove(zkey.clone(), &witness, &seeded(3)).unwrap();
    assert_eq!(out.public_inputs, vec!["19".to_string()]);

    // A wrong public breaks the cycle against the computed combination.
    let bad = build_witness(&[
        Fr::from(0u64),
        Fr::from(20u64),
        Fr::from(5u64),
        Fr::from(7u64),
    ]);
    let err = prove(zkey, &bad, &seeded(3)).unwrap_err();
    assert!(matches!(err, ProverError::CopyConstraintViolation), "got {err:?}");
}

#[test]
fn witness_length_is_checked() {
    let zkey = build_zkey(&square_circuit());
    let witness = build_witness(&[Fr::from(0u64), Fr::from(9u64), Fr::from(3u64)]);
    let err = prove(zkey, &witness, &seeded(1)).unwrap_err();
    assert!(matches!(err, ProverError::WitnessMismatch(_)), "got {err:?}");
}

#[test]
fn witness_field_prime_is_checked() {
    let zkey = build_zkey(&square_circuit());
    let mut witness = build_witness(&[
        Fr::from(0u64),
        Fr::from(9u64),
        Fr::from(3u64),
        Fr::from(9u64),
    ]);
    // Corrupt one byte of the header's field prime.
    let prime_offset = 4 + 4 + 4 + 4 + 8 + 4;
    witness[prime_offset] ^= 1;
    let err = prove(zkey, &witness, &seeded(1)).unwrap_err();
    assert!(matches!(err, ProverError::WitnessMismatch(_)), "got {err:?}");
}

#[test]
fn proof_export_uses_protocol_keys() {
    let zkey = build_zkey(&square_circuit());
    let witness = build_witness(&[
        Fr::from(0u64),
        Fr::from(9u64),
        Fr::from(3u64),
        Fr::from(9u64),
    ]);
    let out = prove(zkey, &witness, &seeded(1)).unwrap();
    let json: serde_json::Value =
        serde_json::from_str(&serde_json::to_string(&out.proof).unwrap()).unwrap();
    for key in ["A", "B", "Z", "TL", "TH", "Wxi", "Wxiw"] {
        assert!(json.get(key).is_some(), "missing commitment key {key}");
    }
    for key in ["a", "b", "s1", "aw", "bw", "zw", "r"] {
        assert!(json[key].is_string(), "missing evaluation key {key}");
    }
    assert!(json.get("t").is_none(), "t is prover-internal");
    assert_eq!(json["protocol"], "baby_plonk");
}
