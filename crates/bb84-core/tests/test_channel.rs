//! Tests for the qubit channel measurement law.

use rand::SeedableRng;
use rand::rngs::StdRng;

use bb84_core::channel::{QubitChannel, measure};
use bb84_core::{Basis, Bit, EncodedQubit};

const BASES: [Basis; 2] = [Basis::Rectilinear, Basis::Diagonal];
const BITS: [Bit; 2] = [Bit::Zero, Bit::One];

// ---------------------------------------------------------------------------
// Matched bases
// ---------------------------------------------------------------------------

#[test]
fn matched_basis_reproduces_bit_for_every_combination() {
    let mut rng = StdRng::seed_from_u64(0);
    for basis in BASES {
        for bit in BITS {
            for _ in 0..100 {
                assert_eq!(measure(bit, basis, basis, &mut rng), bit);
            }
        }
    }
}

#[test]
fn matched_prepared_qubit_reproduces_bit() {
    let mut channel = QubitChannel::from_entropy();
    for basis in BASES {
        for bit in BITS {
            let q = EncodedQubit::prepare(bit, basis);
            assert_eq!(channel.measure_qubit(&q, basis), bit);
        }
    }
}

// ---------------------------------------------------------------------------
// Mismatched bases
// ---------------------------------------------------------------------------

#[test]
fn mismatched_basis_is_uniform() {
    const TRIALS: usize = 20_000;
    // 5 sigma of Binomial(20000, 0.5) is ~354.
    const TOLERANCE: usize = 400;

    let mut channel = QubitChannel::seeded(2024);
    for (prep, meas) in [
        (Basis::Rectilinear, Basis::Diagonal),
        (Basis::Diagonal, Basis::Rectilinear),
    ] {
        for bit in BITS {
            let ones = (0..TRIALS)
                .filter(|_| channel.measure(bit, prep, meas) == Bit::One)
                .count();
            assert!(
                ones.abs_diff(TRIALS / 2) < TOLERANCE,
                "{bit} prepared {prep}, measured {meas}: {ones} ones out of {TRIALS}"
            );
        }
    }
}

#[test]
fn mismatched_basis_forgets_encoded_bit() {
    // Both encoded values must be able to produce both outcomes.
    let mut channel = QubitChannel::seeded(17);
    for bit in BITS {
        let outcomes: Vec<Bit> = (0..64)
            .map(|_| channel.measure(bit, Basis::Rectilinear, Basis::Diagonal))
            .collect();
        assert!(outcomes.contains(&Bit::Zero));
        assert!(outcomes.contains(&Bit::One));
    }
}

#[test]
fn into_rng_returns_advanced_generator() {
    let mut fresh = StdRng::seed_from_u64(3);
    let mut channel = QubitChannel::new(StdRng::seed_from_u64(3));
    let first = channel.measure(Bit::Zero, Basis::Rectilinear, Basis::Diagonal);
    let expected = measure(Bit::Zero, Basis::Rectilinear, Basis::Diagonal, &mut fresh);
    assert_eq!(first, expected);

    let mut rng = channel.into_rng();
    let next_a = measure(Bit::One, Basis::Diagonal, Basis::Rectilinear, &mut rng);
    let next_b = measure(Bit::One, Basis::Diagonal, Basis::Rectilinear, &mut fresh);
    assert_eq!(next_a, next_b);
}
