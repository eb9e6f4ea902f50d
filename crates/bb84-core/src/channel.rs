//! Qubit channel simulator.
//!
//! Stands in for a quantum backend with the single-qubit measurement law
//! BB84 relies on:
//!
//! | preparation | measurement | outcome              |
//! |-------------|-------------|----------------------|
//! | B           | B           | the encoded bit      |
//! | B           | B' ≠ B      | uniform over {0, 1}  |
//!
//! Only the mismatched case consumes randomness, so seeding the generator
//! makes every outcome reproducible.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::trace;

use crate::basis::{Basis, Bit, EncodedQubit};

/// Measure `bit`, prepared in `preparation`, in `measurement`.
///
/// Matched bases return `bit` and leave `rng` untouched; mismatched bases
/// draw one uniformly random bit from `rng`.
pub fn measure<R: Rng + ?Sized>(
    bit: Bit,
    preparation: Basis,
    measurement: Basis,
    rng: &mut R,
) -> Bit {
    if preparation == measurement {
        return bit;
    }
    let outcome = Bit::random(rng);
    trace!(%preparation, %measurement, %outcome, "mismatched basis, outcome randomised");
    outcome
}

/// A simulated quantum channel owning its random source.
#[derive(Debug, Clone)]
pub struct QubitChannel<R> {
    rng: R,
}

impl QubitChannel<StdRng> {
    /// Channel with a reproducible generator.
    pub fn seeded(seed: u64) -> Self {
        Self::new(StdRng::seed_from_u64(seed))
    }

    /// Channel seeded from operating-system entropy.
    pub fn from_entropy() -> Self {
        Self::new(StdRng::from_entropy())
    }
}

impl<R: Rng> QubitChannel<R> {
    /// Wrap an existing generator.
    pub fn new(rng: R) -> Self {
        Self { rng }
    }

    /// See [`measure`].
    pub fn measure(&mut self, bit: Bit, preparation: Basis, measurement: Basis) -> Bit {
        measure(bit, preparation, measurement, &mut self.rng)
    }

    /// Measure a prepared qubit in `measurement`.
    pub fn measure_qubit(&mut self, qubit: &EncodedQubit, measurement: Basis) -> Bit {
        self.measure(qubit.bit(), qubit.basis(), measurement)
    }

    /// Give back the generator.
    pub fn into_rng(self) -> R {
        self.rng
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const BASES: [Basis; 2] = [Basis::Rectilinear, Basis::Diagonal];
    const BITS: [Bit; 2] = [Bit::Zero, Bit::One];

    #[test]
    fn test_matched_basis_is_identity() {
        let mut channel = QubitChannel::seeded(0);
        for basis in BASES {
            for bit in BITS {
                assert_eq!(channel.measure(bit, basis, basis), bit);
            }
        }
    }

    #[test]
    fn test_matched_basis_consumes_no_randomness() {
        let mut a = StdRng::seed_from_u64(11);
        let mut b = StdRng::seed_from_u64(11);
        for _ in 0..16 {
            measure(Bit::One, Basis::Diagonal, Basis::Diagonal, &mut a);
        }
        assert_eq!(a.r#gen::<u64>(), b.r#gen::<u64>());
    }

    #[test]
    fn test_same_seed_same_outcomes() {
        let mut c1 = QubitChannel::seeded(99);
        let mut c2 = QubitChannel::seeded(99);
        for _ in 0..32 {
            assert_eq!(
                c1.measure(Bit::Zero, Basis::Rectilinear, Basis::Diagonal),
                c2.measure(Bit::Zero, Basis::Rectilinear, Basis::Diagonal)
            );
        }
    }

    #[test]
    fn test_measure_qubit_uses_preparation_basis() {
        let mut channel = QubitChannel::seeded(5);
        let q = EncodedQubit::prepare(Bit::One, Basis::Diagonal);
        assert_eq!(channel.measure_qubit(&q, Basis::Diagonal), Bit::One);
    }
}
