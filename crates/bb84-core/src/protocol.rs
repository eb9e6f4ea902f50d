//! BB84 round coordination and sifting.
//!
//! One round, for N qubits:
//!
//! 1. Alice draws a basis and a bit per qubit.
//! 2. Alice measures her own prepared qubit in its preparation basis; the
//!    outcome is her recorded qubit (equal to the prepared bit).
//! 3. Bob draws a basis per qubit.
//! 4. Bob measures what Alice sent in his basis.
//! 5. Sifting keeps Alice's bit wherever the two bases agree.

use rand::Rng;
use tracing::{debug, instrument};

use crate::basis::{Basis, Bit};
use crate::channel::QubitChannel;
use crate::round::{Round, RoundPlan, matching_indices};

/// What Alice's side hands to the channel for Bob's measurement.
///
/// Both choices give identical rounds: Alice's self-measurement is
/// same-basis, so her recorded outcome always equals her prepared bit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Relay {
    /// Forward Alice's recorded (self-measured) outcome.
    #[default]
    RecordedOutcome,
    /// Forward Alice's prepared bit.
    PreparedBit,
}

/// Runs BB84 rounds.
#[derive(Debug, Clone, Copy, Default)]
pub struct Coordinator {
    relay: Relay,
}

impl Coordinator {
    /// Coordinator relaying Alice's recorded outcomes.
    pub fn new() -> Self {
        Self::default()
    }

    /// Choose what is relayed to Bob.
    #[must_use]
    pub fn with_relay(mut self, relay: Relay) -> Self {
        self.relay = relay;
        self
    }

    pub fn relay(&self) -> Relay {
        self.relay
    }

    /// Draw a plan for `num_qubits` and execute it, all from `rng`.
    #[instrument(skip(self, rng))]
    pub fn run_round<R: Rng + ?Sized>(&self, num_qubits: usize, rng: &mut R) -> Round {
        let plan = RoundPlan::random(num_qubits, rng);
        let mut channel = QubitChannel::new(rng);
        self.execute(plan, &mut channel)
    }

    /// Execute a fixed plan, taking measurement randomness from `channel`.
    pub fn execute<R: Rng>(&self, plan: RoundPlan, channel: &mut QubitChannel<R>) -> Round {
        let num_qubits = plan.len();
        let (alice_bases, alice_bits, bob_bases) = plan.into_parts();

        let alice_outcomes: Vec<Bit> = alice_bits
            .iter()
            .zip(&alice_bases)
            .map(|(&bit, &basis)| channel.measure(bit, basis, basis))
            .collect();

        let sent = match self.relay {
            Relay::RecordedOutcome => &alice_outcomes,
            Relay::PreparedBit => &alice_bits,
        };
        let bob_outcomes: Vec<Bit> = sent
            .iter()
            .zip(alice_bases.iter().zip(&bob_bases))
            .map(|(&bit, (&prep, &meas))| channel.measure(bit, prep, meas))
            .collect();

        let shared_key = sift(&alice_bases, &bob_bases, &alice_bits);
        debug!(
            num_qubits,
            sifted = shared_key.len(),
            relay = ?self.relay,
            "round executed"
        );

        Round::new(
            alice_bases,
            alice_bits,
            alice_outcomes,
            bob_bases,
            bob_outcomes,
            shared_key,
        )
    }
}

/// Run one round with the default coordinator.
pub fn run_round<R: Rng + ?Sized>(num_qubits: usize, rng: &mut R) -> Round {
    Coordinator::new().run_round(num_qubits, rng)
}

/// Keep `alice_bits[i]` wherever `alice_bases[i] == bob_bases[i]`, in index
/// order. Extra trailing entries in any slice are ignored.
pub fn sift(alice_bases: &[Basis], bob_bases: &[Basis], alice_bits: &[Bit]) -> Vec<Bit> {
    matching_indices(alice_bases, bob_bases)
        .filter_map(|i| alice_bits.get(i).copied())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    use Basis::{Diagonal as D, Rectilinear as R};

    #[test]
    fn test_sift_keeps_matching_positions() {
        let key = sift(&[R, D, R], &[R, R, R], &[Bit::One, Bit::One, Bit::Zero]);
        assert_eq!(key, vec![Bit::One, Bit::Zero]);
    }

    #[test]
    fn test_sift_all_mismatched() {
        let key = sift(&[R, D], &[D, R], &[Bit::One, Bit::Zero]);
        assert!(key.is_empty());
    }

    #[test]
    fn test_zero_qubits() {
        let mut rng = StdRng::seed_from_u64(0);
        let round = run_round(0, &mut rng);
        assert!(round.is_empty());
        assert!(round.alice_outcomes().is_empty());
        assert!(round.bob_outcomes().is_empty());
        assert!(round.shared_key().is_empty());
    }

    #[test]
    fn test_alice_outcomes_equal_prepared_bits() {
        let mut rng = StdRng::seed_from_u64(21);
        let round = run_round(64, &mut rng);
        assert_eq!(round.alice_outcomes(), round.alice_bits());
    }

    #[test]
    fn test_seeded_rounds_reproduce() {
        let r1 = run_round(32, &mut StdRng::seed_from_u64(8));
        let r2 = run_round(32, &mut StdRng::seed_from_u64(8));
        assert_eq!(r1, r2);
    }

    #[test]
    fn test_with_relay() {
        let c = Coordinator::new().with_relay(Relay::PreparedBit);
        assert_eq!(c.relay(), Relay::PreparedBit);
        assert_eq!(Coordinator::new().relay(), Relay::RecordedOutcome);
    }
}
