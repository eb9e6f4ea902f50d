//! Round records.

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::basis::{Basis, Bit};
use crate::error::{QkdError, QkdResult};

/// The random choices that drive one round.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoundPlan {
    alice_bases: Vec<Basis>,
    alice_bits: Vec<Bit>,
    bob_bases: Vec<Basis>,
}

impl RoundPlan {
    /// Build a plan from explicit choices. All three vectors must have the
    /// same length.
    pub fn new(
        alice_bases: Vec<Basis>,
        alice_bits: Vec<Bit>,
        bob_bases: Vec<Basis>,
    ) -> QkdResult<Self> {
        let n = alice_bases.len();
        if alice_bits.len() != n || bob_bases.len() != n {
            return Err(QkdError::InvalidInput(format!(
                "plan vectors differ in length: {} Alice bases, {} Alice bits, {} Bob bases",
                n,
                alice_bits.len(),
                bob_bases.len()
            )));
        }
        Ok(Self {
            alice_bases,
            alice_bits,
            bob_bases,
        })
    }

    /// Draw a plan for `num_qubits` qubits.
    ///
    /// Draw order is Alice's bases, Alice's bits, then Bob's bases.
    pub fn random<R: Rng + ?Sized>(num_qubits: usize, rng: &mut R) -> Self {
        let alice_bases = (0..num_qubits).map(|_| Basis::random(rng)).collect();
        let alice_bits = (0..num_qubits).map(|_| Bit::random(rng)).collect();
        let bob_bases = (0..num_qubits).map(|_| Basis::random(rng)).collect();
        Self {
            alice_bases,
            alice_bits,
            bob_bases,
        }
    }

    /// Number of qubits in the plan.
    pub fn len(&self) -> usize {
        self.alice_bases.len()
    }

    /// Whether the plan has no qubits.
    pub fn is_empty(&self) -> bool {
        self.alice_bases.is_empty()
    }

    /// Alice's preparation bases.
    pub fn alice_bases(&self) -> &[Basis] {
        &self.alice_bases
    }

    /// Alice's prepared bits.
    pub fn alice_bits(&self) -> &[Bit] {
        &self.alice_bits
    }

    /// Bob's measurement bases.
    pub fn bob_bases(&self) -> &[Basis] {
        &self.bob_bases
    }

    pub(crate) fn into_parts(self) -> (Vec<Basis>, Vec<Bit>, Vec<Basis>) {
        (self.alice_bases, self.alice_bits, self.bob_bases)
    }
}

/// Full record of one executed round. Read-only once built.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Round {
    alice_bases: Vec<Basis>,
    alice_bits: Vec<Bit>,
    alice_outcomes: Vec<Bit>,
    bob_bases: Vec<Basis>,
    bob_outcomes: Vec<Bit>,
    shared_key: Vec<Bit>,
}

impl Round {
    pub(crate) fn new(
        alice_bases: Vec<Basis>,
        alice_bits: Vec<Bit>,
        alice_outcomes: Vec<Bit>,
        bob_bases: Vec<Basis>,
        bob_outcomes: Vec<Bit>,
        shared_key: Vec<Bit>,
    ) -> Self {
        debug_assert_eq!(alice_bits.len(), alice_bases.len());
        debug_assert_eq!(alice_outcomes.len(), alice_bases.len());
        debug_assert_eq!(bob_bases.len(), alice_bases.len());
        debug_assert_eq!(bob_outcomes.len(), alice_bases.len());
        Self {
            alice_bases,
            alice_bits,
            alice_outcomes,
            bob_bases,
            bob_outcomes,
            shared_key,
        }
    }

    /// Number of qubits exchanged.
    pub fn len(&self) -> usize {
        self.alice_bases.len()
    }

    /// Whether the round exchanged no qubits.
    pub fn is_empty(&self) -> bool {
        self.alice_bases.is_empty()
    }

    pub fn alice_bases(&self) -> &[Basis] {
        &self.alice_bases
    }

    pub fn alice_bits(&self) -> &[Bit] {
        &self.alice_bits
    }

    /// What Alice's own measurement recorded after encoding.
    pub fn alice_outcomes(&self) -> &[Bit] {
        &self.alice_outcomes
    }

    pub fn bob_bases(&self) -> &[Basis] {
        &self.bob_bases
    }

    pub fn bob_outcomes(&self) -> &[Bit] {
        &self.bob_outcomes
    }

    /// Sifted key: Alice's bits at every index where the bases agree.
    pub fn shared_key(&self) -> &[Bit] {
        &self.shared_key
    }

    /// Indices kept by sifting, ascending.
    pub fn sifted_indices(&self) -> Vec<usize> {
        matching_indices(&self.alice_bases, &self.bob_bases).collect()
    }

    /// Bob's measured bits at the sifted indices.
    pub fn bob_key(&self) -> Vec<Bit> {
        matching_indices(&self.alice_bases, &self.bob_bases)
            .map(|i| self.bob_outcomes[i])
            .collect()
    }

    /// Sifted positions where Bob's bit differs from Alice's.
    pub fn mismatches(&self) -> usize {
        self.shared_key
            .iter()
            .zip(self.bob_key())
            .filter(|(a, b)| **a != *b)
            .count()
    }

    /// Quantum bit error rate over the sifted key, in `[0, 1]`.
    ///
    /// Zero for an empty key.
    pub fn qber(&self) -> f64 {
        if self.shared_key.is_empty() {
            return 0.0;
        }
        self.mismatches() as f64 / self.shared_key.len() as f64
    }

    /// Whether Alice's and Bob's sifted keys are identical.
    pub fn keys_agree(&self) -> bool {
        self.mismatches() == 0
    }

    /// The three sequences a display layer consumes.
    pub fn key_exchange(&self) -> KeyExchange {
        KeyExchange {
            alice_outcomes: self.alice_outcomes.clone(),
            bob_outcomes: self.bob_outcomes.clone(),
            shared_key: self.shared_key.clone(),
        }
    }
}

impl From<Round> for KeyExchange {
    fn from(round: Round) -> Self {
        KeyExchange {
            alice_outcomes: round.alice_outcomes,
            bob_outcomes: round.bob_outcomes,
            shared_key: round.shared_key,
        }
    }
}

/// Alice's recorded qubits, Bob's measured bits and the sifted key.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeyExchange {
    /// Alice's recorded outcomes, one per qubit.
    pub alice_outcomes: Vec<Bit>,
    /// Bob's measured bits, one per qubit.
    pub bob_outcomes: Vec<Bit>,
    /// Sifted shared key.
    pub shared_key: Vec<Bit>,
}

pub(crate) fn matching_indices<'a>(
    alice_bases: &'a [Basis],
    bob_bases: &'a [Basis],
) -> impl Iterator<Item = usize> + 'a {
    alice_bases
        .iter()
        .zip(bob_bases)
        .enumerate()
        .filter_map(|(i, (a, b))| (a == b).then_some(i))
}
