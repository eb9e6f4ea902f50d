//! Sifted-key yield statistics over many rounds.
//!
//! Each position survives sifting independently with probability 1/2, so
//! the shared-key length of an N-qubit round is Binomial(N, 1/2):
//! mean N/2, variance N/4.

use rand::Rng;
use serde::Serialize;
use tracing::debug;

use crate::error::{QkdError, QkdResult};
use crate::protocol::Coordinator;
use crate::round::Round;

/// Running summary of shared-key lengths (Welford accumulation).
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct YieldStats {
    num_qubits: usize,
    rounds: usize,
    mean: f64,
    m2: f64,
    min: usize,
    max: usize,
}

impl YieldStats {
    /// Empty summary for rounds of `num_qubits` qubits.
    pub fn new(num_qubits: usize) -> Self {
        Self {
            num_qubits,
            rounds: 0,
            mean: 0.0,
            m2: 0.0,
            min: usize::MAX,
            max: 0,
        }
    }

    /// Record one shared-key length.
    pub fn record_len(&mut self, sifted: usize) {
        self.rounds += 1;
        let x = sifted as f64;
        let delta = x - self.mean;
        self.mean += delta / self.rounds as f64;
        self.m2 += delta * (x - self.mean);
        self.min = self.min.min(sifted);
        self.max = self.max.max(sifted);
    }

    /// Record a finished round.
    pub fn record(&mut self, round: &Round) {
        self.record_len(round.shared_key().len());
    }

    pub fn num_qubits(&self) -> usize {
        self.num_qubits
    }

    pub fn rounds(&self) -> usize {
        self.rounds
    }

    /// Sample mean of the shared-key length.
    pub fn mean(&self) -> f64 {
        self.mean
    }

    /// Sample standard deviation (n − 1 denominator).
    pub fn std_dev(&self) -> f64 {
        if self.rounds < 2 {
            return 0.0;
        }
        (self.m2 / (self.rounds - 1) as f64).sqrt()
    }

    /// Shortest key seen, `None` before any round.
    pub fn min(&self) -> Option<usize> {
        (self.rounds > 0).then_some(self.min)
    }

    /// Longest key seen, `None` before any round.
    pub fn max(&self) -> Option<usize> {
        (self.rounds > 0).then_some(self.max)
    }

    /// Theoretical mean, N/2.
    pub fn expected_mean(&self) -> f64 {
        self.num_qubits as f64 / 2.0
    }

    /// Theoretical standard deviation of one round, √N / 2.
    pub fn expected_std_dev(&self) -> f64 {
        (self.num_qubits as f64).sqrt() / 2.0
    }

    /// Standard error of the sample mean under the theoretical variance.
    pub fn standard_error(&self) -> f64 {
        if self.rounds == 0 {
            return 0.0;
        }
        self.expected_std_dev() / (self.rounds as f64).sqrt()
    }

    /// Whether the sample mean lies within `k` standard errors of N/2.
    pub fn within_sigmas(&self, k: f64) -> bool {
        (self.mean - self.expected_mean()).abs() <= k * self.standard_error()
    }

    /// Sample mean as a fraction of N (ideal 0.5).
    pub fn sift_fraction(&self) -> f64 {
        if self.num_qubits == 0 {
            return 0.0;
        }
        self.mean / self.num_qubits as f64
    }
}

/// Run `rounds` rounds of `num_qubits` qubits and summarise their yield.
pub fn collect_yield<R: Rng + ?Sized>(
    rounds: usize,
    num_qubits: usize,
    rng: &mut R,
) -> QkdResult<YieldStats> {
    collect_yield_with(rounds, num_qubits, rng, |_| {})
}

/// Like [`collect_yield`], calling `on_round` with the number of rounds
/// completed so far after each round.
pub fn collect_yield_with<R, F>(
    rounds: usize,
    num_qubits: usize,
    rng: &mut R,
    mut on_round: F,
) -> QkdResult<YieldStats>
where
    R: Rng + ?Sized,
    F: FnMut(usize),
{
    if rounds == 0 {
        return Err(QkdError::InvalidInput(
            "yield statistics need at least one round".into(),
        ));
    }

    let coordinator = Coordinator::new();
    let mut stats = YieldStats::new(num_qubits);
    for done in 1..=rounds {
        let round = coordinator.run_round(num_qubits, rng);
        stats.record(&round);
        on_round(done);
    }

    debug!(
        rounds,
        num_qubits,
        mean = stats.mean(),
        std_dev = stats.std_dev(),
        "yield statistics collected"
    );
    Ok(stats)
}
