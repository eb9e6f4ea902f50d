//! Background round execution.
//!
//! A round is CPU-bound and short, so it runs on tokio's blocking pool and
//! hands back exactly one result. There is no streaming, no cancellation
//! and no timeout.

use rand::SeedableRng;
use rand::rngs::StdRng;
use std::sync::Arc;
use tokio::task::{JoinError, JoinHandle};
use tracing::{Span, info, instrument};

use crate::basis::format_bits;
use crate::error::{QkdError, QkdResult};
use crate::protocol::Coordinator;
use crate::round::{KeyExchange, Round};

/// Generator for one task: seeded when `seed` is given, entropy otherwise.
pub fn task_rng(seed: Option<u64>) -> StdRng {
    match seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    }
}

/// Handle to a round running in the background.
#[derive(Debug)]
pub struct RoundTask {
    num_qubits: usize,
    handle: JoinHandle<Round>,
}

impl RoundTask {
    /// Qubits requested for this round.
    pub fn num_qubits(&self) -> usize {
        self.num_qubits
    }

    /// Whether the round has produced its result.
    pub fn is_finished(&self) -> bool {
        self.handle.is_finished()
    }

    /// Wait for the round.
    pub async fn join(self) -> QkdResult<Round> {
        self.handle.await.map_err(join_error)
    }
}

/// Start one round of `num_qubits` qubits on the blocking pool.
///
/// Must be called from within a tokio runtime.
#[instrument]
pub fn spawn_round(num_qubits: usize, seed: Option<u64>) -> RoundTask {
    let span = Span::current();
    let handle = tokio::task::spawn_blocking(move || {
        let _entered = span.enter();
        let mut rng = task_rng(seed);
        let round = Coordinator::new().run_round(num_qubits, &mut rng);
        info!(
            alice = %format_bits(round.alice_outcomes()),
            bob = %format_bits(round.bob_outcomes()),
            key = %format_bits(round.shared_key()),
            "simulation complete"
        );
        round
    });
    RoundTask { num_qubits, handle }
}

/// Run one round in the background and pass the outcome to `handler`.
///
/// `handler` is called exactly once. The round is shared read-only, so
/// nothing the handler does can alter it.
pub fn spawn_with_handler<F>(num_qubits: usize, seed: Option<u64>, handler: F) -> JoinHandle<()>
where
    F: FnOnce(QkdResult<Arc<Round>>) + Send + 'static,
{
    let task = spawn_round(num_qubits, seed);
    tokio::spawn(async move {
        let outcome = task.join().await.map(Arc::new);
        handler(outcome);
    })
}

/// Simulate one round and return the sequences a display layer shows.
pub async fn simulate(num_qubits: usize, seed: Option<u64>) -> QkdResult<KeyExchange> {
    spawn_round(num_qubits, seed).join().await.map(KeyExchange::from)
}

fn join_error(e: JoinError) -> QkdError {
    if e.is_panic() {
        QkdError::TaskFailed("round task panicked".into())
    } else {
        QkdError::TaskFailed(e.to_string())
    }
}
