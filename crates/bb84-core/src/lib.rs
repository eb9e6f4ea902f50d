//! `bb84-core` — BB84 quantum key distribution, simulated.
//!
//! Alice encodes random bits in random bases, Bob measures in bases of his
//! own choosing, and sifting keeps the positions where the bases agree.
//! The quantum channel is replaced by the single-qubit measurement law:
//! a matched basis reproduces the encoded bit, a mismatched one returns a
//! uniformly random bit.
//!
//! - [`channel`] — the measurement model ([`QubitChannel`], [`measure`])
//! - [`protocol`] — round coordination and sifting ([`Coordinator`], [`sift`])
//! - [`task`] — single-shot background execution ([`spawn_round`], [`simulate`])
//! - [`stats`] — key-yield statistics over many rounds
//! - [`config`] — YAML/environment configuration
//!
//! # Quick start
//!
//! ```rust
//! use bb84_core::run_round;
//! use rand::SeedableRng;
//!
//! let mut rng = rand::rngs::StdRng::seed_from_u64(42);
//! let round = run_round(5, &mut rng);
//!
//! assert_eq!(round.alice_outcomes().len(), 5);
//! assert_eq!(round.bob_outcomes().len(), 5);
//! assert!(round.shared_key().len() <= 5);
//! assert!(round.keys_agree());
//! ```

pub mod basis;
pub mod channel;
pub mod config;
pub mod error;
pub mod protocol;
pub mod round;
pub mod stats;
pub mod task;

pub use basis::{Basis, Bit, EncodedQubit, format_bits};
pub use channel::{QubitChannel, measure};
pub use config::{SimulationConfig, parse_qubit_count};
pub use error::{QkdError, QkdResult};
pub use protocol::{Coordinator, Relay, run_round, sift};
pub use round::{KeyExchange, Round, RoundPlan};
pub use stats::{YieldStats, collect_yield, collect_yield_with};
pub use task::{RoundTask, simulate, spawn_round, spawn_with_handler, task_rng};
