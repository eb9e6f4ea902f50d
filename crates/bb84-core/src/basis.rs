//! Bases, bits and prepared qubits.

use rand::Rng;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::QkdError;

/// Encoding/measurement basis for a single qubit.
///
/// `Rectilinear` prepares |0⟩/|1⟩, `Diagonal` prepares |+⟩/|−⟩ (a Hadamard
/// applied to the rectilinear state).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Basis {
    /// Computational (Z) basis.
    Rectilinear,
    /// Hadamard (X) basis.
    Diagonal,
}

impl Basis {
    /// Draw a basis uniformly at random.
    pub fn random<R: Rng + ?Sized>(rng: &mut R) -> Self {
        if rng.gen_bool(0.5) {
            Basis::Diagonal
        } else {
            Basis::Rectilinear
        }
    }

    /// Short symbol used in tabular output.
    pub fn symbol(self) -> char {
        match self {
            Basis::Rectilinear => '+',
            Basis::Diagonal => 'x',
        }
    }
}

impl fmt::Display for Basis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Basis::Rectilinear => write!(f, "rectilinear"),
            Basis::Diagonal => write!(f, "diagonal"),
        }
    }
}

/// A classical bit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "u8", try_from = "u8")]
pub enum Bit {
    /// 0
    Zero,
    /// 1
    One,
}

impl Bit {
    /// Draw a bit uniformly at random.
    pub fn random<R: Rng + ?Sized>(rng: &mut R) -> Self {
        Bit::from(rng.gen_bool(0.5))
    }

    /// Numeric value of the bit.
    pub fn value(self) -> u8 {
        match self {
            Bit::Zero => 0,
            Bit::One => 1,
        }
    }
}

impl From<bool> for Bit {
    fn from(b: bool) -> Self {
        if b { Bit::One } else { Bit::Zero }
    }
}

impl From<Bit> for bool {
    fn from(bit: Bit) -> Self {
        bit == Bit::One
    }
}

impl From<Bit> for u8 {
    fn from(bit: Bit) -> Self {
        bit.value()
    }
}

impl TryFrom<u8> for Bit {
    type Error = QkdError;

    fn try_from(v: u8) -> Result<Self, Self::Error> {
        match v {
            0 => Ok(Bit::Zero),
            1 => Ok(Bit::One),
            other => Err(QkdError::InvalidInput(format!(
                "bit must be 0 or 1, got {other}"
            ))),
        }
    }
}

impl fmt::Display for Bit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.value())
    }
}

/// Render a bit sequence as `[1, 0, 1]`.
pub fn format_bits(bits: &[Bit]) -> String {
    let inner: Vec<String> = bits.iter().map(ToString::to_string).collect();
    format!("[{}]", inner.join(", "))
}

/// A classical bit prepared for transmission in a given basis.
///
/// The encoded value is deliberately not exposed: it can only be observed
/// through [`QubitChannel::measure_qubit`](crate::channel::QubitChannel::measure_qubit).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EncodedQubit {
    bit: Bit,
    basis: Basis,
}

impl EncodedQubit {
    /// Prepare `bit` in `basis`.
    pub fn prepare(bit: Bit, basis: Basis) -> Self {
        Self { bit, basis }
    }

    /// Basis the qubit was prepared in.
    pub fn basis(&self) -> Basis {
        self.basis
    }

    pub(crate) fn bit(&self) -> Bit {
        self.bit
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    #[test]
    fn test_bit_conversions() {
        assert_eq!(Bit::from(true), Bit::One);
        assert_eq!(Bit::from(false), Bit::Zero);
        assert!(bool::from(Bit::One));
        assert_eq!(u8::from(Bit::Zero), 0);
        assert_eq!(Bit::try_from(1u8).unwrap(), Bit::One);
        assert!(matches!(Bit::try_from(2u8), Err(QkdError::InvalidInput(_))));
    }

    #[test]
    fn test_bit_serializes_as_number() {
        let json = serde_json::to_string(&vec![Bit::One, Bit::Zero]).unwrap();
        assert_eq!(json, "[1,0]");
        let back: Vec<Bit> = serde_json::from_str("[0,1,1]").unwrap();
        assert_eq!(back, vec![Bit::Zero, Bit::One, Bit::One]);
        assert!(serde_json::from_str::<Bit>("7").is_err());
    }

    #[test]
    fn test_format_bits() {
        assert_eq!(format_bits(&[]), "[]");
        assert_eq!(format_bits(&[Bit::One, Bit::Zero, Bit::One]), "[1, 0, 1]");
    }

    #[test]
    fn test_random_draws_cover_both_values() {
        let mut rng = StdRng::seed_from_u64(3);
        let bases: Vec<Basis> = (0..64).map(|_| Basis::random(&mut rng)).collect();
        let bits: Vec<Bit> = (0..64).map(|_| Bit::random(&mut rng)).collect();
        assert!(bases.contains(&Basis::Rectilinear) && bases.contains(&Basis::Diagonal));
        assert!(bits.contains(&Bit::Zero) && bits.contains(&Bit::One));
    }

    #[test]
    fn test_encoded_qubit_keeps_basis() {
        let q = EncodedQubit::prepare(Bit::One, Basis::Diagonal);
        assert_eq!(q.basis(), Basis::Diagonal);
        assert_eq!(q.bit(), Bit::One);
    }
}
