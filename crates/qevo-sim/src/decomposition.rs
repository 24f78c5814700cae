//! Product-formula term sequences.
//!
//! A product formula of order k replaces `exp(-i H x)` by an ordered product
//! of single-term exponentials `∏_j exp(-i a_j P_j x)`. This module computes
//! the ordered `(P_j, a_j)` sequence; the synthesisers turn each entry into a
//! rotation.
//!
//! # Order 1 (Lie-Trotter)
//!
//! The Hamiltonian terms in insertion order.
//!
//! # Order 2k (Suzuki)
//!
//!   S₂(x)   = ∏_{j=1..n} exp(-i c_j P_j x/2) · ∏_{j=n..1} exp(-i c_j P_j x/2)
//!   S₂ₖ(x)  = S₂ₖ₋₂(p x)² · S₂ₖ₋₂((1−4p) x) · S₂ₖ₋₂(p x)²
//!   p       = 1 / (4 − 4^{1/(2k−1)})
//!
//! Error: O(x^{2k+1}).

use num_complex::Complex64;

use crate::error::{SimError, SimResult};
use crate::hamiltonian::{Hamiltonian, HamiltonianTerm};

/// Ordered term sequence for a product formula of the given `order`.
///
/// Order 1 returns the terms unchanged; even orders return the Suzuki
/// sequence for unit time. Order 0 and odd orders above 1 are rejected.
pub fn decompose(hamiltonian: &Hamiltonian, order: usize) -> SimResult<Vec<HamiltonianTerm>> {
    validate_order(order)?;
    if order == 1 {
        Ok(hamiltonian.terms().to_vec())
    } else {
        Ok(suzuki_decomposition(hamiltonian, 1.0, order / 2))
    }
}

/// Check that `order` is 1 or a positive even number.
pub fn validate_order(order: usize) -> SimResult<()> {
    if order == 1 || (order >= 2 && order % 2 == 0) {
        Ok(())
    } else {
        Err(SimError::UnsupportedTrotterOrder(order))
    }
}

/// Suzuki's recursive symmetric splitting of `exp(-i H time)` with
/// recursion depth `depth` (product-formula order `2 · depth`).
///
/// `depth == 0` yields an empty sequence.
pub fn suzuki_decomposition(
    hamiltonian: &Hamiltonian,
    time: f64,
    depth: usize,
) -> Vec<HamiltonianTerm> {
    match depth {
        0 => vec![],
        1 => {
            let half: Vec<HamiltonianTerm> = hamiltonian
                .terms()
                .iter()
                .map(|t| HamiltonianTerm {
                    coeff: t.coeff * Complex64::new(time / 2.0, 0.0),
                    pauli: t.pauli.clone(),
                })
                .collect();
            let mut seq = half.clone();
            seq.extend(half.into_iter().rev());
            seq
        }
        k => {
            let p = suzuki_weight(k);
            let outer = suzuki_decomposition(hamiltonian, p * time, k - 1);
            let middle = suzuki_decomposition(hamiltonian, (1.0 - 4.0 * p) * time, k - 1);

            let mut seq = Vec::with_capacity(4 * outer.len() + middle.len());
            seq.extend_from_slice(&outer);
            seq.extend_from_slice(&outer);
            seq.extend(middle);
            seq.extend_from_slice(&outer);
            seq.extend(outer);
            seq
        }
    }
}

/// `p_k = 1 / (4 − 4^{1/(2k−1)})`.
#[allow(clippy::cast_precision_loss)]
fn suzuki_weight(depth: usize) -> f64 {
    let exponent = 1.0 / (2.0 * depth as f64 - 1.0);
    1.0 / (4.0 - 4f64.powf(exponent))
}
