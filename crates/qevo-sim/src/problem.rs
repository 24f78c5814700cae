//! Qubit Hamiltonian problem input.

use serde::{Deserialize, Serialize};

use crate::error::{SimError, SimResult};
use crate::hamiltonian::Hamiltonian;

/// A Hamiltonian on a register of fixed size.
///
/// The register may be wider than the Hamiltonian's support; idle qubits
/// are kept so every generated circuit has `n_state_qubits` system qubits.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QubitHamiltonianInput {
    n_state_qubits: u32,
    hamiltonian: Hamiltonian,
}

impl QubitHamiltonianInput {
    /// Create a problem, rejecting terms that reach beyond the register.
    pub fn new(n_state_qubits: u32, hamiltonian: Hamiltonian) -> SimResult<Self> {
        if let Some(qubit) = hamiltonian.min_qubits().checked_sub(1) {
            if qubit >= n_state_qubits {
                return Err(SimError::QubitOutOfRange {
                    qubit,
                    n_qubits: n_state_qubits,
                });
            }
        }
        Ok(Self {
            n_state_qubits,
            hamiltonian,
        })
    }

    /// Number of system qubits.
    pub fn n_state_qubits(&self) -> u32 {
        self.n_state_qubits
    }

    /// The problem Hamiltonian.
    pub fn hamiltonian(&self) -> &Hamiltonian {
        &self.hamiltonian
    }

    /// Check that `[idx0, idx1)` is a non-empty window of the register.
    pub fn check_subrange(&self, idx0: u32, idx1: u32) -> SimResult<()> {
        if idx0 >= idx1 || idx1 > self.n_state_qubits {
            return Err(SimError::InvalidSubrange {
                idx0,
                idx1,
                n_qubits: self.n_state_qubits,
            });
        }
        Ok(())
    }

    /// The sub-problem on qubits `[idx0, idx1)`.
    ///
    /// Keeps the terms acting only inside the window (identity terms
    /// included) and relabels qubit `i` as `i − idx0`.
    pub fn local_hamiltonian_input(&self, idx0: u32, idx1: u32) -> SimResult<Self> {
        self.check_subrange(idx0, idx1)?;
        Ok(Self {
            n_state_qubits: idx1 - idx0,
            hamiltonian: self.hamiltonian.restricted(idx0, idx1),
        })
    }
}
