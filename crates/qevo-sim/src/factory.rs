//! Circuit factory traits.
//!
//! A factory is configured once with a problem and a step policy, then
//! called repeatedly with an evolution time. Each call returns a fresh
//! concrete circuit.

use qevo_ir::Circuit;

use crate::error::SimResult;

/// Anything that produces circuits for a fixed system size.
pub trait CircuitFactory: Send + Sync {
    /// Number of system qubits (excluding any control qubit).
    fn qubit_count(&self) -> u32;
}

/// Produces `≈ exp(-i H t)` on `qubit_count()` qubits.
pub trait TimeEvolutionCircuitFactory: CircuitFactory {
    /// Concrete circuit for `evolution_time`.
    fn circuit(&self, evolution_time: f64) -> SimResult<Circuit>;
}

/// Produces the controlled evolution on `qubit_count() + 1` qubits with the
/// control on qubit 0.
pub trait ControlledTimeEvolutionCircuitFactory: CircuitFactory {
    /// Concrete controlled circuit for `evolution_time`.
    fn circuit(&self, evolution_time: f64) -> SimResult<Circuit>;
}

/// Produces `≈ exp(-i H_local t)` for the sub-Hamiltonian on `[idx0, idx1)`.
pub trait PartialTimeEvolutionCircuitFactory: Send + Sync {
    /// Concrete circuit over `idx1 − idx0` qubits.
    fn circuit(&self, idx0: u32, idx1: u32, evolution_time: f64) -> SimResult<Circuit>;
}
