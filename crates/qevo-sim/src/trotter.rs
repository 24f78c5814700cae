//! Trotter-Suzuki product-formula synthesis.
//!
//! Builds parametric templates approximating `exp(-i H t)` by splitting the
//! evolution into `n_trotter` slices, each a product formula of the chosen
//! order (see [`crate::decomposition`]).
//!
//! # Plain evolution
//!
//!   exp(-i H t) ≈ [∏_j exp(-i a_j P_j t/n)]^n
//!
//! Each non-identity entry becomes `PauliRotation(P_j, 2·Re(a_j)/n · t)`;
//! identity entries are a global phase and emit nothing.
//!
//! # Controlled evolution
//!
//! Qubit 0 is the control and the system occupies qubits `1..=n_qubits`.
//! For θ = Re(a_j)/n · t,
//!
//!   |0⟩⟨0| ⊗ I + |1⟩⟨1| ⊗ e^{-iθP} = PauliRotation(Z⊗P, −θ) · PauliRotation(I⊗P, θ)
//!
//! up to a global phase, so each non-identity entry emits the `I⊗P`
//! rotation followed by the `Z⊗P` rotation. An identity entry `a·I` becomes a
//! control-dependent phase, emitted as `Rz(−θ)` on the control.

use qevo_ir::{Circuit, Pauli, QubitId};
use tracing::debug;

use crate::decomposition::decompose;
use crate::error::{SimError, SimResult};
use crate::hamiltonian::{Hamiltonian, HamiltonianTerm};
use crate::template::{EvolutionTemplate, time_angle};

/// Index of the control qubit in controlled templates.
pub const CONTROL_QUBIT: u32 = 0;

/// Trotter product-formula template synthesiser.
#[derive(Debug, Clone)]
pub struct TrotterEvolution {
    hamiltonian: Hamiltonian,
    /// Number of Trotter slices.
    n_trotter: usize,
    /// Product-formula order: 1 or a positive even number.
    order: usize,
    /// Number of system qubits; if None, inferred from the Hamiltonian.
    n_qubits: Option<u32>,
}

impl TrotterEvolution {
    /// Construct a first-order synthesiser.
    ///
    /// # Arguments
    /// * `hamiltonian` — the Hamiltonian H = Σ c_k P_k
    /// * `n_trotter`  — number of Trotter slices (higher → more accurate)
    pub fn new(hamiltonian: Hamiltonian, n_trotter: usize) -> Self {
        Self {
            hamiltonian,
            n_trotter,
            order: 1,
            n_qubits: None,
        }
    }

    /// Set the product-formula order (1 or a positive even number).
    #[must_use]
    pub fn with_order(mut self, order: usize) -> Self {
        self.order = order;
        self
    }

    /// Override the system width (number of qubits).
    ///
    /// By default the width is inferred from the highest qubit index in the
    /// Hamiltonian. Use this method to pad idle qubits.
    #[must_use]
    pub fn with_n_qubits(mut self, n: u32) -> Self {
        self.n_qubits = Some(n);
        self
    }

    /// Synthesise the uncontrolled template over `n_qubits` qubits.
    pub fn build(&self) -> SimResult<EvolutionTemplate> {
        let n_qubits = self.effective_n_qubits();
        self.check_width(n_qubits)?;
        let sequence = self.sequence(&self.hamiltonian)?;
        #[allow(clippy::cast_precision_loss)]
        let scale = 2.0 / self.n_trotter as f64;

        debug!(
            n_terms = self.hamiltonian.n_terms(),
            sequence_len = sequence.len(),
            n_trotter = self.n_trotter,
            order = self.order,
            n_qubits,
            "synthesising Trotter evolution template"
        );

        let mut step = Circuit::with_size("trotter_step", n_qubits);
        for term in &sequence {
            if term.pauli.is_identity() {
                continue;
            }
            step.pauli_rotation(term.pauli.rotation_axes(), time_angle(scale * term.coeff.re))?;
        }

        Ok(EvolutionTemplate::new(
            step.repeated(self.n_trotter)?.with_name("trotter"),
        ))
    }

    /// Synthesise the controlled template over `n_qubits + 1` qubits.
    pub fn build_controlled(&self) -> SimResult<EvolutionTemplate> {
        let n_qubits = self.effective_n_qubits();
        let width = n_qubits + 1;
        self.check_width(n_qubits)?;
        let shifted = self.hamiltonian.shifted(1);
        let sequence = self.sequence(&shifted)?;
        #[allow(clippy::cast_precision_loss)]
        let scale = 1.0 / self.n_trotter as f64;

        debug!(
            n_terms = self.hamiltonian.n_terms(),
            sequence_len = sequence.len(),
            n_trotter = self.n_trotter,
            order = self.order,
            n_qubits = width,
            "synthesising controlled Trotter evolution template"
        );

        let mut step = Circuit::with_size("controlled_trotter_step", width);
        for term in &sequence {
            let angle = scale * term.coeff.re;
            if term.pauli.is_identity() {
                step.rz(time_angle(-angle), QubitId(CONTROL_QUBIT))?;
            } else {
                let controlled = term.pauli.with_op(CONTROL_QUBIT, Pauli::Z)?;
                step.pauli_rotation(term.pauli.rotation_axes(), time_angle(angle))?
                    .pauli_rotation(controlled.rotation_axes(), time_angle(-angle))?;
            }
        }

        Ok(EvolutionTemplate::new(
            step.repeated(self.n_trotter)?.with_name("controlled_trotter"),
        ))
    }

    /// Number of system qubits the templates act on (excluding any control).
    pub fn effective_n_qubits(&self) -> u32 {
        self.n_qubits.unwrap_or_else(|| self.hamiltonian.min_qubits())
    }

    /// The Hamiltonian being evolved.
    pub fn hamiltonian(&self) -> &Hamiltonian {
        &self.hamiltonian
    }

    // ---- Internal helpers ----

    /// Validate settings and produce one slice's term sequence.
    fn sequence(&self, hamiltonian: &Hamiltonian) -> SimResult<Vec<HamiltonianTerm>> {
        if self.n_trotter == 0 {
            return Err(SimError::InvalidSteps(0));
        }
        decompose(hamiltonian, self.order)
    }

    /// Reject terms that reach beyond the system register.
    fn check_width(&self, n_qubits: u32) -> SimResult<()> {
        match self.hamiltonian.min_qubits().checked_sub(1) {
            Some(qubit) if qubit >= n_qubits => Err(SimError::QubitOutOfRange { qubit, n_qubits }),
            _ => Ok(()),
        }
    }
}
