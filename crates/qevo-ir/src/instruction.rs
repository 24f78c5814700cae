//! Circuit instructions combining gates with operands.

use serde::{Deserialize, Serialize};

use crate::gate::{Gate, Pauli};
use crate::parameter::ParameterExpression;
use crate::qubit::QubitId;

/// A gate together with the qubits it acts on.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Instruction {
    /// The gate.
    pub gate: Gate,
    /// Qubits this instruction operates on.
    pub qubits: Vec<QubitId>,
}

impl Instruction {
    /// Create a gate instruction.
    pub fn gate(gate: Gate, qubits: impl IntoIterator<Item = QubitId>) -> Self {
        Self {
            gate,
            qubits: qubits.into_iter().collect(),
        }
    }

    /// Create a single-qubit gate instruction.
    pub fn single_qubit_gate(gate: Gate, qubit: QubitId) -> Self {
        Self::gate(gate, [qubit])
    }

    /// Create a two-qubit gate instruction.
    pub fn two_qubit_gate(gate: Gate, q1: QubitId, q2: QubitId) -> Self {
        Self::gate(gate, [q1, q2])
    }

    /// Create a multi-qubit Pauli rotation from `(qubit, axis)` pairs.
    pub fn pauli_rotation(
        axes: impl IntoIterator<Item = (QubitId, Pauli)>,
        angle: impl Into<ParameterExpression>,
    ) -> Self {
        let (qubits, paulis): (Vec<_>, Vec<_>) = axes.into_iter().unzip();
        Self {
            gate: Gate::PauliRotation {
                paulis,
                angle: angle.into(),
            },
            qubits,
        }
    }

    /// Get the name of the instruction.
    pub fn name(&self) -> &str {
        self.gate.name()
    }

    /// Copy of this instruction with every qubit moved up by `offset`.
    #[must_use]
    pub fn shifted(&self, offset: u32) -> Self {
        Self {
            gate: self.gate.clone(),
            qubits: self.qubits.iter().map(|q| q.shifted(offset)).collect(),
        }
    }

    /// Check if this is a Pauli rotation.
    pub fn is_pauli_rotation(&self) -> bool {
        matches!(self.gate, Gate::PauliRotation { .. })
    }
}
