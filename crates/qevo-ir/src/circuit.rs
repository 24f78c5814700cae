//! High-level circuit builder API.

use rustc_hash::FxHashSet;
use serde::{Deserialize, Serialize};

use crate::error::{IrError, IrResult};
use crate::gate::{Gate, Pauli};
use crate::instruction::Instruction;
use crate::parameter::{Parameter, ParameterExpression};
use crate::qubit::QubitId;

/// A quantum circuit of fixed width.
///
/// Instructions are stored in application order. The circuit may carry free
/// parameters in its rotation angles; [`Circuit::bind`] produces a concrete
/// copy.
///
/// Equality compares width and instructions only; the name is a label.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Circuit {
    /// Name of the circuit.
    name: String,
    /// Number of qubits.
    num_qubits: u32,
    /// Instructions in application order.
    instructions: Vec<Instruction>,
}

impl Circuit {
    /// Create a new empty circuit with no qubits.
    pub fn new(name: impl Into<String>) -> Self {
        Self::with_size(name, 0)
    }

    /// Create an empty circuit on `num_qubits` qubits.
    pub fn with_size(name: impl Into<String>, num_qubits: u32) -> Self {
        Self {
            name: name.into(),
            num_qubits,
            instructions: vec![],
        }
    }

    /// The same circuit under a different name.
    #[must_use]
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Append an instruction after validating its operands.
    pub fn apply(&mut self, instruction: Instruction) -> IrResult<&mut Self> {
        self.validate(&instruction)?;
        self.instructions.push(instruction);
        Ok(self)
    }

    // =========================================================================
    // Single-qubit gates
    // =========================================================================

    /// Apply Hadamard gate.
    pub fn h(&mut self, qubit: QubitId) -> IrResult<&mut Self> {
        self.apply(Instruction::single_qubit_gate(Gate::H, qubit))
    }

    /// Apply Pauli-X gate.
    pub fn x(&mut self, qubit: QubitId) -> IrResult<&mut Self> {
        self.apply(Instruction::single_qubit_gate(Gate::X, qubit))
    }

    /// Apply Pauli-Y gate.
    pub fn y(&mut self, qubit: QubitId) -> IrResult<&mut Self> {
        self.apply(Instruction::single_qubit_gate(Gate::Y, qubit))
    }

    /// Apply Pauli-Z gate.
    pub fn z(&mut self, qubit: QubitId) -> IrResult<&mut Self> {
        self.apply(Instruction::single_qubit_gate(Gate::Z, qubit))
    }

    /// Apply S gate.
    pub fn s(&mut self, qubit: QubitId) -> IrResult<&mut Self> {
        self.apply(Instruction::single_qubit_gate(Gate::S, qubit))
    }

    /// Apply S-dagger gate.
    pub fn sdg(&mut self, qubit: QubitId) -> IrResult<&mut Self> {
        self.apply(Instruction::single_qubit_gate(Gate::Sdg, qubit))
    }

    /// Apply Rx rotation gate.
    pub fn rx(
        &mut self,
        theta: impl Into<ParameterExpression>,
        qubit: QubitId,
    ) -> IrResult<&mut Self> {
        self.apply(Instruction::single_qubit_gate(Gate::Rx(theta.into()), qubit))
    }

    /// Apply Ry rotation gate.
    pub fn ry(
        &mut self,
        theta: impl Into<ParameterExpression>,
        qubit: QubitId,
    ) -> IrResult<&mut Self> {
        self.apply(Instruction::single_qubit_gate(Gate::Ry(theta.into()), qubit))
    }

    /// Apply Rz rotation gate.
    pub fn rz(
        &mut self,
        theta: impl Into<ParameterExpression>,
        qubit: QubitId,
    ) -> IrResult<&mut Self> {
        self.apply(Instruction::single_qubit_gate(Gate::Rz(theta.into()), qubit))
    }

    // =========================================================================
    // Multi-qubit gates
    // =========================================================================

    /// Apply CNOT (CX) gate.
    pub fn cx(&mut self, control: QubitId, target: QubitId) -> IrResult<&mut Self> {
        self.apply(Instruction::two_qubit_gate(Gate::CX, control, target))
    }

    /// Apply `exp(-iθP/2)` for the Pauli product given as `(qubit, axis)` pairs.
    pub fn pauli_rotation(
        &mut self,
        axes: impl IntoIterator<Item = (QubitId, Pauli)>,
        theta: impl Into<ParameterExpression>,
    ) -> IrResult<&mut Self> {
        self.apply(Instruction::pauli_rotation(axes, theta))
    }

    // =========================================================================
    // Accessors
    // =========================================================================

    /// Get the circuit name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Get the number of qubits.
    pub fn num_qubits(&self) -> u32 {
        self.num_qubits
    }

    /// Get the number of instructions.
    pub fn num_ops(&self) -> usize {
        self.instructions.len()
    }

    /// Check if the circuit has no instructions.
    pub fn is_empty(&self) -> bool {
        self.instructions.is_empty()
    }

    /// Instructions in application order.
    pub fn instructions(&self) -> &[Instruction] {
        &self.instructions
    }

    /// Get the circuit depth (longest chain of instructions sharing qubits).
    pub fn depth(&self) -> usize {
        let mut frontier = vec![0usize; self.num_qubits as usize];
        for inst in &self.instructions {
            let layer = inst
                .qubits
                .iter()
                .map(|q| frontier[q.0 as usize])
                .max()
                .unwrap_or(0)
                + 1;
            for q in &inst.qubits {
                frontier[q.0 as usize] = layer;
            }
        }
        frontier.into_iter().max().unwrap_or(0)
    }

    // =========================================================================
    // Parameters
    // =========================================================================

    /// Check if any instruction still holds a free parameter.
    pub fn is_parameterized(&self) -> bool {
        self.instructions.iter().any(|i| i.gate.is_parameterized())
    }

    /// Free parameters in first-use order.
    pub fn parameters(&self) -> Vec<Parameter> {
        let mut seen = FxHashSet::default();
        let mut params = vec![];
        for inst in &self.instructions {
            if let Some(angle) = inst.gate.angle() {
                for p in angle.parameters() {
                    if seen.insert(p.clone()) {
                        params.push(p.clone());
                    }
                }
            }
        }
        params
    }

    /// Copy of this circuit with `name` bound to `value` everywhere.
    #[must_use]
    pub fn bind(&self, name: &str, value: f64) -> Self {
        Self {
            name: self.name.clone(),
            num_qubits: self.num_qubits,
            instructions: self
                .instructions
                .iter()
                .map(|inst| Instruction {
                    gate: inst.gate.bind(name, value),
                    qubits: inst.qubits.clone(),
                })
                .collect(),
        }
    }

    /// Bind several parameters at once.
    #[must_use]
    pub fn bind_all<'a>(&self, values: impl IntoIterator<Item = (&'a str, f64)>) -> Self {
        values
            .into_iter()
            .fold(self.clone(), |circuit, (name, value)| circuit.bind(name, value))
    }

    /// Fail with the first free parameter, if any.
    pub fn ensure_bound(&self) -> IrResult<()> {
        match self.parameters().into_iter().next() {
            Some(p) => Err(IrError::UnboundParameter(p.name().to_string())),
            None => Ok(()),
        }
    }

    // =========================================================================
    // Composition
    // =========================================================================

    /// The adjoint circuit: instructions reversed, each gate inverted.
    #[must_use]
    pub fn inverse(&self) -> Self {
        Self {
            name: self.name.clone(),
            num_qubits: self.num_qubits,
            instructions: self
                .instructions
                .iter()
                .rev()
                .map(|inst| Instruction {
                    gate: inst.gate.inverse(),
                    qubits: inst.qubits.clone(),
                })
                .collect(),
        }
    }

    /// Append every instruction of `other`, which must have the same width.
    pub fn extend(&mut self, other: &Circuit) -> IrResult<&mut Self> {
        if other.num_qubits != self.num_qubits {
            return Err(IrError::WidthMismatch {
                expected: self.num_qubits,
                got: other.num_qubits,
            });
        }
        self.instructions.extend(other.instructions.iter().cloned());
        Ok(self)
    }

    /// Append `other` with its qubits moved up by `offset`.
    ///
    /// The shifted circuit must fit inside this one.
    pub fn extend_shifted(&mut self, other: &Circuit, offset: u32) -> IrResult<&mut Self> {
        if other.num_qubits + offset > self.num_qubits {
            return Err(IrError::WidthMismatch {
                expected: self.num_qubits,
                got: other.num_qubits + offset,
            });
        }
        self.instructions
            .extend(other.instructions.iter().map(|inst| inst.shifted(offset)));
        Ok(self)
    }

    /// This circuit repeated `times` times back to back.
    pub fn repeated(&self, times: usize) -> IrResult<Self> {
        let num_ops = self.instructions.len();
        let overflow = || IrError::RepetitionOverflow { num_ops, times };
        let capacity = num_ops.checked_mul(times).ok_or_else(overflow)?;
        let mut instructions = Vec::new();
        instructions
            .try_reserve_exact(capacity)
            .map_err(|_| overflow())?;
        for _ in 0..times {
            instructions.extend(self.instructions.iter().cloned());
        }
        Ok(Self {
            name: self.name.clone(),
            num_qubits: self.num_qubits,
            instructions,
        })
    }

    // =========================================================================
    // Serialization
    // =========================================================================

    /// Serialize to a JSON string.
    pub fn to_json(&self) -> IrResult<String> {
        Ok(serde_json::to_string(self)?)
    }

    /// Deserialize from a JSON string, re-validating every instruction.
    pub fn from_json(json: &str) -> IrResult<Self> {
        let raw: Circuit = serde_json::from_str(json)?;
        for inst in &raw.instructions {
            raw.validate(inst)?;
        }
        Ok(raw)
    }

    // ---- Internal helpers ----

    #[allow(clippy::cast_possible_truncation)]
    fn validate(&self, instruction: &Instruction) -> IrResult<()> {
        let gate_name = instruction.gate.name();

        if matches!(&instruction.gate, Gate::PauliRotation { paulis, .. } if paulis.is_empty()) {
            return Err(IrError::EmptyPauliRotation);
        }

        let expected = instruction.gate.num_qubits();
        let got = instruction.qubits.len() as u32;
        if expected != got {
            return Err(IrError::QubitCountMismatch {
                gate_name: gate_name.to_string(),
                expected,
                got,
            });
        }

        let mut seen = FxHashSet::default();
        for &qubit in &instruction.qubits {
            if qubit.0 >= self.num_qubits {
                return Err(IrError::QubitNotFound {
                    qubit,
                    gate_name: Some(gate_name.to_string()),
                });
            }
            if !seen.insert(qubit) {
                return Err(IrError::DuplicateQubit {
                    qubit,
                    gate_name: Some(gate_name.to_string()),
                });
            }
        }
        Ok(())
    }
}

impl PartialEq for Circuit {
    fn eq(&self, other: &Self) -> bool {
        self.num_qubits == other.num_qubits && self.instructions == other.instructions
    }
}
