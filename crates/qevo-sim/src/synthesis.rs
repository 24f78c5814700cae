//! Pauli-rotation lowering.
//!
//! Implements the standard gate synthesis for
//!
//!   PauliRotation(P, θ) = exp(-i θ/2 · P)
//!
//! where P is a tensor product of Pauli operators, using the circuit identity:
//!
//!   exp(-i θ/2 · Z⊗Z⊗...⊗Z) = CNOT_ladder† · Rz(θ) · CNOT_ladder
//!
//! with basis rotations applied before/after to handle X and Y factors:
//!   X → H · Z · H
//!   Y → Sdg · H · Z · H · S
//!   Z → identity
//!
//! Gate count per rotation: 2·(k-1) CX + basis gates + 1 Rz,
//! where k = number of qubits in the rotation.

use qevo_ir::{Circuit, IrError, IrResult, Pauli, ParameterExpression, QubitId};

/// Append the gate sequence for `exp(-i θ/2 · P)` to `circuit`.
///
/// `qubits` and `paulis` are parallel: `paulis[j]` acts on `qubits[j]`.
/// The angle is carried through unchanged, so symbolic angles stay symbolic.
#[allow(clippy::cast_possible_truncation)]
pub fn append_pauli_rotation(
    circuit: &mut Circuit,
    qubits: &[QubitId],
    paulis: &[Pauli],
    angle: &ParameterExpression,
) -> IrResult<()> {
    let Some(&target) = qubits.last() else {
        return Err(IrError::EmptyPauliRotation);
    };
    if qubits.len() != paulis.len() {
        return Err(IrError::QubitCountMismatch {
            gate_name: "pauli_rotation".into(),
            expected: paulis.len() as u32,
            got: qubits.len() as u32,
        });
    }

    // Diagonalise each factor into Z.
    basis_change(circuit, qubits, paulis, false)?;

    // Collapse the parity onto the last qubit.
    cnot_ladder(circuit, qubits)?;

    circuit.rz(angle.clone(), target)?;

    cnot_ladder_reverse(circuit, qubits)?;
    basis_change(circuit, qubits, paulis, true)?;

    Ok(())
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Apply basis-change gates for each Pauli factor.
///
/// For the forward pass (`undo = false`):
///   X → H
///   Y → Sdg · H
///   Z → (nothing)
///
/// For the reverse pass (`undo = true`):
///   X → H  (H is self-inverse)
///   Y → H · S
///   Z → (nothing)
fn basis_change(
    circuit: &mut Circuit,
    qubits: &[QubitId],
    paulis: &[Pauli],
    undo: bool,
) -> IrResult<()> {
    for (&qid, &op) in qubits.iter().zip(paulis) {
        match (op, undo) {
            (Pauli::X, _) => {
                circuit.h(qid)?;
            }
            (Pauli::Y, false) => {
                circuit.sdg(qid)?.h(qid)?;
            }
            (Pauli::Y, true) => {
                circuit.h(qid)?.s(qid)?;
            }
            (Pauli::Z, _) => {}
        }
    }
    Ok(())
}

/// Apply a forward CNOT ladder: CX(q[0],q[1]), CX(q[1],q[2]), …, CX(q[k-2], q[k-1]).
fn cnot_ladder(circuit: &mut Circuit, qubits: &[QubitId]) -> IrResult<()> {
    for window in qubits.windows(2) {
        circuit.cx(window[0], window[1])?;
    }
    Ok(())
}

/// Apply the CNOT ladder backwards, undoing [`cnot_ladder`].
fn cnot_ladder_reverse(circuit: &mut Circuit, qubits: &[QubitId]) -> IrResult<()> {
    for window in qubits.windows(2).rev() {
        circuit.cx(window[0], window[1])?;
    }
    Ok(())
}
