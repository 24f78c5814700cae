//! Quantum gate types.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::parameter::ParameterExpression;

/// Single-qubit Pauli axis of a multi-qubit rotation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Pauli {
    /// Pauli-X.
    X,
    /// Pauli-Y.
    Y,
    /// Pauli-Z.
    Z,
}

impl Pauli {
    /// Conventional integer id (X = 1, Y = 2, Z = 3).
    pub fn id(self) -> u8 {
        match self {
            Pauli::X => 1,
            Pauli::Y => 2,
            Pauli::Z => 3,
        }
    }

    /// Upper-case label character.
    pub fn as_char(self) -> char {
        match self {
            Pauli::X => 'X',
            Pauli::Y => 'Y',
            Pauli::Z => 'Z',
        }
    }
}

impl fmt::Display for Pauli {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_char())
    }
}

/// Gates understood by the IR.
///
/// Rotation conventions: `Rz(θ) = exp(-iθZ/2)` and
/// `PauliRotation(P, θ) = exp(-iθP/2)` where `P` is the tensor product of
/// `paulis` on the instruction's qubits, in the same order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Gate {
    /// Hadamard gate.
    H,
    /// Pauli-X gate.
    X,
    /// Pauli-Y gate.
    Y,
    /// Pauli-Z gate.
    Z,
    /// S gate (sqrt(Z)).
    S,
    /// S-dagger gate.
    Sdg,
    /// Controlled-X (CNOT) gate.
    CX,
    /// Rotation around X axis.
    Rx(ParameterExpression),
    /// Rotation around Y axis.
    Ry(ParameterExpression),
    /// Rotation around Z axis.
    Rz(ParameterExpression),
    /// Rotation generated by a multi-qubit Pauli product.
    PauliRotation {
        /// One axis per target qubit.
        paulis: Vec<Pauli>,
        /// Rotation angle.
        angle: ParameterExpression,
    },
}

impl Gate {
    /// Get the name of this gate.
    #[inline]
    pub fn name(&self) -> &'static str {
        match self {
            Gate::H => "h",
            Gate::X => "x",
            Gate::Y => "y",
            Gate::Z => "z",
            Gate::S => "s",
            Gate::Sdg => "sdg",
            Gate::CX => "cx",
            Gate::Rx(_) => "rx",
            Gate::Ry(_) => "ry",
            Gate::Rz(_) => "rz",
            Gate::PauliRotation { .. } => "pauli_rotation",
        }
    }

    /// Get the number of qubits this gate operates on.
    #[inline]
    #[allow(clippy::cast_possible_truncation)]
    pub fn num_qubits(&self) -> u32 {
        match self {
            Gate::H
            | Gate::X
            | Gate::Y
            | Gate::Z
            | Gate::S
            | Gate::Sdg
            | Gate::Rx(_)
            | Gate::Ry(_)
            | Gate::Rz(_) => 1,
            Gate::CX => 2,
            Gate::PauliRotation { paulis, .. } => paulis.len() as u32,
        }
    }

    /// The angle of a rotation gate.
    pub fn angle(&self) -> Option<&ParameterExpression> {
        match self {
            Gate::Rx(p) | Gate::Ry(p) | Gate::Rz(p) | Gate::PauliRotation { angle: p, .. } => {
                Some(p)
            }
            _ => None,
        }
    }

    /// Check if this gate still holds a free parameter.
    pub fn is_parameterized(&self) -> bool {
        self.angle().is_some_and(ParameterExpression::is_symbolic)
    }

    /// Copy of this gate with `name` bound to `value`.
    #[must_use]
    pub fn bind(&self, name: &str, value: f64) -> Self {
        self.map_angle(|a| a.bind(name, value))
    }

    /// The adjoint gate.
    ///
    /// - H, X, Y, Z, CX are self-inverse
    /// - S† = Sdg, Sdg† = S
    /// - rotations negate their angle
    #[must_use]
    pub fn inverse(&self) -> Self {
        match self {
            Gate::S => Gate::Sdg,
            Gate::Sdg => Gate::S,
            _ => self.map_angle(|a| -a.clone()),
        }
    }

    fn map_angle(&self, f: impl FnOnce(&ParameterExpression) -> ParameterExpression) -> Self {
        match self {
            Gate::Rx(p) => Gate::Rx(f(p)),
            Gate::Ry(p) => Gate::Ry(f(p)),
            Gate::Rz(p) => Gate::Rz(f(p)),
            Gate::PauliRotation { paulis, angle } => Gate::PauliRotation {
                paulis: paulis.clone(),
                angle: f(angle),
            },
            _ => self.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f64::consts::PI;

    #[test]
    fn test_gate_properties() {
        assert_eq!(Gate::H.num_qubits(), 1);
        assert_eq!(Gate::CX.num_qubits(), 2);
        let rot = Gate::PauliRotation {
            paulis: vec![Pauli::X, Pauli::Y, Pauli::Z],
            angle: ParameterExpression::constant(0.1),
        };
        assert_eq!(rot.num_qubits(), 3);
        assert_eq!(rot.name(), "pauli_rotation");

        assert!(!Gate::H.is_parameterized());
        assert!(!Gate::Rx(ParameterExpression::constant(PI)).is_parameterized());
        assert!(Gate::Rx(ParameterExpression::symbol("theta")).is_parameterized());
    }

    #[test]
    fn test_inverse() {
        assert_eq!(Gate::S.inverse(), Gate::Sdg);
        assert_eq!(Gate::Sdg.inverse(), Gate::S);
        assert_eq!(Gate::H.inverse(), Gate::H);

        let rz = Gate::Rz(ParameterExpression::constant(PI / 4.0)).inverse();
        assert_eq!(rz.angle().and_then(ParameterExpression::as_f64), Some(-PI / 4.0));
    }

    #[test]
    fn test_bind_pauli_rotation() {
        let rot = Gate::PauliRotation {
            paulis: vec![Pauli::Z, Pauli::Z],
            angle: ParameterExpression::symbol("t") * 0.5,
        };
        let bound = rot.bind("t", 4.0);
        assert!(!bound.is_parameterized());
        assert_eq!(bound.angle().and_then(ParameterExpression::as_f64), Some(2.0));
    }

    #[test]
    fn test_pauli_ids() {
        assert_eq!(Pauli::X.id(), 1);
        assert_eq!(Pauli::Y.id(), 2);
        assert_eq!(Pauli::Z.id(), 3);
        assert_eq!(Pauli::Y.to_string(), "Y");
    }
}
