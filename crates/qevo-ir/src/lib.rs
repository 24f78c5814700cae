//! Parametric circuit representation for qevo.
//!
//! This crate provides the data structures that time-evolution synthesis
//! emits: fixed-width circuits made of single-qubit gates, CNOTs and
//! multi-qubit Pauli rotations whose angles may be linear functions of free
//! parameters.
//!
//! # Core Components
//!
//! - **Qubits**: [`QubitId`] for addressing qubits `0..n`
//! - **Gates**: [`Gate`] for the supported gate set and [`Pauli`] for rotation axes
//! - **Parameters**: [`ParameterExpression`] for affine angle expressions
//! - **Instructions**: [`Instruction`] combining gates with their operands
//! - **Circuit**: [`Circuit`] ordered instruction list with a builder API
//!
//! # Example: Parametric Pauli Rotation
//!
//! ```rust
//! use qevo_ir::{Circuit, ParameterExpression, Pauli, QubitId};
//!
//! let mut circuit = Circuit::with_size("evolution", 2);
//! circuit
//!     .pauli_rotation(
//!         [(QubitId(0), Pauli::X), (QubitId(1), Pauli::X)],
//!         ParameterExpression::symbol("t") * 4.0,
//!     )
//!     .unwrap();
//!
//! assert!(circuit.is_parameterized());
//! let bound = circuit.bind("t", 0.25);
//! assert!(!bound.is_parameterized());
//! ```
//!
//! # Supported Gates
//!
//! | Gate | Qubits | Description |
//! |------|--------|-------------|
//! | `H` | 1 | Hadamard gate |
//! | `X`, `Y`, `Z` | 1 | Pauli gates |
//! | `S`, `Sdg` | 1 | S and S-dagger gates |
//! | `Rx`, `Ry`, `Rz` | 1 | Rotation gates, `R(θ) = exp(-iθσ/2)` |
//! | `CX` | 2 | Controlled-NOT (CNOT) |
//! | `PauliRotation` | n | `exp(-iθP/2)` for a Pauli product `P` |

pub mod circuit;
pub mod error;
pub mod gate;
pub mod instruction;
pub mod parameter;
pub mod qubit;

pub use circuit::Circuit;
pub use error::{IrError, IrResult};
pub use gate::{Gate, Pauli};
pub use instruction::Instruction;
pub use parameter::{Parameter, ParameterExpression};
pub use qubit::QubitId;
