//! Error types for the sim crate.

use thiserror::Error;

/// Errors produced by Trotterized time-evolution synthesis.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum SimError {
    /// A Pauli term references a qubit index that is out of range.
    #[error("Pauli term references qubit {qubit} but circuit only has {n_qubits} qubits")]
    QubitOutOfRange {
        /// The offending qubit index.
        qubit: u32,
        /// Number of qubits in the target circuit.
        n_qubits: u32,
    },

    /// Circuit builder returned an error.
    #[error("Circuit IR error: {0}")]
    Ir(#[from] qevo_ir::IrError),

    /// n_trotter must be ≥ 1.
    #[error("n_trotter must be at least 1, got {0}")]
    InvalidSteps(usize),

    /// Only order 1 and positive even orders have a product formula.
    #[error("Unsupported Trotter order {0}: must be 1 or a positive even number")]
    UnsupportedTrotterOrder(usize),

    /// Exactly one of `time_step` and `n_trotter` must be supplied.
    #[error(
        "Exactly one of time_step and n_trotter must be specified \
         (time_step = {time_step:?}, n_trotter = {n_trotter:?})"
    )]
    StepPolicyConflict {
        /// The supplied time step, if any.
        time_step: Option<f64>,
        /// The supplied step count, if any.
        n_trotter: Option<usize>,
    },

    /// time_step must be a finite positive number.
    #[error("time_step must be greater than 0, got {0}")]
    InvalidTimeStep(f64),

    /// The requested time is not a whole number of steps.
    #[error("Evolution time {evolution_time} is not an integer multiple of time step {time_step}")]
    NonIntegerStep {
        /// Requested evolution time.
        evolution_time: f64,
        /// Configured time step.
        time_step: f64,
    },

    /// The requested time needs more repetitions than can be represented.
    #[error("Evolution time {evolution_time} needs too many steps of {time_step}")]
    StepCountOverflow {
        /// Requested evolution time.
        evolution_time: f64,
        /// Configured time step.
        time_step: f64,
    },

    /// A qubit subrange `[idx0, idx1)` is empty or exceeds the register.
    #[error("Invalid qubit subrange [{idx0}, {idx1}) for a {n_qubits}-qubit problem")]
    InvalidSubrange {
        /// First qubit of the range.
        idx0: u32,
        /// One past the last qubit of the range.
        idx1: u32,
        /// Number of state qubits in the problem.
        n_qubits: u32,
    },

    /// A Pauli label could not be parsed.
    #[error("Invalid Pauli label '{0}'")]
    InvalidPauliLabel(String),

    /// The same qubit appears twice in one Pauli term.
    #[error("Qubit {0} appears more than once in a Pauli term")]
    DuplicatePauliQubit(u32),

    /// Configuration file could not be read.
    #[error("Failed to read configuration: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration text could not be parsed.
    #[error("Failed to parse configuration: {0}")]
    ConfigParse(String),
}

/// Result type for simulation synthesis operations.
pub type SimResult<T> = Result<T, SimError>;
