//! Parametric evolution templates.

use std::fmt;

use qevo_ir::{Circuit, Parameter, ParameterExpression};

/// Name of the free evolution-time parameter carried by every template.
pub const TIME_PARAMETER: &str = "t";

/// A circuit whose only free parameter is the evolution time `t`.
///
/// Every rotation angle is `a · t` for a constant `a` fixed at synthesis.
/// Templates are immutable; [`EvolutionTemplate::bind`] returns a fresh
/// concrete circuit on each call.
#[derive(Debug, Clone, PartialEq)]
pub struct EvolutionTemplate {
    circuit: Circuit,
}

impl EvolutionTemplate {
    pub(crate) fn new(circuit: Circuit) -> Self {
        Self { circuit }
    }

    /// The underlying parametric circuit.
    pub fn circuit(&self) -> &Circuit {
        &self.circuit
    }

    /// Circuit width.
    pub fn num_qubits(&self) -> u32 {
        self.circuit.num_qubits()
    }

    /// Number of rotations per binding.
    pub fn num_ops(&self) -> usize {
        self.circuit.num_ops()
    }

    /// Concrete circuit for `t = evolution_time`.
    pub fn bind(&self, evolution_time: f64) -> Circuit {
        self.circuit.bind(TIME_PARAMETER, evolution_time)
    }
}

impl fmt::Display for EvolutionTemplate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "EvolutionTemplate({} qubits, {} ops)",
            self.num_qubits(),
            self.num_ops()
        )
    }
}

/// The angle expression `coefficient · t`.
pub(crate) fn time_angle(coefficient: f64) -> ParameterExpression {
    ParameterExpression::linear(Parameter::new(TIME_PARAMETER), coefficient)
}
