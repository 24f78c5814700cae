//! Post-synthesis circuit transpilers.
//!
//! Every factory accepts an optional [`CircuitTranspiler`] that is applied to
//! each concrete circuit just before it is returned.

use std::fmt;
use std::sync::Arc;

use qevo_ir::{Circuit, Gate, IrResult};
use tracing::trace;

use crate::synthesis::append_pauli_rotation;

/// A rewrite applied to a concrete circuit.
pub trait CircuitTranspiler: Send + Sync {
    /// Rewrite `circuit`, preserving its width and unitary.
    fn transpile(&self, circuit: Circuit) -> IrResult<Circuit>;

    /// Name used in logs.
    fn name(&self) -> &str {
        "transpiler"
    }
}

/// Shared handle to a transpiler.
pub type SharedTranspiler = Arc<dyn CircuitTranspiler>;

/// Lowers every `PauliRotation` into basis changes, a CNOT ladder and one
/// `Rz`. Other gates pass through untouched.
#[derive(Debug, Clone, Copy, Default)]
pub struct PauliRotationDecomposer;

impl CircuitTranspiler for PauliRotationDecomposer {
    fn transpile(&self, circuit: Circuit) -> IrResult<Circuit> {
        let mut out = Circuit::with_size(circuit.name(), circuit.num_qubits());
        for inst in circuit.instructions() {
            match &inst.gate {
                Gate::PauliRotation { paulis, angle } => {
                    append_pauli_rotation(&mut out, &inst.qubits, paulis, angle)?;
                }
                _ => {
                    out.apply(inst.clone())?;
                }
            }
        }
        Ok(out)
    }

    fn name(&self) -> &str {
        "pauli_rotation_decomposer"
    }
}

/// Applies a list of transpilers in order.
#[derive(Clone, Default)]
pub struct SequentialTranspiler {
    stages: Vec<SharedTranspiler>,
}

impl SequentialTranspiler {
    /// Create an empty pipeline (the identity rewrite).
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a stage.
    #[must_use]
    pub fn then(mut self, stage: impl CircuitTranspiler + 'static) -> Self {
        self.stages.push(Arc::new(stage));
        self
    }
}

impl fmt::Debug for SequentialTranspiler {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list()
            .entries(self.stages.iter().map(|s| s.name()))
            .finish()
    }
}

impl CircuitTranspiler for SequentialTranspiler {
    fn transpile(&self, circuit: Circuit) -> IrResult<Circuit> {
        self.stages
            .iter()
            .try_fold(circuit, |circuit, stage| stage.transpile(circuit))
    }

    fn name(&self) -> &str {
        "sequential"
    }
}

/// Run `transpiler` on `circuit` if one is configured.
pub(crate) fn apply_transpiler(
    transpiler: Option<&SharedTranspiler>,
    circuit: Circuit,
) -> IrResult<Circuit> {
    match transpiler {
        Some(t) => {
            trace!(transpiler = t.name(), n_ops = circuit.num_ops(), "transpiling circuit");
            t.transpile(circuit)
        }
        None => Ok(circuit),
    }
}
