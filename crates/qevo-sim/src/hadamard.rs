//! Hadamard-test circuits.
//!
//! Wrapping a controlled unitary `C-U` (control on qubit 0) as
//!
//!   H(0) · [pre] · C-U · [post] · [S†(0)] · H(0)
//!
//! makes `⟨Z₀⟩` equal `Re⟨ψ|U|ψ⟩`, or `Im⟨ψ|U|ψ⟩` when the `S†` is present.

use std::fmt;

use qevo_ir::{Circuit, QubitId};

use crate::error::SimResult;
use crate::factory::{CircuitFactory, ControlledTimeEvolutionCircuitFactory};
use crate::transpile::{SharedTranspiler, apply_transpiler};
use crate::trotter::CONTROL_QUBIT;

/// Sandwich `inner` between Hadamards on the control qubit.
///
/// `pre` and `post` are appended before and after `inner` and must have the
/// same width. When `test_real` is false an `S†` on qubit 0 precedes the
/// closing Hadamard.
pub fn construct_hadamard_circuit(
    inner: &Circuit,
    test_real: bool,
    pre: Option<&Circuit>,
    post: Option<&Circuit>,
) -> SimResult<Circuit> {
    let control = QubitId(CONTROL_QUBIT);
    let mut circuit = Circuit::with_size("hadamard_test", inner.num_qubits());
    circuit.h(control)?;
    if let Some(pre) = pre {
        circuit.extend(pre)?;
    }
    circuit.extend(inner)?;
    if let Some(post) = post {
        circuit.extend(post)?;
    }
    if !test_real {
        circuit.sdg(control)?;
    }
    circuit.h(control)?;
    Ok(circuit)
}

/// Hadamard-test circuits around a controlled time-evolution factory.
pub struct HadamardTestCircuitFactory<F> {
    test_real: bool,
    inner: F,
    transpiler: Option<SharedTranspiler>,
}

impl<F: ControlledTimeEvolutionCircuitFactory> HadamardTestCircuitFactory<F> {
    /// Wrap `inner`; `test_real` selects the real or imaginary part.
    pub fn new(inner: F, test_real: bool) -> Self {
        Self {
            test_real,
            inner,
            transpiler: None,
        }
    }

    /// Transpile every produced circuit.
    #[must_use]
    pub fn with_transpiler(mut self, transpiler: SharedTranspiler) -> Self {
        self.transpiler = Some(transpiler);
        self
    }

    /// Whether the real part is measured.
    pub fn test_real(&self) -> bool {
        self.test_real
    }

    /// The wrapped controlled factory.
    pub fn inner(&self) -> &F {
        &self.inner
    }

    /// Hadamard-test circuit for `evolution_time`.
    pub fn circuit(&self, evolution_time: f64) -> SimResult<Circuit> {
        let controlled = self.inner.circuit(evolution_time)?;
        let circuit = construct_hadamard_circuit(&controlled, self.test_real, None, None)?;
        Ok(apply_transpiler(self.transpiler.as_ref(), circuit)?)
    }
}

impl<F: ControlledTimeEvolutionCircuitFactory> CircuitFactory for HadamardTestCircuitFactory<F> {
    fn qubit_count(&self) -> u32 {
        self.inner.qubit_count()
    }
}

impl<F: fmt::Debug> fmt::Debug for HadamardTestCircuitFactory<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HadamardTestCircuitFactory")
            .field("test_real", &self.test_real)
            .field("inner", &self.inner)
            .finish_non_exhaustive()
    }
}
