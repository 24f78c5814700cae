//! Sub-register Trotter evolution with per-range template caching.

use std::fmt;
use std::sync::{Arc, Mutex, PoisonError};

use qevo_ir::Circuit;
use rustc_hash::FxHashMap;
use tracing::{debug, trace};

use crate::error::{SimError, SimResult};
use crate::factory::PartialTimeEvolutionCircuitFactory;
use crate::problem::QubitHamiltonianInput;
use crate::template::EvolutionTemplate;
use crate::transpile::{SharedTranspiler, apply_transpiler};
use crate::trotter::TrotterEvolution;

/// First-order Trotter evolution of the sub-Hamiltonian on `[idx0, idx1)`.
///
/// Templates are synthesised on first request for a range and cached on the
/// instance, so two factories never share entries. The cache lock is held
/// during synthesis, so concurrent requests for the same range build it once.
pub struct TrotterPartialTimeEvolution {
    problem: QubitHamiltonianInput,
    n_trotter: usize,
    cache: Mutex<FxHashMap<(u32, u32), Arc<EvolutionTemplate>>>,
    transpiler: Option<SharedTranspiler>,
}

impl TrotterPartialTimeEvolution {
    /// Create a factory over `problem` with `n_trotter` slices per circuit.
    pub fn new(problem: QubitHamiltonianInput, n_trotter: usize) -> SimResult<Self> {
        if n_trotter == 0 {
            return Err(SimError::InvalidSteps(n_trotter));
        }
        Ok(Self {
            problem,
            n_trotter,
            cache: Mutex::new(FxHashMap::default()),
            transpiler: None,
        })
    }

    /// Transpile every produced circuit.
    #[must_use]
    pub fn with_transpiler(mut self, transpiler: SharedTranspiler) -> Self {
        self.transpiler = Some(transpiler);
        self
    }

    /// The full problem.
    pub fn problem(&self) -> &QubitHamiltonianInput {
        &self.problem
    }

    /// Number of Trotter slices.
    pub fn n_trotter(&self) -> usize {
        self.n_trotter
    }

    /// Template for the range `[idx0, idx1)`, synthesised on first use.
    pub fn get_partial(&self, idx0: u32, idx1: u32) -> SimResult<Arc<EvolutionTemplate>> {
        self.problem.check_subrange(idx0, idx1)?;

        let mut cache = self.cache.lock().unwrap_or_else(PoisonError::into_inner);
        if let Some(template) = cache.get(&(idx0, idx1)) {
            trace!(idx0, idx1, "partial template cache hit");
            return Ok(Arc::clone(template));
        }

        let local = self.problem.local_hamiltonian_input(idx0, idx1)?;
        debug!(
            idx0,
            idx1,
            n_terms = local.hamiltonian().n_terms(),
            "synthesising partial template"
        );
        let template = TrotterEvolution::new(local.hamiltonian().clone(), self.n_trotter)
            .with_n_qubits(local.n_state_qubits())
            .build()?;
        let template = Arc::new(template);
        cache.insert((idx0, idx1), Arc::clone(&template));
        Ok(template)
    }

    /// Number of cached ranges.
    pub fn cached_len(&self) -> usize {
        self.cache
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }
}

impl fmt::Debug for TrotterPartialTimeEvolution {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TrotterPartialTimeEvolution")
            .field("n_state_qubits", &self.problem.n_state_qubits())
            .field("n_trotter", &self.n_trotter)
            .field("cached", &self.cached_len())
            .field("transpiler", &self.transpiler.as_ref().map(|t| t.name()))
            .finish()
    }
}

impl PartialTimeEvolutionCircuitFactory for TrotterPartialTimeEvolution {
    fn circuit(&self, idx0: u32, idx1: u32, evolution_time: f64) -> SimResult<Circuit> {
        let circuit = self.get_partial(idx0, idx1)?.bind(evolution_time);
        Ok(apply_transpiler(self.transpiler.as_ref(), circuit)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hamiltonian::Hamiltonian;

    fn chain() -> QubitHamiltonianInput {
        let h = Hamiltonian::from_labels([("Z0 Z1", 1.0), ("Z1 Z2", 1.0), ("X2", 0.5)]).unwrap();
        QubitHamiltonianInput::new(3, h).unwrap()
    }

    #[test]
    fn test_cache_returns_same_template() {
        let factory = TrotterPartialTimeEvolution::new(chain(), 2).unwrap();
        let a = factory.get_partial(1, 3).unwrap();
        let b = factory.get_partial(1, 3).unwrap();
        assert!(Arc::ptr_eq(&a, &b));
        assert_eq!(factory.cached_len(), 1);
    }

    #[test]
    fn test_cache_hit_matches_fresh_synthesis() {
        let problem = chain();
        let factory = TrotterPartialTimeEvolution::new(problem.clone(), 3).unwrap();
        factory.get_partial(0, 2).unwrap();
        let hit = factory.get_partial(0, 2).unwrap();

        let local = problem.local_hamiltonian_input(0, 2).unwrap();
        let fresh = TrotterEvolution::new(local.hamiltonian().clone(), 3)
            .with_n_qubits(2)
            .build()
            .unwrap();
        assert_eq!(hit.bind(0.4), fresh.bind(0.4));

        // A populated cache does not bypass range checks.
        assert!(matches!(
            factory.get_partial(0, 4),
            Err(SimError::InvalidSubrange { .. })
        ));
        assert_eq!(factory.cached_len(), 1);
    }

    #[test]
    fn test_invalid_range_not_cached() {
        let factory = TrotterPartialTimeEvolution::new(chain(), 1).unwrap();
        assert!(factory.get_partial(2, 1).is_err());
        assert_eq!(factory.cached_len(), 0);
    }

    #[test]
    fn test_zero_steps_rejected() {
        assert!(matches!(
            TrotterPartialTimeEvolution::new(chain(), 0),
            Err(SimError::InvalidSteps(0))
        ));
    }
}
