//! Trotter time-evolution circuit factories.
//!
//! Three families, each in a plain and a controlled flavour:
//!
//! - **Fixed step** — one template with `n_trotter` slices, bound to the
//!   requested time on every call.
//! - **Fixed interval** — a one-slice unit circuit bound to `time_step` at
//!   construction; a call for time `m · time_step` repeats it `|m|` times and
//!   inverts the result when `m < 0`.
//! - **Facade** — picks one of the above from whichever of `time_step` /
//!   `n_trotter` is supplied.
//!
//! The flavour is a type parameter: [`Plain`] factories implement
//! [`TimeEvolutionCircuitFactory`] and [`Controlled`] factories implement
//! [`ControlledTimeEvolutionCircuitFactory`].
//!
//! # Example
//!
//! ```rust
//! use qevo_sim::evolution::FixedIntervalTrotterTimeEvolution;
//! use qevo_sim::factory::TimeEvolutionCircuitFactory;
//! use qevo_sim::hamiltonian::Hamiltonian;
//! use qevo_sim::problem::QubitHamiltonianInput;
//!
//! let h = Hamiltonian::from_labels([("X0 X1", 2.0), ("Y0 Y1", 2.0)]).unwrap();
//! let problem = QubitHamiltonianInput::new(2, h).unwrap();
//!
//! let factory = FixedIntervalTrotterTimeEvolution::new(&problem, 0.1, 2).unwrap();
//! let circuit = factory.circuit(0.5).unwrap();
//! assert_eq!(circuit.num_ops(), 5 * 4);
//! assert!(factory.circuit(0.43).is_err());
//! ```

use std::fmt;
use std::marker::PhantomData;

use qevo_ir::Circuit;
use tracing::debug;

use crate::config::TrotterConfig;
use crate::error::SimResult;
use crate::factory::{
    CircuitFactory, ControlledTimeEvolutionCircuitFactory, TimeEvolutionCircuitFactory,
};
use crate::policy::{StepCount, StepPolicy, evolution_trotter_step};
use crate::problem::QubitHamiltonianInput;
use crate::template::EvolutionTemplate;
use crate::transpile::{SharedTranspiler, apply_transpiler};
use crate::trotter::TrotterEvolution;

mod sealed {
    pub trait Sealed {}
}

/// Selects the plain or controlled synthesiser.
pub trait EvolutionKind: sealed::Sealed + Send + Sync + 'static {
    /// Whether the circuits carry an extra control qubit.
    const CONTROLLED: bool;

    /// Synthesise this flavour's template.
    fn synthesize(evolution: &TrotterEvolution) -> SimResult<EvolutionTemplate>;
}

/// Uncontrolled evolution on the system register.
#[derive(Debug, Clone, Copy, Default)]
pub struct Plain;

/// Controlled evolution with the control on qubit 0.
#[derive(Debug, Clone, Copy, Default)]
pub struct Controlled;

impl sealed::Sealed for Plain {}
impl sealed::Sealed for Controlled {}

impl EvolutionKind for Plain {
    const CONTROLLED: bool = false;

    fn synthesize(evolution: &TrotterEvolution) -> SimResult<EvolutionTemplate> {
        evolution.build()
    }
}

impl EvolutionKind for Controlled {
    const CONTROLLED: bool = true;

    fn synthesize(evolution: &TrotterEvolution) -> SimResult<EvolutionTemplate> {
        evolution.build_controlled()
    }
}

fn synthesize<K: EvolutionKind>(
    problem: &QubitHamiltonianInput,
    n_trotter: usize,
    trotter_order: usize,
) -> SimResult<EvolutionTemplate> {
    let evolution = TrotterEvolution::new(problem.hamiltonian().clone(), n_trotter)
        .with_order(trotter_order)
        .with_n_qubits(problem.n_state_qubits());
    K::synthesize(&evolution)
}

// ---------------------------------------------------------------------------
// Fixed step
// ---------------------------------------------------------------------------

/// Fixed number of Trotter slices; each call binds `t` directly.
pub struct FixedStepTrotter<K: EvolutionKind> {
    qubit_count: u32,
    n_trotter: usize,
    trotter_order: usize,
    template: EvolutionTemplate,
    transpiler: Option<SharedTranspiler>,
    _kind: PhantomData<K>,
}

/// Plain fixed-step factory.
pub type FixedStepTrotterTimeEvolution = FixedStepTrotter<Plain>;
/// Controlled fixed-step factory.
pub type FixedStepTrotterControlledTimeEvolution = FixedStepTrotter<Controlled>;

impl<K: EvolutionKind> FixedStepTrotter<K> {
    /// Synthesise the template for `problem` with `n_trotter` slices.
    pub fn new(
        problem: &QubitHamiltonianInput,
        n_trotter: usize,
        trotter_order: usize,
    ) -> SimResult<Self> {
        let template = synthesize::<K>(problem, n_trotter, trotter_order)?;
        Ok(Self {
            qubit_count: problem.n_state_qubits(),
            n_trotter,
            trotter_order,
            template,
            transpiler: None,
            _kind: PhantomData,
        })
    }

    /// Transpile every produced circuit.
    #[must_use]
    pub fn with_transpiler(mut self, transpiler: SharedTranspiler) -> Self {
        self.transpiler = Some(transpiler);
        self
    }

    /// The parametric template.
    pub fn template(&self) -> &EvolutionTemplate {
        &self.template
    }

    /// Number of Trotter slices.
    pub fn n_trotter(&self) -> usize {
        self.n_trotter
    }

    /// Product-formula order.
    pub fn trotter_order(&self) -> usize {
        self.trotter_order
    }

    fn evolve(&self, evolution_time: f64) -> SimResult<Circuit> {
        let circuit = self.template.bind(evolution_time);
        Ok(apply_transpiler(self.transpiler.as_ref(), circuit)?)
    }
}

impl<K: EvolutionKind> fmt::Debug for FixedStepTrotter<K> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FixedStepTrotter")
            .field("controlled", &K::CONTROLLED)
            .field("qubit_count", &self.qubit_count)
            .field("n_trotter", &self.n_trotter)
            .field("trotter_order", &self.trotter_order)
            .field("transpiler", &self.transpiler.as_ref().map(|t| t.name()))
            .finish_non_exhaustive()
    }
}

impl<K: EvolutionKind> CircuitFactory for FixedStepTrotter<K> {
    fn qubit_count(&self) -> u32 {
        self.qubit_count
    }
}

impl TimeEvolutionCircuitFactory for FixedStepTrotter<Plain> {
    fn circuit(&self, evolution_time: f64) -> SimResult<Circuit> {
        self.evolve(evolution_time)
    }
}

impl ControlledTimeEvolutionCircuitFactory for FixedStepTrotter<Controlled> {
    fn circuit(&self, evolution_time: f64) -> SimResult<Circuit> {
        self.evolve(evolution_time)
    }
}

// ---------------------------------------------------------------------------
// Fixed interval
// ---------------------------------------------------------------------------

/// Slices of fixed duration; the slice count follows from the requested time.
pub struct FixedIntervalTrotter<K: EvolutionKind> {
    qubit_count: u32,
    time_step: f64,
    trotter_order: usize,
    /// One slice bound to `t = time_step`.
    unit: Circuit,
    transpiler: Option<SharedTranspiler>,
    _kind: PhantomData<K>,
}

/// Plain fixed-interval factory.
pub type FixedIntervalTrotterTimeEvolution = FixedIntervalTrotter<Plain>;
/// Controlled fixed-interval factory.
pub type FixedIntervalTrotterControlledTimeEvolution = FixedIntervalTrotter<Controlled>;

impl<K: EvolutionKind> FixedIntervalTrotter<K> {
    /// Build the unit circuit for slices of length `time_step`.
    pub fn new(
        problem: &QubitHamiltonianInput,
        time_step: f64,
        trotter_order: usize,
    ) -> SimResult<Self> {
        StepPolicy::FixedInterval { time_step }.validate()?;
        let unit = synthesize::<K>(problem, 1, trotter_order)?.bind(time_step);
        Ok(Self {
            qubit_count: problem.n_state_qubits(),
            time_step,
            trotter_order,
            unit,
            transpiler: None,
            _kind: PhantomData,
        })
    }

    /// Transpile every produced circuit.
    #[must_use]
    pub fn with_transpiler(mut self, transpiler: SharedTranspiler) -> Self {
        self.transpiler = Some(transpiler);
        self
    }

    /// Duration of one slice.
    pub fn time_step(&self) -> f64 {
        self.time_step
    }

    /// Product-formula order.
    pub fn trotter_order(&self) -> usize {
        self.trotter_order
    }

    /// The concrete one-slice circuit.
    pub fn unit_circuit(&self) -> &Circuit {
        &self.unit
    }

    fn evolve(&self, evolution_time: f64) -> SimResult<Circuit> {
        let StepCount { repetitions, sign } =
            evolution_trotter_step(self.time_step, evolution_time)?;
        debug!(
            evolution_time,
            time_step = self.time_step,
            repetitions,
            sign,
            "repeating Trotter unit circuit"
        );
        let forward = self.unit.repeated(repetitions)?;
        let circuit = if sign < 0 { forward.inverse() } else { forward };
        Ok(apply_transpiler(self.transpiler.as_ref(), circuit)?)
    }
}

impl<K: EvolutionKind> fmt::Debug for FixedIntervalTrotter<K> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FixedIntervalTrotter")
            .field("controlled", &K::CONTROLLED)
            .field("qubit_count", &self.qubit_count)
            .field("time_step", &self.time_step)
            .field("trotter_order", &self.trotter_order)
            .field("transpiler", &self.transpiler.as_ref().map(|t| t.name()))
            .finish_non_exhaustive()
    }
}

impl<K: EvolutionKind> CircuitFactory for FixedIntervalTrotter<K> {
    fn qubit_count(&self) -> u32 {
        self.qubit_count
    }
}

impl TimeEvolutionCircuitFactory for FixedIntervalTrotter<Plain> {
    fn circuit(&self, evolution_time: f64) -> SimResult<Circuit> {
        self.evolve(evolution_time)
    }
}

impl ControlledTimeEvolutionCircuitFactory for FixedIntervalTrotter<Controlled> {
    fn circuit(&self, evolution_time: f64) -> SimResult<Circuit> {
        self.evolve(evolution_time)
    }
}

// ---------------------------------------------------------------------------
// Facade
// ---------------------------------------------------------------------------

/// The factory selected by a [`StepPolicy`].
#[derive(Debug)]
pub enum TrotterStepper<K: EvolutionKind> {
    /// Fixed number of slices.
    FixedStep(FixedStepTrotter<K>),
    /// Fixed slice duration.
    FixedInterval(FixedIntervalTrotter<K>),
}

/// Trotter factory configured by exactly one of `time_step` / `n_trotter`.
#[derive(Debug)]
pub struct TrotterFactory<K: EvolutionKind> {
    policy: StepPolicy,
    stepper: TrotterStepper<K>,
}

/// Plain facade.
pub type TrotterTimeEvolutionFactory = TrotterFactory<Plain>;
/// Controlled facade.
pub type TrotterControlledTimeEvolutionFactory = TrotterFactory<Controlled>;

impl<K: EvolutionKind> TrotterFactory<K> {
    /// Build from optional settings; exactly one of them must be `Some`.
    pub fn new(
        problem: &QubitHamiltonianInput,
        time_step: Option<f64>,
        n_trotter: Option<usize>,
        trotter_order: usize,
    ) -> SimResult<Self> {
        let policy = StepPolicy::from_options(time_step, n_trotter)?;
        Self::from_policy(problem, policy, trotter_order)
    }

    /// Build from an already resolved policy.
    pub fn from_policy(
        problem: &QubitHamiltonianInput,
        policy: StepPolicy,
        trotter_order: usize,
    ) -> SimResult<Self> {
        policy.validate()?;
        let stepper = match policy {
            StepPolicy::FixedStep { n_trotter } => TrotterStepper::FixedStep(
                FixedStepTrotter::new(problem, n_trotter, trotter_order)?,
            ),
            StepPolicy::FixedInterval { time_step } => TrotterStepper::FixedInterval(
                FixedIntervalTrotter::new(problem, time_step, trotter_order)?,
            ),
        };
        Ok(Self { policy, stepper })
    }

    /// Build from a configuration.
    pub fn from_config(problem: &QubitHamiltonianInput, config: &TrotterConfig) -> SimResult<Self> {
        let policy = config.validate()?;
        Self::from_policy(problem, policy, config.trotter_order)
    }

    /// Transpile every produced circuit.
    #[must_use]
    pub fn with_transpiler(self, transpiler: SharedTranspiler) -> Self {
        let stepper = match self.stepper {
            TrotterStepper::FixedStep(f) => {
                TrotterStepper::FixedStep(f.with_transpiler(transpiler))
            }
            TrotterStepper::FixedInterval(f) => {
                TrotterStepper::FixedInterval(f.with_transpiler(transpiler))
            }
        };
        Self {
            policy: self.policy,
            stepper,
        }
    }

    /// The resolved step policy.
    pub fn policy(&self) -> StepPolicy {
        self.policy
    }

    /// The selected factory.
    pub fn stepper(&self) -> &TrotterStepper<K> {
        &self.stepper
    }

    fn evolve(&self, evolution_time: f64) -> SimResult<Circuit> {
        match &self.stepper {
            TrotterStepper::FixedStep(f) => f.evolve(evolution_time),
            TrotterStepper::FixedInterval(f) => f.evolve(evolution_time),
        }
    }
}

impl<K: EvolutionKind> CircuitFactory for TrotterFactory<K> {
    fn qubit_count(&self) -> u32 {
        match &self.stepper {
            TrotterStepper::FixedStep(f) => f.qubit_count(),
            TrotterStepper::FixedInterval(f) => f.qubit_count(),
        }
    }
}

impl TimeEvolutionCircuitFactory for TrotterFactory<Plain> {
    fn circuit(&self, evolution_time: f64) -> SimResult<Circuit> {
        self.evolve(evolution_time)
    }
}

impl ControlledTimeEvolutionCircuitFactory for TrotterFactory<Controlled> {
    fn circuit(&self, evolution_time: f64) -> SimResult<Circuit> {
        self.evolve(evolution_time)
    }
}
