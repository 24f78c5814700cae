//! Dense state-vector helpers shared by the integration tests.
//!
//! Qubit `q` is bit `q` of the basis-state index.

#![allow(dead_code)]

use num_complex::Complex64;
use qevo_ir::{Circuit, Gate, Pauli, QubitId};
use qevo_sim::hamiltonian::{Hamiltonian, PauliString};

pub type State = Vec<Complex64>;

const I: Complex64 = Complex64::new(0.0, 1.0);

/// A fixed, non-symmetric normalised state on `n` qubits.
pub fn test_state(n: u32) -> State {
    let dim = 1usize << n;
    let raw: State = (0..dim)
        .map(|k| {
            let k = k as f64;
            Complex64::new((0.3 + k).sin() + 1.1, (0.7 * k + 0.2).cos())
        })
        .collect();
    normalised(raw)
}

/// `|+⟩` on qubit 0 tensored with `system` on qubits `1..`.
pub fn plus_control(system: &State) -> State {
    let amp = Complex64::new(std::f64::consts::FRAC_1_SQRT_2, 0.0);
    let mut out = vec![Complex64::new(0.0, 0.0); system.len() * 2];
    for (k, &a) in system.iter().enumerate() {
        out[k << 1] = a * amp;
        out[(k << 1) | 1] = a * amp;
    }
    out
}

/// `(|0⟩ ⊗ a + |1⟩ ⊗ b) / √2` with the control on qubit 0.
pub fn controlled_pair(a: &State, b: &State) -> State {
    let amp = Complex64::new(std::f64::consts::FRAC_1_SQRT_2, 0.0);
    let mut out = vec![Complex64::new(0.0, 0.0); a.len() * 2];
    for k in 0..a.len() {
        out[k << 1] = a[k] * amp;
        out[(k << 1) | 1] = b[k] * amp;
    }
    out
}

pub fn normalised(mut v: State) -> State {
    let norm = v.iter().map(Complex64::norm_sqr).sum::<f64>().sqrt();
    for a in &mut v {
        *a /= norm;
    }
    v
}

/// `‖a − e^{iφ} b‖` minimised over the global phase φ.
pub fn phase_distance(a: &State, b: &State) -> f64 {
    let overlap: Complex64 = b.iter().zip(a).map(|(x, y)| x.conj() * y).sum();
    let phase = if overlap.norm() > 0.0 {
        overlap / overlap.norm()
    } else {
        Complex64::new(1.0, 0.0)
    };
    a.iter()
        .zip(b)
        .map(|(x, y)| (x - phase * y).norm_sqr())
        .sum::<f64>()
        .sqrt()
}

/// `P|ψ⟩` for a Pauli string.
pub fn apply_pauli_string(pauli: &PauliString, state: &State) -> State {
    let mut out = vec![Complex64::new(0.0, 0.0); state.len()];
    for (i, &amp) in state.iter().enumerate() {
        let mut j = i;
        let mut phase = Complex64::new(1.0, 0.0);
        for &(q, p) in pauli.ops() {
            let bit = (i >> q) & 1;
            match p {
                Pauli::X => j ^= 1 << q,
                Pauli::Y => {
                    j ^= 1 << q;
                    phase *= if bit == 0 { I } else { -I };
                }
                Pauli::Z => {
                    if bit == 1 {
                        phase = -phase;
                    }
                }
            }
        }
        out[j] += phase * amp;
    }
    out
}

/// `H|ψ⟩`.
pub fn apply_hamiltonian(h: &Hamiltonian, state: &State) -> State {
    let mut out = vec![Complex64::new(0.0, 0.0); state.len()];
    for (pauli, coeff) in h.iter() {
        for (o, p) in out.iter_mut().zip(apply_pauli_string(pauli, state)) {
            *o += coeff * p;
        }
    }
    out
}

/// `exp(-i H t)|ψ⟩` by Taylor series over short sub-intervals.
pub fn exact_evolution(h: &Hamiltonian, t: f64, state: &State) -> State {
    let bound: f64 = h.iter().map(|(_, c)| c.norm()).sum::<f64>() * t.abs();
    let slices = (bound / 0.25).ceil().max(1.0) as usize;
    let dt = t / slices as f64;

    let mut psi = state.clone();
    for _ in 0..slices {
        let mut term = psi.clone();
        let mut acc = psi.clone();
        for k in 1..40 {
            let h_term = apply_hamiltonian(h, &term);
            let factor = -I * dt / k as f64;
            term = h_term.into_iter().map(|a| a * factor).collect();
            for (x, y) in acc.iter_mut().zip(&term) {
                *x += y;
            }
        }
        psi = acc;
    }
    psi
}

/// Run a concrete circuit on `state`.
pub fn run_circuit(circuit: &Circuit, state: &State) -> State {
    let mut psi = state.clone();
    for inst in circuit.instructions() {
        psi = apply_gate(&inst.gate, &inst.qubits, &psi);
    }
    psi
}

fn angle_of(gate: &Gate) -> f64 {
    gate.angle()
        .and_then(|a| a.as_f64())
        .expect("circuit must be fully bound")
}

fn apply_gate(gate: &Gate, qubits: &[QubitId], state: &State) -> State {
    let c = |re: f64, im: f64| Complex64::new(re, im);
    let h = std::f64::consts::FRAC_1_SQRT_2;
    match gate {
        Gate::H => single(state, qubits[0], [[c(h, 0.0), c(h, 0.0)], [c(h, 0.0), c(-h, 0.0)]]),
        Gate::X => single(state, qubits[0], [[c(0.0, 0.0), c(1.0, 0.0)], [c(1.0, 0.0), c(0.0, 0.0)]]),
        Gate::Y => single(state, qubits[0], [[c(0.0, 0.0), c(0.0, -1.0)], [c(0.0, 1.0), c(0.0, 0.0)]]),
        Gate::Z => single(state, qubits[0], [[c(1.0, 0.0), c(0.0, 0.0)], [c(0.0, 0.0), c(-1.0, 0.0)]]),
        Gate::S => single(state, qubits[0], [[c(1.0, 0.0), c(0.0, 0.0)], [c(0.0, 0.0), c(0.0, 1.0)]]),
        Gate::Sdg => single(state, qubits[0], [[c(1.0, 0.0), c(0.0, 0.0)], [c(0.0, 0.0), c(0.0, -1.0)]]),
        Gate::Rx(_) | Gate::Ry(_) | Gate::Rz(_) => {
            let axis = match gate {
                Gate::Rx(_) => Pauli::X,
                Gate::Ry(_) => Pauli::Y,
                _ => Pauli::Z,
            };
            rotate(state, &[(qubits[0], axis)], angle_of(gate))
        }
        Gate::CX => {
            let (ctl, tgt) = (qubits[0].0, qubits[1].0);
            let mut out = state.clone();
            for (i, &amp) in state.iter().enumerate() {
                if (i >> ctl) & 1 == 1 {
                    out[i ^ (1 << tgt)] = amp;
                }
            }
            out
        }
        Gate::PauliRotation { paulis, .. } => {
            let axes: Vec<(QubitId, Pauli)> =
                qubits.iter().copied().zip(paulis.iter().copied()).collect();
            rotate(state, &axes, angle_of(gate))
        }
    }
}

fn single(state: &State, qubit: QubitId, m: [[Complex64; 2]; 2]) -> State {
    let q = qubit.0;
    let mut out = state.clone();
    for i in 0..state.len() {
        if (i >> q) & 1 == 0 {
            let j = i | (1 << q);
            let (a0, a1) = (state[i], state[j]);
            out[i] = m[0][0] * a0 + m[0][1] * a1;
            out[j] = m[1][0] * a0 + m[1][1] * a1;
        }
    }
    out
}

/// `exp(-iθ/2 · P)|ψ⟩ = cos(θ/2)|ψ⟩ − i sin(θ/2) P|ψ⟩`.
fn rotate(state: &State, axes: &[(QubitId, Pauli)], theta: f64) -> State {
    let pauli = PauliString::from_ops(axes.iter().map(|&(q, p)| (q.0, p)))
        .expect("distinct rotation qubits");
    let p_state = apply_pauli_string(&pauli, state);
    let (cos, sin) = ((theta / 2.0).cos(), (theta / 2.0).sin());
    state
        .iter()
        .zip(p_state)
        .map(|(&a, pa)| a * cos - I * sin * pa)
        .collect()
}
