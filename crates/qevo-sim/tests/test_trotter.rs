//! Tests for Trotter template synthesis.

use qevo_ir::{Gate, Pauli, QubitId};
use qevo_sim::SimError;
use qevo_sim::hamiltonian::{Hamiltonian, HamiltonianTerm};
use qevo_sim::template::TIME_PARAMETER;
use qevo_sim::trotter::{CONTROL_QUBIT, TrotterEvolution};

fn xx_yy_i() -> Hamiltonian {
    Hamiltonian::from_labels([("X0 X1", 2.0), ("Y0 Y1", 2.0), ("I", 2.0)]).unwrap()
}

fn time_coefficients(evol: &TrotterEvolution, controlled: bool) -> Vec<f64> {
    let template = if controlled {
        evol.build_controlled().unwrap()
    } else {
        evol.build().unwrap()
    };
    template
        .circuit()
        .instructions()
        .iter()
        .map(|i| i.gate.angle().unwrap().coefficient(TIME_PARAMETER))
        .collect()
}

// ---------------------------------------------------------------------------
// Validation
// ---------------------------------------------------------------------------

#[test]
fn zero_steps_returns_error() {
    let h = Hamiltonian::from_terms(vec![HamiltonianTerm::z(0, 1.0)]);
    let evol = TrotterEvolution::new(h, 0);
    assert!(matches!(evol.build(), Err(SimError::InvalidSteps(0))));
    assert!(matches!(
        evol.build_controlled(),
        Err(SimError::InvalidSteps(0))
    ));
}

#[test]
fn odd_order_returns_error() {
    let evol = TrotterEvolution::new(xx_yy_i(), 1).with_order(3);
    assert!(matches!(
        evol.build(),
        Err(SimError::UnsupportedTrotterOrder(3))
    ));
}

#[test]
fn narrow_register_returns_error() {
    let evol = TrotterEvolution::new(xx_yy_i(), 1).with_n_qubits(1);
    assert!(matches!(
        evol.build(),
        Err(SimError::QubitOutOfRange {
            qubit: 1,
            n_qubits: 1
        })
    ));
}

// ---------------------------------------------------------------------------
// Plain templates
// ---------------------------------------------------------------------------

#[test]
fn width_inferred_from_hamiltonian() {
    let h = Hamiltonian::from_labels([("Z0 Z3", 1.0)]).unwrap();
    let template = TrotterEvolution::new(h, 1).build().unwrap();
    assert_eq!(template.num_qubits(), 4);
}

#[test]
fn with_n_qubits_pads_idle_qubits() {
    let h = Hamiltonian::from_terms(vec![HamiltonianTerm::z(0, 1.0)]);
    let template = TrotterEvolution::new(h, 1).with_n_qubits(5).build().unwrap();
    assert_eq!(template.num_qubits(), 5);
}

#[test]
fn identity_term_emits_nothing() {
    let template = TrotterEvolution::new(xx_yy_i(), 1).build().unwrap();
    assert_eq!(template.num_ops(), 2);
    assert!(
        template
            .circuit()
            .instructions()
            .iter()
            .all(|i| i.is_pauli_rotation())
    );
}

#[test]
fn template_is_linear_in_time() {
    let evol = TrotterEvolution::new(xx_yy_i(), 4);
    let template = evol.build().unwrap();
    assert_eq!(template.num_ops(), 4 * 2);
    assert!(template.circuit().is_parameterized());
    for coeff in time_coefficients(&evol, false) {
        assert!((coeff - 1.0).abs() < 1e-15);
    }
}

#[test]
fn rotation_operands_follow_term() {
    let h = Hamiltonian::from_labels([("X0 Z2", 0.5)]).unwrap();
    let template = TrotterEvolution::new(h, 1).build().unwrap();
    let inst = &template.circuit().instructions()[0];
    assert_eq!(inst.qubits, [QubitId(0), QubitId(2)]);
    match &inst.gate {
        Gate::PauliRotation { paulis, .. } => assert_eq!(paulis, &[Pauli::X, Pauli::Z]),
        other => panic!("expected a Pauli rotation, got {other:?}"),
    }
}

#[test]
fn second_order_is_palindromic() {
    let evol = TrotterEvolution::new(xx_yy_i(), 1).with_order(2);
    let coeffs = time_coefficients(&evol, false);
    assert_eq!(coeffs.len(), 4);
    for c in coeffs {
        assert!((c - 2.0).abs() < 1e-15);
    }
    let gates: Vec<String> = evol
        .build()
        .unwrap()
        .circuit()
        .instructions()
        .iter()
        .map(|i| format!("{:?}", i.gate))
        .collect();
    assert_eq!(gates[0], gates[3]);
    assert_eq!(gates[1], gates[2]);
}

#[test]
fn fourth_order_angles_sum_to_first_order() {
    let evol4 = TrotterEvolution::new(xx_yy_i(), 1).with_order(4);
    let evol1 = TrotterEvolution::new(xx_yy_i(), 1);
    let total4: f64 = time_coefficients(&evol4, false).iter().sum();
    let total1: f64 = time_coefficients(&evol1, false).iter().sum();
    assert!((total4 - total1).abs() < 1e-12);
    assert_eq!(evol4.build().unwrap().num_ops(), 5 * 4);
}

#[test]
fn empty_hamiltonian_gives_empty_template() {
    let template = TrotterEvolution::new(Hamiltonian::new(), 3)
        .with_n_qubits(2)
        .build()
        .unwrap();
    assert_eq!(template.num_ops(), 0);
    assert_eq!(template.num_qubits(), 2);
}

// ---------------------------------------------------------------------------
// Controlled templates
// ---------------------------------------------------------------------------

#[test]
fn controlled_template_adds_control_qubit() {
    let template = TrotterEvolution::new(xx_yy_i(), 1)
        .build_controlled()
        .unwrap();
    assert_eq!(template.num_qubits(), 3);
    assert_eq!(template.num_ops(), 5);
}

#[test]
fn controlled_pair_structure() {
    let h = Hamiltonian::from_labels([("X0", 1.5)]).unwrap();
    let template = TrotterEvolution::new(h, 1).build_controlled().unwrap();
    let insts = template.circuit().instructions();

    assert_eq!(insts[0].qubits, [QubitId(1)]);
    assert_eq!(insts[1].qubits, [QubitId(CONTROL_QUBIT), QubitId(1)]);
    match &insts[1].gate {
        Gate::PauliRotation { paulis, angle } => {
            assert_eq!(paulis, &[Pauli::Z, Pauli::X]);
            assert!((angle.coefficient(TIME_PARAMETER) + 1.5).abs() < 1e-15);
        }
        other => panic!("expected a Pauli rotation, got {other:?}"),
    }
}

#[test]
fn controlled_identity_becomes_rz_on_control() {
    let h = Hamiltonian::from_labels([("I", 1.0)]).unwrap();
    let template = TrotterEvolution::new(h, 2)
        .with_n_qubits(1)
        .build_controlled()
        .unwrap();
    let insts = template.circuit().instructions();
    assert_eq!(insts.len(), 2);
    for inst in insts {
        assert!(matches!(inst.gate, Gate::Rz(_)));
        assert_eq!(inst.qubits, [QubitId(CONTROL_QUBIT)]);
        assert!((inst.gate.angle().unwrap().coefficient(TIME_PARAMETER) + 0.5).abs() < 1e-15);
    }
}

#[test]
fn controlled_angles_are_half_plain_angles() {
    let h = Hamiltonian::from_labels([("Z0 Z1", 0.8), ("X1", 0.3)]).unwrap();
    let evol = TrotterEvolution::new(h, 3);
    let plain = time_coefficients(&evol, false);
    let controlled = time_coefficients(&evol, true);
    assert_eq!(controlled.len(), 2 * plain.len());
    for (k, p) in plain.iter().enumerate() {
        assert!((controlled[2 * k] - p / 2.0).abs() < 1e-15);
        assert!((controlled[2 * k + 1] + p / 2.0).abs() < 1e-15);
    }
}
