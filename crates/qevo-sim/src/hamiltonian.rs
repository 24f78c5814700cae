//! Hamiltonian data structures.
//!
//! A Hamiltonian is a sum of weighted Pauli strings:
//!
//!   H = Σ_k  c_k · P_k
//!
//! where each P_k is a tensor product of single-qubit Pauli operators
//! (X, Y, Z, identity elsewhere) and c_k ∈ ℂ. Only Re(c_k) enters the
//! synthesised rotation angles; for a Hermitian H the coefficients are real.
//!
//! Term order is significant: product formulas exponentiate terms in the
//! order they were first inserted.
//!
//! # Example
//!
//! ```rust
//! use qevo_sim::hamiltonian::{Hamiltonian, PauliString};
//!
//! // H = 2·X₀X₁ + 2·Y₀Y₁ + 2·I
//! let h = Hamiltonian::from_labels([("X0 X1", 2.0), ("Y0 Y1", 2.0), ("I", 2.0)]).unwrap();
//! assert_eq!(h.n_terms(), 3);
//! assert!(h.terms()[2].pauli.is_identity());
//! assert_eq!(h.min_qubits(), 2);
//! ```

use std::fmt;
use std::str::FromStr;

use num_complex::Complex64;
use qevo_ir::{Pauli, QubitId};
use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

use crate::error::{SimError, SimResult};

/// A tensor product of Pauli operators on indexed qubits.
///
/// Stored as a sorted `Vec<(qubit_index, Pauli)>`; qubits not listed are
/// implicitly I. The empty string is the identity operator.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct PauliString {
    /// Non-identity factors, sorted by qubit index ascending.
    ops: Vec<(u32, Pauli)>,
}

impl PauliString {
    /// The identity operator.
    pub fn identity() -> Self {
        Self::default()
    }

    /// A single-qubit Pauli operator.
    pub fn single(qubit: u32, pauli: Pauli) -> Self {
        Self {
            ops: vec![(qubit, pauli)],
        }
    }

    /// Construct a PauliString from an iterator of (qubit, op) pairs.
    ///
    /// The ops are sorted by qubit; a repeated qubit is an error.
    pub fn from_ops(ops: impl IntoIterator<Item = (u32, Pauli)>) -> SimResult<Self> {
        let mut v: Vec<(u32, Pauli)> = ops.into_iter().collect();
        v.sort_by_key(|(q, _)| *q);
        if let Some(w) = v.windows(2).find(|w| w[0].0 == w[1].0) {
            return Err(SimError::DuplicatePauliQubit(w[0].0));
        }
        Ok(Self { ops: v })
    }

    /// Return the non-identity (qubit, op) pairs, sorted by qubit index.
    pub fn ops(&self) -> &[(u32, Pauli)] {
        &self.ops
    }

    /// Number of non-identity factors.
    pub fn weight(&self) -> usize {
        self.ops.len()
    }

    /// True if there are no non-identity operators (pure global phase).
    ///
    /// This is the single test both synthesisers use to decide whether a
    /// term becomes a rotation.
    pub fn is_identity(&self) -> bool {
        self.ops.is_empty()
    }

    /// The highest qubit index referenced, or `None` for an identity string.
    pub fn max_qubit(&self) -> Option<u32> {
        self.ops.last().map(|(q, _)| *q)
    }

    /// The (qubit, axis) operands of the corresponding Pauli rotation.
    pub fn rotation_axes(&self) -> impl Iterator<Item = (QubitId, Pauli)> + '_ {
        self.ops.iter().map(|&(q, p)| (QubitId(q), p))
    }

    /// The same operator with every qubit index moved up by `offset`.
    #[must_use]
    pub fn shifted(&self, offset: u32) -> Self {
        Self {
            ops: self.ops.iter().map(|&(q, p)| (q + offset, p)).collect(),
        }
    }

    /// The product of this string with a Pauli on a qubit it does not touch.
    pub fn with_op(&self, qubit: u32, pauli: Pauli) -> SimResult<Self> {
        Self::from_ops(self.ops.iter().copied().chain([(qubit, pauli)]))
    }

    /// Relabel onto the window `[idx0, idx1)`, or `None` if some factor lies
    /// outside it.
    pub fn restricted(&self, idx0: u32, idx1: u32) -> Option<Self> {
        if self.ops.iter().any(|&(q, _)| q < idx0 || q >= idx1) {
            return None;
        }
        Some(Self {
            ops: self.ops.iter().map(|&(q, p)| (q - idx0, p)).collect(),
        })
    }
}

impl fmt::Display for PauliString {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.ops.is_empty() {
            return f.write_str("I");
        }
        for (i, (q, p)) in self.ops.iter().enumerate() {
            if i > 0 {
                f.write_str(" ")?;
            }
            write!(f, "{p}{q}")?;
        }
        Ok(())
    }
}

impl FromStr for PauliString {
    type Err = SimError;

    /// Parse labels such as `"X0 Y1 Z3"`, `"X0Y1"`, `"I"` or `""`.
    ///
    /// `I<k>` factors are accepted and dropped.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || SimError::InvalidPauliLabel(s.to_string());
        let mut ops = vec![];
        let mut chars = s.chars().peekable();

        while let Some(c) = chars.next() {
            if c.is_whitespace() {
                continue;
            }
            let pauli = match c {
                'X' => Some(Pauli::X),
                'Y' => Some(Pauli::Y),
                'Z' => Some(Pauli::Z),
                'I' => None,
                _ => return Err(invalid()),
            };
            let mut digits = String::new();
            while let Some(d) = chars.peek().copied().filter(char::is_ascii_digit) {
                digits.push(d);
                chars.next();
            }
            match pauli {
                Some(p) => {
                    let qubit = digits.parse::<u32>().map_err(|_| invalid())?;
                    ops.push((qubit, p));
                }
                None if digits.is_empty() || digits.parse::<u32>().is_ok() => {}
                None => return Err(invalid()),
            }
        }

        Self::from_ops(ops)
    }
}

/// A single weighted Pauli term: `coeff · pauli`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HamiltonianTerm {
    /// Complex coefficient.
    pub coeff: Complex64,
    /// The Pauli string.
    pub pauli: PauliString,
}

impl HamiltonianTerm {
    /// Create a new term.
    pub fn new(coeff: impl Into<Complex64>, pauli: PauliString) -> Self {
        Self {
            coeff: coeff.into(),
            pauli,
        }
    }

    /// Shorthand: identity (global phase) term.
    pub fn identity(coeff: f64) -> Self {
        Self::new(coeff, PauliString::identity())
    }

    /// Shorthand: single-qubit Z term.
    pub fn z(qubit: u32, coeff: f64) -> Self {
        Self::new(coeff, PauliString::single(qubit, Pauli::Z))
    }

    /// Shorthand: single-qubit X term.
    pub fn x(qubit: u32, coeff: f64) -> Self {
        Self::new(coeff, PauliString::single(qubit, Pauli::X))
    }

    /// Shorthand: ZZ coupling term. Fails if `q0 == q1`.
    pub fn zz(q0: u32, q1: u32, coeff: f64) -> SimResult<Self> {
        Ok(Self::new(
            coeff,
            PauliString::from_ops([(q0, Pauli::Z), (q1, Pauli::Z)])?,
        ))
    }
}

/// A sum-of-Pauli-strings Hamiltonian.
///
/// H = Σ_k  c_k · P_k
///
/// Each Pauli string occurs at most once. Adding a string that is already
/// present sums the coefficients in place; a sum that is exactly zero removes
/// the term.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(from = "Vec<HamiltonianTerm>", into = "Vec<HamiltonianTerm>")]
pub struct Hamiltonian {
    terms: Vec<HamiltonianTerm>,
    index: FxHashMap<PauliString, usize>,
}

impl Hamiltonian {
    /// Create an empty Hamiltonian.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create from a list of terms, merging repeated strings.
    pub fn from_terms(terms: Vec<HamiltonianTerm>) -> Self {
        terms.into_iter().collect()
    }

    /// Create from `(label, real coefficient)` pairs, e.g. `("X0 Z2", 0.5)`.
    pub fn from_labels<'a>(labels: impl IntoIterator<Item = (&'a str, f64)>) -> SimResult<Self> {
        let mut h = Self::new();
        for (label, coeff) in labels {
            h.add_term(label.parse()?, coeff);
        }
        Ok(h)
    }

    /// Add `coeff · pauli`, merging with an existing term on the same string.
    pub fn add_term(&mut self, pauli: PauliString, coeff: impl Into<Complex64>) {
        let coeff = coeff.into();
        if let Some(&pos) = self.index.get(&pauli) {
            let merged = self.terms[pos].coeff + coeff;
            if merged == Complex64::new(0.0, 0.0) {
                self.terms.remove(pos);
                self.reindex();
            } else {
                self.terms[pos].coeff = merged;
            }
        } else if coeff != Complex64::new(0.0, 0.0) {
            self.index.insert(pauli.clone(), self.terms.len());
            self.terms.push(HamiltonianTerm { coeff, pauli });
        }
    }

    /// All terms, in insertion order.
    pub fn terms(&self) -> &[HamiltonianTerm] {
        &self.terms
    }

    /// Iterate over `(pauli, coeff)` pairs in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&PauliString, Complex64)> {
        self.terms.iter().map(|t| (&t.pauli, t.coeff))
    }

    /// Number of terms.
    pub fn n_terms(&self) -> usize {
        self.terms.len()
    }

    /// True if there are no terms at all.
    pub fn is_empty(&self) -> bool {
        self.terms.is_empty()
    }

    /// The coefficient of `pauli`, if present.
    pub fn coefficient(&self, pauli: &PauliString) -> Option<Complex64> {
        self.index.get(pauli).map(|&pos| self.terms[pos].coeff)
    }

    /// The minimum number of qubits required to represent this Hamiltonian.
    ///
    /// Returns 0 if the Hamiltonian is empty or purely identity.
    pub fn min_qubits(&self) -> u32 {
        self.terms
            .iter()
            .filter_map(|t| t.pauli.max_qubit())
            .max()
            .map_or(0, |q| q + 1)
    }

    /// Relabel every qubit index `i → i + offset`.
    ///
    /// The identity term is copied unchanged. Used to make room for a
    /// control qubit at index 0.
    #[must_use]
    pub fn shifted(&self, offset: u32) -> Self {
        self.terms
            .iter()
            .map(|t| HamiltonianTerm {
                coeff: t.coeff,
                pauli: t.pauli.shifted(offset),
            })
            .collect()
    }

    /// The terms supported entirely on `[idx0, idx1)`, relabelled
    /// `i → i − idx0`. Identity terms are kept.
    #[must_use]
    pub fn restricted(&self, idx0: u32, idx1: u32) -> Self {
        self.terms
            .iter()
            .filter_map(|t| {
                t.pauli.restricted(idx0, idx1).map(|pauli| HamiltonianTerm {
                    coeff: t.coeff,
                    pauli,
                })
            })
            .collect()
    }

    // ---- Internal helpers ----

    fn reindex(&mut self) {
        self.index = self
            .terms
            .iter()
            .enumerate()
            .map(|(i, t)| (t.pauli.clone(), i))
            .collect();
    }
}

impl PartialEq for Hamiltonian {
    fn eq(&self, other: &Self) -> bool {
        self.terms == other.terms
    }
}

impl FromIterator<HamiltonianTerm> for Hamiltonian {
    fn from_iter<T: IntoIterator<Item = HamiltonianTerm>>(iter: T) -> Self {
        let mut h = Self::new();
        for term in iter {
            h.add_term(term.pauli, term.coeff);
        }
        h
    }
}

impl From<Vec<HamiltonianTerm>> for Hamiltonian {
    fn from(terms: Vec<HamiltonianTerm>) -> Self {
        Self::from_terms(terms)
    }
}

impl From<Hamiltonian> for Vec<HamiltonianTerm> {
    fn from(h: Hamiltonian) -> Self {
        h.terms
    }
}
