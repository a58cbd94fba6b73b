use std::fmt;
use crate::ast::{Expression, Symbol};

/// A disjunction of exactly three literals.
/// Literal `k` names variable `x(k-1)`, and `-k` its negation.
pub type Clause3 = [i64; 3];

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CnfError {
    /// a 3-CNF formula needs at least one clause
    EmptyFormula,
    /// zero, or larger in magnitude than the number of literal slots
    LiteralOutOfRange { clause: usize, position: usize, literal: i64 },
}

impl fmt::Display for CnfError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CnfError::EmptyFormula => write!(f, "the 3-CNF formula must have at least one clause"),
            CnfError::LiteralOutOfRange { clause, position, literal } => write!(f,
                "literal {} in clause {} is {}, but must be non-zero and not out of range",
                position, clause, literal
            ),
        }
    }
}
impl std::error::Error for CnfError {

}

/// Convert a 3-CNF formula into a prefix-notation expression.
///
/// Each clause `(a, b, c)` becomes `+ a + b c`, and the clauses are
/// chained right-nested under `*`, so `[c0, c1, c2]` becomes `* c0 * c1 c2`.
/// The logical length of the result is its `len()`, `Stop` included.
pub fn cnf_to_prefix(clauses: &[Clause3]) -> Result<Expression, CnfError> {
    if clauses.is_empty() {
        return Err(CnfError::EmptyFormula);
    }
    let literal_count = clauses.len() as u64 * 3;
    let mut negations = 0;
    for (i, clause) in clauses.iter().enumerate() {
        for (j, &literal) in clause.iter().enumerate() {
            if literal == 0 || literal.unsigned_abs() > literal_count {
                return Err(CnfError::LiteralOutOfRange { clause: i, position: j, literal });
            }
            if literal < 0 {
                negations += 1;
            }
        }
    }
    // literals, their negations, two ORs per clause, the ANDs between clauses, and the stop
    let capacity = clauses.len() * 3 + negations + 2 * clauses.len() + (clauses.len() - 1) + 1;
    let mut symbols = Vec::with_capacity(capacity);

    let last = clauses.len() - 1;
    for (i, clause) in clauses.iter().enumerate() {
        if i < last {
            symbols.push(Symbol::And);
        }
        symbols.push(Symbol::Or);
        for (j, &literal) in clause.iter().enumerate() {
            if literal < 0 {
                symbols.push(Symbol::Not);
            }
            symbols.push(Symbol::var((literal.unsigned_abs() - 1) as u32));
            if j == 0 {
                symbols.push(Symbol::Or);
            }
        }
    }
    symbols.push(Symbol::Stop);
    debug_assert_eq!(capacity, symbols.len());
    Ok(Expression::new(symbols))
}
