use std::fmt;
use crate::ast::Symbol;
use crate::prover::LawId;

/// Ways a verification request can fail to even be a well-posed problem.
/// These are kept apart from a `false` verdict, which means a step was wrong.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum VerifyError {
    /// no `Stop` where one is required.
    /// `step` is the index of the offending proof step, or `None` for the initial formula
    MalformedExpression { step: Option<usize> },
    /// the proof must end at `0` or `1`
    InvalidTarget(Symbol),
    /// a proof needs at least one step
    EmptyProof,
    /// the law is not part of the active catalog
    UnknownLaw(LawId),
}

impl fmt::Display for VerifyError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            VerifyError::MalformedExpression { step: None } => {
                write!(f, "the initial formula has no STOP symbol")
            }
            VerifyError::MalformedExpression { step: Some(i) } => {
                write!(f, "the formula of step {} has no STOP symbol", i)
            }
            VerifyError::InvalidTarget(symbol) => write!(f, "target `{}` is not a truth value", symbol),
            VerifyError::EmptyProof => write!(f, "a proof must have at least one step"),
            VerifyError::UnknownLaw(id) => write!(f, "{:?} is not in the active catalog", id),
        }
    }
}
impl std::error::Error for VerifyError {

}

/// Problems resolving the names used in a proof request
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RequestError {
    UnknownLawName(String),
    /// the target must be written as a single symbol
    BadTarget(String),
}

impl fmt::Display for RequestError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RequestError::UnknownLawName(name) => write!(f, "no law named `{}` in the active catalog", name),
            RequestError::BadTarget(source) => write!(f, "target `{}` is not a single symbol", source),
        }
    }
}
impl std::error::Error for RequestError {

}

pub type BoxedErrorTrait = Box<(dyn std::error::Error + 'static)>;
