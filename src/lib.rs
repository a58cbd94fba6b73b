#[macro_use] extern crate log;

pub mod error;
pub mod ast;
pub mod prover;
pub mod client;

pub use ast::{Symbol, Operator, VarId, Expression, parse, cnf_to_prefix};
pub use prover::{Catalog, Law, LawKind, LawId, ProofStep, Verifier, check_proof, verify_proof};
pub use error::{VerifyError, RequestError, BoxedErrorTrait};
