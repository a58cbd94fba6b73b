mod symbols;
pub use symbols::*;

mod expr;
pub use expr::*;

mod parse;
pub use parse::*;

mod cnf;
pub use cnf::*;
