use std::fmt;
use std::ops::Index;
use itertools::Itertools;
use crate::ast::Symbol;

/// A Boolean expression in prefix (Polish) notation,
/// stored as a flat buffer of symbols that should end in exactly one `Stop`.
///
/// Nothing before the `Stop` is checked for well-formedness here,
/// the verifier only ever looks at a bounded window around the first difference.
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct Expression {
    symbols: Vec<Symbol>,
}

impl Expression {
    /// Wrap a raw buffer as it is (no `Stop` is added)
    pub fn new(symbols: Vec<Symbol>) -> Expression {
        Expression { symbols }
    }
    /// Take the content symbols of an expression and terminate them with `Stop`
    pub fn terminated<I: IntoIterator<Item = Symbol>>(content: I) -> Expression {
        let symbols = content.into_iter()
            .chain(std::iter::once(Symbol::Stop))
            .collect();
        Expression { symbols }
    }
    /// The single-symbol expression `symbol STOP`
    pub fn single(symbol: Symbol) -> Expression {
        Expression::terminated(vec![symbol])
    }
    pub fn symbols(&self) -> &[Symbol] {
        self.symbols.as_slice()
    }
    /// Length of the whole buffer, including the `Stop` and anything after it
    pub fn len(&self) -> usize {
        self.symbols.len()
    }
    pub fn is_empty(&self) -> bool {
        self.symbols.is_empty()
    }
    /// The position of the first `Stop`, if there is one
    pub fn locate_stop(&self) -> Option<usize> {
        locate_stop(&self.symbols)
    }
    /// The meaningful part of the buffer, or the whole buffer if it has no `Stop`
    pub fn content(&self) -> &[Symbol] {
        let end = self.locate_stop().unwrap_or(self.symbols.len());
        &self.symbols[..end]
    }
    /// Is this exactly `symbol STOP`?
    pub fn is_single(&self, symbol: Symbol) -> bool {
        self.symbols.len() >= 2 && self.symbols[0] == symbol && self.symbols[1] == Symbol::Stop
    }
    /// Checks that the content before `Stop` is one complete prefix term
    pub fn is_well_formed(&self) -> bool {
        let content = match self.locate_stop() {
            Some(stop) => &self.symbols[..stop],
            None => return false,
        };
        // number of operands we still owe
        let mut owed = 1usize;
        for &symbol in content {
            if owed == 0 {
                return false; // trailing symbols after a complete term
            }
            owed = owed - 1 + symbol.arity();
        }
        owed == 0
    }
}

/// Index of the first `Stop` in `symbols`
pub fn locate_stop(symbols: &[Symbol]) -> Option<usize> {
    symbols.iter().position(|&s| s == Symbol::Stop)
}

/// The index where `f` and `g` first differ.
///
/// Returns `None` when they are identical up to their `Stop`,
/// or when either one reaches `Stop` before any difference shows up.
pub fn first_dissimilarity(f: &[Symbol], g: &[Symbol]) -> Option<usize> {
    for (i, (&a, &b)) in f.iter().zip(g.iter()).enumerate() {
        if a == Symbol::Stop || b == Symbol::Stop {
            // a stop can not come before the difference
            return None;
        }
        if a != b {
            return Some(i);
        }
    }
    None
}

impl Index<usize> for Expression {
    type Output = Symbol;
    fn index(&self, idx: usize) -> &Symbol {
        &self.symbols[idx]
    }
}

impl From<Vec<Symbol>> for Expression {
    fn from(symbols: Vec<Symbol>) -> Self {
        Expression::new(symbols)
    }
}

impl fmt::Display for Expression {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let end = self.locate_stop().map(|stop| stop + 1).unwrap_or(self.symbols.len());
        write!(f, "{}", self.symbols[..end].iter().join(" "))
    }
}
impl fmt::Debug for Expression {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}]", self)
    }
}
