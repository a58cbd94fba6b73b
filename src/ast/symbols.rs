use std::fmt;
use serde::{Serialize, Deserialize};

/// An opaque value representing a singular variable,
/// where two variables are the same iff their VarId's are equal
#[derive(Copy, Clone, PartialOrd, Ord, PartialEq, Eq, Hash)]
pub struct VarId(pub u32);

/// One cell of a prefix-notation buffer
#[derive(Copy, Clone, PartialEq, Eq, Hash)]
pub enum Symbol {
    /// marks the end of the meaningful content of a buffer
    Stop,
    Not,
    Or,
    And,
    False,
    True,
    Variable(VarId),
}

/// The two binary connectives
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Operator {
    Or,
    And,
}

impl Symbol {
    pub fn var(id: u32) -> Symbol {
        Symbol::Variable(VarId(id))
    }
    /// The constant for a rust `bool`
    pub fn truth(value: bool) -> Symbol {
        if value { Symbol::True } else { Symbol::False }
    }
    pub fn is_truth_value(self) -> bool {
        match self {
            Symbol::True | Symbol::False => true,
            _ => false,
        }
    }
    pub fn is_variable(self) -> bool {
        if let Symbol::Variable(_) = self {
            true
        } else {
            false
        }
    }
    /// A leaf operand: a constant or a variable, never a connective (and never Stop)
    pub fn is_boolean(self) -> bool {
        self.is_truth_value() || self.is_variable()
    }
    pub fn variable_id(self) -> Option<VarId> {
        match self {
            Symbol::Variable(id) => Some(id),
            _ => None,
        }
    }
    /// Flip a truth value, leaving everything else alone
    pub fn negate_truth(self) -> Symbol {
        match self {
            Symbol::True => Symbol::False,
            Symbol::False => Symbol::True,
            other => other,
        }
    }
    /// The number of operands this symbol consumes in prefix notation
    pub fn arity(self) -> usize {
        match self {
            Symbol::Not => 1,
            Symbol::Or | Symbol::And => 2,
            _ => 0,
        }
    }
}

impl Operator {
    pub fn from_symbol(symbol: Symbol) -> Option<Operator> {
        match symbol {
            Symbol::Or => Some(Operator::Or),
            Symbol::And => Some(Operator::And),
            _ => None,
        }
    }
    pub fn symbol(self) -> Symbol {
        match self {
            Operator::Or => Symbol::Or,
            Operator::And => Symbol::And,
        }
    }
    /// Or <-> And
    pub fn dual(self) -> Operator {
        match self {
            Operator::Or => Operator::And,
            Operator::And => Operator::Or,
        }
    }
    /// The constant this operator leaves its other operand unchanged against:
    /// `a + 0 = a`, `a * 1 = a`
    pub fn identity(self) -> Symbol {
        match self {
            Operator::Or => Symbol::False,
            Operator::And => Symbol::True,
        }
    }
    /// The constant that swallows the whole operation:
    /// `a + 1 = 1`, `a * 0 = 0`
    pub fn annihilator(self) -> Symbol {
        self.identity().negate_truth()
    }
}

impl From<VarId> for Symbol {
    fn from(v: VarId) -> Self {
        Symbol::Variable(v)
    }
}
impl From<Operator> for Symbol {
    fn from(op: Operator) -> Self {
        op.symbol()
    }
}

impl fmt::Debug for VarId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "x{}", self.0)
    }
}
impl fmt::Display for VarId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "x{}", self.0)
    }
}

impl fmt::Display for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Symbol::Stop => write!(f, "STOP"),
            Symbol::Not => write!(f, "-"),
            Symbol::Or => write!(f, "+"),
            Symbol::And => write!(f, "*"),
            Symbol::False => write!(f, "0"),
            Symbol::True => write!(f, "1"),
            Symbol::Variable(v) => write!(f, "{}", v),
        }
    }
}
impl fmt::Debug for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(self, f)
    }
}
