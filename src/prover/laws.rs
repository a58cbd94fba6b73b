use std::fmt;
use indexmap::IndexMap;
use serde::{Serialize, Deserialize};
use crate::ast::{Symbol, Operator, VarId};
use crate::prover::{BindingEnvironment, Comparison, Shape};

/// The families of rewrites a proof step may claim
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LawKind {
    /// `a + 0 = a`, `a * 1 = a`
    Identity,
    /// `a + a = a`, `a * a = a`
    Idempotent,
    /// `a + b = b + a`, `a * b = b * a`
    Commutative,
    /// `a + (b + c) = (a + b) + c`, `a * (b * c) = (a * b) * c`
    Associative,
    /// `a + (b * c) = (a + b) * (a + c)`, `a * (b + c) = (a * b) + (a * c)`
    Distributive,
    /// `-(a + b) = -a * -b`, `-(a * b) = -a + -b`
    DeMorgan,
    /// `a + -a = 1`, `a * -a = 0`
    Complement,
    /// `a + 1 = 1`, `a * 0 = 0`
    Domination,
    /// `a + (a * b) = a`, `a * (a + b) = a`
    Absorption,
    /// `-(-a) = a`
    DoubleNegation,
    /// `-1 = 0`, `-0 = 1`
    Negation,
    /// `-a = x`, `a + b = x`, `a * b = x` for a fresh variable `x`
    Substitution,
}

/// A law together with the connective it is restricted to, if any.
///
/// The restriction names the outer connective of the compound side,
/// except for De Morgan, where it is the connective under the negation.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Law {
    pub kind: LawKind,
    #[serde(default)]
    pub operator: Option<Operator>,
}

/// Position of a law in its catalog
#[derive(Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct LawId(pub usize);

impl fmt::Debug for LawId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "law #{}", self.0)
    }
}

/// The laws a proof may cite, by name, in a fixed order
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Catalog {
    laws: IndexMap<String, Law>,
}

const KINDS_WITH_FORMS: [(&str, LawKind); 9] = [
    ("identity", LawKind::Identity),
    ("idempotent", LawKind::Idempotent),
    ("commutative", LawKind::Commutative),
    ("associative", LawKind::Associative),
    ("distributive", LawKind::Distributive),
    ("de_morgan", LawKind::DeMorgan),
    ("complement", LawKind::Complement),
    ("domination", LawKind::Domination),
    ("absorption", LawKind::Absorption),
];
const KINDS_WITHOUT_FORMS: [(&str, LawKind); 3] = [
    ("double_negation", LawKind::DoubleNegation),
    ("negation", LawKind::Negation),
    ("substitution", LawKind::Substitution),
];

impl Catalog {
    pub fn new() -> Catalog {
        Catalog { laws: IndexMap::new() }
    }
    /// The twelve laws, each accepting either connective
    pub fn merged() -> Catalog {
        KINDS_WITH_FORMS.iter()
            .chain(KINDS_WITHOUT_FORMS.iter())
            .fold(Catalog::new(), |catalog, &(name, kind)| {
                catalog.with_law(name, Law::any(kind))
            })
    }
    /// Twenty-one laws: one OR form and one AND form for every law that has forms
    pub fn split() -> Catalog {
        let mut catalog = Catalog::new();
        for &(name, kind) in KINDS_WITH_FORMS.iter() {
            catalog.insert(format!("{}_or", name), Law::only(kind, Operator::Or));
            catalog.insert(format!("{}_and", name), Law::only(kind, Operator::And));
        }
        for &(name, kind) in KINDS_WITHOUT_FORMS.iter() {
            catalog.insert(name, Law::any(kind));
        }
        catalog
    }
    /// Add a law, returning `self`
    pub fn with_law<S: Into<String>>(mut self, name: S, law: Law) -> Catalog {
        self.insert(name, law);
        self
    }
    /// Add (or replace) a law under `name`, returning its id
    pub fn insert<S: Into<String>>(&mut self, name: S, law: Law) -> LawId {
        let (idx, _) = self.laws.insert_full(name.into(), law);
        LawId(idx)
    }
    pub fn id(&self, name: &str) -> Option<LawId> {
        self.laws.get_full(name).map(|(idx, _, _)| LawId(idx))
    }
    pub fn name(&self, id: LawId) -> Option<&str> {
        self.laws.get_index(id.0).map(|(name, _)| name.as_str())
    }
    pub fn law(&self, id: LawId) -> Option<Law> {
        self.laws.get_index(id.0).map(|(_, law)| *law)
    }
    pub fn len(&self) -> usize {
        self.laws.len()
    }
    pub fn is_empty(&self) -> bool {
        self.laws.is_empty()
    }
    pub fn iter(&self) -> impl Iterator<Item = (LawId, &str, Law)> {
        self.laws.iter()
            .enumerate()
            .map(|(idx, (name, law))| (LawId(idx), name.as_str(), *law))
    }
}

impl Default for Catalog {
    fn default() -> Self {
        Catalog::merged()
    }
}

/// Which way round a law is being read:
/// forward takes `f` as the "before" side, reverse takes `g`
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
enum Orientation {
    Forward,
    Reverse,
}

/// The part of a comparison a law looks at, seen in one orientation
struct Window<'c, 'a> {
    cmp: &'c mut Comparison<'a>,
    orientation: Orientation,
}

impl Window<'_, '_> {
    /// Claim that exactly `before` symbols were rewritten into `after` symbols
    fn fits(&mut self, before: usize, after: usize) -> bool {
        match self.orientation {
            Orientation::Forward => self.cmp.same_suffix(before, after),
            Orientation::Reverse => self.cmp.same_suffix(after, before),
        }
    }
    fn before(&self, offset: usize) -> Symbol {
        match self.orientation {
            Orientation::Forward => self.cmp.f_at(offset),
            Orientation::Reverse => self.cmp.g_at(offset),
        }
    }
    fn after(&self, offset: usize) -> Symbol {
        match self.orientation {
            Orientation::Forward => self.cmp.g_at(offset),
            Orientation::Reverse => self.cmp.f_at(offset),
        }
    }
    /// Does the rewritten part of the "after" side read exactly `expected`?
    fn after_reads(&self, expected: &[Symbol]) -> bool {
        expected.iter()
            .enumerate()
            .all(|(i, &symbol)| self.after(i) == symbol)
    }
}

/// What a matched rewrite does to the binding environment, read before-to-after
enum Rewrite {
    /// net change in the occurrence count of each listed symbol
    Uses(Vec<(Symbol, i32)>),
    /// the "before" side is the shape, the "after" side is a lone variable naming it
    Names(VarId, Shape),
}

fn matched(condition: bool, rewrite: Rewrite) -> Option<Rewrite> {
    if condition { Some(rewrite) } else { None }
}

fn unchanged() -> Rewrite {
    Rewrite::Uses(vec![])
}

impl Law {
    /// A law accepting either connective
    pub fn any(kind: LawKind) -> Law {
        Law { kind, operator: None }
    }
    /// A law restricted to one connective
    pub fn only(kind: LawKind, operator: Operator) -> Law {
        Law { kind, operator: Some(operator) }
    }

    /// Is the comparison a single application of this law, in either direction,
    /// at its anchor? On success the environment is updated to match the new expression.
    pub fn apply(&self, cmp: &mut Comparison<'_>, env: &mut BindingEnvironment) -> bool {
        for &orientation in [Orientation::Forward, Orientation::Reverse].iter() {
            let rewrite = {
                let mut window = Window { cmp: &mut *cmp, orientation };
                self.rewrite(&mut window)
            };
            if let Some(rewrite) = rewrite {
                if settle(rewrite, orientation, env) {
                    debug!("{:?} matched {:?} at {}", self.kind, orientation, cmp.anchor());
                    return true;
                }
            }
        }
        false
    }

    /// The connective `symbol` stands for, if this law accepts it
    fn connective(&self, symbol: Symbol) -> Option<Operator> {
        let op = Operator::from_symbol(symbol)?;
        match self.operator {
            Some(only) if only != op => None,
            _ => Some(op),
        }
    }

    /// Check the structure of the window, before-to-after
    fn rewrite(&self, w: &mut Window<'_, '_>) -> Option<Rewrite> {
        match self.kind {
            LawKind::Identity => {
                // + a 0 = a, * a 1 = a
                if !w.fits(3, 1) { return None; }
                let op = self.connective(w.before(0))?;
                let a = w.before(1);
                matched(a.is_boolean()
                    && w.before(2) == op.identity()
                    && w.after(0) == a,
                    unchanged())
            }
            LawKind::Idempotent => {
                // + a a = a, * a a = a
                if !w.fits(3, 1) { return None; }
                self.connective(w.before(0))?;
                let a = w.before(1);
                matched(a.is_boolean()
                    && w.before(2) == a
                    && w.after(0) == a,
                    Rewrite::Uses(vec![(a, -1)]))
            }
            LawKind::Commutative => {
                // + a b = + b a, with the connective just before the anchor
                if !w.fits(2, 2) { return None; }
                self.connective(w.cmp.preceding()?)?;
                let (a, b) = (w.before(0), w.before(1));
                matched(a.is_boolean() && b.is_boolean()
                    && w.after_reads(&[b, a]),
                    unchanged())
            }
            LawKind::Associative => {
                // + a + b c = + + a b c, with the outer connective just before the anchor
                if !w.fits(4, 4) { return None; }
                let op = self.connective(w.cmp.preceding()?)?;
                let (a, b, c) = (w.before(0), w.before(2), w.before(3));
                matched(a.is_boolean() && b.is_boolean() && c.is_boolean()
                    && w.before(1) == op.symbol()
                    && w.after_reads(&[op.symbol(), a, b, c]),
                    unchanged())
            }
            LawKind::Distributive => {
                // + a * b c = * + a b + a c, * a + b c = + * a b * a c
                if !w.fits(5, 7) { return None; }
                let op = self.connective(w.before(0))?;
                let dual = op.dual().symbol();
                let (a, b, c) = (w.before(1), w.before(3), w.before(4));
                matched(a.is_boolean() && b.is_boolean() && c.is_boolean()
                    && w.before(2) == dual
                    && w.after_reads(&[dual, op.symbol(), a, b, op.symbol(), a, c]),
                    Rewrite::Uses(vec![(a, 1)]))
            }
            LawKind::DeMorgan => {
                // - + a b = * - a - b, - * a b = + - a - b
                if !w.fits(4, 5) { return None; }
                if w.before(0) != Symbol::Not { return None; }
                let op = self.connective(w.before(1))?;
                let (a, b) = (w.before(2), w.before(3));
                matched(a.is_boolean() && b.is_boolean()
                    && w.after_reads(&[op.dual().symbol(), Symbol::Not, a, Symbol::Not, b]),
                    unchanged())
            }
            LawKind::Complement => {
                // + a - a = 1, * a - a = 0
                if !w.fits(4, 1) { return None; }
                let op = self.connective(w.before(0))?;
                let a = w.before(1);
                matched(a.is_boolean()
                    && w.before(2) == Symbol::Not
                    && w.before(3) == a
                    && w.after(0) == op.annihilator(),
                    Rewrite::Uses(vec![(a, -2)]))
            }
            LawKind::Domination => {
                // + a 1 = 1, * a 0 = 0
                if !w.fits(3, 1) { return None; }
                let op = self.connective(w.before(0))?;
                let a = w.before(1);
                matched(a.is_boolean()
                    && w.before(2) == op.annihilator()
                    && w.after(0) == op.annihilator(),
                    Rewrite::Uses(vec![(a, -1)]))
            }
            LawKind::Absorption => {
                // + a * a b = a, * a + a b = a
                if !w.fits(5, 1) { return None; }
                let op = self.connective(w.before(0))?;
                let (a, b) = (w.before(1), w.before(4));
                matched(a.is_boolean() && b.is_boolean()
                    && w.before(2) == op.dual().symbol()
                    && w.before(3) == a
                    && w.after(0) == a,
                    Rewrite::Uses(vec![(a, -1), (b, -1)]))
            }
            LawKind::DoubleNegation => {
                // - - a = a
                if !w.fits(3, 1) { return None; }
                let a = w.before(2);
                matched(a.is_boolean()
                    && w.before(0) == Symbol::Not
                    && w.before(1) == Symbol::Not
                    && w.after(0) == a,
                    unchanged())
            }
            LawKind::Negation => {
                // - 1 = 0, - 0 = 1
                if !w.fits(2, 1) { return None; }
                let t = w.before(1);
                matched(t.is_truth_value()
                    && w.before(0) == Symbol::Not
                    && w.after(0) == t.negate_truth(),
                    unchanged())
            }
            LawKind::Substitution => {
                // - a = x
                if w.fits(2, 1) && w.before(0) == Symbol::Not && w.before(1).is_boolean() {
                    if let Some(x) = w.after(0).variable_id() {
                        return Some(Rewrite::Names(x, Shape::Negation(w.before(1))));
                    }
                }
                // + a b = x, * a b = x
                if !w.fits(3, 1) { return None; }
                let op = self.connective(w.before(0))?;
                let (a, b) = (w.before(1), w.before(2));
                let x = w.after(0).variable_id()?;
                matched(a.is_boolean() && b.is_boolean(),
                    Rewrite::Names(x, Shape::BinaryOp(op, a, b)))
            }
        }
    }
}

/// Bring the environment in line with a matched rewrite.
/// Returns `false` if the environment rules the rewrite out.
fn settle(rewrite: Rewrite, orientation: Orientation, env: &mut BindingEnvironment) -> bool {
    match (rewrite, orientation) {
        (Rewrite::Uses(changes), _) => {
            for (symbol, delta) in changes {
                let delta = match orientation {
                    Orientation::Forward => delta,
                    Orientation::Reverse => -delta,
                };
                for _ in 0..delta.abs() {
                    if delta > 0 {
                        env.increment(symbol);
                    } else {
                        env.decrement(symbol, true);
                    }
                }
            }
            true
        }
        // introducing a name: it must be fresh
        (Rewrite::Names(x, shape), Orientation::Forward) => env.bind(x, shape),
        // expanding a name back: it must stand for exactly this shape
        (Rewrite::Names(x, shape), Orientation::Reverse) => {
            if env.shape(x) != Some(shape) {
                return false;
            }
            env.decrement(Symbol::Variable(x), false);
            true
        }
    }
}
