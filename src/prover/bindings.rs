use std::collections::BTreeMap;
use std::fmt;
use crate::ast::{Symbol, VarId, Operator, Expression};

/// What a variable stands for
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Shape {
    /// a free variable of the formula, it denotes nothing but itself
    Unbound,
    /// introduced by substitution for `- a`
    Negation(Symbol),
    /// introduced by substitution for `+ a b` or `* a b`
    BinaryOp(Operator, Symbol, Symbol),
}

impl Shape {
    /// The leaf symbols this shape refers to
    pub fn operands(&self) -> impl Iterator<Item = Symbol> {
        let (a, b) = match *self {
            Shape::Unbound => (None, None),
            Shape::Negation(a) => (Some(a), None),
            Shape::BinaryOp(_, a, b) => (Some(a), Some(b)),
        };
        a.into_iter().chain(b)
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Binding {
    /// how many times the variable is in use, directly or through other bindings
    pub count: usize,
    pub shape: Shape,
}

/// Reference counts for every variable a proof currently uses,
/// and the sub-expression behind every variable introduced by substitution.
///
/// An entry exists iff its count is positive.
#[derive(Clone, Default, PartialEq, Eq)]
pub struct BindingEnvironment {
    bindings: BTreeMap<VarId, Binding>,
}

impl BindingEnvironment {
    pub fn new() -> BindingEnvironment {
        BindingEnvironment { bindings: BTreeMap::new() }
    }
    pub fn clear(&mut self) {
        self.bindings.clear();
    }
    /// Forget everything, then count every leaf of `formula` up to its `Stop`
    pub fn initialize_from(&mut self, formula: &Expression) {
        self.clear();
        for &symbol in formula.content() {
            self.increment(symbol);
        }
    }
    pub fn get(&self, var: VarId) -> Option<&Binding> {
        self.bindings.get(&var)
    }
    pub fn contains(&self, var: VarId) -> bool {
        self.bindings.contains_key(&var)
    }
    /// The occurrence count of `var`, zero when absent
    pub fn count(&self, var: VarId) -> usize {
        self.get(var).map(|b| b.count).unwrap_or(0)
    }
    pub fn shape(&self, var: VarId) -> Option<Shape> {
        self.get(var).map(|b| b.shape)
    }
    pub fn len(&self) -> usize {
        self.bindings.len()
    }
    pub fn is_empty(&self) -> bool {
        self.bindings.is_empty()
    }
    pub fn iter(&self) -> impl Iterator<Item = (&VarId, &Binding)> {
        self.bindings.iter()
    }
    /// Record one more use of `symbol`.
    /// Using a bound variable also uses whatever it denotes.
    pub fn increment(&mut self, symbol: Symbol) {
        let var = match symbol.variable_id() {
            Some(var) => var,
            None => return,
        };
        let binding = self.bindings.entry(var)
            .or_insert(Binding { count: 0, shape: Shape::Unbound });
        binding.count += 1;
        let shape = binding.shape;
        trace!("increment {:?} -> {}", var, binding.count);
        for operand in shape.operands() {
            self.increment(operand);
        }
    }
    /// Record one less use of `symbol`, dropping the entry once nothing uses it.
    /// With `cascading`, the uses of whatever it denotes are released as well.
    pub fn decrement(&mut self, symbol: Symbol, cascading: bool) {
        let var = match symbol.variable_id() {
            Some(var) => var,
            None => return,
        };
        let shape = match self.bindings.get_mut(&var) {
            Some(binding) => {
                binding.count = binding.count.saturating_sub(1);
                trace!("decrement {:?} -> {}", var, binding.count);
                let shape = binding.shape;
                if binding.count == 0 {
                    self.bindings.remove(&var);
                }
                shape
            }
            None => return,
        };
        if cascading {
            for operand in shape.operands() {
                self.decrement(operand, true);
            }
        }
    }
    /// Introduce `var` as a name for `shape`, with a single use.
    ///
    /// Refuses (returning `false`) if `var` is already in use, or if `shape`
    /// reaches back to `var` through existing bindings.
    pub fn bind(&mut self, var: VarId, shape: Shape) -> bool {
        if self.contains(var) || self.reaches(shape, var) {
            return false;
        }
        debug!("bind {:?} := {:?}", var, shape);
        self.bindings.insert(var, Binding { count: 1, shape });
        true
    }
    /// Does `shape` mention `target`, directly or through the shapes of its operands?
    fn reaches(&self, shape: Shape, target: VarId) -> bool {
        let mut pending = shape.operands().collect::<Vec<_>>();
        // bounded by the number of bindings, since every visited variable is dropped
        let mut visited = Vec::new();
        while let Some(symbol) = pending.pop() {
            let var = match symbol.variable_id() {
                Some(var) => var,
                None => continue,
            };
            if var == target {
                return true;
            }
            if visited.contains(&var) {
                continue;
            }
            visited.push(var);
            if let Some(binding) = self.bindings.get(&var) {
                pending.extend(binding.shape.operands());
            }
        }
        false
    }
}

impl fmt::Debug for BindingEnvironment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map()
            .entries(self.bindings.iter().map(|(var, b)| (var, (b.count, b.shape))))
            .finish()
    }
}
