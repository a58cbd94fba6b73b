use itertools::Itertools;
use crate::ast::{Expression, Symbol};
use crate::error::VerifyError;
use crate::prover::{Catalog, LawId, BindingEnvironment, SuffixMemo, Comparison};

/// A claimed rewrite: `law` turns the previous expression into `result`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProofStep {
    pub law: LawId,
    pub result: Expression,
}

impl ProofStep {
    pub fn new(law: LawId, result: Expression) -> ProofStep {
        ProofStep { law, result }
    }
}

/// Checks proofs against one catalog.
///
/// Holds the mutable state of a single verification in flight,
/// so concurrent verifications each need a verifier of their own.
#[derive(Debug)]
pub struct Verifier<'c> {
    catalog: &'c Catalog,
    bindings: BindingEnvironment,
    memo: SuffixMemo,
}

impl<'c> Verifier<'c> {
    pub fn new(catalog: &'c Catalog) -> Verifier<'c> {
        Verifier {
            catalog,
            bindings: BindingEnvironment::new(),
            memo: SuffixMemo::new(),
        }
    }
    pub fn catalog(&self) -> &Catalog {
        self.catalog
    }
    pub fn bindings(&self) -> &BindingEnvironment {
        &self.bindings
    }
    pub fn bindings_mut(&mut self) -> &mut BindingEnvironment {
        &mut self.bindings
    }
    pub fn memo(&self) -> &SuffixMemo {
        &self.memo
    }
    /// Is `g` the result of applying `law` once to `f`, in either direction?
    ///
    /// `Ok(false)` says the step is not a single application of that law
    /// at the place where `f` and `g` first differ. It says nothing about
    /// whether the two expressions are equivalent.
    pub fn verify_step(&mut self, f: &Expression, g: &Expression, law: LawId) -> Result<bool, VerifyError> {
        // errors report `f` as the initial formula and `g` as step 0
        self.check_step(f, g, law, None, Some(0))
    }
    fn check_step(&mut self, f: &Expression, g: &Expression, law_id: LawId,
                  f_step: Option<usize>, g_step: Option<usize>) -> Result<bool, VerifyError> {
        let law = self.catalog.law(law_id).ok_or(VerifyError::UnknownLaw(law_id))?;
        let mut cmp = match Comparison::new(f, g, &mut self.memo) {
            Ok(Some(cmp)) => cmp,
            Ok(None) => {
                // both expressions must differ somewhere before either stops
                debug!("no dissimilarity between {} and {}", f, g);
                return Ok(false);
            }
            Err(missing) => return Err(missing.at(f_step, g_step)),
        };
        let verdict = law.apply(&mut cmp, &mut self.bindings);
        debug!("{} => {} by {} at {}: {}",
               f, g, self.catalog.name(law_id).unwrap_or("?"), cmp.anchor(), verdict);
        Ok(verdict)
    }
    /// Does `steps`, starting from `initial`, rewrite its way to the lone constant `target`?
    ///
    /// The bindings are rebuilt from `initial`. Verification stops at the first step
    /// whose result is exactly `target`; anything after it is not looked at.
    pub fn verify_sequence(&mut self, initial: &Expression, steps: &[ProofStep], target: Symbol) -> Result<bool, VerifyError> {
        if steps.is_empty() {
            warn!("rejected an empty proof");
            return Err(VerifyError::EmptyProof);
        }
        if !target.is_truth_value() {
            warn!("rejected target {}", target);
            return Err(VerifyError::InvalidTarget(target));
        }
        match initial.locate_stop() {
            // the initial formula must have some content
            Some(stop) if stop > 0 => {}
            _ => {
                warn!("rejected initial formula {:?}", initial);
                return Err(VerifyError::MalformedExpression { step: None });
            }
        }
        self.bindings.initialize_from(initial);

        let expressions = std::iter::once(initial)
            .chain(steps.iter().map(|step| &step.result));
        for (i, (f, g)) in expressions.tuple_windows().enumerate() {
            let f_step = if i == 0 { None } else { Some(i - 1) };
            if !self.check_step(f, g, steps[i].law, f_step, Some(i))? {
                debug!("step {} failed", i);
                return Ok(false);
            }
            if g.is_single(target) {
                debug!("reached {} at step {}", target, i);
                return Ok(true);
            }
        }
        // ran out of steps before reaching the target
        Ok(false)
    }
}

/// Check a whole proof with a fresh verifier
pub fn verify_proof(catalog: &Catalog, initial: &Expression, steps: &[ProofStep], target: Symbol) -> Result<bool, VerifyError> {
    Verifier::new(catalog).verify_sequence(initial, steps, target)
}
