mod bindings;
pub use bindings::*;

mod suffix;
pub use suffix::*;

mod laws;
pub use laws::*;

mod verify;
pub use verify::*;

use crate::ast;
use crate::error::{BoxedErrorTrait, RequestError};

/// Parse the formula, every step and the target, resolve the law names against `catalog`,
/// then verify the proof, returning `Ok(true)` iff it reaches the target
pub fn check_proof(catalog: &Catalog, formula: &str, steps: &[(&str, &str)], target: &str) -> Result<bool, BoxedErrorTrait> {
    let initial = ast::parse(formula)?;
    let steps = steps
        .iter()
        .map(|&(law, source)| -> Result<ProofStep, BoxedErrorTrait> {
            let law = catalog.id(law)
                .ok_or_else(|| RequestError::UnknownLawName(law.to_string()))?;
            let result = ast::parse(source)?;
            Ok(ProofStep::new(law, result))
        })
        .collect::<Result<Vec<_>, _>>()?;
    let target = parse_target(target)?;
    let success = verify_proof(catalog, &initial, steps.as_slice(), target)?;
    Ok( success )
}

/// The target is written as a formula of one symbol
fn parse_target(source: &str) -> Result<ast::Symbol, BoxedErrorTrait> {
    let expr = ast::parse(source)?;
    match expr.content() {
        &[symbol] => Ok(symbol),
        _ => Err(RequestError::BadTarget(source.to_string()).into()),
    }
}

#[cfg(test)]
mod tests {
    use crate::ast::{parse, Expression, Symbol, Operator, VarId};
    use crate::error::VerifyError;
    use crate::prover::{Catalog, Verifier, ProofStep, BindingEnvironment, Shape, SuffixMemo, Comparison, verify_proof, LawId};

    /// One forward example per law of the merged catalog: (law, before, after)
    const EXAMPLES: [(&str, &str, &str); 14] = [
        ("identity", "+ x1 0", "x1"),
        ("identity", "* x1 1", "x1"),
        ("idempotent", "+ x1 x1", "x1"),
        ("commutative", "* x1 x2", "* x2 x1"),
        ("associative", "+ x1 + x2 x3", "+ + x1 x2 x3"),
        ("distributive", "+ x1 * x2 x3", "* + x1 x2 + x1 x3"),
        ("de_morgan", "- + x1 x2", "* - x1 - x2"),
        ("complement", "+ x1 - x1", "1"),
        ("domination", "* x1 0", "0"),
        ("absorption", "+ x1 * x1 x2", "x1"),
        ("double_negation", "- - x1", "x1"),
        ("negation", "- 1", "0"),
        ("negation", "- 0", "1"),
        ("substitution", "* x1 x2", "x3"),
    ];

    /// One forward example per law of the split catalog
    const SPLIT_EXAMPLES: [(&str, &str, &str); 21] = [
        ("identity_or", "+ x1 0", "x1"),
        ("identity_and", "* x1 1", "x1"),
        ("idempotent_or", "+ x1 x1", "x1"),
        ("idempotent_and", "* x1 x1", "x1"),
        ("commutative_or", "+ x1 x2", "+ x2 x1"),
        ("commutative_and", "* x1 x2", "* x2 x1"),
        ("associative_or", "+ x1 + x2 x3", "+ + x1 x2 x3"),
        ("associative_and", "* x1 * x2 x3", "* * x1 x2 x3"),
        ("distributive_or", "+ x1 * x2 x3", "* + x1 x2 + x1 x3"),
        ("distributive_and", "* x1 + x2 x3", "+ * x1 x2 * x1 x3"),
        ("de_morgan_or", "- + x1 x2", "* - x1 - x2"),
        ("de_morgan_and", "- * x1 x2", "+ - x1 - x2"),
        ("complement_or", "+ x1 - x1", "1"),
        ("complement_and", "* x1 - x1", "0"),
        ("domination_or", "+ x1 1", "1"),
        ("domination_and", "* x1 0", "0"),
        ("absorption_or", "+ x1 * x1 x2", "x1"),
        ("absorption_and", "* x1 + x1 x2", "x1"),
        ("double_negation", "- - x1", "x1"),
        ("negation", "- 0", "1"),
        ("substitution", "+ x1 x2", "x3"),
    ];

    fn expr(source: &str) -> Expression {
        parse(source).expect("test formulas should parse")
    }

    /// Verify `before => after` under `law`, with bindings initialized from `before`
    fn holds(catalog: &Catalog, law: &str, before: &str, after: &str) -> bool {
        let law = catalog.id(law).expect("law should be in the catalog");
        let (f, g) = (expr(before), expr(after));
        let mut verifier = Verifier::new(catalog);
        verifier.bindings_mut().initialize_from(&f);
        verifier.verify_step(&f, &g, law).expect("should not error")
    }

    fn count(env: &BindingEnvironment, var: u32) -> usize {
        env.count(VarId(var))
    }

    fn check_forward(catalog: &Catalog, examples: &[(&str, &str, &str)]) {
        for &(law, before, after) in examples {
            assert!(holds(catalog, law, before, after), "{}: {} => {}", law, before, after);
        }
    }
    fn check_reverse(catalog: &Catalog, examples: &[(&str, &str, &str)]) {
        for &(law, before, after) in examples {
            if law == "substitution" {
                continue; // expanding a name needs the name bound first, see below
            }
            assert!(holds(catalog, law, after, before), "{}: {} => {}", law, after, before);
        }
    }
    fn check_no_cross_matching(catalog: &Catalog, examples: &[(&str, &str, &str)]) {
        for &(law, before, after) in examples {
            for (_, other, _) in catalog.iter().filter(|&(_, name, _)| name != law) {
                assert!(!holds(catalog, other, before, after), "{} matched a {} step", other, law);
                if law != "substitution" {
                    assert!(!holds(catalog, other, after, before), "{} matched a reversed {} step", other, law);
                }
            }
        }
    }

    #[test]
    fn forward_laws() {
        check_forward(&Catalog::merged(), &EXAMPLES);
    }
    #[test]
    fn reverse_laws() {
        check_reverse(&Catalog::merged(), &EXAMPLES);
    }
    #[test]
    fn no_cross_matching() {
        check_no_cross_matching(&Catalog::merged(), &EXAMPLES);
    }
    #[test]
    fn split_forward_laws() {
        let catalog = Catalog::split();
        // every law of the catalog has an example
        for (_, name, _) in catalog.iter() {
            assert!(SPLIT_EXAMPLES.iter().any(|&(law, _, _)| law == name), "no example for {}", name);
        }
        check_forward(&catalog, &SPLIT_EXAMPLES);
    }
    #[test]
    fn split_reverse_laws() {
        check_reverse(&Catalog::split(), &SPLIT_EXAMPLES);
    }
    #[test]
    fn split_no_cross_matching() {
        // this includes the other connective's form of the same law
        check_no_cross_matching(&Catalog::split(), &SPLIT_EXAMPLES);
    }
    #[test]
    fn idempotent_is_not_commutative() {
        let catalog = Catalog::merged();
        assert!(!holds(&catalog, "commutative", "+ x1 x1", "x1"));
    }

    #[test]
    fn split_forms() {
        let catalog = Catalog::split();
        assert_eq!(catalog.len(), 21);
        assert!(holds(&catalog, "identity_or", "+ x1 0", "x1"));
        assert!(!holds(&catalog, "identity_and", "+ x1 0", "x1"));
        assert!(holds(&catalog, "identity_and", "* x1 1", "x1"));
        assert!(holds(&catalog, "commutative_and", "* x1 x2", "* x2 x1"));
        assert!(!holds(&catalog, "commutative_or", "* x1 x2", "* x2 x1"));
        assert!(holds(&catalog, "distributive_and", "* x1 + x2 x3", "+ * x1 x2 * x1 x3"));
        assert!(!holds(&catalog, "distributive_or", "* x1 + x2 x3", "+ * x1 x2 * x1 x3"));
        // the form of De Morgan is named by the connective under the negation
        assert!(holds(&catalog, "de_morgan_or", "- + x1 x2", "* - x1 - x2"));
        assert!(holds(&catalog, "de_morgan_or", "* - x1 - x2", "- + x1 x2"));
        assert!(!holds(&catalog, "de_morgan_and", "- + x1 x2", "* - x1 - x2"));
        assert!(holds(&catalog, "absorption_and", "* x1 + x1 x2", "x1"));
        assert!(holds(&catalog, "complement_and", "0", "* x4 - x4"));
        assert!(!holds(&catalog, "complement_or", "0", "* x4 - x4"));
        // substitution takes either connective in both catalogs
        assert!(holds(&catalog, "substitution", "+ x1 x2", "x3"));
    }
    #[test]
    fn catalog_ids_follow_insertion() {
        let merged = Catalog::merged();
        assert_eq!(merged.id("identity"), Some(LawId(0)));
        assert_eq!(merged.id("substitution"), Some(LawId(11)));
        assert_eq!(merged.name(LawId(9)), Some("double_negation"));
        let split = Catalog::split();
        assert_eq!(split.id("identity_and"), Some(LawId(1)));
        assert_eq!(split.id("absorption_and"), Some(LawId(17)));
        assert_eq!(split.id("substitution"), Some(LawId(20)));
        assert_eq!(split.id("identity"), None);
    }

    #[test]
    fn laws_inside_context() {
        let catalog = Catalog::merged();
        // the rewrite may sit anywhere, as long as nothing else changes
        assert!(holds(&catalog, "identity", "* x5 + x1 0", "* x5 x1"));
        assert!(holds(&catalog, "identity", "* + x1 0 - x1", "* x1 - x1"));
        assert!(holds(&catalog, "complement", "+ * x1 + x2 - x2 - x1", "+ * x1 1 - x1"));
        assert!(holds(&catalog, "double_negation", "- - - x1", "- x1"));
        // a second change after the window is not a single step
        assert!(!holds(&catalog, "identity", "* + x1 0 x2", "* x1 x3"));
        assert!(!holds(&catalog, "commutative", "+ x1 x2", "+ x2 x3"));
    }
    #[test]
    fn identical_expressions_fail() {
        let catalog = Catalog::merged();
        assert!(!holds(&catalog, "identity", "+ x1 0", "+ x1 0"));
    }
    #[test]
    fn associative_needs_same_connective() {
        let catalog = Catalog::merged();
        assert!(holds(&catalog, "associative", "* x1 * x2 x3", "* * x1 x2 x3"));
        assert!(!holds(&catalog, "associative", "* x1 + x2 x3", "* + x1 x2 x3"));
    }
    #[test]
    fn commutative_needs_room_before_anchor() {
        let catalog = Catalog::merged();
        assert!(!holds(&catalog, "commutative", "x1", "x2"));
        // the windows fit, but there is no connective before them
        assert!(!holds(&catalog, "commutative", "x1 x2", "x2 x1"));
        assert!(!holds(&catalog, "associative", "x1 + x2 x3", "+ x1 x2 x3"));
    }
    #[test]
    fn leaves_must_be_boolean() {
        let catalog = Catalog::merged();
        // `a` is `- x2` here, not a single leaf
        assert!(!holds(&catalog, "idempotent", "+ - x2 - x2", "- x2"));
        assert!(!holds(&catalog, "commutative", "* - x1 x2", "* x2 - x1"));
    }

    #[test]
    fn complement_and_domination_release_counts() {
        let catalog = Catalog::merged();
        let mut verifier = Verifier::new(&catalog);
        let f = expr("* x7 * x6 - x6");
        let g = expr("* x7 0");
        let h = expr("0");
        verifier.bindings_mut().initialize_from(&f);
        assert_eq!(count(verifier.bindings(), 6), 2);
        assert_eq!(count(verifier.bindings(), 7), 1);

        let complement = catalog.id("complement").unwrap();
        assert!(verifier.verify_step(&f, &g, complement).unwrap());
        assert!(!verifier.bindings().contains(VarId(6)));
        assert_eq!(count(verifier.bindings(), 7), 1);

        let domination = catalog.id("domination").unwrap();
        assert!(verifier.verify_step(&g, &h, domination).unwrap());
        assert!(!verifier.bindings().contains(VarId(7)));
        assert!(verifier.bindings().is_empty());
    }
    #[test]
    fn reverse_steps_restore_counts() {
        let catalog = Catalog::merged();
        let mut verifier = Verifier::new(&catalog);
        let (f, g) = (expr("1"), expr("+ x4 - x4"));
        verifier.bindings_mut().initialize_from(&f);
        assert!(verifier.verify_step(&f, &g, catalog.id("complement").unwrap()).unwrap());
        assert_eq!(count(verifier.bindings(), 4), 2);

        let (f, g) = (expr("x1"), expr("+ x1 * x1 x2"));
        verifier.bindings_mut().initialize_from(&f);
        assert!(verifier.verify_step(&f, &g, catalog.id("absorption").unwrap()).unwrap());
        assert_eq!(count(verifier.bindings(), 1), 2);
        assert_eq!(count(verifier.bindings(), 2), 1);

        let (f, g) = (expr("x1"), expr("+ x1 x1"));
        verifier.bindings_mut().initialize_from(&f);
        assert!(verifier.verify_step(&f, &g, catalog.id("idempotent").unwrap()).unwrap());
        assert_eq!(count(verifier.bindings(), 1), 2);

        let (f, g) = (expr("0"), expr("* x4 0"));
        verifier.bindings_mut().initialize_from(&f);
        assert!(verifier.verify_step(&f, &g, catalog.id("domination").unwrap()).unwrap());
        assert_eq!(count(verifier.bindings(), 4), 1);
        assert_eq!(verifier.bindings().len(), 1);
    }
    #[test]
    fn distributive_counts_shared_operand() {
        let catalog = Catalog::merged();
        let mut verifier = Verifier::new(&catalog);
        let (f, g) = (expr("+ x1 * x2 x3"), expr("* + x1 x2 + x1 x3"));
        verifier.bindings_mut().initialize_from(&f);
        let distributive = catalog.id("distributive").unwrap();
        assert!(verifier.verify_step(&f, &g, distributive).unwrap());
        assert_eq!(count(verifier.bindings(), 1), 2);
        assert!(verifier.verify_step(&g, &f, distributive).unwrap());
        assert_eq!(count(verifier.bindings(), 1), 1);
    }

    #[test]
    fn substitution_round_trip() {
        let catalog = Catalog::merged();
        let substitution = catalog.id("substitution").unwrap();
        let mut verifier = Verifier::new(&catalog);
        let (f, g) = (expr("* x1 x2"), expr("x3"));
        verifier.bindings_mut().initialize_from(&f);
        assert!(verifier.verify_step(&f, &g, substitution).unwrap());
        assert_eq!(verifier.bindings().shape(VarId(3)),
                   Some(Shape::BinaryOp(Operator::And, Symbol::var(1), Symbol::var(2))));
        // the operands are still in use through x3
        assert_eq!(count(verifier.bindings(), 1), 1);

        // x3 only expands to what it was bound to
        assert!(!verifier.verify_step(&g, &expr("+ x1 x2"), substitution).unwrap());
        assert!(verifier.verify_step(&g, &f, substitution).unwrap());
        assert!(!verifier.bindings().contains(VarId(3)));
        assert_eq!(count(verifier.bindings(), 1), 1);
        assert_eq!(count(verifier.bindings(), 2), 1);
    }
    #[test]
    fn substitution_of_negation() {
        let catalog = Catalog::merged();
        let substitution = catalog.id("substitution").unwrap();
        let mut verifier = Verifier::new(&catalog);
        let (f, g) = (expr("+ - x1 x1"), expr("+ x2 x1"));
        verifier.bindings_mut().initialize_from(&f);
        assert!(verifier.verify_step(&f, &g, substitution).unwrap());
        assert_eq!(verifier.bindings().shape(VarId(2)), Some(Shape::Negation(Symbol::var(1))));
        assert!(verifier.verify_step(&g, &f, substitution).unwrap());
        assert!(!verifier.bindings().contains(VarId(2)));
    }
    #[test]
    fn substitution_needs_a_fresh_name() {
        let catalog = Catalog::merged();
        // x2 is already in use
        assert!(!holds(&catalog, "substitution", "* x1 + x2 x1", "* x1 x2"));
        // x1 would stand for something containing itself
        assert!(!holds(&catalog, "substitution", "- x1", "x1"));
        // a constant can not name anything
        assert!(!holds(&catalog, "substitution", "- x1", "0"));
    }

    #[test]
    fn environment_cascades() {
        let mut env = BindingEnvironment::new();
        env.initialize_from(&expr("+ x1 x2"));
        assert!(env.bind(VarId(3), Shape::BinaryOp(Operator::Or, Symbol::var(1), Symbol::var(2))));
        env.increment(Symbol::var(3));
        assert_eq!(env.count(VarId(3)), 2);
        assert_eq!(env.count(VarId(1)), 2);
        env.decrement(Symbol::var(3), true);
        assert_eq!(env.count(VarId(3)), 1);
        assert_eq!(env.count(VarId(1)), 1);
        env.decrement(Symbol::var(3), false);
        assert!(!env.contains(VarId(3)));
        assert_eq!(env.count(VarId(2)), 1);
        // constants and operators are never counted
        env.increment(Symbol::True);
        env.increment(Symbol::Not);
        assert_eq!(env.len(), 2);
        // releasing something absent is harmless
        env.decrement(Symbol::var(9), true);
        assert_eq!(env.len(), 2);
    }
    #[test]
    fn environment_refuses_cycles() {
        let mut env = BindingEnvironment::new();
        assert!(!env.bind(VarId(1), Shape::Negation(Symbol::var(1))));
        assert!(env.bind(VarId(2), Shape::Negation(Symbol::var(1))));
        assert!(env.bind(VarId(3), Shape::BinaryOp(Operator::And, Symbol::var(2), Symbol::True)));
        // x1 is free, but naming `- x3` with it would loop through x3 and x2
        assert!(!env.bind(VarId(1), Shape::Negation(Symbol::var(3))));
        assert!(env.bind(VarId(1), Shape::Negation(Symbol::False)));
    }
    #[test]
    fn environment_initialize_resets() {
        let mut env = BindingEnvironment::new();
        env.initialize_from(&expr("* x7 * x6 - x6"));
        assert_eq!(env.count(VarId(6)), 2);
        env.initialize_from(&expr("x1"));
        assert_eq!(env.len(), 1);
        assert_eq!(env.shape(VarId(1)), Some(Shape::Unbound));
    }

    #[test]
    fn memo_is_scoped_to_one_pair() {
        let mut memo = SuffixMemo::new();
        let (f, g) = (expr("+ x1 0"), expr("x1"));
        {
            let mut cmp = Comparison::new(&f, &g, &mut memo).unwrap().unwrap();
            let first = cmp.same_suffix(3, 1);
            let second = cmp.same_suffix(3, 1);
            assert!(first);
            assert_eq!(first, second);
            assert_eq!(cmp.memo().cached(3, 1), Some(true));
            assert_eq!(cmp.memo().len(), 1);
        }
        // an unrelated pair, where the same windows do not fit
        let (f, g) = (expr("+ x1 x2"), expr("x1 x2"));
        let mut cmp = Comparison::new(&f, &g, &mut memo).unwrap().unwrap();
        assert_eq!(cmp.memo().cached(3, 1), None);
        assert!(!cmp.same_suffix(3, 1));
        assert_eq!(cmp.memo().cached(3, 1), Some(false));
    }
    #[test]
    fn comparison_requires_stops() {
        let mut memo = SuffixMemo::new();
        let f = Expression::new(vec![Symbol::Not, Symbol::True]);
        let g = expr("0");
        assert!(Comparison::new(&f, &g, &mut memo).is_err());
        assert!(Comparison::new(&g, &g, &mut memo).unwrap().is_none());
    }

    #[test]
    fn sequence_complement_then_domination() {
        let catalog = Catalog::merged();
        let initial = expr("* x7 * x6 - x6");
        let steps = vec![
            ProofStep::new(catalog.id("complement").unwrap(), expr("* x7 0")),
            ProofStep::new(catalog.id("domination").unwrap(), expr("0")),
        ];
        assert_eq!(verify_proof(&catalog, &initial, &steps, Symbol::False), Ok(true));
        // reaching the wrong constant is not a proof
        assert_eq!(verify_proof(&catalog, &initial, &steps, Symbol::True), Ok(false));
    }
    #[test]
    fn sequence_stops_at_target() {
        let catalog = Catalog::merged();
        let initial = expr("- 1");
        let steps = vec![
            ProofStep::new(catalog.id("negation").unwrap(), expr("0")),
            // never looked at
            ProofStep::new(catalog.id("identity").unwrap(), expr("+ x1 x2")),
        ];
        assert_eq!(verify_proof(&catalog, &initial, &steps, Symbol::False), Ok(true));
    }
    #[test]
    fn sequence_fails_on_bad_step() {
        let catalog = Catalog::merged();
        let initial = expr("* x7 * x6 - x6");
        let steps = vec![
            ProofStep::new(catalog.id("domination").unwrap(), expr("* x7 0")),
            ProofStep::new(catalog.id("domination").unwrap(), expr("0")),
        ];
        assert_eq!(verify_proof(&catalog, &initial, &steps, Symbol::False), Ok(false));
    }
    #[test]
    fn sequence_rejects_degenerate_input() {
        let catalog = Catalog::merged();
        let initial = expr("- 1");
        let steps = vec![ProofStep::new(catalog.id("negation").unwrap(), expr("0"))];
        assert_eq!(verify_proof(&catalog, &initial, &[], Symbol::False), Err(VerifyError::EmptyProof));
        assert_eq!(verify_proof(&catalog, &initial, &steps, Symbol::var(1)),
                   Err(VerifyError::InvalidTarget(Symbol::var(1))));
        let unterminated = Expression::new(vec![Symbol::Not, Symbol::True]);
        assert_eq!(verify_proof(&catalog, &unterminated, &steps, Symbol::False),
                   Err(VerifyError::MalformedExpression { step: None }));
        let empty = Expression::new(vec![Symbol::Stop]);
        assert_eq!(verify_proof(&catalog, &empty, &steps, Symbol::False),
                   Err(VerifyError::MalformedExpression { step: None }));
        let bad_step = vec![ProofStep::new(catalog.id("negation").unwrap(), Expression::new(vec![Symbol::False]))];
        assert_eq!(verify_proof(&catalog, &initial, &bad_step, Symbol::False),
                   Err(VerifyError::MalformedExpression { step: Some(0) }));
        let unknown = vec![ProofStep::new(LawId(40), expr("0"))];
        assert_eq!(verify_proof(&catalog, &initial, &unknown, Symbol::False),
                   Err(VerifyError::UnknownLaw(LawId(40))));
    }
    #[test]
    fn double_negation_end_to_end() {
        let catalog = Catalog::merged();
        let (f, g) = (expr("- - x7"), expr("x7"));
        let mut verifier = Verifier::new(&catalog);
        verifier.bindings_mut().initialize_from(&f);
        assert_eq!(verifier.verify_step(&f, &g, catalog.id("double_negation").unwrap()), Ok(true));
        assert_eq!(verifier.verify_step(&f, &g, catalog.id("commutative").unwrap()), Ok(false));
    }
}
