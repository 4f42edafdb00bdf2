//! Property tests over random expression trees.

use proptest::prelude::*;
use sat_oracle::quantum::emulator::ClassicalEmulator;
use sat_oracle::quantum::oracle::OracleCompiler;
use sat_oracle::sat::assignment::Assignment;
use sat_oracle::sat::cnf::CnfFormula;
use sat_oracle::sat::evaluator::ClassicalEvaluator;
use sat_oracle::sat::expr::Expr;
use sat_oracle::sat::formula::Formula;
use sat_oracle::sat::variables::Variables;
use sat_oracle::search::iterations::{optimal_iterations, success_probability};

const NAMES: [&str; 4] = ["A", "B", "C", "D"];

fn arb_expr() -> impl Strategy<Value = Expr> {
    let leaf = prop_oneof![
        8 => (0..NAMES.len()).prop_map(Expr::Var),
        1 => any::<bool>().prop_map(Expr::Val),
    ];
    leaf.prop_recursive(4, 24, 2, |inner| {
        prop_oneof![
            inner.clone().prop_map(Expr::not),
            (inner.clone(), inner.clone()).prop_map(|(a, b)| Expr::and(a, b)),
            (inner.clone(), inner).prop_map(|(a, b)| Expr::or(a, b)),
        ]
    })
}

fn formula(expr: Expr) -> Formula {
    let text = expr.display(&Variables::new(NAMES)).to_string();
    Formula::from_expr(&text, expr, Variables::new(NAMES))
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(256))]

    #[test]
    fn cnf_is_equivalent_to_expression(expr in arb_expr()) {
        let cnf = CnfFormula::from_expr(&expr, Variables::new(NAMES));
        for i in 0..1usize << NAMES.len() {
            let a = Assignment::from_index(i, NAMES.len());
            prop_assert_eq!(expr.eval(&a), cnf.eval(&a), "at {}", a);
        }
    }

    #[test]
    fn cnf_clauses_are_simplified(expr in arb_expr()) {
        let cnf = CnfFormula::from_expr(&expr, Variables::new(NAMES));
        for clause in cnf.iter() {
            prop_assert!(!clause.is_tautology());
            let vars: Vec<_> = clause.iter().map(|l| l.variable()).collect();
            let mut unique = vars.clone();
            unique.dedup();
            prop_assert_eq!(vars, unique);
        }
    }

    #[test]
    fn oracle_marks_exactly_the_solutions(expr in arb_expr()) {
        let formula = formula(expr);
        let oracle = OracleCompiler::compile(formula.cnf()).unwrap();
        let check = ClassicalEmulator::default().check_oracle(&oracle, &formula).unwrap();
        prop_assert!(check.is_sound(), "{:?}", check);
        prop_assert_eq!(check.marked, ClassicalEvaluator::default().solve(&formula).unwrap());
    }

    #[test]
    fn optimal_iterations_succeed_often(exp in 2u32..12, fraction in 0.0f64..0.5) {
        let space = 1usize << exp;
        let solutions = ((space as f64 * fraction) as usize).max(1);
        let k = optimal_iterations(solutions, space);
        prop_assert!(k >= 1);
        prop_assert!(success_probability(k, solutions, space) >= 0.5);
    }
}
