use crate::analyzer::session::{AnalysisSession, MODULE_BODY_NAME};
use crate::analyzer_tests::helpers::{
    analyze, assign, chain_of, constant, func, list, name, program,
};

#[cfg(test)]
mod sweep_order_tests {
    use super::*;

    #[test]
    fn function_bodies_come_first_in_source_order_then_the_module() {
        let report = analyze(vec![
            assign("top", list(vec![]), 1),
            func("alpha", vec![], vec![assign("x", list(vec![]), 3)], 2),
            func("beta", vec![], vec![assign("y", list(vec![]), 6)], 5),
            assign("more", list(vec![]), 8),
        ]);

        let names: Vec<&str> = report.bodies.iter().map(|b| b.name.as_str()).collect();
        assert_eq!(names, vec!["alpha", "beta", MODULE_BODY_NAME]);
    }

    #[test]
    fn module_statements_skip_function_definitions() {
        let report = analyze(vec![
            func("f", vec![], vec![assign("inner", list(vec![]), 2)], 1),
            assign("outer", list(vec![]), 4),
        ]);

        let module = report
            .bodies
            .iter()
            .find(|b| b.name == MODULE_BODY_NAME)
            .expect("module body report");
        assert!(module.bindings.iter().any(|b| b.name == "outer"));
        assert!(
            !module.bindings.iter().any(|b| b.name == "inner"),
            "function-local names must not leak into module scope"
        );
    }

    #[test]
    fn nested_function_definitions_are_ignored() {
        let report = analyze(vec![func(
            "outer",
            vec![],
            vec![
                assign("a", list(vec![]), 2),
                func("inner", vec![], vec![assign("b", list(vec![]), 4)], 3),
            ],
            1,
        )]);

        let outer = report
            .bodies
            .iter()
            .find(|b| b.name == "outer")
            .expect("outer body report");
        assert!(!outer.bindings.iter().any(|b| b.name == "b"));
        assert!(
            !report.bodies.iter().any(|b| b.name == "inner"),
            "nested bodies are not analyzed"
        );
    }
}

#[cfg(test)]
mod dump_tests {
    use super::*;

    #[test]
    fn dumps_are_sorted_by_name() {
        let report = analyze(vec![
            assign("zebra", list(vec![]), 1),
            assign("apple", list(vec![]), 2),
            assign("mango", list(vec![]), 3),
        ]);

        let module = &report.bodies[0];
        let names: Vec<&str> = module.bindings.iter().map(|b| b.name.as_str()).collect();
        let mut sorted = names.clone();
        sorted.sort_unstable();
        assert_eq!(names, sorted);
    }

    #[test]
    fn dumps_include_synthetic_interior_keys() {
        let report = analyze(vec![assign("a", list(vec![list(vec![])]), 1)]);

        let module = &report.bodies[0];
        assert!(
            module.bindings.iter().any(|b| b.name.starts_with('@')),
            "interior levels appear in the dump under their generated keys"
        );
    }

    #[test]
    fn chains_render_every_level() {
        let report = analyze(vec![assign(
            "a",
            list(vec![list(vec![list(vec![])])]),
            1,
        )]);

        let chain = chain_of(&report, MODULE_BODY_NAME, "a");
        assert_eq!(
            chain.matches(" -> ").count(),
            2,
            "three levels render as two links: {chain}"
        );
    }

    #[test]
    fn constant_right_hand_sides_leave_the_binding_unchanged() {
        let report = analyze(vec![
            assign("a", list(vec![]), 1),
            // A documented precision gap: the analyzer does not track
            // re-binding to scalars
            assign("a", constant(), 2),
        ]);

        assert!(
            chain_of(&report, MODULE_BODY_NAME, "a").starts_with('n'),
            "a keeps its container binding"
        );
    }
}

#[cfg(test)]
mod determinism_tests {
    use super::*;

    #[test]
    fn identical_trees_produce_identical_reports() {
        let build = || {
            program(vec![
                func(
                    "f",
                    vec![],
                    vec![
                        assign("a", list(vec![list(vec![])]), 2),
                        assign("b", name("a"), 3),
                    ],
                    1,
                ),
                assign("top", list(vec![list(vec![constant()])]), 5),
            ])
        };

        let first = AnalysisSession::new().analyze(&build());
        let second = AnalysisSession::new().analyze(&build());

        let first_json = serde_json::to_string(&first).expect("report serializes");
        let second_json = serde_json::to_string(&second).expect("report serializes");
        assert_eq!(
            first_json, second_json,
            "two runs over the same tree must be byte-identical"
        );
    }

    #[test]
    fn synthetic_keys_count_through_the_whole_run() {
        let report = analyze(vec![
            func("f", vec![], vec![assign("a", list(vec![list(vec![])]), 2)], 1),
            func("g", vec![], vec![assign("b", list(vec![list(vec![])]), 5)], 4),
        ]);

        let g = report
            .bodies
            .iter()
            .find(|b| b.name == "g")
            .expect("g body report");
        assert!(
            g.bindings.iter().any(|b| b.name == "@1"),
            "the key counter is scoped to the run, not the body: {:?}",
            g.bindings
        );
    }
}
