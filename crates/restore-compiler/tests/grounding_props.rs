//! Property: grounding enumerates exactly the cartesian product of the
//! parameter domains, in odometer order, and compilation emits one goal per
//! defined instance.

use std::collections::BTreeSet;

use proptest::prelude::*;
use restore_compiler::{ground, instance_count, Compiler, EmptyPlanCheck, SolveOutcome};
use restore_model::{DomainSetup, FluentSchema, Model, State};

fn model_with(objects: usize, arity: usize) -> (Model, FluentSchema) {
    let mut model = Model::new("props");
    model.add_type("obj", None).unwrap();
    model
        .add_objects((0..objects).map(|i| format!("o{i}")), "obj")
        .unwrap();
    let params: Vec<(String, &str)> = (0..arity).map(|i| (format!("p{i}"), "obj")).collect();
    let params: Vec<(&str, &str)> = params.iter().map(|(n, t)| (n.as_str(), *t)).collect();
    let schema = FluentSchema::boolean("rel", &params);
    model.add_fluent(schema.clone()).unwrap();
    (model, schema)
}

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 64,
        .. ProptestConfig::default()
    })]

    #[test]
    fn grounding_is_the_cartesian_product(objects in 0usize..6, arity in 0usize..4) {
        let (model, schema) = model_with(objects, arity);

        let expected = (objects as u128).pow(arity as u32);
        prop_assert_eq!(instance_count(&model, &schema).unwrap(), expected);

        let atoms: Vec<_> = ground(&model, &schema).unwrap().collect();
        prop_assert_eq!(atoms.len() as u128, expected);

        let distinct: BTreeSet<_> = atoms.iter().collect();
        prop_assert_eq!(distinct.len(), atoms.len());

        // Odometer order over registration-ordered domains is lexicographic
        // on the object indices.
        let index = |name: &str| name[1..].parse::<usize>().unwrap();
        let keys: Vec<Vec<usize>> = atoms
            .iter()
            .map(|a| a.args.iter().map(|s| index(s.as_str())).collect())
            .collect();
        prop_assert!(keys.windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn one_goal_per_defined_instance(
        objects in 1usize..5,
        picks in prop::collection::vec((0usize..5, 0usize..5, any::<bool>()), 0..12),
    ) {
        let (mut model, schema) = model_with(objects, 2);
        let mut assigned = BTreeSet::new();
        for (a, b, value) in picks {
            let (a, b) = (a % objects, b % objects);
            model
                .set_initial_value(schema.atom([format!("o{a}"), format!("o{b}")]), value)
                .unwrap();
            assigned.insert((a, b));
        }

        let setup = DomainSetup::new().track(&schema);
        let summary = Compiler::default().compile_model(&mut model, &setup).unwrap();

        prop_assert_eq!(summary.restoration_goals, assigned.len());
        prop_assert_eq!(summary.schemas[0].defined, assigned.len());
        prop_assert_eq!(
            EmptyPlanCheck::check(model.goals(), &State::initial(&model)),
            Ok(SolveOutcome::Plan(Vec::new()))
        );
    }
}
