use restore_compiler::{
    compile, CompileError, CompileOptions, Compiler, EmptyPlanCheck, RestorationStrategy,
    SolveOutcome, Solver,
};
use restore_domains::{Blocksworld, Museum, Network};
use restore_model::{Atom, DomainSetup, FluentSchema, Formula, Model, Term, Value};

fn blocks(model: &mut Model) -> restore_model::Result<DomainSetup> {
    model.add_type("block", None)?;
    model.add_objects(["A", "B", "C"], "block")?;
    let on = FluentSchema::boolean("on", &[("x", "block"), ("y", "block")]);
    model.add_fluent(on.clone())?;
    model.set_initial_value(on.atom(["A", "B"]), true)?;
    Ok(DomainSetup::new().track(&on))
}

fn rendered(goals: &[Formula]) -> Vec<String> {
    goals.iter().map(|g| g.to_string()).collect()
}

#[test]
fn undefined_instances_get_no_goal() {
    let compiled = compile(&("blocks", blocks), &CompileOptions::default()).unwrap();

    assert_eq!(compiled.summary().schemas[0].candidates, 9);
    assert_eq!(compiled.summary().schemas[0].defined, 1);
    assert_eq!(
        rendered(compiled.goals()),
        vec!["(on(A, B) ↔ initial_on(A, B))"]
    );

    let model = compiled.model();
    assert_eq!(
        model.initial_value(&Atom::new("initial_on", ["A", "B"])),
        Some(Value::Bool(true))
    );
    assert_eq!(model.initial_value(&Atom::new("initial_on", ["B", "A"])), None);
}

#[test]
fn defaults_make_every_instance_defined() {
    let with_default = |model: &mut Model| -> restore_model::Result<DomainSetup> {
        model.add_type("block", None)?;
        model.add_objects(["A", "B", "C"], "block")?;
        let on = FluentSchema::boolean("on", &[("x", "block"), ("y", "block")]).with_default(false);
        model.add_fluent(on.clone())?;
        model.set_initial_value(on.atom(["A", "B"]), true)?;
        Ok(DomainSetup::new().track(&on))
    };
    let compiled = compile(&("blocks", with_default), &CompileOptions::default()).unwrap();

    let goals = rendered(compiled.goals());
    assert_eq!(goals.len(), 9);
    assert_eq!(goals[0], "(on(A, A) ↔ initial_on(A, A))");
    assert_eq!(goals[1], "(on(A, B) ↔ initial_on(A, B))");
    assert_eq!(goals[8], "(on(C, C) ↔ initial_on(C, C))");

    // Shadow instances carry explicit values, not a default.
    assert!(compiled.model().fluent("initial_on").unwrap().default.is_none());
    assert_eq!(
        compiled
            .model()
            .initial_value(&Atom::new("initial_on", ["C", "A"])),
        Some(Value::Bool(false))
    );
}

#[test]
fn unknown_type_leaves_model_untouched() {
    let mut model = Model::new("blocks");
    let _ = blocks(&mut model).unwrap();
    let ghost = FluentSchema::boolean("haunts", &[("g", "ghost")]);
    let setup = DomainSetup::new()
        .track(&FluentSchema::boolean("on", &[("x", "block"), ("y", "block")]))
        .track(&ghost);

    let err = Compiler::default().compile_model(&mut model, &setup).unwrap_err();
    assert_eq!(
        err,
        CompileError::UnknownType {
            fluent: "haunts".to_string(),
            param: "g".to_string(),
            ty: "ghost".to_string(),
        }
    );
    assert!(model.goals().is_empty());
    assert!(!model.has_fluent("initial_on"));
    assert_eq!(model.shadows().count(), 0);
}

#[test]
fn manual_strategy_still_validates_tracked_fluents() {
    let mut model = Model::new("blocks");
    let _ = blocks(&mut model).unwrap();
    let on = Atom::new("on", ["A", "B"]);
    let setup = DomainSetup::new()
        .track(&FluentSchema::boolean("haunts", &[("g", "ghost")]))
        .restore(Formula::atom(on));
    let compiler =
        Compiler::new(CompileOptions::default().with_restoration(RestorationStrategy::Manual));

    let err = compiler.compile_model(&mut model, &setup).unwrap_err();
    assert_eq!(
        err,
        CompileError::UnknownType {
            fluent: "haunts".to_string(),
            param: "g".to_string(),
            ty: "ghost".to_string(),
        }
    );
    assert!(model.goals().is_empty());

    let stray = DomainSetup::new().track(&FluentSchema::boolean("clear", &[("x", "block")]));
    assert_eq!(
        compiler.compile_model(&mut model, &stray).unwrap_err(),
        CompileError::UnregisteredSchema("clear".to_string())
    );
    assert!(model.goals().is_empty());
}

#[test]
fn unregistered_schema_is_rejected() {
    let mut model = Model::new("blocks");
    let _ = blocks(&mut model).unwrap();
    let stray = FluentSchema::boolean("clear", &[("x", "block")]);

    let err = Compiler::default()
        .compile_model(&mut model, &DomainSetup::new().track(&stray))
        .unwrap_err();
    assert_eq!(err, CompileError::UnregisteredSchema("clear".to_string()));
}

#[test]
fn shadow_name_collision_is_fatal() {
    let mut model = Model::new("blocks");
    let setup = blocks(&mut model).unwrap();
    model
        .add_fluent(FluentSchema::boolean("initial_on", &[]))
        .unwrap();

    let err = Compiler::default().compile_model(&mut model, &setup).unwrap_err();
    assert_eq!(
        err,
        CompileError::ShadowNameCollision {
            original: "on".to_string(),
            shadow: "initial_on".to_string(),
        }
    );
    assert!(model.goals().is_empty());
}

#[test]
fn custom_prefix_avoids_collision() {
    let mut model = Model::new("blocks");
    let setup = blocks(&mut model).unwrap();
    model
        .add_fluent(FluentSchema::boolean("initial_on", &[]))
        .unwrap();

    let compiler = Compiler::new(CompileOptions::default().with_shadow_prefix("snap_"));
    compiler.compile_model(&mut model, &setup).unwrap();

    assert_eq!(model.shadow_of("on"), Some("snap_on"));
    assert_eq!(rendered(model.goals()), vec!["(on(A, B) ↔ snap_on(A, B))"]);
}

#[test]
fn tracking_a_fluent_twice_shadows_it_once() {
    let mut model = Model::new("blocks");
    let setup = blocks(&mut model).unwrap();
    let twice = DomainSetup {
        tracked: vec![setup.tracked[0].clone(), setup.tracked[0].clone()],
        ..DomainSetup::default()
    };

    let summary = Compiler::default().compile_model(&mut model, &twice).unwrap();
    assert_eq!(summary.schemas.len(), 1);
    assert_eq!(summary.restoration_goals, 1);
    assert_eq!(model.shadows().count(), 1);
}

#[test]
fn success_conditions_follow_restoration_verbatim() {
    let with_success = |model: &mut Model| -> restore_model::Result<DomainSetup> {
        let setup = blocks(model)?;
        let p = FluentSchema::boolean("p", &[]).with_default(false);
        model.add_fluent(p.clone())?;
        Ok(setup
            .succeed_when(p.holds(Vec::<String>::new()))
            .succeed_when(Formula::top())
            .succeed_when(p.holds(Vec::<String>::new())))
    };
    let compiled = compile(&("blocks", with_success), &CompileOptions::default()).unwrap();

    assert_eq!(
        rendered(compiled.goals()),
        vec!["(on(A, B) ↔ initial_on(A, B))", "p", "⊤", "p"]
    );
    assert_eq!(compiled.success_goals().len(), 3);
}

#[test]
fn existing_goals_are_kept_in_front() {
    let mut model = Model::new("blocks");
    let setup = blocks(&mut model).unwrap();
    model.add_goal(Formula::bottom());

    Compiler::default().compile_model(&mut model, &setup).unwrap();
    assert_eq!(
        rendered(model.goals()),
        vec!["⊥", "(on(A, B) ↔ initial_on(A, B))"]
    );
}

#[test]
fn int_fluents_restore_by_equality() {
    let counters = |model: &mut Model| -> restore_model::Result<DomainSetup> {
        model.add_type("room", None)?;
        model.add_objects(["hall", "vault"], "room")?;
        let traces = FluentSchema::int("traces", &[("r", "room")]).with_default(0i64);
        model.add_fluent(traces.clone())?;
        model.set_initial_value(traces.atom(["vault"]), 2i64)?;
        Ok(DomainSetup::new().track(&traces))
    };
    let compiled = compile(&("counters", counters), &CompileOptions::default()).unwrap();

    assert_eq!(
        compiled.goals(),
        &[
            Formula::equals(
                Term::fluent(Atom::new("traces", ["hall"])),
                Term::fluent(Atom::new("initial_traces", ["hall"])),
            ),
            Formula::equals(
                Term::fluent(Atom::new("traces", ["vault"])),
                Term::fluent(Atom::new("initial_traces", ["vault"])),
            ),
        ]
    );
    assert_eq!(
        EmptyPlanCheck.solve(&compiled),
        Ok(SolveOutcome::Plan(Vec::new()))
    );
}

#[test]
fn compiled_initial_state_satisfies_restoration() {
    let options = CompileOptions::default();
    for compiled in [
        compile(&Blocksworld, &options).unwrap(),
        compile(&Museum::default(), &options).unwrap(),
        compile(&Network, &options).unwrap(),
    ] {
        let state = compiled.initial_state();
        for goal in compiled.restoration_goals() {
            assert_eq!(goal.evaluate(&state), Some(true), "{}: {}", compiled.domain(), goal);
        }
    }
}

#[test]
fn blocksworld_compiles() {
    let compiled = compile(&Blocksworld, &CompileOptions::default()).unwrap();

    assert_eq!(compiled.restoration_goals().len(), 15);
    assert_eq!(
        compiled.success_goals(),
        &[Formula::atom(Atom::nullary("hand_empty"))]
    );
    assert_eq!(compiled.receipt().goal_count(), 16);
    assert_eq!(compiled.receipt().domain, "blocksworld");
    assert_eq!(
        EmptyPlanCheck.solve(&compiled),
        Ok(SolveOutcome::Plan(Vec::new()))
    );
}

#[test]
fn museum_requires_a_heist() {
    let compiled = compile(&Museum::default(), &CompileOptions::default()).unwrap();

    let schema = &compiled.summary().schemas[0];
    assert_eq!(schema.fluent, "no_trace_left");
    assert_eq!(schema.shadow, "initial_no_trace_left");
    assert_eq!(schema.candidates, 9);
    assert_eq!(schema.defined, 9);
    assert_eq!(compiled.success_goals().len(), 2);
    assert_eq!(EmptyPlanCheck.solve(&compiled), Ok(SolveOutcome::NoPlan));
}

#[test]
fn network_grounds_over_subtypes() {
    let compiled = compile(&Network, &CompileOptions::default()).unwrap();

    let schema = &compiled.summary().schemas[0];
    assert_eq!(schema.fluent, "logs_cleaned");
    assert_eq!(schema.candidates, 36);
    assert_eq!(schema.defined, 36);
    assert_eq!(
        compiled.restoration_goals()[0].to_string(),
        "(logs_cleaned(pc1) ↔ initial_logs_cleaned(pc1))"
    );
}

#[test]
fn manual_strategy_uses_hand_picked_goals() {
    let options = CompileOptions::default().with_restoration(RestorationStrategy::Manual);
    let compiled = compile(&Blocksworld, &options).unwrap();

    assert_eq!(compiled.model().shadows().count(), 0);
    assert_eq!(
        rendered(compiled.restoration_goals()),
        vec!["on(A, B)", "on_table(B)", "on_table(C)"]
    );
}

#[test]
fn count_does_not_touch_the_model() {
    let mut model = Model::new("network");
    let setup = restore_model::Domain::author(&Network, &mut model).unwrap();

    let counts = Compiler::default().count(&model, &setup).unwrap();
    assert_eq!(counts, vec![("logs_cleaned".to_string(), 36)]);
    assert!(model.goals().is_empty());
}

#[test]
fn receipt_hash_is_stable_across_runs() {
    let options = CompileOptions::default();
    let first = compile(&Blocksworld, &options).unwrap();
    let second = compile(&Blocksworld, &options).unwrap();

    assert_eq!(first.receipt().goal_hash, second.receipt().goal_hash);
    assert_eq!(first.receipt().goal_hash.len(), 64);
}
