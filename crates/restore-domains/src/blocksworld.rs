//! Blocks-world: three blocks, one gripper.
//!
//! Initial tower: A on B, B and C on the table. The gripper may shuffle
//! blocks around but must leave the tower as it found it, hand empty.

use restore_model::{ActionSchema, Domain, DomainSetup, Effect, FluentSchema, Formula, Model, Result};

#[derive(Debug, Clone, Copy, Default)]
pub struct Blocksworld;

impl Domain for Blocksworld {
    fn name(&self) -> &str {
        "blocksworld"
    }

    fn author(&self, model: &mut Model) -> Result<DomainSetup> {
        model.add_type("block", None)?;
        model.add_objects(["A", "B", "C"], "block")?;

        let on = FluentSchema::boolean("on", &[("x", "block"), ("y", "block")]).with_default(false);
        let on_table = FluentSchema::boolean("on_table", &[("x", "block")]).with_default(false);
        let clear = FluentSchema::boolean("clear", &[("x", "block")]).with_default(false);
        let holding = FluentSchema::boolean("holding", &[("x", "block")]).with_default(false);
        let hand_empty = FluentSchema::boolean("hand_empty", &[]).with_default(true);

        for f in [&on, &on_table, &clear, &holding, &hand_empty] {
            model.add_fluent(f.clone())?;
        }

        model.set_initial_value(on.atom(["A", "B"]), true)?;
        model.set_initial_value(on_table.atom(["B"]), true)?;
        model.set_initial_value(on_table.atom(["C"]), true)?;
        model.set_initial_value(clear.atom(["A"]), true)?;
        model.set_initial_value(clear.atom(["C"]), true)?;
        model.set_initial_value(clear.atom(["B"]), false)?;

        let empty = || hand_empty.atom(Vec::<String>::new());

        model.add_action(
            ActionSchema::new("pick_up", &[("x", "block")])
                .with_precondition(on_table.holds(["x"]))
                .with_precondition(clear.holds(["x"]))
                .with_precondition(Formula::atom(empty()))
                .with_effect(Effect::set(on_table.atom(["x"]), false))
                .with_effect(Effect::set(clear.atom(["x"]), false))
                .with_effect(Effect::set(holding.atom(["x"]), true))
                .with_effect(Effect::set(empty(), false)),
        )?;

        model.add_action(
            ActionSchema::new("unstack", &[("x", "block"), ("y", "block")])
                .with_precondition(on.holds(["x", "y"]))
                .with_precondition(clear.holds(["x"]))
                .with_precondition(Formula::atom(empty()))
                .with_effect(Effect::set(on.atom(["x", "y"]), false))
                .with_effect(Effect::set(clear.atom(["y"]), true))
                .with_effect(Effect::set(clear.atom(["x"]), false))
                .with_effect(Effect::set(holding.atom(["x"]), true))
                .with_effect(Effect::set(empty(), false)),
        )?;

        model.add_action(
            ActionSchema::new("stack", &[("x", "block"), ("y", "block")])
                .with_precondition(holding.holds(["x"]))
                .with_precondition(clear.holds(["y"]))
                .with_effect(Effect::set(on.atom(["x", "y"]), true))
                .with_effect(Effect::set(clear.atom(["y"]), false))
                .with_effect(Effect::set(clear.atom(["x"]), true))
                .with_effect(Effect::set(holding.atom(["x"]), false))
                .with_effect(Effect::set(empty(), true)),
        )?;

        model.add_action(
            ActionSchema::new("put_down", &[("x", "block")])
                .with_precondition(holding.holds(["x"]))
                .with_effect(Effect::set(on_table.atom(["x"]), true))
                .with_effect(Effect::set(clear.atom(["x"]), true))
                .with_effect(Effect::set(holding.atom(["x"]), false))
                .with_effect(Effect::set(empty(), true)),
        )?;

        Ok(DomainSetup::new()
            .track(&on)
            .track(&on_table)
            .track(&clear)
            .restore(on.holds(["A", "B"]))
            .restore(on_table.holds(["B"]))
            .restore(on_table.holds(["C"]))
            .succeed_when(Formula::atom(empty())))
    }
}
