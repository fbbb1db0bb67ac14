//! Museum heist on a tile grid.
//!
//! An attacker starts at the entrance tile, steals the diamond and escapes
//! through the entrance again. Stepping on a trace tile leaves a trace that
//! has to be cleaned up, so the trace state is tracked for restoration. The
//! architect may place walls and trace tiles.

use restore_model::{
    ActionSchema, Domain, DomainSetup, Effect, FluentSchema, Formula, Model, Result, Term,
};
use serde::{Deserialize, Serialize};

const ATTACKER: &str = "adversary_houdini";
const ARCHITECT: &str = "leader_bob";

/// Grid layout of the museum.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MuseumConfig {
    #[serde(default = "default_rows")]
    pub rows: usize,

    #[serde(default = "default_cols")]
    pub cols: usize,

    /// Entrance tile; the attacker starts and escapes here
    #[serde(default = "default_entrance")]
    pub entrance: String,

    #[serde(default = "default_diamond")]
    pub diamond: String,

    /// Tiles that record a trace when stepped on
    #[serde(default = "default_trace_tiles")]
    pub trace_tiles: Vec<String>,
}

fn default_rows() -> usize {
    3
}

fn default_cols() -> usize {
    3
}

fn default_entrance() -> String {
    "t00".to_string()
}

fn default_diamond() -> String {
    "t21".to_string()
}

fn default_trace_tiles() -> Vec<String> {
    vec!["t10".to_string()]
}

impl Default for MuseumConfig {
    fn default() -> Self {
        Self {
            rows: default_rows(),
            cols: default_cols(),
            entrance: default_entrance(),
            diamond: default_diamond(),
            trace_tiles: default_trace_tiles(),
        }
    }
}

/// Tile object name for row `i`, column `j`.
///
/// Grids of at most ten rows and columns use the compact `t{i}{j}` form;
/// larger grids separate the indices.
pub fn tile_name(i: usize, j: usize, rows: usize, cols: usize) -> String {
    if rows <= 10 && cols <= 10 {
        format!("t{i}{j}")
    } else {
        format!("t{i}_{j}")
    }
}

#[derive(Debug, Clone, Default)]
pub struct Museum {
    config: MuseumConfig,
}

impl Museum {
    pub fn new(config: MuseumConfig) -> Self {
        Self { config }
    }
}

impl Domain for Museum {
    fn name(&self) -> &str {
        "museum"
    }

    fn author(&self, model: &mut Model) -> Result<DomainSetup> {
        let MuseumConfig { rows, cols, .. } = self.config;
        let tile = |i, j| tile_name(i, j, rows, cols);

        model.add_type("tile", None)?;
        model.add_type("agent", None)?;
        model.add_object(ATTACKER, "agent")?;
        model.add_object(ARCHITECT, "agent")?;
        for i in 0..rows {
            for j in 0..cols {
                model.add_object(tile(i, j), "tile")?;
            }
        }

        let connected = FluentSchema::boolean("static_connected", &[("x", "tile"), ("y", "tile")])
            .with_default(false);
        let at = FluentSchema::boolean("static_at", &[("a", "agent"), ("t", "tile")])
            .with_default(false);
        let diamond_at = FluentSchema::boolean("static_diamond_at", &[("t", "tile")]).with_default(false);
        let diamond_stolen = FluentSchema::boolean("diamond_stolen", &[]).with_default(false);
        let escaped = FluentSchema::boolean("escaped", &[]).with_default(false);
        let is_trace_tile =
            FluentSchema::boolean("static_is_trace_tile", &[("t", "tile")]).with_default(false);
        // No default: only tiles of the grid get a value.
        let no_trace_left = FluentSchema::boolean("no_trace_left", &[("t", "tile")]);

        for f in [
            &connected,
            &at,
            &diamond_at,
            &diamond_stolen,
            &escaped,
            &is_trace_tile,
            &no_trace_left,
        ] {
            model.add_fluent(f.clone())?;
        }

        model.set_initial_value(at.atom([ATTACKER, self.config.entrance.as_str()]), true)?;
        model.set_initial_value(diamond_at.atom([self.config.diamond.as_str()]), true)?;
        for i in 0..rows {
            for j in 0..cols {
                model.set_initial_value(no_trace_left.atom([tile(i, j)]), true)?;
            }
        }
        for t in &self.config.trace_tiles {
            model.set_initial_value(is_trace_tile.atom([t.as_str()]), true)?;
        }

        for i in 0..rows {
            for j in 0..cols {
                let here = tile(i, j);
                let mut neighbours = Vec::with_capacity(4);
                if j > 0 {
                    neighbours.push(tile(i, j - 1));
                }
                if j + 1 < cols {
                    neighbours.push(tile(i, j + 1));
                }
                if i > 0 {
                    neighbours.push(tile(i - 1, j));
                }
                if i + 1 < rows {
                    neighbours.push(tile(i + 1, j));
                }
                for n in neighbours {
                    model.set_initial_value(connected.atom([here.clone(), n]), true)?;
                }
            }
        }

        let is = |param: &str, object: &str| Formula::equals(Term::symbol(param), Term::symbol(object));

        model.add_action(
            ActionSchema::new(
                "fix_place_wall",
                &[("curr", "tile"), ("to", "tile"), ("a", "agent"), ("b", "agent")],
            )
            .with_precondition(is("a", ARCHITECT))
            .with_precondition(is("b", ATTACKER))
            .with_precondition(connected.holds(["curr", "to"]))
            .with_precondition(connected.holds(["to", "curr"]))
            .with_precondition(Formula::not(diamond_at.holds(["curr"])))
            .with_precondition(Formula::not(diamond_at.holds(["to"])))
            .with_precondition(Formula::not(at.holds(["b", "curr"])))
            .with_precondition(Formula::not(at.holds(["b", "to"])))
            .with_effect(Effect::set(connected.atom(["curr", "to"]), false))
            .with_effect(Effect::set(connected.atom(["to", "curr"]), false)),
        )?;

        model.add_action(
            ActionSchema::new("fix_place_trace_tile", &[("curr", "tile"), ("a", "agent")])
                .with_precondition(is("a", ARCHITECT))
                .with_effect(Effect::set(is_trace_tile.atom(["curr"]), true)),
        )?;

        model.add_action(
            ActionSchema::new("attack_move", &[("curr", "tile"), ("to", "tile"), ("a", "agent")])
                .with_precondition(at.holds(["a", "curr"]))
                .with_precondition(connected.holds(["curr", "to"]))
                .with_precondition(is("a", ATTACKER))
                .with_effect(Effect::set(at.atom(["a", "curr"]), false))
                .with_effect(Effect::set(at.atom(["a", "to"]), true))
                .with_effect(
                    Effect::set(no_trace_left.atom(["to"]), false).when(is_trace_tile.holds(["to"])),
                ),
        )?;

        model.add_action(
            ActionSchema::new("attack_wait", &[("curr", "tile"), ("a", "agent")])
                .with_precondition(at.holds(["a", "curr"]))
                .with_precondition(is("a", ATTACKER))
                .with_effect(Effect::set(at.atom(["a", "curr"]), true)),
        )?;

        model.add_action(
            ActionSchema::new("attack_clean", &[("curr", "tile"), ("a", "agent")])
                .with_precondition(at.holds(["a", "curr"]))
                .with_precondition(is("a", ATTACKER))
                .with_precondition(Formula::not(no_trace_left.holds(["curr"])))
                .with_effect(Effect::set(no_trace_left.atom(["curr"]), true)),
        )?;

        model.add_action(
            ActionSchema::new("attack_steal", &[("curr", "tile"), ("a", "agent")])
                .with_precondition(at.holds(["a", "curr"]))
                .with_precondition(is("a", ATTACKER))
                .with_precondition(diamond_at.holds(["curr"]))
                .with_effect(Effect::set(diamond_stolen.atom(Vec::<String>::new()), true)),
        )?;

        model.add_action(
            ActionSchema::new("attack_escape", &[("curr", "tile"), ("a", "agent")])
                .with_precondition(at.holds(["a", "curr"]))
                .with_precondition(is("a", ATTACKER))
                .with_precondition(diamond_stolen.holds(Vec::<String>::new()))
                .with_precondition(is("curr", self.config.entrance.as_str()))
                .with_effect(Effect::set(escaped.atom(Vec::<String>::new()), true)),
        )?;

        let mut setup = DomainSetup::new()
            .track(&no_trace_left)
            .succeed_when(diamond_stolen.holds(Vec::<String>::new()))
            .succeed_when(escaped.holds(Vec::<String>::new()));
        for t in &self.config.trace_tiles {
            setup = setup.restore(no_trace_left.holds([t.as_str()]));
        }
        Ok(setup)
    }
}
