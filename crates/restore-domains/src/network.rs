//! Network intrusion across three segments.
//!
//! 36 PCs hang off nine switches; routers and two firewalls join the
//! external, internal and critical segments. The attacker hops between
//! hosts over ssh, steals data from the critical segment and logs off.
//! Every hop dirties the target's logs, which must be clean again at the
//! end. The defender may tighten firewall rules between segments.

use restore_model::{
    ActionSchema, Domain, DomainSetup, Effect, FluentSchema, Formula, Model, Result, Term,
};

const ATTACKER: &str = "attacker_agent";
const DEFENDER: &str = "defender_agent";

const PCS: usize = 36;
const ROUTERS: usize = 10;
const SWITCHES: usize = 9;

/// Switch each PC is wired to, by PC range.
const PC_SWITCHES: [(std::ops::RangeInclusive<usize>, usize); 9] = [
    (1..=7, 1),
    (8..=10, 2),
    (11..=13, 3),
    (14..=16, 4),
    (17..=20, 5),
    (21..=27, 6),
    (28..=30, 7),
    (31..=33, 8),
    (34..=36, 9),
];

/// `(switch, router)` uplinks.
const UPLINKS: [(usize, usize); 9] = [
    (1, 1),
    (2, 2),
    (3, 3),
    (4, 4),
    (5, 5),
    (6, 5),
    (7, 7),
    (8, 8),
    (9, 9),
];

const BACKBONE: [(&str, &str); 13] = [
    ("router1", "external_firewall"),
    ("router2", "router6"),
    ("router2", "router10"),
    ("router3", "router6"),
    ("router3", "router10"),
    ("router4", "router6"),
    ("router4", "router10"),
    ("router5", "router10"),
    ("router6", "external_firewall"),
    ("router7", "internal_firewall"),
    ("router8", "internal_firewall"),
    ("router9", "internal_firewall"),
    ("router10", "internal_firewall"),
];

fn pc(i: usize) -> String {
    format!("pc{i}")
}

fn segment_of(i: usize) -> &'static str {
    match i {
        1..=10 => "external_segment",
        11..=27 => "internal_segment",
        _ => "critical_segment",
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct Network;

impl Domain for Network {
    fn name(&self) -> &str {
        "network"
    }

    fn author(&self, model: &mut Model) -> Result<DomainSetup> {
        for (ty, parent) in [
            ("service", None),
            ("vulnerability", None),
            ("segment", None),
            ("agent", None),
            ("privilege-level", None),
            ("user", Some("privilege-level")),
            ("root", Some("privilege-level")),
            ("network-node", None),
            ("host", Some("network-node")),
            ("infrastructure-device", Some("network-node")),
            ("pc", Some("host")),
            ("router", Some("infrastructure-device")),
            ("firewall", Some("infrastructure-device")),
            ("switch", Some("infrastructure-device")),
        ] {
            model.add_type(ty, parent)?;
        }

        model.add_object(ATTACKER, "agent")?;
        model.add_object(DEFENDER, "agent")?;
        model.add_objects((1..=PCS).map(pc), "pc")?;
        model.add_objects((1..=ROUTERS).map(|i| format!("router{i}")), "router")?;
        model.add_objects((1..=SWITCHES).map(|i| format!("switch{i}")), "switch")?;
        model.add_objects(["internal_firewall", "external_firewall"], "firewall")?;
        model.add_objects(
            ["internal_segment", "external_segment", "critical_segment"],
            "segment",
        )?;

        let connected = FluentSchema::boolean(
            "static_connected",
            &[("n1", "network-node"), ("n2", "network-node")],
        );
        let at = FluentSchema::boolean("static_at", &[("a", "agent"), ("h", "host")]);
        let vulnerable =
            FluentSchema::boolean("static_vulnerable", &[("h", "host"), ("v", "vulnerability")]);
        let can_ssh = FluentSchema::boolean(
            "static_can_ssh",
            &[("src", "network-node"), ("dest", "network-node")],
        );
        let has_local_privilege = FluentSchema::boolean(
            "static_has_local_privilege",
            &[("a", "agent"), ("h", "host"), ("p", "privilege-level")],
        );
        let traffic_allowed = FluentSchema::boolean(
            "static_traffic_allowed",
            &[("src", "network-node"), ("dest", "network-node")],
        );
        let separated_by = FluentSchema::boolean(
            "static_separated_by",
            &[("s1", "segment"), ("s2", "segment"), ("f", "firewall")],
        );
        let in_segment =
            FluentSchema::boolean("static_in_segment", &[("n", "network-node"), ("s", "segment")]);
        let is_patch_available =
            FluentSchema::boolean("static_is_patch_available", &[("v", "vulnerability")]);
        let data_stolen = FluentSchema::boolean("data_stolen", &[]).with_default(false);
        let logs_cleaned = FluentSchema::boolean("logs_cleaned", &[("h", "host")]);
        let escaped = FluentSchema::boolean("escaped", &[]).with_default(false);

        for f in [
            &connected,
            &at,
            &vulnerable,
            &can_ssh,
            &has_local_privilege,
            &traffic_allowed,
            &separated_by,
            &in_segment,
            &is_patch_available,
            &data_stolen,
            &logs_cleaned,
            &escaped,
        ] {
            model.add_fluent(f.clone())?;
        }

        for i in 1..=PCS {
            model.set_initial_value(logs_cleaned.atom([pc(i)]), true)?;
            model.set_initial_value(in_segment.atom([pc(i).as_str(), segment_of(i)]), true)?;
        }

        for (range, switch) in PC_SWITCHES {
            for i in range {
                model.set_initial_value(connected.atom([pc(i), format!("switch{switch}")]), true)?;
            }
        }
        for (switch, router) in UPLINKS {
            model.set_initial_value(
                connected.atom([format!("switch{switch}"), format!("router{router}")]),
                true,
            )?;
        }
        for (a, b) in BACKBONE {
            model.set_initial_value(connected.atom([a, b]), true)?;
        }

        for (s1, s2, f) in [
            ("external_segment", "internal_segment", "external_firewall"),
            ("internal_segment", "external_segment", "external_firewall"),
            ("internal_segment", "critical_segment", "internal_firewall"),
            ("critical_segment", "internal_segment", "internal_firewall"),
        ] {
            model.set_initial_value(separated_by.atom([s1, s2, f]), true)?;
        }
        for switch in ["switch7", "switch8", "switch9"] {
            model.set_initial_value(in_segment.atom([switch, "critical_segment"]), true)?;
        }

        for i in 1..=PCS {
            for j in (1..=PCS).filter(|&j| j != i) {
                model.set_initial_value(can_ssh.atom([pc(i), pc(j)]), true)?;
            }
        }

        model.set_initial_value(at.atom([ATTACKER.to_string(), pc(1)]), true)?;

        let is = |param: &str, object: &str| Formula::equals(Term::symbol(param), Term::symbol(object));
        let none = Vec::<String>::new;

        model.add_action(
            ActionSchema::new(
                "attack_move_ssh",
                &[("a", "agent"), ("src", "host"), ("dest", "host")],
            )
            .with_precondition(is("a", ATTACKER))
            .with_precondition(at.holds(["a", "src"]))
            .with_precondition(can_ssh.holds(["src", "dest"]))
            .with_effect(Effect::set(at.atom(["a", "src"]), false))
            .with_effect(Effect::set(at.atom(["a", "dest"]), true))
            .with_effect(Effect::set(logs_cleaned.atom(["dest"]), false)),
        )?;

        model.add_action(
            ActionSchema::new("attack_wait", &[("a", "agent"), ("h", "host")])
                .with_precondition(at.holds(["a", "h"]))
                .with_precondition(is("a", ATTACKER))
                .with_effect(Effect::set(at.atom(["a", "h"]), true)),
        )?;

        model.add_action(
            ActionSchema::new("attack_clean", &[("a", "agent"), ("h", "host")])
                .with_precondition(is("a", ATTACKER))
                .with_precondition(at.holds(["a", "h"]))
                .with_precondition(Formula::not(logs_cleaned.holds(["h"])))
                .with_effect(Effect::set(logs_cleaned.atom(["h"]), true)),
        )?;

        model.add_action(
            ActionSchema::new(
                "attack_steal",
                &[("a", "agent"), ("h", "host"), ("seg", "segment")],
            )
            .with_precondition(is("a", ATTACKER))
            .with_precondition(at.holds(["a", "h"]))
            .with_precondition(in_segment.holds(["h", "seg"]))
            .with_precondition(is("seg", "critical_segment"))
            .with_precondition(Formula::not(data_stolen.holds(none())))
            .with_effect(Effect::set(data_stolen.atom(none()), true)),
        )?;

        model.add_action(
            ActionSchema::new("attack_log_off", &[("a", "agent")])
                .with_precondition(is("a", ATTACKER))
                .with_precondition(data_stolen.holds(none()))
                .with_effect(Effect::set(escaped.atom(none()), true)),
        )?;

        model.add_action(
            ActionSchema::new(
                "fix_update_firewall_ruleset",
                &[
                    ("a", "agent"),
                    ("f", "firewall"),
                    ("src", "host"),
                    ("dest", "host"),
                    ("s_src", "segment"),
                    ("s_dest", "segment"),
                ],
            )
            .with_precondition(is("a", DEFENDER))
            .with_precondition(can_ssh.holds(["src", "dest"]))
            .with_precondition(in_segment.holds(["src", "s_src"]))
            .with_precondition(in_segment.holds(["dest", "s_dest"]))
            .with_precondition(separated_by.holds(["s_src", "s_dest", "f"]))
            .with_effect(Effect::set(can_ssh.atom(["src", "dest"]), false)),
        )?;

        Ok(DomainSetup::new()
            .track(&logs_cleaned)
            .succeed_when(escaped.holds(none())))
    }
}
