#![forbid(unsafe_code)]

//! Bundled planning domains.
//!
//! Each domain implements [`restore_model::Domain`]: it populates a fresh
//! model and reports which fluents to track for restoration and which
//! success conditions to require.
//!
//! - [`Blocksworld`]: three blocks, one gripper
//! - [`Museum`]: diamond heist on a configurable tile grid
//! - [`Network`]: ssh intrusion across segmented networks

pub mod blocksworld;
pub mod museum;
pub mod network;

pub use blocksworld::Blocksworld;
pub use museum::{Museum, MuseumConfig};
pub use network::Network;

use restore_model::Domain;
use serde::{Deserialize, Serialize};

/// Names accepted by [`by_name`].
pub const NAMES: [&str; 3] = ["blocksworld", "museum", "network"];

/// Settings for the configurable domains.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DomainsConfig {
    #[serde(default)]
    pub museum: MuseumConfig,
}

/// Look up a bundled domain.
pub fn by_name(name: &str, config: &DomainsConfig) -> Option<Box<dyn Domain>> {
    match name {
        "blocksworld" => Some(Box::new(Blocksworld)),
        "museum" => Some(Box::new(Museum::new(config.museum.clone()))),
        "network" => Some(Box::new(Network)),
        _ => None,
    }
}

/// Every bundled domain, in [`NAMES`] order.
pub fn all(config: &DomainsConfig) -> Vec<Box<dyn Domain>> {
    NAMES
        .iter()
        .filter_map(|name| by_name(name, config))
        .collect()
}
