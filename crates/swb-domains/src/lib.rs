//! # swb-domains — Bundled Planning Domains
//!
//! Domain code that ships with the workbench, and the canned sample
//! problems smoke tests run against.
//!
//! Samples are keyed `<namespace>/solution/<project>.json` with the
//! namespace [`SAMPLE_NAMESPACE`].

pub mod cloudbalancing;

use swb_solver::ClassRegistry;

/// Namespace of the bundled sample problems.
pub const SAMPLE_NAMESPACE: &str = "swb/samples";

/// Bundled sample problems by key.
pub const SAMPLES: &[(&str, &[u8])] = &[(
    "swb/samples/solution/optacloud.json",
    include_bytes!("../samples/swb/samples/solution/optacloud.json"),
)];

/// Look up a bundled sample by key.
pub fn sample(key: &str) -> Option<&'static [u8]> {
    SAMPLES
        .iter()
        .find(|(k, _)| *k == key)
        .map(|(_, bytes)| *bytes)
}

/// A registry holding every bundled domain.
pub fn class_registry() -> ClassRegistry {
    let mut registry = ClassRegistry::new();
    cloudbalancing::register(&mut registry);
    registry
}
