//! Orbit state and element conversions for satellite visualization.
//!
//! The workspace crates are re-exported here so front-ends (CLI, GUI,
//! batch tools) depend on a single library:
//!
//! - [`orbits`]: Cartesian state ⇄ Keplerian element conversion;
//! - [`epoch`]: calendar UTC to Julian Date;
//! - [`config`]: simulation configs and central-body catalogs;
//! - [`export`]: trajectory files and element reports;
//! - [`params`]: value models behind the element editor;
//! - [`primitives`]: constants, units, and vector helpers.

pub use qspace_config as config;
pub use qspace_core as primitives;
pub use qspace_epoch as epoch;
pub use qspace_export as export;
pub use qspace_orbits as orbits;
pub use qspace_params as params;
