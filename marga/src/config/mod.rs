//! Configuration loading for the route engine.
//!
//! Loads all configuration from a single YAML file with sensible defaults.
//!
//! ```rust,ignore
//! use marga::config::MargaConfig;
//!
//! // Load from default path (configs/marga.yaml), or defaults if absent
//! let config = MargaConfig::load_default()?;
//!
//! // Convert to runtime configs
//! let options = config.route_options();
//! ```
//!
//! | Section | Description |
//! |---------|-------------|
//! | [`RoutingSection`] | Cell size, front-point offset, blocking mode |
//! | [`PathfindingSection`] | Endpoint fallback radius |
//! | [`OptimizerSection`] | 2-opt threshold and iteration cap |
//! | [`WalkableSection`] | Contour simplification and erosion |

mod defaults;
mod error;
mod marga;
mod optimizer;
mod pathfinding;
mod routing;
mod walkable;

pub use error::ConfigLoadError;
pub use marga::MargaConfig;

pub use optimizer::OptimizerSection;
pub use pathfinding::PathfindingSection;
pub use routing::RoutingSection;
pub use walkable::WalkableSection;
