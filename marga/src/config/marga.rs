//! Main MargaConfig and conversion methods.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::geometry::WalkableConfig;
use crate::optimizer::OptimizerConfig;
use crate::pathfinding::PathfinderConfig;
use crate::service::RouteOptions;

use super::error::ConfigLoadError;
use super::optimizer::OptimizerSection;
use super::pathfinding::PathfindingSection;
use super::routing::RoutingSection;
use super::walkable::WalkableSection;

/// Full route engine configuration loaded from YAML
#[derive(Clone, Debug, Serialize, Deserialize, Default)]
pub struct MargaConfig {
    /// Route building settings
    #[serde(default)]
    pub routing: RoutingSection,

    /// Grid pathfinder settings
    #[serde(default)]
    pub pathfinding: PathfindingSection,

    /// Tour optimizer settings
    #[serde(default)]
    pub optimizer: OptimizerSection,

    /// Walkable polygon settings
    #[serde(default)]
    pub walkable: WalkableSection,
}

impl MargaConfig {
    /// Load configuration from a YAML file
    pub fn load(path: &Path) -> Result<Self, ConfigLoadError> {
        let contents =
            std::fs::read_to_string(path).map_err(|e| ConfigLoadError::Io(e.to_string()))?;
        Self::from_yaml(&contents)
    }

    /// Load from default config path (configs/marga.yaml)
    pub fn load_default() -> Result<Self, ConfigLoadError> {
        let path = Path::new("configs/marga.yaml");
        if path.exists() {
            Self::load(path)
        } else {
            Ok(Self::default())
        }
    }

    /// Parse from YAML string
    pub fn from_yaml(yaml: &str) -> Result<Self, ConfigLoadError> {
        serde_yaml::from_str(yaml).map_err(|e| ConfigLoadError::Parse(e.to_string()))
    }

    /// Pathfinder config at the configured cell size
    pub fn pathfinder_config(&self) -> PathfinderConfig {
        self.pathfinding
            .to_pathfinder_config(self.routing.cell_size)
    }

    /// Get the optimizer config
    pub fn optimizer_config(&self) -> OptimizerConfig {
        self.optimizer.to_optimizer_config()
    }

    /// Get the walkable geometry config
    pub fn walkable_config(&self) -> WalkableConfig {
        self.walkable.to_walkable_config()
    }

    /// Convert to RouteOptions for RouteService
    pub fn route_options(&self) -> RouteOptions {
        RouteOptions {
            cell_size: self.routing.cell_size,
            front_point_delta: self.routing.front_point_delta,
            use_walkable_polygon: self.routing.use_walkable_polygon,
            cart_clearance: self.routing.cart_clearance,
            fallback_radius: self.pathfinding.fallback_radius,
            optimizer: self.optimizer_config(),
            walkable: self.walkable_config(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_route_options() {
        let config = MargaConfig::default();
        assert_eq!(config.route_options(), RouteOptions::default());
        assert_eq!(config.pathfinder_config(), PathfinderConfig::default());
    }

    #[test]
    fn test_partial_yaml_fills_defaults() {
        let config = MargaConfig::from_yaml(
            "routing:\n  cell_size: 10\n  use_walkable_polygon: true\noptimizer:\n  max_iterations: 50\n",
        )
        .unwrap();
        assert_eq!(config.routing.cell_size, 10);
        assert!(config.routing.use_walkable_polygon);
        assert_eq!(config.routing.front_point_delta, 10.0);
        assert_eq!(config.optimizer.max_iterations, 50);
        assert_eq!(config.optimizer.min_improvement, 1);
        assert_eq!(config.pathfinding.fallback_radius, 20);
    }

    #[test]
    fn test_empty_yaml_is_default() {
        let config = MargaConfig::from_yaml("{}").unwrap();
        assert_eq!(config.route_options(), RouteOptions::default());
    }

    #[test]
    fn test_bad_yaml() {
        let err = MargaConfig::from_yaml("routing: [1, 2").unwrap_err();
        assert!(matches!(err, ConfigLoadError::Parse(_)));
    }

    #[test]
    fn test_missing_file() {
        let err = MargaConfig::load(Path::new("/nonexistent/marga.yaml")).unwrap_err();
        assert!(matches!(err, ConfigLoadError::Io(_)));
    }

    #[test]
    fn test_load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("marga.yaml");
        std::fs::write(&path, "pathfinding:\n  fallback_radius: 5\n").unwrap();
        let config = MargaConfig::load(&path).unwrap();
        assert_eq!(config.pathfinder_config().fallback_radius, 5);
    }
}
