//! Test data builders for creating test objects

use rock_surface::graph::OperationRegistry;
use rock_surface::{Color, RockSurface, RockSurfaceConfig};

/// Builder for rock surface presets with a fixed seed
pub struct ConfigBuilder {
    config: RockSurfaceConfig,
}

impl ConfigBuilder {
    pub fn new() -> Self {
        Self {
            config: RockSurfaceConfig {
                seed: Some(1),
                ..Default::default()
            },
        }
    }

    pub fn seed(mut self, seed: i64) -> Self {
        self.config.seed = Some(seed);
        self
    }

    pub fn depth(mut self, depth: i64) -> Self {
        self.config.depth = depth;
        self
    }

    pub fn azimuth(mut self, azimuth: f64) -> Self {
        self.config.azimuth = azimuth;
        self
    }

    pub fn color(mut self, color: Color) -> Self {
        self.config.value = color;
        self
    }

    pub fn tone_map(mut self, enabled: bool) -> Self {
        self.config.switchm6 = enabled;
        self
    }

    pub fn build(self) -> RockSurfaceConfig {
        self.config
    }

    /// Build a rock surface on the standard registry
    pub fn surface(self) -> RockSurface {
        RockSurface::new(OperationRegistry::standard(), &self.config)
            .expect("rock surface should build on the standard registry")
    }
}

impl Default for ConfigBuilder {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_builder() {
        let config = ConfigBuilder::new().depth(9).tone_map(false).build();
        assert_eq!(config.depth, 9);
        assert!(!config.switchm6);
        assert_eq!(config.seed, Some(1));
    }
}
