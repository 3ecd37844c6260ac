use std::collections::HashSet;

use glam::Vec2;
use serde::Deserialize;

use crate::config::ConfigError;

fn default_cube_size() -> Vec2 {
    Vec2::splat(60.0)
}

/// One block type the tray can offer.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct CubeSpec {
    pub id: u32,
    pub color_name: String,
    pub sprite_name: String,
    #[serde(default = "default_cube_size")]
    pub size: Vec2,
}

/// Block types by config id, in tray order.
///
/// ```json
/// { "cubes": [ { "id": 1, "color_name": "red", "sprite_name": "cube_red" } ] }
/// ```
#[derive(Debug, Clone, Deserialize)]
pub struct BlockCatalog {
    cubes: Vec<CubeSpec>,
}

impl BlockCatalog {
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let catalog: BlockCatalog = serde_json::from_str(json).map_err(ConfigError::Catalog)?;
        let mut seen = HashSet::new();
        for cube in &catalog.cubes {
            if !seen.insert(cube.id) {
                return Err(ConfigError::DuplicateBlock(cube.id));
            }
        }
        Ok(catalog)
    }

    pub fn get(&self, id: u32) -> Option<&CubeSpec> {
        self.cubes.iter().find(|c| c.id == id)
    }

    /// Position in tray order, doubling as the host sprite index.
    pub fn index_of(&self, id: u32) -> Option<usize> {
        self.cubes.iter().position(|c| c.id == id)
    }

    pub fn iter(&self) -> impl Iterator<Item = &CubeSpec> {
        self.cubes.iter()
    }

    pub fn len(&self) -> usize {
        self.cubes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cubes.is_empty()
    }
}

impl Default for BlockCatalog {
    fn default() -> Self {
        let colors = ["red", "blue", "green", "yellow", "purple"];
        Self {
            cubes: colors
                .iter()
                .zip(1u32..)
                .map(|(color, id)| CubeSpec {
                    id,
                    color_name: (*color).to_owned(),
                    sprite_name: format!("cube_{}", color),
                    size: default_cube_size(),
                })
                .collect(),
        }
    }
}
