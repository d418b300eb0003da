//! Terrain and surface classification
//!
//! Every collision triangle and interaction volume carries a classification
//! that downstream systems use for footstep materials, lighting lookups and
//! the step-climbing policy. The set of kinds is closed: decoding an unknown
//! code from mesh data is a hard error, never a silent default.

use serde::{Deserialize, Serialize};

/// Closed set of surface classifications.
///
/// New variants must be added here and handled in every `match` below;
/// non-exhaustive handling is a compile error by design.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TerrainKind {
    /// Bare rock and cliff faces
    Stone,
    /// Packed earth paths
    Dirt,
    /// Vegetation-covered ground
    Grass,
    /// Loose sand and dunes
    Sand,
    /// Metal decking (ship interiors)
    Metal,
    /// Wooden planks and bridges
    Wood,
    /// Shallow water surfaces
    Water,
    /// Generic placed props (crates, barrels, furniture)
    Object,
}

impl TerrainKind {
    /// Decode a raw classification code from upstream mesh data.
    ///
    /// Unknown codes are an input invariant violation and must surface as an
    /// error; silent defaults have historically produced wrong step heights.
    pub fn from_code(code: u8) -> Result<Self, ClassificationError> {
        match code {
            0 => Ok(Self::Stone),
            1 => Ok(Self::Dirt),
            2 => Ok(Self::Grass),
            3 => Ok(Self::Sand),
            4 => Ok(Self::Metal),
            5 => Ok(Self::Wood),
            6 => Ok(Self::Water),
            7 => Ok(Self::Object),
            other => Err(ClassificationError::UnknownTerrain(other)),
        }
    }

    /// Raw classification code for this kind.
    pub fn code(self) -> u8 {
        match self {
            Self::Stone => 0,
            Self::Dirt => 1,
            Self::Grass => 2,
            Self::Sand => 3,
            Self::Metal => 4,
            Self::Wood => 5,
            Self::Water => 6,
            Self::Object => 7,
        }
    }

    /// Step-height ceiling for climbing onto a surface of this kind.
    ///
    /// Props get half the base ceiling so entities cannot mount
    /// medium-sized furniture; everything else uses the base value.
    pub fn step_ceiling(self, base: f32) -> f32 {
        match self {
            Self::Object => base * 0.5,
            Self::Stone
            | Self::Dirt
            | Self::Grass
            | Self::Sand
            | Self::Metal
            | Self::Wood
            | Self::Water => base,
        }
    }

    /// Footstep material name reported to the audio layer.
    pub fn footstep_material(self) -> &'static str {
        match self {
            Self::Stone => "stone",
            Self::Dirt => "dirt",
            Self::Grass => "grass",
            Self::Sand => "sand",
            Self::Metal => "metal",
            Self::Wood => "wood",
            Self::Water => "water",
            Self::Object => "object",
        }
    }
}

/// Collision metadata attached to triangles, volumes and ray hits.
///
/// Besides the terrain kind this carries the optional light-group and
/// minimap linkage indices that the environment systems resolve.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CollisionProperty {
    /// Surface classification
    pub terrain: TerrainKind,
    /// Light group index for environment lighting lookups
    pub light: Option<u16>,
    /// Minimap region linkage
    pub map_link: Option<u16>,
}

impl CollisionProperty {
    /// Property with classification only, no lighting or map linkage.
    pub fn terrain_only(terrain: TerrainKind) -> Self {
        Self {
            terrain,
            light: None,
            map_link: None,
        }
    }

    /// Property with full environment linkage.
    pub fn new(terrain: TerrainKind, light: Option<u16>, map_link: Option<u16>) -> Self {
        Self {
            terrain,
            light,
            map_link,
        }
    }
}

/// Errors raised while decoding classification data from upstream meshes
#[derive(thiserror::Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClassificationError {
    /// A terrain code outside the known set reached the engine
    #[error("unknown terrain classification code {0}")]
    UnknownTerrain(u8),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_code_round_trip() {
        for code in 0..=7u8 {
            let kind = TerrainKind::from_code(code).unwrap();
            assert_eq!(kind.code(), code);
        }
    }

    #[test]
    fn test_unknown_code_is_an_error() {
        assert_eq!(
            TerrainKind::from_code(42),
            Err(ClassificationError::UnknownTerrain(42))
        );
    }

    #[test]
    fn test_object_step_ceiling_is_halved() {
        assert_eq!(TerrainKind::Object.step_ceiling(0.4), 0.2);
        assert_eq!(TerrainKind::Stone.step_ceiling(0.4), 0.4);
    }
}
