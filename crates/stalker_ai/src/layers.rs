//! Surface layers and masks used by line-of-sight queries

use serde::{Deserialize, Serialize};

/// A surface category reported by a raycast hit
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SurfaceLayer(pub u32);

impl SurfaceLayer {
    /// Untagged geometry
    pub const DEFAULT: Self = Self(0);
    /// Static level geometry (walls, floors)
    pub const ENVIRONMENT: Self = Self(1);
    /// The tracked target's own collider
    pub const TARGET: Self = Self(2);
    /// Props and furniture that do not hide the target
    pub const PROPS: Self = Self(3);
    /// Surfaces the target can hide behind
    pub const HIDEABLE: Self = Self(8);

    /// Create a custom layer
    pub const fn custom(id: u32) -> Self {
        Self(id)
    }

    /// Get the layer as a bitmask (layers above 31 map to no bits)
    pub fn as_mask(&self) -> u32 {
        1u32.checked_shl(self.0).unwrap_or(0)
    }
}

impl Default for SurfaceLayer {
    fn default() -> Self {
        Self::DEFAULT
    }
}

/// A set of surface layers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LayerMask(pub u32);

impl LayerMask {
    /// Mask containing every layer
    pub const ALL: Self = Self(u32::MAX);

    /// Build a mask from a list of layers
    pub fn from_layers(layers: &[SurfaceLayer]) -> Self {
        Self(layers.iter().fold(0u32, |acc, l| acc | l.as_mask()))
    }

    /// Add a layer
    pub fn with(mut self, layer: SurfaceLayer) -> Self {
        self.0 |= layer.as_mask();
        self
    }

    /// Remove a layer
    pub fn without(mut self, layer: SurfaceLayer) -> Self {
        self.0 &= !layer.as_mask();
        self
    }

    /// Check membership
    pub fn contains(&self, layer: SurfaceLayer) -> bool {
        self.0 & layer.as_mask() != 0
    }

    /// True if any of the given layers is in the mask
    pub fn intersects_any(&self, layers: &[SurfaceLayer]) -> bool {
        layers.iter().any(|l| self.contains(*l))
    }
}

impl Default for LayerMask {
    fn default() -> Self {
        Self::from_layers(&[SurfaceLayer::HIDEABLE])
    }
}
