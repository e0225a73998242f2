//! Analytic occluders for line-of-sight queries

use glam::Vec3;
use serde::{Deserialize, Serialize};
use stalker_ai::layers::SurfaceLayer;
use stalker_ai::perception::LineOfSight;
use std::cmp::Ordering;

/// A solid shape tagged with a surface layer
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "shape", rename_all = "lowercase")]
pub enum Occluder {
    Sphere {
        center: Vec3,
        radius: f32,
        #[serde(default)]
        layer: SurfaceLayer,
    },
    Box {
        min: Vec3,
        max: Vec3,
        #[serde(default)]
        layer: SurfaceLayer,
    },
}

impl Occluder {
    /// Surface layer of this occluder
    pub fn layer(&self) -> SurfaceLayer {
        match self {
            Self::Sphere { layer, .. } | Self::Box { layer, .. } => *layer,
        }
    }

    /// Distance along a normalized ray to the first surface crossing
    pub fn intersect(&self, origin: Vec3, direction: Vec3) -> Option<f32> {
        match *self {
            Self::Sphere { center, radius, .. } => ray_sphere(origin, direction, center, radius),
            Self::Box { min, max, .. } => ray_box(origin, direction, min, max),
        }
    }
}

/// Ray-sphere intersection, nearest positive distance
pub fn ray_sphere(origin: Vec3, direction: Vec3, center: Vec3, radius: f32) -> Option<f32> {
    let oc = origin - center;
    let a = direction.dot(direction);
    let b = 2.0 * oc.dot(direction);
    let c = oc.dot(oc) - radius * radius;
    let discriminant = b * b - 4.0 * a * c;

    if discriminant < 0.0 || a == 0.0 {
        return None;
    }

    let sqrt_d = discriminant.sqrt();
    let t1 = (-b - sqrt_d) / (2.0 * a);
    let t2 = (-b + sqrt_d) / (2.0 * a);

    if t1 > 0.0 {
        Some(t1)
    } else if t2 > 0.0 {
        Some(t2)
    } else {
        None
    }
}

/// Ray-box intersection (slab method), nearest non-negative distance
pub fn ray_box(origin: Vec3, direction: Vec3, min: Vec3, max: Vec3) -> Option<f32> {
    let inv = direction.recip();
    let t1 = (min - origin) * inv;
    let t2 = (max - origin) * inv;

    let tmin = t1.min(t2).max_element();
    let tmax = t1.max(t2).min_element();

    // A zero direction component on a slab boundary yields NaN
    if tmin.is_nan() || tmax.is_nan() || tmax < 0.0 || tmin > tmax {
        return None;
    }
    Some(if tmin < 0.0 { tmax } else { tmin })
}

/// A set of occluders answering raycasts
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct OccluderField {
    occluders: Vec<Occluder>,
}

impl OccluderField {
    /// Create a field from a list of occluders
    pub fn new(occluders: Vec<Occluder>) -> Self {
        Self { occluders }
    }

    /// Every hit within `max_distance` as (distance, layer), nearest first
    pub fn hits(&self, origin: Vec3, direction: Vec3, max_distance: f32) -> Vec<(f32, SurfaceLayer)> {
        let mut hits: Vec<(f32, SurfaceLayer)> = self
            .occluders
            .iter()
            .filter_map(|o| {
                o.intersect(origin, direction)
                    .filter(|t| *t <= max_distance)
                    .map(|t| (t, o.layer()))
            })
            .collect();

        hits.sort_by(|a, b| a.0.partial_cmp(&b.0).unwrap_or(Ordering::Equal));
        hits
    }
}

impl LineOfSight for OccluderField {
    fn cast_ray_all(&self, origin: Vec3, direction: Vec3, max_distance: f32) -> Vec<SurfaceLayer> {
        self.hits(origin, direction, max_distance)
            .into_iter()
            .map(|(_, layer)| layer)
            .collect()
    }
}
