//! Scripted target movement

use glam::Vec3;
use stalker_ai::navigation::{shared_position, SharedPosition};

/// Target walking a polyline at constant speed.
///
/// The current position is published through a [`SharedPosition`] that the
/// agent reads as its target locator.
#[derive(Debug, Clone)]
pub struct TargetPath {
    points: Vec<Vec3>,
    speed: f32,
    looped: bool,
    travelled: f32,
    position: SharedPosition,
}

impl TargetPath {
    /// Create a path starting at its first point. An empty path never
    /// resolves.
    pub fn new(points: Vec<Vec3>, speed: f32, looped: bool) -> Self {
        let position = shared_position(points.first().copied());
        Self {
            points,
            speed,
            looped,
            travelled: 0.0,
            position,
        }
    }

    /// Locator handle for the agent
    pub fn locator(&self) -> SharedPosition {
        self.position.clone()
    }

    /// Current position
    pub fn position(&self) -> Option<Vec3> {
        self.position.get()
    }

    /// Total polyline length (closing segment included when looped)
    pub fn length(&self) -> f32 {
        let open: f32 = self.points.windows(2).map(|w| w[0].distance(w[1])).sum();
        match (self.looped, self.points.first(), self.points.last()) {
            (true, Some(first), Some(last)) => open + last.distance(*first),
            _ => open,
        }
    }

    /// Move along the path
    pub fn advance(&mut self, delta_time: f32) {
        if self.points.is_empty() {
            return;
        }
        self.travelled += self.speed * delta_time;
        self.position.set(Some(self.sample(self.travelled)));
    }

    /// Position after travelling `distance` from the start
    pub fn sample(&self, distance: f32) -> Vec3 {
        let Some(&first) = self.points.first() else {
            return Vec3::ZERO;
        };

        let length = self.length();
        if length <= 0.0 {
            return first;
        }

        let mut remaining = if self.looped {
            distance.rem_euclid(length)
        } else {
            distance.clamp(0.0, length)
        };

        let closing = self.looped.then(|| (self.points[self.points.len() - 1], first));
        let segments = self
            .points
            .windows(2)
            .map(|w| (w[0], w[1]))
            .chain(closing);

        let mut last = first;
        for (from, to) in segments {
            let segment = from.distance(to);
            if remaining <= segment && segment > 0.0 {
                return from.lerp(to, remaining / segment);
            }
            remaining -= segment;
            last = to;
        }
        last
    }
}
