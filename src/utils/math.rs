//! src/utils/math.rs
//! Geometric primitives shared by the player controller and the block world
use glam::Vec3;

use super::error::{EngineError, Result};

/// Axis-aligned bounding box
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AABB {
    pub min: Vec3,
    pub max: Vec3,
}

impl AABB {
    /// Cube of edge length `side` centered on `center`.
    pub fn cube(center: Vec3, side: f32) -> Self {
        let half = Vec3::splat(side * 0.5);
        Self {
            min: center - half,
            max: center + half,
        }
    }

    pub fn contains(&self, point: Vec3) -> bool {
        point.x >= self.min.x
            && point.x <= self.max.x
            && point.y >= self.min.y
            && point.y <= self.max.y
            && point.z >= self.min.z
            && point.z <= self.max.z
    }
}

/// A half-line with a unit-length direction.
///
/// Construction rejects zero-length and non-finite inputs, so every `Ray`
/// that reaches the block world is safe to intersect.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Ray {
    origin: Vec3,
    direction: Vec3,
}

impl Ray {
    pub fn new(origin: Vec3, direction: Vec3) -> Result<Self> {
        if !origin.is_finite() || !direction.is_finite() {
            return Err(EngineError::NonFiniteRay);
        }
        let direction = direction.try_normalize().ok_or(EngineError::DegenerateRay)?;
        Ok(Self { origin, direction })
    }

    pub fn origin(&self) -> Vec3 {
        self.origin
    }

    pub fn direction(&self) -> Vec3 {
        self.direction
    }

    pub fn at(&self, t: f32) -> Vec3 {
        self.origin + self.direction * t
    }

    /// Slab test. Returns the distance to the entry point, or to the exit
    /// point when the origin is already inside the box. `None` when the box
    /// is missed or lies entirely behind the origin.
    pub fn intersect_aabb(&self, aabb: &AABB) -> Option<f32> {
        let mut tmin = f32::NEG_INFINITY;
        let mut tmax = f32::INFINITY;

        for i in 0..3 {
            if self.direction[i].abs() < f32::EPSILON {
                // Parallel to slab: no hit unless the origin lies within it
                if self.origin[i] < aabb.min[i] || self.origin[i] > aabb.max[i] {
                    return None;
                }
            } else {
                let inv_d = 1.0 / self.direction[i];
                let mut t1 = (aabb.min[i] - self.origin[i]) * inv_d;
                let mut t2 = (aabb.max[i] - self.origin[i]) * inv_d;

                if t1 > t2 {
                    std::mem::swap(&mut t1, &mut t2);
                }

                tmin = tmin.max(t1);
                tmax = tmax.min(t2);

                if tmin > tmax {
                    return None;
                }
            }
        }

        if tmax < 0.0 {
            None
        } else if tmin >= 0.0 {
            Some(tmin)
        } else {
            Some(tmax)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_ray_normalizes_direction() {
        let ray = Ray::new(Vec3::ZERO, Vec3::new(0.0, 0.0, -4.0)).unwrap();
        assert_relative_eq!(ray.direction(), Vec3::NEG_Z);
        assert_relative_eq!(ray.at(2.5), Vec3::new(0.0, 0.0, -2.5));
    }

    #[test]
    fn test_ray_rejects_bad_input() {
        assert!(matches!(
            Ray::new(Vec3::ZERO, Vec3::ZERO),
            Err(EngineError::DegenerateRay)
        ));
        assert!(matches!(
            Ray::new(Vec3::new(f32::NAN, 0.0, 0.0), Vec3::X),
            Err(EngineError::NonFiniteRay)
        ));
        assert!(matches!(
            Ray::new(Vec3::ZERO, Vec3::new(0.0, f32::INFINITY, 0.0)),
            Err(EngineError::NonFiniteRay)
        ));
    }

    #[test]
    fn test_intersect_aabb_front_face() {
        let ray = Ray::new(Vec3::new(0.0, 1.0, 0.0), Vec3::NEG_Z).unwrap();
        let aabb = AABB::cube(Vec3::new(0.0, 1.0, -5.0), 2.0);
        assert_relative_eq!(ray.intersect_aabb(&aabb).unwrap(), 4.0);
    }

    #[test]
    fn test_intersect_aabb_miss_and_behind() {
        let ray = Ray::new(Vec3::ZERO, Vec3::NEG_Z).unwrap();
        let beside = AABB::cube(Vec3::new(5.0, 0.0, -5.0), 2.0);
        let behind = AABB::cube(Vec3::new(0.0, 0.0, 5.0), 2.0);
        assert_eq!(ray.intersect_aabb(&beside), None);
        assert_eq!(ray.intersect_aabb(&behind), None);
    }

    #[test]
    fn test_intersect_aabb_from_inside_returns_exit() {
        let ray = Ray::new(Vec3::ZERO, Vec3::X).unwrap();
        let aabb = AABB::cube(Vec3::ZERO, 2.0);
        assert_relative_eq!(ray.intersect_aabb(&aabb).unwrap(), 1.0);
    }

    #[test]
    fn test_intersect_aabb_diagonal() {
        let dir = Vec3::new(1.0, 0.0, -1.0);
        let ray = Ray::new(Vec3::ZERO, dir).unwrap();
        let aabb = AABB::cube(Vec3::new(3.0, 0.0, -3.0), 2.0);
        let t = ray.intersect_aabb(&aabb).unwrap();
        assert_relative_eq!(t, 2.0 * std::f32::consts::SQRT_2, epsilon = 1e-5);
        assert!(aabb.contains(ray.at(t + 1e-3)));
    }

    #[test]
    fn test_aabb_cube_extent() {
        let aabb = AABB::cube(Vec3::new(1.0, 1.0, 1.0), 2.0);
        assert_relative_eq!(aabb.min, Vec3::ZERO);
        assert_relative_eq!(aabb.max, Vec3::splat(2.0));
    }
}
