//! Hittable trait and HitRecord for ray-object intersection.

use crate::Ray;
use glint_math::{Interval, Vec3};

/// Record of a ray-object intersection.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HitRecord {
    /// Point of intersection
    pub point: Vec3,
    /// Surface normal at intersection (always points against ray)
    pub normal: Vec3,
    /// Parameter t where the intersection occurs
    pub t: f32,
    /// Whether the ray hit the front face (outside) of the surface
    pub front_face: bool,
}

impl HitRecord {
    /// Build a record whose normal is oriented against the incoming ray.
    pub fn new(ray: &Ray, t: f32, outward_normal: Vec3) -> Self {
        let mut rec = Self {
            point: ray.at(t),
            normal: outward_normal,
            t,
            front_face: true,
        };
        rec.set_face_normal(ray, outward_normal);
        rec
    }

    /// Set the face normal based on ray direction and outward normal.
    ///
    /// The normal is always stored pointing against the ray direction,
    /// so we need to track whether we hit the front or back face.
    pub fn set_face_normal(&mut self, ray: &Ray, outward_normal: Vec3) {
        // If the ray and normal point in the same direction, we're inside
        self.front_face = ray.direction.dot(outward_normal) < 0.0;

        self.normal = if self.front_face {
            outward_normal
        } else {
            -outward_normal
        };
    }
}

/// Trait for objects that can be hit by rays.
pub trait Hittable: Send + Sync {
    /// Test if a ray hits this object with `t` inside `ray_t` (inclusive).
    fn hit(&self, ray: &Ray, ray_t: Interval) -> Option<HitRecord>;
}

/// A scene list: linear scan keeping the closest hit.
///
/// The accepted range shrinks to the best `t` found so far. A later object
/// only replaces the current hit when it is strictly closer, so on exact
/// ties the earlier object wins.
impl<T: Hittable> Hittable for [T] {
    fn hit(&self, ray: &Ray, ray_t: Interval) -> Option<HitRecord> {
        let mut closest: Option<HitRecord> = None;

        for object in self {
            let bound = closest.map_or(ray_t.max, |best| best.t);
            if let Some(rec) = object.hit(ray, ray_t.with_max(bound)) {
                if closest.map_or(true, |best| rec.t < best.t) {
                    closest = Some(rec);
                }
            }
        }

        closest
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Sphere;

    #[test]
    fn test_face_normal_outside() {
        let ray = Ray::new(Vec3::ZERO, Vec3::NEG_Z);
        let rec = HitRecord::new(&ray, 0.5, Vec3::Z);

        assert!(rec.front_face);
        assert_eq!(rec.normal, Vec3::Z);
        assert_eq!(rec.point, Vec3::new(0.0, 0.0, -0.5));
    }

    #[test]
    fn test_face_normal_inside_is_flipped() {
        let ray = Ray::new(Vec3::ZERO, Vec3::NEG_Z);
        let rec = HitRecord::new(&ray, 0.5, Vec3::NEG_Z);

        assert!(!rec.front_face);
        assert_eq!(rec.normal, Vec3::Z);
    }

    #[test]
    fn test_world_keeps_closest() {
        let world = [
            Sphere::new(Vec3::new(0.0, 0.0, -5.0), 0.5),
            Sphere::new(Vec3::new(0.0, 0.0, -2.0), 0.5),
            Sphere::new(Vec3::new(0.0, 0.0, -8.0), 0.5),
        ];
        let ray = Ray::new(Vec3::ZERO, Vec3::NEG_Z);

        let rec = world.hit(&ray, Interval::new(0.0, 1000.0)).expect("should hit");
        assert!((rec.t - 1.5).abs() < 1e-5);
    }

    #[test]
    fn test_world_respects_t_max() {
        let world = [Sphere::new(Vec3::new(0.0, 0.0, -5.0), 0.5)];
        let ray = Ray::new(Vec3::ZERO, Vec3::NEG_Z);

        assert!(world.hit(&ray, Interval::new(0.0, 4.0)).is_none());
        assert!(world.hit(&ray, Interval::new(0.0, 4.5)).is_some());
    }

    #[test]
    fn test_world_tie_keeps_first() {
        // Both surfaces sit exactly at t = 1: the first from outside, the second from inside
        let outside = Sphere::new(Vec3::new(0.0, 0.0, -2.0), 1.0);
        let inside = Sphere::new(Vec3::ZERO, 1.0);
        let ray = Ray::new(Vec3::ZERO, Vec3::NEG_Z);
        let range = Interval::new(0.0, 1000.0);

        let rec = [outside, inside].hit(&ray, range).expect("should hit");
        assert_eq!(rec.t, 1.0);
        assert!(rec.front_face);

        let rec = [inside, outside].hit(&ray, range).expect("should hit");
        assert_eq!(rec.t, 1.0);
        assert!(!rec.front_face);
    }

    #[test]
    fn test_empty_world_misses() {
        let world: [Sphere; 0] = [];
        let ray = Ray::new(Vec3::ZERO, Vec3::NEG_Z);
        assert!(world.hit(&ray, Interval::new(0.0, 1000.0)).is_none());
    }

    #[test]
    fn test_surface_origin_aimed_outward() {
        let world = [
            Sphere::new(Vec3::new(0.0, 0.0, -1.0), 0.5),
            Sphere::new(Vec3::new(3.0, 1.0, -4.0), 1.25),
        ];

        for sphere in &world {
            for outward in [Vec3::X, Vec3::Y, Vec3::Z, Vec3::new(1.0, -2.0, 0.5).normalize()] {
                let origin = sphere.center + outward * sphere.radius;
                let ray = Ray::new(origin, outward);
                let hit = sphere.hit(&ray, Interval::new(0.0, 1000.0));
                if let Some(rec) = hit {
                    assert!(rec.t.abs() < 1e-4, "unexpected hit at t={}", rec.t);
                }
            }
        }
    }
}
