//! Hitscan targeting по сферам (headless замена physics raycast)

use bevy::math::Vec3;

use crate::weapon::collaborators::TargetingService;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TargetSphere {
    pub center: Vec3,
    pub radius: f32,
}

/// Набор сфер; raycast возвращает ближайшее попадание в пределах range
#[derive(Debug, Clone, Default)]
pub struct SphereTargets {
    spheres: Vec<TargetSphere>,
}

impl SphereTargets {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, center: Vec3, radius: f32) {
        self.spheres.push(TargetSphere { center, radius });
    }

    pub fn with(mut self, center: Vec3, radius: f32) -> Self {
        self.push(center, radius);
        self
    }

    pub fn len(&self) -> usize {
        self.spheres.len()
    }

    pub fn is_empty(&self) -> bool {
        self.spheres.is_empty()
    }
}

/// Расстояние вдоль луча до входа в сферу (origin внутри → 0)
pub fn ray_sphere_distance(origin: Vec3, direction: Vec3, sphere: &TargetSphere) -> Option<f32> {
    let to_origin = origin - sphere.center;
    let c = to_origin.length_squared() - sphere.radius * sphere.radius;
    if c <= 0.0 {
        return Some(0.0);
    }

    // direction нормализован → a = 1
    let b = to_origin.dot(direction);
    if b > 0.0 {
        return None;
    }

    let discriminant = b * b - c;
    if discriminant < 0.0 {
        return None;
    }

    Some(-b - discriminant.sqrt())
}

impl TargetingService for SphereTargets {
    fn raycast(&self, origin: Vec3, direction: Vec3, max_range: f32) -> Option<Vec3> {
        let direction = direction.try_normalize()?;

        self.spheres
            .iter()
            .filter_map(|sphere| ray_sphere_distance(origin, direction, sphere))
            .filter(|distance| *distance <= max_range)
            .min_by(|a, b| a.total_cmp(b))
            .map(|distance| origin + direction * distance)
    }
}
