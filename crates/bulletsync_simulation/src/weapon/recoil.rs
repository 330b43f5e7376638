//! Camera recoil - пружина поверх Euler углов
//!
//! Каждый выстрел добавляет kick в `target`; `target` возвращается к нулю со
//! скоростью `return_speed`, `current` догоняет `target` со скоростью `snappiness`.
//! Host применяет `rotation()` к камере (local rotation).

use bevy::math::{EulerRot, Quat, Vec3};
use rand::Rng;

use crate::weapon::collaborators::RecoilReceiver;
use crate::weapon::config::RecoilProfile;

/// Сэмплирует kick: x фиксирован, y/z случайны в `[-y, y]` / `[-z, z]`
pub fn sample_kick(profile: RecoilProfile, rng: &mut impl Rng) -> Vec3 {
    Vec3::new(
        profile.x,
        symmetric(profile.y, rng),
        symmetric(profile.z, rng),
    )
}

/// Uniform в `[-extent, extent]`
pub(crate) fn symmetric(extent: f32, rng: &mut impl Rng) -> f32 {
    let extent = extent.abs();
    if extent == 0.0 {
        return 0.0;
    }
    rng.gen_range(-extent..=extent)
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RecoilSpring {
    /// Текущий поворот камеры (градусы)
    pub current: Vec3,
    /// Куда пружина тянет (градусы)
    pub target: Vec3,
    pub snappiness: f32,
    pub return_speed: f32,
}

impl Default for RecoilSpring {
    fn default() -> Self {
        Self {
            current: Vec3::ZERO,
            target: Vec3::ZERO,
            snappiness: 6.0,
            return_speed: 2.0,
        }
    }
}

impl RecoilSpring {
    pub fn new(snappiness: f32, return_speed: f32) -> Self {
        Self {
            snappiness,
            return_speed,
            ..Self::default()
        }
    }

    pub fn apply_kick(&mut self, kick: Vec3) {
        self.target += kick;
    }

    /// Один шаг пружины
    pub fn update(&mut self, dt: f32) {
        let back = (self.return_speed * dt).clamp(0.0, 1.0);
        self.target = self.target.lerp(Vec3::ZERO, back);

        let follow = (self.snappiness * dt).clamp(0.0, 1.0);
        self.current = self.current.lerp(self.target, follow);
    }

    /// Local rotation камеры
    pub fn rotation(&self) -> Quat {
        Quat::from_euler(
            EulerRot::XYZ,
            self.current.x.to_radians(),
            self.current.y.to_radians(),
            self.current.z.to_radians(),
        )
    }

    pub fn is_settled(&self, epsilon: f32) -> bool {
        self.current.length() <= epsilon && self.target.length() <= epsilon
    }
}

impl RecoilReceiver for RecoilSpring {
    fn kick(&mut self, kick: Vec3, snappiness: f32, return_speed: f32) {
        self.snappiness = snappiness;
        self.return_speed = return_speed;
        self.apply_kick(kick);
    }
}
