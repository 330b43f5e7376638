//! Shooting components (ECS сторона fire control)
//!
//! Host (engine bridge, AI, тесты) пишет `TriggerInput` и `AimPose`,
//! симуляция читает их в `tick_fire_controls`.

use bevy::prelude::*;

use crate::weapon::{AimRay, AmmoCounter, FireInput, RecoilSpring};

/// Стрелок (игрок или бот с loadout)
#[derive(Component, Debug, Clone, Copy, Default)]
pub struct Shooter;

/// Состояние кнопок стрелка
///
/// `fire_pressed` / `reload_requested` - edge флаги, сбрасываются после тика.
#[derive(Component, Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TriggerInput(pub FireInput);

impl TriggerInput {
    pub fn hold(&mut self) {
        self.0.fire_held = true;
    }

    pub fn release(&mut self) {
        self.0.fire_held = false;
    }

    pub fn request_reload(&mut self) {
        self.0.reload_requested = true;
    }

    pub fn set_aim(&mut self, aim_held: bool) {
        self.0.aim_held = aim_held;
    }

    /// Сброс edge флагов (после обработки кадра)
    pub fn clear_edges(&mut self) {
        self.0.fire_pressed = false;
        self.0.reload_requested = false;
    }
}

/// Камера + ствол стрелка
#[derive(Component, Debug, Clone, Copy, Default, PartialEq)]
pub struct AimPose(pub AimRay);

/// Camera recoil пружина (получает kick через `WeaponFeedback`)
#[derive(Component, Debug, Clone, Copy, Default, PartialEq)]
pub struct CameraRecoil(pub RecoilSpring);

/// HUD патронов активного оружия
#[derive(Component, Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AmmoHud(pub AmmoCounter);

/// Цель для hitscan targeting (сфера вокруг Transform)
#[derive(Component, Debug, Clone, Copy, PartialEq)]
pub struct Hittable {
    pub radius: f32,
}

impl Default for Hittable {
    fn default() -> Self {
        Self { radius: 0.5 }
    }
}
