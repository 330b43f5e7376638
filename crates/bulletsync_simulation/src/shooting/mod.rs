//! Shooting module - ECS host для fire control
//!
//! ECS ответственность:
//! - Input стрелка (`TriggerInput`, `AimPose`) → `FireControl::tick`
//! - `WeaponEvent` → ECS events (`WeaponFired`, reload, aim)
//! - Collaborator сигналы через `SignalBridge` → `WeaponFeedback`
//! - Camera recoil пружина, ammo HUD, визуальные снаряды
//!
//! Engine bridge ответственность:
//! - Заполнять input/aim каждый кадр
//! - Анимации, звук, muzzle flash по `WeaponFeedback` cues

use bevy::prelude::*;

pub mod bridge;
pub mod components;
pub mod events;
pub mod projectile;
pub mod spawn;
pub mod systems;

// Re-export основных типов
pub use bridge::SignalBridge;
pub use components::{AimPose, AmmoHud, CameraRecoil, Hittable, Shooter, TriggerInput};
pub use events::{
    WeaponAimChanged, WeaponFeedback, WeaponFired, WeaponReloadFinished, WeaponReloadStarted,
};
pub use projectile::Projectile;
pub use spawn::{build_fire_control, next_weapon_seed, spawn_shooter};
pub use systems::{apply_weapon_feedback, settle_camera_recoil, tick_fire_controls};

/// Shooting Plugin
///
/// Порядок выполнения (FixedUpdate):
/// 1. tick_fire_controls - input → fire control → events
/// 2. apply_weapon_feedback - recoil / ammo HUD
/// 3. settle_camera_recoil - шаг пружины
/// 4. spawn_projectiles / advance_projectiles
///
/// Equipment intents обрабатываются до тика (см. `EquipmentPlugin`).
pub struct ShootingPlugin;

impl Plugin for ShootingPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<SignalBridge>()
            .add_event::<WeaponFired>()
            .add_event::<WeaponReloadStarted>()
            .add_event::<WeaponReloadFinished>()
            .add_event::<WeaponAimChanged>()
            .add_event::<WeaponFeedback>();

        app.add_systems(
            FixedUpdate,
            (
                tick_fire_controls,
                apply_weapon_feedback,
                settle_camera_recoil,
                projectile::spawn_projectiles,
                projectile::advance_projectiles,
            )
                .chain(),
        );
    }
}
