//! Spawn helpers для стрелков

use bevy::prelude::*;
use rand::Rng;

use crate::equipment::WeaponLoadout;
use crate::shooting::bridge::SignalBridge;
use crate::shooting::components::{AimPose, AmmoHud, CameraRecoil, Shooter, TriggerInput};
use crate::weapon::{AimRay, AmmoDisplay, ArmError, FireControl, WeaponConfig};
use crate::DeterministicRng;

/// Seed для RNG нового оружия (из `DeterministicRng`, если он есть)
pub fn next_weapon_seed(world: &mut World) -> u64 {
    world
        .get_resource_mut::<DeterministicRng>()
        .map(|mut rng| rng.rng.gen::<u64>())
        .unwrap_or_default()
}

/// Fire control, подключённый к `SignalBridge` мира
pub fn build_fire_control(world: &mut World, config: WeaponConfig) -> Result<FireControl, ArmError> {
    world.init_resource::<SignalBridge>();
    let seed = next_weapon_seed(world);
    let weapon = world.resource::<SignalBridge>().fire_control(config, seed)?;
    Ok(weapon)
}

/// Spawn стрелка: первое оружие сразу в руках, камера смотрит в -Z
pub fn spawn_shooter(
    world: &mut World,
    position: Vec3,
    configs: Vec<WeaponConfig>,
) -> Result<Entity, ArmError> {
    world.init_resource::<SignalBridge>();

    let mut weapons = Vec::with_capacity(configs.len());
    for config in configs {
        weapons.push(build_fire_control(world, config)?);
    }
    let loadout = WeaponLoadout::with_weapons(weapons)?;

    // Сигналы equip до появления entity - HUD заполняем напрямую
    world.resource::<SignalBridge>().discard();
    let mut hud = AmmoHud::default();
    if let Some(active) = loadout.active() {
        hud.0.show(active.bullets_left(), active.magazine_size());
    }

    let entity = world
        .spawn((
            Shooter,
            Transform::from_translation(position),
            TriggerInput::default(),
            AimPose(AimRay::new(position, Vec3::NEG_Z, position)),
            CameraRecoil::default(),
            hud,
            loadout,
        ))
        .id();

    Ok(entity)
}
