//! Equipment system implementations
//!
//! # Systems
//!
//! - `process_weapon_switch` - hotkey switch активного слота
//! - `process_weapon_cycle` - прокрутка слотов
//! - `process_weapon_drop` - активное оружие → `DroppedWeapon` entity
//! - `process_weapon_pick_up` - `DroppedWeapon` entity → loadout
//!
//! После каждой операции сигналы equip/unequip пересылаются как
//! `WeaponFeedback` владельца (ammo HUD сразу показывает новое оружие).

use bevy::prelude::*;

use crate::equipment::events::*;
use crate::equipment::loadout::{DroppedWeapon, WeaponLoadout};
use crate::logger::{log, log_error, log_warning};
use crate::shooting::{SignalBridge, WeaponFeedback};

// ============================================================================
// Weapon Switch
// ============================================================================

pub fn process_weapon_switch(
    mut events: EventReader<SwitchWeaponIntent>,
    mut loadouts: Query<&mut WeaponLoadout>,
    bridge: Res<SignalBridge>,
    mut feedback: EventWriter<WeaponFeedback>,
) {
    for intent in events.read() {
        let Ok(mut loadout) = loadouts.get_mut(intent.entity) else {
            log_error(&format!("Entity {:?} missing WeaponLoadout", intent.entity));
            continue;
        };

        match loadout.switch_to(intent.slot) {
            Ok(cancelled) => {
                bridge.forward(intent.entity, &mut feedback);
                if cancelled > 0 {
                    log(&format!(
                        "Entity {:?}: switch cancelled {} pending action(s)",
                        intent.entity, cancelled
                    ));
                }
            }
            Err(err) => log_warning(&format!("⚠️ Switch {:?}: {}", intent.entity, err)),
        }
    }
}

pub fn process_weapon_cycle(
    mut events: EventReader<CycleWeaponIntent>,
    mut loadouts: Query<&mut WeaponLoadout>,
    bridge: Res<SignalBridge>,
    mut feedback: EventWriter<WeaponFeedback>,
) {
    for intent in events.read() {
        let Ok(mut loadout) = loadouts.get_mut(intent.entity) else {
            continue;
        };

        if let Err(err) = loadout.cycle(intent.step) {
            log_warning(&format!("⚠️ Cycle {:?}: {}", intent.entity, err));
            continue;
        }
        bridge.forward(intent.entity, &mut feedback);
    }
}

// ============================================================================
// Drop / Pick up
// ============================================================================

pub fn process_weapon_drop(
    mut commands: Commands,
    mut events: EventReader<DropWeaponIntent>,
    mut owners: Query<(&mut WeaponLoadout, Option<&Transform>)>,
    bridge: Res<SignalBridge>,
    mut feedback: EventWriter<WeaponFeedback>,
) {
    for intent in events.read() {
        let Ok((mut loadout, transform)) = owners.get_mut(intent.entity) else {
            log_error(&format!("Entity {:?} missing WeaponLoadout", intent.entity));
            continue;
        };

        let weapon = match loadout.drop_active() {
            Ok(weapon) => weapon,
            Err(err) => {
                log_warning(&format!("⚠️ Drop {:?}: {}", intent.entity, err));
                continue;
            }
        };
        bridge.forward(intent.entity, &mut feedback);

        let position = transform.map(|t| t.translation).unwrap_or_default();
        commands.spawn((DroppedWeapon::new(weapon), Transform::from_translation(position)));
    }
}

pub fn process_weapon_pick_up(
    mut commands: Commands,
    mut events: EventReader<PickUpWeaponIntent>,
    mut owners: Query<(&mut WeaponLoadout, Option<&Transform>)>,
    mut ground: Query<&mut DroppedWeapon>,
    bridge: Res<SignalBridge>,
    mut feedback: EventWriter<WeaponFeedback>,
) {
    for intent in events.read() {
        let Ok((mut loadout, transform)) = owners.get_mut(intent.entity) else {
            log_error(&format!("Entity {:?} missing WeaponLoadout", intent.entity));
            continue;
        };

        // Guard: уже подобрали (два intent в одном тике) или entity не оружие
        let Some(weapon) = ground.get_mut(intent.weapon).ok().and_then(|mut d| d.take()) else {
            log_warning(&format!(
                "⚠️ {:?} is not a weapon on the ground",
                intent.weapon
            ));
            continue;
        };
        commands.entity(intent.weapon).despawn();

        let swapped = loadout.pick_up(weapon);
        bridge.forward(intent.entity, &mut feedback);

        if let Some(old) = swapped {
            let position = transform.map(|t| t.translation).unwrap_or_default();
            commands.spawn((DroppedWeapon::new(old), Transform::from_translation(position)));
        }
    }
}
