//! Shooting systems (FixedUpdate)
//!
//! # Systems
//!
//! - `tick_fire_controls` - тик активного оружия каждого стрелка, events + feedback
//! - `apply_weapon_feedback` - recoil kick → `CameraRecoil`, ammo → `AmmoHud`
//! - `settle_camera_recoil` - шаг пружины камеры

use bevy::prelude::*;

use crate::equipment::WeaponLoadout;
use crate::shooting::bridge::SignalBridge;
use crate::shooting::components::{AimPose, AmmoHud, CameraRecoil, Hittable, Shooter, TriggerInput};
use crate::shooting::events::*;
use crate::weapon::{AmmoDisplay, RecoilReceiver, SphereTargets, WeaponEvent, WeaponSignal};

/// Тик активного оружия каждого стрелка
///
/// Targeting собирается из `Hittable` (кроме самого стрелка).
/// Edge флаги input сбрасываются после тика.
pub fn tick_fire_controls(
    time: Res<Time>,
    bridge: Res<SignalBridge>,
    targets: Query<(Entity, &Transform, &Hittable)>,
    mut shooters: Query<(Entity, &mut WeaponLoadout, &mut TriggerInput, &AimPose), With<Shooter>>,
    mut fired: EventWriter<WeaponFired>,
    mut reload_started: EventWriter<WeaponReloadStarted>,
    mut reload_finished: EventWriter<WeaponReloadFinished>,
    mut aim_changed: EventWriter<WeaponAimChanged>,
    mut feedback: EventWriter<WeaponFeedback>,
) {
    let dt = time.delta();

    for (shooter, mut loadout, mut input, aim) in shooters.iter_mut() {
        let Some(weapon) = loadout.active_mut() else {
            input.clear_edges();
            continue;
        };

        let mut spheres = SphereTargets::new();
        for (entity, transform, hittable) in targets.iter() {
            if entity != shooter {
                spheres.push(transform.translation, hittable.radius);
            }
        }

        let events = weapon.tick(dt, &input.0, &aim.0, &spheres);
        bridge.forward(shooter, &mut feedback);
        input.clear_edges();

        for event in events {
            match event {
                WeaponEvent::Fired(round) => {
                    fired.write(WeaponFired { shooter, round });
                }
                WeaponEvent::ReloadStarted { duration, .. } => {
                    reload_started.write(WeaponReloadStarted { shooter, duration });
                }
                WeaponEvent::ReloadFinished { bullets_left, .. } => {
                    reload_finished.write(WeaponReloadFinished {
                        shooter,
                        bullets_left,
                    });
                }
                WeaponEvent::AimEntered => {
                    aim_changed.write(WeaponAimChanged {
                        shooter,
                        aiming: true,
                    });
                }
                WeaponEvent::AimExited => {
                    aim_changed.write(WeaponAimChanged {
                        shooter,
                        aiming: false,
                    });
                }
            }
        }
    }
}

/// Collaborator сигналы → компоненты владельца
///
/// Presentation cues остаются events для engine bridge (анимации, звук).
pub fn apply_weapon_feedback(
    mut feedback: EventReader<WeaponFeedback>,
    mut receivers: Query<(Option<&mut CameraRecoil>, Option<&mut AmmoHud>)>,
) {
    for event in feedback.read() {
        let Ok((recoil, hud)) = receivers.get_mut(event.owner) else {
            continue;
        };

        match event.signal {
            WeaponSignal::Recoil {
                kick,
                snappiness,
                return_speed,
            } => {
                if let Some(mut recoil) = recoil {
                    recoil.0.kick(kick, snappiness, return_speed);
                }
            }
            WeaponSignal::Ammo {
                bullets_left,
                magazine_size,
            } => {
                if let Some(mut hud) = hud {
                    hud.0.show(bullets_left, magazine_size);
                }
            }
            WeaponSignal::Cue(_) | WeaponSignal::Equipped(_) => {}
        }
    }
}

/// Пружина камеры возвращается к нулю
pub fn settle_camera_recoil(mut cameras: Query<&mut CameraRecoil>, time: Res<Time>) {
    let dt = time.delta_secs();
    for mut recoil in cameras.iter_mut() {
        recoil.0.update(dt);
    }
}
