//! Shooting events
//!
//! **Fire control → host:**
//! - `WeaponFired` - израсходован патрон (pellets, target point, recoil)
//! - `WeaponReloadStarted` / `WeaponReloadFinished`
//! - `WeaponAimChanged`
//!
//! **Collaborator bridge:**
//! - `WeaponFeedback` - сигнал presentation / ammo UI / camera recoil,
//!   помеченный entity владельца оружия

use std::time::Duration;

use bevy::prelude::*;

use crate::weapon::{FiredRound, WeaponSignal};

#[derive(Event, Clone, Debug)]
pub struct WeaponFired {
    pub shooter: Entity,
    pub round: FiredRound,
}

#[derive(Event, Clone, Debug)]
pub struct WeaponReloadStarted {
    pub shooter: Entity,
    pub duration: Duration,
}

#[derive(Event, Clone, Debug)]
pub struct WeaponReloadFinished {
    pub shooter: Entity,
    pub bullets_left: u32,
}

#[derive(Event, Clone, Debug)]
pub struct WeaponAimChanged {
    pub shooter: Entity,
    pub aiming: bool,
}

/// Fire-and-forget сигнал коллаборатору
#[derive(Event, Clone, Debug)]
pub struct WeaponFeedback {
    pub owner: Entity,
    pub signal: WeaponSignal,
}
