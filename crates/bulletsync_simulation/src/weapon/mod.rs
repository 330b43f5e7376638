//! Weapon module - fire control одного оружия (engine-agnostic)
//!
//! Ответственность:
//! - Конфигурация оружия (presets + RON)
//! - State machine: Idle / Firing / Reloading + Aiming overlay
//! - Отложенные переходы (`ActionScheduler`) вместо engine таймеров
//! - Коллабораторы (targeting, presentation, ammo UI, camera recoil) - traits
//!
//! ECS обвязка живёт в `shooting` и `equipment`, здесь только чистая логика.

pub mod ammo;
pub mod collaborators;
pub mod config;
pub mod error;
pub mod fire_control;
pub mod recoil;
pub mod scheduler;
pub mod state;
pub mod targeting;

// Tests (separate files with _tests suffix)
#[cfg(test)]
mod fire_control_tests;

// Re-export основных типов
pub use ammo::AmmoCounter;
pub use collaborators::{
    AimRay, AmmoDisplay, FireControlHooks, FireInput, NoTargeting, PresentationCue,
    PresentationLayer, RecoilReceiver, SignalSink, Silent, TargetingService, WeaponSignal,
};
pub use config::{secs_to_duration, RecoilProfile, ShootingMode, WeaponConfig, WeaponModel};
pub use error::{ArmError, ConfigError, LoadoutError};
pub use fire_control::{FireControl, FiredRound, Pellet, WeaponEvent};
pub use recoil::{sample_kick, RecoilSpring};
pub use scheduler::{ActionScheduler, ScheduledAction};
pub use state::{WeaponPhase, WeaponState};
pub use targeting::{SphereTargets, TargetSphere};
