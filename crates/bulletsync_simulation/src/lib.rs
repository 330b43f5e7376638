//! BulletSync Simulation Core
//!
//! Weapon fire control + headless ECS host на Bevy 0.16
//!
//! Слои:
//! - `weapon` - engine-agnostic fire control (state machine, scheduler, collaborators)
//! - `shooting` - ECS обвязка: input → tick → events, recoil, HUD, projectiles
//! - `equipment` - loadout (switch / drop / pick up)
//! - `logger` - глобальный logger с pluggable printer

use bevy::prelude::*;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

// Публичные модули
pub mod equipment;
pub mod logger;
pub mod shooting;
pub mod weapon;

// Re-export основных типов для удобства
pub use equipment::{
    CycleWeaponIntent, DropWeaponIntent, DroppedWeapon, EquipmentPlugin, PickUpWeaponIntent,
    SwitchWeaponIntent, WeaponLoadout, MAX_WEAPON_SLOTS,
};
pub use logger::{init_logger, log, log_error, log_info, log_warning, LogLevel, LogPrinter};
pub use shooting::{
    spawn_shooter, AimPose, AmmoHud, CameraRecoil, Hittable, Projectile, Shooter, ShootingPlugin,
    SignalBridge, TriggerInput, WeaponAimChanged, WeaponFeedback, WeaponFired,
    WeaponReloadFinished, WeaponReloadStarted,
};
pub use weapon::{
    AimRay, FireControl, FireControlHooks, FireInput, ShootingMode, WeaponConfig, WeaponEvent,
    WeaponModel, WeaponSignal,
};

/// Главный plugin симуляции (объединяет все подсистемы)
pub struct SimulationPlugin;

impl Plugin for SimulationPlugin {
    fn build(&self, app: &mut App) {
        app
            // Fixed timestep 60Hz для simulation tick
            .insert_resource(Time::<Fixed>::from_hz(60.0))
            // Детерминистичный RNG (seed по умолчанию); create_headless_app ставит свой
            .init_resource::<DeterministicRng>()
            // Подсистемы
            .add_plugins((ShootingPlugin, EquipmentPlugin));
    }
}

/// Детерминистичный RNG resource (seeded)
///
/// Из него берутся seeds для RNG каждого нового оружия.
#[derive(Resource)]
pub struct DeterministicRng {
    pub rng: ChaCha8Rng,
    pub seed: u64,
}

impl DeterministicRng {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: ChaCha8Rng::seed_from_u64(seed),
            seed,
        }
    }
}

impl Default for DeterministicRng {
    fn default() -> Self {
        Self::new(42)
    }
}

/// Создаёт minimal Bevy App для headless симуляции
pub fn create_headless_app(seed: u64) -> App {
    let mut app = App::new();
    init_logger();
    app.add_plugins(MinimalPlugins)
        .insert_resource(DeterministicRng::new(seed))
        .insert_resource(Time::<Fixed>::from_hz(60.0)); // 60Hz FixedUpdate

    app
}

/// Snapshot мира для сравнения детерминизма
pub fn world_snapshot<T: Component>(world: &mut World) -> Vec<u8>
where
    T: std::fmt::Debug,
{
    let mut snapshot = Vec::new();

    let mut query = world.query::<(Entity, &T)>();
    let mut entities: Vec<_> = query.iter(world).collect();

    // Сортируем по Entity ID для детерминизма
    entities.sort_by_key(|(entity, _)| entity.index());

    // Сериализуем в байты через Debug (простейший способ)
    for (entity, component) in entities {
        snapshot.extend_from_slice(&entity.index().to_le_bytes());
        snapshot.extend_from_slice(format!("{:?}", component).as_bytes());
    }

    snapshot
}
