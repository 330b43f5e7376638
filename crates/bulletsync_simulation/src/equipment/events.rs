//! Equipment intents
//!
//! # Weapon lifecycle
//!
//! - `SwitchWeaponIntent` → активный слот (hotkeys 1-3)
//! - `CycleWeaponIntent` → следующий/предыдущий слот (колесо мыши)
//! - `DropWeaponIntent` → активное оружие на землю (`DroppedWeapon` entity)
//! - `PickUpWeaponIntent` → `DroppedWeapon` entity в loadout

use bevy::prelude::*;

/// Сменить активное оружие
///
/// # Flow
/// 1. Unequip текущего (pending reload/burst/cooldown отменяются)
/// 2. Update active slot
/// 3. Equip нового (ammo HUD получает его магазин)
#[derive(Event, Clone, Debug)]
pub struct SwitchWeaponIntent {
    pub entity: Entity,
    pub slot: usize,
}

/// Прокрутка слотов с wrap-around
#[derive(Event, Clone, Debug)]
pub struct CycleWeaponIntent {
    pub entity: Entity,
    /// +1 вперёд, -1 назад
    pub step: i32,
}

/// Выбросить активное оружие
#[derive(Event, Clone, Debug)]
pub struct DropWeaponIntent {
    pub entity: Entity,
}

/// Подобрать выброшенное оружие
///
/// # Flow
/// 1. Take `FireControl` из `DroppedWeapon`, despawn entity
/// 2. Loadout полон → активное выбрасывается на место подобранного
/// 3. Подобранное сразу в руках
#[derive(Event, Clone, Debug)]
pub struct PickUpWeaponIntent {
    pub entity: Entity,
    pub weapon: Entity,
}
