//! Equipment module - weapon loadout lifecycle
//!
//! # Architecture
//!
//! **Events → Systems flow:**
//! - Player/AI emits intent events
//! - Systems process intents (modify `WeaponLoadout`)
//! - Equip/unequip сигналы → `WeaponFeedback` (HUD, presentation)
//!
//! **Weapon lifecycle:**
//! - Switch / Cycle → unequip старого (cancel pending actions) + equip нового
//! - Drop → `DroppedWeapon` entity на позиции владельца
//! - Pick up → despawn `DroppedWeapon`, оружие сразу в руках

use bevy::prelude::*;

pub mod events;
pub mod loadout;
pub mod systems;


// Re-exports
pub use events::*;
pub use loadout::{DroppedWeapon, WeaponLoadout, MAX_WEAPON_SLOTS};
pub use systems::*;

use crate::shooting::tick_fire_controls;

/// Equipment plugin (loadout lifecycle)
pub struct EquipmentPlugin;

impl Plugin for EquipmentPlugin {
    fn build(&self, app: &mut App) {
        app
            // Events
            .add_event::<SwitchWeaponIntent>()
            .add_event::<CycleWeaponIntent>()
            .add_event::<DropWeaponIntent>()
            .add_event::<PickUpWeaponIntent>()
            // Systems (до тика оружия: input кадра идёт уже новому оружию)
            .add_systems(
                FixedUpdate,
                (
                    process_weapon_switch,
                    process_weapon_cycle,
                    process_weapon_drop,
                    process_weapon_pick_up,
                )
                    .chain()
                    .before(tick_fire_controls),
            );
    }
}
