//! WeaponLoadout - оружие в руках (hotkeys 1-3)
//!
//! # Архитектура
//!
//! - До `MAX_WEAPON_SLOTS` оружий, `active` указывает какое сейчас в руках
//! - Экипировано ВСЕГДА только активное оружие (остальные не принимают input)
//! - Любая смена активного → `unequip()` старого (pending actions отменяются)
//!   + `equip()` нового
//! - Pick up при полном loadout → активное выбрасывается, новое занимает его слот

use bevy::prelude::*;

use crate::logger;
use crate::weapon::{FireControl, LoadoutError};

/// Сколько оружий помещается в loadout
pub const MAX_WEAPON_SLOTS: usize = 3;

/// Weapon loadout component
#[derive(Component, Debug, Default)]
pub struct WeaponLoadout {
    weapons: Vec<FireControl>,
    active: usize,
}

impl WeaponLoadout {
    /// Пустой loadout
    pub fn empty() -> Self {
        Self::default()
    }

    /// Loadout из готовых оружий, первое сразу в руках
    pub fn with_weapons(weapons: Vec<FireControl>) -> Result<Self, LoadoutError> {
        if weapons.len() > MAX_WEAPON_SLOTS {
            return Err(LoadoutError::Full {
                capacity: MAX_WEAPON_SLOTS,
            });
        }

        let mut loadout = Self { weapons, active: 0 };
        for weapon in loadout.weapons.iter_mut().skip(1) {
            weapon.unequip();
        }
        if let Some(first) = loadout.weapons.first_mut() {
            first.equip();
        }

        Ok(loadout)
    }

    pub fn len(&self) -> usize {
        self.weapons.len()
    }

    pub fn is_empty(&self) -> bool {
        self.weapons.is_empty()
    }

    pub fn is_full(&self) -> bool {
        self.weapons.len() >= MAX_WEAPON_SLOTS
    }

    /// Индекс активного слота (None если loadout пуст)
    pub fn active_index(&self) -> Option<usize> {
        (!self.weapons.is_empty()).then_some(self.active)
    }

    pub fn active(&self) -> Option<&FireControl> {
        self.weapons.get(self.active)
    }

    pub fn active_mut(&mut self) -> Option<&mut FireControl> {
        self.weapons.get_mut(self.active)
    }

    pub fn get(&self, index: usize) -> Option<&FireControl> {
        self.weapons.get(index)
    }

    pub fn iter(&self) -> impl Iterator<Item = &FireControl> {
        self.weapons.iter()
    }

    /// Сменить активное оружие, возвращает число отменённых pending actions
    pub fn switch_to(&mut self, index: usize) -> Result<usize, LoadoutError> {
        if index >= self.weapons.len() {
            return Err(LoadoutError::SlotOutOfRange {
                index,
                len: self.weapons.len(),
            });
        }
        if index == self.active {
            return Ok(0);
        }

        let cancelled = self.weapons[self.active].unequip();
        self.active = index;
        self.weapons[index].equip();

        logger::log(&format!(
            "🔁 Weapon switch → slot {} ({})",
            index,
            self.weapons[index].name()
        ));

        Ok(cancelled)
    }

    /// Колесо мыши: шаг вперёд/назад с wrap-around
    pub fn cycle(&mut self, step: i32) -> Result<usize, LoadoutError> {
        if self.weapons.is_empty() {
            return Err(LoadoutError::Empty);
        }

        let len = self.weapons.len() as i64;
        let target = (self.active as i64 + step as i64).rem_euclid(len) as usize;
        self.switch_to(target)
    }

    /// Подобрать оружие; возвращает выброшенное (если loadout был полон)
    ///
    /// Подобранное оружие сразу в руках.
    pub fn pick_up(&mut self, mut weapon: FireControl) -> Option<FireControl> {
        if let Some(current) = self.weapons.get_mut(self.active) {
            current.unequip();
        }
        weapon.equip();

        let dropped = if self.is_full() {
            Some(std::mem::replace(&mut self.weapons[self.active], weapon))
        } else {
            self.weapons.push(weapon);
            self.active = self.weapons.len() - 1;
            None
        };

        if let Some(active) = self.active() {
            logger::log(&format!(
                "🤲 Picked up {} into slot {}",
                active.name(),
                self.active
            ));
        }

        dropped
    }

    /// Выбросить активное оружие; следующее по списку берётся в руки
    pub fn drop_active(&mut self) -> Result<FireControl, LoadoutError> {
        if self.weapons.is_empty() {
            return Err(LoadoutError::Empty);
        }

        let mut dropped = self.weapons.remove(self.active);
        dropped.unequip();

        if self.active >= self.weapons.len() {
            self.active = self.weapons.len().saturating_sub(1);
        }
        if let Some(next) = self.weapons.get_mut(self.active) {
            next.equip();
        }

        logger::log(&format!("🗑️ Dropped {}", dropped.name()));

        Ok(dropped)
    }
}

/// Выброшенное оружие в мире (ждёт pick up)
///
/// `weapon` = None после того как оружие подобрали (entity despawn в том же тике).
#[derive(Component, Debug)]
pub struct DroppedWeapon {
    weapon: Option<FireControl>,
}

impl DroppedWeapon {
    pub fn new(weapon: FireControl) -> Self {
        Self {
            weapon: Some(weapon),
        }
    }

    pub fn weapon(&self) -> Option<&FireControl> {
        self.weapon.as_ref()
    }

    pub fn take(&mut self) -> Option<FireControl> {
        self.weapon.take()
    }
}
