//! Runtime state одного оружия
//!
//! Инварианты (проверяются в `check_invariants`, держатся `FireControl`):
//! - 0 ≤ bullets_left ≤ magazine_size
//! - firing возможен только при ready_to_shoot ∧ is_equipped ∧ ¬is_reloading ∧ bullets_left > 0
//! - Firing ⊕ Reloading (очередь не продолжается во время перезарядки)

use crate::weapon::config::{ShootingMode, WeaponConfig};

/// Фаза fire control (Aiming - ортогональный overlay, см. `is_ads`)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WeaponPhase {
    Idle,
    /// Идёт firing action (очередь или fire-rate cooldown)
    Firing,
    Reloading,
}

#[derive(Debug, Clone, PartialEq)]
pub struct WeaponState {
    pub shooting_mode: ShootingMode,
    pub magazine_size: u32,
    pub bullets_left: u32,
    /// Countdown очереди (только Burst)
    pub burst_bullets_left: u32,
    /// Fire-rate gate
    pub ready_to_shoot: bool,
    pub is_reloading: bool,
    pub is_equipped: bool,
    /// Aim-down-sights overlay
    pub is_ads: bool,
    pub spread_intensity: f32,

    /// Очередь ещё не закончена (pending BurstShot)
    pub burst_active: bool,
    /// Курок был зажат в прошлом кадре (для edge detection)
    pub trigger_was_held: bool,
}

impl WeaponState {
    /// Начальное состояние: Idle, от бедра, полный магазин, не экипировано
    pub fn new(config: &WeaponConfig) -> Self {
        Self {
            shooting_mode: config.shooting_mode,
            magazine_size: config.magazine_size,
            bullets_left: config.magazine_size,
            burst_bullets_left: 0,
            ready_to_shoot: true,
            is_reloading: false,
            is_equipped: false,
            is_ads: false,
            spread_intensity: config.hip_spread,
            burst_active: false,
            trigger_was_held: false,
        }
    }

    pub fn can_fire(&self) -> bool {
        self.ready_to_shoot && self.is_equipped && !self.is_reloading && self.bullets_left > 0
    }

    pub fn can_reload(&self) -> bool {
        self.is_equipped
            && !self.is_reloading
            && !self.burst_active
            && self.bullets_left < self.magazine_size
    }

    pub fn is_full(&self) -> bool {
        self.bullets_left == self.magazine_size
    }

    pub fn phase(&self) -> WeaponPhase {
        if self.is_reloading {
            WeaponPhase::Reloading
        } else if self.burst_active || !self.ready_to_shoot {
            WeaponPhase::Firing
        } else {
            WeaponPhase::Idle
        }
    }

    /// Ok(()) если инварианты держатся, иначе описание нарушения
    pub fn check_invariants(&self) -> Result<(), String> {
        if self.bullets_left > self.magazine_size {
            return Err(format!(
                "bullets_left {} > magazine_size {}",
                self.bullets_left, self.magazine_size
            ));
        }
        if self.is_reloading && self.burst_active {
            return Err("burst continues while reloading".into());
        }
        if !self.is_equipped && (self.is_reloading || self.burst_active) {
            return Err("unequipped weapon has a pending action".into());
        }
        Ok(())
    }
}
