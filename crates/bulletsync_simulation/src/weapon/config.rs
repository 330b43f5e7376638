//! Weapon configuration - immutable per-weapon parameters
//!
//! Architecture:
//! - `WeaponConfig` фиксируется при создании `FireControl` (shooting mode не меняется в игре)
//! - Presets по `WeaponModel` (AK74, M107, M1911, Benelli M4)
//! - RON файлы для кастомных оружий (`#[serde(default)]` → можно задавать только отличия)
//!
//! Все времена в секундах (f32); scheduler получает их через `secs_to_duration`
//! (квантуется до микросекунд, иначе 0.1f32 превращается в 100_000_001ns).

use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::weapon::error::ConfigError;

/// Режим стрельбы
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ShootingMode {
    /// Один выстрел на нажатие
    #[default]
    Single,
    /// `bullets_per_burst` выстрелов на нажатие с интервалом `shooting_delay`
    Burst,
    /// Огонь пока курок зажат
    Automatic,
}

/// Модель оружия (visual prefab + preset)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum WeaponModel {
    #[default]
    Ak74,
    M107,
    M1911,
    BenelliM4,
}

impl WeaponModel {
    pub const ALL: [WeaponModel; 4] = [
        WeaponModel::Ak74,
        WeaponModel::M107,
        WeaponModel::M1911,
        WeaponModel::BenelliM4,
    ];

    /// Имя для CLI / логов
    pub fn name(&self) -> &'static str {
        match self {
            WeaponModel::Ak74 => "ak74",
            WeaponModel::M107 => "m107",
            WeaponModel::M1911 => "m1911",
            WeaponModel::BenelliM4 => "benelli_m4",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|model| model.name().eq_ignore_ascii_case(name))
    }

    /// Preset конфиг для модели
    pub fn config(&self) -> WeaponConfig {
        match self {
            WeaponModel::Ak74 => WeaponConfig {
                name: "AK74".into(),
                model: *self,
                shooting_mode: ShootingMode::Automatic,
                magazine_size: 30,
                shooting_delay: 0.1,
                reload_time: 2.3,
                bullets_per_burst: 3,
                pellets_per_shot: 1,
                hip_spread: 0.1,
                aim_spread: 0.02,
                bullet_velocity: 30.0,
                bullet_lifetime: 3.0,
                max_range: 100.0,
                hip_recoil: RecoilProfile::new(-2.0, 2.0, 0.35),
                aim_recoil: RecoilProfile::new(-1.0, 1.0, 0.2),
                snappiness: 6.0,
                return_speed: 2.0,
            },
            WeaponModel::M107 => WeaponConfig {
                name: "M107".into(),
                model: *self,
                shooting_mode: ShootingMode::Single,
                magazine_size: 10,
                shooting_delay: 1.0,
                reload_time: 3.5,
                bullets_per_burst: 1,
                pellets_per_shot: 1,
                hip_spread: 0.2,
                aim_spread: 0.0,
                bullet_velocity: 90.0,
                bullet_lifetime: 3.0,
                max_range: 400.0,
                hip_recoil: RecoilProfile::new(-8.0, 3.0, 1.0),
                aim_recoil: RecoilProfile::new(-5.0, 1.5, 0.5),
                snappiness: 4.0,
                return_speed: 1.2,
            },
            WeaponModel::M1911 => WeaponConfig {
                name: "M1911".into(),
                model: *self,
                shooting_mode: ShootingMode::Single,
                magazine_size: 7,
                shooting_delay: 0.15,
                reload_time: 1.5,
                bullets_per_burst: 1,
                pellets_per_shot: 1,
                hip_spread: 0.08,
                aim_spread: 0.015,
                bullet_velocity: 25.0,
                bullet_lifetime: 3.0,
                max_range: 60.0,
                hip_recoil: RecoilProfile::new(-3.0, 1.5, 0.3),
                aim_recoil: RecoilProfile::new(-1.5, 0.7, 0.15),
                snappiness: 8.0,
                return_speed: 3.0,
            },
            WeaponModel::BenelliM4 => WeaponConfig {
                name: "Benelli M4".into(),
                model: *self,
                shooting_mode: ShootingMode::Single,
                magazine_size: 7,
                shooting_delay: 0.6,
                reload_time: 2.8,
                bullets_per_burst: 1,
                pellets_per_shot: 8,
                hip_spread: 0.15,
                aim_spread: 0.08,
                bullet_velocity: 20.0,
                bullet_lifetime: 1.5,
                max_range: 35.0,
                hip_recoil: RecoilProfile::new(-6.0, 2.5, 0.8),
                aim_recoil: RecoilProfile::new(-4.0, 1.5, 0.5),
                snappiness: 5.0,
                return_speed: 1.5,
            },
        }
    }
}

/// Recoil kick в градусах (Euler)
///
/// `x` применяется как есть (pitch), `y`/`z` - случайно в `[-y, y]` / `[-z, z]`.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct RecoilProfile {
    pub x: f32,
    pub y: f32,
    pub z: f32,
}

impl RecoilProfile {
    pub const fn new(x: f32, y: f32, z: f32) -> Self {
        Self { x, y, z }
    }
}

/// Полный набор параметров оружия
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WeaponConfig {
    pub name: String,
    pub model: WeaponModel,
    pub shooting_mode: ShootingMode,

    /// Ёмкость магазина
    pub magazine_size: u32,
    /// Cooldown между firing actions (и интервал внутри burst), секунды
    pub shooting_delay: f32,
    /// Длительность перезарядки, секунды
    pub reload_time: f32,
    /// Выстрелов за одно нажатие в Burst режиме
    pub bullets_per_burst: u32,
    /// Дробинок на один патрон (дробовик), каждая со своим spread
    pub pellets_per_shot: u32,

    /// Spread от бедра (per axis, в единицах направления)
    pub hip_spread: f32,
    /// Spread при ADS
    pub aim_spread: f32,

    /// Скорость projectile (м/с)
    pub bullet_velocity: f32,
    /// Время жизни projectile (секунды)
    pub bullet_lifetime: f32,
    /// Дальность targeting raycast (метры)
    pub max_range: f32,

    pub hip_recoil: RecoilProfile,
    pub aim_recoil: RecoilProfile,
    /// Скорость, с которой камера догоняет recoil target
    pub snappiness: f32,
    /// Скорость возврата recoil target к нулю
    pub return_speed: f32,
}

impl Default for WeaponConfig {
    fn default() -> Self {
        WeaponModel::Ak74.config()
    }
}

impl WeaponConfig {
    /// Парсит RON и валидирует
    pub fn from_ron(source: &str) -> Result<Self, ConfigError> {
        let config: WeaponConfig = ron::from_str(source)?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_ron_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let source = std::fs::read_to_string(path)?;
        Self::from_ron(&source)
    }

    pub fn to_ron(&self) -> Result<String, ron::Error> {
        ron::ser::to_string_pretty(self, ron::ser::PrettyConfig::default())
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let invalid = |field: &'static str, reason: &'static str| ConfigError::InvalidField {
            weapon: self.name.clone(),
            field,
            reason,
        };

        if self.magazine_size == 0 {
            return Err(invalid("magazine_size", "must be at least 1"));
        }
        if !(self.shooting_delay.is_finite() && self.shooting_delay > 0.0) {
            return Err(invalid("shooting_delay", "must be a positive number of seconds"));
        }
        if !(self.reload_time.is_finite() && self.reload_time >= 0.0) {
            return Err(invalid("reload_time", "must be a non-negative number of seconds"));
        }
        if self.shooting_mode == ShootingMode::Burst && self.bullets_per_burst == 0 {
            return Err(invalid("bullets_per_burst", "must be at least 1 in burst mode"));
        }
        if self.pellets_per_shot == 0 {
            return Err(invalid("pellets_per_shot", "must be at least 1"));
        }
        for (field, spread) in [("hip_spread", self.hip_spread), ("aim_spread", self.aim_spread)] {
            if !(spread.is_finite() && spread >= 0.0) {
                return Err(invalid(field, "must be a non-negative finite value"));
            }
        }
        if !(self.max_range.is_finite() && self.max_range > 0.0) {
            return Err(invalid("max_range", "must be positive"));
        }
        if !(self.bullet_lifetime.is_finite() && self.bullet_lifetime >= 0.0) {
            return Err(invalid("bullet_lifetime", "must be non-negative"));
        }
        for profile in [self.hip_recoil, self.aim_recoil] {
            if !(profile.x.is_finite() && profile.y.is_finite() && profile.z.is_finite()) {
                return Err(invalid("recoil", "must be finite"));
            }
        }

        Ok(())
    }

    pub fn shooting_delay_duration(&self) -> Duration {
        secs_to_duration(self.shooting_delay)
    }

    pub fn reload_duration(&self) -> Duration {
        secs_to_duration(self.reload_time)
    }

    /// Spread для текущего aim состояния
    pub fn spread_for(&self, aiming: bool) -> f32 {
        if aiming {
            self.aim_spread
        } else {
            self.hip_spread
        }
    }

    pub fn recoil_for(&self, aiming: bool) -> RecoilProfile {
        if aiming {
            self.aim_recoil
        } else {
            self.hip_recoil
        }
    }
}

/// Секунды (f32) → `Duration`, квантуется до микросекунд
pub fn secs_to_duration(secs: f32) -> Duration {
    if !secs.is_finite() || secs <= 0.0 {
        return Duration::ZERO;
    }
    Duration::from_micros((f64::from(secs) * 1_000_000.0).round() as u64)
}
