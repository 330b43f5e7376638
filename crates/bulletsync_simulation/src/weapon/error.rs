//! Ошибки на границах weapon API
//!
//! Gameplay-действия (выстрел без патронов, повторный reload, input без
//! экипировки) ошибками НЕ являются - это no-op внутри fire control.
//! Ошибки только там, где host передаёт некорректные данные.

use thiserror::Error;

/// Некорректный или нечитаемый `WeaponConfig`
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid weapon config `{weapon}`: {field} {reason}")]
    InvalidField {
        weapon: String,
        field: &'static str,
        reason: &'static str,
    },

    #[error("failed to parse weapon config: {0}")]
    Parse(#[from] ron::error::SpannedError),

    #[error("failed to read weapon config: {0}")]
    Io(#[from] std::io::Error),
}

/// Ошибки управления слотами `WeaponLoadout`
#[derive(Debug, Error, PartialEq, Eq)]
pub enum LoadoutError {
    #[error("weapon slot {index} is out of range (loadout holds {len})")]
    SlotOutOfRange { index: usize, len: usize },

    #[error("loadout has no weapons")]
    Empty,

    #[error("loadout is full ({capacity} slots)")]
    Full { capacity: usize },
}

/// Не удалось вооружить стрелка
#[derive(Debug, Error)]
pub enum ArmError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Loadout(#[from] LoadoutError),
}
