//! SignalBridge - канал между hooks оружия и ECS events
//!
//! Все `FireControl`, созданные через `SignalBridge::hooks()`, пишут сигналы в
//! один crossbeam канал. Системы обрабатывают оружие по одному и сразу после
//! каждого вызова (`tick`, `equip`, `unequip`) забирают сигналы через
//! `forward(owner, ..)` → так сигнал помечается владельцем.

use bevy::prelude::*;
use crossbeam_channel::{Receiver, Sender};

use crate::shooting::events::WeaponFeedback;
use crate::weapon::{FireControl, FireControlHooks, WeaponConfig, WeaponSignal};
use crate::weapon::ConfigError;

#[derive(Resource, Debug, Clone)]
pub struct SignalBridge {
    tx: Sender<WeaponSignal>,
    rx: Receiver<WeaponSignal>,
}

impl Default for SignalBridge {
    fn default() -> Self {
        let (tx, rx) = crossbeam_channel::unbounded();
        Self { tx, rx }
    }
}

impl SignalBridge {
    /// Hooks нового оружия → этот канал
    pub fn hooks(&self) -> FireControlHooks {
        FireControlHooks::bridged(self.tx.clone())
    }

    /// Fire control, подключённый к ECS
    pub fn fire_control(&self, config: WeaponConfig, seed: u64) -> Result<FireControl, ConfigError> {
        FireControl::new(config, self.hooks(), seed)
    }

    /// Переслать накопленные сигналы как events владельца
    pub fn forward(&self, owner: Entity, feedback: &mut EventWriter<WeaponFeedback>) -> usize {
        let mut forwarded = 0;
        for signal in self.rx.try_iter() {
            feedback.write(WeaponFeedback { owner, signal });
            forwarded += 1;
        }
        forwarded
    }

    /// Выбросить накопленные сигналы (владельца нет)
    pub fn discard(&self) -> usize {
        self.rx.try_iter().count()
    }
}
