//! Отложенные действия оружия (замена engine `Invoke` / coroutines)
//!
//! Каждый `FireControl` владеет своим `ActionScheduler`:
//! - собственные часы (`now`), двигаются только через `advance(dt)`
//! - действия срабатывают в порядке due time, при равенстве - в порядке постановки
//! - `cancel_all` при unequip/drop → ни один stale таймер не выстрелит

use std::time::Duration;

/// Что должно произойти по таймеру
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScheduledAction {
    /// Fire-rate cooldown истёк → `ready_to_shoot = true`
    ResetShot,
    /// Следующий выстрел очереди (Burst)
    BurstShot,
    /// Перезарядка закончена → полный магазин
    ReloadComplete,
}

#[derive(Debug, Clone)]
struct PendingAction {
    due: Duration,
    seq: u64,
    action: ScheduledAction,
}

#[derive(Debug, Clone, Default)]
pub struct ActionScheduler {
    now: Duration,
    next_seq: u64,
    pending: Vec<PendingAction>,
}

impl ActionScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Текущее время часов оружия
    pub fn now(&self) -> Duration {
        self.now
    }

    pub fn advance(&mut self, dt: Duration) {
        self.now += dt;
    }

    /// Поставить действие через `delay` от текущего времени
    pub fn schedule(&mut self, delay: Duration, action: ScheduledAction) {
        self.schedule_at(self.now + delay, action);
    }

    /// Поставить действие на абсолютное время (для цепочек без дрейфа)
    pub fn schedule_at(&mut self, due: Duration, action: ScheduledAction) {
        self.pending.push(PendingAction {
            due,
            seq: self.next_seq,
            action,
        });
        self.next_seq += 1;
    }

    /// Достаёт самое раннее действие с `due <= now`
    pub fn pop_due(&mut self) -> Option<(Duration, ScheduledAction)> {
        let index = self
            .pending
            .iter()
            .enumerate()
            .filter(|(_, pending)| pending.due <= self.now)
            .min_by_key(|(_, pending)| (pending.due, pending.seq))
            .map(|(index, _)| index)?;

        let pending = self.pending.swap_remove(index);
        Some((pending.due, pending.action))
    }

    pub fn is_scheduled(&self, action: ScheduledAction) -> bool {
        self.pending.iter().any(|pending| pending.action == action)
    }

    /// Время до ближайшего действия такого типа
    pub fn time_until(&self, action: ScheduledAction) -> Option<Duration> {
        self.pending
            .iter()
            .filter(|pending| pending.action == action)
            .map(|pending| pending.due.saturating_sub(self.now))
            .min()
    }

    /// Отменяет все pending действия, возвращает сколько было отменено
    pub fn cancel_all(&mut self) -> usize {
        let cancelled = self.pending.len();
        self.pending.clear();
        cancelled
    }

    pub fn len(&self) -> usize {
        self.pending.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }
}
