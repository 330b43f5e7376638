//! Weapon Fire Control - state machine одного оружия
//!
//! Architecture:
//! - `tick(dt, input, aim, targeting)` вызывается host'ом каждый кадр
//! - Порядок внутри tick: часы → due actions (cooldown / burst / reload) → aim → fire → reload
//! - Отложенные переходы живут в `ActionScheduler` (никаких engine callbacks)
//! - Presentation / ammo display / camera recoil - `FireControlHooks`, переданные при создании
//! - `unequip()` отменяет все pending actions этого оружия
//!
//! Возвращаемые `WeaponEvent` - для host'а (spawn projectiles, логи, сеть);
//! hooks получают те же факты в виде fire-and-forget сигналов.

use std::time::Duration;

use bevy::math::{Vec2, Vec3};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use crate::logger;
use crate::weapon::collaborators::{AimRay, FireControlHooks, FireInput, PresentationCue, TargetingService};
use crate::weapon::config::{ShootingMode, WeaponConfig};
use crate::weapon::error::ConfigError;
use crate::weapon::recoil::{sample_kick, symmetric};
use crate::weapon::scheduler::{ActionScheduler, ScheduledAction};
use crate::weapon::state::{WeaponPhase, WeaponState};

/// Одна дробинка выстрела
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Pellet {
    pub origin: Vec3,
    /// Нормализованное направление (с учётом spread)
    pub direction: Vec3,
    /// Сэмпл spread по осям x/y, |x|,|y| ≤ spread_intensity
    pub spread: Vec2,
}

/// Один израсходованный патрон
#[derive(Debug, Clone, PartialEq)]
pub struct FiredRound {
    /// Время выстрела по часам оружия
    pub at: Duration,
    pub pellets: Vec<Pellet>,
    /// Куда смотрела камера (hit point или точка на max_range)
    pub target_point: Vec3,
    /// Targeting service вернул попадание
    pub hit: bool,
    pub recoil: Vec3,
    pub bullets_left: u32,
    pub aiming: bool,
    pub bullet_velocity: f32,
    /// Сколько секунд живёт визуальный снаряд
    pub bullet_lifetime: f32,
}

#[derive(Debug, Clone, PartialEq)]
pub enum WeaponEvent {
    Fired(FiredRound),
    ReloadStarted { at: Duration, duration: Duration },
    ReloadFinished { at: Duration, bullets_left: u32 },
    AimEntered,
    AimExited,
}

pub struct FireControl {
    config: WeaponConfig,
    state: WeaponState,
    scheduler: ActionScheduler,
    hooks: FireControlHooks,
    rng: ChaCha8Rng,
    shooting_delay: Duration,
    reload_time: Duration,
    rounds_fired: u64,
    /// Due time cooldown'а, истёкшего в текущем тике
    cooldown_ended_at: Option<Duration>,
}

impl std::fmt::Debug for FireControl {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FireControl")
            .field("weapon", &self.config.name)
            .field("state", &self.state)
            .field("now", &self.scheduler.now())
            .field("pending", &self.scheduler.len())
            .finish_non_exhaustive()
    }
}

impl FireControl {
    /// Создать fire control (не экипирован, полный магазин)
    pub fn new(config: WeaponConfig, hooks: FireControlHooks, seed: u64) -> Result<Self, ConfigError> {
        config.validate()?;

        Ok(Self {
            state: WeaponState::new(&config),
            shooting_delay: config.shooting_delay_duration(),
            reload_time: config.reload_duration(),
            config,
            scheduler: ActionScheduler::new(),
            hooks,
            rng: ChaCha8Rng::seed_from_u64(seed),
            rounds_fired: 0,
            cooldown_ended_at: None,
        })
    }

    pub fn config(&self) -> &WeaponConfig {
        &self.config
    }

    pub fn state(&self) -> &WeaponState {
        &self.state
    }

    pub fn name(&self) -> &str {
        &self.config.name
    }

    pub fn bullets_left(&self) -> u32 {
        self.state.bullets_left
    }

    pub fn magazine_size(&self) -> u32 {
        self.state.magazine_size
    }

    pub fn is_equipped(&self) -> bool {
        self.state.is_equipped
    }

    pub fn is_reloading(&self) -> bool {
        self.state.is_reloading
    }

    pub fn is_aiming(&self) -> bool {
        self.state.is_ads
    }

    pub fn phase(&self) -> WeaponPhase {
        self.state.phase()
    }

    /// Часы оружия (сумма всех dt)
    pub fn now(&self) -> Duration {
        self.scheduler.now()
    }

    pub fn pending_actions(&self) -> usize {
        self.scheduler.len()
    }

    pub fn rounds_fired(&self) -> u64 {
        self.rounds_fired
    }

    /// Сколько осталось до конца перезарядки
    pub fn reload_remaining(&self) -> Option<Duration> {
        self.scheduler.time_until(ScheduledAction::ReloadComplete)
    }

    /// Взять в руки: начинает принимать input
    pub fn equip(&mut self) {
        if self.state.is_equipped {
            return;
        }

        self.state.is_equipped = true;
        self.state.trigger_was_held = false;
        self.hooks.presentation.set_equipped(true);
        self.push_ammo();

        logger::log(&format!(
            "🔫 {} equipped ({}/{})",
            self.config.name, self.state.bullets_left, self.state.magazine_size
        ));
    }

    /// Убрать / выбросить: отменяет все pending actions, возвращает их число
    ///
    /// Незаконченная перезарядка теряется (магазин не пополняется).
    pub fn unequip(&mut self) -> usize {
        if !self.state.is_equipped {
            return 0;
        }

        let cancelled = self.scheduler.cancel_all();

        self.state.ready_to_shoot = true;
        self.state.is_reloading = false;
        self.state.burst_active = false;
        self.state.burst_bullets_left = 0;
        self.state.trigger_was_held = false;

        if self.state.is_ads {
            self.set_aiming(false);
        }

        self.state.is_equipped = false;
        self.hooks.presentation.set_equipped(false);

        logger::log(&format!(
            "{} unequipped, {} pending action(s) cancelled",
            self.config.name, cancelled
        ));

        cancelled
    }

    /// Один кадр
    pub fn tick(
        &mut self,
        dt: Duration,
        input: &FireInput,
        aim: &AimRay,
        targeting: &dyn TargetingService,
    ) -> Vec<WeaponEvent> {
        let mut events = Vec::new();

        self.scheduler.advance(dt);
        self.cooldown_ended_at = None;
        while let Some((due, action)) = self.scheduler.pop_due() {
            self.run_scheduled(due, action, aim, targeting, &mut events);
        }

        if !self.state.is_equipped {
            return events;
        }

        if input.aim_held != self.state.is_ads {
            events.push(self.set_aiming(input.aim_held));
        }

        let held_before = self.state.trigger_was_held;
        let pressed = input.fire_pressed || (input.fire_held && !held_before);
        self.state.trigger_was_held = input.fire_held;

        let fire_intent = match self.state.shooting_mode {
            ShootingMode::Automatic => input.fire_held || input.fire_pressed,
            ShootingMode::Single | ShootingMode::Burst => pressed,
        };

        if fire_intent && self.state.can_fire() {
            // Непрерывное удержание: firing action начинается в due cooldown'а, не в кадре
            let start = match self.cooldown_ended_at {
                Some(due)
                    if self.state.shooting_mode == ShootingMode::Automatic
                        && input.fire_held
                        && held_before =>
                {
                    due
                }
                _ => self.scheduler.now(),
            };
            self.begin_firing_action(start, aim, targeting, &mut events);
        }

        let manual_reload = input.reload_requested;
        let auto_reload = self.state.bullets_left == 0 && !input.fire_held;
        if (manual_reload || auto_reload) && self.state.can_reload() {
            events.push(self.start_reload());
        }

        events
    }

    fn run_scheduled(
        &mut self,
        due: Duration,
        action: ScheduledAction,
        aim: &AimRay,
        targeting: &dyn TargetingService,
        events: &mut Vec<WeaponEvent>,
    ) {
        // unequip чистит scheduler; проверка на случай действий, поставленных в обход
        if !self.state.is_equipped {
            logger::log_warning(&format!(
                "{}: dropping stale {:?} for unequipped weapon",
                self.config.name, action
            ));
            return;
        }

        match action {
            ScheduledAction::ResetShot => {
                self.state.ready_to_shoot = true;
                self.cooldown_ended_at = Some(due);
            }
            ScheduledAction::BurstShot => {
                if self.state.is_reloading || self.state.bullets_left == 0 {
                    self.finish_firing_action(due);
                    return;
                }
                events.push(self.fire_round(due, aim, targeting));
                self.continue_burst(due);
            }
            ScheduledAction::ReloadComplete => {
                self.state.bullets_left = self.state.magazine_size;
                self.state.is_reloading = false;
                self.cooldown_ended_at = None;
                self.push_ammo();

                logger::log(&format!(
                    "{} reloaded ({}/{})",
                    self.config.name, self.state.bullets_left, self.state.magazine_size
                ));

                events.push(WeaponEvent::ReloadFinished {
                    at: due,
                    bullets_left: self.state.bullets_left,
                });
            }
        }
    }

    fn begin_firing_action(
        &mut self,
        start: Duration,
        aim: &AimRay,
        targeting: &dyn TargetingService,
        events: &mut Vec<WeaponEvent>,
    ) {
        self.state.burst_active = true;
        if self.state.shooting_mode == ShootingMode::Burst {
            self.state.burst_bullets_left = self.config.bullets_per_burst;
        }

        events.push(self.fire_round(start, aim, targeting));
        self.continue_burst(start);
    }

    /// После выстрела: следующий выстрел очереди или конец firing action
    fn continue_burst(&mut self, at: Duration) {
        let more = self.state.shooting_mode == ShootingMode::Burst
            && self.state.burst_bullets_left > 1
            && self.state.bullets_left > 0;

        if more {
            self.state.burst_bullets_left -= 1;
            self.scheduler
                .schedule_at(at + self.shooting_delay, ScheduledAction::BurstShot);
        } else {
            self.finish_firing_action(at);
        }
    }

    /// Cooldown считается один раз на firing action, от последнего выстрела
    fn finish_firing_action(&mut self, at: Duration) {
        self.state.burst_active = false;
        self.state.burst_bullets_left = 0;
        self.scheduler
            .schedule_at(at + self.shooting_delay, ScheduledAction::ResetShot);
    }

    fn fire_round(
        &mut self,
        at: Duration,
        aim: &AimRay,
        targeting: &dyn TargetingService,
    ) -> WeaponEvent {
        self.state.bullets_left = self.state.bullets_left.saturating_sub(1);
        self.state.ready_to_shoot = false;
        self.rounds_fired += 1;

        // Целимся туда, куда смотрит камера, а не строго вперёд от ствола
        let hit_point = targeting.raycast(aim.origin, aim.direction, self.config.max_range);
        let target_point = hit_point.unwrap_or_else(|| aim.point_at(self.config.max_range));
        let base = (target_point - aim.muzzle).normalize_or(aim.direction);

        let spread = self.state.spread_intensity;
        let pellets = (0..self.config.pellets_per_shot)
            .map(|_| {
                let sample = Vec2::new(
                    symmetric(spread, &mut self.rng),
                    symmetric(spread, &mut self.rng),
                );
                Pellet {
                    origin: aim.muzzle,
                    direction: (base + sample.extend(0.0)).normalize_or(base),
                    spread: sample,
                }
            })
            .collect();

        let recoil = sample_kick(self.config.recoil_for(self.state.is_ads), &mut self.rng);
        self.hooks
            .recoil
            .kick(recoil, self.config.snappiness, self.config.return_speed);
        self.hooks.presentation.trigger(PresentationCue::Fire);
        self.push_ammo();

        logger::log(&format!(
            "💥 {} fired at {:?} ({}/{}){}",
            self.config.name,
            at,
            self.state.bullets_left,
            self.state.magazine_size,
            if hit_point.is_some() { " hit" } else { "" }
        ));

        WeaponEvent::Fired(FiredRound {
            at,
            pellets,
            target_point,
            hit: hit_point.is_some(),
            recoil,
            bullets_left: self.state.bullets_left,
            aiming: self.state.is_ads,
            bullet_velocity: self.config.bullet_velocity,
            bullet_lifetime: self.config.bullet_lifetime,
        })
    }

    fn start_reload(&mut self) -> WeaponEvent {
        let at = self.scheduler.now();

        self.state.is_reloading = true;
        self.scheduler
            .schedule(self.reload_time, ScheduledAction::ReloadComplete);
        self.hooks.presentation.trigger(PresentationCue::Reload);

        logger::log(&format!(
            "🔄 {} reloading ({:?}) with {}/{}",
            self.config.name, self.reload_time, self.state.bullets_left, self.state.magazine_size
        ));

        WeaponEvent::ReloadStarted {
            at,
            duration: self.reload_time,
        }
    }

    fn set_aiming(&mut self, aiming: bool) -> WeaponEvent {
        self.state.is_ads = aiming;
        self.state.spread_intensity = self.config.spread_for(aiming);

        if aiming {
            self.hooks.presentation.trigger(PresentationCue::EnterAim);
            WeaponEvent::AimEntered
        } else {
            self.hooks.presentation.trigger(PresentationCue::ExitAim);
            WeaponEvent::AimExited
        }
    }

    fn push_ammo(&mut self) {
        self.hooks
            .ammo_display
            .show(self.state.bullets_left, self.state.magazine_size);
    }
}
