//! Внешние коллабораторы fire control
//!
//! Fire control не знает про engine: input приходит снапшотом `FireInput`,
//! hit detection - через `TargetingService`, всё остальное (анимации, UI,
//! camera recoil) - fire-and-forget через traits, переданные при создании.
//!
//! `SignalSink` - готовая реализация всех sink traits поверх crossbeam канала
//! (ECS bridge, тесты).

use bevy::math::Vec3;
use crossbeam_channel::{Receiver, Sender};

/// Input source: состояние кнопок за один кадр
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FireInput {
    /// Курок зажат в этом кадре
    pub fire_held: bool,
    /// Курок нажат в этом кадре (edge, даже если уже отпущен)
    pub fire_pressed: bool,
    /// Запрос ручной перезарядки
    pub reload_requested: bool,
    /// Кнопка прицеливания зажата
    pub aim_held: bool,
}

impl FireInput {
    pub fn idle() -> Self {
        Self::default()
    }

    /// Курок зажат (edge вычисляет сам fire control)
    pub fn holding_fire() -> Self {
        Self {
            fire_held: true,
            ..Self::default()
        }
    }

    pub fn reload() -> Self {
        Self {
            reload_requested: true,
            ..Self::default()
        }
    }

    pub fn with_aim(mut self, aim_held: bool) -> Self {
        self.aim_held = aim_held;
        self
    }
}

/// Откуда и куда смотрит стрелок
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AimRay {
    /// Позиция камеры (origin targeting raycast)
    pub origin: Vec3,
    /// Направление взгляда (нормализованное)
    pub direction: Vec3,
    /// Точка вылета пули (bullet spawn)
    pub muzzle: Vec3,
}

impl Default for AimRay {
    fn default() -> Self {
        Self {
            origin: Vec3::ZERO,
            direction: Vec3::NEG_Z,
            muzzle: Vec3::ZERO,
        }
    }
}

impl AimRay {
    pub fn new(origin: Vec3, direction: Vec3, muzzle: Vec3) -> Self {
        Self {
            origin,
            direction: direction.normalize_or(Vec3::NEG_Z),
            muzzle,
        }
    }

    pub fn point_at(&self, distance: f32) -> Vec3 {
        self.origin + self.direction * distance
    }
}

/// Targeting service: camera raycast → точка попадания
pub trait TargetingService {
    fn raycast(&self, origin: Vec3, direction: Vec3, max_range: f32) -> Option<Vec3>;
}

/// Пустой мир - никогда не попадает
#[derive(Debug, Clone, Copy, Default)]
pub struct NoTargeting;

impl TargetingService for NoTargeting {
    fn raycast(&self, _origin: Vec3, _direction: Vec3, _max_range: f32) -> Option<Vec3> {
        None
    }
}

impl<F> TargetingService for F
where
    F: Fn(Vec3, Vec3, f32) -> Option<Vec3>,
{
    fn raycast(&self, origin: Vec3, direction: Vec3, max_range: f32) -> Option<Vec3> {
        self(origin, direction, max_range)
    }
}

/// Дискретные presentation triggers
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PresentationCue {
    /// Muzzle flash + recoil анимация + звук выстрела
    Fire,
    /// Анимация + звук перезарядки
    Reload,
    EnterAim,
    ExitAim,
}

/// Presentation layer (animation, particles, audio)
pub trait PresentationLayer: Send + Sync {
    fn trigger(&mut self, cue: PresentationCue);
    fn set_equipped(&mut self, equipped: bool);
}

/// Ammunition display (UI), получает значения при каждом изменении
pub trait AmmoDisplay: Send + Sync {
    fn show(&mut self, bullets_left: u32, magazine_size: u32);
}

/// Camera recoil collaborator
///
/// `kick` в градусах (Euler), пружина настраивается параметрами оружия.
pub trait RecoilReceiver: Send + Sync {
    fn kick(&mut self, kick: Vec3, snappiness: f32, return_speed: f32);
}

/// No-op sink (presentation/ammo/recoil не нужны)
#[derive(Debug, Clone, Copy, Default)]
pub struct Silent;

impl PresentationLayer for Silent {
    fn trigger(&mut self, _cue: PresentationCue) {}
    fn set_equipped(&mut self, _equipped: bool) {}
}

impl AmmoDisplay for Silent {
    fn show(&mut self, _bullets_left: u32, _magazine_size: u32) {}
}

impl RecoilReceiver for Silent {
    fn kick(&mut self, _kick: Vec3, _snappiness: f32, _return_speed: f32) {}
}

/// Коллабораторы, передаваемые в `FireControl` при создании
pub struct FireControlHooks {
    pub presentation: Box<dyn PresentationLayer>,
    pub ammo_display: Box<dyn AmmoDisplay>,
    pub recoil: Box<dyn RecoilReceiver>,
}

impl Default for FireControlHooks {
    fn default() -> Self {
        Self::silent()
    }
}

impl std::fmt::Debug for FireControlHooks {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FireControlHooks").finish_non_exhaustive()
    }
}

impl FireControlHooks {
    pub fn silent() -> Self {
        Self {
            presentation: Box::new(Silent),
            ammo_display: Box::new(Silent),
            recoil: Box::new(Silent),
        }
    }

    /// Все три sink пишут в один канал
    pub fn bridged(tx: Sender<WeaponSignal>) -> Self {
        Self {
            presentation: Box::new(SignalSink::new(tx.clone())),
            ammo_display: Box::new(SignalSink::new(tx.clone())),
            recoil: Box::new(SignalSink::new(tx)),
        }
    }

    pub fn with_presentation(mut self, presentation: impl PresentationLayer + 'static) -> Self {
        self.presentation = Box::new(presentation);
        self
    }

    pub fn with_ammo_display(mut self, ammo_display: impl AmmoDisplay + 'static) -> Self {
        self.ammo_display = Box::new(ammo_display);
        self
    }

    pub fn with_recoil(mut self, recoil: impl RecoilReceiver + 'static) -> Self {
        self.recoil = Box::new(recoil);
        self
    }
}

/// Сигнал коллаборатору, сериализованный в канал
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum WeaponSignal {
    Cue(PresentationCue),
    Equipped(bool),
    Ammo {
        bullets_left: u32,
        magazine_size: u32,
    },
    Recoil {
        kick: Vec3,
        snappiness: f32,
        return_speed: f32,
    },
}

/// Sink → crossbeam канал
#[derive(Debug, Clone)]
pub struct SignalSink {
    tx: Sender<WeaponSignal>,
}

impl SignalSink {
    pub fn new(tx: Sender<WeaponSignal>) -> Self {
        Self { tx }
    }

    /// Новый unbounded канал + receiver для чтения
    pub fn channel() -> (Self, Receiver<WeaponSignal>) {
        let (tx, rx) = crossbeam_channel::unbounded();
        (Self::new(tx), rx)
    }

    fn send(&self, signal: WeaponSignal) {
        // Receiver dropped → некому показывать, сигнал теряется
        let _ = self.tx.send(signal);
    }
}

impl PresentationLayer for SignalSink {
    fn trigger(&mut self, cue: PresentationCue) {
        self.send(WeaponSignal::Cue(cue));
    }

    fn set_equipped(&mut self, equipped: bool) {
        self.send(WeaponSignal::Equipped(equipped));
    }
}

impl AmmoDisplay for SignalSink {
    fn show(&mut self, bullets_left: u32, magazine_size: u32) {
        self.send(WeaponSignal::Ammo {
            bullets_left,
            magazine_size,
        });
    }
}

impl RecoilReceiver for SignalSink {
    fn kick(&mut self, kick: Vec3, snappiness: f32, return_speed: f32) {
        self.send(WeaponSignal::Recoil {
            kick,
            snappiness,
            return_speed,
        });
    }
}
