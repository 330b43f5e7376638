//! Tests for FireControl state machine.

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use bevy::math::Vec3;
    use crossbeam_channel::Receiver;
    use rand::{Rng, SeedableRng};
    use rand_chacha::ChaCha8Rng;

    use crate::weapon::*;

    const FRAME: Duration = Duration::from_millis(10);

    fn test_config(mode: ShootingMode, magazine_size: u32) -> WeaponConfig {
        WeaponConfig {
            name: "Test Rifle".into(),
            shooting_mode: mode,
            magazine_size,
            shooting_delay: 0.1,
            reload_time: 0.5,
            bullets_per_burst: 3,
            pellets_per_shot: 1,
            hip_spread: 0.1,
            aim_spread: 0.02,
            ..WeaponModel::Ak74.config()
        }
    }

    /// Экипированное оружие + канал сигналов коллабораторов
    fn armed(config: WeaponConfig) -> (FireControl, Receiver<WeaponSignal>) {
        let (tx, rx) = crossbeam_channel::unbounded();
        let mut weapon = FireControl::new(config, FireControlHooks::bridged(tx), 42).unwrap();
        weapon.equip();
        rx.try_iter().for_each(drop);
        (weapon, rx)
    }

    fn step(weapon: &mut FireControl, input: FireInput) -> Vec<WeaponEvent> {
        weapon.tick(FRAME, &input, &AimRay::default(), &NoTargeting)
    }

    fn run(weapon: &mut FireControl, frames: usize, input: FireInput) -> Vec<WeaponEvent> {
        (0..frames).flat_map(|_| step(weapon, input)).collect()
    }

    fn rounds(events: &[WeaponEvent]) -> Vec<&FiredRound> {
        events
            .iter()
            .filter_map(|event| match event {
                WeaponEvent::Fired(round) => Some(round),
                _ => None,
            })
            .collect()
    }

    fn count<F: Fn(&WeaponEvent) -> bool>(events: &[WeaponEvent], predicate: F) -> usize {
        events.iter().filter(|event| predicate(event)).count()
    }

    // === Single ===

    #[test]
    fn test_single_hold_fires_once() {
        let (mut weapon, _rx) = armed(test_config(ShootingMode::Single, 30));

        let events = run(&mut weapon, 100, FireInput::holding_fire());

        assert_eq!(rounds(&events).len(), 1);
        assert_eq!(weapon.bullets_left(), 29);
    }

    #[test]
    fn test_single_repress_waits_for_cooldown() {
        let (mut weapon, _rx) = armed(test_config(ShootingMode::Single, 30));
        let press = FireInput::holding_fire();
        let release = FireInput::idle();

        assert_eq!(rounds(&step(&mut weapon, press)).len(), 1); // t=10ms
        step(&mut weapon, release);
        // Нажатие во время cooldown игнорируется
        assert_eq!(rounds(&step(&mut weapon, press)).len(), 0); // t=30ms
        run(&mut weapon, 7, release); // до t=100ms

        // t=110ms: cooldown (100ms) истёк в начале кадра
        assert_eq!(rounds(&step(&mut weapon, press)).len(), 1);
        assert_eq!(weapon.bullets_left(), 28);
    }

    #[test]
    fn test_fire_pressed_edge_without_hold() {
        let (mut weapon, _rx) = armed(test_config(ShootingMode::Single, 30));
        let tap = FireInput {
            fire_pressed: true,
            ..FireInput::idle()
        };

        assert_eq!(rounds(&step(&mut weapon, tap)).len(), 1);
    }

    // === Automatic ===

    #[test]
    fn test_automatic_hold_matches_fire_rate() {
        let (mut weapon, _rx) = armed(test_config(ShootingMode::Automatic, 30));

        // 101 кадр: первый на t=10ms, последний на t=1010ms → удержание 1.0s
        let events = run(&mut weapon, 101, FireInput::holding_fire());

        // floor(1.0 / 0.1) + 1
        assert_eq!(rounds(&events).len(), 11);
        assert_eq!(weapon.bullets_left(), 19);
    }

    #[test]
    fn test_automatic_hold_does_not_drift_with_coarse_frames() {
        let (mut weapon, _rx) = armed(test_config(ShootingMode::Automatic, 30));
        let frame = Duration::from_millis(30);

        // 34 кадра по 30ms: от первого до последнего 0.99s
        let mut events = Vec::new();
        for _ in 0..34 {
            events.extend(weapon.tick(frame, &FireInput::holding_fire(), &AimRay::default(), &NoTargeting));
        }
        let fired = rounds(&events);

        assert_eq!(fired.len(), 10);
        for pair in fired.windows(2) {
            assert_eq!(pair[1].at - pair[0].at, Duration::from_millis(100));
        }
        assert_eq!(weapon.bullets_left(), 20);
    }

    #[test]
    fn test_automatic_repress_after_release_uses_current_frame() {
        let (mut weapon, _rx) = armed(test_config(ShootingMode::Automatic, 30));
        let frame = Duration::from_millis(30);
        let tick = |weapon: &mut FireControl, input: FireInput| {
            weapon.tick(frame, &input, &AimRay::default(), &NoTargeting)
        };

        tick(&mut weapon, FireInput::holding_fire()); // t=30ms: shot, cooldown до 130ms
        for _ in 0..4 {
            tick(&mut weapon, FireInput::idle()); // до t=150ms
        }
        let events = tick(&mut weapon, FireInput::holding_fire()); // t=180ms
        let fired = rounds(&events);

        assert_eq!(fired.len(), 1);
        assert_eq!(fired[0].at, Duration::from_millis(180));
    }

    #[test]
    fn test_automatic_ten_shots_then_reload_restores_magazine() {
        let config = WeaponConfig {
            reload_time: 2.3,
            ..test_config(ShootingMode::Automatic, 30)
        };
        let (mut weapon, _rx) = armed(config);

        // 100 кадров: удержание 0.99s → floor(9.9) + 1 = 10 выстрелов
        let events = run(&mut weapon, 100, FireInput::holding_fire());
        assert_eq!(rounds(&events).len(), 10);
        assert_eq!(weapon.bullets_left(), 20);

        // Отпустили - магазин не пуст, автоматической перезарядки нет
        step(&mut weapon, FireInput::idle());
        assert!(!weapon.is_reloading());

        let events = step(&mut weapon, FireInput::reload());
        assert_eq!(count(&events, |e| matches!(e, WeaponEvent::ReloadStarted { .. })), 1);

        run(&mut weapon, 229, FireInput::idle());
        assert!(weapon.is_reloading());
        assert_eq!(weapon.bullets_left(), 20);

        let events = step(&mut weapon, FireInput::idle());
        assert!(events
            .iter()
            .any(|e| matches!(e, WeaponEvent::ReloadFinished { bullets_left: 30, .. })));
        assert_eq!(weapon.bullets_left(), 30);
        assert!(!weapon.is_reloading());
    }

    #[test]
    fn test_automatic_bounded_by_ammo_and_reloads_on_release() {
        let (mut weapon, _rx) = armed(test_config(ShootingMode::Automatic, 5));

        let events = run(&mut weapon, 200, FireInput::holding_fire());
        assert_eq!(rounds(&events).len(), 5);
        assert_eq!(weapon.bullets_left(), 0);
        // Курок зажат → перезарядка не начинается
        assert!(!weapon.is_reloading());

        let events = step(&mut weapon, FireInput::idle());
        assert_eq!(count(&events, |e| matches!(e, WeaponEvent::ReloadStarted { .. })), 1);

        run(&mut weapon, 50, FireInput::idle());
        assert_eq!(weapon.bullets_left(), 5);
    }

    // === Burst ===

    #[test]
    fn test_burst_fires_configured_count_spaced_by_delay() {
        let (mut weapon, _rx) = armed(test_config(ShootingMode::Burst, 30));

        let events = run(&mut weapon, 100, FireInput::holding_fire());
        let fired = rounds(&events);

        assert_eq!(fired.len(), 3);
        assert_eq!(fired[1].at - fired[0].at, Duration::from_millis(100));
        assert_eq!(fired[2].at - fired[1].at, Duration::from_millis(100));
        assert_eq!(weapon.bullets_left(), 27);
    }

    #[test]
    fn test_burst_stops_when_magazine_runs_out() {
        let (mut weapon, _rx) = armed(test_config(ShootingMode::Burst, 2));

        let events = run(&mut weapon, 40, FireInput::holding_fire());
        assert_eq!(rounds(&events).len(), 2);
        assert_eq!(weapon.bullets_left(), 0);
        assert_eq!(weapon.phase(), WeaponPhase::Idle);

        let events = step(&mut weapon, FireInput::idle());
        assert_eq!(count(&events, |e| matches!(e, WeaponEvent::ReloadStarted { .. })), 1);
    }

    #[test]
    fn test_burst_ignores_repress_until_cooldown() {
        let (mut weapon, _rx) = armed(test_config(ShootingMode::Burst, 30));
        let press = FireInput::holding_fire();
        let release = FireInput::idle();

        let mut events = step(&mut weapon, press); // t=10ms: shot 1
        for frame in 1..30 {
            // Частые нажатия во время очереди
            let input = if frame % 2 == 0 { press } else { release };
            events.extend(step(&mut weapon, input));
        }
        // Очередь: 10, 110, 210ms; cooldown до 310ms
        assert_eq!(rounds(&events).len(), 3);

        step(&mut weapon, release); // t=310ms
        let events = run(&mut weapon, 30, press);
        assert_eq!(rounds(&events).len(), 3);
        assert_eq!(weapon.bullets_left(), 24);
    }

    #[test]
    fn test_burst_of_one_is_single_shot() {
        let config = WeaponConfig {
            bullets_per_burst: 1,
            ..test_config(ShootingMode::Burst, 30)
        };
        let (mut weapon, _rx) = armed(config);

        let events = run(&mut weapon, 50, FireInput::holding_fire());
        assert_eq!(rounds(&events).len(), 1);
    }

    // === Reload ===

    #[test]
    fn test_empty_magazine_fire_is_noop() {
        let config = WeaponConfig {
            reload_time: 5.0,
            ..test_config(ShootingMode::Single, 1)
        };
        let (mut weapon, _rx) = armed(config);

        assert_eq!(rounds(&step(&mut weapon, FireInput::holding_fire())).len(), 1);
        assert_eq!(weapon.bullets_left(), 0);

        // Отпустили → перезарядка, потом жмём - ничего
        step(&mut weapon, FireInput::idle());
        assert!(weapon.is_reloading());

        for _ in 0..20 {
            step(&mut weapon, FireInput::holding_fire());
            let events = step(&mut weapon, FireInput::idle());
            assert!(rounds(&events).is_empty());
        }
        assert_eq!(weapon.bullets_left(), 0);
    }

    #[test]
    fn test_second_reload_is_noop() {
        let (mut weapon, _rx) = armed(test_config(ShootingMode::Single, 30));
        step(&mut weapon, FireInput::holding_fire());
        step(&mut weapon, FireInput::idle());

        let first = step(&mut weapon, FireInput::reload());
        assert_eq!(count(&first, |e| matches!(e, WeaponEvent::ReloadStarted { .. })), 1);
        let remaining = weapon.reload_remaining().unwrap();

        let second = step(&mut weapon, FireInput::reload());
        assert_eq!(count(&second, |e| matches!(e, WeaponEvent::ReloadStarted { .. })), 0);
        assert_eq!(weapon.reload_remaining().unwrap(), remaining - FRAME);
    }

    #[test]
    fn test_full_magazine_ignores_reload_request() {
        let (mut weapon, _rx) = armed(test_config(ShootingMode::Single, 30));

        let events = step(&mut weapon, FireInput::reload());
        assert!(events.is_empty());
        assert!(!weapon.is_reloading());
    }

    #[test]
    fn test_no_fire_during_reload() {
        let (mut weapon, _rx) = armed(test_config(ShootingMode::Automatic, 30));
        step(&mut weapon, FireInput::holding_fire());
        run(&mut weapon, 20, FireInput::idle());

        step(&mut weapon, FireInput::reload());
        assert!(weapon.is_reloading());

        // 0.5s перезарядка = 50 кадров; стреляем всё это время
        let events = run(&mut weapon, 49, FireInput::holding_fire());
        assert!(rounds(&events).is_empty());
        assert_eq!(weapon.bullets_left(), 29);

        // Перезарядка закончилась в начале кадра → тот же кадр уже стреляет
        let events = step(&mut weapon, FireInput::holding_fire());
        assert_eq!(rounds(&events).len(), 1);
        assert_eq!(weapon.bullets_left(), 29);
        assert!(!weapon.is_reloading());
    }

    // === Aim ===

    #[test]
    fn test_aim_swaps_spread_and_restores_on_release() {
        let (mut weapon, rx) = armed(test_config(ShootingMode::Automatic, 30));

        let events = step(&mut weapon, FireInput::idle().with_aim(true));
        assert_eq!(events, vec![WeaponEvent::AimEntered]);
        assert!(weapon.is_aiming());
        assert_eq!(weapon.state().spread_intensity, 0.02);

        // Удержание прицела - без повторных событий
        assert!(step(&mut weapon, FireInput::idle().with_aim(true)).is_empty());

        let events = step(&mut weapon, FireInput::idle());
        assert_eq!(events, vec![WeaponEvent::AimExited]);
        assert_eq!(weapon.state().spread_intensity, 0.1);

        let cues: Vec<_> = rx
            .try_iter()
            .filter_map(|signal| match signal {
                WeaponSignal::Cue(cue) => Some(cue),
                _ => None,
            })
            .collect();
        assert_eq!(cues, vec![PresentationCue::EnterAim, PresentationCue::ExitAim]);
    }

    #[test]
    fn test_sampled_spread_respects_aim_state() {
        let (mut weapon, _rx) = armed(test_config(ShootingMode::Automatic, 1000));

        let hip = run(&mut weapon, 2000, FireInput::holding_fire());
        let hip_rounds = rounds(&hip);
        assert!(!hip_rounds.is_empty());
        for round in &hip_rounds {
            assert!(!round.aiming);
            let spread = round.pellets[0].spread;
            assert!(spread.x.abs() <= 0.1 && spread.y.abs() <= 0.1);
        }
        // Сэмплы действительно выходят за aimed диапазон
        assert!(hip_rounds
            .iter()
            .any(|round| round.pellets[0].spread.x.abs() > 0.02));

        let aimed = run(&mut weapon, 2000, FireInput::holding_fire().with_aim(true));
        let aimed_rounds = rounds(&aimed);
        assert!(!aimed_rounds.is_empty());
        for round in &aimed_rounds {
            assert!(round.aiming);
            let spread = round.pellets[0].spread;
            assert!(spread.x.abs() <= 0.02 && spread.y.abs() <= 0.02);
        }
    }

    #[test]
    fn test_aim_uses_aimed_recoil_profile() {
        let (mut weapon, _rx) = armed(test_config(ShootingMode::Single, 30));
        let aim_x = weapon.config().aim_recoil.x;
        let hip_x = weapon.config().hip_recoil.x;

        let events = step(&mut weapon, FireInput::holding_fire().with_aim(true));
        assert_eq!(rounds(&events)[0].recoil.x, aim_x);

        run(&mut weapon, 20, FireInput::idle());
        let events = step(&mut weapon, FireInput::holding_fire());
        assert_eq!(rounds(&events)[0].recoil.x, hip_x);
    }

    // === Equip / cancellation ===

    #[test]
    fn test_unequipped_ignores_input() {
        let config = test_config(ShootingMode::Automatic, 30);
        let mut weapon = FireControl::new(config, FireControlHooks::silent(), 1).unwrap();

        let events = run(&mut weapon, 100, FireInput::holding_fire().with_aim(true));
        assert!(events.is_empty());
        assert_eq!(weapon.bullets_left(), 30);
        assert!(!weapon.is_aiming());
    }

    #[test]
    fn test_unequip_cancels_pending_reload() {
        let (mut weapon, _rx) = armed(test_config(ShootingMode::Single, 30));
        step(&mut weapon, FireInput::holding_fire());
        step(&mut weapon, FireInput::reload());
        assert!(weapon.is_reloading());

        let cancelled = weapon.unequip();
        assert_eq!(cancelled, 2); // ResetShot + ReloadComplete
        assert_eq!(weapon.pending_actions(), 0);

        let events = run(&mut weapon, 200, FireInput::idle());
        assert!(events.is_empty());

        weapon.equip();
        assert!(!weapon.is_reloading());
        assert_eq!(weapon.bullets_left(), 29);
        assert!(weapon.state().check_invariants().is_ok());
    }

    #[test]
    fn test_unequip_cancels_rest_of_burst() {
        let (mut weapon, _rx) = armed(test_config(ShootingMode::Burst, 30));
        let events = step(&mut weapon, FireInput::holding_fire());
        assert_eq!(rounds(&events).len(), 1);

        weapon.unequip();
        let events = run(&mut weapon, 50, FireInput::holding_fire());
        assert!(events.is_empty());
        assert_eq!(weapon.bullets_left(), 29);

        // После повторной экипировки оружие сразу готово
        weapon.equip();
        let events = step(&mut weapon, FireInput::holding_fire());
        assert_eq!(rounds(&events).len(), 1);
    }

    #[test]
    fn test_unequip_exits_aim() {
        let (mut weapon, rx) = armed(test_config(ShootingMode::Single, 30));
        step(&mut weapon, FireInput::idle().with_aim(true));
        rx.try_iter().for_each(drop);

        weapon.unequip();
        assert!(!weapon.is_aiming());
        assert_eq!(weapon.state().spread_intensity, 0.1);

        let signals: Vec<_> = rx.try_iter().collect();
        assert_eq!(
            signals,
            vec![
                WeaponSignal::Cue(PresentationCue::ExitAim),
                WeaponSignal::Equipped(false),
            ]
        );
    }

    // === Collaborators ===

    #[test]
    fn test_fire_pushes_collaborator_signals() {
        let (mut weapon, rx) = armed(test_config(ShootingMode::Single, 30));
        step(&mut weapon, FireInput::holding_fire());

        let signals: Vec<_> = rx.try_iter().collect();
        assert!(matches!(signals[0], WeaponSignal::Recoil { .. }));
        assert_eq!(signals[1], WeaponSignal::Cue(PresentationCue::Fire));
        assert_eq!(
            signals[2],
            WeaponSignal::Ammo {
                bullets_left: 29,
                magazine_size: 30
            }
        );
    }

    #[test]
    fn test_equip_pushes_equipped_and_ammo() {
        let (tx, rx) = crossbeam_channel::unbounded();
        let config = test_config(ShootingMode::Single, 12);
        let mut weapon = FireControl::new(config, FireControlHooks::bridged(tx), 3).unwrap();

        weapon.equip();
        weapon.equip(); // повторно - no-op

        let signals: Vec<_> = rx.try_iter().collect();
        assert_eq!(
            signals,
            vec![
                WeaponSignal::Equipped(true),
                WeaponSignal::Ammo {
                    bullets_left: 12,
                    magazine_size: 12
                },
            ]
        );
    }

    #[test]
    fn test_ammo_counter_as_display() {
        let config = test_config(ShootingMode::Single, 8);
        let hooks = FireControlHooks::silent().with_ammo_display(AmmoCounter::default());
        let mut weapon = FireControl::new(config, hooks, 5).unwrap();
        weapon.equip();
        step(&mut weapon, FireInput::holding_fire());
        assert_eq!(weapon.bullets_left(), 7);
    }

    #[test]
    fn test_shots_aim_at_targeting_hit_point() {
        let config = WeaponConfig {
            hip_spread: 0.0,
            ..test_config(ShootingMode::Single, 30)
        };
        let (mut weapon, _rx) = armed(config);

        let wall = |origin: Vec3, direction: Vec3, _range: f32| Some(origin + direction * 10.0);
        let aim = AimRay::new(Vec3::ZERO, Vec3::NEG_Z, Vec3::new(0.2, -0.2, 0.0));

        let events = weapon.tick(FRAME, &FireInput::holding_fire(), &aim, &wall);
        let round = rounds(&events)[0].clone();

        assert!(round.hit);
        assert_eq!(round.target_point, Vec3::new(0.0, 0.0, -10.0));
        let expected = (Vec3::new(0.0, 0.0, -10.0) - aim.muzzle).normalize();
        assert!((round.pellets[0].direction - expected).length() < 1e-5);
        assert_eq!(round.pellets[0].origin, aim.muzzle);
    }

    #[test]
    fn test_miss_aims_at_max_range() {
        let (mut weapon, _rx) = armed(test_config(ShootingMode::Single, 30));
        let events = step(&mut weapon, FireInput::holding_fire());
        let round = rounds(&events)[0].clone();

        assert!(!round.hit);
        assert_eq!(round.target_point, Vec3::NEG_Z * weapon.config().max_range);
    }

    #[test]
    fn test_shotgun_pellets_share_one_round() {
        let (mut weapon, _rx) = armed(WeaponModel::BenelliM4.config());
        let events = step(&mut weapon, FireInput::holding_fire());
        let fired = rounds(&events);

        assert_eq!(fired.len(), 1);
        assert_eq!(fired[0].pellets.len(), 8);
        assert_eq!(weapon.bullets_left(), 6);
        for pellet in &fired[0].pellets {
            assert!((pellet.direction.length() - 1.0).abs() < 1e-5);
        }
    }

    #[test]
    fn test_same_seed_same_spread() {
        let sample = |seed: u64| {
            let config = test_config(ShootingMode::Automatic, 30);
            let mut weapon = FireControl::new(config, FireControlHooks::silent(), seed).unwrap();
            weapon.equip();
            let events = run(&mut weapon, 100, FireInput::holding_fire());
            rounds(&events)
                .iter()
                .map(|round| round.pellets[0].spread)
                .collect::<Vec<_>>()
        };

        assert_eq!(sample(9), sample(9));
        assert_ne!(sample(9), sample(10));
    }

    #[test]
    fn test_invalid_config_rejected() {
        let config = WeaponConfig {
            shooting_delay: 0.0,
            ..WeaponConfig::default()
        };
        assert!(FireControl::new(config, FireControlHooks::silent(), 0).is_err());
    }

    // === Invariants under random input ===

    #[test]
    fn test_invariants_hold_under_random_input() {
        let mut input_rng = ChaCha8Rng::seed_from_u64(2024);

        for mode in [ShootingMode::Single, ShootingMode::Burst, ShootingMode::Automatic] {
            let (mut weapon, _rx) = armed(test_config(mode, 7));

            for frame in 0..5000 {
                let input = FireInput {
                    fire_held: input_rng.gen_bool(0.6),
                    fire_pressed: input_rng.gen_bool(0.05),
                    reload_requested: input_rng.gen_bool(0.02),
                    aim_held: input_rng.gen_bool(0.3),
                };
                let before = weapon.bullets_left();
                let events = step(&mut weapon, input);

                let fired = rounds(&events).len() as u32;
                let reloaded = events
                    .iter()
                    .any(|e| matches!(e, WeaponEvent::ReloadFinished { .. }));

                assert!(weapon.bullets_left() <= weapon.magazine_size());
                assert!(
                    weapon.state().check_invariants().is_ok(),
                    "{:?} frame {}: {:?}",
                    mode,
                    frame,
                    weapon.state()
                );
                if !reloaded {
                    assert_eq!(before - weapon.bullets_left(), fired, "{:?} frame {}", mode, frame);
                }
                if weapon.is_reloading() {
                    assert!(!weapon.state().burst_active);
                }
            }
        }
    }
}
