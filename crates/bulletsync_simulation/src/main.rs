//! Headless симуляция BulletSync
//!
//! Стрелок держит курок `--hold-secs`, отпускает, перезаряжается.
//! Печатает таймлайн патронов (AmmoHud) и итог по выстрелам.

use std::path::PathBuf;
use std::time::Duration;

use bevy::prelude::*;
use bevy::time::TimeUpdateStrategy;
use clap::Parser;

use bulletsync_simulation::logger::{log_info, set_log_level};
use bulletsync_simulation::weapon::ArmError;
use bulletsync_simulation::{
    create_headless_app, spawn_shooter, AmmoHud, Hittable, LogLevel, SimulationPlugin,
    TriggerInput, WeaponConfig, WeaponLoadout, WeaponModel,
};

/// Сколько кадров ждём конца перезарядки
const MAX_RELOAD_FRAMES: usize = 60 * 30;

/// BulletSync headless weapon simulation
#[derive(Parser)]
#[command(version, about = "Runs a scripted trigger-hold → release → reload scenario headlessly")]
struct Cli {
    /// RNG seed (spread + recoil)
    #[arg(long, default_value_t = 42)]
    seed: u64,

    /// Weapon preset: ak74, m107, m1911, benelli_m4
    #[arg(long, default_value = "ak74", value_parser = parse_weapon)]
    weapon: WeaponModel,

    /// RON weapon config (overrides --weapon)
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,

    /// How long the trigger is held, seconds
    #[arg(long, default_value_t = 1.0)]
    hold_secs: f32,

    /// Only info-level logs
    #[arg(long)]
    quiet: bool,
}

fn main() {
    let cli = Cli::parse();

    if cli.quiet {
        set_log_level(LogLevel::Info);
    }

    if let Err(e) = run(&cli) {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}

fn parse_weapon(name: &str) -> Result<WeaponModel, String> {
    WeaponModel::from_name(name).ok_or_else(|| {
        let known: Vec<_> = WeaponModel::ALL.iter().map(|m| m.name()).collect();
        format!("unknown weapon `{}` (known: {})", name, known.join(", "))
    })
}

fn load_config(cli: &Cli) -> Result<WeaponConfig, ArmError> {
    match &cli.config {
        Some(path) => Ok(WeaponConfig::from_ron_file(path)?),
        None => Ok(cli.weapon.config()),
    }
}

fn run(cli: &Cli) -> Result<(), ArmError> {
    let config = load_config(cli)?;
    let frame = Duration::from_secs_f64(1.0 / 60.0);

    println!(
        "Starting BulletSync headless simulation (seed: {}, weapon: {})",
        cli.seed, config.name
    );

    let mut app = create_headless_app(cli.seed);
    app.add_plugins(SimulationPlugin)
        .insert_resource(TimeUpdateStrategy::ManualDuration(frame));

    let shooter = spawn_shooter(app.world_mut(), Vec3::ZERO, vec![config])?;
    app.world_mut()
        .spawn((Transform::from_xyz(0.0, 0.0, -20.0), Hittable { radius: 1.0 }));

    let mut last_revision = 0;
    let mut report = |app: &App, tick: usize| {
        let Some(hud) = app.world().get::<AmmoHud>(shooter) else {
            return;
        };
        if hud.0.revision != last_revision {
            last_revision = hud.0.revision;
            println!("Tick {:>4}: ammo {}", tick, hud.0.text());
        }
    };

    // Первый update: time delta = 0
    app.update();
    let mut tick = 0;

    let hold_frames = (cli.hold_secs.max(0.0) as f64 / frame.as_secs_f64()).round() as usize + 1;
    set_input(&mut app, shooter, |input| input.hold());
    for _ in 0..hold_frames {
        app.update();
        tick += 1;
        report(&app, tick);
    }

    set_input(&mut app, shooter, |input| input.release());
    app.update();
    tick += 1;
    report(&app, tick);

    set_input(&mut app, shooter, |input| input.request_reload());
    for _ in 0..MAX_RELOAD_FRAMES {
        app.update();
        tick += 1;
        report(&app, tick);

        if !is_reloading(&app, shooter) {
            break;
        }
    }

    let fired = app
        .world()
        .get::<WeaponLoadout>(shooter)
        .and_then(|loadout| loadout.active())
        .map(|weapon| weapon.rounds_fired())
        .unwrap_or_default();

    log_info(&format!("Simulation complete: {} round(s) fired in {} ticks", fired, tick));
    println!("Simulation complete! {} round(s) fired", fired);

    Ok(())
}

fn set_input(app: &mut App, shooter: Entity, change: impl FnOnce(&mut TriggerInput)) {
    if let Some(mut input) = app.world_mut().get_mut::<TriggerInput>(shooter) {
        change(&mut input);
    }
}

fn is_reloading(app: &App, shooter: Entity) -> bool {
    app.world()
        .get::<WeaponLoadout>(shooter)
        .and_then(|loadout| loadout.active())
        .is_some_and(|weapon| weapon.is_reloading())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_weapon_preset_parsed_case_insensitive() {
        let cli = Cli::try_parse_from(["bulletsync_simulation", "--weapon", "Benelli_M4"]).unwrap();
        assert_eq!(cli.weapon, WeaponModel::BenelliM4);

        let cli = Cli::try_parse_from(["bulletsync_simulation"]).unwrap();
        assert_eq!(cli.weapon, WeaponModel::Ak74);
    }

    #[test]
    fn test_unknown_weapon_rejected_at_parse() {
        let err = Cli::try_parse_from(["bulletsync_simulation", "--weapon", "bazooka"])
            .err()
            .unwrap();
        assert_eq!(err.kind(), clap::error::ErrorKind::ValueValidation);
        assert!(err.to_string().contains("bazooka"));
    }
}
