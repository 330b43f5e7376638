//! Projectiles - визуальные пули
//!
//! Урон считается hitscan'ом в момент выстрела; снаряд только летит по
//! направлению pellet и исчезает через `bullet_lifetime`.

use bevy::prelude::*;

use crate::shooting::events::WeaponFired;

#[derive(Component, Debug, Clone, Copy, PartialEq)]
pub struct Projectile {
    pub shooter: Entity,
    /// m/s
    pub velocity: Vec3,
    /// Секунд до despawn
    pub lifetime: f32,
}

/// System: по снаряду на каждый pellet
pub fn spawn_projectiles(mut commands: Commands, mut fired: EventReader<WeaponFired>) {
    for event in fired.read() {
        let round = &event.round;
        if round.bullet_lifetime <= 0.0 {
            continue;
        }

        for pellet in &round.pellets {
            commands.spawn((
                Transform::from_translation(pellet.origin),
                Projectile {
                    shooter: event.shooter,
                    velocity: pellet.direction * round.bullet_velocity,
                    lifetime: round.bullet_lifetime,
                },
            ));
        }
    }
}

/// System: движение + despawn по lifetime
pub fn advance_projectiles(
    mut commands: Commands,
    mut projectiles: Query<(Entity, &mut Transform, &mut Projectile)>,
    time: Res<Time>,
) {
    let dt = time.delta_secs();

    for (entity, mut transform, mut projectile) in projectiles.iter_mut() {
        transform.translation += projectile.velocity * dt;
        projectile.lifetime -= dt;

        if projectile.lifetime <= 0.0 {
            commands.entity(entity).despawn();
        }
    }
}
