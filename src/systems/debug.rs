use bevy::prelude::*;

use crate::components::falling::FallingItem;
use crate::resources::particle_types::ParticleFamily;
use crate::resources::petals::PetalPopulation;
use crate::systems::bursts::BurstParticle;

/// Résumé périodique de la population à l'écran
pub fn debug_population(
    time: Res<Time>,
    mut timer: Local<Timer>,
    population: Res<PetalPopulation>,
    items: Query<&FallingItem>,
    bursts: Query<(), With<BurstParticle>>,
) {
    // Initialiser le timer la première fois
    if timer.duration() == std::time::Duration::ZERO {
        *timer = Timer::from_seconds(5.0, TimerMode::Repeating);
    }

    timer.tick(time.delta());

    if timer.just_finished() {
        let now = time.elapsed_secs();
        let falling = items
            .iter()
            .filter(|item| item.cycle_progress(now).is_some())
            .count();

        debug!(
            "=== Population #{} : {} descripteurs, {} en chute, {} effets ===",
            population.generation,
            population.descriptors.len(),
            falling,
            bursts.iter().count(),
        );
        for family in ParticleFamily::ALL {
            let count = population
                .descriptors
                .iter()
                .filter(|d| d.family == family)
                .count();
            debug!("{}: {}", family.label(), count);
        }
    }
}
