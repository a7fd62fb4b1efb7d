use bevy::prelude::*;

use crate::resources::particle_types::ParticleDescriptor;

/// Élément qui tombe en boucle, piloté par son descripteur (lecture seule)
#[derive(Component, Debug, Clone)]
pub struct FallingItem {
    pub descriptor: ParticleDescriptor,
    /// Instant d'apparition (secondes depuis le lancement)
    pub spawned_at: f32,
}

impl FallingItem {
    pub fn new(descriptor: ParticleDescriptor, spawned_at: f32) -> Self {
        Self {
            descriptor,
            spawned_at,
        }
    }

    /// Avancement dans le cycle courant, `None` tant que le délai court
    pub fn cycle_progress(&self, now: f32) -> Option<f32> {
        let running = now - self.spawned_at - self.descriptor.delay as f32;
        if running < 0.0 {
            return None;
        }
        let duration = (self.descriptor.duration as f32).max(f32::EPSILON);
        Some((running % duration) / duration)
    }
}

/// Fond dégradé plein écran
#[derive(Component)]
pub struct Backdrop;

/// Halo radial qui pulse derrière la carte
#[derive(Component)]
pub struct Glow;
