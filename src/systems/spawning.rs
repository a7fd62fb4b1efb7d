use bevy::prelude::*;

use crate::components::falling::FallingItem;
use crate::resources::particle_types::ParticleDescriptor;
use crate::resources::petals::{PetalParameters, PetalPopulation};
use crate::systems::generation::{PartitionSizes, generate};
use crate::systems::outline::{ShapeKey, ShapeLibrary};

/// Régénère toute la population quand les paramètres changent
pub fn regenerate_population(
    params: Res<PetalParameters>,
    mut population: ResMut<PetalPopulation>,
) {
    let mut rng = rand::rng();
    let sizes = PartitionSizes::for_count(params.count, params.density);

    population.descriptors = generate(&params, &mut rng);
    population.generation += 1;

    info!(
        "🌸 Population #{} : {} éléments (effectif {}, densité {}, thème {}, répartition {})",
        population.generation,
        population.descriptors.len(),
        sizes.effective,
        params.density.label(),
        params.theme.label(),
        params.distribution.label(),
    );
}

/// Convertit une couleur hexadécimale, blanc si elle est illisible
pub fn parse_color(hex: &str) -> Color {
    match Srgba::hex(hex) {
        Ok(color) => color.into(),
        Err(e) => {
            warn!("Couleur '{}' invalide ({}), blanc utilisé", hex, e);
            Color::WHITE
        }
    }
}

/// Remplace toutes les entités par celles de la nouvelle population
pub fn spawn_falling_items(
    mut commands: Commands,
    mut materials: ResMut<Assets<ColorMaterial>>,
    time: Res<Time>,
    population: Res<PetalPopulation>,
    library: Res<ShapeLibrary>,
    existing: Query<Entity, With<FallingItem>>,
) {
    for entity in existing.iter() {
        commands.entity(entity).despawn();
    }

    let now = time.elapsed_secs();
    for descriptor in &population.descriptors {
        spawn_falling_item(&mut commands, &mut materials, &library, descriptor, now);
    }
}

fn spawn_falling_item(
    commands: &mut Commands,
    materials: &mut Assets<ColorMaterial>,
    library: &ShapeLibrary,
    descriptor: &ParticleDescriptor,
    now: f32,
) {
    // Un matériau par élément : l'opacité est animée individuellement
    let material = materials.add(ColorMaterial::from_color(
        parse_color(&descriptor.color).with_alpha(0.0),
    ));

    commands.spawn((
        FallingItem::new(descriptor.clone(), now),
        Mesh2d(library.get(ShapeKey::for_descriptor(descriptor))),
        MeshMaterial2d(material),
        Transform::from_xyz(0.0, 0.0, -1.0).with_scale(Vec3::splat(descriptor.size as f32)),
    ));
}
