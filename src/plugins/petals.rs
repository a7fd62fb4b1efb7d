use bevy::prelude::*;

use crate::resources::petals::{PetalParameters, PetalPopulation};
use crate::systems::debug::debug_population;
use crate::systems::movement::animate_falling_items;
use crate::systems::spawning::{regenerate_population, spawn_falling_items};

pub struct PetalsPlugin;

impl Plugin for PetalsPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(
            Update,
            (
                regenerate_population.run_if(resource_changed::<PetalParameters>),
                spawn_falling_items.run_if(resource_changed::<PetalPopulation>),
                animate_falling_items,
            )
                .chain(),
        );

        app.add_systems(Update, debug_population);
    }
}
