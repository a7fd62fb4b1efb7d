use bevy::prelude::*;

use crate::resources::effects::EffectSchedule;
use crate::resources::petals::{PetalParameters, PetalPopulation};
use crate::systems::card_config::{CardContent, apply_card_config};
use crate::systems::outline::build_shape_library;

pub struct SetupPlugin;

impl Plugin for SetupPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<PetalParameters>();
        app.init_resource::<PetalPopulation>();
        app.init_resource::<CardContent>();
        app.init_resource::<EffectSchedule>();

        // card.json écrase les valeurs par défaut avant la première génération
        app.add_systems(Startup, (apply_card_config, build_shape_library));
    }
}
