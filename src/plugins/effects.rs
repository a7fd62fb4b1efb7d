use bevy::prelude::*;

use crate::systems::bursts::{BurstRequested, animate_bursts, spawn_bursts, tick_effect_schedule};

pub struct EffectsPlugin;

impl Plugin for EffectsPlugin {
    fn build(&self, app: &mut App) {
        app.add_event::<BurstRequested>();
        app.add_systems(
            Update,
            (tick_effect_schedule, spawn_bursts, animate_bursts).chain(),
        );
    }
}
