use bevy::prelude::*;
use bevy::render::camera::ClearColorConfig;
use bevy::render::view::RenderLayers;

use crate::resources::petals::PetalParameters;
use crate::systems::background::{fit_backdrop, pulse_glow, recolor_backdrop, spawn_backdrop};
use crate::systems::bursts::EFFECTS_LAYER;
use crate::systems::card_config::apply_card_config;

pub struct CameraPlugin;

impl Plugin for CameraPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(Startup, (setup_cameras, spawn_backdrop.after(apply_card_config)));
        app.add_systems(
            Update,
            (
                fit_backdrop,
                pulse_glow,
                recolor_backdrop.run_if(resource_changed::<PetalParameters>),
            ),
        );
    }
}

/// Caméra de la scène (porte l'interface) et caméra des effets, dessinée
/// par-dessus l'interface
fn setup_cameras(mut commands: Commands) {
    commands.spawn((Camera2d, IsDefaultUiCamera));

    commands.spawn((
        Camera2d,
        Camera {
            order: 1,
            clear_color: ClearColorConfig::None,
            ..default()
        },
        RenderLayers::layer(EFFECTS_LAYER),
    ));
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn effects_camera_draws_last_on_its_own_layer() {
        let mut app = App::new();
        app.add_systems(Startup, setup_cameras);
        app.update();

        let world = app.world_mut();
        let mut cameras: Vec<(isize, bool, bool)> = world
            .query::<(&Camera, Option<&RenderLayers>, Has<IsDefaultUiCamera>)>()
            .iter(world)
            .map(|(camera, layers, ui)| {
                (camera.order, layers.is_some_and(|l| l.intersects(&RenderLayers::layer(EFFECTS_LAYER))), ui)
            })
            .collect();
        cameras.sort_by_key(|(order, ..)| *order);

        assert_eq!(cameras, vec![(0, false, true), (1, true, false)]);
    }
}
