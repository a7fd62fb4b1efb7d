use bevy::prelude::*;
use bevy_egui::{EguiContextPass, EguiPlugin};

use crate::systems::bursts::spawn_bursts;
use crate::systems::card_config::apply_card_config;
use crate::ui::card::{
    card_interaction, fade_in_texts, hover_panel, pulse_divider, shake_card, spawn_card,
    wobble_corner_sparkles,
};
use crate::ui::settings::{SettingsUI, settings_ui};

pub struct UIPlugin;

impl Plugin for UIPlugin {
    fn build(&self, app: &mut App) {
        app.add_plugins(EguiPlugin {
            enable_multipass_for_primary_context: true,
        });
        app.init_resource::<SettingsUI>();

        // La carte dépend du contenu chargé depuis card.json
        app.add_systems(Startup, spawn_card.after(apply_card_config));

        app.add_systems(
            Update,
            (
                card_interaction.before(spawn_bursts),
                shake_card,
                fade_in_texts,
                pulse_divider,
                hover_panel,
                wobble_corner_sparkles,
            ),
        );

        app.add_systems(EguiContextPass, settings_ui);
    }
}
