use bevy::prelude::*;
use bevy_egui::{EguiContexts, egui};

use crate::resources::particle_types::ParticleFamily;
use crate::resources::petals::{DensityTier, Distribution, PetalParameters, PetalPopulation};
use crate::resources::theme::ThemeName;
use crate::systems::generation::PartitionSizes;

/// État de la fenêtre de réglages
#[derive(Resource, Default)]
pub struct SettingsUI {
    pub show_window: bool,
}

/// Résultat d'un passage dans la fenêtre de réglages
#[derive(Debug, Clone, PartialEq)]
pub enum SettingsChange {
    Unchanged,
    Edited(PetalParameters),
    Regenerate,
}

/// Seule une vraie modification remplace les paramètres
pub fn settings_change(
    current: &PetalParameters,
    edited: PetalParameters,
    regenerate: bool,
) -> SettingsChange {
    if edited != *current {
        SettingsChange::Edited(edited)
    } else if regenerate {
        SettingsChange::Regenerate
    } else {
        SettingsChange::Unchanged
    }
}

/// Le curseur ne borne que les saisies : une valeur de card.json hors plage
/// reste intacte tant qu'on n'y touche pas
fn count_slider(ui: &mut egui::Ui, count: &mut i32) -> egui::Response {
    ui.add(
        egui::Slider::new(count, 0..=200)
            .clamping(egui::SliderClamping::Edits)
            .text("Nombre demandé"),
    )
}

pub fn settings_ui(
    mut contexts: EguiContexts,
    mut ui_state: ResMut<SettingsUI>,
    mut params: ResMut<PetalParameters>,
    population: Res<PetalPopulation>,
) {
    let ctx = contexts.ctx_mut();

    egui::TopBottomPanel::top("menu_bar").show(ctx, |ui| {
        ui.horizontal(|ui| {
            if ui.button("Réglages des pétales").clicked() {
                ui_state.show_window = !ui_state.show_window;
            }
        });
    });

    if !ui_state.show_window {
        return;
    }

    // Copie locale : la ressource n'est touchée (et la population régénérée)
    // qu'en cas de modification réelle
    let mut edited = params.clone();
    let mut regenerate = false;

    egui::Window::new("Réglages des pétales")
        .resizable(false)
        .show(ctx, |ui| {
            count_slider(ui, &mut edited.count);

            egui::ComboBox::from_label("Densité")
                .selected_text(edited.density.label())
                .show_ui(ui, |ui| {
                    for tier in DensityTier::ALL {
                        ui.selectable_value(&mut edited.density, tier, tier.label());
                    }
                });

            egui::ComboBox::from_label("Thème")
                .selected_text(edited.theme.label())
                .show_ui(ui, |ui| {
                    for theme in ThemeName::ALL {
                        ui.selectable_value(&mut edited.theme, theme, theme.label());
                    }
                });

            egui::ComboBox::from_label("Répartition")
                .selected_text(edited.distribution.label())
                .show_ui(ui, |ui| {
                    for distribution in Distribution::ALL {
                        ui.selectable_value(&mut edited.distribution, distribution, distribution.label());
                    }
                });

            ui.separator();

            let sizes = PartitionSizes::for_count(edited.count, edited.density);
            ui.label(format!("Effectif : {}", sizes.effective));
            ui.label(format!(
                "{} {} / {} {} / {} {} / {} {} + bords {} × 2",
                sizes.petals,
                ParticleFamily::Petal.label(),
                sizes.hearts,
                ParticleFamily::Heart.label(),
                sizes.blooms,
                ParticleFamily::Bloom.label(),
                sizes.charms,
                ParticleFamily::Charm.label(),
                sizes.edge,
            ));
            ui.label(format!(
                "Génération #{} : {} éléments",
                population.generation,
                population.descriptors.len()
            ));

            if ui.button("Régénérer").clicked() {
                regenerate = true;
            }
        });

    match settings_change(&params, edited, regenerate) {
        SettingsChange::Edited(edited) => *params = edited,
        SettingsChange::Regenerate => params.set_changed(),
        SettingsChange::Unchanged => {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn untouched_window_changes_nothing() {
        let current = PetalParameters::default();
        assert_eq!(
            settings_change(&current, current.clone(), false),
            SettingsChange::Unchanged
        );
    }

    #[test]
    fn edits_replace_parameters() {
        let current = PetalParameters::default();
        let edited = PetalParameters {
            theme: ThemeName::Summer,
            ..current.clone()
        };
        assert_eq!(
            settings_change(&current, edited.clone(), true),
            SettingsChange::Edited(edited)
        );
    }

    #[test]
    fn regenerate_button_alone_only_regenerates() {
        let current = PetalParameters::default();
        assert_eq!(
            settings_change(&current, current.clone(), true),
            SettingsChange::Regenerate
        );
    }

    #[test]
    fn showing_slider_keeps_large_configured_count() {
        let ctx = egui::Context::default();
        let mut count = 500;
        let _ = ctx.run(egui::RawInput::default(), |ctx| {
            egui::CentralPanel::default().show(ctx, |ui| {
                count_slider(ui, &mut count);
            });
        });
        assert_eq!(count, 500);

        let current = PetalParameters {
            count: 500,
            ..PetalParameters::default()
        };
        let edited = PetalParameters {
            count,
            ..current.clone()
        };
        assert_eq!(settings_change(&current, edited, false), SettingsChange::Unchanged);
    }
}
