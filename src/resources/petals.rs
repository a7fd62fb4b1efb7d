use bevy::prelude::*;
use serde::Deserialize;

use crate::globals::*;
use crate::resources::particle_types::ParticleDescriptor;
use crate::resources::random::RandomSource;
use crate::resources::theme::ThemeName;

/// Multiplicateur grossier appliqué au nombre demandé
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(from = "String")]
pub enum DensityTier {
    Low,
    #[default]
    Medium,
    High,
}

impl DensityTier {
    pub const ALL: [DensityTier; 3] = [DensityTier::Low, DensityTier::Medium, DensityTier::High];

    pub fn multiplier(&self) -> f64 {
        match self {
            DensityTier::Low => LOW_DENSITY_MULTIPLIER,
            DensityTier::Medium => MEDIUM_DENSITY_MULTIPLIER,
            DensityTier::High => HIGH_DENSITY_MULTIPLIER,
        }
    }

    pub fn from_name(name: &str) -> Self {
        match name.trim().to_ascii_lowercase().as_str() {
            "low" => DensityTier::Low,
            "high" => DensityTier::High,
            _ => DensityTier::Medium,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            DensityTier::Low => "low",
            DensityTier::Medium => "medium",
            DensityTier::High => "high",
        }
    }
}

impl From<String> for DensityTier {
    fn from(name: String) -> Self {
        Self::from_name(&name)
    }
}

/// Loi de placement horizontal
///
/// Module le tirage à l'intérieur de chaque bande ; la bande elle-même reste
/// fixée par l'index de l'élément.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(from = "String")]
pub enum Distribution {
    #[default]
    Uniform,
    WeightedLeft,
    WeightedRight,
    /// Valeur inconnue : tirage uniforme brut
    PureRandom,
}

impl Distribution {
    pub const ALL: [Distribution; 4] = [
        Distribution::Uniform,
        Distribution::WeightedLeft,
        Distribution::WeightedRight,
        Distribution::PureRandom,
    ];

    pub fn from_name(name: &str) -> Self {
        match name.trim().to_ascii_lowercase().as_str() {
            "uniform" => Distribution::Uniform,
            "weighted-left" => Distribution::WeightedLeft,
            "weighted-right" => Distribution::WeightedRight,
            _ => Distribution::PureRandom,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Distribution::Uniform => "uniform",
            Distribution::WeightedLeft => "weighted-left",
            Distribution::WeightedRight => "weighted-right",
            Distribution::PureRandom => "random",
        }
    }

    /// Tirage dans [0, 1] selon la loi ; ×100 donne une position d'écran
    pub fn draw(&self, rng: &mut impl RandomSource) -> f64 {
        let r = rng.next_unit();
        match self {
            Distribution::Uniform | Distribution::PureRandom => r,
            Distribution::WeightedLeft => r.powf(WEIGHTED_EXPONENT),
            Distribution::WeightedRight => 1.0 - r.powf(WEIGHTED_EXPONENT),
        }
    }
}

impl From<String> for Distribution {
    fn from(name: String) -> Self {
        Self::from_name(&name)
    }
}

/// Paramètres courants de la population ; tout changement la régénère
#[derive(Resource, Debug, Clone, PartialEq)]
pub struct PetalParameters {
    pub count: i32,
    pub density: DensityTier,
    pub theme: ThemeName,
    pub distribution: Distribution,
    /// Remplace uniquement la palette des pétales
    pub petal_colors: Option<Vec<String>>,
}

impl Default for PetalParameters {
    fn default() -> Self {
        Self {
            count: DEFAULT_PETAL_COUNT,
            density: DensityTier::default(),
            theme: ThemeName::default(),
            distribution: Distribution::default(),
            petal_colors: None,
        }
    }
}

/// Liste immuable de descripteurs, remplacée en bloc à chaque régénération
#[derive(Resource, Debug, Default, Clone)]
pub struct PetalPopulation {
    pub descriptors: Vec<ParticleDescriptor>,
    pub generation: u32,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::resources::random::ScriptedSource;

    #[test]
    fn unknown_names_fall_back() {
        assert_eq!(DensityTier::from_name("extreme"), DensityTier::Medium);
        assert_eq!(Distribution::from_name("weighted-center"), Distribution::PureRandom);
        assert_eq!(Distribution::from_name("weighted-left"), Distribution::WeightedLeft);
    }

    #[test]
    fn density_multipliers() {
        assert_eq!(DensityTier::Low.multiplier(), 0.6);
        assert_eq!(DensityTier::Medium.multiplier(), 1.0);
        assert_eq!(DensityTier::High.multiplier(), 1.6);
    }

    #[test]
    fn weighted_draws_lean_to_their_side() {
        let mut source = ScriptedSource::constant(0.5);
        let left = Distribution::WeightedLeft.draw(&mut source);
        let right = Distribution::WeightedRight.draw(&mut source);
        let uniform = Distribution::Uniform.draw(&mut source);

        assert!(left < 0.5);
        assert!(right > 0.5);
        assert_eq!(uniform, 0.5);
        assert!((left + right - 1.0).abs() < 1e-12);
    }

    #[test]
    fn draws_stay_in_unit_interval() {
        for r in [0.0, 0.25, 0.999_999] {
            for distribution in Distribution::ALL {
                let value = distribution.draw(&mut ScriptedSource::constant(r));
                assert!((0.0..=1.0).contains(&value));
            }
        }
    }
}
