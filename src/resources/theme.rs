use serde::Deserialize;

use crate::resources::particle_types::ParticleFamily;

/// Dégradé de fond d'un thème (identifiant d'origine + couleurs haut/bas)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BackgroundGradient {
    pub id: &'static str,
    pub top: &'static str,
    pub bottom: &'static str,
}

/// Jeu de palettes immuable
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Theme {
    pub name: &'static str,
    pub petals: &'static [&'static str],
    pub hearts: &'static [&'static str],
    pub flowers: &'static [&'static str],
    pub background: BackgroundGradient,
}

pub const CHERRY: Theme = Theme {
    name: "cherry",
    petals: &["#FFD6E0", "#FFACC7", "#FF8DC7", "#FDCEDF", "#F8BBD0", "#F48FB1", "#F06292"],
    hearts: &["#FF6B6B", "#FF8E8E", "#FF4081", "#F50057", "#FF1744"],
    flowers: &["#FFD6E0", "#FFACC7", "#FF8DC7", "#FDCEDF", "#F8BBD0", "#F48FB1"],
    background: BackgroundGradient {
        id: "from-pink-50 to-purple-50",
        top: "#FDF2F8",
        bottom: "#FAF5FF",
    },
};

pub const ROSE: Theme = Theme {
    name: "rose",
    petals: &["#FFF0F0", "#FFD6D6", "#FFC2C2", "#FFADAD", "#FF9B9B", "#FF8080"],
    hearts: &["#FF6666", "#FF5252", "#FF4D4D", "#FF3333", "#FF1A1A"],
    flowers: &["#FFF0F0", "#FFE6E6", "#FFCCCC", "#FFB3B3", "#FF9999"],
    background: BackgroundGradient {
        id: "from-red-50 to-pink-50",
        top: "#FEF2F2",
        bottom: "#FDF2F8",
    },
};

pub const SPRING: Theme = Theme {
    name: "spring",
    petals: &["#E0F7FA", "#B2EBF2", "#80DEEA", "#4DD0E1", "#26C6DA", "#00BCD4"],
    hearts: &["#00ACC1", "#0097A7", "#00838F", "#006064", "#00796B"],
    flowers: &["#E0F2F1", "#B2DFDB", "#80CBC4", "#4DB6AC", "#26A69A"],
    background: BackgroundGradient {
        id: "from-cyan-50 to-teal-50",
        top: "#ECFEFF",
        bottom: "#F0FDFA",
    },
};

pub const SUMMER: Theme = Theme {
    name: "summer",
    petals: &["#FFF9C4", "#FFF59D", "#FFF176", "#FFEE58", "#FFEB3B", "#FDD835"],
    hearts: &["#FBC02D", "#F9A825", "#F57F17", "#FF8F00", "#FF6F00"],
    flowers: &["#FFFDE7", "#FFF9C4", "#FFF59D", "#FFF176", "#FFEE58"],
    background: BackgroundGradient {
        id: "from-yellow-50 to-amber-50",
        top: "#FEFCE8",
        bottom: "#FFFBEB",
    },
};

/// Catalogue fixe des thèmes nommés
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash, Deserialize)]
#[serde(from = "String")]
pub enum ThemeName {
    #[default]
    Cherry,
    Rose,
    Spring,
    Summer,
}

impl ThemeName {
    pub const ALL: [ThemeName; 4] = [
        ThemeName::Cherry,
        ThemeName::Rose,
        ThemeName::Spring,
        ThemeName::Summer,
    ];

    /// Nom inconnu => thème par défaut, sans erreur
    pub fn from_name(name: &str) -> Self {
        match name.trim().to_ascii_lowercase().as_str() {
            "cherry" => ThemeName::Cherry,
            "rose" => ThemeName::Rose,
            "spring" => ThemeName::Spring,
            "summer" => ThemeName::Summer,
            _ => ThemeName::default(),
        }
    }

    pub fn theme(&self) -> &'static Theme {
        match self {
            ThemeName::Cherry => &CHERRY,
            ThemeName::Rose => &ROSE,
            ThemeName::Spring => &SPRING,
            ThemeName::Summer => &SUMMER,
        }
    }

    pub fn label(&self) -> &'static str {
        self.theme().name
    }
}

impl From<String> for ThemeName {
    fn from(name: String) -> Self {
        Self::from_name(&name)
    }
}

/// Palettes effectivement utilisées par le générateur
///
/// La surcharge de couleurs ne remplace que les pétales ; cœurs et glyphes
/// viennent toujours du thème.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedPalettes {
    pub petals: Vec<String>,
    pub hearts: Vec<String>,
    pub flowers: Vec<String>,
}

impl ResolvedPalettes {
    pub fn resolve(theme: ThemeName, petal_override: Option<&[String]>) -> Self {
        let theme = theme.theme();
        let owned = |colors: &[&str]| colors.iter().map(|c| c.to_string()).collect::<Vec<_>>();
        let petals = match petal_override {
            Some(colors) if !colors.is_empty() => colors.to_vec(),
            _ => owned(theme.petals),
        };

        Self {
            petals,
            hearts: owned(theme.hearts),
            flowers: owned(theme.flowers),
        }
    }

    /// Palette d'une famille : pétales, cœurs (cœurs et breloques) ou fleurs
    pub fn for_family(&self, family: ParticleFamily) -> &[String] {
        match family {
            ParticleFamily::Petal => &self.petals,
            ParticleFamily::Heart | ParticleFamily::Charm => &self.hearts,
            ParticleFamily::Bloom => &self.flowers,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_theme_falls_back_to_cherry() {
        assert_eq!(ThemeName::from_name("autumn"), ThemeName::Cherry);
        assert_eq!(ThemeName::from_name(""), ThemeName::Cherry);
        assert_eq!(
            ResolvedPalettes::resolve(ThemeName::from_name("autumn"), None),
            ResolvedPalettes::resolve(ThemeName::Cherry, None)
        );
    }

    #[test]
    fn names_are_case_insensitive() {
        assert_eq!(ThemeName::from_name(" Summer "), ThemeName::Summer);
        assert_eq!(ThemeName::from_name("ROSE"), ThemeName::Rose);
    }

    #[test]
    fn override_replaces_only_petals() {
        let custom = vec!["#000000".to_string(), "#111111".to_string()];
        let palettes = ResolvedPalettes::resolve(ThemeName::Spring, Some(&custom));

        assert_eq!(palettes.petals, custom);
        assert_eq!(palettes.hearts, SPRING.hearts);
        assert_eq!(palettes.flowers, SPRING.flowers);
    }

    #[test]
    fn charms_share_the_heart_palette() {
        let palettes = ResolvedPalettes::resolve(ThemeName::Summer, None);
        assert_eq!(
            palettes.for_family(ParticleFamily::Charm),
            palettes.for_family(ParticleFamily::Heart)
        );
        assert_eq!(palettes.for_family(ParticleFamily::Bloom), SUMMER.flowers);
    }

    #[test]
    fn empty_override_is_ignored() {
        let palettes = ResolvedPalettes::resolve(ThemeName::Rose, Some(&[]));
        assert_eq!(palettes.petals.len(), ROSE.petals.len());
    }

    #[test]
    fn deserializes_any_string() {
        let theme: ThemeName = serde_json::from_str("\"spring\"").unwrap();
        assert_eq!(theme, ThemeName::Spring);
        let theme: ThemeName = serde_json::from_str("\"winter\"").unwrap();
        assert_eq!(theme, ThemeName::Cherry);
    }

    #[test]
    fn every_palette_is_valid_hex() {
        for name in ThemeName::ALL {
            let theme = name.theme();
            let all = theme
                .petals
                .iter()
                .chain(theme.hearts)
                .chain(theme.flowers)
                .chain([&theme.background.top, &theme.background.bottom]);
            for color in all {
                assert!(
                    bevy::color::Srgba::hex(color).is_ok(),
                    "{} invalide dans {}",
                    color,
                    theme.name
                );
            }
        }
    }
}
