use std::fs;
use std::io::ErrorKind;
use std::path::Path;

use bevy::prelude::*;
use serde::Deserialize;
use thiserror::Error;

use crate::globals::*;
use crate::resources::petals::{DensityTier, Distribution, PetalParameters};
use crate::resources::theme::ThemeName;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("lecture de la configuration impossible : {0}")]
    Io(#[from] std::io::Error),
    #[error("configuration JSON invalide : {0}")]
    Parse(#[from] serde_json::Error),
}

/// Contenu de `card.json`, tous les champs sont facultatifs
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct CardConfig {
    pub title: String,
    pub message: String,
    pub sub_message: String,
    pub quote: String,
    pub petal_count: i32,
    pub petal_colors: Option<Vec<String>>,
    pub density: DensityTier,
    pub theme: ThemeName,
    pub distribution: Distribution,
    /// Chemin d'une police dans `assets/`
    pub font: Option<String>,
}

impl Default for CardConfig {
    fn default() -> Self {
        Self {
            title: "Happy Women's Day".into(),
            message: "Happy Women's Day!".into(),
            sub_message: "С 8 Марта! Пусть весна подарит вам море улыбок, тепла, радости, любви и исполнения самых заветных желаний!".into(),
            quote: "\"Пусть этот день подарит радость, тепло, улыбки, весеннее настроение, любовь, гармонию, удачу и исполнение желаний!\"".into(),
            petal_count: DEFAULT_PETAL_COUNT,
            petal_colors: None,
            density: DensityTier::default(),
            theme: ThemeName::default(),
            distribution: Distribution::default(),
            font: None,
        }
    }
}

impl CardConfig {
    pub fn petal_parameters(&self) -> PetalParameters {
        PetalParameters {
            count: self.petal_count,
            density: self.density,
            theme: self.theme,
            distribution: self.distribution,
            petal_colors: self.petal_colors.clone(),
        }
    }

    pub fn content(&self) -> CardContent {
        CardContent {
            title: self.title.clone(),
            message: self.message.clone(),
            sub_message: self.sub_message.clone(),
            quote: self.quote.clone(),
            font: self.font.clone(),
        }
    }

    /// Écarte les couleurs illisibles ; une liste vide revient à la palette du thème
    fn sanitize(mut self) -> Self {
        if let Some(colors) = self.petal_colors.take() {
            let valid: Vec<String> = colors
                .into_iter()
                .filter(|color| {
                    let ok = Srgba::hex(color).is_ok();
                    if !ok {
                        warn!("Couleur de pétale ignorée : '{}'", color);
                    }
                    ok
                })
                .collect();
            self.petal_colors = (!valid.is_empty()).then_some(valid);
        }
        self
    }
}

/// Textes affichés sur la carte
#[derive(Resource, Debug, Clone, PartialEq)]
pub struct CardContent {
    pub title: String,
    pub message: String,
    pub sub_message: String,
    pub quote: String,
    pub font: Option<String>,
}

impl Default for CardContent {
    fn default() -> Self {
        CardConfig::default().content()
    }
}

pub fn load_card_config(path: &Path) -> Result<CardConfig, ConfigError> {
    let raw = fs::read_to_string(path)?;
    let config: CardConfig = serde_json::from_str(&raw)?;
    Ok(config.sanitize())
}

/// Charge `card.json` au démarrage, valeurs par défaut sinon
pub fn apply_card_config(mut commands: Commands) {
    let path = Path::new(CONFIG_FILE);
    let config = match load_card_config(path) {
        Ok(config) => {
            info!("💌 Carte chargée depuis {}", path.display());
            config
        }
        Err(ConfigError::Io(e)) if e.kind() == ErrorKind::NotFound => {
            info!("Pas de {}, carte par défaut", CONFIG_FILE);
            CardConfig::default()
        }
        Err(e) => {
            warn!("{} ignoré : {}", CONFIG_FILE, e);
            CardConfig::default()
        }
    };

    commands.insert_resource(config.petal_parameters());
    commands.insert_resource(config.content());
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::TempDir;

    fn write_config(dir: &TempDir, body: &str) -> std::path::PathBuf {
        let path = dir.path().join(CONFIG_FILE);
        fs::File::create(&path)
            .expect("should create config file")
            .write_all(body.as_bytes())
            .expect("should write config");
        path
    }

    #[test]
    fn empty_object_gives_defaults() {
        let dir = TempDir::new().expect("should create temp dir");
        let path = write_config(&dir, "{}");
        let config = load_card_config(&path).unwrap();
        assert_eq!(config, CardConfig::default());
        assert_eq!(config.petal_parameters(), PetalParameters::default());
    }

    #[test]
    fn reads_every_field() {
        let dir = TempDir::new().expect("should create temp dir");
        let path = write_config(
            &dir,
            r##"{
                "title": "Bonne fête",
                "message": "Merci !",
                "petalCount": 80,
                "petalColors": ["#FFD6E0", "#F06292"],
                "density": "high",
                "theme": "Spring",
                "distribution": "weighted-left",
                "font": "fonts/serif.ttf"
            }"##,
        );
        let config = load_card_config(&path).unwrap();
        assert_eq!(config.title, "Bonne fête");
        assert_eq!(config.petal_count, 80);
        assert_eq!(config.density, DensityTier::High);
        assert_eq!(config.theme, ThemeName::Spring);
        assert_eq!(config.distribution, Distribution::WeightedLeft);
        assert_eq!(config.content().font.as_deref(), Some("fonts/serif.ttf"));
        assert_eq!(
            config.petal_parameters().petal_colors,
            Some(vec!["#FFD6E0".to_string(), "#F06292".to_string()])
        );
    }

    #[test]
    fn unknown_names_normalise() {
        let dir = TempDir::new().expect("should create temp dir");
        let path = write_config(
            &dir,
            r#"{"theme": "neon", "density": "extreme", "distribution": "spiral"}"#,
        );
        let config = load_card_config(&path).unwrap();
        assert_eq!(config.theme, ThemeName::Cherry);
        assert_eq!(config.density, DensityTier::Medium);
        assert_eq!(config.distribution, Distribution::PureRandom);
    }

    #[test]
    fn invalid_colors_are_dropped() {
        let dir = TempDir::new().expect("should create temp dir");
        let path = write_config(&dir, r##"{"petalColors": ["#FF8DC7", "pink?", "#GGGGGG"]}"##);
        let config = load_card_config(&path).unwrap();
        assert_eq!(config.petal_colors, Some(vec!["#FF8DC7".to_string()]));

        let path = write_config(&dir, r#"{"petalColors": ["nope"]}"#);
        assert_eq!(load_card_config(&path).unwrap().petal_colors, None);
    }

    #[test]
    fn missing_file_is_io_error() {
        let dir = TempDir::new().expect("should create temp dir");
        let result = load_card_config(&dir.path().join("absent.json"));
        assert!(matches!(result, Err(ConfigError::Io(e)) if e.kind() == ErrorKind::NotFound));
    }

    #[test]
    fn malformed_json_is_parse_error() {
        let dir = TempDir::new().expect("should create temp dir");
        let path = write_config(&dir, "{ \"petalCount\": ");
        assert!(matches!(load_card_config(&path), Err(ConfigError::Parse(_))));
    }
}
