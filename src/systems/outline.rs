//! Contours vectoriels des particules et leurs maillages 2D.
//!
//! Les pétales et le cœur sont décrits par des chemins SVG simplifiés
//! (`M`, `L`, `C`, `Z`, absolus ou relatifs) dans une boîte 50×50. Les glyphes
//! sont des contours polaires calculés.

use std::collections::HashMap;
use std::f32::consts::TAU;

use bevy::asset::RenderAssetUsages;
use bevy::prelude::*;
use bevy::render::mesh::{Indices, PrimitiveTopology};
use thiserror::Error;

use crate::globals::*;
use crate::resources::particle_types::{GlyphKind, ParticleDescriptor, ParticleKind};

pub const HEART_OUTLINE: &str = "M25,10 C25,10 20,0 10,0 C0,0 0,10 0,10 C0,20 10,30 25,45 C40,30 50,20 50,10 C50,10 50,0 40,0 C30,0 25,10 25,10 Z";

pub const PETAL_OUTLINES: [&str; 5] = [
    "M25 0C25 0 31.25 12.5 43.75 18.75C56.25 25 50 50 25 50C0 50 -6.25 25 6.25 18.75C18.75 12.5 25 0 25 0Z",
    "M25 0C30 15 45 15 50 25C45 35 30 35 25 50C20 35 5 35 0 25C5 15 20 15 25 0Z",
    "M25 0C35 10 50 10 50 25C50 40 35 50 25 50C15 50 0 40 0 25C0 10 15 10 25 0Z",
    "M25 0C28 10 35 15 45 15C35 25 45 40 25 45C5 40 15 25 5 15C15 15 22 10 25 0Z",
    "M25 5C30 10 40 10 45 20C40 30 35 40 25 45C15 40 10 30 5 20C10 10 20 10 25 5Z",
];

/// Erreur de lecture d'un chemin vectoriel
#[derive(Debug, Clone, PartialEq, Error)]
pub enum PathError {
    #[error("chemin vide")]
    Empty,
    #[error("commande inconnue '{0}'")]
    UnknownCommand(char),
    #[error("coordonnées manquantes pour la commande '{0}'")]
    NotEnoughCoordinates(char),
    #[error("nombre invalide '{0}'")]
    InvalidNumber(String),
    #[error("le chemin doit commencer par M ou m")]
    MissingMoveto,
    #[error("contour dégénéré ({0} sommets)")]
    Degenerate(usize),
}

#[derive(Debug, Clone, PartialEq)]
enum Token {
    Command(char),
    Number(f32),
}

/// Découpe un chemin en commandes et nombres ; un `-` ouvre un nouveau nombre
/// sauf juste après un exposant (`1e-5`)
fn tokenize(path: &str) -> Result<Vec<Token>, PathError> {
    let mut tokens = Vec::new();
    let mut current = String::new();

    let flush = |current: &mut String, tokens: &mut Vec<Token>| -> Result<(), PathError> {
        if !current.is_empty() {
            let value = current
                .parse::<f32>()
                .map_err(|_| PathError::InvalidNumber(current.clone()))?;
            tokens.push(Token::Number(value));
            current.clear();
        }
        Ok(())
    };

    for ch in path.chars() {
        let in_exponent = current.ends_with(['e', 'E']);
        match ch {
            'e' | 'E' if current.ends_with(|c: char| c.is_ascii_digit() || c == '.') => {
                current.push(ch)
            }
            '-' | '+' if in_exponent => current.push(ch),
            c if c.is_ascii_alphabetic() => {
                flush(&mut current, &mut tokens)?;
                tokens.push(Token::Command(c));
            }
            ',' | ' ' | '\t' | '\n' | '\r' => flush(&mut current, &mut tokens)?,
            '-' if !current.is_empty() => {
                flush(&mut current, &mut tokens)?;
                current.push(ch);
            }
            _ => current.push(ch),
        }
    }
    flush(&mut current, &mut tokens)?;

    Ok(tokens)
}

fn take_numbers<const N: usize>(
    tokens: &[Token],
    cursor: &mut usize,
    cmd: char,
) -> Result<[f32; N], PathError> {
    let mut values = [0.0; N];
    for value in values.iter_mut() {
        match tokens.get(*cursor) {
            Some(Token::Number(n)) => *value = *n,
            _ => return Err(PathError::NotEnoughCoordinates(cmd)),
        }
        *cursor += 1;
    }
    Ok(values)
}

fn cubic_point(p0: Vec2, p1: Vec2, p2: Vec2, p3: Vec2, t: f32) -> Vec2 {
    let u = 1.0 - t;
    p0 * (u * u * u) + p1 * (3.0 * u * u * t) + p2 * (3.0 * u * t * t) + p3 * (t * t * t)
}

/// Lit un chemin et l'échantillonne en polygone (coordonnées de la boîte SVG).
///
/// Chaque courbe cubique produit `segments` sommets. Les commandes répétées
/// sans lettre (ex. `C x1 y1 x2 y2 x y x1 ...`) sont acceptées.
pub fn parse_outline(path: &str, segments: usize) -> Result<Vec<Vec2>, PathError> {
    let tokens = tokenize(path.trim())?;
    if tokens.is_empty() {
        return Err(PathError::Empty);
    }

    let mut points: Vec<Vec2> = Vec::new();
    let mut current = Vec2::ZERO;
    let mut start = Vec2::ZERO;
    let mut cursor = 0;
    let mut command: Option<char> = None;

    while cursor < tokens.len() {
        let cmd = match &tokens[cursor] {
            Token::Command(c) => {
                cursor += 1;
                *c
            }
            // Répétition implicite de la dernière commande
            Token::Number(_) => match command {
                Some('M') => 'L',
                Some('m') => 'l',
                Some(c) => c,
                None => return Err(PathError::MissingMoveto),
            },
        };

        if command.is_none() && cmd != 'M' && cmd != 'm' {
            return Err(PathError::MissingMoveto);
        }
        let relative = cmd.is_ascii_lowercase();
        let origin = if relative { current } else { Vec2::ZERO };

        match cmd.to_ascii_uppercase() {
            'M' => {
                let [x, y] = take_numbers::<2>(&tokens, &mut cursor, cmd)?;
                // Un premier `m` est absolu
                current = if points.is_empty() { Vec2::new(x, y) } else { origin + Vec2::new(x, y) };
                start = current;
                points.push(current);
            }
            'L' => {
                let [x, y] = take_numbers::<2>(&tokens, &mut cursor, cmd)?;
                current = origin + Vec2::new(x, y);
                points.push(current);
            }
            'C' => {
                let [x1, y1, x2, y2, x, y] = take_numbers::<6>(&tokens, &mut cursor, cmd)?;
                let p0 = current;
                let p1 = origin + Vec2::new(x1, y1);
                let p2 = origin + Vec2::new(x2, y2);
                let p3 = origin + Vec2::new(x, y);
                for step in 1..=segments.max(1) {
                    let t = step as f32 / segments.max(1) as f32;
                    points.push(cubic_point(p0, p1, p2, p3, t));
                }
                current = p3;
            }
            'Z' => {
                current = start;
            }
            _ => return Err(PathError::UnknownCommand(cmd)),
        }
        command = Some(cmd);
    }

    // Le dernier sommet rejoint souvent le premier
    if points.len() > 1 && points.first() == points.last() {
        points.pop();
    }
    points.dedup();

    if points.len() < 3 {
        return Err(PathError::Degenerate(points.len()));
    }
    Ok(points)
}

/// Ramène un contour de la boîte SVG (y vers le bas) au carré unité centré
pub fn normalize_outline(points: &[Vec2]) -> Vec<Vec2> {
    let half = OUTLINE_BOX / 2.0;
    points
        .iter()
        .map(|p| Vec2::new((p.x - half) / OUTLINE_BOX, (half - p.y) / OUTLINE_BOX))
        .collect()
}

/// Contour polaire à lobes : `inner + (outer - inner) × |cos(lobes·θ/2)|^sharpness`
pub fn polar_outline(lobes: f32, inner: f32, outer: f32, sharpness: f32, segments: usize) -> Vec<Vec2> {
    (0..segments)
        .map(|i| {
            let theta = i as f32 / segments as f32 * TAU;
            let r = inner + (outer - inner) * (lobes * theta / 2.0).cos().abs().powf(sharpness);
            Vec2::from_angle(theta + TAU / 4.0) * r
        })
        .collect()
}

fn signed_area(points: &[Vec2]) -> f32 {
    let n = points.len();
    (0..n)
        .map(|i| points[i].perp_dot(points[(i + 1) % n]))
        .sum::<f32>()
        / 2.0
}

/// Triangulation en éventail depuis le barycentre (contours étoilés)
pub fn fan_mesh(points: &[Vec2]) -> Mesh {
    let mut ring = points.to_vec();
    if signed_area(&ring) < 0.0 {
        ring.reverse();
    }
    let center = ring.iter().copied().sum::<Vec2>() / ring.len().max(1) as f32;

    let mut positions = Vec::with_capacity(ring.len() + 1);
    positions.push([center.x, center.y, 0.0]);
    positions.extend(ring.iter().map(|p| [p.x, p.y, 0.0]));

    let n = ring.len() as u32;
    let indices: Vec<u32> = (0..n)
        .flat_map(|i| [0, i + 1, (i + 1) % n + 1])
        .collect();

    Mesh::new(PrimitiveTopology::TriangleList, RenderAssetUsages::default())
        .with_inserted_attribute(Mesh::ATTRIBUTE_POSITION, positions)
        .with_inserted_indices(Indices::U32(indices))
}

/// Clé d'un maillage partagé
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ShapeKey {
    Petal(usize),
    Heart,
    Glyph(GlyphKind),
}

impl ShapeKey {
    pub fn for_descriptor(descriptor: &ParticleDescriptor) -> Self {
        match descriptor.kind {
            ParticleKind::Petal => ShapeKey::Petal(descriptor.outline.unwrap_or(0)),
            ParticleKind::Heart => ShapeKey::Heart,
            ParticleKind::Glyph(glyph) => ShapeKey::Glyph(glyph),
        }
    }

    /// Contour normalisé de la forme
    pub fn outline(&self) -> Result<Vec<Vec2>, PathError> {
        let svg = |path: &str| parse_outline(path, CURVE_SEGMENTS).map(|p| normalize_outline(&p));
        match self {
            ShapeKey::Petal(index) => svg(PETAL_OUTLINES.get(*index).copied().unwrap_or(PETAL_OUTLINES[0])),
            ShapeKey::Heart | ShapeKey::Glyph(GlyphKind::Heart) => svg(HEART_OUTLINE),
            ShapeKey::Glyph(GlyphKind::Flower) => Ok(polar_outline(5.0, 0.2, 0.5, 0.8, GLYPH_SEGMENTS)),
            ShapeKey::Glyph(GlyphKind::Flower2) => Ok(polar_outline(8.0, 0.18, 0.5, 1.6, GLYPH_SEGMENTS)),
            ShapeKey::Glyph(GlyphKind::Sparkles) => Ok(polar_outline(4.0, 0.1, 0.5, 6.0, GLYPH_SEGMENTS)),
        }
    }

    fn all() -> Vec<ShapeKey> {
        let mut keys: Vec<_> = (0..PETAL_OUTLINES.len()).map(ShapeKey::Petal).collect();
        keys.push(ShapeKey::Heart);
        keys.extend(GlyphKind::ALL.map(ShapeKey::Glyph));
        keys
    }
}

/// Maillages partagés par toutes les particules
#[derive(Resource, Default)]
pub struct ShapeLibrary {
    pub meshes: HashMap<ShapeKey, Handle<Mesh>>,
    pub fallback: Handle<Mesh>,
}

impl ShapeLibrary {
    pub fn get(&self, key: ShapeKey) -> Handle<Mesh> {
        self.meshes.get(&key).cloned().unwrap_or_else(|| self.fallback.clone())
    }
}

/// Construit la bibliothèque de formes au démarrage
pub fn build_shape_library(mut commands: Commands, mut meshes: ResMut<Assets<Mesh>>) {
    let fallback = meshes.add(Circle::new(0.5));
    let mut library = ShapeLibrary {
        meshes: HashMap::new(),
        fallback,
    };

    for key in ShapeKey::all() {
        match key.outline() {
            Ok(points) => {
                library.meshes.insert(key, meshes.add(fan_mesh(&points)));
            }
            Err(e) => {
                error!("Contour {:?} illisible, cercle utilisé à la place: {}", key, e);
            }
        }
    }

    info!("🌸 {} formes de particules prêtes", library.meshes.len());
    commands.insert_resource(library);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_every_catalog_outline() {
        for path in PETAL_OUTLINES.iter().chain([&HEART_OUTLINE]) {
            let points = parse_outline(path, CURVE_SEGMENTS).unwrap();
            assert!(points.len() >= 3 * CURVE_SEGMENTS, "{path}");
            for p in &points {
                assert!(p.x >= -7.0 && p.x <= 57.0 && p.y >= -1.0 && p.y <= 51.0);
            }
        }
    }

    #[test]
    fn tokenizer_splits_glued_negatives() {
        let tokens = tokenize("C0 50-6.25 25").unwrap();
        assert_eq!(
            tokens,
            vec![
                Token::Command('C'),
                Token::Number(0.0),
                Token::Number(50.0),
                Token::Number(-6.25),
                Token::Number(25.0),
            ]
        );
    }

    #[test]
    fn tokenizer_reads_exponents() {
        let tokens = tokenize("M1e1,0 L1e-5-2E+1").unwrap();
        assert_eq!(
            tokens,
            vec![
                Token::Command('M'),
                Token::Number(10.0),
                Token::Number(0.0),
                Token::Command('L'),
                Token::Number(1e-5),
                Token::Number(-20.0),
            ]
        );
        assert_eq!(tokenize("M1e"), Err(PathError::InvalidNumber("1e".into())));
    }

    #[test]
    fn line_path_keeps_vertices() {
        let points = parse_outline("M0,0 L10,0 L10,10 Z", 4).unwrap();
        assert_eq!(points, vec![Vec2::new(0.0, 0.0), Vec2::new(10.0, 0.0), Vec2::new(10.0, 10.0)]);
    }

    #[test]
    fn relative_commands_and_implicit_repeat() {
        let points = parse_outline("m1,1 l4,0 0,4 z", 4).unwrap();
        assert_eq!(points, vec![Vec2::new(1.0, 1.0), Vec2::new(5.0, 1.0), Vec2::new(5.0, 5.0)]);
    }

    #[test]
    fn cubic_ends_on_its_endpoint() {
        let points = parse_outline("M0 0C0 10 10 10 10 0L5 -5Z", 8).unwrap();
        assert!(points.contains(&Vec2::new(10.0, 0.0)));
        assert_eq!(points.len(), 1 + 8 + 1);
    }

    #[test]
    fn rejects_malformed_paths() {
        assert_eq!(parse_outline("   ", 4), Err(PathError::Empty));
        assert_eq!(parse_outline("L0,0 L1,1", 4), Err(PathError::MissingMoveto));
        assert_eq!(parse_outline("M0,0 C1,1 2", 4), Err(PathError::NotEnoughCoordinates('C')));
        assert_eq!(parse_outline("M0,0 Q1,1 2,2", 4), Err(PathError::UnknownCommand('Q')));
        assert_eq!(parse_outline("M0,0 L1.2.3,0", 4), Err(PathError::InvalidNumber("1.2.3".into())));
        assert_eq!(parse_outline("M0,0 L1,1", 4), Err(PathError::Degenerate(2)));
    }

    #[test]
    fn normalized_heart_points_up() {
        let heart = ShapeKey::Heart.outline().unwrap();
        // La pointe (25,45) est en bas une fois l'axe y retourné
        let lowest = heart.iter().map(|p| p.y).fold(f32::MAX, f32::min);
        assert!((lowest - (-0.4)).abs() < 1e-4);
        assert!(heart.iter().all(|p| p.x.abs() <= 0.5 + 1e-4));
    }

    #[test]
    fn every_shape_has_an_outline() {
        for key in ShapeKey::all() {
            let outline = key.outline().unwrap();
            assert!(outline.len() >= 3, "{key:?}");
        }
    }

    #[test]
    fn fan_mesh_is_counter_clockwise() {
        let clockwise = [Vec2::new(0.0, 0.0), Vec2::new(0.0, 1.0), Vec2::new(1.0, 1.0), Vec2::new(1.0, 0.0)];
        assert!(signed_area(&clockwise) < 0.0);

        let mesh = fan_mesh(&clockwise);
        assert_eq!(mesh.count_vertices(), 5);
        let Some(Indices::U32(indices)) = mesh.indices() else {
            panic!("indices attendus");
        };
        assert_eq!(indices.len(), 12);

        let positions = mesh
            .attribute(Mesh::ATTRIBUTE_POSITION)
            .and_then(|a| a.as_float3())
            .unwrap();
        for triangle in indices.chunks(3) {
            let [a, b, c] = [0, 1, 2].map(|k| Vec2::from_slice(&positions[triangle[k] as usize][..2]));
            assert!((b - a).perp_dot(c - a) > 0.0);
        }
    }

    #[test]
    fn descriptor_maps_to_shape() {
        let descriptor = ParticleDescriptor {
            color: "#FFFFFF".into(),
            size: 20.0,
            left: 50.0,
            delay: 0.0,
            duration: 10.0,
            rotation: 0.0,
            outline: Some(3),
            kind: ParticleKind::Petal,
            family: crate::resources::particle_types::ParticleFamily::Petal,
            stack_order: 5,
        };
        assert_eq!(ShapeKey::for_descriptor(&descriptor), ShapeKey::Petal(3));
    }
}
