pub mod effects;
pub mod particle_types;
pub mod petals;
pub mod random;
pub mod theme;
