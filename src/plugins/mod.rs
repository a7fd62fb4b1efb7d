pub mod camera;
pub mod effects;
pub mod petals;
pub mod setup;
pub mod ui;
