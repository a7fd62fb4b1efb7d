pub mod background;
pub mod bursts;
pub mod card_config;
pub mod debug;
pub mod generation;
pub mod movement;
pub mod outline;
pub mod spawning;
