pub mod card;
pub mod settings;
