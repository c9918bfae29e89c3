pub mod analytics;
pub mod chart;
pub mod game;
pub mod player;
pub mod score;
pub mod settings;
pub mod shooting;
