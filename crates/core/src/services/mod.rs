pub mod fetch_service;
pub mod roster_service;
pub mod shooting_service;
pub mod stats_service;
