pub mod app_state;
pub mod availability;
pub mod offer;
pub mod profile;
pub mod skill;
pub mod user;
