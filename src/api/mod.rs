pub mod auth;
pub mod availability;
pub mod matches;
pub mod offers;
pub mod profile;
pub mod skills;
