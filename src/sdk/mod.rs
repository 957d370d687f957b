pub mod config;
pub mod distance;
pub mod listing;
pub mod location;
pub mod maps;
pub mod places;
pub mod relocate;
pub mod selection;
pub mod session;
pub mod util;
