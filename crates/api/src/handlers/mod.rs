pub mod availability;
pub mod calendar;
pub mod reports;
pub mod reservations;
pub mod resources;
