//! Domain rules for the workspace reservation service.
//!
//! This crate has zero internal deps and performs no I/O. Persistence is
//! reached through the [`booking::BookingStore`] trait so the validator can be
//! exercised against an in-memory store in tests and against PostgreSQL in
//! production.

pub mod availability;
pub mod booking;
pub mod calendar;
pub mod clock;
pub mod error;
pub mod floor_plan;
pub mod reservation;
pub mod resource;
pub mod roles;
pub mod shortage;
pub mod simulation;
pub mod time_window;
pub mod types;
