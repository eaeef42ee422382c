//! Travelplanner library
//!
//! Trip planning core: accounts, trips, generated itineraries, expense
//! tracking, weather-aware packing lists, a travel journal and photos.
//! The [`commands`] module is the presentation boundary; everything it
//! calls is reachable here for testing and embedding.

pub mod app;
pub mod commands;
pub mod config;
pub mod crypto;
pub mod database;
pub mod error;
pub mod integrations;
pub mod services;
pub mod validation;
