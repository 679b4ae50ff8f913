//! WorldWise - a terminal travel log
//!
//! The library exposes the app's modules for testing.

pub mod action;
pub mod api;
pub mod auth;
pub mod cities;
pub mod components;
pub mod config;
pub mod effect;
pub mod geo;
pub mod reducer;
pub mod route;
pub mod state;
