//! Lemon Squeezer: a terminal lemon squeezing toy.
//!
//! [`squeezer`] holds the state store and quality model and has no UI
//! dependencies. [`app`] and [`ui`] build the terminal front end on top.

pub mod app;
pub mod config;
pub mod logging;
pub mod squeezer;
pub mod ui;
