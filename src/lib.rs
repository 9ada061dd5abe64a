//! # Darts — Board Simulation and Shot-Advisory Engine
//!
//! Models a regulation dartboard, simulates throws from swipe gestures or
//! skill ratings, and advises players on what to aim at next — in 501
//! double-out and cricket.
//!
//! ## Pipeline overview
//!
//! A throw runs through five stages; each lives in its own module:
//!
//! | Stage | Rust module | Description |
//! |-------|-------------|-------------|
//! | 1 | [`swipe`] / [`physics`] | Turn a sampled gesture (or a skill rating) into a raw landing point |
//! | 2 | [`oche`] | Warp the landing for the player's stance offset on the throw line |
//! | 3 | [`collision`] | Resolve deflections off darts already on the board, then wire clips |
//! | 4 | [`geometry`] | Classify the final point into segment, ring, and score |
//! | 5 | [`game`] | Apply the hit to the leg state (bust rules, turn bookkeeping) |
//!
//! The advisory side sits on top: [`checkouts`] holds the 2–170 finish
//! chart, [`advisor`] picks the next 501 target, [`cricket`] does the same
//! for cricket, and [`tips`] renders either at four detail levels.
//!
//! ## Coordinates
//!
//! Board space is measured in board units from the bull's center, +x right and +y
//! *down* (screen convention). Segment 20 sits at the top. All radii and
//! angles live in [`constants`].
//!
//! [`simulation`] plays whole 501 legs through the full pipeline in
//! parallel; [`server`] exposes everything over HTTP.

pub mod advisor;
pub mod calibration;
pub mod checkouts;
pub mod collision;
pub mod constants;
pub mod cricket;
pub mod env_config;
pub mod game;
pub mod geometry;
pub mod oche;
pub mod physics;
pub mod server;
pub mod simulation;
pub mod swipe;
pub mod throw;
pub mod tips;
pub mod types;
