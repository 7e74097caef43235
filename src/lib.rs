//! docli: create, list, power and destroy DigitalOcean droplets and images
//!
//! Layers, innermost first: `domain` (entities, naming, key fingerprints),
//! `application` (identifier resolution, dispatch, rendering),
//! `infrastructure` (HTTP provider, I/O traits, wiring), `cli` (clap front end).

pub mod application;
pub mod cli;
pub mod config;
pub mod domain;
pub mod exitcode;
pub mod infrastructure;
pub mod util;
