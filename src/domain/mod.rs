//! Domain layer - Core conversion logic
//!
//! This module contains the domain entities, the repository traits the
//! engine needs from its environment, and the domain services.

pub mod entities;
pub mod repositories;
pub mod services;
