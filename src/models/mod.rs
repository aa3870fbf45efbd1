//! Data models for the SkyRoute service
//!
//! This module contains the core domain models organized by concern:
//! - Location: Coordinates and resolved places
//! - Weather: Point-in-time weather observations
//! - Report: Per-point and route-level analysis results

pub mod location;
pub mod report;
pub mod weather;

// Re-export all public types for convenient access
pub use location::{Coordinate, PlaceLocation};
pub use report::{PathPoint, RouteReport};
pub use weather::WeatherObservation;
