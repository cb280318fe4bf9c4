//! Core domain types
//!
//! This module contains the structures the hub persists and updates.
//! Persistence logic lives in the hub; these types carry structure only.

pub mod position;
pub mod vehicle;
