//! Fleet Core
//!
//! Core types shared by the fleet position services.
//!
//! This crate contains:
//! - Domain types: position reports, position log entries, vehicle summaries
//! - DTOs: the inbound position batch message

pub mod domain;
pub mod dto;
