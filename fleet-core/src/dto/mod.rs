//! Data Transfer Objects
//!
//! Messages delivered to the hub by the position feed.

pub mod position;
