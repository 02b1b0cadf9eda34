//! Tube route planner server.
//!
//! A web application that answers: "How do I get between these two
//! London Underground stations, and how accessible are they?"

pub mod config;
pub mod directions;
pub mod domain;
pub mod map;
pub mod report;
pub mod session;
pub mod stations;
pub mod web;
