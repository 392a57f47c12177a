//! Bus journey planner server.
//!
//! A web application that answers: "which buses do I take to get from
//! this stop to that one, and how long will it take?"

pub mod config;
pub mod domain;
pub mod nearby;
pub mod network;
pub mod planner;
pub mod ratings;
pub mod roads;
pub mod validate;
pub mod web;
