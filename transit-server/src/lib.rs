//! Bus route resolution server.
//!
//! A web service that answers a rider's question: which buses to
//! take, where to change buses, and what the trip will cost.

pub mod cache;
pub mod domain;
pub mod feed;
pub mod fare;
pub mod geo;
pub mod graph;
pub mod locator;
pub mod planner;
pub mod trips;
pub mod walking;
pub mod web;
