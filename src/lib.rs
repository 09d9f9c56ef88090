//! Driving-time compliance engine for transport drivers.
//!
//! This crate validates drivers' daily records against the EU driving-time
//! rules of Regulation (EC) 561/2006, tracks the consecutive-work streak
//! that decides when the next weekly rest is due, and accounts for the
//! compensatory rest days earned under the collective agreement.

#![warn(missing_docs)]

pub mod api;
pub mod compliance;
pub mod config;
pub mod error;
pub mod models;
pub mod store;
