//! Core traits and types for black-box curve approximation.
//!
//! This crate defines the shared abstractions the pipeline stages build on:
//!
//! - [`Component`]: a callable stage mapping a typed input to a typed output
//! - [`Domain`]: the interval over which the black box is probed
//! - [`Reading`] and [`MeasurementReply`]: a single measurement and its wire
//!   envelope
//! - [`Series`]: an ordered coordinate series with strictly increasing `x`

mod component;
mod domain;
mod reading;
mod series;

pub use component::Component;
pub use domain::{Domain, DomainError};
pub use reading::{MeasurementReply, Reading};
pub use series::{Series, SeriesError};
