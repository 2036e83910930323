//! Reusable UI widgets

pub mod sparkline;
