//! Reusable Leptos components.

pub mod controls;
pub mod details;
pub mod force_graph;
