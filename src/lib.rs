//! meteor-graph: line graphs with nice-bound autoscaling and aligned
//! two-level ticks.
//!
//! The crate is split into a pure data-space model (`core`), backend-agnostic
//! drawing commands (`render`) and the chart facade that ties them to a host
//! container (`api`).

pub mod api;
pub mod core;
pub mod error;
pub mod render;
pub mod telemetry;

#[cfg(feature = "gtk4-adapter")]
pub mod platform_gtk;

pub use api::{ContainerHost, ContainerSize, Graph, GraphConfig, RenderSettings};
pub use error::{GraphError, GraphResult};
