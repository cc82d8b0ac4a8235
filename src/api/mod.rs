mod container;
mod frame_builder;
mod graph;
mod graph_config;

pub use container::{ContainerHost, ContainerSize, ResizeSubscription};
pub use graph::Graph;
pub use graph_config::{GraphConfig, RenderSettings};
