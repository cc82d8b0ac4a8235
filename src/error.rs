use thiserror::Error;

use crate::core::AxisKind;

pub type GraphResult<T> = Result<T, GraphError>;

#[derive(Debug, Error)]
pub enum GraphError {
    #[error("invalid viewport size: width={width}, height={height}")]
    InvalidViewport { width: u32, height: u32 },

    #[error("invalid data: {0}")]
    InvalidData(String),

    #[error("no usable samples on the {axis} axis")]
    EmptyData { axis: AxisKind },

    #[error("invalid config: {0}")]
    InvalidConfig(String),

    #[error("numeric domain error: {0}")]
    Domain(String),

    #[error("container behind resize subscription is no longer alive")]
    ContainerDetached,

    #[error("render backend failure: {0}")]
    Backend(String),
}
