use thiserror::Error;

#[derive(Debug, Error)]
pub enum ChartError {
    #[error("container element not found: #{id}")]
    ContainerNotFound { id: String },

    #[error("container id {id:?} is not a valid selector")]
    InvalidContainerId { id: String },

    #[error("html rewrite failed: {0}")]
    Rewrite(#[from] lol_html::errors::RewritingError),

    #[error("{len} records cannot be split into groups of {group_size}")]
    InvalidRecordGrouping { len: usize, group_size: usize },

    #[error("record {index} has label {found:?} but its group is {expected:?}")]
    MixedGroupLabels {
        index: usize,
        expected: String,
        found: String,
    },

    #[error("category {label:?} reappears at record {index} after its group ended")]
    RepeatedCategory { index: usize, label: String },

    #[error("no role token for group index {index} ({roles} roles defined)")]
    InvalidGroupIndex { index: usize, roles: usize },

    #[error("record {label:?} has no series name")]
    MissingSeriesName { label: String },

    #[error("unknown category: {label:?}")]
    UnknownCategory { label: String },

    #[error("chart area is empty ({width}x{height} after margins)")]
    InvalidDimensions { width: f64, height: f64 },

    #[error("invalid scale: {0}")]
    InvalidScale(String),

    #[error("unknown builtin chart: {name}")]
    UnknownBuiltin { name: String },

    #[error("chart definition parse error: {0}")]
    Parse(#[from] json5::Error),
}

pub type Result<T, E = ChartError> = std::result::Result<T, E>;
