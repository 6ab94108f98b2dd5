use thiserror::Error;

use crate::discovery::DiscoveryError;

/// Error type produced by user constructors and initializers
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Failure to turn a descriptor into a live handler
#[derive(Debug, Error)]
pub enum InstantiationError {
    #[error("no handler type registered as '{0}'")]
    UnknownType(String),

    #[error("handler type '{0}' has no default constructor")]
    NoDefaultConstructor(String),

    #[error("handler type '{type_id}' has no initializer named '{initializer}'")]
    InitializerNotFound { type_id: String, initializer: String },

    #[error("initializer accessor '{initializer}' of '{type_id}' failed: {source}")]
    Accessor {
        type_id: String,
        initializer: String,
        #[source]
        source: BoxError,
    },

    #[error("construction of '{type_id}' failed: {source}")]
    Construction {
        type_id: String,
        #[source]
        source: BoxError,
    },
}

impl InstantiationError {
    pub fn construction(type_id: impl Into<String>, source: impl Into<BoxError>) -> Self {
        Self::Construction {
            type_id: type_id.into(),
            source: source.into(),
        }
    }
}

/// Failure of a whole chain build; no chain is ever produced alongside it
#[derive(Debug, Error)]
pub enum BuildError {
    #[error("discovery failed: {0}")]
    Discovery(#[from] DiscoveryError),

    #[error("instantiating chain element {position} ('{type_id}') failed: {source}")]
    Instantiation {
        position: usize,
        type_id: String,
        #[source]
        source: InstantiationError,
    },

    #[error("handler type '{type_id}' is bound more than once")]
    DuplicateType { type_id: String },

    #[error("no handlers to build a chain from{}", namespace_suffix(.namespace))]
    EmptyChain { namespace: Option<String> },
}

fn namespace_suffix(namespace: &Option<String>) -> String {
    namespace
        .as_ref()
        .map(|ns| format!(" in namespace '{ns}'"))
        .unwrap_or_default()
}

impl BuildError {
    /// Instantiation failure wrapped by this error, if any
    pub fn instantiation(&self) -> Option<&InstantiationError> {
        match self {
            BuildError::Instantiation { source, .. } => Some(source),
            _ => None,
        }
    }
}
