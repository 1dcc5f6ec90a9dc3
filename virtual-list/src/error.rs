use alloc::string::String;
use core::fmt;

/// Returned by an item renderer that could not produce a node.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RenderFailure {
    message: String,
}

impl RenderFailure {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

impl fmt::Display for RenderFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

impl core::error::Error for RenderFailure {}

/// Result of a single item-renderer call.
pub type RenderResult<N> = Result<N, RenderFailure>;

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum VirtualListError<K> {
    /// The item renderer failed; the pass was abandoned before the surface was touched.
    RenderFailed {
        index: usize,
        key: K,
        failure: RenderFailure,
    },
    /// The list was disposed and no longer owns its listeners or nodes.
    Disposed,
}

impl<K: fmt::Debug> fmt::Display for VirtualListError<K> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::RenderFailed {
                index,
                key,
                failure,
            } => write!(f, "failed to render item {index} ({key:?}): {failure}"),
            Self::Disposed => write!(f, "virtual list has been disposed"),
        }
    }
}

impl<K: fmt::Debug> core::error::Error for VirtualListError<K> {
    fn source(&self) -> Option<&(dyn core::error::Error + 'static)> {
        match self {
            Self::RenderFailed { failure, .. } => Some(failure),
            Self::Disposed => None,
        }
    }
}
