//! Opaque node identifiers into the road network.

use std::fmt;

/// Identifier of a node in the road network.
///
/// The kernel only relies on identity. In the reference deployment the raw
/// value is an OpenStreetMap node id.
///
/// # Examples
/// ```
/// use waypath_core::NodeId;
///
/// let node = NodeId::new(42);
/// assert_eq!(node.get(), 42);
/// assert_eq!(node, NodeId::from(42));
/// assert_eq!(node.to_string(), "42");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct NodeId(u64);

impl NodeId {
    /// Wrap a raw identifier.
    #[must_use]
    pub const fn new(raw: u64) -> Self {
        Self(raw)
    }

    /// Return the raw identifier.
    #[must_use]
    pub const fn get(self) -> u64 {
        self.0
    }
}

impl From<u64> for NodeId {
    fn from(raw: u64) -> Self {
        Self(raw)
    }
}

impl From<NodeId> for u64 {
    fn from(node: NodeId) -> Self {
        node.0
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}
