//! See documentation for the [`GeometryNode`] trait.

use crate::cartesian::Rect;
use crate::error::GeoapplyTypesError;
use crate::geometry_trait::{GeometryTrait, TraitTarget};

/// Capability interface of a geometry representation the traversal engine can work with.
///
/// The engine never looks inside a node except through this trait: it asks the node for its structural role,
/// splits it into ordered children, and later asks the node type to build a parent back from (possibly
/// transformed) children.
///
/// Implementations must keep `from_children(node.geometry_trait(), node.into_children())` equal to the original
/// node for every node that has children.
pub trait GeometryNode: Sized {
    /// Structural role of the node.
    fn geometry_trait(&self) -> GeometryTrait;

    /// Splits the node into its ordered children. Points have no children and return an empty vector.
    fn into_children(self) -> Vec<Self>;

    /// Constructor hook: builds a node with the given trait from ordered children.
    fn from_children(
        geometry_trait: GeometryTrait,
        children: Vec<Self>,
    ) -> Result<Self, GeoapplyTypesError>;

    /// Bounding rectangle of the node, if it has any coordinates.
    fn bounding_rect(&self) -> Option<Rect>;

    /// Returns true if every path of decomposing the node meets a trait of the target before reaching a point.
    ///
    /// The default implementation only consults the trait hierarchy. Node types that can hold children of different
    /// kinds should override it to look at the actual children.
    fn reaches(&self, target: TraitTarget) -> bool {
        self.geometry_trait().reachable().intersects(target)
    }
}
