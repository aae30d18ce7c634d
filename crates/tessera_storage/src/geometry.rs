//! Vertices and the read-only queries over vertex collections.
//!
//! These are plain value types sufficient for the derived queries on
//! [`VertexCollection`]; they are not a geometry kernel.

use std::ops::{Add, Sub};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};
use tessera_foundation::category::VERTEX;
use tessera_foundation::{Category, Entity, Identity};

use crate::owned::{Owned, OwnedCollection};

/// Lengths below this are treated as zero when choosing plane axes.
const DEGENERATE_LENGTH: f64 = 1e-9;

/// A 3D vector or point.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Vector {
    /// X component.
    pub x: f64,
    /// Y component.
    pub y: f64,
    /// Z component.
    pub z: f64,
}

impl Vector {
    /// Creates a vector.
    #[must_use]
    pub const fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }

    /// Dot product.
    #[must_use]
    pub fn dot(self, other: Self) -> f64 {
        self.x * other.x + self.y * other.y + self.z * other.z
    }

    /// Cross product.
    #[must_use]
    pub fn cross(self, other: Self) -> Self {
        Self::new(
            self.y * other.z - self.z * other.y,
            self.z * other.x - self.x * other.z,
            self.x * other.y - self.y * other.x,
        )
    }

    /// Euclidean length.
    #[must_use]
    pub fn magnitude(self) -> f64 {
        self.dot(self).sqrt()
    }

    /// Unit vector in the same direction, or `None` for a zero vector.
    #[must_use]
    pub fn unit(self) -> Option<Self> {
        let len = self.magnitude();
        if len <= f64::EPSILON {
            return None;
        }
        Some(Self::new(self.x / len, self.y / len, self.z / len))
    }

    fn min(self, other: Self) -> Self {
        Self::new(self.x.min(other.x), self.y.min(other.y), self.z.min(other.z))
    }

    fn max(self, other: Self) -> Self {
        Self::new(self.x.max(other.x), self.y.max(other.y), self.z.max(other.z))
    }
}

impl Add for Vector {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        Self::new(self.x + rhs.x, self.y + rhs.y, self.z + rhs.z)
    }
}

impl Sub for Vector {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self {
        Self::new(self.x - rhs.x, self.y - rhs.y, self.z - rhs.z)
    }
}

/// Axis-aligned bounding box.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct BoundingBox {
    /// Minimum corner.
    pub min: Vector,
    /// Maximum corner.
    pub max: Vector,
}

impl BoundingBox {
    /// The smallest box containing every point, or `None` if there are none.
    pub fn around(points: impl IntoIterator<Item = Vector>) -> Option<Self> {
        let mut points = points.into_iter();
        let first = points.next()?;
        let (min, max) = points.fold((first, first), |(min, max), p| (min.min(p), max.max(p)));
        Some(Self { min, max })
    }

    /// Extent along each axis.
    #[must_use]
    pub fn size(&self) -> Vector {
        self.max - self.min
    }

    /// Returns true if `point` lies inside or on the box.
    #[must_use]
    pub fn contains(&self, point: Vector) -> bool {
        (self.min.x..=self.max.x).contains(&point.x)
            && (self.min.y..=self.max.y).contains(&point.y)
            && (self.min.z..=self.max.z).contains(&point.z)
    }
}

/// A plane through `origin` with unit `normal`.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Plane {
    /// A point on the plane.
    pub origin: Vector,
    /// Unit normal.
    pub normal: Vector,
}

impl Plane {
    /// Unsigned distance from `point` to the plane.
    #[must_use]
    pub fn distance_to(&self, point: Vector) -> f64 {
        (point - self.origin).dot(self.normal).abs()
    }
}

/// A geometric vertex belonging to at most one shape.
///
/// A vertex may reference an analysis node by identity.
#[derive(Clone, Debug, PartialEq)]
pub struct Vertex {
    id: Identity,
    /// Position in model space.
    pub position: Vector,
    /// Analysis node this vertex is attached to, if any.
    pub node: Option<Identity>,
    owner: Option<Identity>,
}

impl Vertex {
    /// Creates an unowned vertex at `position`.
    #[must_use]
    pub fn new(position: Vector) -> Self {
        Self {
            id: Identity::new(),
            position,
            node: None,
            owner: None,
        }
    }

    /// Builder method to attach a node.
    #[must_use]
    pub fn with_node(mut self, node: Identity) -> Self {
        self.node = Some(node);
        self
    }
}

impl Entity for Vertex {
    fn identity(&self) -> Identity {
        self.id
    }

    fn kind(&self) -> Category {
        VERTEX
    }
}

impl Owned for Vertex {
    fn owner(&self) -> Option<Identity> {
        self.owner
    }

    fn set_owner(&mut self, owner: Option<Identity>) {
        self.owner = owner;
    }
}

/// Ordered vertices of a shape.
pub type VertexCollection = OwnedCollection<Vertex>;

impl OwnedCollection<Vertex> {
    /// Bounding box of every vertex, or `None` if empty.
    #[must_use]
    pub fn bounding_box(&self) -> Option<BoundingBox> {
        BoundingBox::around(self.iter().map(|v| v.position))
    }

    /// The plane the vertices lie on within `tolerance`.
    ///
    /// Returns `None` with fewer than three non-collinear vertices or when
    /// any vertex lies further than `tolerance` from the plane.
    #[must_use]
    pub fn plane(&self, tolerance: f64) -> Option<Plane> {
        let points: Vec<_> = self.iter().map(|v| v.position).collect();
        let (&origin, rest) = points.split_first()?;
        let x = rest.iter().map(|&p| p - origin).find(|d| d.magnitude() > DEGENERATE_LENGTH)?;
        let normal = rest
            .iter()
            .map(|&p| x.cross(p - origin))
            .find(|n| n.magnitude() > DEGENERATE_LENGTH)?
            .unit()?;
        let plane = Plane { origin, normal };
        points
            .iter()
            .all(|&p| plane.distance_to(p) <= tolerance)
            .then_some(plane)
    }

    /// Returns true if any vertex references `node`.
    #[must_use]
    pub fn contains_node(&self, node: Identity) -> bool {
        self.iter().any(|v| v.node == Some(node))
    }
}
