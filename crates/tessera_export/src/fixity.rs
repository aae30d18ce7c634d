//! Six degree-of-freedom fixity flags and node support data.

use std::fmt;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};
use tessera_storage::{Component, DataOwner, Views};

/// Release code written when no fixity data is present.
pub const DEFAULT_RELEASE_CODE: &str = "FFFFFF";

/// Restraint code written for a node without support data.
pub const UNRESTRAINED_CODE: &str = "000000";

/// One flag per translational (x, y, z) and rotational (xx, yy, zz) degree
/// of freedom.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[allow(clippy::struct_excessive_bools)]
pub struct Bool6D {
    /// Translation along X.
    pub x: bool,
    /// Translation along Y.
    pub y: bool,
    /// Translation along Z.
    pub z: bool,
    /// Rotation about X.
    pub xx: bool,
    /// Rotation about Y.
    pub yy: bool,
    /// Rotation about Z.
    pub zz: bool,
}

impl Bool6D {
    /// Creates a set of flags.
    #[must_use]
    #[allow(clippy::fn_params_excessive_bools)]
    pub const fn new(x: bool, y: bool, z: bool, xx: bool, yy: bool, zz: bool) -> Self {
        Self {
            x,
            y,
            z,
            xx,
            yy,
            zz,
        }
    }

    /// Every flag set to `value`.
    #[must_use]
    pub const fn all(value: bool) -> Self {
        Self::new(value, value, value, value, value, value)
    }

    /// Every flag set.
    #[must_use]
    pub const fn all_true() -> Self {
        Self::all(true)
    }

    /// No flag set.
    #[must_use]
    pub const fn all_false() -> Self {
        Self::all(false)
    }

    /// Translations set, rotations clear.
    #[must_use]
    pub const fn pinned() -> Self {
        Self::new(true, true, true, false, false, false)
    }

    /// Alias for [`all_true`](Self::all_true).
    #[must_use]
    pub const fn fixed() -> Self {
        Self::all_true()
    }

    /// Every flag negated.
    #[must_use]
    pub const fn invert(self) -> Self {
        Self::new(!self.x, !self.y, !self.z, !self.xx, !self.yy, !self.zz)
    }

    /// Flags in x, y, z, xx, yy, zz order.
    #[must_use]
    pub const fn to_array(self) -> [bool; 6] {
        [self.x, self.y, self.z, self.xx, self.yy, self.zz]
    }

    /// Renders one character per flag in x, y, z, xx, yy, zz order.
    #[must_use]
    pub fn to_code(self, true_char: char, false_char: char) -> String {
        self.to_array()
            .iter()
            .map(|&flag| if flag { true_char } else { false_char })
            .collect()
    }

    /// End release code: `R` for released, `F` for fixed.
    #[must_use]
    pub fn release_code(self) -> String {
        self.to_code('R', 'F')
    }

    /// Release code for optional flags, [`DEFAULT_RELEASE_CODE`] when absent.
    #[must_use]
    pub fn release_code_or_default(flags: Option<Self>) -> String {
        flags.map_or_else(|| DEFAULT_RELEASE_CODE.to_string(), Self::release_code)
    }
}

impl fmt::Display for Bool6D {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_code('1', '0'))
    }
}

/// Data that restrains a node's degrees of freedom.
pub trait Restraint {
    /// Flags set for each restrained degree of freedom.
    fn fixity(&self) -> Bool6D;
}

/// Support conditions attached to a node.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct NodeSupport {
    /// Restrained degrees of freedom.
    pub fixity: Bool6D,
}

impl NodeSupport {
    /// Creates a support restraining `fixity`.
    #[must_use]
    pub const fn new(fixity: Bool6D) -> Self {
        Self { fixity }
    }

    /// A pinned support.
    #[must_use]
    pub const fn pinned() -> Self {
        Self::new(Bool6D::pinned())
    }

    /// A fully fixed support.
    #[must_use]
    pub const fn fixed() -> Self {
        Self::new(Bool6D::fixed())
    }
}

impl Restraint for NodeSupport {
    fn fixity(&self) -> Bool6D {
        self.fixity
    }
}

impl Component for NodeSupport {
    fn construct() -> tessera_foundation::Result<Self> {
        Ok(Self::default())
    }

    fn views(views: &mut Views<Self>) {
        views.view::<dyn Restraint>(|s| s, |s| s);
    }
}

/// Returns true if `node` carries data restraining at least one degree of
/// freedom.
#[must_use]
pub fn has_support<N: DataOwner>(node: &N) -> bool {
    node.data_as::<dyn Restraint>()
        .is_some_and(|r| r.fixity() != Bool6D::all_false())
}

/// Restraint code of `node`: `1` per restrained degree of freedom, `0`
/// otherwise. Never creates data on the node.
#[must_use]
pub fn restraint_code<N: DataOwner>(node: &N) -> String {
    node.data_as::<dyn Restraint>()
        .map_or_else(|| UNRESTRAINED_CODE.to_string(), |r| r.fixity().to_string())
}
