//! Integration tests for fixity codes and node support data

use tessera_export::fixity::{self, DEFAULT_RELEASE_CODE, UNRESTRAINED_CODE};
use tessera_export::{Bool6D, NodeSupport, Restraint};
use tessera_storage::{DataOwner, DataSlot};

struct SupportedNode {
    data: DataSlot,
}

impl SupportedNode {
    fn new() -> Self {
        Self {
            data: DataSlot::new(),
        }
    }
}

impl DataOwner for SupportedNode {
    fn data_slot(&self) -> &DataSlot {
        &self.data
    }

    fn data_slot_mut(&mut self) -> &mut DataSlot {
        &mut self.data
    }
}

#[test]
fn release_codes() {
    assert_eq!(Bool6D::all_false().release_code(), "FFFFFF");
    assert_eq!(Bool6D::new(false, false, false, false, true, true).release_code(), "FFFFRR");
    assert_eq!(Bool6D::release_code_or_default(None), DEFAULT_RELEASE_CODE);
}

#[test]
fn custom_code_characters() {
    let flags = Bool6D::pinned();
    assert_eq!(flags.to_code('x', '-'), "xxx---");
    assert_eq!(flags.invert().to_code('x', '-'), "---xxx");
}

#[test]
fn support_is_read_without_creating_data() {
    let node = SupportedNode::new();
    assert!(!fixity::has_support(&node));
    assert_eq!(fixity::restraint_code(&node), UNRESTRAINED_CODE);
    assert!(!node.data.is_initialized());
}

#[test]
fn fixed_support_restrains_everything() {
    let mut node = SupportedNode::new();
    node.set_data(NodeSupport::fixed());

    assert!(fixity::has_support(&node));
    assert_eq!(fixity::restraint_code(&node), "111111");
    let restraint = node.data_as::<dyn Restraint>().unwrap();
    assert_eq!(restraint.fixity(), Bool6D::all_true());
}

#[test]
fn support_created_on_demand_can_be_edited() {
    let mut node = SupportedNode::new();
    node.data_or_create::<NodeSupport>().unwrap().fixity.z = true;
    assert_eq!(fixity::restraint_code(&node), "001000");
}
