//! A small structural model written through the allocator, the way an
//! exchange-format emitter drives it.

use tessera_export::fixity;
use tessera_export::{AllocatorConfig, Bool6D, IdAllocator, NodeSupport, SubComponents};
use tessera_foundation::category::{ELEMENT_SET, LINEAR_ELEMENT, NODE, PANEL_ELEMENT};
use tessera_foundation::{Category, Entity, Identity};
use tessera_storage::{DataOwner, DataSlot, Vector, Vertex, VertexCollection};

// =============================================================================
// Model
// =============================================================================

pub struct Node {
    pub id: Identity,
    pub position: Vector,
    data: DataSlot,
}

impl Node {
    pub fn at(x: f64, y: f64) -> Self {
        Self {
            id: Identity::new(),
            position: Vector::new(x, y, 0.0),
            data: DataSlot::new(),
        }
    }
}

impl Entity for Node {
    fn identity(&self) -> Identity {
        self.id
    }

    fn kind(&self) -> Category {
        NODE
    }
}

impl SubComponents for Node {}

impl DataOwner for Node {
    fn data_slot(&self) -> &DataSlot {
        &self.data
    }

    fn data_slot_mut(&mut self) -> &mut DataSlot {
        &mut self.data
    }
}

pub struct Beam {
    pub id: Identity,
    pub start: Identity,
    pub end: Identity,
}

impl Entity for Beam {
    fn identity(&self) -> Identity {
        self.id
    }

    fn kind(&self) -> Category {
        LINEAR_ELEMENT
    }
}

impl SubComponents for Beam {}

/// A panel meshed into faces; each face is written as its own element.
pub struct Panel {
    pub id: Identity,
    pub faces: Vec<VertexCollection>,
}

impl Panel {
    pub fn meshed(nodes: &[Node], faces: &[[usize; 4]]) -> Self {
        let id = Identity::new();
        let faces = faces
            .iter()
            .map(|face| {
                let mut coll = VertexCollection::new(id);
                coll.add_all(
                    face.iter()
                        .map(|&i| Vertex::new(nodes[i].position).with_node(nodes[i].id)),
                )
                .unwrap();
                coll
            })
            .collect();
        Self { id, faces }
    }
}

impl Entity for Panel {
    fn identity(&self) -> Identity {
        self.id
    }

    fn kind(&self) -> Category {
        PANEL_ELEMENT
    }
}

impl SubComponents for Panel {
    fn sub_component_count(&self) -> usize {
        self.faces.len()
    }
}

pub struct ElementSet {
    pub id: Identity,
    pub name: &'static str,
}

impl Entity for ElementSet {
    fn identity(&self) -> Identity {
        self.id
    }

    fn name(&self) -> &str {
        self.name
    }

    fn kind(&self) -> Category {
        ELEMENT_SET
    }
}

pub struct Model {
    pub nodes: Vec<Node>,
    pub beams: Vec<Beam>,
    pub panels: Vec<Panel>,
}

/// Two bays of a portal frame with a two-face slab:
///
/// ```text
/// 3 --- 4 --- 5
/// |     |     |
/// 0 --- 1 --- 2
/// ```
pub fn portal() -> Model {
    let mut nodes: Vec<Node> = [(0.0, 0.0), (1.0, 0.0), (2.0, 0.0), (0.0, 1.0), (1.0, 1.0), (2.0, 1.0)]
        .iter()
        .map(|&(x, y)| Node::at(x, y))
        .collect();
    nodes[0].set_data(NodeSupport::fixed());
    nodes[2].set_data(NodeSupport::pinned());

    let beams = [(0, 3), (1, 4), (2, 5), (3, 4), (4, 5)]
        .iter()
        .map(|&(a, b)| Beam {
            id: Identity::new(),
            start: nodes[a].id,
            end: nodes[b].id,
        })
        .collect();
    let panels = vec![Panel::meshed(&nodes, &[[0, 1, 4, 3], [1, 2, 5, 4]])];

    Model {
        nodes,
        beams,
        panels,
    }
}

// =============================================================================
// Emitter
// =============================================================================

fn node_id(alloc: &mut IdAllocator, model: &Model, id: Identity) -> String {
    let node = model.nodes.iter().find(|n| n.id == id).unwrap();
    alloc.resolved_id(node, 0).unwrap()
}

/// Writes the model as tab-separated records.
pub fn write(model: &Model, alloc: &mut IdAllocator) -> Vec<String> {
    let mut lines = Vec::new();

    for node in &model.nodes {
        let id = alloc.resolved_id(node, 0).unwrap();
        if fixity::has_support(node) {
            lines.push(format!("NODE\t{id}\t{}", fixity::restraint_code(node)));
        } else {
            lines.push(format!("NODE\t{id}"));
        }
    }

    for beam in &model.beams {
        let id = alloc.resolved_id(beam, 0).unwrap();
        let start = node_id(alloc, model, beam.start);
        let end = node_id(alloc, model, beam.end);
        let release = Bool6D::release_code_or_default(None);
        lines.push(format!("EL\t{id}\tBEAM\t{start}\t{end}\t{release}"));
    }

    for panel in &model.panels {
        alloc
            .each_sub_component(panel, |alloc, panel| {
                let id = alloc.current_id(panel)?;
                let face = &panel.faces[alloc.sub_component_index()];
                let topology: Vec<String> = face
                    .iter()
                    .filter_map(|v| v.node)
                    .map(|n| node_id(alloc, model, n))
                    .collect();
                lines.push(format!("EL\t{id}\tQUAD4\t{}", topology.join("\t")));
                Ok(())
            })
            .unwrap();
    }

    lines
}

// =============================================================================
// Tests
// =============================================================================

#[test]
fn export_numbers_every_record() {
    let model = portal();
    let mut alloc = IdAllocator::new(AllocatorConfig::gsa());
    let lines = write(&model, &mut alloc);

    assert_eq!(
        lines,
        vec![
            "NODE\t1\t111111",
            "NODE\t2",
            "NODE\t3\t111000",
            "NODE\t4",
            "NODE\t5",
            "NODE\t6",
            "EL\t1\tBEAM\t1\t4\tFFFFFF",
            "EL\t2\tBEAM\t2\t5\tFFFFFF",
            "EL\t3\tBEAM\t3\t6\tFFFFFF",
            "EL\t4\tBEAM\t4\t5\tFFFFFF",
            "EL\t5\tBEAM\t5\t6\tFFFFFF",
            "EL\t6\tQUAD4\t1\t2\t5\t4",
            "EL\t7\tQUAD4\t2\t3\t6\t5",
        ]
    );
}

#[test]
fn rewriting_is_stable() {
    let model = portal();
    let mut alloc = IdAllocator::default();
    let first = write(&model, &mut alloc);
    let second = write(&model, &mut alloc);
    assert_eq!(first, second);
    assert_eq!(alloc.peek_next(&NODE).unwrap(), 7);
}

#[test]
fn element_set_lists_panel_faces() {
    let model = portal();
    let mut alloc = IdAllocator::default();
    write(&model, &mut alloc);

    let set = ElementSet {
        id: Identity::new(),
        name: "Slab",
    };
    let set_id = alloc.resolved_id(&set, 0).unwrap();
    let members: [&dyn Entity; 3] = [&model.panels[0], &model.beams[3], &model.beams[4]];
    let definition = alloc.list_definition(members);

    assert_eq!(set_id, "1");
    assert_eq!(definition, "4 to 7");
}

#[test]
fn panel_faces_are_owned_by_the_panel() {
    let model = portal();
    let panel = &model.panels[0];
    for face in &panel.faces {
        assert_eq!(face.owner(), Some(panel.id));
        assert!(face.plane(1e-9).is_some());
        assert!(face.contains_node(model.nodes[1].id));
    }
}
