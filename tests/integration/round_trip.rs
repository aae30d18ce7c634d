//! Reading written ids back to model entities.

use tessera_export::{IdAllocator, SubComponentRef, list};
use tessera_foundation::category::{ELEMENT, NODE};
use tessera_foundation::{Entity, Identity};
use tessera_storage::IdMappingTable;

use crate::model::{portal, write};

fn field(line: &str, index: usize) -> &str {
    line.split('\t').nth(index).unwrap()
}

#[test]
fn written_ids_resolve_back_to_entities() {
    let model = portal();
    let mut alloc = IdAllocator::default();
    let lines = write(&model, &mut alloc);

    for (line, node) in lines.iter().zip(&model.nodes) {
        let id: u32 = field(line, 1).parse().unwrap();
        assert_eq!(alloc.lookup(&NODE, id).unwrap().identity, node.identity());
    }

    let quad = lines.iter().rfind(|l| l.contains("QUAD4")).unwrap();
    let id: u32 = field(quad, 1).parse().unwrap();
    assert_eq!(
        alloc.lookup(&ELEMENT, id).unwrap(),
        SubComponentRef {
            identity: model.panels[0].id,
            index: 1
        }
    );
}

#[test]
fn list_definitions_read_back_to_sub_components() {
    let model = portal();
    let mut alloc = IdAllocator::default();
    write(&model, &mut alloc);

    let definition = alloc.list_definition(&model.panels);
    assert_eq!(definition, "6 to 7");
    let refs: Vec<SubComponentRef> = list::expand(&definition)
        .unwrap()
        .into_iter()
        .map(|id| alloc.lookup(&ELEMENT, id).unwrap())
        .collect();
    assert!(refs.iter().all(|r| r.identity == model.panels[0].id));
    assert_eq!(refs.iter().map(|r| r.index).collect::<Vec<_>>(), vec![0, 1]);
}

#[test]
fn import_side_table_maps_foreign_ids() {
    // An importer records ids it reads against fresh identities.
    let mut table: IdMappingTable<Identity, u32> = IdMappingTable::new("Tessera", "GSA");
    let created: Vec<Identity> = (1..=3).map(|_| Identity::new()).collect();
    for (gsa, id) in (1u32..).zip(&created) {
        table.add_in(NODE.name(), *id, gsa);
    }

    assert_eq!(*table.first_id_in("Node", &2).unwrap(), created[1]);
    assert!(table.first_id_in("Element", &2).is_err());
}
