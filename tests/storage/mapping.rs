//! Integration tests for bidirectional maps and mapping tables
//!
//! Tests categorized round-trips, category isolation and collision handling.

use tessera_foundation::{ErrorKind, Identity};
use tessera_storage::{BiMap, IdMappingTable};

// =============================================================================
// Bidirectional Map
// =============================================================================

#[test]
fn bimap_both_directions() {
    let mut map = BiMap::new();
    let id = Identity::new();
    map.set(id, 12u32);

    assert_eq!(map.get_second(&id).unwrap(), &12);
    assert_eq!(map.get_first(&12).unwrap(), &id);
    assert!(matches!(
        map.get_first(&13).unwrap_err().kind,
        ErrorKind::NotFound { .. }
    ));
}

#[test]
fn bimap_last_write_wins() {
    let mut map = BiMap::new();
    let a = Identity::new();
    let b = Identity::new();
    map.set(a, 1u32);
    let evicted = map.set(b, 1);

    assert_eq!(evicted.previous_first, Some(a));
    assert!(!map.contains_first(&a));
    assert_eq!(map.try_first(&1), Some(&b));
    assert_eq!(map.len(), 1);
}

// =============================================================================
// Mapping Table
// =============================================================================

#[test]
fn category_lookup_round_trip() {
    let mut table: IdMappingTable<Identity, u32> = IdMappingTable::new("Tessera", "GSA");
    let k = Identity::new();

    assert!(!table.has_second_id_in("cat", &k));
    table.add_in("cat", k, 5);

    assert!(table.has_second_id_in("cat", &k));
    assert_eq!(*table.second_id_in("cat", &k).unwrap(), 5);
    assert_eq!(*table.first_id_in("cat", &5).unwrap(), k);
    assert!(!table.has_second_id_in("other", &k));
    assert!(!table.has_second_id(&k));
}

#[test]
fn same_external_id_in_different_categories() {
    let mut table: IdMappingTable<Identity, u32> = IdMappingTable::new("Tessera", "GSA");
    let node = Identity::new();
    let element = Identity::new();
    table.add_in("Node", node, 1);
    table.add_in("Element", element, 1);

    assert_eq!(*table.first_id_in("Node", &1).unwrap(), node);
    assert_eq!(*table.first_id_in("Element", &1).unwrap(), element);
    assert_eq!(table.len(), 2);
}

#[test]
fn missing_entries_report_space_and_category() {
    let table: IdMappingTable<Identity, u32> = IdMappingTable::new("Tessera", "GSA");
    let err = table.second_id_in("Node", &Identity::new()).unwrap_err();
    let msg = err.to_string();
    assert!(msg.contains("GSA"));
    assert!(msg.contains("\"Node\""));

    let err = table.first_id(&4).unwrap_err();
    assert!(err.to_string().contains("Tessera"));
}

#[test]
fn default_category_is_empty_name() {
    let mut table: IdMappingTable<Identity, u32> = IdMappingTable::new("Tessera", "GSA");
    let k = Identity::new();
    table.add(k, 3);

    assert_eq!(IdMappingTable::<Identity, u32>::DEFAULT_CATEGORY, "");
    assert!(table.has_second_id_in("", &k));
    assert!(table.has_first_id(&3));
    assert_eq!(table.categories().collect::<Vec<_>>(), vec![""]);
    assert_eq!(table.first_id_name(), "Tessera");
    assert_eq!(table.second_id_name(), "GSA");
}
