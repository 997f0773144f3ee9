//! Unit store behavior: placeholder fallback, add/edit semantics, ordering.

use gpsctl::storage::{KeyValueStore, MemoryStore};
use gpsctl::units::{Unit, UnitStore, DEFAULT_UNIT_NAME, UNIT_STORAGE_KEY};

fn unit(name: &str, phone: &str, device: &str, password: &str) -> Unit {
    let mut unit = Unit::new(name, phone, device);
    unit.password = password.to_string();
    unit
}

#[test]
fn empty_store_lists_exactly_the_placeholder() {
    let store = UnitStore::new(MemoryStore::new());
    let units = store.list_units();
    assert_eq!(units.len(), 1);
    assert_eq!(units[0].name, DEFAULT_UNIT_NAME);
    assert_eq!(units[0].phone_number, "");
    assert_eq!(units[0].device, "BoxTrack");
}

#[test]
fn add_then_get_returns_equal_unit() {
    let store = UnitStore::new(MemoryStore::new());
    let car = unit("Car", "1234567890", "BoxTrack", "pw");
    store.add_or_edit(&car).unwrap();

    let loaded = store.get_unit("Car");
    assert_eq!(loaded.name, "Car");
    assert_eq!(loaded.phone_number, "1234567890");
    assert_eq!(loaded.password, "pw");
    assert_eq!(loaded.device, "BoxTrack");
}

#[test]
fn add_or_edit_is_idempotent() {
    let store = UnitStore::new(MemoryStore::new());
    let car = unit("Car", "1234567890", "BoxTrack", "pw");
    store.add_or_edit(&car).unwrap();
    store.add_or_edit(&car).unwrap();

    assert_eq!(store.list_units().len(), 1);
}

#[test]
fn edit_overwrites_fields_in_place() {
    let store = UnitStore::new(MemoryStore::new());
    store.add_or_edit(&unit("Car", "111", "BoxTrack", "a")).unwrap();
    store.add_or_edit(&unit("Van", "222", "Coban", "b")).unwrap();
    store.add_or_edit(&unit("Bike", "333", "Concox", "c")).unwrap();

    // Editing the middle unit must not move it.
    store.add_or_edit(&unit("Van", "999", "Teltonika", "z")).unwrap();

    let names: Vec<String> = store.list_units().into_iter().map(|u| u.name).collect();
    assert_eq!(names, vec!["Car", "Van", "Bike"]);
    let van = store.get_unit("Van");
    assert_eq!(van.phone_number, "999");
    assert_eq!(van.password, "z");
    assert_eq!(van.device, "Teltonika");
}

#[test]
fn listing_never_persists_the_placeholder() {
    let backing = MemoryStore::new();
    let store = UnitStore::new(&backing);
    assert_eq!(store.list_units()[0].name, DEFAULT_UNIT_NAME);
    assert_eq!(store.get_unit("anything").name, DEFAULT_UNIT_NAME);

    // Storage stays untouched by reads.
    assert!(backing.get_list::<Unit>(UNIT_STORAGE_KEY).is_empty());

    // And once a real unit exists, the placeholder is gone.
    store.add_or_edit(&unit("Car", "111", "BoxTrack", "a")).unwrap();
    let names: Vec<String> = store.list_units().into_iter().map(|u| u.name).collect();
    assert_eq!(names, vec!["Car"]);
}

#[test]
fn undecodable_stored_list_reads_as_no_units() {
    let backing = MemoryStore::new();
    // Numbers stored where unit records are expected: decoding fails and the
    // store degrades to "no units" instead of erroring.
    backing.set_list(UNIT_STORAGE_KEY, &[1u8, 2, 3]).unwrap();

    let store = UnitStore::new(&backing);
    assert_eq!(store.list_units(), vec![Unit::placeholder()]);
    assert_eq!(store.get_unit("Car"), Unit::placeholder());
}
