use ifc_treeview::parser::{load_if_present, open};
use ifc_treeview::tree::{build_object_tree, DisplayRow};
use pretty_assertions::assert_eq;
use std::collections::HashSet;

const HOUSE: &str = concat!(env!("CARGO_MANIFEST_DIR"), "/tests/fixtures/house.ifc");
const BROKEN: &str = concat!(env!("CARGO_MANIFEST_DIR"), "/tests/fixtures/broken.ifc");

fn labels(rows: &[DisplayRow]) -> Vec<&str> {
    rows.iter().map(|r| r.label.as_str()).collect()
}

#[test]
fn builds_spatial_hierarchy() {
    let model = open(HOUSE).unwrap();
    let tree = build_object_tree(&model);

    assert_eq!(tree.columns(), ("house.ifc", "", ""));
    assert_eq!(tree.children.len(), 1);

    let project = &tree.children[0];
    assert_eq!(
        project.columns(),
        ("Sample House", "IfcProject", "0YvctVUKr0kugbFTf53O9L")
    );

    let site = &project.children[0];
    assert_eq!(site.columns(), ("Site", "IfcSite", "2bE4n0XQX5Kf$ppPsvDU3A"));
    let building = &site.children[0];
    assert_eq!(building.columns(), ("House", "IfcBuilding", "1rF0FFs1D8AwOFOpfnSCN8"));
    let storey = &building.children[0];
    assert_eq!(
        storey.columns(),
        ("Ground Floor", "IfcBuildingStorey", "3Hr8c6SMz0rRs8SfIgSWdU")
    );

    // contained elements come before aggregated parts
    assert_eq!(labels(&storey.children), vec!["Wall-001", "Door-001", "Living"]);
    assert_eq!(
        storey.children[0].columns(),
        ("Wall-001", "IfcWall", "2O2Fr$t4X7Zf8NOew3FLOH")
    );
}

#[test]
fn objects_reachable_twice_are_listed_once() {
    let model = open(HOUSE).unwrap();
    let tree = build_object_tree(&model);

    let doors = tree.walk().filter(|r| r.value == "IfcDoor").count();
    assert_eq!(doors, 1);

    let space = tree.walk().find(|r| r.label == "Living").unwrap();
    assert!(space.children.is_empty());
}

#[test]
fn every_global_id_is_unique_and_resolvable() {
    let model = open(HOUSE).unwrap();
    let tree = build_object_tree(&model);

    let mut seen = HashSet::new();
    for row in tree.walk().skip(1) {
        let guid = row.global_id().unwrap();
        assert!(seen.insert(guid), "{guid} listed twice");
        let entity = model.by_guid(guid).unwrap();
        assert_eq!(entity.type_name(), row.value);
    }
    assert_eq!(seen.len(), 7);
}

#[test]
fn relationships_and_types_stay_out_of_the_tree() {
    let model = open(HOUSE).unwrap();
    let tree = build_object_tree(&model);

    assert!(tree.walk().all(|r| !r.value.starts_with("IfcRel")));
    assert!(tree.walk().all(|r| r.value != "IfcWallType"));
    assert!(tree.walk().all(|r| r.value != "IfcPropertySet"));
}

#[test]
fn missing_file_loads_nothing() {
    let loaded = load_if_present("tests/fixtures/does-not-exist.ifc").unwrap();
    assert!(loaded.is_none());
}

#[test]
fn present_file_loads() {
    let model = load_if_present(HOUSE).unwrap().unwrap();
    assert_eq!(model.file_name(), "house.ifc");
    assert_eq!(model.schema(), "IFC4");
}

#[test]
fn malformed_file_is_an_error() {
    assert!(open(BROKEN).is_err());
}
