use ifc_treeview::dump::{dump_csv, dump_json};
use ifc_treeview::parser::open;
use ifc_treeview::tree::objects::OBJECT_HEADERS;
use ifc_treeview::tree::properties::PROPERTY_HEADERS;
use ifc_treeview::tree::{build_object_tree, build_property_panel, DisplayRow};
use pretty_assertions::assert_eq;

const HOUSE: &str = concat!(env!("CARGO_MANIFEST_DIR"), "/tests/fixtures/house.ifc");

#[test]
fn json_keeps_nesting() {
    let model = open(HOUSE).unwrap();
    let tree = build_object_tree(&model);

    let mut out = Vec::new();
    dump_json(&[tree], &mut out).unwrap();
    let value: serde_json::Value = serde_json::from_slice(&out).unwrap();

    assert_eq!(value[0]["label"], "house.ifc");
    let project = &value[0]["children"][0];
    assert_eq!(project["value"], "IfcProject");
    assert_eq!(project["id"], "0YvctVUKr0kugbFTf53O9L");
    assert_eq!(project["children"][0]["label"], "Site");
}

#[test]
fn csv_lists_rows_depth_first() {
    let model = open(HOUSE).unwrap();
    let tree = build_object_tree(&model);

    let mut out = Vec::new();
    dump_csv(&[tree], OBJECT_HEADERS, &mut out).unwrap();
    let text = String::from_utf8(out).unwrap();
    let lines: Vec<&str> = text.lines().collect();

    assert_eq!(
        lines[..4],
        [
            "Depth,Name,Class,GlobalId",
            "0,house.ifc,,",
            "1,Sample House,IfcProject,0YvctVUKr0kugbFTf53O9L",
            "2,Site,IfcSite,2bE4n0XQX5Kf$ppPsvDU3A",
        ]
    );
    assert_eq!(lines.len(), 9);
}

#[test]
fn csv_of_property_panel() {
    let model = open(HOUSE).unwrap();
    let panel = build_property_panel(
        &model,
        &[DisplayRow::new("", "", "2O2Fr$t4X7Zf8NOew3FLOH")],
    );

    let mut out = Vec::new();
    dump_csv(&panel, PROPERTY_HEADERS, &mut out).unwrap();
    let text = String::from_utf8(out).unwrap();

    assert!(text.starts_with(
        "Depth,Property,Value,GlobalId\n0,Attributes,,2O2Fr$t4X7Zf8NOew3FLOH\n"
    ));
    assert!(text.contains("1,Length,3.5,METRE\n"));
    assert!(text.contains("1,GrossArea,12.0,SQUARE_METRE\n"));
}
