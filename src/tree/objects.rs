use std::collections::HashSet;

use super::DisplayRow;
use crate::model::{Entity, Model};

/// Column headers of the object tree.
pub const OBJECT_HEADERS: [&str; 3] = ["Name", "Class", "GlobalId"];

/// Levels below the file row that start expanded in the object tree.
pub const INITIAL_EXPAND_DEPTH: usize = 3;

#[derive(PartialEq, Eq, Hash)]
enum Visit<'a> {
    GlobalId(&'a str),
    Instance(u64),
}

/// Builds the object tree: one root row for the file, then every
/// `IfcProject` with its spatial containment and decomposition below it.
///
/// Columns are (Name, Class, GlobalId). An instance reachable along more
/// than one path is listed once, under the first parent that reaches it,
/// which also stops cycles.
#[must_use]
pub fn build_object_tree(model: &Model) -> DisplayRow {
    let mut root = DisplayRow::new(model.file_name(), "", "");
    let mut visited = HashSet::new();

    for project in model.by_type("IfcProject") {
        if let Some(row) = object_row(project, &mut visited) {
            root.push(row);
        }
    }

    tracing::debug!(rows = root.walk().count(), "built object tree");
    root
}

fn object_row<'a>(entity: Entity<'a>, visited: &mut HashSet<Visit<'a>>) -> Option<DisplayRow> {
    let key = entity
        .global_id()
        .map_or(Visit::Instance(entity.id()), Visit::GlobalId);
    if !visited.insert(key) {
        tracing::debug!(id = entity.id(), "instance already listed, skipping");
        return None;
    }

    let mut row = DisplayRow::new(
        entity.name().unwrap_or_default(),
        entity.type_name(),
        entity.global_id().unwrap_or_default(),
    );

    // only spatial elements can contain building elements
    if entity.is_a("IfcSpatialStructureElement") {
        for rel in entity.contains_elements() {
            for element in rel.related("RelatedElements") {
                if let Some(child) = object_row(element, visited) {
                    row.push(child);
                }
            }
        }
    }

    if entity.is_a("IfcObjectDefinition") {
        for rel in entity.is_decomposed_by() {
            for part in rel.related("RelatedObjects") {
                if let Some(child) = object_row(part, visited) {
                    row.push(child);
                }
            }
        }
    }

    Some(row)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::parse_model;
    use pretty_assertions::assert_eq;

    #[test]
    fn cyclic_decomposition_terminates() {
        let model = parse_model(
            "HEADER;
FILE_NAME('loop.ifc','',(''),(''),'','','');
ENDSEC;
DATA;
#1=IFCPROJECT('0YvctVUKr0kugbFTf53O9L',$,'P',$,$,$,$,$,$);
#2=IFCBUILDING('1rF0FFs1D8AwOFOpfnSCN8',$,'B',$,$,$,$,$,.ELEMENT.,$,$,$);
#3=IFCRELAGGREGATES('3vB2YO$MX4xv5uCqZZG05x',$,$,$,#1,(#2));
#4=IFCRELAGGREGATES('1Q6pOWK0z2TBAnKXPB7Njp',$,$,$,#2,(#1));
ENDSEC;",
        )
        .unwrap();

        let tree = build_object_tree(&model);
        assert_eq!(tree.columns(), ("loop.ifc", "", ""));
        assert_eq!(tree.children.len(), 1);
        let project = &tree.children[0];
        assert_eq!(project.children.len(), 1);
        assert!(project.children[0].children.is_empty());
    }

    #[test]
    fn facilities_list_their_contained_elements() {
        let model = parse_model(
            "DATA;
#1=IFCPROJECT('0YvctVUKr0kugbFTf53O9L',$,'P',$,$,$,$,$,$);
#2=IFCROAD('2bE4n0XQX5Kf$ppPsvDU3A',$,'Road',$,$,$,$,$,.ELEMENT.,.NOTDEFINED.);
#3=IFCRELAGGREGATES('3vB2YO$MX4xv5uCqZZG05x',$,$,$,#1,(#2));
#4=IFCWALL('2O2Fr$t4X7Zf8NOew3FLOH',$,'Barrier',$,$,$,$,$,.NOTDEFINED.);
#5=IFCRELCONTAINEDINSPATIALSTRUCTURE('2TnxZkTXT08eDuMuhUUFNy',$,$,$,(#4),#2);
ENDSEC;",
        )
        .unwrap();

        let tree = build_object_tree(&model);
        let rows: Vec<_> = tree.walk().skip(1).map(DisplayRow::columns).collect();
        assert_eq!(
            rows,
            vec![
                ("P", "IfcProject", "0YvctVUKr0kugbFTf53O9L"),
                ("Road", "IfcRoad", "2bE4n0XQX5Kf$ppPsvDU3A"),
                ("Barrier", "IfcWall", "2O2Fr$t4X7Zf8NOew3FLOH"),
            ]
        );
    }

    #[test]
    fn ifc2x3_nesting_counts_as_decomposition() {
        let content = "HEADER;
FILE_NAME('n.ifc','',(''),(''),'','','');
FILE_SCHEMA(('IFC2X3'));
ENDSEC;
DATA;
#1=IFCPROJECT('0YvctVUKr0kugbFTf53O9L',$,'P',$,$,$,$,$,$);
#2=IFCBUILDINGELEMENTPROXY('1hOSvn6df7F8_7GcBWlRGQ',$,'Host',$,$,$,$,$,$);
#3=IFCBUILDINGELEMENTPROXY('0BTBFw6f90Nfh9rP1dlXr2',$,'Part',$,$,$,$,$,$);
#4=IFCRELAGGREGATES('3vB2YO$MX4xv5uCqZZG05x',$,$,$,#1,(#2));
#5=IFCRELNESTS('1Q6pOWK0z2TBAnKXPB7Njp',$,$,$,#2,(#3));
ENDSEC;";

        let labels = |content: &str| -> Vec<String> {
            let model = parse_model(content).unwrap();
            build_object_tree(&model)
                .walk()
                .map(|r| r.label.clone())
                .collect()
        };

        assert_eq!(labels(content), vec!["n.ifc", "P", "Host", "Part"]);
        assert_eq!(
            labels(&content.replace("IFC2X3", "IFC4")),
            vec!["n.ifc", "P", "Host"]
        );
    }

    #[test]
    fn unnamed_objects_show_empty_name() {
        let model = parse_model(
            "DATA;
#1=IFCPROJECT('0YvctVUKr0kugbFTf53O9L',$,$,$,$,$,$,$,$);
ENDSEC;",
        )
        .unwrap();

        let tree = build_object_tree(&model);
        assert_eq!(
            tree.children[0].columns(),
            ("", "IfcProject", "0YvctVUKr0kugbFTf53O9L")
        );
    }
}
