pub mod entity;
pub mod value;

pub use entity::Entity;
pub use value::{format_unit, format_value};

use crate::parser::schema;
use crate::parser::step::{StepEntity, StepFile, StepHeader};
use std::collections::HashMap;

/// Back-references derived from relationship instances.
#[derive(Debug, Default)]
struct Inverses {
    contains_elements: Vec<u64>,
    is_decomposed_by: Vec<u64>,
    is_defined_by: Vec<u64>,
}

/// A parsed IFC model. Read-only once built.
#[derive(Debug)]
pub struct Model {
    header: StepHeader,
    entities: HashMap<u64, StepEntity>,
    /// Instance ids in ascending order
    order: Vec<u64>,
    type_index: HashMap<String, Vec<u64>>,
    guid_index: HashMap<String, u64>,
    inverses: HashMap<u64, Inverses>,
}

impl Model {
    #[must_use]
    pub fn from_step(step_file: StepFile) -> Self {
        let StepFile { header, entities } = step_file;

        let mut order: Vec<u64> = entities.keys().copied().collect();
        order.sort_unstable();

        let mut model = Self {
            header,
            entities,
            order,
            type_index: HashMap::new(),
            guid_index: HashMap::new(),
            inverses: HashMap::new(),
        };
        model.build_indexes();
        model
    }

    fn build_indexes(&mut self) {
        let mut type_index: HashMap<String, Vec<u64>> = HashMap::new();
        let mut guid_index = HashMap::new();
        let mut inverses: HashMap<u64, Inverses> = HashMap::new();

        // IFC2X3 lists nested parts under IsDecomposedBy too
        let schema_name = self.header.schema.to_ascii_uppercase();
        let nests_decompose = schema_name.starts_with("IFC2X3");

        for &id in &self.order {
            let Some(entity) = self.entity(id) else {
                continue;
            };
            type_index
                .entry(entity.raw().entity_type.clone())
                .or_default()
                .push(id);

            if let Some(guid) = entity.global_id() {
                guid_index.entry(guid.to_string()).or_insert(id);
            }

            if entity.is_a("IfcRelContainedInSpatialStructure") {
                for target in entity.references("RelatingStructure") {
                    inverses.entry(target).or_default().contains_elements.push(id);
                }
            } else if entity.is_a("IfcRelAggregates")
                || (nests_decompose && entity.is_a("IfcRelNests"))
            {
                for target in entity.references("RelatingObject") {
                    inverses.entry(target).or_default().is_decomposed_by.push(id);
                }
            } else if entity.is_a("IfcRelDefinesByType")
                || entity.is_a("IfcRelDefinesByProperties")
            {
                for target in entity.references("RelatedObjects") {
                    inverses.entry(target).or_default().is_defined_by.push(id);
                }
            }
        }

        self.type_index = type_index;
        self.guid_index = guid_index;
        self.inverses = inverses;
    }

    /// File name recorded in the `FILE_NAME` header entry.
    #[must_use]
    pub fn file_name(&self) -> &str {
        &self.header.file_name
    }

    /// Schema identifier from `FILE_SCHEMA`, e.g. `IFC4`.
    #[must_use]
    pub fn schema(&self) -> &str {
        &self.header.schema
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entities.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entities.is_empty()
    }

    #[must_use]
    pub fn entity(&self, id: u64) -> Option<Entity<'_>> {
        self.entities.get(&id).map(|raw| Entity::new(self, raw))
    }

    /// All instances of `type_name` or any of its subtypes, in instance order.
    #[must_use]
    pub fn by_type(&self, type_name: &str) -> Vec<Entity<'_>> {
        let mut wanted: Vec<String> = schema::subtypes_of(type_name)
            .iter()
            .map(|name| name.to_ascii_uppercase())
            .collect();
        if wanted.is_empty() {
            wanted.push(type_name.to_ascii_uppercase());
        }

        let mut ids: Vec<u64> = wanted
            .iter()
            .filter_map(|name| self.type_index.get(name))
            .flatten()
            .copied()
            .collect();
        ids.sort_unstable();

        ids.into_iter().filter_map(|id| self.entity(id)).collect()
    }

    #[must_use]
    pub fn by_guid(&self, global_id: &str) -> Option<Entity<'_>> {
        self.guid_index
            .get(global_id)
            .and_then(|&id| self.entity(id))
    }

    fn inverse_ids(&self, id: u64, pick: fn(&Inverses) -> &Vec<u64>) -> &[u64] {
        match self.inverses.get(&id) {
            Some(inv) => pick(inv),
            None => &[],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    const CONTENT: &str = "DATA;
#1=IFCPROJECT('0YvctVUKr0kugbFTf53O9L',$,'P',$,$,$,$,$,$);
#2=IFCBUILDINGSTOREY('3Hr8c6SMz0rRs8SfIgSWdU',$,'L1',$,$,$,$,$,.ELEMENT.,0.);
#3=IFCWALLSTANDARDCASE('2O2Fr$t4X7Zf8NOew3FLOH',$,'W',$,$,$,$,$,$);
#4=IFCWALL('1hOSvn6df7F8_7GcBWlRGQ',$,'W2',$,$,$,$,$,$);
#5=IFCRELCONTAINEDINSPATIALSTRUCTURE('2TnxZkTXT08eDuMuhUUFNy',$,$,$,(#3,#4),#2);
ENDSEC;";

    fn model() -> Model {
        Model::from_step(StepFile::parse(CONTENT).unwrap())
    }

    #[test]
    fn by_type_includes_subtypes_in_instance_order() {
        let model = model();
        let ids: Vec<u64> = model.by_type("IfcWall").iter().map(Entity::id).collect();
        assert_eq!(ids, vec![3, 4]);
        assert_eq!(model.by_type("IfcWallStandardCase").len(), 1);
        assert!(model.by_type("IfcDoor").is_empty());
    }

    #[test]
    fn by_guid_resolves_rooted_instances() {
        let model = model();
        assert_eq!(model.by_guid("3Hr8c6SMz0rRs8SfIgSWdU").map(|e| e.id()), Some(2));
        assert!(model.by_guid("nope").is_none());
    }

    #[test]
    fn derives_containment_inverse() {
        let model = model();
        let storey = model.entity(2).unwrap();
        let rels: Vec<u64> = storey.contains_elements().iter().map(Entity::id).collect();
        assert_eq!(rels, vec![5]);
        assert!(model.entity(3).unwrap().contains_elements().is_empty());
    }
}
