use std::borrow::Cow;

use super::Model;
use crate::parser::schema;
use crate::parser::step::{StepEntity, StepValue};

/// Length of an encoded IFC GlobalId.
const GLOBAL_ID_LEN: usize = 22;

/// A borrowed view of one instance in a [`Model`].
#[derive(Clone, Copy)]
pub struct Entity<'a> {
    model: &'a Model,
    raw: &'a StepEntity,
}

impl std::fmt::Debug for Entity<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{}={}", self.raw.id, self.type_name())
    }
}

impl<'a> Entity<'a> {
    pub(crate) fn new(model: &'a Model, raw: &'a StepEntity) -> Self {
        Self { model, raw }
    }

    #[must_use]
    pub fn raw(&self) -> &'a StepEntity {
        self.raw
    }

    #[must_use]
    pub fn model(&self) -> &'a Model {
        self.model
    }

    #[must_use]
    pub fn id(&self) -> u64 {
        self.raw.id
    }

    /// Entity name in schema casing (`IfcWall`). Types unknown to the
    /// schema table keep the keyword from the file.
    #[must_use]
    pub fn type_name(&self) -> &'a str {
        schema::lookup(&self.raw.entity_type)
            .map_or(self.raw.entity_type.as_str(), |d| d.name)
    }

    /// Schema entity used for attribute names and `is_a` checks.
    ///
    /// Unknown types that start with a GlobalId are treated as rooted:
    /// relationships as `IfcRelationship`, everything else as
    /// `IfcObjectDefinition`.
    fn schema_type(&self) -> &'a str {
        let declared = self.raw.entity_type.as_str();
        if schema::lookup(declared).is_some() || !self.looks_rooted() {
            declared
        } else if declared.starts_with("IFCREL") {
            "IfcRelationship"
        } else {
            "IfcObjectDefinition"
        }
    }

    fn looks_rooted(&self) -> bool {
        matches!(self.raw.values.first(), Some(StepValue::String(s)) if s.len() == GLOBAL_ID_LEN)
    }

    /// True if this instance is of `type_name` or one of its subtypes.
    #[must_use]
    pub fn is_a(&self, type_name: &str) -> bool {
        self.raw.entity_type.eq_ignore_ascii_case(type_name)
            || schema::is_subtype_of(self.schema_type(), type_name)
    }

    #[must_use]
    pub fn attribute_count(&self) -> usize {
        self.raw.values.len()
    }

    /// Name of the attribute at `index`; positions the schema table does not
    /// cover are named `Attribute<index>`.
    #[must_use]
    pub fn attribute_name(&self, index: usize) -> Cow<'static, str> {
        match schema::attribute_names(self.schema_type()).get(index) {
            Some(name) => Cow::Borrowed(*name),
            None => Cow::Owned(format!("Attribute{index}")),
        }
    }

    /// Attribute names paired with their raw values, in declaration order.
    #[must_use]
    pub fn attributes(&self) -> Vec<(Cow<'static, str>, &'a StepValue)> {
        let names = schema::attribute_names(self.schema_type());
        self.raw
            .values
            .iter()
            .enumerate()
            .map(|(i, value)| {
                let name = names.get(i).map_or_else(
                    || Cow::Owned(format!("Attribute{i}")),
                    |n| Cow::Borrowed(*n),
                );
                (name, value)
            })
            .collect()
    }

    #[must_use]
    pub fn attribute(&self, name: &str) -> Option<&'a StepValue> {
        let index = schema::attribute_names(self.schema_type())
            .iter()
            .position(|n| *n == name)?;
        self.raw.values.get(index)
    }

    /// String value of `name`, `None` when null or not a string.
    #[must_use]
    pub fn string_attribute(&self, name: &str) -> Option<&'a str> {
        self.attribute(name).and_then(StepValue::as_str)
    }

    #[must_use]
    pub fn name(&self) -> Option<&'a str> {
        self.string_attribute("Name")
    }

    #[must_use]
    pub fn global_id(&self) -> Option<&'a str> {
        if !self.is_a("IfcRoot") {
            return None;
        }
        self.string_attribute("GlobalId").filter(|g| !g.is_empty())
    }

    pub(crate) fn references(&self, name: &str) -> Vec<u64> {
        self.attribute(name).map(StepValue::references).unwrap_or_default()
    }

    /// Instances referenced by attribute `name`, single or list valued.
    /// Dangling references are skipped.
    #[must_use]
    pub fn related(&self, name: &str) -> Vec<Entity<'a>> {
        self.references(name)
            .into_iter()
            .filter_map(|id| self.model.entity(id))
            .collect()
    }

    /// `IfcRelContainedInSpatialStructure` instances whose RelatingStructure is this one.
    #[must_use]
    pub fn contains_elements(&self) -> Vec<Entity<'a>> {
        self.inverse(|inv| &inv.contains_elements)
    }

    /// `IfcRelAggregates` instances whose RelatingObject is this one.
    #[must_use]
    pub fn is_decomposed_by(&self) -> Vec<Entity<'a>> {
        self.inverse(|inv| &inv.is_decomposed_by)
    }

    /// `IfcRelDefinesByType` and `IfcRelDefinesByProperties` instances that
    /// list this one among their RelatedObjects.
    #[must_use]
    pub fn is_defined_by(&self) -> Vec<Entity<'a>> {
        self.inverse(|inv| &inv.is_defined_by)
    }

    fn inverse(&self, pick: fn(&super::Inverses) -> &Vec<u64>) -> Vec<Entity<'a>> {
        let model = self.model;
        model
            .inverse_ids(self.raw.id, pick)
            .iter()
            .filter_map(|&id| model.entity(id))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::step::StepFile;
    use pretty_assertions::assert_eq;

    const CONTENT: &str = "DATA;
#1=IFCSITE('2bE4n0XQX5Kf$ppPsvDU3A',$,'Site',$,$,$,$,$,.ELEMENT.,$,$,$,$,$);
#2=IFCFLOWCONTROLLER('1Q6pOWK0z2TBAnKXPB7Njp',$,'Valve',$,$,$,$,$);
#3=IFCCARTESIANPOINT((0.,0.,0.));
#4=IFCOWNERHISTORY();
ENDSEC;";

    fn model() -> Model {
        Model::from_step(StepFile::parse(CONTENT).unwrap())
    }

    #[test]
    fn names_attributes_from_schema() {
        let model = model();
        let site = model.entity(1).unwrap();
        assert_eq!(site.type_name(), "IfcSite");
        assert_eq!(site.attribute_name(2), "Name");
        assert_eq!(site.attribute_name(8), "CompositionType");
        assert_eq!(site.name(), Some("Site"));
        assert_eq!(site.global_id(), Some("2bE4n0XQX5Kf$ppPsvDU3A"));
        assert!(site.is_a("IfcSpatialStructureElement"));
        assert!(site.is_a("IFCOBJECTDEFINITION"));
    }

    #[test]
    fn unknown_rooted_types_behave_like_object_definitions() {
        let model = model();
        let valve = model.entity(2).unwrap();
        assert_eq!(valve.type_name(), "IFCFLOWCONTROLLER");
        assert!(valve.is_a("IfcObjectDefinition"));
        assert!(valve.is_a("IfcFlowController"));
        assert_eq!(valve.name(), Some("Valve"));
        assert_eq!(valve.attribute_name(5), "Attribute5");
    }

    #[test]
    fn unknown_unrooted_types_have_positional_names() {
        let model = model();
        let point = model.entity(3).unwrap();
        assert!(!point.is_a("IfcRoot"));
        assert_eq!(point.global_id(), None);
        let names: Vec<String> = point
            .attributes()
            .into_iter()
            .map(|(name, _)| name.into_owned())
            .collect();
        assert_eq!(names, vec!["Attribute0"]);
    }

    #[test]
    fn empty_instances_have_no_attributes() {
        let model = model();
        let history = model.entity(4).unwrap();
        assert_eq!(history.attribute_count(), 0);
        assert!(history.attributes().is_empty());
        assert_eq!(history.name(), None);
    }
}
