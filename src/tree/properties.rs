//! Property panel: attributes, type, property sets and quantity sets of
//! the objects selected in the object tree.

use super::DisplayRow;
use crate::error::ValueError;
use crate::model::{format_unit, format_value, Entity, Model};

/// Column headers of the property panel.
pub const PROPERTY_HEADERS: [&str; 3] = ["Property", "Value", "GlobalId"];

/// Properties the panel knows how to show.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PropertyKind {
    SingleValue,
    Other,
}

impl PropertyKind {
    #[must_use]
    pub fn of(property: &Entity<'_>) -> Self {
        if property.is_a("IfcPropertySingleValue") {
            PropertyKind::SingleValue
        } else {
            PropertyKind::Other
        }
    }
}

/// Quantities with a dedicated value attribute.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuantityKind {
    Length,
    Area,
    Volume,
    Count,
    Other,
}

impl QuantityKind {
    #[must_use]
    pub fn of(quantity: &Entity<'_>) -> Self {
        if quantity.is_a("IfcQuantityLength") {
            QuantityKind::Length
        } else if quantity.is_a("IfcQuantityArea") {
            QuantityKind::Area
        } else if quantity.is_a("IfcQuantityVolume") {
            QuantityKind::Volume
        } else if quantity.is_a("IfcQuantityCount") {
            QuantityKind::Count
        } else {
            QuantityKind::Other
        }
    }

    /// Attribute holding the measured value; `None` for kinds shown without one.
    #[must_use]
    pub fn value_attribute(self) -> Option<&'static str> {
        match self {
            QuantityKind::Length => Some("LengthValue"),
            QuantityKind::Area => Some("AreaValue"),
            QuantityKind::Volume => Some("VolumeValue"),
            QuantityKind::Count => Some("CountValue"),
            QuantityKind::Other => None,
        }
    }
}

/// Values that cannot be turned into text are shown as an empty cell.
#[must_use]
pub fn or_empty(text: Result<String, ValueError>) -> String {
    text.unwrap_or_default()
}

/// Builds the property panel for the selected object rows.
///
/// Rows are processed in selection order. The first row without a GlobalId,
/// or whose GlobalId is not in the model, ends the batch: the sections built
/// so far are returned and later rows are ignored.
pub fn build_property_panel<'r>(
    model: &Model,
    selection: impl IntoIterator<Item = &'r DisplayRow>,
) -> Vec<DisplayRow> {
    let mut rows = Vec::new();

    for selected in selection {
        let Some(global_id) = selected.global_id() else {
            tracing::debug!(label = %selected.label, "selected row has no GlobalId, stopping");
            break;
        };
        let Some(entity) = model.by_guid(global_id) else {
            tracing::debug!(global_id, "GlobalId not in model, stopping");
            break;
        };

        rows.extend(entity_sections(entity));
    }

    rows
}

/// Top-level panel rows for one object: its attributes, then one row per
/// type and property definition it is defined by.
#[must_use]
pub fn entity_sections(entity: Entity<'_>) -> Vec<DisplayRow> {
    let mut rows = vec![attribute_section(entity)];

    for definition in entity.is_defined_by() {
        if definition.is_a("IfcRelDefinesByType") {
            for type_object in definition.related("RelatingType") {
                rows.push(header_row(type_object));
            }
        } else if definition.is_a("IfcRelDefinesByProperties") {
            for property_definition in definition.related("RelatingPropertyDefinition") {
                if let Some(section) = property_definition_section(property_definition) {
                    rows.push(section);
                }
            }
        }
    }

    rows
}

/// `Attributes` row with one child per explicit attribute.
#[must_use]
pub fn attribute_section(entity: Entity<'_>) -> DisplayRow {
    let model = entity.model();
    let children = entity
        .attributes()
        .into_iter()
        .map(|(name, value)| DisplayRow::new(name, or_empty(format_value(model, value)), ""))
        .collect();

    DisplayRow::new("Attributes", "", entity.global_id().unwrap_or_default())
        .with_children(children)
}

fn header_row(entity: Entity<'_>) -> DisplayRow {
    DisplayRow::new(
        entity.name().unwrap_or_default(),
        entity.type_name(),
        entity.global_id().unwrap_or_default(),
    )
}

fn property_definition_section(definition: Entity<'_>) -> Option<DisplayRow> {
    if definition.is_a("IfcPropertySet") {
        let children = definition
            .related("HasProperties")
            .into_iter()
            .filter_map(property_row)
            .collect();
        Some(header_row(definition).with_children(children))
    } else if definition.is_a("IfcElementQuantity") {
        let children = definition
            .related("Quantities")
            .into_iter()
            .map(quantity_row)
            .collect();
        Some(header_row(definition).with_children(children))
    } else {
        None
    }
}

fn property_row(property: Entity<'_>) -> Option<DisplayRow> {
    match PropertyKind::of(&property) {
        PropertyKind::SingleValue => Some(DisplayRow::new(
            property.name().unwrap_or_default(),
            or_empty(attribute_text(property, "NominalValue")),
            or_empty(unit_text(property)),
        )),
        PropertyKind::Other => None,
    }
}

fn quantity_row(quantity: Entity<'_>) -> DisplayRow {
    let value = match QuantityKind::of(&quantity).value_attribute() {
        Some(attribute) => or_empty(attribute_text(quantity, attribute)),
        None => String::new(),
    };

    DisplayRow::new(
        quantity.name().unwrap_or_default(),
        value,
        or_empty(unit_text(quantity)),
    )
}

fn attribute_text(entity: Entity<'_>, name: &str) -> Result<String, ValueError> {
    match entity.attribute(name) {
        Some(value) => format_value(entity.model(), value),
        None => Ok(String::new()),
    }
}

fn unit_text(entity: Entity<'_>) -> Result<String, ValueError> {
    match entity.attribute("Unit") {
        Some(value) => format_unit(entity.model(), value),
        None => Ok(String::new()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::parse_model;
    use pretty_assertions::assert_eq;

    #[test]
    fn unprintable_values_become_empty() {
        let model = parse_model(
            "DATA;
#1=IFCWALL('2O2Fr$t4X7Zf8NOew3FLOH',#404,'W',$,$,$,$,'T',.STANDARD.);
ENDSEC;",
        )
        .unwrap();

        let section = attribute_section(model.entity(1).unwrap());
        assert_eq!(section.children[1].columns(), ("OwnerHistory", "", ""));
        assert_eq!(section.children[2].columns(), ("Name", "W", ""));
    }

    #[test]
    fn quantity_kinds_map_to_value_attributes() {
        assert_eq!(QuantityKind::Area.value_attribute(), Some("AreaValue"));
        assert_eq!(QuantityKind::Count.value_attribute(), Some("CountValue"));
        assert_eq!(QuantityKind::Other.value_attribute(), None);
    }
}
