//! Human-readable text for raw attribute values.

use super::Model;
use crate::error::ValueError;
use crate::parser::step::StepValue;

/// Formats a raw value the way the viewer shows it.
///
/// Reals use the shortest round-trip form and keep a trailing `.0` when
/// integral (`12.0`, `3.5`). Null becomes an empty string. References are
/// shown as `#id=IfcType` and fail if the target is not in the model.
pub fn format_value(model: &Model, value: &StepValue) -> Result<String, ValueError> {
    Ok(match value {
        StepValue::String(s) => s.clone(),
        StepValue::Real(f) => format!("{f:?}"),
        StepValue::Integer(i) => i.to_string(),
        StepValue::Boolean(b) => if *b { "True" } else { "False" }.to_string(),
        StepValue::Enum(e) => e.clone(),
        StepValue::Reference(id) => {
            let entity = model
                .entity(*id)
                .ok_or(ValueError::UnresolvedReference { id: *id })?;
            format!("#{id}={}", entity.type_name())
        }
        StepValue::List(items) => {
            let parts = items
                .iter()
                .map(|item| format_value(model, item))
                .collect::<Result<Vec<_>, _>>()?;
            format!("({})", parts.join(", "))
        }
        StepValue::Null => String::new(),
        StepValue::Derived => "*".to_string(),
    })
}

/// Formats a `Unit` attribute: SI units as prefix plus name (`MILLIMETRE`),
/// named units by their Name, null as an empty string.
pub fn format_unit(model: &Model, value: &StepValue) -> Result<String, ValueError> {
    let Some(id) = value.as_reference() else {
        return format_value(model, value);
    };
    let unit = model
        .entity(id)
        .ok_or(ValueError::UnresolvedReference { id })?;

    if unit.is_a("IfcSIUnit") {
        let prefix = match unit.attribute("Prefix") {
            Some(StepValue::Enum(p)) => p.as_str(),
            _ => "",
        };
        let name = match unit.attribute("Name") {
            Some(StepValue::Enum(n)) => n.as_str(),
            _ => "",
        };
        return Ok(format!("{prefix}{name}"));
    }

    if unit.is_a("IfcConversionBasedUnit") || unit.is_a("IfcContextDependentUnit") {
        return Ok(unit.name().unwrap_or_default().to_string());
    }

    format_value(model, value)
}
