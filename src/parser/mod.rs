pub mod ifc;
pub mod schema;
pub mod step;

pub use crate::error::ParseError;
pub use ifc::{load_if_present, open, parse_model};
pub use step::{StepEntity, StepFile, StepValue};
