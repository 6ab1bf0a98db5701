pub mod objects;
pub mod properties;
pub mod row;

pub use objects::build_object_tree;
pub use properties::build_property_panel;
pub use row::DisplayRow;
