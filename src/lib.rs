//! # IFC Tree View
//!
//! A terminal-based viewer for the object hierarchy of IFC files.
//!
//! ## Features
//!
//! - Parse IFC files (IFC2x3 and IFC4 schemas)
//! - Browse the spatial structure: project, site, building, storeys and
//!   the elements they contain or aggregate
//! - Inspect attributes, type, property sets and quantity sets of the
//!   selected objects
//! - Dump either tree as JSON or CSV
//!
//! ## Example
//!
//! ```no_run
//! use ifc_treeview::parser::open;
//! use ifc_treeview::tree::{build_object_tree, build_property_panel};
//!
//! let model = open("model.ifc").expect("Failed to parse");
//! let tree = build_object_tree(&model);
//! let panel = build_property_panel(&model, &tree.children);
//! println!("{} projects, {} panel sections", tree.children.len(), panel.len());
//! ```

pub mod dump;
pub mod error;
pub mod model;
pub mod parser;
pub mod tree;
pub mod ui;
