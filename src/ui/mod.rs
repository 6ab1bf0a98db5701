pub mod app;
pub mod panels;
pub mod tree_view;

pub use app::App;
pub use tree_view::TreeView;
