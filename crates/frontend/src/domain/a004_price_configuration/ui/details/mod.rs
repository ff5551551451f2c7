pub mod view;
pub mod view_model;

pub use view::PriceEditor;
pub use view_model::PriceEditorViewModel;
