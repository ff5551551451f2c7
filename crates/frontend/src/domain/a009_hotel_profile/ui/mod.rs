pub mod list;

pub use list::HotelsManagement;
