pub mod list;

pub use list::PromoCodesManagement;
