pub mod city_association;
pub mod list;

pub use city_association::TypeCityAssociation;
pub use list::ServiceTypesManagement;
