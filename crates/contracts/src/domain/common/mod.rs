//! Common types and traits for all entity records

pub mod entity_record;
pub mod geo_point;
pub mod partner_status;
pub mod record_meta;

// Re-exports
pub use entity_record::{default_true, require_email, require_text, EntityRecord};
pub use geo_point::GeoPoint;
pub use partner_status::{PartnerAction, PartnerStatus, PartnerTransition};
pub use record_meta::RecordMeta;
