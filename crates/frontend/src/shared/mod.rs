pub mod api;
pub mod api_utils;
pub mod components;
pub mod crud;
pub mod date_utils;
pub mod dialogs;
pub mod format;
pub mod icons;
pub mod list_utils;
pub mod lookups;
pub mod modal_frame;
pub mod modal_stack;
pub mod page_frame;
pub mod polling;
pub mod query_cache;
pub mod storage;
pub mod toast;
