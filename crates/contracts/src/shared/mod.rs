pub mod delete_flow;
pub mod indicators;
pub mod list_query;
pub mod query_cache;
pub mod sections;
