pub mod d400_today_summary;
pub mod d401_ride_analytics;
