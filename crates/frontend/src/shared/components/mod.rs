pub mod badge;
pub mod banner;
pub mod stat_card;
