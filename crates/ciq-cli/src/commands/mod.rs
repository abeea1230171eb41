pub mod config;
pub mod dispatch;
pub mod plan;
pub mod schema;
pub mod score;
pub mod slug;
