pub mod aggregator;
pub mod dispatch;
pub mod resolver;
pub mod summary;
