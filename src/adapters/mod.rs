// Adapters layer: concrete collaborators (aggregated data store, summary report, mail transport).

pub mod mailer;
pub mod report;
pub mod store;

pub use mailer::LettreMailer;
pub use report::{StoreReport, StoreReportFactory};
pub use store::JsonStore;
