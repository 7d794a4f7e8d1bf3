use crate::domain::model::{Aggregate, Domain, ReportBody};
use crate::domain::ports::{DomainRepository, SummaryReport};
use crate::utils::error::{Result, SummaryError};

pub const SEPARATOR: &str = "-----------------------------------";

pub struct ReportAggregator<'a, R: DomainRepository + ?Sized> {
    repository: &'a R,
}

impl<'a, R: DomainRepository + ?Sized> ReportAggregator<'a, R> {
    pub fn new(repository: &'a R) -> Self {
        Self { repository }
    }

    /// Builds one body out of every domain's report, in order.
    ///
    /// A single missing domain aborts the run. With several domains a missing
    /// one is annotated in the body and the run continues. `current` is the
    /// last domain iterated.
    pub async fn aggregate<S: SummaryReport>(
        &self,
        domains: Vec<Domain>,
        report: &mut S,
    ) -> Result<Aggregate> {
        let domain_count = domains.len();
        let mut body = ReportBody::new();
        let mut current = None;

        for (index, mut domain) in domains.into_iter().enumerate() {
            // 分隔線在檢查網域之前加入
            if index > 0 {
                body.push(SEPARATOR);
                body.push("");
            }

            if domain.exists(self.repository).await? {
                tracing::debug!("Rendering summary for {}", domain.fqdn());
                let lines = report.bind(&domain).text().await?;
                body.extend(lines);
            } else {
                if domain_count == 1 {
                    return Err(SummaryError::domain_not_found(domain.fqdn()));
                }
                tracing::warn!("⚠️ Domain {} does not exist, skipping", domain.fqdn());
                body.push(format!("# Domain \"{}\" does not exist", domain.fqdn()));
                body.push("");
            }

            current = Some(domain);
        }

        Ok(Aggregate {
            body,
            domain_count,
            current,
        })
    }
}
