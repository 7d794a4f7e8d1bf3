use crate::config::ArgumentSet;
use crate::core::aggregator::ReportAggregator;
use crate::core::dispatch::{compose_subject, Dispatcher};
use crate::core::resolver::DomainResolver;
use crate::domain::model::EmailMessage;
use crate::domain::ports::{
    ConfigProvider, DomainRepository, MailTransport, ReportFactory, SummaryReport,
};
use crate::utils::error::Result;

/// 參數 → 網域解析 → 報表聚合 → 主旨 → 寄送
pub struct SummaryJob<R, F, C, M> {
    repository: R,
    reports: F,
    config: C,
    transport: M,
}

impl<R, F, C, M> SummaryJob<R, F, C, M>
where
    R: DomainRepository,
    F: ReportFactory,
    C: ConfigProvider,
    M: MailTransport,
{
    pub fn new(repository: R, reports: F, config: C, transport: M) -> Self {
        Self {
            repository,
            reports,
            config,
            transport,
        }
    }

    pub fn transport(&self) -> &M {
        &self.transport
    }

    /// Runs one invocation. Nothing is sent unless every step succeeds.
    pub async fn run(&self, args: &ArgumentSet) -> Result<EmailMessage> {
        let domain = args.domain()?;
        let period = args.period()?;

        let domains = DomainResolver::new(&self.repository).resolve(domain).await?;
        tracing::info!("Resolved {} domain(s) for period {}", domains.len(), period);

        let mut report = self.reports.create(period)?;
        let aggregate = ReportAggregator::new(&self.repository)
            .aggregate(domains, &mut report)
            .await?;
        tracing::debug!("Report body has {} lines", aggregate.body.len());

        let subject = compose_subject(&report.subject(), &aggregate);
        let message = Dispatcher::new(&self.config, &self.transport)
            .dispatch(args.emailto(), subject, &aggregate.body)
            .await?;

        tracing::info!("✅ Summary for {} domain(s) sent", aggregate.domain_count);
        Ok(message)
    }
}
