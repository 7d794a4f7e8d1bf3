use crate::adapters::store::{DayStats, JsonStore};
use crate::domain::model::Domain;
use crate::domain::period::{DateRange, Period};
use crate::domain::ports::{ReportFactory, ReportLines, SummaryReport};
use crate::utils::error::Result;
use anyhow::anyhow;
use async_trait::async_trait;
use chrono::NaiveDate;
use std::collections::BTreeSet;

/// Builds summary reports over a [`JsonStore`] relative to a fixed day.
#[derive(Debug, Clone)]
pub struct StoreReportFactory {
    store: JsonStore,
    today: NaiveDate,
}

impl StoreReportFactory {
    pub fn new(store: JsonStore) -> Self {
        Self::with_today(store, chrono::Local::now().date_naive())
    }

    pub fn with_today(store: JsonStore, today: NaiveDate) -> Self {
        Self { store, today }
    }
}

impl ReportFactory for StoreReportFactory {
    type Report = StoreReport;

    fn create(&self, period: &str) -> Result<StoreReport> {
        let period: Period = period.parse()?;
        Ok(StoreReport {
            store: self.store.clone(),
            range: period.range(self.today),
            period,
            domain: None,
        })
    }
}

#[derive(Debug, Clone)]
pub struct StoreReport {
    store: JsonStore,
    period: Period,
    range: DateRange,
    domain: Option<String>,
}

#[async_trait]
impl SummaryReport for StoreReport {
    fn bind(&mut self, domain: &Domain) -> &mut Self {
        self.domain = Some(domain.fqdn().to_string());
        self
    }

    async fn text(&self) -> Result<ReportLines> {
        let fqdn = self
            .domain
            .clone()
            .ok_or_else(|| anyhow!("Summary report is not bound to a domain"))?;
        let days = self.store.days(&fqdn, &self.range);
        let summary = Summary::collect(&days);

        let header = vec![
            format!("# Domain: {}", fqdn),
            format!(" Range: {}", self.range),
            String::new(),
        ];
        Ok(Box::new(header.into_iter().chain(summary.into_lines())))
    }

    fn subject(&self) -> String {
        format!("DMARC summary report ({})", self.period.label())
    }
}

#[derive(Debug, Default)]
struct Summary {
    days: usize,
    total: u64,
    aligned: u64,
    partial: u64,
    quarantined: u64,
    rejected: u64,
    reports: u64,
    organizations: usize,
}

impl Summary {
    fn collect(days: &[DayStats]) -> Self {
        let mut summary = Summary {
            days: days.len(),
            ..Default::default()
        };
        let mut organizations = BTreeSet::new();
        for day in days {
            summary.total += day.total;
            summary.aligned += day.aligned;
            summary.partial += day.dkim_only + day.spf_only;
            summary.quarantined += day.quarantined;
            summary.rejected += day.rejected;
            summary.reports += day.reports;
            organizations.extend(day.organizations.iter().map(|o| o.to_ascii_lowercase()));
        }
        summary.organizations = organizations.len();
        summary
    }

    fn into_lines(self) -> Box<dyn Iterator<Item = String> + Send> {
        if self.days == 0 {
            return Box::new(
                [" No data for the period".to_string(), String::new()].into_iter(),
            );
        }

        let not_aligned = self
            .total
            .saturating_sub(self.aligned)
            .saturating_sub(self.partial);
        let total = self.total;
        let counted = move |name: &str, value: u64| {
            format!(" {}: {} ({})", name, value, percent(value, total))
        };

        Box::new(
            vec![
                "## Summary".to_string(),
                format!(" Total: {}", total),
                counted("Fully aligned", self.aligned),
                counted("Partially aligned", self.partial),
                counted("Not aligned", not_aligned),
                counted("Quarantined", self.quarantined),
                counted("Rejected", self.rejected),
                String::new(),
                "## Reports".to_string(),
                format!(" Reports: {}", self.reports),
                format!(" Reporting organizations: {}", self.organizations),
                String::new(),
            ]
            .into_iter(),
        )
    }
}

fn percent(part: u64, total: u64) -> String {
    if total == 0 {
        return "0%".to_string();
    }
    format!("{:.0}%", part as f64 * 100.0 / total as f64)
}
