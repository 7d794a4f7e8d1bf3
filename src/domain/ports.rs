use crate::domain::model::{Domain, EmailMessage};
use crate::utils::error::Result;
use async_trait::async_trait;

/// Lazily produced report lines, consumed exactly once.
pub type ReportLines = Box<dyn Iterator<Item = String> + Send>;

#[async_trait]
pub trait DomainRepository: Send + Sync {
    async fn list(&self) -> Result<Vec<Domain>>;
    async fn exists(&self, fqdn: &str) -> Result<bool>;
}

pub trait ReportFactory: Send + Sync {
    type Report: SummaryReport;

    /// 期間字串的驗證完全交給報表端
    fn create(&self, period: &str) -> Result<Self::Report>;
}

#[async_trait]
pub trait SummaryReport: Send + Sync {
    fn bind(&mut self, domain: &Domain) -> &mut Self
    where
        Self: Sized;
    async fn text(&self) -> Result<ReportLines>;
    fn subject(&self) -> String;
}

#[async_trait]
pub trait MailTransport: Send + Sync {
    async fn send(&self, message: &EmailMessage) -> Result<()>;
}

pub trait ConfigProvider: Send + Sync {
    /// `Ok(None)` 代表未設定；其他讀取問題（例如非純量值）回傳錯誤
    fn find(&self, key: &str) -> Result<Option<String>>;

    fn get(&self, key: &str) -> Result<String> {
        self.find(key)?.ok_or_else(|| {
            anyhow::anyhow!("Configuration key \"{}\" is not set", key).into()
        })
    }
}

pub trait ErrorFormatter {
    fn format(&self, error: &anyhow::Error) -> String;
}
