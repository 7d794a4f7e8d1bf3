use crate::domain::ports::DomainRepository;
use crate::utils::error::Result;

/// 以 FQDN 識別的網域；存在與否延遲到第一次查詢時才確認
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Domain {
    fqdn: String,
    exists: Option<bool>,
}

impl Domain {
    pub fn new(fqdn: impl Into<String>) -> Self {
        Self {
            fqdn: fqdn.into(),
            exists: None,
        }
    }

    /// A handle for a domain the repository has already listed.
    pub fn known(fqdn: impl Into<String>) -> Self {
        Self {
            fqdn: fqdn.into(),
            exists: Some(true),
        }
    }

    pub fn fqdn(&self) -> &str {
        &self.fqdn
    }

    /// Asks the repository at most once per handle.
    pub async fn exists<R: DomainRepository + ?Sized>(&mut self, repository: &R) -> Result<bool> {
        if let Some(exists) = self.exists {
            return Ok(exists);
        }
        let exists = repository.exists(&self.fqdn).await?;
        self.exists = Some(exists);
        Ok(exists)
    }
}

/// Ordered, append-only lines of the mail body.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReportBody {
    lines: Vec<String>,
}

impl ReportBody {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, line: impl Into<String>) {
        self.lines.push(line.into());
    }

    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    pub fn join_crlf(&self) -> String {
        self.lines.join("\r\n")
    }
}

impl Extend<String> for ReportBody {
    fn extend<I: IntoIterator<Item = String>>(&mut self, iter: I) {
        self.lines.extend(iter);
    }
}

/// 聚合結果：郵件內容、網域數量與迴圈結束時的「目前」網域
#[derive(Debug, Clone)]
pub struct Aggregate {
    pub body: ReportBody,
    pub domain_count: usize,
    pub current: Option<Domain>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmailMessage {
    pub to: String,
    pub subject: String,
    pub headers: Vec<(String, String)>,
    pub body: String,
}

impl EmailMessage {
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(key, _)| key.eq_ignore_ascii_case(name))
            .map(|(_, value)| value.as_str())
    }
}
