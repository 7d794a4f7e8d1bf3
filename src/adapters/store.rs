use crate::domain::model::Domain;
use crate::domain::period::DateRange;
use crate::domain::ports::DomainRepository;
use crate::utils::error::Result;
use anyhow::Context;
use async_trait::async_trait;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::sync::Arc;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StoreData {
    #[serde(default)]
    pub domains: Vec<DomainData>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DomainData {
    pub fqdn: String,
    #[serde(default)]
    pub days: Vec<DayStats>,
}

/// 一天份已彙整的 DMARC 統計
/// `date` 為必要欄位，其餘計數缺省為 0
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DayStats {
    pub date: NaiveDate,
    #[serde(default)]
    pub reports: u64,
    #[serde(default)]
    pub organizations: Vec<String>,
    #[serde(default)]
    pub total: u64,
    #[serde(default)]
    pub aligned: u64,
    #[serde(default)]
    pub dkim_only: u64,
    #[serde(default)]
    pub spf_only: u64,
    #[serde(default)]
    pub quarantined: u64,
    #[serde(default)]
    pub rejected: u64,
}

/// Read-only view over the aggregated data file. Clones share the data.
#[derive(Debug, Clone, Default)]
pub struct JsonStore {
    data: Arc<StoreData>,
}

impl JsonStore {
    pub fn from_data(data: StoreData) -> Self {
        Self {
            data: Arc::new(data),
        }
    }

    pub async fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = tokio::fs::read(path)
            .await
            .with_context(|| format!("Read data file {}", path.display()))?;
        let data: StoreData = serde_json::from_slice(&content)
            .with_context(|| format!("Parse data file {}", path.display()))?;

        tracing::debug!(
            "Loaded {} domains from {}",
            data.domains.len(),
            path.display()
        );
        Ok(Self::from_data(data))
    }

    fn find(&self, fqdn: &str) -> Option<&DomainData> {
        let wanted = normalize(fqdn);
        self.data
            .domains
            .iter()
            .find(|domain| normalize(&domain.fqdn) == wanted)
    }

    /// Day rows of `fqdn` that fall inside `range`.
    pub fn days(&self, fqdn: &str, range: &DateRange) -> Vec<DayStats> {
        self.find(fqdn)
            .map(|domain| {
                domain
                    .days
                    .iter()
                    .filter(|day| range.contains(day.date))
                    .cloned()
                    .collect()
            })
            .unwrap_or_default()
    }
}

fn normalize(fqdn: &str) -> String {
    fqdn.strip_suffix('.').unwrap_or(fqdn).to_ascii_lowercase()
}

#[async_trait]
impl DomainRepository for JsonStore {
    async fn list(&self) -> Result<Vec<Domain>> {
        Ok(self
            .data
            .domains
            .iter()
            .map(|domain| Domain::known(domain.fqdn.clone()))
            .collect())
    }

    async fn exists(&self, fqdn: &str) -> Result<bool> {
        Ok(self.find(fqdn).is_some())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    const DATA: &str = r#"{
        "domains": [
            {"fqdn": "b.example", "days": [
                {"date": "2026-10-10", "total": 10, "aligned": 9},
                {"date": "2026-10-12", "total": 5, "aligned": 5},
                {"date": "2026-10-19", "total": 7}
            ]},
            {"fqdn": "A.Example"}
        ]
    }"#;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    async fn store() -> JsonStore {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(DATA.as_bytes()).unwrap();
        JsonStore::load(file.path()).await.unwrap()
    }

    #[tokio::test]
    async fn test_list_preserves_file_order() {
        let store = store().await;
        let domains = store.list().await.unwrap();

        let names: Vec<&str> = domains.iter().map(Domain::fqdn).collect();
        assert_eq!(names, vec!["b.example", "A.Example"]);
    }

    #[tokio::test]
    async fn test_exists_ignores_case_and_trailing_dot() {
        let store = store().await;

        assert!(store.exists("a.example").await.unwrap());
        assert!(store.exists("b.example.").await.unwrap());
        assert!(!store.exists("c.example").await.unwrap());
    }

    #[tokio::test]
    async fn test_days_filters_by_range() {
        let store = store().await;
        let range = DateRange {
            from: date(2026, 10, 10),
            to: date(2026, 10, 18),
        };

        let days = store.days("b.example", &range);
        assert_eq!(days.len(), 2);
        assert_eq!(days[0].total, 10);
        assert_eq!(days[1].date, date(2026, 10, 12));
        assert!(store.days("missing.example", &range).is_empty());
    }

    #[tokio::test]
    async fn test_load_errors_are_system_errors() {
        let err = JsonStore::load("/nonexistent/dmarc/summary.json")
            .await
            .unwrap_err();
        assert!(!err.is_expected());

        let mut file = NamedTempFile::new().unwrap();
        file.write_all(b"{not json").unwrap();
        let err = JsonStore::load(file.path()).await.unwrap_err();
        assert!(err.to_string().starts_with("Parse data file"));

        // 缺少 date 的資料列不可默默變成 1970-01-01
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(br#"{"domains":[{"fqdn":"a.com","days":[{"total":50,"aligned":50}]}]}"#)
            .unwrap();
        let err = JsonStore::load(file.path()).await.unwrap_err();
        assert!(!err.is_expected());
        assert!(err.to_string().starts_with("Parse data file"));
    }
}
