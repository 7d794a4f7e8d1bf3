use crate::domain::model::Domain;
use crate::domain::ports::DomainRepository;
use crate::utils::error::{Result, SummaryError};

pub const ALL_DOMAINS: &str = "all";

pub struct DomainResolver<'a, R: DomainRepository + ?Sized> {
    repository: &'a R,
}

impl<'a, R: DomainRepository + ?Sized> DomainResolver<'a, R> {
    pub fn new(repository: &'a R) -> Self {
        Self { repository }
    }

    /// `all` 取得全部網域；否則依逗號切分，保留順序且不去重
    pub async fn resolve(&self, domain: &str) -> Result<Vec<Domain>> {
        if domain.is_empty() {
            return Err(SummaryError::missing_parameter("domain"));
        }

        if domain == ALL_DOMAINS {
            let domains = self.repository.list().await?;
            tracing::debug!("Repository listed {} domains", domains.len());
            return Ok(domains);
        }

        Ok(domain.split(',').map(Domain::new).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;

    struct FixedRepository(Vec<&'static str>);

    #[async_trait]
    impl DomainRepository for FixedRepository {
        async fn list(&self) -> Result<Vec<Domain>> {
            Ok(self.0.iter().map(|fqdn| Domain::known(*fqdn)).collect())
        }

        async fn exists(&self, fqdn: &str) -> Result<bool> {
            Ok(self.0.iter().any(|known| *known == fqdn))
        }
    }

    #[tokio::test]
    async fn test_all_keeps_repository_order() {
        let repo = FixedRepository(vec!["b.org", "a.org", "c.org"]);
        let domains = DomainResolver::new(&repo).resolve("all").await.unwrap();

        let names: Vec<&str> = domains.iter().map(Domain::fqdn).collect();
        assert_eq!(names, vec!["b.org", "a.org", "c.org"]);
    }

    #[tokio::test]
    async fn test_list_keeps_duplicates_and_order() {
        let repo = FixedRepository(vec![]);
        let domains = DomainResolver::new(&repo)
            .resolve("a.com,b.com,a.com")
            .await
            .unwrap();

        let names: Vec<&str> = domains.iter().map(Domain::fqdn).collect();
        assert_eq!(names, vec!["a.com", "b.com", "a.com"]);
    }

    #[tokio::test]
    async fn test_empty_domain_is_user_error() {
        let repo = FixedRepository(vec!["a.org"]);
        let err = DomainResolver::new(&repo).resolve("").await.unwrap_err();

        assert!(err.is_expected());
        assert_eq!(err.to_string(), "Parameter \"domain\" is not specified");
    }

    #[tokio::test]
    async fn test_all_with_no_domains_is_empty() {
        let repo = FixedRepository(vec![]);
        let domains = DomainResolver::new(&repo).resolve("all").await.unwrap();
        assert!(domains.is_empty());
    }
}
