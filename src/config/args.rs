use crate::utils::error::{Result, SummaryError};

/// `key=value` 形式的工作參數；未知的 key 與格式錯誤的 token 一律忽略
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ArgumentSet {
    pub domain: Option<String>,
    pub period: Option<String>,
    pub emailto: Option<String>,
}

impl ArgumentSet {
    /// Never fails. Later occurrences of a key overwrite earlier ones.
    pub fn parse<I, S>(tokens: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut args = Self::default();
        for token in tokens {
            let Some((key, value)) = token.as_ref().split_once('=') else {
                continue;
            };
            let slot = match key {
                "domain" => &mut args.domain,
                "period" => &mut args.period,
                "emailto" => &mut args.emailto,
                _ => continue,
            };
            *slot = Some(value.to_string());
        }
        args
    }

    pub fn domain(&self) -> Result<&str> {
        required("domain", self.domain.as_deref())
    }

    pub fn period(&self) -> Result<&str> {
        required("period", self.period.as_deref())
    }

    /// An empty `emailto=` falls back to the configured default.
    pub fn emailto(&self) -> Option<&str> {
        self.emailto.as_deref().filter(|to| !to.is_empty())
    }
}

fn required<'a>(name: &str, value: Option<&'a str>) -> Result<&'a str> {
    match value {
        Some(value) if !value.is_empty() => Ok(value),
        _ => Err(SummaryError::missing_parameter(name)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_recognized_keys() {
        let args = ArgumentSet::parse([
            "period=lastweek",
            "domain=a.com,b.com",
            "emailto=ops@example.org",
        ]);

        assert_eq!(args.domain().unwrap(), "a.com,b.com");
        assert_eq!(args.period().unwrap(), "lastweek");
        assert_eq!(args.emailto(), Some("ops@example.org"));
    }

    #[test]
    fn test_last_occurrence_wins() {
        let args = ArgumentSet::parse(["domain=first.org", "domain=second.org"]);
        assert_eq!(args.domain.as_deref(), Some("second.org"));
    }

    #[test]
    fn test_malformed_and_unknown_tokens_are_ignored() {
        let args = ArgumentSet::parse([
            "verbose",
            "format=html",
            "domain",
            "=x",
            "period=lastmonth",
        ]);

        assert_eq!(args.domain, None);
        assert_eq!(args.period.as_deref(), Some("lastmonth"));
        assert_eq!(args.emailto, None);
    }

    #[test]
    fn test_value_keeps_everything_after_first_equals() {
        let args = ArgumentSet::parse(["emailto=a=b@example.org"]);
        assert_eq!(args.emailto(), Some("a=b@example.org"));
    }

    #[test]
    fn test_empty_input_parses() {
        let args = ArgumentSet::parse(Vec::<String>::new());
        assert_eq!(args, ArgumentSet::default());
    }

    #[test]
    fn test_missing_or_empty_required_parameters() {
        let args = ArgumentSet::parse(["domain=", "emailto="]);

        let err = args.domain().unwrap_err();
        assert!(err.is_expected());
        assert_eq!(err.to_string(), "Parameter \"domain\" is not specified");
        assert_eq!(
            args.period().unwrap_err().to_string(),
            "Parameter \"period\" is not specified"
        );
        assert_eq!(args.emailto(), None);
    }
}
