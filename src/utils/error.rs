use crate::domain::ports::ErrorFormatter;
use std::fmt::Write as _;
use thiserror::Error;

/// 兩層錯誤分類：使用者輸入錯誤 (Expected) 與系統錯誤 (System)
#[derive(Error, Debug)]
pub enum SummaryError {
    #[error("{message}")]
    Expected { message: String },

    #[error(transparent)]
    System(#[from] anyhow::Error),
}

impl SummaryError {
    pub fn expected(message: impl Into<String>) -> Self {
        Self::Expected {
            message: message.into(),
        }
    }

    pub fn missing_parameter(name: &str) -> Self {
        Self::expected(format!("Parameter \"{}\" is not specified", name))
    }

    pub fn domain_not_found(fqdn: &str) -> Self {
        Self::expected(format!("Domain \"{}\" does not exist", fqdn))
    }

    pub fn is_expected(&self) -> bool {
        matches!(self, Self::Expected { .. })
    }

    /// 兩種錯誤都以 1 結束，只有輸出格式不同
    pub fn exit_code(&self) -> u8 {
        match self {
            Self::Expected { .. } => 1,
            Self::System(_) => 1,
        }
    }

    /// Renders the error the way the top-level handler prints it.
    pub fn render(&self, formatter: &dyn ErrorFormatter) -> String {
        match self {
            Self::Expected { message } => format!("Error: {}", message),
            Self::System(cause) => formatter.format(cause),
        }
    }
}

pub type Result<T> = std::result::Result<T, SummaryError>;

/// Prints the error followed by every cause in its source chain.
#[derive(Debug, Default, Clone, Copy)]
pub struct ChainFormatter;

impl ErrorFormatter for ChainFormatter {
    fn format(&self, error: &anyhow::Error) -> String {
        let mut out = format!("Unexpected error: {}", error);
        for cause in error.chain().skip(1) {
            let _ = write!(out, "\n  caused by: {}", cause);
        }
        out
    }
}
