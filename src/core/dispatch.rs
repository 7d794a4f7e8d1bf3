use crate::domain::model::{Aggregate, EmailMessage, ReportBody};
use crate::domain::ports::{ConfigProvider, MailTransport};
use crate::utils::error::Result;

pub const MIME_VERSION: &str = "1.0";
pub const CONTENT_TYPE: &str = "text/plain; charset=utf-8";

/// 單一網域用 FQDN，其他情況（包含 0 個）用複數形式
pub fn compose_subject(report_subject: &str, aggregate: &Aggregate) -> String {
    match (&aggregate.current, aggregate.domain_count) {
        (Some(domain), 1) => format!("{} for {}", report_subject, domain.fqdn()),
        (_, count) => format!("{} for {} domains", report_subject, count),
    }
}

pub struct Dispatcher<'a, C: ConfigProvider + ?Sized, M: MailTransport + ?Sized> {
    config: &'a C,
    transport: &'a M,
}

impl<'a, C: ConfigProvider + ?Sized, M: MailTransport + ?Sized> Dispatcher<'a, C, M> {
    pub fn new(config: &'a C, transport: &'a M) -> Self {
        Self { config, transport }
    }

    pub fn build_message(
        &self,
        emailto: Option<&str>,
        subject: String,
        body: &ReportBody,
    ) -> Result<EmailMessage> {
        let to = match emailto {
            Some(to) => to.to_string(),
            None => self.config.get("mailer/default")?,
        };
        let headers = vec![
            ("From".to_string(), self.config.get("mailer/from")?),
            ("MIME-Version".to_string(), MIME_VERSION.to_string()),
            ("Content-Type".to_string(), CONTENT_TYPE.to_string()),
        ];

        Ok(EmailMessage {
            to,
            subject,
            headers,
            body: body.join_crlf(),
        })
    }

    /// Hands the message to the transport exactly once.
    pub async fn dispatch(
        &self,
        emailto: Option<&str>,
        subject: String,
        body: &ReportBody,
    ) -> Result<EmailMessage> {
        let message = self.build_message(emailto, subject, body)?;

        tracing::info!("📧 Sending \"{}\" to {}", message.subject, message.to);
        self.transport.send(&message).await?;

        Ok(message)
    }
}
