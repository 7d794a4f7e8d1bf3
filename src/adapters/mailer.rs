use crate::config::toml_config::{TRANSPORT_SENDMAIL, TRANSPORT_SMTP};
use crate::core::dispatch::CONTENT_TYPE;
use crate::domain::model::EmailMessage;
use crate::domain::ports::{ConfigProvider, MailTransport};
use crate::utils::error::Result;
use anyhow::{anyhow, Context};
use async_trait::async_trait;
use lettre::message::header::{ContentType, MIME_VERSION_1_0};
use lettre::message::{Mailbox, Mailboxes};
use lettre::{
    AsyncSendmailTransport, AsyncSmtpTransport, AsyncTransport as _, Message, Tokio1Executor,
};

enum Transport {
    Sendmail(AsyncSendmailTransport<Tokio1Executor>),
    Smtp(AsyncSmtpTransport<Tokio1Executor>),
}

/// Delivers summary mails through sendmail or an SMTP relay.
pub struct LettreMailer {
    transport: Transport,
}

impl LettreMailer {
    pub fn from_config<C: ConfigProvider + ?Sized>(config: &C) -> Result<Self> {
        let transport = config
            .find("mailer/transport")?
            .unwrap_or_else(|| TRANSPORT_SENDMAIL.to_string());

        let transport = match transport.as_str() {
            // 只有「未設定」才退回預設的 sendmail
            TRANSPORT_SENDMAIL => match config.find("mailer/sendmail_command")? {
                Some(command) => {
                    Transport::Sendmail(AsyncSendmailTransport::new_with_command(command))
                }
                None => Transport::Sendmail(AsyncSendmailTransport::new()),
            },
            TRANSPORT_SMTP => {
                let url = config.get("mailer/smtp_url")?;
                let transport = AsyncSmtpTransport::<Tokio1Executor>::from_url(&url)
                    .context("Parse mailer/smtp_url")?
                    .build();
                Transport::Smtp(transport)
            }
            other => return Err(anyhow!("Unknown mail transport \"{}\"", other).into()),
        };
        Ok(Self { transport })
    }
}

/// Converts the message into a lettre message; the subject gets RFC 2047 encoding as needed.
pub fn build_message(message: &EmailMessage) -> Result<Message> {
    let from: Mailbox = message
        .header("From")
        .ok_or_else(|| anyhow!("Message has no From header"))?
        .parse()
        .context("Parse sender address")?;
    let recipients: Mailboxes = message
        .to
        .parse()
        .with_context(|| format!("Parse recipient address \"{}\"", message.to))?;
    let content_type = ContentType::parse(message.header("Content-Type").unwrap_or(CONTENT_TYPE))
        .map_err(|e| anyhow!("Invalid Content-Type header: {}", e))?;

    let mut builder = Message::builder()
        .from(from)
        .subject(message.subject.clone())
        .header(MIME_VERSION_1_0)
        .header(content_type);
    for recipient in recipients {
        builder = builder.to(recipient);
    }

    Ok(builder
        .body(message.body.clone())
        .context("Build e-mail message")?)
}

#[async_trait]
impl MailTransport for LettreMailer {
    async fn send(&self, message: &EmailMessage) -> Result<()> {
        let email = build_message(message)?;
        match &self.transport {
            Transport::Sendmail(transport) => {
                transport.send(email).await.context("Send e-mail via sendmail")?;
            }
            Transport::Smtp(transport) => {
                transport.send(email).await.context("Send e-mail via SMTP")?;
            }
        }
        Ok(())
    }
}
