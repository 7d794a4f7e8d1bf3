use crate::utils::error::Result;
use anyhow::anyhow;
use lettre::message::Mailbox;

pub trait Validate {
    fn validate(&self) -> Result<()>;
}

fn invalid(field_name: &str, value: &str, reason: &str) -> crate::utils::error::SummaryError {
    anyhow!(
        "Invalid configuration value for {}: \"{}\" ({})",
        field_name,
        value,
        reason
    )
    .into()
}

pub fn validate_not_empty(field_name: &str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(invalid(field_name, value, "value cannot be empty"));
    }
    Ok(())
}

/// Accepts `user@host` as well as `Display Name <user@host>`.
pub fn validate_mailbox(field_name: &str, value: &str) -> Result<()> {
    validate_not_empty(field_name, value)?;
    value
        .parse::<Mailbox>()
        .map(|_| ())
        .map_err(|e| invalid(field_name, value, &format!("invalid mailbox: {}", e)))
}

pub fn validate_path(field_name: &str, path: &str) -> Result<()> {
    if path.is_empty() {
        return Err(invalid(field_name, path, "path cannot be empty"));
    }

    if path.contains('\0') {
        return Err(invalid(field_name, path, "path contains null bytes"));
    }

    Ok(())
}

pub fn validate_one_of(field_name: &str, value: &str, allowed: &[&str]) -> Result<()> {
    if !allowed.contains(&value) {
        return Err(invalid(
            field_name,
            value,
            &format!("supported values: {}", allowed.join(", ")),
        ));
    }
    Ok(())
}
