use clap::Parser;
use std::path::PathBuf;

/// CGI 環境變數；只要出現其中之一就代表是經由 web server 呼叫
const WEB_CONTEXT_VARS: [&str; 3] = ["GATEWAY_INTERFACE", "REQUEST_METHOD", "SERVER_SOFTWARE"];

#[derive(Debug, Clone, Parser)]
#[command(name = "dmarc-summary")]
#[command(about = "Emails a DMARC summary report for one or more domains")]
pub struct CliConfig {
    /// Path to TOML configuration file
    #[arg(short, long, default_value = "/etc/dmarc-summary/config.toml")]
    pub config: PathBuf,

    #[arg(short, long, help = "Enable verbose output")]
    pub verbose: bool,

    #[arg(long, help = "Emit logs as JSON lines")]
    pub json_logs: bool,

    /// domain=<all|fqdn[,fqdn...]> period=<lastmonth|lastweek|lastndays:N> [emailto=<address>]
    #[arg(value_name = "KEY=VALUE", trailing_var_arg = true, allow_hyphen_values = true)]
    pub params: Vec<String>,
}

/// Returns `false` when the process was started from a web server.
pub fn is_cli_context<F>(lookup: F) -> bool
where
    F: Fn(&str) -> Option<String>,
{
    !WEB_CONTEXT_VARS.iter().any(|var| lookup(var).is_some())
}
