use clap::{Parser, Subcommand};

#[derive(Debug, Parser)]
#[command(name = "journal-tui")]
#[command(about = "Terminal client for the journal service")]
pub struct Cli {
    /// Override the configured service URL
    #[arg(long, global = true)]
    pub api_url: Option<String>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Run against the configured journal service (default)
    Run,
    /// Run against a seeded in-memory service
    Dev,
    /// Ping the service's health endpoint and exit
    Health,
    /// Print config path and create default file if missing
    ConfigPath,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn no_subcommand_means_run() {
        let cli = Cli::try_parse_from(["journal-tui"]).unwrap();
        assert!(cli.command.is_none());
        assert!(cli.api_url.is_none());
    }

    #[test]
    fn api_url_flag_is_accepted_after_subcommand() {
        let cli =
            Cli::try_parse_from(["journal-tui", "health", "--api-url", "http://x:1"]).unwrap();
        assert!(matches!(cli.command, Some(Commands::Health)));
        assert_eq!(cli.api_url.as_deref(), Some("http://x:1"));
    }
}
