//! Command-line interface: serve the web app, or run a one-off lookup.

use clap::{Parser, Subcommand};

use crate::entities::profile::ProfileService;
use crate::error::RepurposerError;

#[derive(Parser)]
#[command(name = "repurposer", version, about = "Drug-repurposing lookup service")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Run the HTTP server
    Serve {
        /// Bind address
        #[arg(long, default_value = "127.0.0.1")]
        host: String,
        /// Bind port
        #[arg(long, default_value_t = 8000)]
        port: u16,
    },
    /// Look up one drug and print its aggregated profile as JSON
    Lookup {
        /// Drug name to query
        name: String,
    },
}

pub async fn lookup(name: &str) -> Result<String, RepurposerError> {
    let name = name.trim();
    if name.is_empty() {
        return Err(RepurposerError::InvalidArgument(
            "drug name is required".into(),
        ));
    }
    let service = ProfileService::new()?;
    let profile = service.lookup(name).await;
    crate::render::json::to_pretty(&profile)
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn serve_defaults_bind_localhost() {
        let cli = Cli::parse_from(["repurposer", "serve"]);
        match cli.command {
            Commands::Serve { host, port } => {
                assert_eq!(host, "127.0.0.1");
                assert_eq!(port, 8000);
            }
            _ => panic!("expected serve command"),
        }
    }

    #[tokio::test]
    async fn lookup_rejects_empty_name() {
        let err = lookup("  ").await.unwrap_err();
        assert!(matches!(err, RepurposerError::InvalidArgument(_)));
    }
}
