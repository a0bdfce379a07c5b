//! CLI command definitions and argument parsing

use std::path::PathBuf;

use clap::Parser;
use clap::Subcommand;

#[derive(Parser)]
#[command(name = "kbrag")]
#[command(about = "Knowledge-base question answering: ingest web pages and ask questions about them")]
#[command(version)]
pub struct Cli {
    /// Enable verbose debug logging
    #[arg(short, long)]
    pub verbose: bool,

    /// Path to a TOML configuration file (default: config.toml)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Start the HTTP API server
    Serve {
        /// Host address to bind to (overrides config)
        #[arg(long)]
        host: Option<String>,
        /// Port to listen on (overrides config)
        #[arg(short, long)]
        port: Option<u16>,
        /// Disable CORS
        #[arg(long)]
        no_cors: bool,
    },
    /// Fetch a web page and add it to the knowledge base
    Ingest {
        /// Page URL (http or https)
        url: String,
    },
    /// Ask a question
    Ask {
        /// The question
        #[arg(required = true, num_args = 1..)]
        query: Vec<String>,
    },
    /// List ingested documents
    List {
        /// Maximum number of documents to show
        #[arg(short, long, default_value = "50")]
        limit: usize,
    },
    /// Show knowledge base statistics
    Stats,
    /// Show current configuration
    Config,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_ask_joins_words() {
        let cli = Cli::parse_from(["kbrag", "ask", "what", "is", "gifting"]);
        match cli.command {
            Commands::Ask { query } => assert_eq!(query.join(" "), "what is gifting"),
            _ => panic!("expected ask"),
        }
    }

    #[test]
    fn test_parse_serve_flags() {
        let cli = Cli::parse_from(["kbrag", "-v", "serve", "--port", "9000", "--no-cors"]);
        assert!(cli.verbose);
        match cli.command {
            Commands::Serve {
                host,
                port,
                no_cors,
            } => {
                assert_eq!(host, None);
                assert_eq!(port, Some(9000));
                assert!(no_cors);
            }
            _ => panic!("expected serve"),
        }
    }

    #[test]
    fn test_parse_global_config_path() {
        let cli = Cli::parse_from(["kbrag", "stats", "--config", "custom.toml"]);
        assert_eq!(cli.config, Some(PathBuf::from("custom.toml")));
    }

    #[test]
    fn test_ask_requires_query() {
        assert!(Cli::try_parse_from(["kbrag", "ask"]).is_err());
    }
}
