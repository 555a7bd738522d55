use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use docgraph_types::{Checksum256, Name, TimePoint};

#[derive(Parser)]
#[command(
    name = "docgraph",
    about = "Content-addressed document store",
    version
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// TOML configuration file
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Snapshot file backing the document table
    #[arg(long, global = true)]
    pub store: Option<PathBuf>,

    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[arg(long, global = true, default_value = "text")]
    pub format: OutputFormat,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}

#[derive(Subcommand)]
pub enum Command {
    /// Store new content; fails if the content is already stored
    Create(ContentArgs),
    /// Return the stored document for some content, creating it if needed
    GetOrCreate(ContentArgs),
    /// Load a document by hash or id
    Get(GetArgs),
    /// List stored documents
    List(ListArgs),
    /// Recompute and check every stored hash
    Verify,
    /// Print the canonical form and hash of some content
    Hash(HashArgs),
    /// Print the effective configuration
    Config,
}

#[derive(Args)]
pub struct ContentArgs {
    #[arg(long)]
    pub creator: Name,
    /// JSON file holding the content groups, or `-` for stdin
    #[arg(short, long)]
    pub file: PathBuf,
}

#[derive(Args)]
pub struct GetArgs {
    #[arg(required_unless_present = "id", conflicts_with = "id")]
    pub hash: Option<Checksum256>,
    #[arg(long)]
    pub id: Option<u64>,
}

#[derive(Args)]
pub struct ListArgs {
    #[arg(long)]
    pub creator: Option<Name>,
    /// Earliest creation time, e.g. 2020-10-16T14:02:32
    #[arg(long)]
    pub since: Option<TimePoint>,
    /// Latest creation time, inclusive to the second
    #[arg(long)]
    pub until: Option<TimePoint>,
}

#[derive(Args)]
pub struct HashArgs {
    #[arg(short, long)]
    pub file: PathBuf,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_create() {
        let cli =
            Cli::try_parse_from(["docgraph", "create", "--creator", "alice", "-f", "doc.json"])
                .unwrap();
        if let Command::Create(args) = cli.command {
            assert_eq!(args.creator.to_string(), "alice");
            assert_eq!(args.file, PathBuf::from("doc.json"));
        } else {
            panic!("wrong command");
        }
    }

    #[test]
    fn parse_rejects_invalid_creator() {
        assert!(
            Cli::try_parse_from(["docgraph", "create", "--creator", "Alice", "-f", "x"]).is_err()
        );
    }

    #[test]
    fn parse_get_or_create() {
        let cli =
            Cli::try_parse_from(["docgraph", "get-or-create", "--creator", "bob", "-f", "-"])
                .unwrap();
        assert!(matches!(cli.command, Command::GetOrCreate(_)));
    }

    #[test]
    fn parse_get_by_hash() {
        let hash = Checksum256::digest(b"x").to_hex();
        let cli = Cli::try_parse_from(["docgraph", "get", &hash]).unwrap();
        if let Command::Get(args) = cli.command {
            assert_eq!(args.hash.map(|h| h.to_hex()), Some(hash));
            assert_eq!(args.id, None);
        } else {
            panic!("wrong command");
        }
    }

    #[test]
    fn parse_get_by_id() {
        let cli = Cli::try_parse_from(["docgraph", "get", "--id", "3"]).unwrap();
        if let Command::Get(args) = cli.command {
            assert_eq!(args.id, Some(3));
        } else {
            panic!("wrong command");
        }
    }

    #[test]
    fn parse_get_needs_a_key() {
        assert!(Cli::try_parse_from(["docgraph", "get"]).is_err());
        assert!(Cli::try_parse_from(["docgraph", "get", "not-hex"]).is_err());
    }

    #[test]
    fn parse_list_filters() {
        let cli = Cli::try_parse_from([
            "docgraph",
            "list",
            "--creator",
            "alice",
            "--since",
            "2020-10-16T14:02:32",
        ])
        .unwrap();
        if let Command::List(args) = cli.command {
            assert_eq!(args.creator.map(|c| c.to_string()), Some("alice".into()));
            assert_eq!(args.since.map(|t| t.sec_since_epoch()), Some(1_602_856_952));
            assert!(args.until.is_none());
        } else {
            panic!("wrong command");
        }
    }

    #[test]
    fn parse_globals() {
        let cli = Cli::try_parse_from([
            "docgraph",
            "--store",
            "/tmp/s.json",
            "--format",
            "json",
            "-v",
            "verify",
        ])
        .unwrap();
        assert!(cli.verbose);
        assert_eq!(cli.format, OutputFormat::Json);
        assert_eq!(cli.store, Some(PathBuf::from("/tmp/s.json")));
        assert!(matches!(cli.command, Command::Verify));
    }

    #[test]
    fn parse_hash_and_config() {
        let cli = Cli::try_parse_from(["docgraph", "hash", "-f", "doc.json"]).unwrap();
        assert!(matches!(cli.command, Command::Hash(_)));
        let cli = Cli::try_parse_from(["docgraph", "--config", "dg.toml", "config"]).unwrap();
        assert_eq!(cli.config, Some(PathBuf::from("dg.toml")));
    }
}
