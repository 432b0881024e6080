use clap::{Args, Parser, Subcommand, ValueEnum};

#[derive(Parser)]
#[command(name = "tpq")]
#[command(about = "Compose and run queries against the Trustpilot review API")]
#[command(version)]
#[command(after_help = "Examples:
  tpq query /v1/reviews/latest --limit 5                 # Latest five reviews
  tpq query /v1/business-units/ID/reviews --items-key reviews \\
      --filter stars=5 --order createdAt:desc --first      # Newest five-star review
  tpq query /v1/reviews/latest --offset 40 --dry-run     # Print the rendered query only
  tpq config set --url https://api.trustpilot.com        # Store the API base URL

Environment Variables:
  TPQ_URL       API base URL (overrides the config file)")]
pub struct Cli {
    /// Enable verbose output for debugging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Custom configuration directory path
    #[arg(long, global = true)]
    pub config_dir: Option<String>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Configuration management (show, set)
    Config {
        #[command(subcommand)]
        command: ConfigCommands,
    },
    /// Build a query for an endpoint and run it
    Query(QueryArgs),
}

#[derive(Subcommand, Debug)]
pub enum ConfigCommands {
    /// Show the current configuration
    Show,
    /// Set configuration values
    Set {
        /// API base URL
        #[arg(long)]
        url: Option<String>,
        /// HTTP timeout in seconds
        #[arg(long)]
        timeout: Option<u64>,
        /// Page size used when --limit is not given
        #[arg(long)]
        per_page: Option<u32>,
    },
}

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum OutputFormat {
    Table,
    Json,
}

/// Which terminal builder operation to run
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FetchMode {
    Page,
    All,
    First,
}

#[derive(Args, Debug)]
pub struct QueryArgs {
    /// Endpoint path, e.g. /v1/reviews/latest
    pub path: String,

    /// Name of the response field holding the result array
    #[arg(long, help_heading = "Endpoint Options")]
    pub items_key: Option<String>,

    /// Filter in key=value format (can be repeated)
    #[arg(long, action = clap::ArgAction::Append, help_heading = "Query Options")]
    pub filter: Vec<String>,

    /// Ordering in field:direction format (can be repeated, first wins ties)
    #[arg(long, action = clap::ArgAction::Append, help_heading = "Query Options")]
    pub order: Vec<String>,

    /// Items per page (1-100, anything else is ignored)
    #[arg(long, allow_negative_numbers = true, help_heading = "Pagination Options")]
    pub limit: Option<i64>,

    /// Page number (positive, anything else is ignored)
    #[arg(long, allow_negative_numbers = true, help_heading = "Pagination Options")]
    pub page: Option<i64>,

    /// Item offset, converted to a page (overrides --page)
    #[arg(long, allow_negative_numbers = true, help_heading = "Pagination Options")]
    pub offset: Option<i64>,

    /// Drop all pagination and fetch what the API returns by default
    #[arg(long, conflicts_with = "first", help_heading = "Pagination Options")]
    pub all: bool,

    /// Fetch a single item
    #[arg(long, help_heading = "Pagination Options")]
    pub first: bool,

    /// Print the rendered query as JSON instead of sending it
    #[arg(long, help_heading = "Output Options")]
    pub dry_run: bool,

    /// Output format
    #[arg(short, long, value_enum, default_value_t = OutputFormat::Table, help_heading = "Output Options")]
    pub format: OutputFormat,

    /// Display only specified columns (comma-separated names)
    #[arg(long, help_heading = "Output Options")]
    pub columns: Option<String>,
}

impl QueryArgs {
    pub fn fetch_mode(&self) -> FetchMode {
        if self.all {
            FetchMode::All
        } else if self.first {
            FetchMode::First
        } else {
            FetchMode::Page
        }
    }

    pub fn column_list(&self) -> Option<Vec<String>> {
        self.columns.as_ref().map(|columns| {
            columns
                .split(',')
                .map(str::trim)
                .filter(|name| !name.is_empty())
                .map(String::from)
                .collect()
        })
    }
}
