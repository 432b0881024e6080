use crate::api::client::{Resource, TrustpilotClient};
use crate::api::item::Item;
use crate::cli::main_types::{ConfigCommands, FetchMode, OutputFormat, QueryArgs};
use crate::display::ItemTable;
use crate::error::{AppError, CliError};
use crate::query::{Builder, Query};
use crate::storage::config::{Config, URL_ENV_VAR};
use crate::utils::input::{parse_filter, parse_order};
use crate::utils::logging::print_verbose;
use crate::utils::validation::{validate_per_page, validate_timeout, validate_url};
use std::path::PathBuf;

#[derive(Default)]
pub struct ConfigHandler;

impl ConfigHandler {
    pub fn new() -> Self {
        Self
    }

    pub fn handle(
        &self,
        command: ConfigCommands,
        config: &mut Config,
        config_path: Option<PathBuf>,
        verbose: bool,
    ) -> Result<(), AppError> {
        match command {
            ConfigCommands::Show => {
                print_verbose(verbose, "Showing current configuration");

                println!("Current Configuration:");
                println!("=====================");

                match config.get_url() {
                    Some(url) if std::env::var(URL_ENV_VAR).is_ok_and(|v| !v.is_empty()) => {
                        println!("URL: {} (from {})", url, URL_ENV_VAR)
                    }
                    Some(url) => println!("URL: {}", url),
                    None => println!("URL: not set"),
                }

                match config.timeout_seconds {
                    Some(secs) => println!("Timeout: {}s", secs),
                    None => println!("Timeout: default"),
                }

                match config.default_per_page {
                    Some(per_page) => println!("Default per page: {}", per_page),
                    None => println!("Default per page: API default"),
                }

                Ok(())
            }
            ConfigCommands::Set {
                url,
                timeout,
                per_page,
            } => {
                print_verbose(
                    verbose,
                    &format!(
                        "Setting config - url: {:?}, timeout: {:?}, per_page: {:?}",
                        url, timeout, per_page
                    ),
                );

                let mut updated_fields = Vec::new();

                if let Some(url_value) = url {
                    validate_url(&url_value)?;
                    updated_fields.push(format!("URL to: {}", url_value));
                    config.set_url(url_value);
                }

                if let Some(secs) = timeout {
                    validate_timeout(secs)?;
                    config.timeout_seconds = Some(secs);
                    updated_fields.push(format!("timeout to: {}s", secs));
                }

                if let Some(n) = per_page {
                    validate_per_page(n)?;
                    config.default_per_page = Some(n);
                    updated_fields.push(format!("default per page to: {}", n));
                }

                if updated_fields.is_empty() {
                    return Err(AppError::Cli(CliError::InvalidArguments(
                        "No configuration values provided. Use --url, --timeout and/or --per-page"
                            .to_string(),
                    )));
                }

                config.save(config_path)?;
                println!("Set {}", updated_fields.join(", "));
                println!("Configuration saved successfully.");
                Ok(())
            }
        }
    }
}

#[derive(Default)]
pub struct QueryHandler;

impl QueryHandler {
    pub fn new() -> Self {
        Self
    }

    pub async fn handle(
        &self,
        args: QueryArgs,
        config: &Config,
        verbose: bool,
    ) -> Result<(), AppError> {
        if args.dry_run {
            let builder = self.apply_args(Builder::new(()), &args, config)?;
            let query = rendered_query(&builder, args.fetch_mode());
            print_verbose(verbose, &format!("Dry run for {}", args.path));
            return print_json(&query);
        }

        let url = config.get_url().ok_or_else(|| {
            AppError::Cli(CliError::InvalidArguments(format!(
                "API URL is not configured. Use 'tpq config set --url <url>' or set {}",
                URL_ENV_VAR
            )))
        })?;

        let client = match config.timeout_seconds {
            Some(secs) => TrustpilotClient::with_timeout(url, secs)?,
            None => TrustpilotClient::new(url)?,
        };

        let mut resource = Resource::new(client, args.path.clone());
        if let Some(key) = &args.items_key {
            resource = resource.with_items_key(key.clone());
        }

        let builder = self.apply_args(resource.query(), &args, config)?;
        print_verbose(
            verbose,
            &format!(
                "Querying {} with {:?}",
                args.path,
                rendered_query(&builder, args.fetch_mode()).to_pairs()
            ),
        );

        let items = match args.fetch_mode() {
            FetchMode::Page => builder.get().await?,
            FetchMode::All => builder.all().await?,
            FetchMode::First => builder.first().await?,
        };

        print_verbose(verbose, &format!("Received {} item(s)", items.len()));
        self.print_items(&items, &args)
    }

    /// Apply filters, ordering and pagination from the command line
    pub fn apply_args<Q>(
        &self,
        builder: Builder<Q>,
        args: &QueryArgs,
        config: &Config,
    ) -> Result<Builder<Q>, AppError> {
        let mut builder = builder;

        for raw in &args.filter {
            let (key, value) = parse_filter(raw)?;
            builder = builder.filter(key, value);
        }

        for raw in &args.order {
            let (field, direction) = parse_order(raw)?;
            builder = builder.order(&field, &direction);
        }

        let limit = args
            .limit
            .or_else(|| config.default_per_page.map(i64::from));
        if let Some(limit) = limit {
            builder = builder.limit(limit);
        }
        if let Some(page) = args.page {
            builder = builder.page(page);
        }
        if let Some(offset) = args.offset {
            builder = builder.offset(offset);
        }

        Ok(builder)
    }

    fn print_items(&self, items: &[Item], args: &QueryArgs) -> Result<(), AppError> {
        match args.format {
            OutputFormat::Json => print_json(&items),
            OutputFormat::Table => {
                if items.is_empty() {
                    println!("No items returned.");
                    return Ok(());
                }
                let mut table = ItemTable::new();
                if let Some(columns) = args.column_list() {
                    table = table.with_columns(columns);
                }
                println!("{}", table.render(items));
                Ok(())
            }
        }
    }
}

fn rendered_query<Q>(builder: &Builder<Q>, mode: FetchMode) -> Query {
    match mode {
        FetchMode::Page => builder.build(),
        FetchMode::All => builder.build_all(),
        FetchMode::First => builder.build_first(),
    }
}

fn print_json<T: serde::Serialize + ?Sized>(value: &T) -> Result<(), AppError> {
    let json = serde_json::to_string_pretty(value)
        .map_err(|e| CliError::Output(format!("Failed to serialize JSON: {}", e)))?;
    println!("{}", json);
    Ok(())
}
