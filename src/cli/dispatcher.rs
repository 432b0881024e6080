use crate::cli::command_handlers::{ConfigHandler, QueryHandler};
use crate::cli::main_types::Commands;
use crate::error::AppError;
use crate::storage::config::Config;
use crate::utils::logging::print_verbose;
use std::path::PathBuf;

pub struct Dispatcher {
    config: Config,
    config_path: Option<PathBuf>,
    verbose: bool,
}

impl Dispatcher {
    pub fn new(config: Config, config_path: Option<PathBuf>, verbose: bool) -> Self {
        Self {
            config,
            config_path,
            verbose,
        }
    }

    pub async fn dispatch(mut self, command: Commands) -> Result<(), AppError> {
        match command {
            Commands::Config { command } => {
                print_verbose(self.verbose, "Dispatching config command");
                ConfigHandler::new().handle(
                    command,
                    &mut self.config,
                    self.config_path.clone(),
                    self.verbose,
                )
            }
            Commands::Query(args) => {
                print_verbose(self.verbose, "Dispatching query command");
                QueryHandler::new()
                    .handle(args, &self.config, self.verbose)
                    .await
            }
        }
    }
}
