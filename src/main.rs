mod categorizer;
mod cli;
mod error;
mod export;
mod fmt;
mod importer;
mod models;
mod reports;
mod reviewer;
mod session;
mod settings;
mod store;

use clap::Parser;

use cli::{CategoriesCommands, Cli, Commands, KeywordsCommands, ReportCommands};

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let cli = Cli::parse();
    let store = cli.categories_file;

    let result = match cli.command {
        Commands::Init { data_dir } => cli::init::run(data_dir, store),
        Commands::Status => cli::status::run(store),
        Commands::Categories { command } => match command {
            CategoriesCommands::List => cli::categories::list(store),
            CategoriesCommands::Add { name } => cli::categories::add(&name, store),
        },
        Commands::Keywords { command } => match command {
            KeywordsCommands::Add { category, keyword } => {
                cli::keywords::add(&category, &keyword, store)
            }
        },
        Commands::Categorize { file, output, all } => {
            cli::categorize::run(&file, output.as_deref(), all, store)
        }
        Commands::Review { file, all } => cli::review::run(&file, all, store),
        Commands::Apply { file, edited } => cli::apply::run(&file, &edited, store),
        Commands::Report { command } => match command {
            ReportCommands::Expenses { file } => cli::report::expenses(&file, store),
            ReportCommands::Income { file } => cli::report::income(&file, store),
            ReportCommands::Timeline {
                file,
                credit,
                period,
            } => cli::report::timeline(&file, credit, period, store),
        },
    };

    if let Err(e) = result {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}
