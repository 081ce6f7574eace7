use clap::Parser;
use lockbox::cli::{CategoryAction, Cli, Commands};

fn main() {
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Init => lockbox::cli::commands::init::execute(&cli),
        Commands::Add {
            ref name,
            ref login,
            category,
            ref notes,
        } => lockbox::cli::commands::add::execute(&cli, name, login, category, notes),
        Commands::List => lockbox::cli::commands::list::execute(&cli),
        Commands::Show { index, reveal } => {
            lockbox::cli::commands::show::execute(&cli, index, reveal)
        }
        Commands::Search { ref query } => lockbox::cli::commands::search::execute(&cli, query),
        Commands::Edit {
            index,
            field,
            ref value,
        } => lockbox::cli::commands::edit::execute(&cli, index, field, value.as_deref()),
        Commands::Delete { index, force } => {
            lockbox::cli::commands::delete::execute(&cli, index, force)
        }
        Commands::Copy { index, login } => lockbox::cli::commands::copy::execute(&cli, index, login),
        Commands::Category { ref action } => match action {
            CategoryAction::Add { ref name } => {
                lockbox::cli::commands::category::execute_add(&cli, name)
            }
            CategoryAction::List => lockbox::cli::commands::category::execute_list(&cli),
        },
        Commands::RotateKey => lockbox::cli::commands::rotate::execute(&cli),
    };

    if let Err(e) = result {
        lockbox::cli::output::error(&e.to_string());
        std::process::exit(1);
    }
}
