use clap::Parser;
use keystash::cli::{init_logging, Cli, Commands};

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let result = match cli.command {
        Commands::Set {
            ref name,
            ref value,
        } => keystash::cli::commands::set::execute(&cli, name, value.as_deref()),
        Commands::Get { ref name } => keystash::cli::commands::get::execute(&cli, name),
        Commands::Delete { ref name, force } => {
            keystash::cli::commands::delete::execute(&cli, name, force)
        }
        Commands::ResetKey { force } => keystash::cli::commands::reset_key::execute(&cli, force),
        Commands::Status => keystash::cli::commands::status::execute(&cli),
        Commands::Completions { shell } => keystash::cli::commands::completions::execute(shell),
    };

    if let Err(e) = result {
        keystash::cli::output::error(&e.to_string());
        if e.is_corrupted_key() {
            keystash::cli::output::tip(
                "The master key cannot be read. `keystash reset-key` creates a new one, \
                 but secrets stored under the old key are lost.",
            );
        }
        std::process::exit(1);
    }
}
