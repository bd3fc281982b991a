use clap::Parser;
use nostrvault::cli::{Cli, Commands};
use nostrvault::config::Config;
use nostrvault::errors::NostrVaultError;
use nostrvault::prompt::TerminalPrompter;

fn main() {
    let cli = Cli::parse();

    init_tracing(cli.verbose);

    let config = match Config::load(cli.data_dir.as_deref(), cli.config.as_deref()) {
        Ok(config) => config,
        Err(e) => {
            nostrvault::cli::output::error(&e.to_string());
            std::process::exit(1);
        }
    };

    let mut prompter = TerminalPrompter::new();

    let result = match cli.command {
        Commands::SeedGen(ref args) => {
            nostrvault::cli::commands::seed_gen::execute(&config, args, &mut prompter)
        }
        Commands::KeyGen(ref args) => {
            nostrvault::cli::commands::key_gen::execute(&config, args, &mut prompter)
        }
        Commands::Show(ref args) => {
            nostrvault::cli::commands::show::execute(&config, args, &mut prompter)
        }
        Commands::Pubkey(ref args) => {
            nostrvault::cli::commands::pubkey::execute(&config, args, &mut prompter)
        }
    };

    if let Err(e) = result {
        if matches!(e, NostrVaultError::UserAbort) {
            nostrvault::cli::output::info("Cancelled — nothing was written.");
        }
        nostrvault::cli::output::error(&e.to_string());
        std::process::exit(1);
    }
}

/// Diagnostics go to stderr; `RUST_LOG` wins over `--verbose`.
fn init_tracing(verbose: bool) {
    let level = if verbose {
        tracing::Level::DEBUG
    } else {
        tracing::Level::WARN
    };
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::builder()
                .with_default_directive(level.into())
                .from_env_lossy(),
        )
        .init();
}
