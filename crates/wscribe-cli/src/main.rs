mod cli;
mod commands;

use anyhow::Result;
use clap::Parser;
use cli::{Cli, Commands};
use commands::ExportTarget;

fn main() -> Result<()> {
    let cli = Cli::parse();

    // RUST_LOG wins; otherwise the level follows --verbose
    let env_filter = std::env::var("RUST_LOG").unwrap_or_else(|_| {
        if cli.verbose {
            "wscribe_core=debug,wscribe_cli=debug".to_string()
        } else {
            "wscribe_core=warn,wscribe_cli=info".to_string()
        }
    });

    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();

    let settings = commands::load_settings(cli.config.as_deref());

    match cli.command {
        Commands::Validate { file } => commands::validate(&file).map(|_| ()),
        Commands::Convert {
            file,
            to,
            view,
            chunk_size,
            output,
        } => {
            let target = ExportTarget {
                output: output.as_deref(),
                format: to,
                view,
            };
            commands::convert(&file, settings, chunk_size, target).map(|_| ())
        }
        Commands::Group { file, chunk_size } => {
            commands::group(&file, &settings, chunk_size).map(|_| ())
        }
        Commands::Edit {
            file,
            script,
            to,
            view,
            output,
        } => {
            let target = ExportTarget {
                output: output.as_deref(),
                format: to,
                view,
            };
            commands::edit(&file, &script, &settings, target).map(|_| ())
        }
        Commands::Settings { reset } => {
            commands::show_settings(cli.config.as_deref(), reset).map(|_| ())
        }
        Commands::Info { file, view, media } => {
            commands::info(&file, &settings, view, media.as_deref()).map(|_| ())
        }
    }
}
