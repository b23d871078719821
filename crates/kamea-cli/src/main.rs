//! Kamea CLI: the `kamea` command.

mod cli;
mod commands;
mod support;

use clap::Parser;
use cli::{Cli, Commands};

fn main() {
    let cli = Cli::parse();

    match cli.command {
        Commands::Classify { ditrune, json } => commands::classify::run(ditrune, json),

        Commands::Locate {
            family,
            column,
            row,
            json,
        } => commands::locate::run(family, column, row, json),

        Commands::Table { family, json } => commands::table::run(family, json),

        Commands::Conrune { ditrune, json } => commands::conrune::run(ditrune, json),

        Commands::Mutate { ditrune, json } => commands::mutate::run(ditrune, json),

        Commands::Export { out, json } => commands::export::run(out, json),

        Commands::Check { projection, json } => commands::check::run(projection, json),
    }
}
