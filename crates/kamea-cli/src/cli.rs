use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(
    name = "kamea",
    about = "Kamea: deterministic classification of the 729-element ditrune space",
    version
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Classify a ditrune: family, role, prime, locator, owners, chain
    Classify {
        /// 6-digit ternary string
        ditrune: String,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Resolve a (family, column, row) locator to its ditrune
    Locate {
        /// Family index, 0..=8
        family: u8,

        /// Column, 0..=8
        column: u8,

        /// Row, 0..=8
        row: u8,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Print one family's 9x9 table
    Table {
        /// Family index, 0..=8
        family: u8,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Apply the conrune transform to a ditrune
    Conrune {
        /// 6-digit ternary string
        ditrune: String,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Apply one nuclear mutation step to a ditrune
    Mutate {
        /// 6-digit ternary string
        ditrune: String,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Write the locator projection document
    Export {
        /// Output path for the projection JSON
        #[arg(long, default_value = ".kamea/locators.json")]
        out: String,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Rebuild the tables and re-assert every build invariant
    Check {
        /// Optional projection document to validate against the fresh build
        #[arg(long)]
        projection: Option<String>,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
}
