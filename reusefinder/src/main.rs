mod report;

use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "reusefinder")]
#[command(about = "Detect keystream reuse in XOR-encrypted files")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Scan a file for keystream reuse and readable plaintext
    Scan {
        /// File containing the input buffer
        file: PathBuf,

        /// Override the significance threshold, in bits
        #[arg(long)]
        threshold: Option<f64>,

        /// Write an evidence heat-map PNG to this path
        #[arg(long, value_name = "image_path")]
        heatmap: Option<PathBuf>,

        /// Emit the report as JSON
        #[arg(long)]
        json: bool,
    },

    /// Search for a single-byte XOR key
    Break {
        /// File containing the ciphertext
        file: PathBuf,
    },
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    match cli.command {
        Commands::Scan {
            file,
            threshold,
            heatmap,
            json,
        } => {
            let output = report::scan(&file, threshold, heatmap.as_deref(), json)?;
            print!("{}", output);
        }
        Commands::Break { file } => {
            let output = report::break_single_byte(&file)?;
            print!("{}", output);
        }
    }

    Ok(())
}
