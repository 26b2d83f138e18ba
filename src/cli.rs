//! Command-line argument parsing. Dispatch and file I/O live in `main`; this
//! module only describes the surface.

use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(author, version, about = "Deterministic authenticated file encryption")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Generate a new key and write it to `key_path`.
    Genkey {
        /// Key length in bytes, 1024..=1073741824.
        length: u64,
        key_path: String,
    },

    /// Encrypt `input_path` under `key_path`, writing a container to `output_path`.
    Encrypt {
        input_path: String,
        output_path: String,
        key_path: String,
    },

    /// Decrypt a container at `input_path` under `key_path`, writing plaintext to `output_path`.
    Decrypt {
        input_path: String,
        output_path: String,
        key_path: String,
    },

    /// Print metadata about a key file.
    Info { key_path: String },
}
