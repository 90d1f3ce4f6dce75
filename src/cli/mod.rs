//! CLI module - Command-line interface for Leadgrid
//!
//! This module provides a structured CLI using clap for argument parsing.

pub mod commands;

use clap::{Parser, Subcommand};

/// Leadgrid - Multi-tenant lead-generation campaign platform
#[derive(Parser)]
#[command(name = "leadgrid")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Run the API server
    #[command(alias = "-d", alias = "--daemon")]
    Daemon,

    /// Create a default config file
    #[command(alias = "--init")]
    Init,

    /// List account profiles
    #[command(alias = "ls", alias = "l")]
    List {
        /// Substring match over email and company
        #[arg(long)]
        search: Option<String>,

        /// Filter by status: active, suspended, disabled
        #[arg(long)]
        status: Option<String>,
    },

    /// Suspend or reactivate an account
    Toggle {
        /// Profile ID
        id: String,
    },

    /// Set an account's session timer in minutes; omit to clear it
    Timer {
        /// Profile ID
        id: String,

        /// Timer in minutes (omit to clear)
        minutes: Option<u32>,
    },
}
