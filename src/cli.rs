// CLI Layer
// ユーザー入力の受付とコマンド実行

pub mod command_context;
pub mod commands;
pub mod logging;

use clap::Parser;
use std::path::PathBuf;

/// Propdiff - Attribute Set Diff CLI
///
/// Compares declared interface members across TypeScript declaration files
/// to find candidate attribute names.
#[derive(Parser, Debug)]
#[command(name = "propdiff")]
#[command(author = "Propdiff Contributors")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Diff interface members across TypeScript declaration files")]
#[command(long_about = "Propdiff - Attribute Set Diff CLI

Loads two declaration files, extracts the members declared on two attribute
interfaces (InterfaceA, InterfaceB), and matches the members only present on
InterfaceA against the resolved properties of two entity types (including
inherited members). Matching is case-insensitive.

The result is written to stdout as a single JSON document.")]
#[command(after_help = "EXAMPLES:
  # Compare React HTMLAttributes/SVGAttributes against DOM Element/SVGElement
  propdiff

  # Include every intermediate set as a sorted list
  propdiff --detail

  # Use custom declaration files and interfaces
  propdiff --attributes types/react.d.ts --entities types/dom.d.ts \\
           --interface-a AllHTMLAttributes --base-entity HTMLElement")]
pub struct Cli {
    /// Include every intermediate set as a sorted list
    #[arg(long)]
    pub detail: bool,

    /// Path to configuration file (defaults to ./propdiff.yaml when present)
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Declaration file containing InterfaceA and InterfaceB
    #[arg(long, value_name = "FILE")]
    pub attributes: Option<PathBuf>,

    /// Declaration file containing the base and derived entity interfaces
    #[arg(long, value_name = "FILE")]
    pub entities: Option<PathBuf>,

    /// Interface whose declared members are diffed (InterfaceA)
    #[arg(long, value_name = "NAME")]
    pub interface_a: Option<String>,

    /// Interface whose declared members are subtracted (InterfaceB)
    #[arg(long, value_name = "NAME")]
    pub interface_b: Option<String>,

    /// Base entity interface (resolved with inherited members)
    #[arg(long, value_name = "NAME")]
    pub base_entity: Option<String>,

    /// Derived entity interface (resolved with inherited members)
    #[arg(long, value_name = "NAME")]
    pub derived_entity: Option<String>,

    /// Print JSON on a single line
    #[arg(long)]
    pub compact: bool,

    /// Enable verbose output (debug logs on stderr)
    #[arg(short, long)]
    pub verbose: bool,

    /// Disable colored output
    #[arg(long)]
    pub no_color: bool,
}
