//! Spotify Streaming History Analyzer CLI Library
//!
//! This library ingests Spotify extended-streaming-history exports (one
//! directory per user, each holding JSON batch files), aggregates per-track
//! listening statistics across users, ranks tracks by total listening time,
//! and synchronizes the ranked list into a remote Spotify playlist.
//!
//! # Modules
//!
//! - `cli` - Command-line interface implementations
//! - `config` - Configuration management and environment variables
//! - `history` - Streaming-history ingestion and normalization
//! - `management` - API token storage and refresh
//! - `spotify` - Spotify Web API client implementation
//! - `stats` - Cross-user aggregation and ranking
//! - `sync` - Playlist synchronization with batching and throttle retry
//! - `types` - Data structures and type definitions
//! - `utils` - Utility functions and helpers
//!
//! # Example
//!
//! ```
//! use replaycli::{config, cli};
//!
//! #[tokio::main]
//! async fn main() -> replaycli::Res<()> {
//!     config::load_env().await?;
//!     // Use CLI functions...
//!     Ok(())
//! }
//! ```

pub mod cli;
pub mod config;
pub mod history;
pub mod management;
pub mod spotify;
pub mod stats;
pub mod sync;
pub mod types;
pub mod utils;

/// A convenient Result type alias for operations that may fail.
///
/// Provides a standard error handling pattern throughout the application
/// using a boxed dynamic error trait object. This allows for flexible
/// error handling while maintaining Send + Sync bounds for async contexts.
///
/// # Example
///
/// ```
/// use replaycli::Res;
///
/// async fn fetch_data() -> Res<String> {
///     Ok("data".to_string())
/// }
/// ```
pub type Res<T> = std::result::Result<T, Box<dyn std::error::Error + Send + Sync>>;

/// Prints an informational message with a blue bullet point.
///
/// Accepts the same arguments as `println!`. Used for general status
/// updates throughout the application.
#[macro_export]
macro_rules! info {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    println!("[{}] {}", "o".blue().bold(), std::format_args!($($arg)*));
  })
}

/// Prints a success message with a green checkmark.
///
/// Accepts the same arguments as `println!`. Used to provide positive
/// feedback when operations complete successfully.
#[macro_export]
macro_rules! success {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    println!("[{}] {}", "✓".green().bold(), std::format_args!($($arg)*));
  })
}

/// Prints an error message with a red exclamation mark and exits the program.
///
/// Terminates the process with exit code 1 immediately after printing.
/// Only for unrecoverable errors where continuing makes no sense.
#[macro_export]
macro_rules! error {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    println!("[{}] {}", "!".red().bold(), std::format_args!($($arg)*));
    std::process::exit(1);
  })
}

/// Prints a warning message with a yellow exclamation mark.
///
/// Accepts the same arguments as `println!`. Used for recoverable issues
/// the user should notice, like skipped records or throttled requests.
#[macro_export]
macro_rules! warning {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    println!("[{}] {}", "!".yellow().bold(), std::format_args!($($arg)*));
  })
}
