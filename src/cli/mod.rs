//! # CLI Module
//!
//! Command-line surface of the `docsite-gen` binary.
//!
//! ## Commands
//!
//! ### `build`
//!
//! Build a site from a configuration file:
//!
//! ```bash
//! docsite-gen build --config docsite.yaml
//! ```
//!
//! Routing flags override the configuration file:
//! - `--routing-method <query|path>`
//! - `--case-sensitive <true|false>`
//! - `--server <apache|windows|github|static>`
//! - `--base <PATH>`, `--entrance <ID>`, `--dest <DIR>`
//!
//! ### `routes`
//!
//! Print the route table embedded in a built site:
//!
//! ```bash
//! docsite-gen routes --dest site --format json
//! ```
//!
//! ### `resolve`
//!
//! Run the runtime router against a URL and print the rendered view:
//!
//! ```bash
//! docsite-gen resolve --dest site --url '/docs/api/web/'
//! docsite-gen resolve --dest site --url '/docs/' --stored 'guide/'
//! ```
//!
//! ### `watch`
//!
//! Build, then rebuild whenever the configuration file changes:
//!
//! ```bash
//! docsite-gen watch --config docsite.yaml --routing-method path --server github
//! ```
//!
//! ## Usage from Code
//!
//! ```rust,ignore
//! use docsite::cli::{run, Cli};
//! use clap::Parser;
//!
//! run(Cli::parse())?;
//! ```

mod commands;


pub use commands::{format_routes, resolve_url, run, run_cli, Cli, Commands, Resolution, RoutesFormat, RoutingArgs};
