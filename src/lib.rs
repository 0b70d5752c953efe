//! Manage custom subdomains of Netlify sites from the command line.
//!
//! `netlify-subdomain` wires a subdomain to a Netlify site in one
//! command: it creates the CNAME record in Netlify DNS and attaches
//! the domain to the site, either as its primary custom domain or as
//! an extra domain alias. No web UI, no copy-pasting site ids.
//!
//! # Overview
//!
//! - [`Config`] is the local preference file
//!   (`~/.netlify-subdomain-config.json`): the default base domain,
//!   site alias shortcuts and the ten most recently added domains.
//! - [`NetlifyApi`](netlify::NetlifyApi) is the set of REST calls
//!   the commands need; [`Netlify`] implements it with `curl`.
//! - [`Subdomains`](cli::Subdomains) runs the commands.
//!
//! # Usage
//!
//! ```sh
//! # Adds blog.<default domain> to the site linked in this directory
//! netlify-subdomain add blog
//!
//! # Adds api.example.com to the site behind the 'juice' alias
//! netlify-subdomain add api example.com juice
//!
//! # Removes the record and the site alias
//! netlify-subdomain remove api.example.com
//!
//! # Creates an alias for a site
//! netlify-subdomain alias blog my-blog-site
//! ```
//!
//! The access token comes from `NETLIFY_AUTH_TOKEN` or from the
//! Netlify CLI config written by `netlify login`. The base domain
//! must be managed by Netlify DNS.
//!
//! # Library use
//!
//! ```rust,no_run
//! use netlify_subdomain::cli::Subdomains;
//! use netlify_subdomain::{Config, Netlify, config};
//!
//! fn main() -> anyhow::Result<()> {
//!     let path = config::default_config_path()?;
//!     let api = Netlify::from_credentials()?;
//!
//!     let mut subdomains =
//!         Subdomains::new(Config::load(&path), path, std::env::current_dir()?);
//!     subdomains.add(&api, "blog", Some("example.com"), Some("my-blog-site"))?;
//!     Ok(())
//! }
//! ```

#![allow(
    clippy::missing_errors_doc,
    clippy::missing_panics_doc,
    clippy::module_name_repetitions
)]

pub mod cli;
pub mod cmd;
pub mod config;
pub mod domain;
pub mod error;
pub mod netlify;

pub use config::Config;
pub use domain::split_domain;
pub use error::{SubdomainError, SubdomainResult};
pub use netlify::client::Netlify;
pub use netlify::NetlifyApi;
