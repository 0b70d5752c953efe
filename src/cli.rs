use std::ffi::OsString;
use std::fmt::Write as _;
use std::path::{Path, PathBuf};

use clap::{CommandFactory, FromArgMatches, Parser, Subcommand};

use crate::config::{self, Config};
use crate::domain::{self, split_domain};
use crate::error::{SubdomainError, SubdomainResult};
use crate::netlify::credentials;
use crate::netlify::{self, NetlifyApi, NewDnsRecord, SitePatch};

/// Environment variable overriding the config file location.
pub const CONFIG_ENV: &str = "NETLIFY_SUBDOMAIN_CONFIG";

#[derive(Parser, Debug)]
#[command(name = "netlify-subdomain", version)]
#[command(about = "Netlify Subdomain CLI - Manage domains without the web UI")]
#[command(arg_required_else_help = true)]
pub struct Cli {
    /// Path of the local config file
    #[arg(long, global = true, env = CONFIG_ENV, value_name = "PATH")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Add a subdomain to a site
    Add {
        /// Subdomain label, or a full domain
        subdomain: String,

        /// Base domain (defaults to the configured default domain)
        domain: Option<String>,

        /// Site name, site id or alias (defaults to the linked site)
        site: Option<String>,
    },

    /// Remove a subdomain from DNS and from its site
    Remove {
        /// Full domain to remove
        domain: String,
    },

    /// List your Netlify sites
    ListSites,

    /// List your Netlify DNS zones
    ListZones,

    /// Show recently added domains
    ListRecent,

    /// Create a shortcut name for a site
    Alias {
        /// Shortcut name
        name: String,

        /// Site name or id
        site: String,
    },

    /// Delete a site shortcut
    Unalias {
        /// Shortcut name
        name: String,
    },

    /// Change the default base domain
    SetDefault {
        /// Base domain managed by Netlify DNS
        domain: String,
    },

    /// Show the current configuration
    Config,
}

impl Cli {
    /// Parse `args`, with the current aliases listed at the end of
    /// `--help`. Exits the process on `--help`, `--version` and usage
    /// errors, like [`Parser::parse`].
    #[must_use]
    pub fn parse_with_config(args: Vec<OsString>, config: &Config) -> Self {
        let matches = Self::command()
            .after_help(help_footer(config))
            .get_matches_from(args);
        Self::from_arg_matches(&matches).unwrap_or_else(|e| e.exit())
    }
}

/// Find an explicit `--config` value in raw arguments, before clap
/// has parsed them.
#[must_use]
pub fn config_arg(args: &[OsString]) -> Option<PathBuf> {
    let mut iter = args.iter().skip(1);
    while let Some(arg) = iter.next() {
        let Some(arg) = arg.to_str() else {
            continue;
        };
        if arg == "--" {
            break;
        }
        if arg == "--config" {
            return iter.next().map(PathBuf::from);
        }
        if let Some(value) = arg.strip_prefix("--config=") {
            return Some(PathBuf::from(value));
        }
    }
    None
}

/// Config file location: explicit path, then `NETLIFY_SUBDOMAIN_CONFIG`,
/// then `~/.netlify-subdomain-config.json`.
pub fn resolve_config_path(explicit: Option<PathBuf>) -> SubdomainResult<PathBuf> {
    explicit
        .or_else(|| {
            std::env::var_os(CONFIG_ENV)
                .filter(|v| !v.is_empty())
                .map(PathBuf::from)
        })
        .map_or_else(config::default_config_path, Ok)
}

/// Text shown after the generated `--help` output.
#[must_use]
pub fn help_footer(config: &Config) -> String {
    let mut out = format!(
        "Examples:\n  \
         netlify-subdomain add blog                     # Adds blog.{0} to the linked site\n  \
         netlify-subdomain add api {0} juice            # Adds api.{0} using 'juice' alias\n  \
         netlify-subdomain remove test.{0}              # Removes subdomain\n  \
         netlify-subdomain alias blog my-blog-site      # Create alias 'blog' for site\n  \
         netlify-subdomain list-recent                  # Show recently added domains\n\n\
         Current aliases:\n",
        config.default_domain
    );
    for (name, site) in &config.aliases {
        let _ = writeln!(out, "  {name} → {site}");
    }
    out.push_str("\nNote: The base domain must be managed by Netlify DNS for this to work.");
    out
}

/// How `add` attached the domain to the site.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AddOutcome {
    /// The site had no custom domain; the new domain became it.
    CustomDomain,
    /// The domain was appended to the site's domain aliases.
    DomainAlias,
}

/// Runs commands against the local config and the Netlify API.
pub struct Subdomains {
    config: Config,
    config_path: PathBuf,
    project_dir: PathBuf,
}

impl Subdomains {
    /// `project_dir` is searched for a linked site when `add` is
    /// called without one.
    #[must_use]
    pub const fn new(config: Config, config_path: PathBuf, project_dir: PathBuf) -> Self {
        Self {
            config,
            config_path,
            project_dir,
        }
    }

    #[must_use]
    pub const fn config(&self) -> &Config {
        &self.config
    }

    #[must_use]
    pub fn config_path(&self) -> &Path {
        &self.config_path
    }

    /// Dispatch a parsed command. `connect` is only called for
    /// commands that need the Netlify API.
    pub fn run<A: NetlifyApi>(
        &mut self,
        command: &Command,
        connect: impl FnOnce() -> SubdomainResult<A>,
    ) -> SubdomainResult<()> {
        match command {
            Command::Add {
                subdomain,
                domain,
                site,
            } => self
                .add(&connect()?, subdomain, domain.as_deref(), site.as_deref())
                .map(|_| ()),
            Command::Remove { domain } => self.remove(&connect()?, domain).map(|_| ()),
            Command::ListSites => self.list_sites(&connect()?),
            Command::ListZones => list_zones(&connect()?),
            Command::ListRecent => {
                self.list_recent();
                Ok(())
            }
            Command::Alias { name, site } => self.alias(name, site),
            Command::Unalias { name } => self.unalias(name),
            Command::SetDefault { domain } => self.set_default(domain),
            Command::Config => {
                self.show_config();
                Ok(())
            }
        }
    }

    /// Point `subdomain` (under `domain` or the default domain) at a
    /// site.
    pub fn add(
        &mut self,
        api: &dyn NetlifyApi,
        subdomain: &str,
        domain: Option<&str>,
        site: Option<&str>,
    ) -> SubdomainResult<AddOutcome> {
        let base = domain.unwrap_or(&self.config.default_domain);
        let full = domain::full_domain(subdomain, base);

        let site = site.map(|name| {
            self.config.resolve_alias(name).map_or_else(
                || name.to_string(),
                |target| {
                    println!("📝 Using alias: {name} → {target}");
                    target.to_string()
                },
            )
        });

        let site_id = self.resolve_site_id(api, site.as_deref())?;
        self.add_domain_to_site(api, &full, &site_id)
    }

    /// Turn a site name, site id or nothing (linked site) into a
    /// site id.
    pub fn resolve_site_id(
        &self,
        api: &dyn NetlifyApi,
        site: Option<&str>,
    ) -> SubdomainResult<String> {
        match site {
            Some(id) if domain::is_site_id(id) => Ok(id.to_string()),
            Some(name) => {
                let sites = api.list_sites()?;
                netlify::find_site(&sites, name)
                    .map(|s| s.id.clone())
                    .ok_or_else(|| SubdomainError::SiteNotFound(name.to_string()))
            }
            None => {
                let id = credentials::linked_site_id(&self.project_dir)
                    .ok_or(SubdomainError::NoSiteSpecified)?;
                println!("📁 Using current directory site: {id}");
                Ok(id)
            }
        }
    }

    fn add_domain_to_site(
        &mut self,
        api: &dyn NetlifyApi,
        domain: &str,
        site_id: &str,
    ) -> SubdomainResult<AddOutcome> {
        let (base, subdomain) = split_domain(domain);
        if subdomain.is_empty() {
            return Err(SubdomainError::Other(format!(
                "{domain} has no subdomain to add"
            )));
        }

        println!("🔗 Adding {domain} to site {site_id}...");

        let zones = api.list_zones()?;
        let zone = netlify::find_zone(&zones, &base)
            .ok_or_else(|| SubdomainError::ZoneNotFound(base.clone()))?;
        println!("✅ Found DNS zone for {base}");

        let site = api.get_site(site_id)?;
        let target = &site.default_domain;

        let records = api.list_records(&zone.id)?;
        if let Some(existing) = netlify::find_cname(&records, domain) {
            println!("✅ CNAME already exists: {subdomain} → {}", existing.value);
        } else {
            println!("📝 Adding CNAME: {subdomain} → {target}");
            api.create_record(&zone.id, &NewDnsRecord::cname(&subdomain, target))?;
        }

        if site.custom_domain().is_none() {
            println!("\n📝 Setting {domain} as primary custom domain...");
            match api.update_site(site_id, &SitePatch::custom_domain(domain)) {
                Ok(_) => {
                    self.domain_added(domain)?;
                    return Ok(AddOutcome::CustomDomain);
                }
                Err(e) => {
                    log::debug!("custom domain update failed: {e}");
                    println!(
                        "⚠️  Failed to set custom domain. Status: {}",
                        e.status().unwrap_or(0)
                    );
                }
            }
        }

        let mut aliases = site.domain_aliases.clone();
        if !site.has_alias(domain) {
            aliases.push(domain.to_string());
        }

        if let Err(e) = api.update_site(site_id, &SitePatch::domain_aliases(aliases)) {
            println!("\n⚠️  DNS record created but domain alias update failed");
            if let Some(status) = e.status() {
                println!("   HTTP Status: {status}");
            }
            println!("   Error: {e}");
            println!("\n   To complete setup manually:");
            println!("   1. Go to https://app.netlify.com/sites/{site_id}/settings/domain");
            println!("   2. Click \"Add domain alias\"");
            println!("   3. Enter: {domain}");
            return Err(e);
        }

        self.domain_added(domain)?;
        Ok(AddOutcome::DomainAlias)
    }

    fn domain_added(&mut self, domain: &str) -> SubdomainResult<()> {
        println!("✅ Successfully added {domain}!");
        println!("🌐 Your site will be available at: https://{domain}");
        println!("\nNote: DNS propagation may take a few minutes.");

        self.config.remember_domain(domain);
        self.save()
    }

    /// Delete the CNAME record of `domain` and drop it from the
    /// aliases of the site that has it. Returns that site's name.
    pub fn remove(
        &mut self,
        api: &dyn NetlifyApi,
        domain: &str,
    ) -> SubdomainResult<Option<String>> {
        println!("🗑️  Removing {domain}...");

        let (base, _) = split_domain(domain);

        let zones = api.list_zones()?;
        let zone = netlify::find_zone(&zones, &base)
            .ok_or_else(|| SubdomainError::ZoneNotFound(base.clone()))?;

        let records = api.list_records(&zone.id)?;
        let record = netlify::find_cname(&records, domain)
            .ok_or_else(|| SubdomainError::RecordNotFound(domain.to_string()))?;

        api.delete_record(&zone.id, &record.id)?;

        let site = unlink_domain_alias(api, domain).unwrap_or_else(|e| {
            log::warn!("could not remove {domain} from site aliases: {e}");
            None
        });

        match &site {
            Some(name) => {
                println!("✅ Successfully removed {domain} from DNS and aliases of {name}!");
            }
            None => println!("✅ Successfully removed {domain} from DNS!"),
        }

        self.config.forget_domain(domain);
        self.save()?;
        Ok(site)
    }

    pub fn list_sites(&self, api: &dyn NetlifyApi) -> SubdomainResult<()> {
        let sites = api.list_sites()?;

        println!("\nYour Netlify sites:\n");
        for site in &sites {
            match self.config.alias_for_site(&site.name) {
                Some(alias) => println!("{} (alias: {alias})", site.name),
                None => println!("{}", site.name),
            }
            println!("  ID: {}", site.id);
            println!("  URL: {}", site.url);
            if let Some(custom) = site.custom_domain() {
                println!("  Custom: {custom}");
            }
            println!();
        }
        Ok(())
    }

    pub fn list_recent(&self) {
        println!("\nRecently added domains:\n");
        if self.config.recent_domains.is_empty() {
            println!("  No recent domains");
        }
        for domain in &self.config.recent_domains {
            println!("  {domain}");
        }
    }

    pub fn alias(&mut self, name: &str, site: &str) -> SubdomainResult<()> {
        self.config.set_alias(name, site);
        self.save()?;
        println!("✅ Created alias: {name} → {site}");
        Ok(())
    }

    pub fn unalias(&mut self, name: &str) -> SubdomainResult<()> {
        let site = self.config.remove_alias(name)?;
        self.save()?;
        println!("✅ Removed alias: {name} (was {site})");
        Ok(())
    }

    pub fn set_default(&mut self, domain: &str) -> SubdomainResult<()> {
        let domain = domain.trim().trim_end_matches('.');
        if !domain.contains('.') {
            return Err(SubdomainError::Other(format!(
                "not a domain name: {domain}"
            )));
        }
        self.config.default_domain = domain.to_string();
        self.save()?;
        println!("✅ Default domain: {domain}");
        Ok(())
    }

    pub fn show_config(&self) {
        println!("\nCurrent configuration:\n");
        println!("Default domain: {}", self.config.default_domain);
        println!("\nAliases:");
        for (name, site) in &self.config.aliases {
            println!("  {name} → {site}");
        }
        println!("\nConfig file: {}", self.config_path.display());
    }

    fn save(&self) -> SubdomainResult<()> {
        self.config.save(&self.config_path)
    }
}

pub fn list_zones(api: &dyn NetlifyApi) -> SubdomainResult<()> {
    let zones = api.list_zones()?;

    println!("\nYour Netlify DNS zones:\n");
    for zone in &zones {
        println!("{}", zone.name);
        println!("  ID: {}", zone.id);
        println!("  Records: {}", zone.records_count);
        println!();
    }
    Ok(())
}

/// Remove `domain` from the aliases of the first site that lists it.
fn unlink_domain_alias(api: &dyn NetlifyApi, domain: &str) -> SubdomainResult<Option<String>> {
    let sites = api.list_sites()?;
    let Some(site) = sites.iter().find(|s| s.has_alias(domain)) else {
        return Ok(None);
    };

    let aliases = site
        .domain_aliases
        .iter()
        .filter(|d| d.as_str() != domain)
        .cloned()
        .collect();
    api.update_site(&site.id, &SitePatch::domain_aliases(aliases))?;
    Ok(Some(site.name.clone()))
}
