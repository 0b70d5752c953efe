pub mod client;
pub mod credentials;

use serde::{Deserialize, Deserializer, Serialize};

use crate::error::SubdomainResult;

/// Base URL of the Netlify REST API.
pub const API_BASE: &str = "https://api.netlify.com/api/v1";

/// TTL of the CNAME records created for new subdomains.
pub const RECORD_TTL: u32 = 3600;

/// The Netlify REST calls used by the commands.
pub trait NetlifyApi {
    /// `GET /dns_zones`
    fn list_zones(&self) -> SubdomainResult<Vec<DnsZone>>;

    /// `GET /dns_zones/{zone_id}/dns_records`
    fn list_records(&self, zone_id: &str) -> SubdomainResult<Vec<DnsRecord>>;

    /// `POST /dns_zones/{zone_id}/dns_records`
    fn create_record(&self, zone_id: &str, record: &NewDnsRecord) -> SubdomainResult<DnsRecord>;

    /// `DELETE /dns_zones/{zone_id}/dns_records/{record_id}`
    fn delete_record(&self, zone_id: &str, record_id: &str) -> SubdomainResult<()>;

    /// `GET /sites`
    fn list_sites(&self) -> SubdomainResult<Vec<Site>>;

    /// `GET /sites/{site_id}`
    fn get_site(&self, site_id: &str) -> SubdomainResult<Site>;

    /// `PATCH /sites/{site_id}`
    fn update_site(&self, site_id: &str, patch: &SitePatch) -> SubdomainResult<Site>;
}

/// A DNS zone managed by Netlify DNS.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct DnsZone {
    pub id: String,
    pub name: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub records_count: u64,
}

/// A record inside a [`DnsZone`].
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct DnsRecord {
    pub id: String,
    pub hostname: String,
    #[serde(rename = "type")]
    pub record_type: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub value: String,
    #[serde(default)]
    pub ttl: Option<u32>,
}

/// Body of a record creation request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NewDnsRecord {
    #[serde(rename = "type")]
    pub record_type: String,
    pub hostname: String,
    pub value: String,
    pub ttl: u32,
}

impl NewDnsRecord {
    /// A CNAME record `hostname -> target`.
    #[must_use]
    pub fn cname(hostname: &str, target: &str) -> Self {
        Self {
            record_type: "CNAME".to_string(),
            hostname: hostname.to_string(),
            value: target.to_string(),
            ttl: RECORD_TTL,
        }
    }
}

/// A site deployed on Netlify.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct Site {
    pub id: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub name: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub url: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub default_domain: String,
    #[serde(default)]
    pub custom_domain: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub domain_aliases: Vec<String>,
}

impl Site {
    /// The primary custom domain, treating an empty string as unset.
    #[must_use]
    pub fn custom_domain(&self) -> Option<&str> {
        self.custom_domain.as_deref().filter(|d| !d.is_empty())
    }

    #[must_use]
    pub fn has_alias(&self, domain: &str) -> bool {
        self.domain_aliases.iter().any(|d| d == domain)
    }
}

/// Partial site update. Only the fields that are set are sent.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SitePatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub custom_domain: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub domain_aliases: Option<Vec<String>>,
}

impl SitePatch {
    #[must_use]
    pub fn custom_domain(domain: &str) -> Self {
        Self {
            custom_domain: Some(domain.to_string()),
            ..Self::default()
        }
    }

    #[must_use]
    pub const fn domain_aliases(aliases: Vec<String>) -> Self {
        Self {
            custom_domain: None,
            domain_aliases: Some(aliases),
        }
    }
}

/// Find the zone named exactly `name`.
#[must_use]
pub fn find_zone<'a>(zones: &'a [DnsZone], name: &str) -> Option<&'a DnsZone> {
    zones.iter().find(|z| z.name == name)
}

/// Find a site by name, falling back to its custom or default
/// domain.
#[must_use]
pub fn find_site<'a>(sites: &'a [Site], name: &str) -> Option<&'a Site> {
    sites.iter().find(|s| s.name == name).or_else(|| {
        sites
            .iter()
            .find(|s| s.custom_domain() == Some(name) || s.default_domain == name)
    })
}

/// Find the CNAME record whose hostname is `domain`.
#[must_use]
pub fn find_cname<'a>(records: &'a [DnsRecord], domain: &str) -> Option<&'a DnsRecord> {
    records
        .iter()
        .find(|r| r.hostname == domain && r.record_type == "CNAME")
}

fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}
