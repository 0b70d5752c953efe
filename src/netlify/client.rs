use serde::de::DeserializeOwned;

use crate::cmd;
use crate::error::{SubdomainError, SubdomainResult};
use crate::netlify::credentials;
use crate::netlify::{API_BASE, DnsRecord, DnsZone, NetlifyApi, NewDnsRecord, Site, SitePatch};

/// Netlify API client using curl.
///
/// The access token is handed to curl on stdin (`-H @-`) so it
/// never shows up in the process list.
pub struct Netlify {
    token: String,
}

impl Netlify {
    #[must_use]
    pub const fn new(token: String) -> Self {
        Self { token }
    }

    /// Build a client from the token the Netlify CLI stored on
    /// `netlify login`.
    pub fn from_credentials() -> SubdomainResult<Self> {
        credentials::access_token().map(Self::new)
    }

    fn api_request(&self, method: &str, path: &str, body: Option<&str>) -> SubdomainResult<String> {
        let url = format!("{API_BASE}{path}");
        log::debug!("{method} {url}");

        let mut args = vec![
            "-s",
            "-X",
            method,
            "-H",
            "@-",
            "-H",
            "Content-Type: application/json",
            "-w",
            "\n%{http_code}",
        ];
        if let Some(b) = body {
            args.push("-d");
            args.push(b);
        }
        args.push(&url);

        let header = format!("Authorization: Bearer {}\n", self.token);
        let output = cmd::run_with_stdin("curl", &args, header.as_bytes())?;

        let (status, body) = split_status(&output)?;
        log::debug!("{method} {path} -> {status}");

        if (200..300).contains(&status) {
            Ok(body.to_string())
        } else {
            Err(SubdomainError::Api {
                status,
                message: error_message(body),
            })
        }
    }

    fn get<T: DeserializeOwned>(&self, path: &str) -> SubdomainResult<T> {
        let body = self.api_request("GET", path, None)?;
        Ok(serde_json::from_str(&body)?)
    }

    fn send<T: DeserializeOwned>(
        &self,
        method: &str,
        path: &str,
        payload: &impl serde::Serialize,
    ) -> SubdomainResult<T> {
        let body = serde_json::to_string(payload)?;
        let response = self.api_request(method, path, Some(&body))?;
        Ok(serde_json::from_str(&response)?)
    }
}

impl NetlifyApi for Netlify {
    fn list_zones(&self) -> SubdomainResult<Vec<DnsZone>> {
        self.get("/dns_zones")
    }

    fn list_records(&self, zone_id: &str) -> SubdomainResult<Vec<DnsRecord>> {
        self.get(&format!("/dns_zones/{zone_id}/dns_records"))
    }

    fn create_record(&self, zone_id: &str, record: &NewDnsRecord) -> SubdomainResult<DnsRecord> {
        self.send("POST", &format!("/dns_zones/{zone_id}/dns_records"), record)
    }

    fn delete_record(&self, zone_id: &str, record_id: &str) -> SubdomainResult<()> {
        let path = format!("/dns_zones/{zone_id}/dns_records/{record_id}");
        self.api_request("DELETE", &path, None)?;
        Ok(())
    }

    fn list_sites(&self) -> SubdomainResult<Vec<Site>> {
        self.get("/sites")
    }

    fn get_site(&self, site_id: &str) -> SubdomainResult<Site> {
        self.get(&format!("/sites/{site_id}"))
    }

    fn update_site(&self, site_id: &str, patch: &SitePatch) -> SubdomainResult<Site> {
        self.send("PATCH", &format!("/sites/{site_id}"), patch)
    }
}

/// Split curl output produced with `-w "\n%{http_code}"` into the
/// status code and the response body.
pub fn split_status(output: &str) -> SubdomainResult<(u16, &str)> {
    let (body, code) = output.rsplit_once('\n').unwrap_or(("", output));
    let status = code.trim().parse().map_err(|_| {
        SubdomainError::Other(format!("unexpected curl output, no status code: {code}"))
    })?;
    Ok((status, body))
}

/// Human-readable message of an API error body.
///
/// Netlify reports errors as `{"code":..,"message":".."}`; some
/// endpoints use `error` instead. Anything else is returned as-is.
#[must_use]
pub fn error_message(body: &str) -> String {
    let parsed: Option<serde_json::Value> = serde_json::from_str(body).ok();

    parsed
        .as_ref()
        .and_then(|v| v["message"].as_str().or_else(|| v["error"].as_str()))
        .map_or_else(
            || {
                let trimmed = body.trim();
                if trimmed.is_empty() {
                    "empty response".to_string()
                } else {
                    trimmed.to_string()
                }
            },
            String::from,
        )
}
