//! Domain-name helpers.

/// Split an FQDN into (base domain, subdomain).
///
/// Example: `"blog.example.com"` -> `("example.com", "blog")`
///
/// The base domain is always the last two labels. If the domain has
/// no subdomain (e.g. `"example.com"`), the subdomain is returned as
/// an empty string.
#[must_use]
pub fn split_domain(fqdn: &str) -> (String, String) {
    let parts: Vec<&str> = fqdn.split('.').collect();
    if parts.len() <= 2 {
        return (fqdn.to_string(), String::new());
    }
    let base = format!("{}.{}", parts[parts.len() - 2], parts[parts.len() - 1]);
    let subdomain = parts[..parts.len() - 2].join(".");
    (base, subdomain)
}

/// Expand a subdomain label into a full domain under `base`.
///
/// A name that already contains a dot is taken as a full domain.
#[must_use]
pub fn full_domain(subdomain: &str, base: &str) -> String {
    if subdomain.contains('.') {
        subdomain.to_string()
    } else {
        format!("{subdomain}.{base}")
    }
}

/// Whether `value` looks like a Netlify site id (a UUID).
#[must_use]
pub fn is_site_id(value: &str) -> bool {
    const GROUPS: [usize; 5] = [8, 4, 4, 4, 12];

    let groups: Vec<&str> = value.split('-').collect();
    groups.len() == GROUPS.len()
        && groups
            .iter()
            .zip(GROUPS)
            .all(|(group, len)| group.len() == len && group.chars().all(|c| c.is_ascii_hexdigit()))
}
