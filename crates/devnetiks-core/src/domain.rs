//! Organization domains.
//!
//! Intake forms collect a website (or just a company name). The normalized
//! host is what organizations are matched on, and it also yields the
//! organization's document key, so submitting the same domain twice writes to
//! one record instead of creating two.

use serde::{Deserialize, Serialize};
use url::Url;

use crate::ids::new_entity_id;

/// Reduces a website or domain to a bare lowercase host without `www.`.
///
/// ```rust
/// use devnetiks_core::domain::normalize_domain;
///
/// assert_eq!(normalize_domain("https://WWW.Example.com/about").as_deref(), Some("example.com"));
/// assert_eq!(normalize_domain("   "), None);
/// ```
pub fn normalize_domain(input: &str) -> Option<String> {
    let raw = input.trim();
    if raw.is_empty() {
        return None;
    }

    let urlish = if raw.contains("://") {
        raw.to_string()
    } else {
        format!("https://{}", raw)
    };

    let host = match Url::parse(&urlish) {
        Ok(url) => url.host_str().map(|h| strip_www(&h.to_lowercase()).to_string()),
        Err(_) => {
            let lower = raw.to_lowercase();
            let rest = lower
                .strip_prefix("https://")
                .or_else(|| lower.strip_prefix("http://"))
                .unwrap_or(&lower);
            Some(strip_www(rest).to_string())
        }
    };

    host.filter(|h| !h.is_empty())
}

fn strip_www(host: &str) -> &str {
    host.strip_prefix("www.").unwrap_or(host)
}

/// Prefixes `https://` unless the text already has an http(s) scheme.
pub fn ensure_https(url: &str) -> String {
    let has_scheme = |scheme: &str| {
        url.get(..scheme.len())
            .is_some_and(|head| head.eq_ignore_ascii_case(scheme))
    };
    if has_scheme("http://") || has_scheme("https://") {
        url.to_string()
    } else {
        format!("https://{}", url)
    }
}

/// Deterministic organization key for a normalized domain.
///
/// Characters that are not valid in a document id become `-`.
pub fn organization_key(domain: &str) -> String {
    let slug: String = domain
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || c == '.' || c == '-' {
                c.to_ascii_lowercase()
            } else {
                '-'
            }
        })
        .collect();
    format!("org_{}", slug)
}

/// The organization fields an intake submission writes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrganizationSeed {
    pub id: String,
    pub name: String,
    pub website: Option<String>,
    pub domain: Option<String>,
}

impl OrganizationSeed {
    /// Builds the seed from intake fields.
    ///
    /// The domain comes from the website, or from the name when no website
    /// was given. With a domain the id is [`organization_key`], so a
    /// merge-write on that id is an idempotent upsert. Without one a fresh
    /// id is minted.
    pub fn from_intake(name: &str, website: Option<&str>) -> Self {
        let website = website.map(str::trim).filter(|w| !w.is_empty());
        let domain = normalize_domain(website.unwrap_or(name));
        let id = match &domain {
            Some(d) => organization_key(d),
            None => new_entity_id("organizations"),
        };
        Self {
            id,
            name: name.trim().to_string(),
            website: website.map(str::to_string),
            domain,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_domain() {
        assert_eq!(normalize_domain("example.com").as_deref(), Some("example.com"));
        assert_eq!(normalize_domain("www.Example.COM").as_deref(), Some("example.com"));
        assert_eq!(
            normalize_domain("http://shop.example.com:8080/cart?x=1").as_deref(),
            Some("shop.example.com")
        );
        assert_eq!(normalize_domain(""), None);
    }

    #[test]
    fn test_normalize_falls_back_to_text() {
        // Spaces make the URL parse fail.
        assert_eq!(normalize_domain("Acme Corp").as_deref(), Some("acme corp"));
    }

    #[test]
    fn test_ensure_https() {
        assert_eq!(ensure_https("example.com"), "https://example.com");
        assert_eq!(ensure_https("http://example.com"), "http://example.com");
        assert_eq!(ensure_https("HTTPS://example.com"), "HTTPS://example.com");
    }

    #[test]
    fn test_same_domain_same_key() {
        let a = OrganizationSeed::from_intake("Acme", Some("https://www.acme.io/"));
        let b = OrganizationSeed::from_intake("ACME Inc", Some("acme.io"));
        assert_eq!(a.id, "org_acme.io");
        assert_eq!(a.id, b.id);
        assert_eq!(a.domain.as_deref(), Some("acme.io"));
    }

    #[test]
    fn test_name_used_when_no_website() {
        let seed = OrganizationSeed::from_intake("Acme Corp", Some("  "));
        assert_eq!(seed.website, None);
        assert_eq!(seed.domain.as_deref(), Some("acme corp"));
        assert_eq!(seed.id, "org_acme-corp");
    }

    #[test]
    fn test_blank_intake_gets_fresh_id() {
        let seed = OrganizationSeed::from_intake("  ", None);
        assert_eq!(seed.domain, None);
        assert!(seed.id.starts_with("org_"));
        assert_eq!(seed.id.len(), 4 + 32);
    }
}
