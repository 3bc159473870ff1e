//! Entity id helpers.
//!
//! Document ids carry a short collection prefix so they can be recognised in
//! logs and URLs (`inv_…`, `pps_…`). The random part is a UUID v4 so ids can
//! be minted client-side without coordination.

use uuid::Uuid;

/// Collection name to id prefix.
const PREFIXES: &[(&str, &str)] = &[
    ("organizations", "org"),
    ("contacts", "ctc"),
    ("users", "usr"),
    ("projects", "prj"),
    ("milestones", "mls"),
    ("tasks", "tsk"),
    ("approvals", "apv"),
    ("proposals", "pps"),
    ("agreements", "agr"),
    ("services", "svc"),
    ("pricingRules", "prc"),
    ("invoices", "inv"),
    ("payments", "pay"),
    ("subscriptions", "sub"),
    ("environments", "env"),
    ("deploys", "dpy"),
    ("domains", "dom"),
    ("tickets", "tkt"),
    ("notifications", "ntf"),
    ("activity", "act"),
    ("jobs", "job"),
    ("webhookEvents", "whk"),
    ("files", "fil"),
    ("forms", "frm"),
    ("quotes", "qte"),
];

/// Returns the id prefix for a collection, `"id"` when unknown.
pub fn id_prefix_for(collection: &str) -> &'static str {
    PREFIXES
        .iter()
        .find(|(name, _)| *name == collection)
        .map(|(_, prefix)| *prefix)
        .unwrap_or("id")
}

/// Generates an id, optionally prefixed (`prefix_<32 hex chars>`).
pub fn generate_id(prefix: Option<&str>) -> String {
    let core = Uuid::new_v4().simple().to_string();
    match prefix {
        Some(p) if !p.is_empty() => format!("{}_{}", p, core),
        _ => core,
    }
}

/// Generates a fresh id for a document in `collection`.
pub fn new_entity_id(collection: &str) -> String {
    generate_id(Some(id_prefix_for(collection)))
}
