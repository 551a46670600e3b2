//! Tab keys and their titles.
//!
//! List tabs use a fixed key. Detail tabs append their scope ids to a
//! prefix, separated by `:` (`a003_insurance:<customer>:<vehicle>`), so
//! reopening the same record activates the existing tab.

use contracts::domain::{
    a001_insured, a003_insurance, a004_check, a005_insurance_company, a006_ahlia_report,
    a007_mashreq_report, a008_palestine_report, a009_trust_report,
};

pub const CUSTOMERS: &str = "a001_insured";
pub const CUSTOMER_DETAILS: &str = "a001_insured_details";
pub const INSURANCES: &str = "a003_insurance";
pub const CHECKS: &str = "a004_check";
pub const COMPANIES: &str = "a005_insurance_company";
pub const AHLIA_REPORTS: &str = "a006_ahlia_report";
pub const MASHREQ_REPORTS: &str = "a007_mashreq_report";
pub const PALESTINE_REPORTS: &str = "a008_palestine_report";
pub const TRUST_REPORTS: &str = "a009_trust_report";

/// `prefix:id1:id2...`
pub fn detail_key(prefix: &str, ids: &[&str]) -> String {
    let mut key = prefix.to_string();
    for id in ids {
        key.push(':');
        key.push_str(id);
    }
    key
}

/// Split a tab key into its prefix and scope ids.
pub fn split_key(key: &str) -> (&str, Vec<&str>) {
    let mut parts = key.split(':');
    let prefix = parts.next().unwrap_or_default();
    (prefix, parts.collect())
}

/// Title shown on the tab bar. Detail tabs get `<entity> · <short id>`
/// until the page replaces it with a readable name.
pub fn tab_label_for_key(key: &str) -> String {
    let (prefix, ids) = split_key(key);
    let list_title = match prefix {
        CUSTOMERS => a001_insured::aggregate::DESCRIPTOR.title,
        COMPANIES => a005_insurance_company::aggregate::DESCRIPTOR.title,
        AHLIA_REPORTS => a006_ahlia_report::aggregate::DESCRIPTOR.title,
        MASHREQ_REPORTS => a007_mashreq_report::aggregate::DESCRIPTOR.title,
        PALESTINE_REPORTS => a008_palestine_report::aggregate::DESCRIPTOR.title,
        TRUST_REPORTS => a009_trust_report::aggregate::DESCRIPTOR.title,
        CUSTOMER_DETAILS => "Customer",
        INSURANCES => a003_insurance::aggregate::DESCRIPTOR.title,
        CHECKS => a004_check::aggregate::DESCRIPTOR.title,
        _ => return key.to_string(),
    };
    match ids.last() {
        Some(id) => detail_tab_label(list_title, short_id(id)),
        None => list_title.to_string(),
    }
}

/// `detail_tab_label("Customer", "Omar Haddad")` → `"Customer · Omar Haddad"`
pub fn detail_tab_label(entity_label: &str, identifier: &str) -> String {
    format!("{} · {}", entity_label, identifier)
}

fn short_id(id: &str) -> &str {
    let start = id
        .char_indices()
        .rev()
        .nth(5)
        .map(|(i, _)| i)
        .unwrap_or(0);
    &id[start..]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn detail_keys_round_trip_through_split() {
        let key = detail_key(CHECKS, &["c1", "v1", "p1"]);
        assert_eq!(key, "a004_check:c1:v1:p1");
        assert_eq!(split_key(&key), (CHECKS, vec!["c1", "v1", "p1"]));
        assert_eq!(split_key(CUSTOMERS), (CUSTOMERS, vec![]));
    }

    #[test]
    fn labels() {
        assert_eq!(tab_label_for_key(CUSTOMERS), "Customers");
        assert_eq!(
            tab_label_for_key("a001_insured_details:64f0c2aa91b2"),
            "Customer · aa91b2"
        );
        assert_eq!(tab_label_for_key("a004_check:c1:v1:p1"), "Checks · p1");
        assert_eq!(tab_label_for_key("unknown_tab"), "unknown_tab");
    }
}
