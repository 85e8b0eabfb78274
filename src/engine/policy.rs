use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::models::Behavior;

/// Behavior of any category missing from the table.
pub const FALLBACK: Behavior = Behavior::Spread;

/// Category to behavior table. Unknown categories get [`FALLBACK`].
///
/// Entries loaded from config are merged over [`BehaviorPolicy::standard`],
/// so a config only lists the categories it adds or changes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "PolicyEntries")]
pub struct BehaviorPolicy {
    pub table: BTreeMap<String, Behavior>,
}

#[derive(Deserialize)]
#[serde(deny_unknown_fields)]
struct PolicyEntries {
    #[serde(default)]
    table: BTreeMap<String, Behavior>,
}

impl From<PolicyEntries> for BehaviorPolicy {
    fn from(entries: PolicyEntries) -> Self {
        let mut policy = Self::standard();
        policy.table.extend(entries.table);
        policy
    }
}

impl BehaviorPolicy {
    /// An empty table: every category resolves to `SPREAD`.
    pub fn new() -> Self {
        Self { table: BTreeMap::new() }
    }

    /// The built-in table for common budget categories.
    pub fn standard() -> Self {
        use Behavior::*;
        let entries = [
            ("rent", Fixed),
            ("mortgage", Fixed),
            ("utilities", Fixed),
            ("insurance", Fixed),
            ("internet", Fixed),
            ("phone", Fixed),
            ("subscriptions", Fixed),
            ("loan_payment", Fixed),
            ("groceries", Spread),
            ("coffee", Spread),
            ("transport", Spread),
            ("lunch", Spread),
            ("dining", Clustered),
            ("entertainment", Clustered),
            ("shopping", Clustered),
            ("travel", Clustered),
        ];
        Self {
            table: entries.iter().map(|(k, v)| (k.to_string(), *v)).collect(),
        }
    }

    pub fn with(mut self, category: impl Into<String>, behavior: Behavior) -> Self {
        self.table.insert(category.into(), behavior);
        self
    }

    pub fn classify(&self, category_id: &str) -> Behavior {
        self.table.get(category_id).copied().unwrap_or(FALLBACK)
    }
}

impl Default for BehaviorPolicy {
    fn default() -> Self {
        Self::standard()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn standard_table() {
        let policy = BehaviorPolicy::standard();
        assert_eq!(policy.classify("rent"), Behavior::Fixed);
        assert_eq!(policy.classify("coffee"), Behavior::Spread);
        assert_eq!(policy.classify("dining"), Behavior::Clustered);
    }

    #[test]
    fn unknown_categories_spread() {
        assert_eq!(BehaviorPolicy::standard().classify("pet_food"), Behavior::Spread);
        assert_eq!(BehaviorPolicy::new().classify("rent"), Behavior::Spread);
    }

    #[test]
    fn lookup_is_exact() {
        // no name pattern matching: "rent_storage" is not "rent"
        assert_eq!(BehaviorPolicy::standard().classify("rent_storage"), Behavior::Spread);
    }

    #[test]
    fn table_is_extendable_from_data() {
        let raw = r#"{"table": {"gym": "FIXED", "coffee": "CLUSTERED"}}"#;
        let policy: BehaviorPolicy = serde_json::from_str(raw).unwrap();
        assert_eq!(policy.classify("gym"), Behavior::Fixed);
        assert_eq!(policy.classify("coffee"), Behavior::Clustered);
        // built-in entries survive
        assert_eq!(policy.classify("rent"), Behavior::Fixed);
        assert_eq!(policy.classify("anything"), Behavior::Spread);

        let policy = BehaviorPolicy::new().with("gym", Behavior::Fixed);
        assert_eq!(policy.classify("gym"), Behavior::Fixed);
    }

    #[test]
    fn fallback_is_not_configurable() {
        let raw = r#"{"table": {}, "fallback": "CLUSTERED"}"#;
        assert!(serde_json::from_str::<BehaviorPolicy>(raw).is_err());

        let json = serde_json::to_value(BehaviorPolicy::standard()).unwrap();
        assert!(json.get("fallback").is_none());
    }
}
