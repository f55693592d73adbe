//! Batch reconciliation planning.
//!
//! A batch edit session produces a full replacement product list. The
//! reconciler diffs it against the current remote id set and yields an
//! explicit ordered list of operations: deletes for ids that vanished,
//! then a full-document upsert for every desired product. Execution is
//! not transactional; each operation carries its own outcome in the
//! [`BatchReport`] so partial failures stay visible.

use crate::{Product, ProductId};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// A single remote operation in a batch.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum BatchOp {
    Delete { id: ProductId },
    Upsert { id: ProductId },
}

impl BatchOp {
    /// The product id this operation targets.
    pub fn id(&self) -> &str {
        match self {
            BatchOp::Delete { id } => id,
            BatchOp::Upsert { id } => id,
        }
    }
}

/// The computed diff between remote state and a desired product list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BatchPlan {
    /// Ids present remotely but absent from the desired list
    pub deletes: Vec<ProductId>,
    /// Every desired product, upserted keyed by id (full replace)
    pub upserts: Vec<Product>,
}

impl BatchPlan {
    /// Compute the minimal diff.
    ///
    /// `deletes` preserves the order ids were delivered in; `upserts`
    /// preserves the submitted order. Upserting covers both true updates
    /// and creates, so no existence check is needed per product.
    pub fn compute(current_ids: &[ProductId], desired: &[Product]) -> Self {
        let desired_ids: HashSet<&str> = desired.iter().map(|p| p.id.as_str()).collect();

        let deletes = current_ids
            .iter()
            .filter(|id| !desired_ids.contains(id.as_str()))
            .cloned()
            .collect();

        Self {
            deletes,
            upserts: desired.to_vec(),
        }
    }

    /// The ordered operation list: deletes first, then upserts.
    pub fn ops(&self) -> Vec<BatchOp> {
        self.deletes
            .iter()
            .map(|id| BatchOp::Delete { id: id.clone() })
            .chain(self.upserts.iter().map(|p| BatchOp::Upsert {
                id: p.id.clone(),
            }))
            .collect()
    }

    /// Total number of remote calls this plan will issue.
    pub fn len(&self) -> usize {
        self.deletes.len() + self.upserts.len()
    }

    /// Check if the plan issues no remote calls.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Outcome of one executed batch operation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OpOutcome {
    /// The operation that was attempted
    pub op: BatchOp,
    /// The failure message, if the remote call failed
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl OpOutcome {
    /// Whether the operation succeeded.
    pub fn is_ok(&self) -> bool {
        self.error.is_none()
    }
}

/// Per-operation results of an executed batch, in execution order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BatchReport {
    pub outcomes: Vec<OpOutcome>,
}

impl BatchReport {
    /// An empty report.
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a successful operation.
    pub fn record_ok(&mut self, op: BatchOp) {
        self.outcomes.push(OpOutcome { op, error: None });
    }

    /// Record a failed operation.
    pub fn record_failure(&mut self, op: BatchOp, error: impl Into<String>) {
        self.outcomes.push(OpOutcome {
            op,
            error: Some(error.into()),
        });
    }

    /// Count of successful operations.
    pub fn succeeded(&self) -> usize {
        self.outcomes.iter().filter(|o| o.is_ok()).count()
    }

    /// Count of failed operations.
    pub fn failed(&self) -> usize {
        self.outcomes.len() - self.succeeded()
    }

    /// Whether every operation succeeded.
    pub fn is_clean(&self) -> bool {
        self.failed() == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Category;

    fn product(id: &str) -> Product {
        Product {
            id: id.into(),
            name: id.to_uppercase(),
            purpose: "test".into(),
            category: Category::Website,
            url: format!("https://example.com/{id}"),
            accent: "#007aff".into(),
            created_date: "2026-01-01".into(),
            thumbnail: None,
            screenshot_url: None,
            last_screenshot_update: None,
        }
    }

    fn ids(ids: &[&str]) -> Vec<ProductId> {
        ids.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn diff_deletes_removed_upserts_all_desired() {
        let current = ids(&["1", "2", "3"]);
        let desired = vec![product("2"), product("3"), product("4")];

        let plan = BatchPlan::compute(&current, &desired);

        assert_eq!(plan.deletes, ids(&["1"]));
        let upsert_ids: Vec<&str> = plan.upserts.iter().map(|p| p.id.as_str()).collect();
        assert_eq!(upsert_ids, vec!["2", "3", "4"]);
    }

    #[test]
    fn identical_lists_delete_nothing() {
        let current = ids(&["a", "b"]);
        let desired = vec![product("a"), product("b")];

        let plan = BatchPlan::compute(&current, &desired);
        assert!(plan.deletes.is_empty());
        assert_eq!(plan.upserts.len(), 2);
    }

    #[test]
    fn empty_desired_list_deletes_everything() {
        let current = ids(&["a", "b"]);
        let plan = BatchPlan::compute(&current, &[]);

        assert_eq!(plan.deletes, ids(&["a", "b"]));
        assert!(plan.upserts.is_empty());
    }

    #[test]
    fn empty_remote_only_creates() {
        let plan = BatchPlan::compute(&[], &[product("new")]);

        assert!(plan.deletes.is_empty());
        assert_eq!(plan.len(), 1);
        assert!(!plan.is_empty());
    }

    #[test]
    fn ops_order_deletes_before_upserts() {
        let plan = BatchPlan::compute(&ids(&["gone", "kept"]), &[product("kept")]);

        let ops = plan.ops();
        assert_eq!(
            ops,
            vec![
                BatchOp::Delete { id: "gone".into() },
                BatchOp::Upsert { id: "kept".into() },
            ]
        );
    }

    #[test]
    fn report_counts_partial_failure() {
        let mut report = BatchReport::new();
        report.record_ok(BatchOp::Delete { id: "1".into() });
        report.record_failure(BatchOp::Upsert { id: "2".into() }, "write failed");

        assert_eq!(report.succeeded(), 1);
        assert_eq!(report.failed(), 1);
        assert!(!report.is_clean());
    }

    #[test]
    fn report_serializes_outcomes() {
        let mut report = BatchReport::new();
        report.record_ok(BatchOp::Upsert { id: "2".into() });

        let json = serde_json::to_value(&report).unwrap();
        assert_eq!(json["outcomes"][0]["op"]["type"], "upsert");
        assert!(json["outcomes"][0].get("error").is_none());
    }
}
