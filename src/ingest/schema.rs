//! Header-name heuristics binding logical fields to column indexes
//!
//! Detection runs once per upload over the header row and the result is
//! immutable afterward. Every slot is optional; downstream stages degrade
//! gracefully when a slot is absent (a missing revenue column falls back to
//! the global average, a missing account-id column falls back to positional
//! ids, and so on). Only the identity slot is mandatory for the pipeline,
//! which enforces that itself.

use regex::Regex;
use serde::Serialize;
use std::sync::OnceLock;

/// Logical fields the detector can bind to a column
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum FieldSlot {
    Email,
    Revenue,
    Feedback,
    ChurnStatus,
    AccountId,
}

impl FieldSlot {
    /// Slot label used in schema previews and serialized summaries
    pub fn as_str(&self) -> &'static str {
        match self {
            FieldSlot::Email => "email",
            FieldSlot::Revenue => "revenue",
            FieldSlot::Feedback => "feedback",
            FieldSlot::ChurnStatus => "churnStatus",
            FieldSlot::AccountId => "accountId",
        }
    }
}

/// Slots in detection priority order. When one header matches several slot
/// patterns, the earliest free slot in this order claims it.
const SLOT_PRIORITY: [FieldSlot; 5] = [
    FieldSlot::Email,
    FieldSlot::Revenue,
    FieldSlot::Feedback,
    FieldSlot::ChurnStatus,
    FieldSlot::AccountId,
];

/// Recognition pattern for one slot, applied to the trimmed, lower-cased
/// header cell.
fn slot_pattern(slot: FieldSlot) -> &'static Regex {
    static PATTERNS: OnceLock<Vec<(FieldSlot, Regex)>> = OnceLock::new();
    let patterns = PATTERNS.get_or_init(|| {
        vec![
            (
                FieldSlot::Email,
                Regex::new(r"^email$|^e-?mail$|customer.*email").expect("valid regex"),
            ),
            (
                FieldSlot::Revenue,
                Regex::new(r"^revenue$|^amount$|^mrr$|monthly.*revenue").expect("valid regex"),
            ),
            (
                FieldSlot::Feedback,
                Regex::new(r"feedback|comment|reason|verbatim|text|note").expect("valid regex"),
            ),
            (
                FieldSlot::ChurnStatus,
                Regex::new(r"churn|cancel|status|active").expect("valid regex"),
            ),
            (
                FieldSlot::AccountId,
                Regex::new(r"account.*id|user.*id|customer.*id").expect("valid regex"),
            ),
        ]
    });

    patterns
        .iter()
        .find(|(s, _)| *s == slot)
        .map(|(_, re)| re)
        .expect("pattern registered for every slot")
}

/// Column bindings inferred from the header row. Any slot may be absent.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DetectedSchema {
    pub email: Option<usize>,
    pub revenue: Option<usize>,
    pub feedback: Option<usize>,
    pub churn_status: Option<usize>,
    pub account_id: Option<usize>,
}

impl DetectedSchema {
    /// Infers column bindings from the header row.
    ///
    /// Headers are scanned left to right. Each header is tested against the
    /// slot patterns in priority order and claims the first free slot it
    /// matches; a claimed header fills at most one slot and a filled slot is
    /// never reassigned. Detection is deterministic for identical headers.
    pub fn detect(headers: &[String]) -> Self {
        let mut schema = Self::default();

        for (index, header) in headers.iter().enumerate() {
            let normalized = header.trim().to_lowercase();
            if normalized.is_empty() {
                continue;
            }

            for slot in SLOT_PRIORITY {
                if schema.column(slot).is_some() {
                    continue;
                }
                if slot_pattern(slot).is_match(&normalized) {
                    schema.assign(slot, index);
                    break;
                }
            }
        }

        schema
    }

    /// Returns the column bound to a slot, if any.
    pub fn column(&self, slot: FieldSlot) -> Option<usize> {
        match slot {
            FieldSlot::Email => self.email,
            FieldSlot::Revenue => self.revenue,
            FieldSlot::Feedback => self.feedback,
            FieldSlot::ChurnStatus => self.churn_status,
            FieldSlot::AccountId => self.account_id,
        }
    }

    fn assign(&mut self, slot: FieldSlot, index: usize) {
        match slot {
            FieldSlot::Email => self.email = Some(index),
            FieldSlot::Revenue => self.revenue = Some(index),
            FieldSlot::Feedback => self.feedback = Some(index),
            FieldSlot::ChurnStatus => self.churn_status = Some(index),
            FieldSlot::AccountId => self.account_id = Some(index),
        }
    }

    /// Per-slot mapping summary for the schema-preview surface.
    pub fn summary(&self, headers: &[String]) -> Vec<SlotMapping> {
        SLOT_PRIORITY
            .iter()
            .map(|slot| {
                let column = self.column(*slot);
                SlotMapping {
                    slot: slot.as_str(),
                    header: column.and_then(|i| headers.get(i)).cloned(),
                    column,
                }
            })
            .collect()
    }
}

/// One row of the schema preview: a logical slot and the header it bound to
#[derive(Debug, Clone, Serialize)]
pub struct SlotMapping {
    pub slot: &'static str,
    pub header: Option<String>,
    pub column: Option<usize>,
}
