//! PII-safe CSV rendering
//!
//! Exactly seven columns, none of which can carry raw identity: the identity
//! column holds the SHA-256 digest computed at classification time, and the
//! only user-supplied value (the internal account id) is sanitized so it can
//! never break the row structure. Plaintext emails, feedback text, and
//! revenue figures are deliberately absent.

use crate::pipeline::ClassifiedRecord;

/// Header row of the PII-safe export
pub const PII_EXPORT_HEADER: &str =
    "hashed_email,segment_key,churn_risk_score,signal_category,recommended_play,inactivity_bucket,internal_safe_id\n";

/// Renders classified records into the seven-column PII-safe CSV.
pub fn render_pii_safe_csv(records: &[ClassifiedRecord]) -> String {
    let mut csv = String::from(PII_EXPORT_HEADER);

    for record in records {
        let play = record.play.map(|play| play.as_str()).unwrap_or("");
        csv.push_str(&format!(
            "{},{},{},{},{},{},{}\n",
            record.hashed_identity,
            record.segment.as_str(),
            record.risk_score,
            record.category.as_str(),
            play,
            record.inactivity_bucket,
            sanitize_field(&record.internal_id),
        ));
    }

    csv
}

/// Replaces delimiter and line-break characters so a hostile account id
/// cannot inject rows or columns.
fn sanitize_field(value: &str) -> String {
    value
        .chars()
        .map(|c| match c {
            ',' | '\r' | '\n' => '_',
            other => other,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pipeline::hash_identity;
    use crate::signal::{Play, SegmentKey, SignalCategory};

    fn record(internal_id: &str, play: Option<Play>) -> ClassifiedRecord {
        ClassifiedRecord {
            hashed_identity: hash_identity("a@x.com"),
            segment: SegmentKey::LagRecovery,
            risk_score: 100,
            category: SignalCategory::BillingComplaint,
            play,
            inactivity_bucket: "60-90",
            internal_id: internal_id.to_string(),
            revenue: 1234.56,
            churned: true,
            at_risk: false,
            matched_keywords: vec!["price".to_string()],
        }
    }

    #[test]
    fn test_header_and_row_shape() {
        let records = vec![record("ACC_001", Some(Play::Winback20PctOffer))];
        let csv = render_pii_safe_csv(&records);

        let lines: Vec<&str> = csv.lines().collect();
        assert_eq!(lines.len(), 2);
        assert_eq!(
            lines[0],
            "hashed_email,segment_key,churn_risk_score,signal_category,recommended_play,inactivity_bucket,internal_safe_id"
        );
        assert_eq!(
            lines[1],
            format!(
                "{},LAG_RECOVERY,100,BILLING_COMPLAINT,WINBACK_20PCT_OFFER,60-90,ACC_001",
                hash_identity("a@x.com")
            )
        );
    }

    #[test]
    fn test_missing_play_renders_empty_field() {
        let records = vec![record("ACC_002", None)];
        let csv = render_pii_safe_csv(&records);

        let row = csv.lines().nth(1).unwrap();
        let fields: Vec<&str> = row.split(',').collect();
        assert_eq!(fields.len(), 7);
        assert_eq!(fields[4], "");
    }

    #[test]
    fn test_hostile_internal_id_is_sanitized() {
        let records = vec![record("ACC,77\ninjected", Some(Play::HealthCheckEmail))];
        let csv = render_pii_safe_csv(&records);

        let lines: Vec<&str> = csv.lines().collect();
        assert_eq!(lines.len(), 2);
        assert!(lines[1].ends_with("ACC_77_injected"));
    }

    #[test]
    fn test_no_plaintext_identity_revenue_or_feedback() {
        let records = vec![record("ACC_003", Some(Play::RetentionCall))];
        let csv = render_pii_safe_csv(&records);

        assert!(!csv.contains("a@x.com"));
        assert!(!csv.contains("1234.56"));
        assert!(!csv.contains("price"));
    }

    #[test]
    fn test_empty_records_still_emit_header() {
        let csv = render_pii_safe_csv(&[]);
        assert_eq!(csv, PII_EXPORT_HEADER);
    }
}
