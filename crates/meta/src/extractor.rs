use crate::error::{BillMetaError, Result};
use crate::types::{BillRecord, DataJson, RelatedBillItem};
use std::path::Path;

/// Read one `data.json` and turn it into a [`BillRecord`].
///
/// Blocking; the pipeline calls this on the blocking pool.
pub fn extract_bill_record(path: &Path) -> Result<BillRecord> {
    let bill_number = bills_protocol::bill_number_from_path(path)
        .ok_or_else(|| BillMetaError::PathFormat(path.display().to_string()))?;
    log::debug!("Processing: {bill_number}");

    let raw = std::fs::read(path).map_err(|source| BillMetaError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    parse_bill_record(&bill_number, &raw)
}

/// Parse raw `data.json` bytes for the bill identified by `bill_number`.
pub fn parse_bill_record(bill_number: &str, raw: &[u8]) -> Result<BillRecord> {
    let data: DataJson = serde_json::from_slice(raw).map_err(|source| BillMetaError::Json {
        bill: bill_number.to_string(),
        source,
    })?;

    if data.congress.trim().is_empty() {
        return Err(BillMetaError::MissingCongressField {
            bill: bill_number.to_string(),
        });
    }

    let mut titles = Vec::with_capacity(data.titles.len());
    let mut titles_whole_bill = Vec::new();
    for entry in &data.titles {
        titles.push(entry.title.clone());
        if !entry.is_for_portion {
            titles_whole_bill.push(entry.title.clone());
        }
    }

    let mut related_bills = data.related_bills;
    let mut related_dict = crate::types::RelatedBillMap::new();
    for reference in &mut related_bills {
        if reference.bill_id.is_empty() {
            reference.bill_congress_type_number.clear();
            continue;
        }
        match RelatedBillItem::from_reference(reference) {
            Ok(item) => {
                reference
                    .bill_congress_type_number
                    .clone_from(&item.bill_congress_type_number);
                related_dict.insert(item.bill_congress_type_number.clone(), item);
            }
            Err(e) => {
                log::debug!(
                    "{bill_number}: skipping related bill {}: {e}",
                    reference.bill_id
                );
                reference.bill_congress_type_number.clear();
            }
        }
    }

    Ok(BillRecord {
        bill_congress_type_number: bill_number.to_string(),
        congress: data.congress,
        bill_type: data.bill_type,
        number: data.number,
        official_title: data.official_title,
        short_title: data.short_title,
        popular_title: data.popular_title,
        titles,
        titles_whole_bill,
        actions: data.actions,
        cosponsors: data.cosponsors,
        committees: data.committees,
        history: data.history,
        related_bills,
        related_dict,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use bills_protocol::Reason;
    use pretty_assertions::assert_eq;
    use tempfile::TempDir;

    const DATA_JSON: &str = r#"{
        "bill_type": "hr",
        "congress": "116",
        "number": "1500",
        "official_title": "To amend the Consumer Financial Protection Act of 2010, and for other purposes.",
        "short_title": "Consumers First Act",
        "popular_title": null,
        "titles": [
            {"as": "introduced", "type": "short", "title": "Consumers First Act", "is_for_portion": false},
            {"as": "introduced", "type": "short", "title": "Bureau Enforcement Act", "is_for_portion": true}
        ],
        "related_bills": [
            {"bill_id": "s2341-116", "identified_by": "CRS", "reason": "identical", "type": "bill"},
            {"identified_by": "House", "reason": "rule", "type": "bill"}
        ],
        "history": {"active": true},
        "unknown_field": [1, 2, 3]
    }"#;

    #[test]
    fn parses_titles_and_related_bills() {
        let record = parse_bill_record("116hr1500", DATA_JSON.as_bytes()).unwrap();

        assert_eq!(record.bill_congress_type_number, "116hr1500");
        assert_eq!(record.congress, "116");
        assert_eq!(
            record.titles,
            vec!["Consumers First Act", "Bureau Enforcement Act"]
        );
        assert_eq!(record.titles_whole_bill, vec!["Consumers First Act"]);
        assert_eq!(record.popular_title, "");
        assert_eq!(record.history["active"], serde_json::json!(true));

        assert_eq!(record.related_bills.len(), 2);
        assert_eq!(record.related_bills[0].bill_congress_type_number, "116s2341");
        assert_eq!(record.related_bills[1].bill_congress_type_number, "");

        assert_eq!(record.related_dict.len(), 1);
        let item = &record.related_dict["116s2341"];
        assert_eq!(item.bill_id, "s2341-116");
        assert_eq!(item.identified_by, vec!["CRS"]);
        assert_eq!(item.reason, vec![Reason::UpstreamIdentical]);
    }

    #[test]
    fn missing_congress_is_a_skip() {
        let err = parse_bill_record("116hr1", br#"{"bill_type": "hr"}"#).unwrap_err();
        assert!(err.is_skip());
        assert!(matches!(err, BillMetaError::MissingCongressField { .. }));
    }

    #[test]
    fn explicit_nulls_parse_as_empty() {
        let record = parse_bill_record(
            "116hr1",
            br#"{"congress": "116", "related_bills": null, "committees": null,
                 "titles": [{"type": "short", "title": "Consumers First Act", "is_for_portion": null}]}"#,
        )
        .unwrap();
        assert!(record.related_bills.is_empty());
        assert!(record.related_dict.is_empty());
        assert!(record.committees.is_empty());
        assert_eq!(record.titles_whole_bill, vec!["Consumers First Act"]);
    }

    #[test]
    fn malformed_json_is_an_error() {
        let err = parse_bill_record("116hr1", b"{not json").unwrap_err();
        assert!(!err.is_skip());
        assert!(matches!(err, BillMetaError::Json { .. }));
    }

    #[test]
    fn extracts_identifier_from_path() {
        let temp = TempDir::new().expect("tempdir");
        let dir = temp.path().join("116/bills/hr/hr1500");
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join("data.json");
        std::fs::write(&path, DATA_JSON).unwrap();

        let record = extract_bill_record(&path).unwrap();
        assert_eq!(record.bill_congress_type_number, "116hr1500");

        let err = extract_bill_record(&temp.path().join("random/data.json")).unwrap_err();
        assert!(matches!(err, BillMetaError::PathFormat(_)));

        let missing = temp.path().join("116/bills/hr/hr1501/data.json");
        let err = extract_bill_record(&missing).unwrap_err();
        assert!(matches!(err, BillMetaError::Io { .. }));
    }
}
