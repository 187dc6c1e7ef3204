use bills_protocol::{bill_id_to_bill_number, merge_reason, Reason, IDENTIFIED_BY_BILLMAP};
use bills_text::push_unique;
use serde::{Deserialize, Deserializer, Serialize};
use std::collections::BTreeMap;

/// Related bills of one record, keyed by concatenated bill number (`116hr1500`)
pub type RelatedBillMap = BTreeMap<String, RelatedBillItem>;

/// One entry of `titles` in an upstream `data.json`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TitleEntry {
    #[serde(rename = "as", deserialize_with = "null_as_default")]
    pub as_of: String,
    #[serde(rename = "type", deserialize_with = "null_as_default")]
    pub kind: String,
    #[serde(deserialize_with = "null_as_default")]
    pub title: String,
    #[serde(deserialize_with = "null_as_default")]
    pub is_for_portion: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ActionItem {
    #[serde(deserialize_with = "null_as_default")]
    pub acted_at: String,
    #[serde(deserialize_with = "null_as_default")]
    pub action_code: String,
    /// Upstream emits both plain strings and `{reference, type}` objects here
    #[serde(deserialize_with = "null_as_default")]
    pub references: Vec<serde_json::Value>,
    #[serde(deserialize_with = "null_as_default")]
    pub text: String,
    #[serde(rename = "type", deserialize_with = "null_as_default")]
    pub kind: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CosponsorItem {
    #[serde(deserialize_with = "null_as_default")]
    pub bioguide_id: String,
    #[serde(deserialize_with = "null_as_default")]
    pub thomas_id: String,
    #[serde(deserialize_with = "string_or_number")]
    pub district: String,
    #[serde(deserialize_with = "null_as_default")]
    pub name: String,
    #[serde(deserialize_with = "null_as_default")]
    pub original_cosponsor: bool,
    #[serde(deserialize_with = "null_as_default")]
    pub sponsored_at: String,
    #[serde(deserialize_with = "null_as_default")]
    pub state: String,
    #[serde(deserialize_with = "null_as_default")]
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub withdrawn_at: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CommitteeItem {
    #[serde(deserialize_with = "null_as_default")]
    pub activity: Vec<String>,
    #[serde(deserialize_with = "null_as_default")]
    pub committee: String,
    #[serde(deserialize_with = "null_as_default")]
    pub committee_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub subcommittee: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub subcommittee_id: Option<String>,
}

/// A related-bill reference exactly as listed in `data.json`, plus the
/// concatenated bill number computed during extraction.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RelatedBillReference {
    #[serde(deserialize_with = "null_as_default")]
    pub bill_id: String,
    #[serde(deserialize_with = "null_as_default")]
    pub identified_by: String,
    #[serde(deserialize_with = "null_as_default")]
    pub reason: String,
    #[serde(rename = "type", deserialize_with = "null_as_default")]
    pub kind: String,
    #[serde(deserialize_with = "null_as_default")]
    pub bill_congress_type_number: String,
}

/// Upstream `data.json` shape. Unknown fields are ignored.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct DataJson {
    #[serde(deserialize_with = "null_as_default")]
    pub actions: Vec<ActionItem>,
    #[serde(deserialize_with = "string_or_number")]
    pub congress: String,
    #[serde(deserialize_with = "null_as_default")]
    pub bill_type: String,
    #[serde(deserialize_with = "string_or_number")]
    pub number: String,
    pub history: serde_json::Value,
    #[serde(deserialize_with = "null_as_default")]
    pub official_title: String,
    #[serde(deserialize_with = "null_as_default")]
    pub popular_title: String,
    #[serde(deserialize_with = "null_as_default")]
    pub short_title: String,
    #[serde(deserialize_with = "null_as_default")]
    pub titles: Vec<TitleEntry>,
    #[serde(deserialize_with = "null_as_default")]
    pub cosponsors: Vec<CosponsorItem>,
    #[serde(deserialize_with = "null_as_default")]
    pub committees: Vec<CommitteeItem>,
    #[serde(deserialize_with = "null_as_default")]
    pub related_bills: Vec<RelatedBillReference>,
}

/// Relation between a source bill and one related bill
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RelatedBillItem {
    /// Dash form, e.g. `hr1500-116`
    pub bill_id: String,
    /// Concatenated form, e.g. `116hr1500`
    pub bill_congress_type_number: String,
    /// Deduplicated, sorted by priority
    pub reason: Vec<Reason>,
    pub identified_by: Vec<String>,
    #[serde(rename = "type")]
    pub kind: String,
    pub titles: Vec<String>,
    pub titles_whole_bill: Vec<String>,
}

impl RelatedBillItem {
    /// Fresh item for a bill found by the relation builder.
    #[must_use]
    pub fn for_bill_number(bill_number: impl Into<String>) -> Self {
        let mut item = Self {
            bill_congress_type_number: bill_number.into(),
            ..Self::default()
        };
        item.backfill_identifiers();
        item
    }

    /// Item seeded from an upstream reference. The reference must carry a `bill_id`.
    pub fn from_reference(reference: &RelatedBillReference) -> bills_protocol::Result<Self> {
        let mut item = Self {
            bill_id: reference.bill_id.clone(),
            bill_congress_type_number: bill_id_to_bill_number(&reference.bill_id)?,
            reason: bills_protocol::parse_reason_list(&reference.reason),
            kind: reference.kind.clone(),
            ..Self::default()
        };
        for source in reference.identified_by.split(',') {
            let source = source.trim();
            if !source.is_empty() {
                push_unique(&mut item.identified_by, source.to_string());
            }
        }
        Ok(item)
    }

    pub fn add_reason(&mut self, reason: Reason) -> bool {
        merge_reason(&mut self.reason, reason)
    }

    pub fn add_identified_by(&mut self, source: &str) -> bool {
        push_unique(&mut self.identified_by, source.to_string())
    }

    pub fn add_title(&mut self, title: &str) -> bool {
        push_unique(&mut self.titles, title.to_string())
    }

    pub fn add_whole_bill_title(&mut self, title: &str) -> bool {
        push_unique(&mut self.titles_whole_bill, title.to_string())
    }

    /// Record one title-based match: the reason, `BillMap` provenance and the
    /// shared title. Returns `true` when anything changed.
    pub fn record_title_match(&mut self, reason: Reason, title: &str, whole_bill: bool) -> bool {
        let mut changed = self.add_reason(reason);
        changed |= self.add_identified_by(IDENTIFIED_BY_BILLMAP);
        changed |= if whole_bill {
            self.add_whole_bill_title(title)
        } else {
            self.add_title(title)
        };
        self.backfill_identifiers();
        changed
    }

    /// Fill whichever of the two identifier forms is empty from the other.
    ///
    /// Identifiers that do not parse are left as they are.
    pub fn backfill_identifiers(&mut self) {
        if self.bill_id.is_empty() && !self.bill_congress_type_number.is_empty() {
            match bills_protocol::bill_number_to_bill_id(&self.bill_congress_type_number) {
                Ok(bill_id) => self.bill_id = bill_id,
                Err(e) => log::debug!("Cannot backfill bill_id: {e}"),
            }
        }
        if self.bill_congress_type_number.is_empty() && !self.bill_id.is_empty() {
            match bill_id_to_bill_number(&self.bill_id) {
                Ok(number) => self.bill_congress_type_number = number,
                Err(e) => log::debug!("Cannot backfill bill_congress_type_number: {e}"),
            }
        }
    }
}

/// Normalized metadata for one bill (or bill version)
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BillRecord {
    pub bill_congress_type_number: String,
    pub congress: String,
    pub bill_type: String,
    pub number: String,
    pub official_title: String,
    pub short_title: String,
    pub popular_title: String,
    pub titles: Vec<String>,
    pub titles_whole_bill: Vec<String>,
    pub actions: Vec<ActionItem>,
    pub cosponsors: Vec<CosponsorItem>,
    pub committees: Vec<CommitteeItem>,
    pub history: serde_json::Value,
    pub related_bills: Vec<RelatedBillReference>,
    pub related_dict: RelatedBillMap,
}

impl BillRecord {
    /// Ordinary titles to index: every title plus the short title, year-stripped.
    #[must_use]
    pub fn indexed_titles(&self) -> Vec<String> {
        normalized_titles(
            self.titles
                .iter()
                .map(String::as_str)
                .chain(std::iter::once(self.short_title.as_str())),
        )
    }

    /// Main titles to index: official and short title, year-stripped.
    #[must_use]
    pub fn indexed_main_titles(&self) -> Vec<String> {
        normalized_titles([self.official_title.as_str(), self.short_title.as_str()])
    }
}

fn normalized_titles<'a>(titles: impl IntoIterator<Item = &'a str>) -> Vec<String> {
    bills_text::dedup_preserving_order(
        titles
            .into_iter()
            .map(bills_text::strip_trailing_year)
            .filter(|title| !title.is_empty()),
    )
}

// Upstream writes explicit nulls for absent strings, lists and flags.
fn null_as_default<'de, D, T>(deserializer: D) -> std::result::Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

// Congress numbers and districts appear both quoted and bare upstream.
fn string_or_number<'de, D>(deserializer: D) -> std::result::Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    use serde::de::Error;

    match serde_json::Value::deserialize(deserializer)? {
        serde_json::Value::Null => Ok(String::new()),
        serde_json::Value::String(s) => Ok(s),
        serde_json::Value::Number(n) => Ok(n.to_string()),
        other => Err(D::Error::custom(format!(
            "expected string or number, got {other}"
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn lenient_scalar_fields() {
        let raw = r#"{
            "congress": 116,
            "number": "1500",
            "bill_type": null,
            "cosponsors": [{"name": "Rep. X", "district": 7, "state": "CA"}],
            "titles": [{"as": null, "type": "short", "title": "Consumers First Act", "is_for_portion": false}]
        }"#;
        let data: DataJson = serde_json::from_str(raw).unwrap();
        assert_eq!(data.congress, "116");
        assert_eq!(data.number, "1500");
        assert_eq!(data.bill_type, "");
        assert_eq!(data.cosponsors[0].district, "7");
        assert_eq!(data.titles[0].as_of, "");
    }

    #[test]
    fn null_lists_and_flags_read_as_empty() {
        let raw = r#"{
            "congress": "116",
            "related_bills": null,
            "committees": [{"committee": "House Financial Services", "activity": null}],
            "titles": [{"type": "short", "title": "Consumers First Act", "is_for_portion": null}],
            "actions": null
        }"#;
        let data: DataJson = serde_json::from_str(raw).unwrap();
        assert!(data.related_bills.is_empty());
        assert!(data.actions.is_empty());
        assert!(data.committees[0].activity.is_empty());
        assert!(!data.titles[0].is_for_portion);

        let data: DataJson = serde_json::from_str(r#"{"congress": "116", "committees": null}"#).unwrap();
        assert!(data.committees.is_empty());
    }

    #[test]
    fn indexed_titles_strip_years_and_dedup() {
        let record = BillRecord {
            official_title: "To amend the Consumer Financial Protection Act of 2010".to_string(),
            short_title: "Consumers First Act of 2020".to_string(),
            titles: vec![
                "Consumers First Act".to_string(),
                "Consumers First Act of 2020".to_string(),
                String::new(),
            ],
            ..BillRecord::default()
        };

        assert_eq!(record.indexed_titles(), vec!["Consumers First Act"]);
        assert_eq!(
            record.indexed_main_titles(),
            vec![
                "To amend the Consumer Financial Protection Act",
                "Consumers First Act"
            ]
        );
    }

    #[test]
    fn title_match_backfills_and_dedups() {
        let mut item = RelatedBillItem::for_bill_number("116s2341");
        assert_eq!(item.bill_id, "s2341-116");

        assert!(item.record_title_match(Reason::TitleMatch, "Consumers First Act", false));
        assert!(!item.record_title_match(Reason::TitleMatch, "Consumers First Act", false));
        assert!(item.record_title_match(Reason::MainTitleMatch, "Consumers First Act", true));

        assert_eq!(item.reason, vec![Reason::TitleMatch, Reason::MainTitleMatch]);
        assert_eq!(item.identified_by, vec![IDENTIFIED_BY_BILLMAP]);
        assert_eq!(item.titles, vec!["Consumers First Act"]);
        assert_eq!(item.titles_whole_bill, vec!["Consumers First Act"]);
    }

    #[test]
    fn reference_seeds_reasons_and_sources() {
        let reference = RelatedBillReference {
            bill_id: "hr1500-116".to_string(),
            identified_by: "CRS".to_string(),
            reason: "related, identical".to_string(),
            kind: "bill".to_string(),
            bill_congress_type_number: String::new(),
        };
        let item = RelatedBillItem::from_reference(&reference).unwrap();
        assert_eq!(item.bill_congress_type_number, "116hr1500");
        assert_eq!(item.identified_by, vec!["CRS"]);
        assert_eq!(item.kind, "bill");
        assert_eq!(item.reason.len(), 2);
    }
}
