use bills_meta::{BillStore, RelatedBillItem, TitleIndex};
use bills_protocol::Reason;
use serde::{Deserialize, Serialize};

/// Groups smaller than this produce no edges
pub const MIN_GROUP_SIZE: usize = 2;

/// Which title index a pass reads
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TitleKind {
    /// All titles plus the short title
    Title,
    /// Official and short title
    MainTitle,
}

impl TitleKind {
    #[must_use]
    pub fn reason(self) -> Reason {
        match self {
            Self::Title => Reason::TitleMatch,
            Self::MainTitle => Reason::MainTitleMatch,
        }
    }

    /// Main-title matches are recorded under `titles_whole_bill`
    #[must_use]
    pub const fn whole_bill(self) -> bool {
        matches!(self, Self::MainTitle)
    }

    fn index(self, store: &BillStore) -> &TitleIndex {
        match self {
            Self::Title => store.titles(),
            Self::MainTitle => store.main_titles(),
        }
    }
}

/// Counters for one or more relation passes
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RelationStats {
    /// Title groups visited
    pub groups: usize,

    /// Related-bill items created
    pub edges_created: usize,

    /// Existing items that gained a reason, source or title
    pub edges_merged: usize,

    /// Group members with no stored record
    pub missing_bills: usize,
}

/// Adds title-based relations to the `related_dict` of stored bills.
pub struct RelationGraphBuilder<'a> {
    store: &'a BillStore,
    stats: RelationStats,
}

impl<'a> RelationGraphBuilder<'a> {
    pub fn new(store: &'a BillStore) -> Self {
        Self {
            store,
            stats: RelationStats::default(),
        }
    }

    #[must_use]
    pub fn apply_titles(mut self) -> Self {
        self.apply(TitleKind::Title);
        self
    }

    #[must_use]
    pub fn apply_main_titles(mut self) -> Self {
        self.apply(TitleKind::MainTitle);
        self
    }

    pub fn build(self) -> RelationStats {
        log::info!(
            "Relation graph: {} groups, {} edges created, {} merged, {} missing bills",
            self.stats.groups,
            self.stats.edges_created,
            self.stats.edges_merged,
            self.stats.missing_bills
        );
        self.stats
    }

    /// Relate every pair of distinct bills that share a title in `kind`'s index.
    pub fn apply(&mut self, kind: TitleKind) {
        let groups = kind.index(self.store).groups();
        let reason = kind.reason();
        log::info!("Applying {} relations over {} titles", reason, groups.len());

        for (title, bills) in &groups {
            if bills.len() < MIN_GROUP_SIZE {
                continue;
            }
            self.stats.groups += 1;

            for source in bills {
                let updated = self.store.update(source, |record| {
                    let mut created = 0;
                    let mut merged = 0;
                    for target in bills.iter().filter(|target| *target != source) {
                        match record.related_dict.get_mut(target) {
                            Some(item) => {
                                if item.record_title_match(reason.clone(), title, kind.whole_bill())
                                {
                                    merged += 1;
                                }
                            }
                            None => {
                                let mut item = RelatedBillItem::for_bill_number(target.as_str());
                                item.record_title_match(reason.clone(), title, kind.whole_bill());
                                record.related_dict.insert(target.clone(), item);
                                created += 1;
                            }
                        }
                    }
                    (created, merged)
                });

                match updated {
                    Some((created, merged)) => {
                        self.stats.edges_created += created;
                        self.stats.edges_merged += merged;
                    }
                    None => {
                        log::error!("Bill {source} from title group {title:?} is not in the store");
                        self.stats.missing_bills += 1;
                    }
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bills_meta::{BillRecord, RelatedBillReference};
    use bills_protocol::IDENTIFIED_BY_BILLMAP;
    use pretty_assertions::assert_eq;

    fn record(bill: &str, official: &str, short: &str, titles: &[&str]) -> BillRecord {
        BillRecord {
            bill_congress_type_number: bill.to_string(),
            congress: bill[..3].to_string(),
            official_title: official.to_string(),
            short_title: short.to_string(),
            titles: titles.iter().map(|t| (*t).to_string()).collect(),
            ..BillRecord::default()
        }
    }

    fn consumers_first_store() -> BillStore {
        let store = BillStore::new();
        store.insert_record(record(
            "116hr1500",
            "To protect consumers",
            "Consumers First Act of 2020",
            &["Consumers First Act of 2020"],
        ));
        store.insert_record(record(
            "116s2341",
            "To protect consumers",
            "Consumers First Act",
            &["Consumers First Act"],
        ));
        store
    }

    #[test]
    fn title_groups_link_both_directions() {
        let store = consumers_first_store();
        let stats = RelationGraphBuilder::new(&store).apply_titles().build();

        assert_eq!(stats.edges_created, 2);
        assert_eq!(stats.missing_bills, 0);

        let house = store.get("116hr1500").unwrap();
        let item = &house.related_dict["116s2341"];
        assert_eq!(item.bill_id, "s2341-116");
        assert_eq!(item.reason, vec![Reason::TitleMatch]);
        assert_eq!(item.identified_by, vec![IDENTIFIED_BY_BILLMAP]);
        assert_eq!(item.titles, vec!["Consumers First Act"]);
        assert!(item.titles_whole_bill.is_empty());

        let senate = store.get("116s2341").unwrap();
        assert_eq!(senate.related_dict["116hr1500"].bill_id, "hr1500-116");
        assert!(!senate.related_dict.contains_key("116s2341"));
    }

    #[test]
    fn main_titles_record_whole_bill_titles() {
        let store = consumers_first_store();
        RelationGraphBuilder::new(&store)
            .apply_titles()
            .apply_main_titles()
            .build();

        let house = store.get("116hr1500").unwrap();
        let item = &house.related_dict["116s2341"];
        assert_eq!(item.reason, vec![Reason::TitleMatch, Reason::MainTitleMatch]);
        assert_eq!(
            item.titles_whole_bill,
            vec!["Consumers First Act", "To protect consumers"]
        );
    }

    #[test]
    fn reapplying_is_idempotent() {
        let store = consumers_first_store();
        RelationGraphBuilder::new(&store)
            .apply_titles()
            .apply_main_titles()
            .build();
        let before = store.records();

        let stats = RelationGraphBuilder::new(&store)
            .apply_titles()
            .apply_main_titles()
            .build();

        assert_eq!(stats.edges_created, 0);
        assert_eq!(stats.edges_merged, 0);
        assert_eq!(store.records(), before);
    }

    #[test]
    fn merges_into_upstream_references() {
        let store = BillStore::new();
        let mut house = record("116hr1500", "", "Consumers First Act", &[]);
        let reference = RelatedBillReference {
            bill_id: "s2341-116".to_string(),
            identified_by: "CRS".to_string(),
            reason: "related".to_string(),
            kind: "bill".to_string(),
            bill_congress_type_number: "116s2341".to_string(),
        };
        house.related_dict.insert(
            "116s2341".to_string(),
            RelatedBillItem::from_reference(&reference).unwrap(),
        );
        store.insert_record(house);
        store.insert_record(record("116s2341", "", "Consumers First Act", &[]));

        let stats = RelationGraphBuilder::new(&store).apply_titles().build();
        assert_eq!(stats.edges_merged, 1);
        assert_eq!(stats.edges_created, 1);

        let item = &store.get("116hr1500").unwrap().related_dict["116s2341"];
        assert_eq!(item.reason, vec![Reason::TitleMatch, Reason::Related]);
        assert_eq!(item.identified_by, vec!["CRS", IDENTIFIED_BY_BILLMAP]);
        assert_eq!(item.kind, "bill");
    }

    #[test]
    fn singleton_groups_are_ignored() {
        let store = BillStore::new();
        store.insert_record(record("116hr1", "", "Lonely Act", &[]));

        let stats = RelationGraphBuilder::new(&store)
            .apply_titles()
            .apply_main_titles()
            .build();
        assert_eq!(stats.groups, 0);
        assert!(store.get("116hr1").unwrap().related_dict.is_empty());
    }
}
