//! # Bills Graph
//!
//! Related-bill graph built from shared titles.
//!
//! ## Architecture
//!
//! ```text
//! BillStore
//!     │
//!     ├──> Title index (ordinary titles)
//!     │      └─ every pair in a group → bills-title_match
//!     │
//!     ├──> Main title index (official + short)
//!     │      └─ every pair in a group → bills-main_title_match
//!     │
//!     └──> related_dict of each stored bill
//!            ├─ reasons merged and priority-sorted
//!            ├─ identified_by gains "BillMap"
//!            └─ bill_id / bill_congress_type_number backfilled
//! ```
//!
//! Applying the same index twice leaves every record unchanged.

mod builder;

pub use builder::{RelationGraphBuilder, RelationStats, TitleKind, MIN_GROUP_SIZE};
