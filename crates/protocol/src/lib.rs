//! # Bills Protocol
//!
//! Conventions shared by every crate in the workspace:
//!
//! - bill identifiers in their two upstream spellings (`116hr1500` and `hr1500-116`)
//!   and the mapping between identifiers and the congress data tree;
//! - relation reasons and their fixed priority order.

mod error;
mod identifier;
mod reason;

pub use error::{ProtocolError, Result};
pub use identifier::{
    bill_id_to_bill_number, bill_number_from_path, bill_number_to_bill_id,
    relative_path_from_bill_number, BillNumber,
};
pub use reason::{
    join_reasons, merge_reason, parse_reason_list, sort_reasons, Reason, IDENTIFIED_BY_BILLMAP,
};
