//! Portal access: request construction, transport, and record extraction.

mod client;
mod extract;
mod requests;

pub use client::{dispatch_case_batches, dispatch_room_batch, Fetch, PortalClient, USER_AGENT};
pub use extract::{extract_cases, extract_room_assignments, ExtractError, RecordShape};
pub use requests::{build_case_queries, build_room_queries, CaseQuery, RoomQuery, TABLE_TYPE};
