pub mod date;
pub mod filter;
pub mod quick_filter;
pub mod record;
pub mod search;

pub use filter::{DateRange, FilterError, FilterSpec, SessionsRange};
pub use quick_filter::QuickFilter;
pub use record::{Annotation, MemberRecord, Status};
