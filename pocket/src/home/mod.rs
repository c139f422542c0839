//! Terminal-free logic of the home screen: day grouping, scroll animation and
//! the ledger selection debounce.

pub mod debounce;
pub mod grouping;
pub mod scroll;

pub use debounce::Debouncer;
pub use grouping::{group_by_day, Section, SectionLabels};
pub use scroll::{animate, HomeAnimation, ScrollGeometry, ScrollState, SnapPoint};
