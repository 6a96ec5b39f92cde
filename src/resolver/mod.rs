//! Field resolution over infoboxes and tables.
//!
//! Both resolvers take dictionary labels and return plain values. Absent
//! fields are `None` or empty, never errors.

pub mod dom;
pub mod infobox;
pub mod table;

pub use infobox::{Infobox, InfoboxRow, YearRange};
pub use table::{CellItem, Table, TableRow};
