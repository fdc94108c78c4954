//! Data containers: the input side of rendering.
//!
//! - **Value**: one loosely typed cell
//! - **Record**: a row of values, optionally addressable by column name
//! - **Table**: ordered records sharing one column list
//! - **Group / Grouping**: named tables, and a table split by one column
//!
//! Tables can also be loaded from CSV text via [`LoadOptions`].

pub mod group;
pub mod load;
pub mod record;
pub mod table;
pub mod value;

pub use group::{Group, Grouping};
pub use load::LoadOptions;
pub use record::Record;
pub use table::{Order, Table};
pub use value::Value;
