pub mod table;

pub use table::ItemTable;
