pub mod header;
pub mod picker;
