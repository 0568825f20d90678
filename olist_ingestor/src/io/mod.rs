pub mod archive;
pub mod csv;
pub mod sink;
