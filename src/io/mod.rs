pub mod code_table;
pub mod results;
