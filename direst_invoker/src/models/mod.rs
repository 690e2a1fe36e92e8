pub mod codes;
pub mod date_arg;
pub mod table;
