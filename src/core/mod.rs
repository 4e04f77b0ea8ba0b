pub mod fuzzy;
pub mod options;
