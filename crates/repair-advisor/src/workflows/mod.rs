pub mod legitimacy;
pub mod quote_import;
