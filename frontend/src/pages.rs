pub mod country_page;
pub mod data_page;
pub mod error_page;
pub mod impact_page;

/// Shown in place of a chart whose dropdowns have nothing to offer.
pub const NO_RECORDS: &str = "⚠️ No Records found.";
