// navigation
pub mod navbar;
pub mod select;

// plots
pub mod plot;
pub mod pie_engine;
pub mod trend_engine;
pub mod impact_engine;
pub mod map_engine;
pub mod world_map;

// tables
pub mod record_table;
pub mod comparison_table;
