pub mod summary;
pub mod table;
pub mod trend_chart;
