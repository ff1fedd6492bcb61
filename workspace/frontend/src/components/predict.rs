pub mod feature_chart;
pub mod form;
pub mod result_card;
pub mod risk_gauge;
