pub mod aggregator;
pub mod energy_detector;
pub mod energy_history;
pub mod sink_resolver;
