pub mod beat_detector;
pub mod capture_provider;
pub mod driver_delegate;
pub mod sink_query;
