pub mod capture_session;
pub mod driver;
pub mod shared;
