pub mod customers;
pub mod http;
pub mod prober;

pub use self::customers::{load_customers, render_customers};
pub use self::http::HttpApi;
pub use self::prober::{AvailabilityProber, ProbeReport};
