pub mod client;
pub mod errors;
pub mod executor;
pub mod parameter;
pub mod request;
mod system;
pub mod types;
pub mod utils;

pub use client::GoogleAnalytics;
pub use executor::{Executor, ResponseHandle};
pub use parameter::Parameter;
pub use request::Request;
pub use types::{Config, Proxy, Response};
