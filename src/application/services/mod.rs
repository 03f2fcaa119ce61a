//! Application services
//!
//! Each service handles one step of an invocation and depends on
//! infrastructure traits for I/O.

pub mod params;
pub mod session;
pub mod transport;

pub use params::ParamsSource;
pub use session::{Operation, OperationOutput, SessionService};
pub use transport::TransportResolver;
