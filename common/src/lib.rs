pub mod config;
pub mod error;
pub mod platform;
pub mod reflector;
pub mod session;
#[cfg(any(test, feature = "testing"))]
pub mod testing;

pub use config::*;
pub use error::*;
pub use platform::*;
pub use reflector::*;
pub use session::*;
