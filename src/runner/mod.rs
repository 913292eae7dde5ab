//! @ai:module:intent Timed invocation and batch driving
//! @ai:module:layer application
//! @ai:module:public_api TimedInvoker, Timed, BatchDriver, BenchmarkContext

pub mod driver;
pub mod invoker;

pub use driver::{BatchDriver, BenchmarkContext};
pub use invoker::{Timed, TimedInvoker};
