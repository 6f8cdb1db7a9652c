pub mod observer;
pub mod resolver;

pub use observer::{Observer, ObserverError};
pub use resolver::{resolve, ResolveOptions, ResolvedMoment, TimeError, TimezoneSpec, DEFAULT_TIME};
