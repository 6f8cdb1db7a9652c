pub mod adapter;
pub mod provider;
pub mod sampler;
pub mod types;

pub use adapter::SwissEphemerisAdapter;
pub use provider::{EphemerisError, EphemerisProvider};
pub use sampler::{is_retrograde, station_hint, PositionSampler};
pub use types::{Body, BodyLongitude, RetrogradeSample, Station};
