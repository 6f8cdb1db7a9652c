pub mod placement;
pub mod sign;

pub use placement::{map_longitude, normalize_degrees, ZodiacPlacement};
pub use sign::{ZodiacSign, SIGN_COUNT, SIGN_WIDTH};
