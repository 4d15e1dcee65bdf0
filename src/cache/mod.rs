//! Caching of filter dropdown values
//!
//! - **Attribute values** - distinct values per filter attribute with a TTL
//! - **Clock** - injectable time source so expiry can be driven in tests

pub mod attribute_values;
pub mod clock;

pub use attribute_values::{AttributeValueCache, CacheStats, DEFAULT_TTL};
pub use clock::{Clock, ManualClock, SystemClock};
