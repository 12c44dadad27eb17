//! Drop expansion engine: tag sets, work sets, weighted selection, and the
//! fixed-point expansion loop.

pub mod expand;
pub mod selector;
pub mod tags;
pub mod work_set;

pub use expand::*;
pub use selector::*;
pub use tags::*;
pub use work_set::*;
