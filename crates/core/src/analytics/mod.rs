//! Pure, synchronous helpers run over already-fetched data.

pub mod category;
pub mod comparison;
pub mod correlation;
pub mod overlap;
pub mod planner;
pub mod search;
