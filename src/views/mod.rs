//! Pure computations behind the presentational widgets. Nothing here
//! touches the network or the session.

pub mod adherence;
pub mod calendar;
pub mod chart;
pub mod vitals;
