//! Domain types for the bus journey planner.
//!
//! This module contains the core domain model types that represent
//! validated transit data. Identifier types enforce their invariants at
//! construction time, so code that receives them can trust their validity.

mod error;
mod journey;
mod route;
mod service;
mod stop;
mod stop_code;

pub use error::DomainError;
pub use journey::{Journey, JourneySegment};
pub use route::RouteStop;
pub use service::{
    BusService, Direction, InvalidDirection, InvalidServiceKey, InvalidServiceNo, ServiceKey,
    ServiceNo,
};
pub use stop::{BusStop, Location};
pub use stop_code::{InvalidStopCode, StopCode};
