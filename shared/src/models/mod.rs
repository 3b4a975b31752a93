//! Domain models for the Agricultural Decision Support System

mod calendar;
mod climate;
mod crop;
mod daily;
mod observation;
mod recommendation;
mod risk;
mod zone;

pub use calendar::*;
pub use climate::*;
pub use crop::*;
pub use daily::*;
pub use observation::*;
pub use recommendation::*;
pub use risk::*;
pub use zone::*;
