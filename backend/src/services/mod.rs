//! Services for the Agricultural Advisory Server

pub mod advisory;
pub mod archive;

pub use advisory::AdvisoryService;
pub use archive::WeatherArchive;
