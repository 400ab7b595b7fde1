// Repository module structure
pub mod errors;
mod file_system;
mod in_memory;
mod series;

// Re-export commonly used types
pub use errors::RepositoryError;
pub use file_system::FileSeriesRepository;
pub use in_memory::InMemorySeriesRepository;
pub use series::{decode_document, parse_time_of_day, SeriesKey, SeriesSource};
