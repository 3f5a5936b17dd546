// CSV input and output
pub mod reader;
pub mod writer;

pub use reader::{load_addresses, load_locations, LoadError};
pub use writer::{write_results, WriteError};
