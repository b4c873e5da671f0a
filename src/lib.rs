pub mod cleaner;
pub mod error;
pub mod loader;
pub mod logging;
pub mod storage;
pub mod table;
