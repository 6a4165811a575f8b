pub mod config;
pub mod driver;
pub mod fetcher;
pub mod loader;
pub mod resource;
pub mod schema;
pub mod transform;

pub use config::Config;
pub use driver::Driver;
pub use resource::Resource;
