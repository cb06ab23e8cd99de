pub mod middleware;


pub use middleware::*;
