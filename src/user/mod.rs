pub mod model;
pub mod name_cache;
pub mod service;
