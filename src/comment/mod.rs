pub mod controller;
pub mod model;
pub mod render;
pub mod tree;
