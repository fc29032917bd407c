pub mod classifier;
pub mod entities;
pub mod ports;
pub mod recommender;
pub mod value_objects;
