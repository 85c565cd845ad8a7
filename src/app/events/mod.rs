pub mod custom;
pub mod generator;
