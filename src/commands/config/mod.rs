pub mod model;
mod set;
mod show;
