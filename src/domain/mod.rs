pub mod actor;
pub mod geometry;
pub mod pathing;
pub mod protester;
