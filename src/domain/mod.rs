pub mod entity;
pub mod surroundings;
