pub mod profile_mapper;
pub mod progression_mapper;
pub mod roster_mapper;
