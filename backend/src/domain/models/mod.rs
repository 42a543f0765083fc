pub mod animal;
pub mod profile;
pub mod progression;
pub mod sticker;
