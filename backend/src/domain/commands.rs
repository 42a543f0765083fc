//! Domain-level command types
//! These structs are used by services inside the domain layer and are **not**
//! exposed over the public API. The REST layer maps the DTOs defined in the
//! `shared` crate to these internal types.

pub mod profile {
    use shared::Language;

    /// Input for creating a new profile.
    #[derive(Debug, Clone)]
    pub struct CreateProfileCommand {
        pub kid_name: String,
        pub primary_language: Language,
        pub secondary_language: Language,
        pub icon: Option<String>,
    }

    /// Partial update of a profile; `None` leaves a field unchanged.
    #[derive(Debug, Clone, Default)]
    pub struct UpdateProfileCommand {
        pub kid_name: Option<String>,
        pub primary_language: Option<Language>,
        pub secondary_language: Option<Language>,
        pub icon: Option<String>,
    }
}

pub mod stickers {
    /// Input for repairing a sticker board.
    #[derive(Debug, Clone, Default)]
    pub struct ReconcileStickersCommand {
        /// `None` means "every level the profile has passed"
        pub allowed_max_level: Option<u32>,
        pub exclude_level: Option<u32>,
    }
}
