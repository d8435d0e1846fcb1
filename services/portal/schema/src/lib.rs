pub mod church_settings;
pub mod reset_challenges;
pub mod theme_presets;
pub mod users;
