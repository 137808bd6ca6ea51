pub mod permissions;

pub use self::permissions::PresetManager;
