mod preferences;
mod turns;

pub use preferences::PreferencesRepository;
pub use turns::TurnRepository;
