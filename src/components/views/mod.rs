mod episode;
mod home;
mod settings;

pub use episode::*;
pub use home::*;
pub use settings::*;
