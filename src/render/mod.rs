pub mod settings;
pub mod validation;
pub mod view;

pub use settings::{RenderMode, RenderSettings};
pub use validation::validate_settings;
pub use view::View;
