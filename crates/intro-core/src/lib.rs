pub mod camera;
pub mod clock;
pub mod constants;
pub mod cue;
pub mod logo;
pub mod particles;
pub mod scene;
pub mod timeline;

pub static POINTS_WGSL: &str = include_str!("../shaders/points.wgsl");
pub static LOGO_WGSL: &str = include_str!("../shaders/logo.wgsl");

pub use camera::*;
pub use clock::*;
pub use constants::*;
pub use scene::*;
pub use timeline::*;
