pub mod camera;
pub mod config;
pub mod constants;
pub mod error;
pub mod pointer;
pub mod scene;
pub mod text;
pub mod update;
pub mod viewport;

pub use camera::*;
pub use config::*;
pub use error::ConfigError;
pub use pointer::*;
pub use scene::*;
pub use update::*;
pub use viewport::*;

// Shaders bundled as string constants
pub static SCENE_WGSL: &str = include_str!("../shaders/scene.wgsl");
pub static POST_WGSL: &str = include_str!("../shaders/post.wgsl");
