pub mod camera;
pub mod config;
pub mod error;
pub mod geometry;
pub mod pipeline;
pub mod renderer;
pub mod scene;
pub mod starfield;
pub mod texture;
pub mod window;

pub use camera::OrbitCamera;
pub use config::ViewerConfig;
pub use error::RenderError;
pub use renderer::Renderer;
pub use window::run;
