/// Default CLI values, read by `src/bin/raytracer.rs`.
pub const DEFAULT_WIDTH: u32 = 640;
pub const DEFAULT_HEIGHT: u32 = 480;
pub const DEFAULT_DEPTH: u32 = 3;
pub const DEFAULT_GAMMA: f64 = 2.2;
pub const DEFAULT_SCENE: &str = "config/basic_scene.ini";
pub const DEFAULT_CAMERA: &str = "config/basic_camera.ini";
pub const DEFAULT_IMAGE: &str = "images/out.png";
