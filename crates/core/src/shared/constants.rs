/// Name of the interactive debug window.
pub const DISPLAY_WINDOW_NAME: &str = "Nao";

/// Initial edge length of the debug window in pixels.
pub const DISPLAY_WINDOW_SIZE: i32 = 300;

pub const IMAGE_EXTENSIONS: &[&str] = &["jpg", "jpeg", "png", "bmp", "tiff", "tif", "webp"];

/// Remote API port the simulator listens on when none is configured.
pub const DEFAULT_SIM_PORT: u16 = 19997;

/// Robot-control daemon port used by the vendor toolchain.
pub const DEFAULT_NAO_PORT: u16 = 5995;

pub const DEFAULT_LOCAL_IP: &str = "127.0.0.1";

/// Seconds to wait after launching a headless simulator.
pub const HEADLESS_STARTUP_SECS: f64 = 1.5;

/// Seconds to wait after launching a simulator with its GUI.
pub const GUI_STARTUP_SECS: f64 = 5.0;

/// Seconds to let the robot-control daemon settle after launch.
pub const DAEMON_STARTUP_SECS: f64 = 5.0;
