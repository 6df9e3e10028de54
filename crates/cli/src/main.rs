use std::path::{Path, PathBuf};
use std::process;
use std::time::Duration;

use clap::{Parser, Subcommand};

use naotrack_core::camera::domain::frame_source::FrameSource;
use naotrack_core::camera::domain::image_writer::ImageWriter;
use naotrack_core::camera::infrastructure::image_file_reader::ImageFileReader;
use naotrack_core::camera::infrastructure::image_file_writer::ImageFileWriter;
use naotrack_core::display::domain::frame_display::FrameDisplay;
use naotrack_core::display::infrastructure::null_display::NullDisplay;
use naotrack_core::display::infrastructure::snapshot_display::SnapshotDisplay;
use naotrack_core::pipeline::pipeline_logger::SummaryPipelineLogger;
use naotrack_core::pipeline::track_ball_use_case::{TrackBallUseCase, TrackingReport};
use naotrack_core::shared::constants::DISPLAY_WINDOW_NAME;
use naotrack_core::shared::settings::{Settings, TrackingSettings};
use naotrack_core::simulation::domain::environment::EnvironmentKind;
use naotrack_core::simulation::domain::launch_plan::{LaunchOptions, LaunchPlan};
use naotrack_core::simulation::domain::port_allocator::PortAllocator;
use naotrack_core::tracking::domain::blob_locator::BlobLocator;
use naotrack_core::tracking::domain::color_preset::ColorPreset;
use naotrack_core::tracking::infrastructure::color_blob_locator::{
    ColorBlobLocator, LocatorConfig,
};

/// Color-blob tracking for NAO camera frames.
#[derive(Parser)]
#[command(name = "naotrack")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Locate a colored ball in a single image and print its centroid.
    Locate {
        /// Input image file.
        input: PathBuf,

        /// Target color: red, green or blue.
        #[arg(long)]
        color: Option<String>,

        /// Resize factor applied before detection (0.0-1.0].
        #[arg(long)]
        scale: Option<f64>,

        /// Write the annotated frame here.
        #[arg(long)]
        output: Option<PathBuf>,

        /// Skip annotation.
        #[arg(long)]
        no_draw: bool,
    },

    /// Track a colored ball through an image or a directory of frames.
    Track {
        /// Input image file or directory of frames.
        input: PathBuf,

        /// Target color: red, green or blue.
        #[arg(long)]
        color: Option<ColorPreset>,

        /// Resize factor applied before detection (0.0-1.0].
        #[arg(long)]
        scale: Option<f64>,

        /// Stop after this many seconds.
        #[arg(long)]
        timeout: Option<f64>,

        /// Save annotated frames to this directory.
        #[arg(long)]
        snapshots: Option<PathBuf>,

        /// Show annotated frames in a window (requires the highgui feature).
        #[arg(long)]
        display: bool,
    },

    /// Print the commands that bring up a simulated environment.
    Plan {
        /// Environment: NaoWalking, NaoBalancing or NaoTracking.
        env: String,

        /// Simulator remote API port.
        #[arg(long)]
        sim_port: Option<u16>,

        /// Robot daemon port.
        #[arg(long)]
        nao_port: Option<u16>,

        /// Run the simulator with its GUI.
        #[arg(long)]
        gui: bool,

        /// Quit the simulator when the simulation ends.
        #[arg(long)]
        exit_after_sim: bool,
    },
}

fn main() {
    env_logger::init();

    if let Err(e) = run() {
        eprintln!("Error: {e}");
        process::exit(1);
    }
}

fn run() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    validate(&cli.command)?;
    let settings = Settings::load();

    match cli.command {
        Command::Locate {
            input,
            color,
            scale,
            output,
            no_draw,
        } => {
            let color = color.unwrap_or_else(|| settings.tracking.color.to_string());
            let config = locator_config(&settings.tracking, scale, !no_draw);
            run_locate(&input, &color, config, output.as_deref())
        }
        Command::Track {
            input,
            color,
            scale,
            timeout,
            snapshots,
            display,
        } => {
            let color = color.unwrap_or(settings.tracking.color);
            let wants_frames = display || snapshots.is_some();
            let config = locator_config(&settings.tracking, scale, wants_frames);
            if wants_frames && !config.draw {
                log::warn!("Annotation is disabled in settings; no frames will be shown");
            }
            let display = build_display(display, snapshots.as_deref())?;
            let report = run_track(
                &input,
                color,
                config,
                display,
                timeout.map(Duration::from_secs_f64),
            )?;
            println!("{}", format_report(&report));
            Ok(())
        }
        Command::Plan {
            env,
            sim_port,
            nao_port,
            gui,
            exit_after_sim,
        } => {
            let kind: EnvironmentKind = env.parse()?;
            let mut ports = PortAllocator::new(sim_port.unwrap_or(settings.simulation.sim_port));
            let port = ports.allocate().ok_or("No simulator port available")?;
            let options = LaunchOptions {
                headless: !gui,
                exit_after_sim,
                nao_port,
            };
            let plan = LaunchPlan::new(kind, port, &settings.simulation, &options);
            print_plan(&plan, &settings);
            Ok(())
        }
    }
}

/// Settings defaults with command-line overrides. `draw` only ever narrows
/// the configured annotation switch.
fn locator_config(tracking: &TrackingSettings, scale: Option<f64>, draw: bool) -> LocatorConfig {
    let mut config = tracking.locator_config();
    config.scale = scale.unwrap_or(config.scale);
    config.draw = config.draw && draw;
    config
}

fn run_locate(
    input: &Path,
    color: &str,
    config: LocatorConfig,
    output: Option<&Path>,
) -> Result<(), Box<dyn std::error::Error>> {
    let mut reader = ImageFileReader::new();
    reader.open(input)?;
    let frame = reader.frames().next().ok_or("No frames in image")??;
    reader.close();

    let locator = ColorBlobLocator::new(config);
    let result = locator.locate_named(Some(&frame), color);

    match result.centroid() {
        Some((x, y)) => println!("{x},{y}"),
        None => println!("no detection"),
    }

    if let (Some(path), Some(annotated)) = (output, result.frame.as_ref()) {
        ImageFileWriter::new().write(path, annotated, None)?;
        log::info!("Annotated frame written to {}", path.display());
    }
    Ok(())
}

fn run_track(
    input: &Path,
    color: ColorPreset,
    config: LocatorConfig,
    display: Box<dyn FrameDisplay>,
    timeout: Option<Duration>,
) -> Result<TrackingReport, Box<dyn std::error::Error>> {
    let mut use_case = TrackBallUseCase::new(
        Box::new(ImageFileReader::new()),
        Box::new(ColorBlobLocator::new(config)),
        color,
        display,
        Box::new(SummaryPipelineLogger::default()),
    );
    use_case.execute(input, timeout)
}

fn build_display(
    window: bool,
    snapshots: Option<&Path>,
) -> Result<Box<dyn FrameDisplay>, Box<dyn std::error::Error>> {
    if window {
        return open_window();
    }
    Ok(match snapshots {
        Some(dir) => Box::new(SnapshotDisplay::new(
            dir,
            DISPLAY_WINDOW_NAME,
            Box::new(ImageFileWriter::new()),
        )),
        None => Box::new(NullDisplay),
    })
}

#[cfg(feature = "highgui")]
fn open_window() -> Result<Box<dyn FrameDisplay>, Box<dyn std::error::Error>> {
    use naotrack_core::display::infrastructure::highgui_display::HighGuiDisplay;
    Ok(Box::new(HighGuiDisplay::default()))
}

#[cfg(not(feature = "highgui"))]
fn open_window() -> Result<Box<dyn FrameDisplay>, Box<dyn std::error::Error>> {
    Err("--display needs a build with the highgui feature".into())
}

fn format_report(report: &TrackingReport) -> String {
    let mut text = format!(
        "Processed {} frame(s), {} with a detection ({:.1}%)",
        report.frames_processed,
        report.frames_detected,
        report.detection_rate() * 100.0
    );
    if report.frames_skipped > 0 {
        text.push_str(&format!(", {} skipped", report.frames_skipped));
    }
    if report.timed_out {
        text.push_str(", stopped at timeout");
    }
    match report.last_centroid {
        Some((x, y)) => text.push_str(&format!("\nLast centroid: {x},{y}")),
        None => text.push_str("\nLast centroid: none"),
    }
    text
}

fn print_plan(plan: &LaunchPlan, settings: &Settings) {
    println!("Environment: {}", plan.kind);
    println!("Endpoint:    {}", plan.endpoint);
    println!("Simulator:   {}", plan.simulator_command(&settings.simulation));
    for cmd in plan.daemon_commands(&settings.simulation) {
        println!("Daemon:      {cmd}");
    }
    println!("Settle:      {:.1}s", plan.startup_delay().as_secs_f64());
}

fn validate(command: &Command) -> Result<(), Box<dyn std::error::Error>> {
    let (input, scale) = match command {
        Command::Locate { input, scale, .. } => (input, scale),
        Command::Track {
            input,
            scale,
            timeout,
            ..
        } => {
            if let Some(t) = timeout {
                if !t.is_finite() || *t < 0.0 {
                    return Err(format!("Timeout must be a non-negative number, got {t}").into());
                }
            }
            (input, scale)
        }
        Command::Plan { .. } => return Ok(()),
    };
    if !input.exists() {
        return Err(format!("Input not found: {}", input.display()).into());
    }
    if let Some(s) = scale {
        if !s.is_finite() || *s <= 0.0 || *s > 1.0 {
            return Err(format!("Scale must be in (0.0, 1.0], got {s}").into());
        }
    }
    Ok(())
}
