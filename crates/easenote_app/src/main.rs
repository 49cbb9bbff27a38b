//! EaseNote headless simulator
//!
//! Runs the application shell against a scripted headless event loop and
//! logs every presented frame.

use anyhow::{Context, Result};
use clap::Parser;
use easenote_app::{logging, AppConfig, Shell, TracingPresenter};
use easenote_auth::{LocalIdentityProvider, UserRecord};
use easenote_platform::{
    ControlFlow, EdgeInsets, Event, EventLoop, HeadlessEventLoop, HeadlessWindow, Window,
    WindowEvent,
};
use std::path::PathBuf;
use tracing::{info, warn};

/// Client id used when no configuration provides one
const LOCAL_CLIENT_ID: &str = "local-simulation";

#[derive(Parser)]
#[command(name = "easenote")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "EaseNote headless simulator", long_about = None)]
struct Cli {
    /// Configuration file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Sign-in client id, overrides the configuration file
    #[arg(long)]
    client_id: Option<String>,

    /// Viewport width
    #[arg(long, default_value = "400")]
    width: f32,

    /// Viewport height
    #[arg(long, default_value = "800")]
    height: f32,

    #[arg(long, default_value = "44")]
    inset_top: f32,

    #[arg(long, default_value = "34")]
    inset_bottom: f32,

    #[arg(long, default_value = "0")]
    inset_left: f32,

    #[arg(long, default_value = "0")]
    inset_right: f32,

    /// Number of frames to simulate
    #[arg(long, default_value = "120")]
    frames: u32,

    /// Rotate the viewport before this frame
    #[arg(long)]
    rotate_at: Option<u32>,

    /// Sign in before this frame
    #[arg(long, default_value = "10")]
    sign_in_at: u32,

    /// Log out before this frame
    #[arg(long)]
    logout_at: Option<u32>,

    /// Title height reported after each mount
    #[arg(long, default_value = "28")]
    title_height: f32,

    /// Enable verbose output
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => AppConfig::load(path)?,
        None => AppConfig::default(),
    };
    if let Some(client_id) = &cli.client_id {
        config.auth.web_client_id = client_id.clone();
    }

    let filter = if cli.verbose {
        "debug"
    } else {
        config.logging.filter.as_str()
    };
    logging::init(filter)?;

    if config.auth.web_client_id.trim().is_empty() {
        warn!("no sign-in client id configured, using {:?}", LOCAL_CLIENT_ID);
        config.auth.web_client_id = LOCAL_CLIENT_ID.to_string();
    }

    let insets = EdgeInsets::new(cli.inset_top, cli.inset_bottom, cli.inset_left, cli.inset_right);
    let window = HeadlessWindow::new(cli.width, cli.height, insets);
    let geometry = window.geometry().context("Invalid viewport")?;

    let provider = LocalIdentityProvider::with_account(
        UserRecord::new("local-user").with_display_name("Local User"),
    );
    let mut shell = Shell::new(&config, provider, geometry, TracingPresenter::new())?;

    let mut event_loop = HeadlessEventLoop::new(window).frames(cli.frames);
    if let Some(frame) = cli.rotate_at {
        // Swap axes and move the notch inset to the leading edge
        event_loop = event_loop
            .schedule(
                frame,
                Event::Window(WindowEvent::Resized {
                    width: cli.height,
                    height: cli.width,
                }),
            )
            .schedule(
                frame,
                Event::Window(WindowEvent::SafeAreaChanged(EdgeInsets::new(
                    0.0,
                    cli.inset_bottom.min(21.0),
                    cli.inset_top,
                    cli.inset_top,
                ))),
            );
    }

    info!(
        width = cli.width,
        height = cli.height,
        frames = cli.frames,
        "starting headless simulation"
    );

    let mut frame = 0u32;
    let mut failure = None;
    event_loop.run(|event, _window| {
        if let Event::Frame { .. } = event {
            if frame == cli.sign_in_at {
                shell.sign_in();
            }
            if cli.logout_at == Some(frame) {
                shell.logout();
            }
            frame += 1;
        }

        match shell.handle_event(&event) {
            Ok(flow) => {
                shell.report_title_height(cli.title_height);
                flow
            }
            Err(err) => {
                failure = Some(err);
                ControlFlow::Exit
            }
        }
    })?;

    if let Some(err) = failure {
        return Err(err).context("Simulation failed");
    }

    let presented = shell.presenter().map(TracingPresenter::frames).unwrap_or(0);
    info!(
        screen = ?shell.active_screen(),
        presented,
        "simulation finished"
    );
    Ok(())
}
