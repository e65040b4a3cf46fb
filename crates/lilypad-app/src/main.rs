//! lilypad desktop entry point.
//!
//! Runs the launcher headless against the host file system: loads the
//! configuration, plays a button script one frame at a time, writes the
//! launch record when a game is picked and optionally saves the last frame
//! as a PNG.
//!
//! Usage:
//!   lilypad-app [config.toml] [script] [screenshot.png]
//!
//! The config path falls back to `LILYPAD_CONFIG`, then `lilypad.toml`.
//! Example script: `down*3,a,down,a`.

mod script;

use std::cell::{Cell, RefCell};
use std::fs;
use std::path::{Path, PathBuf};
use std::rc::Rc;

use anyhow::{Context, Result};

use lilypad_core::config::LauncherConfig;
use lilypad_core::host::HostCallbacks;
use lilypad_core::input::Control;
use lilypad_core::launch::RecordFileSink;
use lilypad_core::launcher::{FrameStatus, Launcher};
use lilypad_core::vfs::RealVfs;

use script::Step;

/// Frames run before the script so the first view settles.
const WARMUP_FRAMES: usize = 2;

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let mut args = std::env::args().skip(1);
    let config_path = args
        .next()
        .or_else(|| std::env::var("LILYPAD_CONFIG").ok())
        .unwrap_or_else(|| "lilypad.toml".to_string());
    let steps = script::parse(&args.next().unwrap_or_default())?;
    let screenshot = args.next().map(PathBuf::from);

    let config = LauncherConfig::load(Path::new(&config_path))
        .with_context(|| format!("loading {config_path}"))?;
    log::info!("Starting lilypad (roms at {})", config.roms_root);

    let held: Rc<RefCell<Option<Control>>> = Rc::new(RefCell::new(None));
    let frames = Rc::new(Cell::new(0u64));

    let pressed = Rc::clone(&held);
    let counter = Rc::clone(&frames);
    let host = HostCallbacks::new()
        .with_input_state(move |c| *pressed.borrow() == Some(c))
        .with_video_refresh(move |_, _, _| counter.set(counter.get() + 1));

    let sink = RecordFileSink::new(&config.launch_record_path);
    let mut launcher = Launcher::new(config, Box::new(RealVfs::new("/")))
        .with_host(host)
        .with_sink(sink);
    launcher.start();

    for _ in 0..WARMUP_FRAMES {
        launcher.run_frame();
    }
    for step in steps {
        if launcher.status() == FrameStatus::Launching {
            break;
        }
        if let Step::Tap(control) = step {
            *held.borrow_mut() = Some(control);
            launcher.run_frame();
        }
        *held.borrow_mut() = None;
        launcher.run_frame();
    }

    match launcher.queued_launch() {
        Some(request) => log::info!("Launched {}", request.record_line()),
        None => log::info!("No game launched"),
    }
    log::info!("Ran {} frames", frames.get());

    if let Some(path) = screenshot {
        let fb = launcher.framebuffer();
        save_png(&path, fb.width(), fb.height(), &fb.to_rgba8())?;
        log::info!("Saved screenshot to {}", path.display());
    }
    Ok(())
}

fn save_png(path: &Path, width: u32, height: u32, rgba: &[u8]) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }
    let file = fs::File::create(path)?;
    let writer = std::io::BufWriter::new(file);
    let mut encoder = png::Encoder::new(writer, width, height);
    encoder.set_color(png::ColorType::Rgba);
    encoder.set_depth(png::BitDepth::Eight);
    let mut writer = encoder.write_header()?;
    writer.write_image_data(rgba)?;
    Ok(())
}
