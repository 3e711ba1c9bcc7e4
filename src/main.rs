//! Headless driver for the blockfield core.
//!
//! Stands in for the windowing and rendering layers: feeds a short scripted
//! session of key presses, mouse motion and clicks into the engine and
//! drains the frame sink on a separate "renderer" thread.

use std::path::PathBuf;
use std::thread;

use anyhow::{anyhow, Context, Result};
use log::{info, LevelFilter};
use simple_logger::SimpleLogger;
use winit::event::MouseButton;
use winit::keyboard::KeyCode;

use blockfield::{BlockEvent, ChannelSink, Engine, EngineConfig, SinkMessage};

const FRAME_DT: f32 = 1.0 / 60.0;

fn main() -> Result<()> {
    SimpleLogger::new().with_level(LevelFilter::Info).env().init()?;
    info!("Starting blockfield demo...");

    let config = match std::env::args_os().nth(1) {
        Some(path) => {
            let path = PathBuf::from(path);
            EngineConfig::load(&path)
                .with_context(|| format!("Failed to load config from {}", path.display()))?
        }
        None => EngineConfig::load_or_create()?,
    };

    let (sink, receiver) = ChannelSink::bounded(256);
    let renderer = thread::spawn(move || {
        let mut frames = 0u64;
        let mut visible_blocks = 0i64;
        for message in receiver {
            match message {
                SinkMessage::Frame(_) => frames += 1,
                SinkMessage::Block(BlockEvent::Added(_)) => visible_blocks += 1,
                SinkMessage::Block(BlockEvent::Removed(_)) => visible_blocks -= 1,
            }
        }
        (frames, visible_blocks)
    });

    let mut engine = Engine::new(config)
        .context("Engine initialization failed")?
        .with_frame_sink(sink);
    let initial_blocks = engine.world().len() as i64;

    run_script(&mut engine);

    let stats = engine.stats();
    let pose = engine.player().pose(engine.look());
    // Dropping the engine closes the channel and ends the renderer loop
    drop(engine);

    let (frames, visible_blocks) = renderer
        .join()
        .map_err(|_| anyhow!("Renderer thread panicked"))?;

    info!(
        "Finished after {} frames ({} delivered): camera at {:?}, {} block(s) in world, {} tracked by renderer",
        stats.frame_count,
        frames,
        pose.camera_position,
        stats.block_count,
        initial_blocks + visible_blocks
    );
    Ok(())
}

fn run_frames(engine: &mut Engine, count: usize) {
    for _ in 0..count {
        engine.tick(FRAME_DT);
    }
}

fn run_script(engine: &mut Engine) {
    // Nothing moves until the pointer is captured
    engine.handle_key(KeyCode::KeyW, true);
    run_frames(engine, 10);

    info!("Pointer locked");
    engine.set_pointer_locked(true);
    run_frames(engine, 5);

    // A row of blocks, turning a little between placements
    for _ in 0..3 {
        engine.handle_mouse_button(MouseButton::Right, true);
        engine.handle_mouse_button(MouseButton::Right, false);
        engine.handle_mouse_motion((120.0, 0.0));
        run_frames(engine, 5);
    }

    engine.handle_key(KeyCode::KeyW, true);
    run_frames(engine, 60);
    engine.handle_key(KeyCode::KeyW, false);

    engine.handle_key(KeyCode::Space, true);
    run_frames(engine, 2);
    engine.handle_key(KeyCode::Space, false);
    run_frames(engine, 90);

    // Face back toward the row and shoot at it
    engine.handle_mouse_motion((-360.0, 0.0));
    match engine.handle_mouse_button(MouseButton::Left, true) {
        Some(event) => info!("Shot hit: {:?}", event),
        None => info!("Shot missed"),
    }
    run_frames(engine, 5);

    engine.set_pointer_locked(false);
    info!("Pointer released");
    run_frames(engine, 5);
}
