//! Render a grass field headlessly and save the last frame as a PNG.
//!
//! Usage: cargo run --release --bin render_field -- --config field.json --ticks 120 --out field.png
//!
//! Optional: `--seed <n>` overrides the config seed, `--frames <dir>` also
//! writes every cached shrub frame.

use std::path::PathBuf;
use std::time::Instant;

use tussock::collision::Presence;
use tussock::core::Rgba;
use tussock::core::types::Vec2;
use tussock::scene::{FieldConfig, FixedStepScheduler, RenderLoopBuilder, SceneObject};
use tussock::surface::{RasterSurface, StrokeStyle, Surface};

const FRAME_RATE: u32 = 60;

/// Walks back and forth along the grass line, flattening what it crosses.
struct SweepingMarker {
    position: Vec2,
    velocity: f32,
    width: f32,
}

impl SceneObject for SweepingMarker {
    fn presence(&self) -> Presence {
        Presence::new(self.position.x, self.position.y, self.width)
    }

    fn update(&mut self, surface_size: Vec2) {
        self.position.x += self.velocity;
        if self.position.x < 0.0 || self.position.x > surface_size.x {
            self.velocity = -self.velocity;
            self.position.x = self.position.x.clamp(0.0, surface_size.x);
        }
    }

    fn draw(&self, surface: &mut dyn Surface) {
        let half = self.width / 2.0;
        surface.begin_path();
        surface.move_to(self.position - Vec2::new(half, 0.0));
        surface.line_to(self.position + Vec2::new(half, 0.0));
        surface.stroke(StrokeStyle::new(Rgba::rgba(200, 60, 40, 0.8), 3.0));
    }
}

fn arg_value<'a>(args: &'a [String], flag: &str) -> Option<&'a str> {
    args.iter()
        .position(|a| a == flag)
        .and_then(|i| args.get(i + 1))
        .map(String::as_str)
}

fn main() -> tussock::core::Result<()> {
    tussock::core::logging::init();

    let args: Vec<String> = std::env::args().collect();

    let mut config = match arg_value(&args, "--config") {
        Some(path) => {
            log::info!("Loading field config from: {}", path);
            FieldConfig::load(path)?
        }
        None => FieldConfig::default(),
    };
    if let Some(seed) = arg_value(&args, "--seed").and_then(|s| s.parse().ok()) {
        config.seed = Some(seed);
    }
    let ticks: u64 = arg_value(&args, "--ticks").and_then(|s| s.parse().ok()).unwrap_or(120);
    let out = PathBuf::from(arg_value(&args, "--out").unwrap_or("field.png"));
    let frames_dir = arg_value(&args, "--frames").map(PathBuf::from);

    println!("=== Rendering {}x{} field for {} ticks ===", config.width, config.height, ticks);

    let marker = SweepingMarker {
        position: Vec2::new(0.0, config.height as f32 / 2.0),
        velocity: 4.0,
        width: 60.0,
    };
    let surface = RasterSurface::new(config.width, config.height)?;
    let mut render_loop = RenderLoopBuilder::new(config)
        .surface(surface)
        .scheduler(FixedStepScheduler::at_fps(ticks, FRAME_RATE))
        .object(marker)
        .build()?;

    let start = Instant::now();
    let ran = render_loop.run()?;
    let elapsed = start.elapsed();
    println!(
        "Ran {} ticks in {:.2}s ({:.2}ms/tick)",
        ran,
        elapsed.as_secs_f64(),
        elapsed.as_secs_f64() * 1000.0 / ran.max(1) as f64
    );

    if let Some(dir) = frames_dir {
        std::fs::create_dir_all(&dir)?;
        for (s, shrub) in render_loop.shrubs().iter().enumerate() {
            let Some(bucket) = shrub.bucket(shrub.angle()) else { continue };
            for (f, frame) in bucket.frames().iter().enumerate() {
                frame.save(dir.join(format!("shrub{}_frame{:02}.png", s, f)))?;
            }
            log::info!("Saved {} frames of shrub {} to {}", bucket.len(), s, dir.display());
        }
    }

    render_loop.surface().pixels().save(&out)?;
    println!("Saved {}", out.display());
    Ok(())
}
