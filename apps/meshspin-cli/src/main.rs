use clap::{Parser, Subcommand, ValueEnum};
use meshspin_common::{MeshKind, SurfaceSize};
use meshspin_controls::{Action, ControlState};
use meshspin_render::Renderer;
use meshspin_scene::Scene;
use meshspin_viewport::{HeadlessHost, Viewport};
use serde::Serialize;
use std::collections::BTreeSet;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "meshspin-cli", about = "Headless runner for the meshspin viewport")]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print version and crate info
    Info,
    /// Mount a headless viewport and run the animation loop
    Run {
        /// Number of ticks to run
        #[arg(short, long, default_value = "60")]
        ticks: u64,
        /// Cube rotation speed, radians per tick in [0, 0.1]
        #[arg(long)]
        cube_speed: Option<f32>,
        /// Torus rotation speed, radians per tick in [0, 0.1]
        #[arg(long)]
        torus_speed: Option<f32>,
        /// Cone rotation speed, radians per tick in [0, 0.1]
        #[arg(long)]
        cone_speed: Option<f32>,
        /// Hide a mesh (repeatable)
        #[arg(long, value_enum)]
        hide: Vec<KindArg>,
        /// Host surface width in pixels
        #[arg(long, default_value = "1280")]
        width: u32,
        /// Host surface height in pixels
        #[arg(long, default_value = "720")]
        height: u32,
        /// Dump the final scene and controls as JSON instead of the last frame
        #[arg(long)]
        json: bool,
    },
}

#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, ValueEnum)]
enum KindArg {
    Cube,
    Torus,
    Cone,
}

impl From<KindArg> for MeshKind {
    fn from(arg: KindArg) -> Self {
        match arg {
            KindArg::Cube => MeshKind::Cube,
            KindArg::Torus => MeshKind::Torus,
            KindArg::Cone => MeshKind::Cone,
        }
    }
}

#[derive(Serialize)]
struct Report<'a> {
    ticks: u64,
    size: SurfaceSize,
    scene: &'a Scene,
    controls: &'a ControlState,
}

/// Apply `--*-speed` flags. Rejected values are reported and leave the
/// default speed in place. Returns the meshes whose flag was rejected.
fn apply_speed_flags<B: Renderer>(
    viewport: &mut Viewport<B>,
    speeds: [(MeshKind, Option<f32>); 3],
) -> Vec<MeshKind> {
    let mut rejected = Vec::new();
    for (kind, speed) in speeds {
        let Some(value) = speed else { continue };
        if !viewport.apply(Action::SetSpeed(kind, value)) {
            tracing::warn!(
                "ignoring --{}-speed {value}: not in [0, 0.1], keeping {}",
                kind.label().to_lowercase(),
                viewport.controls().speed(kind)
            );
            rejected.push(kind);
        }
    }
    rejected
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let filter = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(filter))
        .with_writer(std::io::stderr)
        .init();

    match cli.command {
        Commands::Info => {
            println!("meshspin-cli v{}", env!("CARGO_PKG_VERSION"));
            println!("render: {}", meshspin_render::crate_info());
            println!("viewport: {}", meshspin_viewport::crate_info());
            let scene = Scene::setup();
            for mesh in scene.meshes() {
                println!(
                    "mesh: {} at x={:.1}",
                    mesh.kind,
                    mesh.transform.position.x
                );
            }
        }
        Commands::Run {
            ticks,
            cube_speed,
            torus_speed,
            cone_speed,
            hide,
            width,
            height,
            json,
        } => {
            let size = SurfaceSize::new(width, height);
            let mut host = HeadlessHost::new(size);
            let mut viewport = Viewport::mount(&mut host)?;

            let speeds = [
                (MeshKind::Cube, cube_speed),
                (MeshKind::Torus, torus_speed),
                (MeshKind::Cone, cone_speed),
            ];
            apply_speed_flags(&mut viewport, speeds);
            let hidden: BTreeSet<KindArg> = hide.into_iter().collect();
            for kind in hidden {
                viewport.apply(Action::ToggleVisibility(kind.into()));
            }

            let mut last_frame = None;
            for _ in 0..ticks {
                last_frame = viewport.frame();
            }

            if json {
                let report = Report {
                    ticks: viewport.ticks(),
                    size,
                    scene: viewport.scene(),
                    controls: viewport.controls(),
                };
                println!("{}", serde_json::to_string_pretty(&report)?);
            } else {
                match last_frame {
                    Some(text) => print!("{text}"),
                    None => println!("no frames rendered"),
                }
                for kind in MeshKind::ALL {
                    println!("{kind} speed: {}", viewport.controls().speed(kind));
                }
            }

            viewport.unmount(&mut host);
        }
    }

    Ok(())
}
