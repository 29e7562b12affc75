//! molmesh CLI - build tube meshes and write them to disk.

use anyhow::Result;
use clap::{Args, Parser, Subcommand};
use molmesh_tube::{CrossSection, TubeBuilder};
use std::path::PathBuf;
use tracing::info;
use tracing_subscriber::EnvFilter;

mod job;

use job::{PathKind, TubeJob};

#[derive(Parser)]
#[command(name = "molmesh")]
#[command(about = "Sweep tube cross-sections along paths and export the mesh", long_about = None)]
struct Cli {
    /// Log at debug level (MOLMESH_LOG / RUST_LOG take precedence)
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Build a tube and write it as STL or OBJ
    Tube {
        #[command(flatten)]
        job: JobArgs,
        /// Output file (format determined by extension: .stl, .obj)
        #[arg(short, long)]
        output: PathBuf,
    },
    /// Print the resolved job for a JSON config
    Info {
        /// Path to the job .json file
        config: PathBuf,
    },
}

/// Command-line overrides for a [`TubeJob`].
#[derive(Args)]
struct JobArgs {
    /// JSON job file; flags below override its fields
    #[arg(long)]
    config: Option<PathBuf>,
    /// Path shape
    #[arg(long, value_enum)]
    path: Option<PathKind>,
    /// Length of a straight path
    #[arg(long)]
    length: Option<f64>,
    /// Helix radius
    #[arg(long)]
    radius: Option<f64>,
    /// Helix rise per turn
    #[arg(long)]
    pitch: Option<f64>,
    /// Helix turns
    #[arg(long)]
    turns: Option<f64>,
    /// Segments along the whole path
    #[arg(long)]
    linear_segments: Option<usize>,
    /// Vertices around each ring
    #[arg(long)]
    radial_segments: Option<usize>,
    /// Cross-section width
    #[arg(long)]
    width: Option<f64>,
    /// Cross-section height
    #[arg(long)]
    height: Option<f64>,
    /// Cross-section shape (elliptical, rounded)
    #[arg(long)]
    cross_section: Option<CrossSection>,
    /// Leave the start of each piece open
    #[arg(long)]
    no_start_cap: bool,
    /// Leave the end of each piece open
    #[arg(long)]
    no_end_cap: bool,
    /// Split the path into this many tubes, one group each
    #[arg(long)]
    pieces: Option<usize>,
}

impl JobArgs {
    fn resolve(self) -> Result<TubeJob> {
        let mut job = match &self.config {
            Some(path) => TubeJob::load(path)?,
            None => TubeJob::default(),
        };
        if let Some(path) = self.path {
            job.path = path;
        }
        job.length = self.length.unwrap_or(job.length);
        job.radius = self.radius.unwrap_or(job.radius);
        job.pitch = self.pitch.unwrap_or(job.pitch);
        job.turns = self.turns.unwrap_or(job.turns);
        job.linear_segments = self.linear_segments.unwrap_or(job.linear_segments);
        job.radial_segments = self.radial_segments.unwrap_or(job.radial_segments);
        job.width = self.width.unwrap_or(job.width);
        job.height = self.height.unwrap_or(job.height);
        job.cross_section = self.cross_section.unwrap_or(job.cross_section);
        job.pieces = self.pieces.unwrap_or(job.pieces);
        if self.no_start_cap {
            job.start_cap = false;
        }
        if self.no_end_cap {
            job.end_cap = false;
        }
        Ok(job)
    }
}

fn init_logging(verbose: bool) {
    let default = if verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_env("MOLMESH_LOG")
        .or_else(|_| EnvFilter::try_from_default_env())
        .unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match cli.command {
        Commands::Tube { job, output } => {
            let job = job.resolve()?;
            let mesh = job.build(&TubeBuilder::new())?;
            molmesh_mesh::export(&mesh, &output)?;
            info!(
                vertices = mesh.num_vertices(),
                triangles = mesh.num_triangles(),
                output = %output.display(),
                "exported mesh"
            );
            if let Some((min, max)) = mesh.bounds() {
                println!(
                    "{} vertices, {} triangles, bounds [{:.3}, {:.3}, {:.3}] - [{:.3}, {:.3}, {:.3}]",
                    mesh.num_vertices(),
                    mesh.num_triangles(),
                    min.x,
                    min.y,
                    min.z,
                    max.x,
                    max.y,
                    max.z
                );
            }
        }
        Commands::Info { config } => {
            let job = TubeJob::load(&config)?;
            job.validate()?;
            println!("{}", serde_json::to_string_pretty(&job)?);
        }
    }

    Ok(())
}
