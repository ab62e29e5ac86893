use std::path::PathBuf;

use clap::Parser;

/// How corner normals are produced after the corner table is built.
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum NormalMode {
    /// Average neighbouring face normals within the smoothing angle
    #[value(name = "smooth")]
    Smooth,
    /// Copy each face normal to its corners
    #[value(name = "flat")]
    Flat,
    /// Keep whatever normals the input carried
    #[value(name = "keep")]
    Keep,
}

impl std::fmt::Display for NormalMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            NormalMode::Smooth => write!(f, "smooth"),
            NormalMode::Flat => write!(f, "flat"),
            NormalMode::Keep => write!(f, "keep"),
        }
    }
}

/// Normal generation parameters.
#[derive(Debug, Clone)]
pub struct NormalConfig {
    pub mode: NormalMode,
    /// Largest dihedral angle, in degrees, that still gets smoothed.
    pub smoothing_angle_deg: f32,
}

impl NormalConfig {
    pub fn smoothing_angle_rad(&self) -> f32 {
        self.smoothing_angle_deg.clamp(0.0, 180.0).to_radians()
    }
}

impl Default for NormalConfig {
    fn default() -> Self {
        Self {
            mode: NormalMode::Smooth,
            smoothing_angle_deg: 45.0,
        }
    }
}

/// Fully resolved inspection configuration (constructed from CLI args).
#[derive(Debug, Clone, Default)]
pub struct InspectConfig {
    pub inputs: Vec<PathBuf>,
    pub normals: NormalConfig,
    pub json: bool,
    pub verbose: bool,
    pub threads: Option<usize>,
}

/// CLI argument definition (clap derive).
#[derive(Parser, Debug)]
#[command(
    name = "corner-mesh",
    about = "Build corner-table topology and normals for triangle meshes",
    version
)]
pub struct CliArgs {
    /// Input files (OBJ, glTF, GLB, PLY)
    #[arg(required = true)]
    pub inputs: Vec<PathBuf>,

    /// Corner normal mode
    #[arg(long, value_enum, default_value = "smooth")]
    pub normals: NormalMode,

    /// Max dihedral angle in degrees that is smoothed over
    #[arg(long, default_value_t = 45.0)]
    pub smoothing_angle: f32,

    /// Print the report as JSON
    #[arg(long)]
    pub json: bool,

    /// Enable verbose logging
    #[arg(short = 'v', long)]
    pub verbose: bool,

    /// Worker thread count (default: all cores)
    #[arg(short = 'j', long)]
    pub threads: Option<usize>,
}

impl From<CliArgs> for InspectConfig {
    fn from(args: CliArgs) -> Self {
        InspectConfig {
            inputs: args.inputs,
            normals: NormalConfig {
                mode: args.normals,
                smoothing_angle_deg: args.smoothing_angle,
            },
            json: args.json,
            verbose: args.verbose,
            threads: args.threads,
        }
    }
}
