use std::fmt::Write as _;
use std::path::PathBuf;
use std::time::{Duration, Instant};

use rayon::prelude::*;
use serde::Serialize;
use tracing::{debug, info};

use crate::config::{InspectConfig, NormalConfig, NormalMode};
use crate::draw_data::DrawData;
use crate::error::Result;
use crate::ingestion::{self, InputFormat};
use crate::mesh::Mesh;
use crate::mesh::analysis::TopologyStats;
use crate::types::{BoundingBox, IndexedMesh};

/// Per-mesh outcome of an inspection run.
#[derive(Debug, Clone, Serialize)]
pub struct MeshReport {
    pub source: PathBuf,
    pub format: &'static str,
    pub name: Option<String>,
    pub topology: TopologyStats,
    pub bounds: Option<BoundingBox>,
    pub surface_area: f32,
    pub normal_mode: String,
    pub draw_vertex_bytes: usize,
}

/// Summary of a completed run.
#[derive(Debug)]
pub struct InspectResult {
    pub reports: Vec<MeshReport>,
    pub duration: Duration,
}

/// Pipeline orchestrator: load, build topology, derive normals, report.
pub struct Pipeline;

impl Pipeline {
    /// Run the full inspection over every configured input.
    pub fn run(config: &InspectConfig) -> Result<InspectResult> {
        let start = Instant::now();

        info!(inputs = config.inputs.len(), "Stage 1/2: Loading");
        let mut loaded: Vec<(PathBuf, InputFormat, IndexedMesh)> = Vec::new();
        for path in &config.inputs {
            let (format, meshes) = ingestion::load(path)?;
            loaded.extend(meshes.into_iter().map(|m| (path.clone(), format, m)));
        }

        // Each worker owns its Mesh outright; nothing is shared while building.
        info!(meshes = loaded.len(), "Stage 2/2: Topology and normals");
        let reports = loaded
            .par_iter()
            .map(|(path, format, indexed)| {
                let mesh = Self::build(indexed, &config.normals)?;
                Self::report(path, *format, indexed, &mesh, config.normals.mode)
            })
            .collect::<Result<Vec<_>>>()?;

        let duration = start.elapsed();
        info!(meshes = reports.len(), elapsed = ?duration, "Inspection complete");

        Ok(InspectResult { reports, duration })
    }

    /// Build a mesh, its corner table and its corner normals.
    pub fn build(indexed: &IndexedMesh, normals: &NormalConfig) -> Result<Mesh> {
        let mut mesh = Mesh::from_indexed(indexed)?;
        mesh.compute_corner_table();

        match normals.mode {
            NormalMode::Smooth => {
                mesh.compute_corner_normals(normals.smoothing_angle_rad())?;
            }
            NormalMode::Flat => mesh.compute_flat_corner_normals(),
            NormalMode::Keep => mesh.compute_face_normals(),
        }

        debug!(
            name = ?indexed.name,
            faces = mesh.face_count(),
            mode = %normals.mode,
            "Built mesh"
        );

        Ok(mesh)
    }

    fn report(
        path: &std::path::Path,
        format: InputFormat,
        indexed: &IndexedMesh,
        mesh: &Mesh,
        mode: NormalMode,
    ) -> Result<MeshReport> {
        let surface_area = (0..mesh.face_count())
            .map(|f| mesh.face_area(f))
            .sum::<Result<f32>>()?;

        Ok(MeshReport {
            source: path.to_path_buf(),
            format: format.as_str(),
            name: indexed.name.clone(),
            topology: mesh.topology_stats()?,
            bounds: mesh.bounds(),
            surface_area,
            normal_mode: mode.to_string(),
            draw_vertex_bytes: DrawData::from_mesh(mesh).vertex_bytes().len(),
        })
    }
}

/// Render reports for the terminal, or as pretty JSON.
pub fn format_reports(reports: &[MeshReport], json: bool) -> Result<String> {
    if json {
        return Ok(serde_json::to_string_pretty(reports)?);
    }

    let mut out = String::new();
    for r in reports {
        let t = &r.topology;
        let _ = writeln!(
            out,
            "{} [{}]{}",
            r.source.display(),
            r.format,
            r.name
                .as_deref()
                .map(|n| format!(" {n}"))
                .unwrap_or_default()
        );
        let _ = writeln!(
            out,
            "  vertices {}  faces {}  corners {}",
            t.vertices, t.faces, t.corners
        );
        let _ = writeln!(
            out,
            "  edges: interior {}  boundary {}  non-manifold {}",
            t.interior_edges, t.boundary_edges, t.non_manifold_edges
        );
        let _ = writeln!(
            out,
            "  boundary corners {}  degenerate faces {}  isolated vertices {}",
            t.boundary_corners, t.degenerate_faces, t.isolated_vertices
        );
        let shape = match (t.is_closed(), t.is_manifold()) {
            (true, _) => "closed",
            (false, true) => "open",
            (false, false) => "non-manifold",
        };
        let _ = writeln!(
            out,
            "  surface {shape}, area {:.4}, normals {}",
            r.surface_area, r.normal_mode
        );
        if let Some(b) = r.bounds {
            let _ = writeln!(
                out,
                "  bounds [{:.3}, {:.3}, {:.3}] .. [{:.3}, {:.3}, {:.3}]",
                b.min[0], b.min[1], b.min[2], b.max[0], b.max[1], b.max[2]
            );
        }
    }
    Ok(out)
}
