//! Plating arithmetic: accumulated measurement state and the three
//! derivations that feed the operator-facing report.

use crate::prelude::*;

/// Amps of plating current per square inch per panel-size selection unit.
pub const AMP_FACTOR: f64 = 0.03855;

/// Amp-minutes of charge per square inch.
pub const AMP_HOUR_FACTOR: f64 = 2.203;

pub const MIN_PER_HOUR: f64 = 60.0;

/// Converts a weight-over-area ratio into a per-side thickness.
pub const THICKNESS_FACTOR: f64 = 150.0;

/// Thicknesses strictly above this select the error message instead of the
/// thickness report.
pub const MAX_THICKNESS_PER_SIDE: f64 = 0.0002;

/// Surface areas derived at the pieces step.
#[derive(Copy, Clone, Debug)]
pub struct SurfaceAreas {
    /// Area of one workpiece, counting only the plated sides.
    pub surface_area: f64,

    /// Area across all workpieces in the bath.
    pub total_surface_area: f64,
}

impl SurfaceAreas {
    #[must_use]
    pub fn derive(length: f64, width: f64, n_sides_plated: f64, n_pieces: f64) -> Self {
        let surface_area = length * width * n_sides_plated;
        Self { surface_area, total_surface_area: surface_area * n_pieces }
    }
}

/// Plating current and charge derived at the panel-size step.
#[derive(Copy, Clone, Debug)]
pub struct CurrentValues {
    pub amps_used: f64,
    pub amp_hours_used: f64,
    pub total_amps_used: f64,
    pub total_amp_hours_used: f64,
}

impl CurrentValues {
    #[must_use]
    pub fn derive(surface_area: f64, selection: f64, n_pieces: f64) -> Self {
        let amps_used = surface_area * AMP_FACTOR * selection;
        let amp_hours_used = surface_area * AMP_HOUR_FACTOR / MIN_PER_HOUR;
        Self {
            amps_used,
            amp_hours_used,
            total_amps_used: n_pieces * amps_used,
            total_amp_hours_used: n_pieces * amp_hours_used,
        }
    }
}

/// Weight delta and per-side thickness derived at the final-weight step.
#[derive(Copy, Clone, Debug)]
pub struct Thickness {
    pub delta: f64,
    pub thickness_per_side: f64,
}

impl Thickness {
    /// Errors when `n_pieces` is zero: the per-piece area would divide by
    /// zero and the report would show a non-finite thickness.
    pub fn try_derive(
        start_weight: f64,
        final_weight: f64,
        total_surface_area: f64,
        n_pieces: f64,
    ) -> Result<Self> {
        ensure!(n_pieces != 0.0, "cannot derive the thickness of zero pieces");
        let delta = final_weight - start_weight;
        Ok(Self {
            delta,
            thickness_per_side: delta / (total_surface_area / n_pieces) / THICKNESS_FACTOR,
        })
    }
}

/// Accumulated measurement state for one run.
///
/// The sequencer's fixed step order is the only thing guaranteeing that a
/// derived field is read after its inputs are set; every field starts at zero
/// and a new cycle simply overwrites all of them again.
#[derive(Debug, Default)]
pub struct Calculator {
    pub start_weight: f64,
    pub final_weight: f64,
    pub width: f64,
    pub length: f64,
    pub n_sides_plated: f64,
    pub n_pieces: f64,
    pub selection: f64,

    pub surface_area: f64,
    pub total_surface_area: f64,
    pub amps_used: f64,
    pub total_amps_used: f64,
    pub amp_hours_used: f64,
    pub total_amp_hours_used: f64,
    pub delta: f64,
    pub thickness_per_side: f64,
}

impl Calculator {
    pub fn calculate_surface_areas(&mut self) {
        let areas =
            SurfaceAreas::derive(self.length, self.width, self.n_sides_plated, self.n_pieces);
        self.surface_area = areas.surface_area;
        self.total_surface_area = areas.total_surface_area;
    }

    pub fn calculate_current_values(&mut self) {
        let current = CurrentValues::derive(self.surface_area, self.selection, self.n_pieces);
        self.amps_used = current.amps_used;
        self.amp_hours_used = current.amp_hours_used;
        self.total_amps_used = current.total_amps_used;
        self.total_amp_hours_used = current.total_amp_hours_used;
    }

    pub fn calculate_nickel_thickness(&mut self) -> Result {
        let thickness = Thickness::try_derive(
            self.start_weight,
            self.final_weight,
            self.total_surface_area,
            self.n_pieces,
        )?;
        self.delta = thickness.delta;
        self.thickness_per_side = thickness.thickness_per_side;
        Ok(())
    }
}
