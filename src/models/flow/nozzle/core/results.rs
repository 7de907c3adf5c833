use uom::si::f64::{
    Area, Length, MassDensity, MassRate, Pressure, Ratio, ThermodynamicTemperature, Velocity,
};

use crate::support::{
    thermo::EquilibriumProperties,
    units::{MassFlux, SpecificEnthalpy},
};

use super::{Branch, ChokedFlow, InversionError};

/// Flow state on the reservoir isentrope at a given static enthalpy.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FlowState {
    pub enthalpy: SpecificEnthalpy,
    pub velocity: Velocity,
    pub mach: Ratio,

    /// Area that passes the choked mass flow at this state, `m_dot / (ρ·u)`.
    pub area: Area,

    pub properties: EquilibriumProperties,
}

/// Sonic state at the nozzle throat.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ThroatQuantities {
    pub enthalpy: SpecificEnthalpy,
    pub velocity: Velocity,
    pub density: MassDensity,
    pub sound_speed: Velocity,
    pub pressure: Pressure,
    pub temperature: ThermodynamicTemperature,

    /// Sonic mass flux `ρ*·a*`.
    pub mass_flux: MassFlux,
}

impl ThroatQuantities {
    /// Returns the choked mass flow through a throat of the given area.
    #[must_use]
    pub fn mass_flow(&self, throat_area: Area) -> MassRate {
        self.mass_flux * throat_area
    }
}

/// One evaluation of the sonic residual during the throat solve.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ThroatIteration {
    pub enthalpy: SpecificEnthalpy,
    pub velocity: Velocity,
    pub sound_speed: Velocity,

    /// Sonic residual `u − a`.
    pub residual: Velocity,
}

/// Converged flow at one station of the profile.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StationResult {
    pub index: usize,
    pub x: Length,
    pub area: Area,
    pub branch: Branch,
    pub enthalpy: SpecificEnthalpy,
    pub velocity: Velocity,
    pub density: MassDensity,
    pub pressure: Pressure,
    pub temperature: ThermodynamicTemperature,
    pub sound_speed: Velocity,
    pub mach: Ratio,
}

impl StationResult {
    pub(super) fn new(
        index: usize,
        x: Length,
        area: Area,
        branch: Branch,
        state: &FlowState,
    ) -> Self {
        Self {
            index,
            x,
            area,
            branch,
            enthalpy: state.enthalpy,
            velocity: state.velocity,
            density: state.properties.density,
            pressure: state.properties.pressure,
            temperature: state.properties.temperature,
            sound_speed: state.properties.sound_speed,
            mach: state.mach,
        }
    }
}

/// A station the inverter could not resolve.
#[derive(Debug)]
pub struct SkippedStation {
    pub index: usize,
    pub x: Length,
    pub area: Area,
    pub branch: Branch,
    pub error: InversionError,
}

/// Diagnostics collected during an indirect-method solve.
#[derive(Debug, Default)]
pub struct WalkDiagnostics {
    /// Sonic residual evaluations from the throat bisection, in order.
    pub throat_trace: Vec<ThroatIteration>,

    /// Stations omitted from the solution, in profile order.
    pub skipped: Vec<SkippedStation>,
}

impl WalkDiagnostics {
    /// Returns the number of skipped stations.
    #[must_use]
    pub fn skipped_count(&self) -> usize {
        self.skipped.len()
    }

    /// Returns the profile indices of skipped stations.
    #[must_use]
    pub fn skipped_indices(&self) -> Vec<usize> {
        self.skipped.iter().map(|station| station.index).collect()
    }
}

/// Result of an indirect-method nozzle solve.
///
/// `stations` holds only the converged stations, in profile order.
/// Stations the inverter could not resolve are listed in
/// [`WalkDiagnostics::skipped`].
#[derive(Debug)]
pub struct NozzleSolution {
    pub choked: ChokedFlow,
    pub throat_index: usize,
    pub stations: Vec<StationResult>,
    pub diagnostics: WalkDiagnostics,
}

impl NozzleSolution {
    /// Returns the sonic throat state.
    #[must_use]
    pub fn throat(&self) -> &ThroatQuantities {
        &self.choked.throat
    }

    /// Returns the choked mass flow.
    #[must_use]
    pub fn mass_flow(&self) -> MassRate {
        self.choked.mass_flow()
    }
}
