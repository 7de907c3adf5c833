use uom::si::f64::{Area, MassRate, Ratio};

use crate::support::{
    thermo::{PropertyError, PropertyLookup},
    units::SpecificEnthalpy,
};

use super::{FlowState, Reservoir, ThroatQuantities};

/// A choked nozzle: reservoir, sonic throat state, and throat area.
///
/// Together these fix the mass flow, which in turn fixes the area that
/// every state on the reservoir isentrope can pass.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ChokedFlow {
    pub reservoir: Reservoir,
    pub throat: ThroatQuantities,
    pub throat_area: Area,
}

impl ChokedFlow {
    #[must_use]
    pub fn new(reservoir: Reservoir, throat: ThroatQuantities, throat_area: Area) -> Self {
        Self {
            reservoir,
            throat,
            throat_area,
        }
    }

    /// Returns the choked mass flow `F*·A*`.
    #[must_use]
    pub fn mass_flow(&self) -> MassRate {
        self.throat.mass_flow(self.throat_area)
    }

    /// Evaluates the flow state at static enthalpy `h` on the reservoir isentrope.
    ///
    /// The implied area is infinite where the velocity is zero.
    ///
    /// # Errors
    ///
    /// Returns [`PropertyError`] if the lookup fails at `(s0, h)`.
    pub fn state_at(
        &self,
        lookup: &impl PropertyLookup,
        enthalpy: SpecificEnthalpy,
    ) -> Result<FlowState, PropertyError> {
        let properties = lookup.lookup(self.reservoir.entropy, enthalpy)?;
        let velocity = self.reservoir.velocity(enthalpy);
        let mach: Ratio = velocity / properties.sound_speed;
        let area: Area = self.mass_flow() / (properties.density * velocity);

        Ok(FlowState {
            enthalpy,
            velocity,
            mach,
            area,
            properties,
        })
    }
}
