//! Problem formulation for area-to-enthalpy inversion.

use std::convert::Infallible;

use twine_core::{EquationProblem, Model};
use uom::si::{area::square_meter, available_energy::joule_per_kilogram, f64::Area};

use crate::models::flow::nozzle::core::{ChokedFlow, FlowState};
use crate::support::{
    thermo::{PropertyError, PropertyLookup},
    units::SpecificEnthalpy,
};

/// Model adapter exposing static enthalpy as the sole input.
pub(super) struct AreaModel<'a, L> {
    choked: &'a ChokedFlow,
    lookup: &'a L,
}

impl<'a, L> AreaModel<'a, L> {
    pub(super) fn new(choked: &'a ChokedFlow, lookup: &'a L) -> Self {
        Self { choked, lookup }
    }
}

impl<L: PropertyLookup> Model for AreaModel<'_, L> {
    type Input = SpecificEnthalpy;
    type Output = FlowState;
    type Error = PropertyError;

    fn call(&self, input: &Self::Input) -> Result<Self::Output, Self::Error> {
        self.choked.state_at(self.lookup, *input)
    }
}

/// Equation problem for matching a station area.
///
/// Computes the residual as `implied_area - target_area`.
pub(super) struct AreaProblem {
    target: Area,
}

impl AreaProblem {
    pub(super) fn new(target: Area) -> Self {
        Self { target }
    }
}

impl EquationProblem<1> for AreaProblem {
    type Input = SpecificEnthalpy;
    type Output = FlowState;
    type Error = Infallible;

    fn input(&self, x: &[f64; 1]) -> Result<Self::Input, Self::Error> {
        Ok(SpecificEnthalpy::new::<joule_per_kilogram>(x[0]))
    }

    fn residuals(
        &self,
        _input: &Self::Input,
        output: &Self::Output,
    ) -> Result<[f64; 1], Self::Error> {
        Ok([(output.area - self.target).get::<square_meter>()])
    }
}
