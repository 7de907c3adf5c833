//! Problem formulation for the sonic-point search.

use std::{cell::RefCell, convert::Infallible};

use twine_core::{EquationProblem, Model};
use uom::si::{available_energy::joule_per_kilogram, velocity::meter_per_second};

use crate::models::flow::nozzle::core::{Reservoir, ThroatIteration};
use crate::support::{
    thermo::{EquilibriumProperties, PropertyError, PropertyLookup},
    units::SpecificEnthalpy,
};

/// Flow quantities on the reservoir isentrope at one trial enthalpy.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(super) struct SonicSample {
    pub(super) iteration: ThroatIteration,
    pub(super) properties: EquilibriumProperties,
}

impl SonicSample {
    pub(super) fn evaluate(
        reservoir: &Reservoir,
        lookup: &impl PropertyLookup,
        enthalpy: SpecificEnthalpy,
    ) -> Result<Self, PropertyError> {
        let properties = lookup.lookup(reservoir.entropy, enthalpy)?;
        let velocity = reservoir.velocity(enthalpy);

        Ok(Self {
            iteration: ThroatIteration {
                enthalpy,
                velocity,
                sound_speed: properties.sound_speed,
                residual: velocity - properties.sound_speed,
            },
            properties,
        })
    }

    /// Sonic residual `u − a` in m/s.
    pub(super) fn residual(&self) -> f64 {
        self.iteration.residual.get::<meter_per_second>()
    }
}

/// Model adapter for the sonic-point search.
///
/// Exposes static enthalpy as the sole input and records every successful
/// evaluation so the caller can inspect how the solve progressed.
pub(super) struct SonicModel<'a, L> {
    reservoir: &'a Reservoir,
    lookup: &'a L,
    trace: RefCell<Vec<ThroatIteration>>,
}

impl<'a, L: PropertyLookup> SonicModel<'a, L> {
    pub(super) fn new(reservoir: &'a Reservoir, lookup: &'a L) -> Self {
        Self {
            reservoir,
            lookup,
            trace: RefCell::new(Vec::new()),
        }
    }

    pub(super) fn into_trace(self) -> Vec<ThroatIteration> {
        self.trace.into_inner()
    }
}

impl<L: PropertyLookup> Model for SonicModel<'_, L> {
    type Input = SpecificEnthalpy;
    type Output = SonicSample;
    type Error = PropertyError;

    fn call(&self, input: &Self::Input) -> Result<Self::Output, Self::Error> {
        let sample = SonicSample::evaluate(self.reservoir, self.lookup, *input)?;
        self.trace.borrow_mut().push(sample.iteration);
        Ok(sample)
    }
}

/// Equation problem for the sonic point.
///
/// Computes the residual as `u − a`, which is negative near the reservoir
/// and changes sign where the flow becomes sonic.
pub(super) struct SonicProblem;

impl EquationProblem<1> for SonicProblem {
    type Input = SpecificEnthalpy;
    type Output = SonicSample;
    type Error = Infallible;

    fn input(&self, x: &[f64; 1]) -> Result<Self::Input, Self::Error> {
        Ok(SpecificEnthalpy::new::<joule_per_kilogram>(x[0]))
    }

    fn residuals(
        &self,
        _input: &Self::Input,
        output: &Self::Output,
    ) -> Result<[f64; 1], Self::Error> {
        Ok([output.residual()])
    }
}
