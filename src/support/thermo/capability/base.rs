/// Base trait for state-based thermodynamic models.
///
/// Every capability trait in this module extends `ThermoModel`, which fixes
/// the `Fluid` type carried by the model's [`State`](crate::support::thermo::State).
pub trait ThermoModel {
    type Fluid;
}
