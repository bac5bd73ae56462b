//! Coupling rules: how one property drives another.

use crate::error::EngineError;
use crate::id::PropertyKey;

/// Links a target property to a source property.
///
/// Each tick the target moves by `constant * alpha * delta`, where `delta`
/// is the source history convolved through the `(target, source)` operator.
/// When `antiderivative_order` is `n > 0`, the freshly updated target is
/// then added into the source `n` times, which is how a velocity integrates
/// into a position.
///
/// ```
/// use rias_core::CouplingRule;
///
/// // The 1-D wave preset: velocity is driven by the Laplacian of position,
/// // and position integrates velocity once.
/// let rule = CouplingRule::new("velocity", "position", 1, -1.0);
/// assert_eq!(rule.target.as_str(), "velocity");
/// assert!(rule.is_chained());
/// ```
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CouplingRule {
    /// Property updated by the convolution.
    pub target: PropertyKey,
    /// Property whose history is convolved.
    pub source: PropertyKey,
    /// How many times the updated target is integrated into the source.
    pub antiderivative_order: u32,
    /// Scalar gain applied to the delta.
    pub constant: f64,
}

impl CouplingRule {
    /// Create a rule from its four components.
    pub fn new(
        target: impl Into<PropertyKey>,
        source: impl Into<PropertyKey>,
        antiderivative_order: u32,
        constant: f64,
    ) -> Self {
        Self {
            target: target.into(),
            source: source.into(),
            antiderivative_order,
            constant,
        }
    }

    /// Whether this rule integrates the target back into the source.
    pub fn is_chained(&self) -> bool {
        self.antiderivative_order > 0
    }

    /// Structural checks that do not need the property set.
    pub fn validate(&self) -> Result<(), EngineError> {
        if !self.constant.is_finite() {
            return Err(EngineError::config(format!(
                "rule {} <- {} has non-finite constant {}",
                self.target, self.source, self.constant
            )));
        }
        Ok(())
    }
}

impl<T, S> From<(T, S, u32, f64)> for CouplingRule
where
    T: Into<PropertyKey>,
    S: Into<PropertyKey>,
{
    fn from((target, source, order, constant): (T, S, u32, f64)) -> Self {
        Self::new(target, source, order, constant)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_tuple_matches_new() {
        let a: CouplingRule = ("position", "position", 0, -1.0).into();
        let b = CouplingRule::new("position", "position", 0, -1.0);
        assert_eq!(a, b);
        assert!(!a.is_chained());
    }

    #[test]
    fn validate_rejects_nan_constant() {
        let rule = CouplingRule::new("velocity", "position", 1, f64::NAN);
        assert!(matches!(
            rule.validate(),
            Err(EngineError::Configuration { .. })
        ));
        assert!(CouplingRule::new("velocity", "position", 1, -0.5)
            .validate()
            .is_ok());
    }
}
