use std::ops::RangeInclusive;

pub const MAX_WEIGHT_KG: f32 = 1000.0;
pub const MAX_REPS: f32 = 100.0;
pub const MAX_RIR: f32 = 10.0;

#[derive(Debug, Clone, Copy, Hash, PartialEq, Eq)]
pub enum SetField {
    Weight,
    Reps,
    RIR,
}

impl SetField {
    #[must_use]
    pub fn range(self) -> RangeInclusive<f32> {
        match self {
            SetField::Weight => 0.0..=MAX_WEIGHT_KG,
            SetField::Reps => 0.0..=MAX_REPS,
            SetField::RIR => 0.0..=MAX_RIR,
        }
    }

    fn violations(self) -> (FieldViolation, FieldViolation) {
        match self {
            SetField::Weight => (FieldViolation::NegativeWeight, FieldViolation::WeightTooHigh),
            SetField::Reps => (FieldViolation::NegativeReps, FieldViolation::TooManyReps),
            SetField::RIR => (FieldViolation::NegativeRIR, FieldViolation::RIRTooHigh),
        }
    }
}

#[derive(thiserror::Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldViolation {
    #[error("negative weight")]
    NegativeWeight,
    #[error("exceeds 1000 kg")]
    WeightTooHigh,
    #[error("negative reps")]
    NegativeReps,
    #[error("exceeds 100 reps")]
    TooManyReps,
    #[error("negative RIR")]
    NegativeRIR,
    #[error("exceeds 10 RIR")]
    RIRTooHigh,
}

#[derive(Debug, Default, Clone, Copy, PartialEq)]
pub enum FieldState {
    #[default]
    Unchecked,
    Empty,
    Valid,
    Invalid(FieldViolation),
}

impl FieldState {
    #[must_use]
    pub fn violation(self) -> Option<FieldViolation> {
        match self {
            FieldState::Invalid(violation) => Some(violation),
            FieldState::Unchecked | FieldState::Empty | FieldState::Valid => None,
        }
    }

    #[must_use]
    pub fn is_invalid(self) -> bool {
        self.violation().is_some()
    }
}

/// Check a single set field against its inclusive range.
///
/// A missing or unparsable (NaN) value is reported as empty. Bounds are inclusive, so
/// `1000` kg is valid and `1000.01` kg is not.
#[must_use]
pub fn validate(field: SetField, value: Option<f32>) -> FieldState {
    let Some(value) = value.filter(|v| !v.is_nan()) else {
        return FieldState::Empty;
    };
    let range = field.range();
    let (below, above) = field.violations();

    if value < *range.start() {
        FieldState::Invalid(below)
    } else if value > *range.end() {
        FieldState::Invalid(above)
    } else {
        FieldState::Valid
    }
}

/// Outcome of the last validation of each field of a set.
#[derive(Debug, Default, Clone, Copy, PartialEq)]
pub struct SetValidity {
    pub weight: FieldState,
    pub reps: FieldState,
    pub rir: FieldState,
}

impl SetValidity {
    #[must_use]
    pub fn get(&self, field: SetField) -> FieldState {
        match field {
            SetField::Weight => self.weight,
            SetField::Reps => self.reps,
            SetField::RIR => self.rir,
        }
    }

    pub fn record(&mut self, field: SetField, state: FieldState) {
        match field {
            SetField::Weight => self.weight = state,
            SetField::Reps => self.reps = state,
            SetField::RIR => self.rir = state,
        }
    }

    #[must_use]
    pub fn messages(&self) -> Vec<(SetField, String)> {
        [SetField::Weight, SetField::Reps, SetField::RIR]
            .into_iter()
            .filter_map(|f| self.get(f).violation().map(|v| (f, v.to_string())))
            .collect()
    }

    #[must_use]
    pub fn is_valid(&self) -> bool {
        !self.weight.is_invalid() && !self.reps.is_invalid() && !self.rir.is_invalid()
    }
}

/// Changes to a set. Fields left as `None` are kept, `Some(None)` clears a field.
#[derive(Debug, Default, Clone, Copy, PartialEq)]
pub struct SetPatch {
    pub weight_kg: Option<Option<f32>>,
    pub reps: Option<Option<i32>>,
    pub rir: Option<Option<f32>>,
}

impl SetPatch {
    #[must_use]
    pub fn weight_kg(mut self, value: Option<f32>) -> Self {
        self.weight_kg = Some(value);
        self
    }

    #[must_use]
    pub fn reps(mut self, value: Option<i32>) -> Self {
        self.reps = Some(value);
        self
    }

    #[must_use]
    pub fn rir(mut self, value: Option<f32>) -> Self {
        self.rir = Some(value);
        self
    }

    /// Parse raw input of a form field. Blank input clears the field.
    #[allow(clippy::cast_possible_truncation)]
    pub fn parse(self, field: SetField, input: &str) -> Result<Self, std::num::ParseFloatError> {
        let input = input.trim();
        if input.is_empty() {
            return Ok(match field {
                SetField::Weight => self.weight_kg(None),
                SetField::Reps => self.reps(None),
                SetField::RIR => self.rir(None),
            });
        }
        let value = input.parse::<f32>()?;
        Ok(match field {
            SetField::Weight => self.weight_kg(Some(value)),
            SetField::Reps => self.reps(Some(value.trunc() as i32)),
            SetField::RIR => self.rir(Some(value)),
        })
    }
}
