use crate::errors::BindError;
use crate::models::{FieldKind, FieldValue, FormField, FormValues};

use super::FormController;

/// Raw event coming from an input control.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Input<'a> {
    /// Text typed into a text or number input.
    Text(&'a str),
    /// Checkbox toggled.
    Checked(bool),
}

/// Turns a raw input event into a value of the field's kind.
///
/// Number inputs accept ASCII digits only; anything else (signs, decimals,
/// letters) is rejected here so it never reaches the draft. Blank reads as `0`.
pub fn coerce<F: FormField>(field: F, input: Input<'_>) -> Result<FieldValue, BindError> {
    match (field.kind(), input) {
        (FieldKind::Text, Input::Text(text)) => Ok(FieldValue::Text(text.to_string())),
        (FieldKind::Flag, Input::Checked(checked)) => Ok(FieldValue::Flag(checked)),
        (FieldKind::Numeric, Input::Text(raw)) => parse_whole_number(field, raw),
        (FieldKind::Numeric, Input::Checked(_))
        | (FieldKind::Text, Input::Checked(_))
        | (FieldKind::Flag, Input::Text(_)) => Err(BindError::KindMismatch {
            field: field.key(),
            expected: field.kind().as_str(),
        }),
    }
}

fn parse_whole_number<F: FormField>(field: F, raw: &str) -> Result<FieldValue, BindError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Ok(FieldValue::Number(0));
    }
    let rejected = || BindError::NonNumeric {
        field: field.key(),
        input: raw.to_string(),
    };
    if !trimmed.chars().all(|c| c.is_ascii_digit()) {
        return Err(rejected());
    }
    trimmed
        .parse::<u32>()
        .map(FieldValue::Number)
        .map_err(|_| rejected())
}

/// `{value, on_change, error}` for one field of a mounted form.
pub struct FieldBinding<'a, V: FormValues> {
    pub(super) form: &'a mut FormController<V>,
    pub(super) field: V::Field,
}

impl<V: FormValues> FieldBinding<'_, V> {
    pub fn value(&self) -> FieldValue {
        self.form.values().get(self.field)
    }

    pub fn error(&self) -> Option<&str> {
        self.form.errors().get(self.field)
    }

    /// Applies an input event. On rejection the draft keeps its previous value.
    pub fn on_change(&mut self, input: Input<'_>) -> Result<(), BindError> {
        self.form.change(self.field, input)
    }

    /// Shorthand for `on_change(Input::Text(..))`.
    pub fn set_text(&mut self, text: &str) -> Result<(), BindError> {
        self.on_change(Input::Text(text))
    }

    /// Shorthand for `on_change(Input::Checked(..))`.
    pub fn set_checked(&mut self, checked: bool) -> Result<(), BindError> {
        self.on_change(Input::Checked(checked))
    }

    /// Blur handler: validates just this field.
    pub fn on_blur(&mut self) -> Option<String> {
        self.form.validate_field(self.field).map(str::to_string)
    }
}
