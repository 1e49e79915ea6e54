//! Inbound request body and its validation.
//!
//! Constraints are declared on [`CallRequest`] with `validator` and the
//! resulting `ValidationErrors` are flattened into [`ValidationViolation`]s,
//! one per failed constraint, so every problem reaches the client.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use validator::{Validate, ValidationError, ValidationErrors};

pub const MIN_DAYS: i64 = 1;
pub const MAX_DAYS: i64 = 15;

/// Body of `POST /api/portcall` and `POST /api/berthcall`.
///
/// `days` is kept wider than its valid range so out-of-range numbers are
/// reported as violations instead of decode failures.
#[derive(Debug, Clone, Default, Deserialize, Serialize, Validate)]
pub struct CallRequest {
    #[validate(required, range(min = MIN_DAYS, max = MAX_DAYS))]
    pub days: Option<i64>,
}

impl CallRequest {
    pub fn new(days: i64) -> Self {
        Self { days: Some(days) }
    }

    /// Validate and return the day count.
    pub fn validated_days(&self) -> Result<u32, Vec<ValidationViolation>> {
        self.validate().map_err(|errors| violations(&errors))?;

        match self.days.map(u32::try_from) {
            Some(Ok(days)) => Ok(days),
            // unreachable once `required` and `range` passed
            _ => Err(vec![ValidationViolation {
                field: "days".to_string(),
                constraint: "required".to_string(),
                value: "null".to_string(),
            }]),
        }
    }
}

/// One failed constraint on one field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ValidationViolation {
    pub field: String,
    pub constraint: String,
    pub value: String,
}

impl std::fmt::Display for ValidationViolation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "[{}]: '{}' | Needs to implement '{}'",
            self.field, self.value, self.constraint
        )
    }
}

/// Join violations into the client-facing message.
pub fn violation_message(violations: &[ValidationViolation]) -> String {
    violations
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(" and ")
}

/// Flatten `validator` errors, ordered by field name.
pub fn violations(errors: &ValidationErrors) -> Vec<ValidationViolation> {
    let mut fields: Vec<_> = errors
        .field_errors()
        .into_iter()
        .map(|(field, errs)| (field.to_string(), errs))
        .collect();
    fields.sort_by(|a, b| a.0.cmp(&b.0));

    fields
        .into_iter()
        .flat_map(|(field, errs)| {
            errs.iter().map(move |err| ValidationViolation {
                field: field.clone(),
                constraint: constraint_tag(err),
                value: err
                    .params
                    .get("value")
                    .map(render_value)
                    .unwrap_or_else(|| "null".to_string()),
            })
        })
        .collect()
}

/// Name the violated bound rather than the whole range.
fn constraint_tag(err: &ValidationError) -> String {
    if err.code != "range" {
        return err.code.to_string();
    }

    let param = |name: &str| err.params.get(name);
    let value = param("value").and_then(Value::as_f64);
    let min = param("min");
    let max = param("max");

    match (value, min.and_then(Value::as_f64), max.and_then(Value::as_f64)) {
        (Some(v), Some(lo), _) if v < lo => format!("min={}", render_value(min.unwrap_or(&Value::Null))),
        (Some(v), _, Some(hi)) if v > hi => format!("max={}", render_value(max.unwrap_or(&Value::Null))),
        _ => err.code.to_string(),
    }
}

fn render_value(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        // range bounds may come back as floats; `1.0` should read `1`
        Value::Number(n) => match (n.as_i64(), n.as_f64()) {
            (Some(i), _) => i.to_string(),
            (None, Some(f)) if f.fract() == 0.0 && f.abs() < i64::MAX as f64 => (f as i64).to_string(),
            _ => n.to_string(),
        },
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn whole_range_is_accepted() {
        for days in MIN_DAYS..=MAX_DAYS {
            assert_eq!(CallRequest::new(days).validated_days(), Ok(days as u32));
        }
    }

    #[test]
    fn zero_violates_min() {
        let violations = CallRequest::new(0).validated_days().unwrap_err();
        assert_eq!(
            violations,
            vec![ValidationViolation {
                field: "days".into(),
                constraint: "min=1".into(),
                value: "0".into(),
            }]
        );
        assert_eq!(
            violation_message(&violations),
            "[days]: '0' | Needs to implement 'min=1'"
        );
    }

    #[test]
    fn negative_and_large_values_fail() {
        let low = CallRequest::new(-3).validated_days().unwrap_err();
        assert_eq!(low[0].constraint, "min=1");
        assert_eq!(low[0].value, "-3");

        let high = CallRequest::new(16).validated_days().unwrap_err();
        assert_eq!(high[0].field, "days");
        assert_eq!(high[0].constraint, "max=15");
        assert_eq!(high[0].value, "16");
    }

    #[test]
    fn missing_days_is_required() {
        let request: CallRequest = serde_json::from_str("{}").unwrap();
        let violations = request.validated_days().unwrap_err();
        assert_eq!(violations.len(), 1);
        assert_eq!(violations[0].field, "days");
        assert_eq!(violations[0].constraint, "required");
        assert_eq!(violations[0].value, "null");
    }

    #[test]
    fn explicit_null_is_required() {
        let request: CallRequest = serde_json::from_str(r#"{"days": null}"#).unwrap();
        assert_eq!(request.validated_days().unwrap_err()[0].constraint, "required");
    }

    #[test]
    fn non_numeric_days_fail_to_decode() {
        assert!(serde_json::from_str::<CallRequest>(r#"{"days": "seven"}"#).is_err());
        assert!(serde_json::from_str::<CallRequest>(r#"{"days": 2.5}"#).is_err());
    }

    #[test]
    fn message_joins_with_and() {
        let violations = vec![
            ValidationViolation {
                field: "days".into(),
                constraint: "required".into(),
                value: "null".into(),
            },
            ValidationViolation {
                field: "days".into(),
                constraint: "max=15".into(),
                value: "99".into(),
            },
        ];
        assert_eq!(
            violation_message(&violations),
            "[days]: 'null' | Needs to implement 'required' and [days]: '99' | Needs to implement 'max=15'"
        );
    }
}
