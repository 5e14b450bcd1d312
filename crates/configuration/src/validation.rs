use core_types::SimulationParameters;
use std::fmt;

/// A single violated input constraint.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParameterViolation {
    pub field: &'static str,
    pub message: String,
}

/// Every constraint the parameters violate, in field order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationErrors(pub Vec<ParameterViolation>);

impl ValidationErrors {
    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &ParameterViolation> {
        self.0.iter()
    }

    pub fn messages(&self) -> Vec<&str> {
        self.0.iter().map(|v| v.message.as_str()).collect()
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} invalid parameter(s): {}", self.len(), self.messages().join("; "))
    }
}

impl std::error::Error for ValidationErrors {}

/// Checks every input constraint and reports all violations together.
///
/// A non-finite value is reported as such instead of against its range, so each
/// field contributes at most one message.
pub fn validate(params: &SimulationParameters) -> Result<(), ValidationErrors> {
    let mut violations = Vec::new();

    let mut check = |field: &'static str, label: &str, value: f64, ok: bool, rule: &str| {
        if !value.is_finite() {
            violations.push(ParameterViolation {
                field,
                message: format!("{label} must be a finite number"),
            });
        } else if !ok {
            violations.push(ParameterViolation {
                field,
                message: format!("{label} {rule}"),
            });
        }
    };

    let p = params;
    check("initial_capital", "Initial capital", p.initial_capital, p.initial_capital > 0.0, "must be greater than 0");
    check("leverage", "Leverage", p.leverage, p.leverage >= 1.0, "must be at least 1");
    check("entry_price", "Entry price", p.entry_price, p.entry_price > 0.0, "must be greater than 0");
    check("step_growth", "Step growth", p.step_growth, p.step_growth > 0.0, "must be greater than 0%");
    check("step_count", "Step count", p.step_count as f64, p.step_count > 0, "must be a positive integer");
    check("taker_fee_rate", "Taker fee rate", p.taker_fee_rate, p.taker_fee_rate >= 0.0, "cannot be negative");
    check(
        "funding_rate_per_step",
        "Funding rate",
        p.funding_rate_per_step,
        p.funding_rate_per_step >= 0.0,
        "cannot be negative",
    );
    check(
        "maintenance_margin_rate",
        "Maintenance margin rate",
        p.maintenance_margin_rate,
        p.maintenance_margin_rate >= 0.0,
        "cannot be negative",
    );

    if violations.is_empty() {
        Ok(())
    } else {
        Err(ValidationErrors(violations))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        assert!(validate(&SimulationParameters::default()).is_ok());
    }

    #[test]
    fn reports_every_violation_at_once() {
        let params = SimulationParameters {
            initial_capital: 0.0,
            leverage: 0.5,
            entry_price: -1.0,
            step_growth: 0.0,
            step_count: 0,
            taker_fee_rate: -0.1,
            funding_rate_per_step: -0.1,
            maintenance_margin_rate: -0.1,
            close_at_end: false,
        };
        let errs = validate(&params).unwrap_err();
        let fields: Vec<_> = errs.iter().map(|v| v.field).collect();
        assert_eq!(
            fields,
            vec![
                "initial_capital",
                "leverage",
                "entry_price",
                "step_growth",
                "step_count",
                "taker_fee_rate",
                "funding_rate_per_step",
                "maintenance_margin_rate",
            ]
        );
        assert!(errs.to_string().starts_with("8 invalid parameter(s)"));
    }

    #[test]
    fn non_finite_values_get_one_message_each() {
        let params = SimulationParameters {
            leverage: f64::NAN,
            entry_price: f64::INFINITY,
            ..SimulationParameters::default()
        };
        let errs = validate(&params).unwrap_err();
        assert_eq!(
            errs.messages(),
            vec!["Leverage must be a finite number", "Entry price must be a finite number"]
        );
    }

    #[test]
    fn boundary_values_pass() {
        let params = SimulationParameters {
            leverage: 1.0,
            taker_fee_rate: 0.0,
            funding_rate_per_step: 0.0,
            maintenance_margin_rate: 0.0,
            step_count: 1,
            ..SimulationParameters::default()
        };
        assert!(validate(&params).is_ok());
    }
}
