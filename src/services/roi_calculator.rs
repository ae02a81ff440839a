use crate::error::{AppError, AppResult};
use crate::models::roi::{RoiEstimate, RoiInput};

const WEEKS_PER_YEAR: f64 = 52.0;
const MONTHS_PER_YEAR: f64 = 12.0;

/// Estimates first-year return of an automation project from hours saved.
pub fn calculate_roi(input: &RoiInput) -> AppResult<RoiEstimate> {
    if input.employees == 0 {
        return Err(AppError::invalid_field("employees", "employees must be greater than 0"));
    }
    ensure_non_negative("average_hourly_cost", input.average_hourly_cost)?;
    ensure_non_negative(
        "hours_saved_per_employee_per_week",
        input.hours_saved_per_employee_per_week,
    )?;
    ensure_non_negative("implementation_cost", input.implementation_cost)?;

    let annual_hours_saved =
        f64::from(input.employees) * input.hours_saved_per_employee_per_week * WEEKS_PER_YEAR;
    let annual_savings = annual_hours_saved * input.average_hourly_cost;
    let net_first_year_benefit = annual_savings - input.implementation_cost;

    let roi_percent = (input.implementation_cost > 0.0)
        .then(|| net_first_year_benefit / input.implementation_cost * 100.0);
    let payback_months = (input.implementation_cost > 0.0 && annual_savings > 0.0)
        .then(|| input.implementation_cost / (annual_savings / MONTHS_PER_YEAR));

    Ok(RoiEstimate {
        annual_hours_saved: round2(annual_hours_saved),
        annual_savings: round2(annual_savings),
        net_first_year_benefit: round2(net_first_year_benefit),
        roi_percent: roi_percent.map(round2),
        payback_months: payback_months.map(round2),
    })
}

fn ensure_non_negative(field: &str, value: f64) -> AppResult<()> {
    if !value.is_finite() || value < 0.0 {
        return Err(AppError::invalid_field(
            field,
            format!("{field} must be a non-negative number"),
        ));
    }
    Ok(())
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
