use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RoiInput {
    pub employees: u32,
    pub average_hourly_cost: f64,
    pub hours_saved_per_employee_per_week: f64,
    pub implementation_cost: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoiEstimate {
    pub annual_hours_saved: f64,
    pub annual_savings: f64,
    pub net_first_year_benefit: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub roi_percent: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub payback_months: Option<f64>,
}
