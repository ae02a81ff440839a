use crate::models::roi::{RoiEstimate, RoiInput};
use crate::services::roi_calculator::calculate_roi;

use super::{CommandError, CommandResult};

#[tauri::command]
pub fn roi_calculate(input: RoiInput) -> CommandResult<RoiEstimate> {
    calculate_roi(&input).map_err(CommandError::from)
}
