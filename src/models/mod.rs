pub mod assessment;
pub mod lead;
pub mod recommendation;
pub mod roi;
