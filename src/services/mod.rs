pub mod assessment_service;
pub mod assessment_store;
pub mod lead_service;
pub mod maturity_scorer;
pub mod recommendation_generator;
pub mod roi_calculator;
