pub mod compare_service;
pub mod fund_service;
pub mod goal_service;
pub mod investment_service;
pub mod kyc_service;
pub mod market_service;
pub mod overlap_service;
pub mod reminder_service;
