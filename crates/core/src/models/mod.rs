pub mod analytics;
pub mod envelope;
pub mod fund;
pub mod goal;
pub mod investment;
pub mod kyc;
pub mod market;
pub mod profile;
pub mod reminder;
pub mod serialization;
pub mod settings;
