pub mod awards;
pub mod export;
