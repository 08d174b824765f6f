pub mod embedding;
pub mod provider;
pub mod report;
pub mod scorer;
pub mod similarity;
