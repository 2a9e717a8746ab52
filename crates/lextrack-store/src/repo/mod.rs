//! Repository layer bridging domain models to persistence

mod case_repo;

pub use case_repo::CaseRepo;
