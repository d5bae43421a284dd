pub mod records_model;
pub mod records_repository;
pub mod records_service;
pub mod records_traits;

pub use records_model::{NewRecord, Record};
pub use records_repository::InMemoryRecordRepository;
pub use records_service::RecordService;
pub use records_traits::{RecordRepositoryTrait, RecordServiceTrait};
