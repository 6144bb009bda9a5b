//! # Arogya Store
//!
//! 患者档案的JSON文件存储、记录校验模型与排序查询。

pub mod query;
pub mod record;
pub mod store;

pub use query::{sort_records, SortField, SortOrder};
pub use record::{Gender, NewPatient, Patient, PatientMap, PatientView, Verdict};
pub use store::PatientStore;
