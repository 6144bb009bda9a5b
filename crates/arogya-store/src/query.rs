//! 档案排序查询

use std::str::FromStr;

use arogya_core::{ArogyaError, Result};

use crate::record::{Patient, PatientMap, PatientView};

/// 可排序字段
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortField {
    Height,
    Weight,
    Bmi,
}

impl SortField {
    fn key(&self, patient: &Patient) -> f64 {
        match self {
            SortField::Height => patient.height,
            SortField::Weight => patient.weight,
            SortField::Bmi => patient.bmi(),
        }
    }
}

impl FromStr for SortField {
    type Err = ArogyaError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "height" => Ok(SortField::Height),
            "weight" => Ok(SortField::Weight),
            "bmi" => Ok(SortField::Bmi),
            other => Err(ArogyaError::InvalidArgument(format!(
                "Invalid sort field '{other}', valid fields: height, weight, bmi"
            ))),
        }
    }
}

/// 排序方向
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortOrder {
    Asc,
    Desc,
}

impl FromStr for SortOrder {
    type Err = ArogyaError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "asc" => Ok(SortOrder::Asc),
            "desc" => Ok(SortOrder::Desc),
            other => Err(ArogyaError::InvalidArgument(format!(
                "Invalid sort order '{other}', valid orders: asc, desc"
            ))),
        }
    }
}

/// 对全量档案按指定字段排序, 返回展示视图
///
/// 稳定排序, 键相等时保持底层map的id顺序; BMI按展示用的两位小数比较。
pub fn sort_records(map: &PatientMap, field: SortField, order: SortOrder) -> Vec<PatientView> {
    let mut records: Vec<&Patient> = map.values().collect();
    records.sort_by(|a, b| {
        let ordering = field.key(a).total_cmp(&field.key(b));
        match order {
            SortOrder::Asc => ordering,
            SortOrder::Desc => ordering.reverse(),
        }
    });
    records.iter().map(|p| p.view()).collect()
}
