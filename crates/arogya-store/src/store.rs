//! 患者档案存储
//!
//! 单个JSON文件即事实源: 每次操作整文件读入、整文件写回, 进程内不跨
//! 请求缓存。load-check-save周期没有加锁, 并发create存在竞态(两个请求
//! 可能同时通过存在性检查), 写入也没有原子性保护, 中途崩溃可能损坏
//! 文件。这两点是已接受的限制; 若要收紧, 需在整个周期外加互斥。

use std::path::{Path, PathBuf};

use tracing::debug;

use arogya_core::{ArogyaError, Result};

use crate::record::{NewPatient, Patient, PatientMap};

/// JSON文件患者存储
pub struct PatientStore {
    path: PathBuf,
}

impl PatientStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// 存储文件路径
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// 整文件读入并解析
    ///
    /// 文件缺失或损坏一律视为存储不可用, 不重试、不自动重建。
    pub async fn load(&self) -> Result<PatientMap> {
        let raw = tokio::fs::read_to_string(&self.path).await.map_err(|e| {
            ArogyaError::StoreUnavailable(format!(
                "failed to read patient store {}: {e}",
                self.path.display()
            ))
        })?;
        let map: PatientMap = serde_json::from_str(&raw).map_err(|e| {
            ArogyaError::StoreUnavailable(format!(
                "failed to parse patient store {}: {e}",
                self.path.display()
            ))
        })?;

        debug!(
            "Loaded {} patient records from {}",
            map.len(),
            self.path.display()
        );
        Ok(map)
    }

    /// 整文件覆盖写回
    pub async fn save(&self, map: &PatientMap) -> Result<()> {
        let raw = serde_json::to_string_pretty(map)?;
        tokio::fs::write(&self.path, raw).await.map_err(|e| {
            ArogyaError::StoreUnavailable(format!(
                "failed to write patient store {}: {e}",
                self.path.display()
            ))
        })?;
        Ok(())
    }

    /// 点查单个患者
    pub async fn get(&self, id: &str) -> Result<Patient> {
        let map = self.load().await?;
        map.get(id)
            .cloned()
            .ok_or_else(|| ArogyaError::NotFound("Patient not found".to_string()))
    }

    /// 建档: 先校验, id已存在则拒绝, 否则插入并落盘
    pub async fn create(&self, new_patient: NewPatient) -> Result<()> {
        new_patient.patient.validate()?;

        let mut map = self.load().await?;
        if map.contains_key(&new_patient.id) {
            return Err(ArogyaError::AlreadyExists(
                "Patient already exists".to_string(),
            ));
        }
        map.insert(new_patient.id, new_patient.patient);
        self.save(&map).await
    }
}
