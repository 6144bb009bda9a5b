//! 保费分类器
//!
//! 分类器以JSON工件形式在进程启动时加载一次, 运行期只读, 可被各请求
//! 并发共享。服务层只依赖[`Classifier`]能力, 不感知模型内部结构;
//! 工件格式由建模侧约定, 这里只负责解释执行。

use std::path::Path;

use serde::Deserialize;
use tracing::info;

use arogya_core::{ArogyaError, Result};

use crate::input::{AgeGroup, LifestyleRisk, Occupation};

/// 送入分类器的六个特征, 名称与训练侧的列名一一对应
#[derive(Debug, Clone)]
pub struct ModelFeatures {
    pub bmi: f64,
    pub age_group: AgeGroup,
    pub lifestyle_risk: LifestyleRisk,
    pub city_tier: u8,
    pub income_lpa: f64,
    pub occupation: Occupation,
}

/// 特征值: 数值或类别
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FeatureValue<'a> {
    Number(f64),
    Category(&'a str),
}

impl ModelFeatures {
    /// 按训练侧列名取特征值
    pub fn get(&self, name: &str) -> Option<FeatureValue<'_>> {
        match name {
            "bmi" => Some(FeatureValue::Number(self.bmi)),
            "age_group" => Some(FeatureValue::Category(self.age_group.as_str())),
            "lifestyle_risk" => Some(FeatureValue::Category(self.lifestyle_risk.as_str())),
            "city_tier" => Some(FeatureValue::Number(f64::from(self.city_tier))),
            "income_lpa" => Some(FeatureValue::Number(self.income_lpa)),
            "occupation" => Some(FeatureValue::Category(self.occupation.as_str())),
            _ => None,
        }
    }
}

/// 分类器能力: 特征进, 类别标签出
pub trait Classifier: Send + Sync {
    /// 预测保费档位标签, 标签取自工件声明的封闭集合
    fn predict(&self, features: &ModelFeatures) -> Result<String>;

    /// 模型工件版本号
    fn version(&self) -> &str;
}

/// 决策树节点
///
/// 数值分裂在特征值 <= threshold 时走left, 类别分裂在特征值命中
/// in集合时走left, 其余情况走right。
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum TreeNode {
    Leaf {
        class: String,
    },
    NumericSplit {
        feature: String,
        threshold: f64,
        left: Box<TreeNode>,
        right: Box<TreeNode>,
    },
    CategorySplit {
        feature: String,
        #[serde(rename = "in")]
        members: Vec<String>,
        left: Box<TreeNode>,
        right: Box<TreeNode>,
    },
}

impl TreeNode {
    fn evaluate<'a>(&'a self, features: &ModelFeatures) -> Result<&'a str> {
        match self {
            TreeNode::Leaf { class } => Ok(class),
            TreeNode::NumericSplit {
                feature,
                threshold,
                left,
                right,
            } => match features.get(feature) {
                Some(FeatureValue::Number(value)) => {
                    if value <= *threshold {
                        left.evaluate(features)
                    } else {
                        right.evaluate(features)
                    }
                }
                Some(FeatureValue::Category(_)) => Err(ArogyaError::Prediction(format!(
                    "model splits on feature '{feature}' as numeric but it is categorical"
                ))),
                None => Err(ArogyaError::Prediction(format!(
                    "model references unknown feature '{feature}'"
                ))),
            },
            TreeNode::CategorySplit {
                feature,
                members,
                left,
                right,
            } => match features.get(feature) {
                Some(FeatureValue::Category(value)) => {
                    if members.iter().any(|m| m == value) {
                        left.evaluate(features)
                    } else {
                        right.evaluate(features)
                    }
                }
                Some(FeatureValue::Number(_)) => Err(ArogyaError::Prediction(format!(
                    "model splits on feature '{feature}' as categorical but it is numeric"
                ))),
                None => Err(ArogyaError::Prediction(format!(
                    "model references unknown feature '{feature}'"
                ))),
            },
        }
    }
}

/// 从JSON工件加载的保费分类模型
#[derive(Debug, Clone, Deserialize)]
pub struct PremiumModel {
    pub name: String,
    pub version: String,
    /// 模型可能输出的全部类别
    pub classes: Vec<String>,
    tree: TreeNode,
}

impl PremiumModel {
    /// 从工件文件加载模型
    ///
    /// 工件缺失或无法解析视为启动期致命错误, 请求路径不做兜底。
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path).map_err(|e| {
            ArogyaError::Config(format!(
                "failed to read model artifact {}: {e}",
                path.display()
            ))
        })?;
        let model: PremiumModel = serde_json::from_str(&raw).map_err(|e| {
            ArogyaError::Config(format!(
                "failed to parse model artifact {}: {e}",
                path.display()
            ))
        })?;
        if model.classes.is_empty() {
            return Err(ArogyaError::Config(format!(
                "model artifact {} declares no classes",
                path.display()
            )));
        }

        info!(
            "Model '{}' v{} loaded, classes: {:?}",
            model.name, model.version, model.classes
        );
        Ok(model)
    }
}

impl Classifier for PremiumModel {
    fn predict(&self, features: &ModelFeatures) -> Result<String> {
        let class = self.tree.evaluate(features)?;
        if !self.classes.iter().any(|c| c == class) {
            return Err(ArogyaError::Prediction(format!(
                "model produced class '{class}' not declared in artifact"
            )));
        }
        Ok(class.to_string())
    }

    fn version(&self) -> &str {
        &self.version
    }
}
