//! # Arogya Model
//!
//! 保险保费预测侧的输入校验、特征派生与分类器加载。

pub mod classifier;
pub mod input;
pub mod tier;

pub use classifier::{Classifier, ModelFeatures, PremiumModel};
pub use input::{UserInput, UserProfile};
