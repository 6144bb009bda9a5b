//! 保险预测输入模型
//!
//! 原始请求字段的校验与归一化, 以及模型特征的派生。校验失败的请求
//! 在任何派生计算或预测之前被拒绝; 派生值一律按需计算, 不落冗余字段。

use arogya_core::{utils, ArogyaError, Result};
use serde::{Deserialize, Serialize};

use crate::classifier::ModelFeatures;
use crate::tier::city_tier;

/// 职业枚举, 取值集合与模型训练侧保持一致
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Occupation {
    Retired,
    Freelancer,
    Student,
    GovernmentJob,
    BusinessOwner,
    Unemployed,
    PrivateJob,
}

impl Occupation {
    /// 线上字符串表示, 与序列化形式一致
    pub fn as_str(&self) -> &'static str {
        match self {
            Occupation::Retired => "retired",
            Occupation::Freelancer => "freelancer",
            Occupation::Student => "student",
            Occupation::GovernmentJob => "government_job",
            Occupation::BusinessOwner => "business_owner",
            Occupation::Unemployed => "unemployed",
            Occupation::PrivateJob => "private_job",
        }
    }
}

/// 年龄段
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum AgeGroup {
    Young,
    Adult,
    MiddleAged,
    Senior,
}

impl AgeGroup {
    pub fn as_str(&self) -> &'static str {
        match self {
            AgeGroup::Young => "young",
            AgeGroup::Adult => "adult",
            AgeGroup::MiddleAged => "middle_aged",
            AgeGroup::Senior => "senior",
        }
    }
}

/// 生活方式风险档位
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum LifestyleRisk {
    High,
    Medium,
    Low,
}

impl LifestyleRisk {
    pub fn as_str(&self) -> &'static str {
        match self {
            LifestyleRisk::High => "high",
            LifestyleRisk::Medium => "medium",
            LifestyleRisk::Low => "low",
        }
    }
}

/// 原始请求体, 未经范围校验
///
/// 类型错误和非法枚举值由反序列化阶段拦截, 范围约束由[`validate`]拦截。
///
/// [`validate`]: UserInput::validate
#[derive(Debug, Clone, Deserialize)]
pub struct UserInput {
    /// 年龄(岁)
    pub age: u32,
    /// 体重(kg)
    pub weight: f64,
    /// 身高(m)
    pub height: f64,
    /// 年收入(lakh/年)
    pub income_lpa: f64,
    /// 是否吸烟
    pub smoker: bool,
    /// 所在城市
    pub city: String,
    /// 职业
    pub occupation: Occupation,
}

impl UserInput {
    /// 校验取值范围并归一化城市名, 产出可供特征派生的档案
    ///
    /// 城市归一化(去空白+标题化)只在这里发生一次, 先于任何派生字段的读取,
    /// 保证档位查表看到的城市名与名单的归一化规则一致。
    pub fn validate(self) -> Result<UserProfile> {
        if !(1..120).contains(&self.age) {
            return Err(ArogyaError::Validation(format!(
                "age must be greater than 0 and less than 120, got {}",
                self.age
            )));
        }
        if self.weight <= 0.0 {
            return Err(ArogyaError::Validation(format!(
                "weight must be greater than 0, got {}",
                self.weight
            )));
        }
        if !(self.height > 0.0 && self.height < 3.0) {
            return Err(ArogyaError::Validation(format!(
                "height must be greater than 0 and less than 3, got {}",
                self.height
            )));
        }
        if self.income_lpa <= 0.0 {
            return Err(ArogyaError::Validation(format!(
                "income_lpa must be greater than 0, got {}",
                self.income_lpa
            )));
        }

        Ok(UserProfile {
            age: self.age,
            weight: self.weight,
            height: self.height,
            income_lpa: self.income_lpa,
            smoker: self.smoker,
            city: utils::title_case(self.city.trim()),
            occupation: self.occupation,
        })
    }
}

/// 校验并归一化后的用户档案
///
/// 四个派生值(bmi/age_group/lifestyle_risk/city_tier)均为源字段的
/// 纯函数, 每次读取重新计算, 不会与源字段发散。
#[derive(Debug, Clone, Serialize)]
pub struct UserProfile {
    pub age: u32,
    pub weight: f64,
    pub height: f64,
    pub income_lpa: f64,
    pub smoker: bool,
    /// 已归一化的城市名
    pub city: String,
    pub occupation: Occupation,
}

impl UserProfile {
    /// BMI, 保险口径不做舍入
    pub fn bmi(&self) -> f64 {
        utils::bmi(self.weight, self.height)
    }

    /// 年龄段: <25 young, [25,45) adult, [45,60) middle_aged, 其余 senior
    pub fn age_group(&self) -> AgeGroup {
        match self.age {
            0..=24 => AgeGroup::Young,
            25..=44 => AgeGroup::Adult,
            45..=59 => AgeGroup::MiddleAged,
            _ => AgeGroup::Senior,
        }
    }

    /// 生活方式风险: 吸烟且bmi>30为high, 吸烟或bmi>27为medium, 否则low
    pub fn lifestyle_risk(&self) -> LifestyleRisk {
        let bmi = self.bmi();
        if self.smoker && bmi > 30.0 {
            LifestyleRisk::High
        } else if self.smoker || bmi > 27.0 {
            LifestyleRisk::Medium
        } else {
            LifestyleRisk::Low
        }
    }

    /// 城市档位, 基于已归一化的城市名查表
    pub fn city_tier(&self) -> u8 {
        city_tier(&self.city)
    }

    /// 组装送入分类器的六个特征
    pub fn features(&self) -> ModelFeatures {
        ModelFeatures {
            bmi: self.bmi(),
            age_group: self.age_group(),
            lifestyle_risk: self.lifestyle_risk(),
            city_tier: self.city_tier(),
            income_lpa: self.income_lpa,
            occupation: self.occupation,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_input() -> UserInput {
        UserInput {
            age: 28,
            weight: 85.0,
            height: 1.75,
            income_lpa: 24.6,
            smoker: false,
            city: "Guwahati".to_string(),
            occupation: Occupation::PrivateJob,
        }
    }

    #[test]
    fn test_validate_accepts_sample() {
        let profile = sample_input().validate().unwrap();
        assert_eq!(profile.city, "Guwahati");
        assert!((profile.bmi() - 85.0 / (1.75 * 1.75)).abs() < 1e-12);
    }

    #[test]
    fn test_validate_rejects_age_bounds() {
        let mut input = sample_input();
        input.age = 0;
        assert!(matches!(
            input.validate(),
            Err(arogya_core::ArogyaError::Validation(msg)) if msg.contains("age")
        ));

        let mut input = sample_input();
        input.age = 120;
        assert!(input.validate().is_err());
    }

    #[test]
    fn test_validate_rejects_height_bounds() {
        let mut input = sample_input();
        input.height = 0.0;
        assert!(input.validate().is_err());

        let mut input = sample_input();
        input.height = 3.0;
        assert!(matches!(
            input.validate(),
            Err(arogya_core::ArogyaError::Validation(msg)) if msg.contains("height")
        ));
    }

    #[test]
    fn test_validate_rejects_nonpositive_weight_and_income() {
        let mut input = sample_input();
        input.weight = 0.0;
        assert!(input.validate().is_err());

        let mut input = sample_input();
        input.income_lpa = -1.0;
        assert!(input.validate().is_err());
    }

    #[test]
    fn test_city_is_normalized_before_tier_lookup() {
        let mut input = sample_input();
        input.city = "  mumbai ".to_string();
        let profile = input.validate().unwrap();
        assert_eq!(profile.city, "Mumbai");
        assert_eq!(profile.city_tier(), 1);

        let mut input = sample_input();
        input.city = "Jaipur".to_string();
        assert_eq!(input.validate().unwrap().city_tier(), 2);

        let mut input = sample_input();
        input.city = "Atlantis".to_string();
        assert_eq!(input.validate().unwrap().city_tier(), 3);
    }

    #[test]
    fn test_age_group_boundaries() {
        let cases = [
            (24, AgeGroup::Young),
            (25, AgeGroup::Adult),
            (44, AgeGroup::Adult),
            (45, AgeGroup::MiddleAged),
            (59, AgeGroup::MiddleAged),
            (60, AgeGroup::Senior),
            (119, AgeGroup::Senior),
        ];
        for (age, expected) in cases {
            let mut input = sample_input();
            input.age = age;
            assert_eq!(input.validate().unwrap().age_group(), expected, "age {age}");
        }
    }

    #[test]
    fn test_lifestyle_risk_buckets() {
        // 身高1m时体重即为bmi, 方便直接指定边界值
        let cases = [
            (true, 31.0, LifestyleRisk::High),
            (true, 28.0, LifestyleRisk::Medium),
            (false, 28.0, LifestyleRisk::Medium),
            (false, 20.0, LifestyleRisk::Low),
            (true, 30.0, LifestyleRisk::Medium),
            (false, 27.0, LifestyleRisk::Low),
        ];
        for (smoker, bmi, expected) in cases {
            let mut input = sample_input();
            input.smoker = smoker;
            input.height = 1.0;
            input.weight = bmi;
            let profile = input.validate().unwrap();
            assert_eq!(
                profile.lifestyle_risk(),
                expected,
                "smoker={smoker} bmi={bmi}"
            );
        }
    }

    #[test]
    fn test_occupation_wire_format() {
        let occupation: Occupation = serde_json::from_str("\"government_job\"").unwrap();
        assert_eq!(occupation, Occupation::GovernmentJob);
        assert_eq!(occupation.as_str(), "government_job");

        let err = serde_json::from_str::<Occupation>("\"astronaut\"").unwrap_err();
        assert!(err.to_string().contains("unknown variant"));
    }
}
