//! 患者档案模型
//!
//! bmi与verdict是计算属性, 从不落盘; 对外视图在读取时由存量字段
//! 重新计算, 保证不会与源数据发散。

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use arogya_core::{utils, ArogyaError, Result};

/// 性别枚举
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Gender {
    Male,
    Female,
    Others,
}

/// BMI体重分级, 区别于保险侧的lifestyle_risk
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Verdict {
    Underweight,
    Normal,
    Overweight,
    Obese,
}

/// 患者存量字段, 与落盘JSON的value部分一一对应
///
/// id是映射的键, 不属于存量字段。
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Patient {
    pub name: String,
    pub city: String,
    pub age: u32,
    pub gender: Gender,
    /// 身高(m)
    pub height: f64,
    /// 体重(kg)
    pub weight: f64,
}

impl Patient {
    /// 建档时的范围校验
    pub fn validate(&self) -> Result<()> {
        if !(1..120).contains(&self.age) {
            return Err(ArogyaError::Validation(format!(
                "age must be greater than 0 and less than 120, got {}",
                self.age
            )));
        }
        if self.height <= 0.0 {
            return Err(ArogyaError::Validation(format!(
                "height must be greater than 0, got {}",
                self.height
            )));
        }
        if self.weight <= 0.0 {
            return Err(ArogyaError::Validation(format!(
                "weight must be greater than 0, got {}",
                self.weight
            )));
        }
        Ok(())
    }

    /// BMI, 患者口径保留两位小数
    pub fn bmi(&self) -> f64 {
        utils::round2(utils::bmi(self.weight, self.height))
    }

    /// 体重分级: <18.5 Underweight, [18.5,25) Normal, [25,30) Overweight, 其余 Obese
    pub fn verdict(&self) -> Verdict {
        let bmi = self.bmi();
        if bmi < 18.5 {
            Verdict::Underweight
        } else if bmi < 25.0 {
            Verdict::Normal
        } else if bmi < 30.0 {
            Verdict::Overweight
        } else {
            Verdict::Obese
        }
    }

    /// 对外视图: 存量字段加计算字段
    pub fn view(&self) -> PatientView {
        PatientView {
            name: self.name.clone(),
            city: self.city.clone(),
            age: self.age,
            gender: self.gender,
            height: self.height,
            weight: self.weight,
            bmi: self.bmi(),
            verdict: self.verdict(),
        }
    }
}

/// 建档请求体: 患者id加存量字段
#[derive(Debug, Clone, Deserialize)]
pub struct NewPatient {
    pub id: String,
    #[serde(flatten)]
    pub patient: Patient,
}

/// 患者对外视图, 带计算字段
#[derive(Debug, Clone, Serialize)]
pub struct PatientView {
    pub name: String,
    pub city: String,
    pub age: u32,
    pub gender: Gender,
    pub height: f64,
    pub weight: f64,
    pub bmi: f64,
    pub verdict: Verdict,
}

/// id → 患者的全量映射; BTreeMap保证落盘键序确定
pub type PatientMap = BTreeMap<String, Patient>;

#[cfg(test)]
mod tests {
    use super::*;

    fn patient(height: f64, weight: f64) -> Patient {
        Patient {
            name: "Ananya Verma".to_string(),
            city: "Guwahati".to_string(),
            age: 28,
            gender: Gender::Female,
            height,
            weight,
        }
    }

    #[test]
    fn test_bmi_is_rounded_to_two_decimals() {
        let p = patient(1.65, 90.0);
        assert_eq!(p.bmi(), 33.06);
    }

    #[test]
    fn test_verdict_boundaries() {
        // 身高1m时体重即为bmi
        assert_eq!(patient(1.0, 18.49).verdict(), Verdict::Underweight);
        assert_eq!(patient(1.0, 18.5).verdict(), Verdict::Normal);
        assert_eq!(patient(1.0, 24.99).verdict(), Verdict::Normal);
        assert_eq!(patient(1.0, 25.0).verdict(), Verdict::Overweight);
        assert_eq!(patient(1.0, 29.99).verdict(), Verdict::Overweight);
        assert_eq!(patient(1.0, 30.0).verdict(), Verdict::Obese);
    }

    #[test]
    fn test_validate_rejects_out_of_range_fields() {
        let mut p = patient(1.65, 90.0);
        p.age = 0;
        assert!(p.validate().is_err());

        let mut p = patient(1.65, 90.0);
        p.age = 120;
        assert!(p.validate().is_err());

        assert!(patient(0.0, 90.0).validate().is_err());
        assert!(patient(1.65, 0.0).validate().is_err());
        assert!(patient(1.65, 90.0).validate().is_ok());
    }

    #[test]
    fn test_stored_payload_excludes_computed_fields() {
        let value = serde_json::to_value(patient(1.65, 90.0)).unwrap();
        let object = value.as_object().unwrap();
        assert!(object.get("bmi").is_none());
        assert!(object.get("verdict").is_none());
        assert_eq!(object.len(), 6);
    }

    #[test]
    fn test_view_includes_computed_fields() {
        let view = patient(1.65, 90.0).view();
        assert_eq!(view.bmi, 33.06);
        assert_eq!(view.verdict, Verdict::Obese);

        let value = serde_json::to_value(&view).unwrap();
        assert_eq!(value["verdict"], "Obese");
        assert_eq!(value["bmi"], 33.06);
    }

    #[test]
    fn test_new_patient_flattens_payload() {
        let raw = r#"{
            "id": "P001",
            "name": "Ananya Verma",
            "city": "Guwahati",
            "age": 28,
            "gender": "female",
            "height": 1.65,
            "weight": 90.0
        }"#;
        let new_patient: NewPatient = serde_json::from_str(raw).unwrap();
        assert_eq!(new_patient.id, "P001");
        assert_eq!(new_patient.patient.gender, Gender::Female);

        let err = serde_json::from_str::<Gender>("\"unknown\"").unwrap_err();
        assert!(err.to_string().contains("unknown variant"));
    }
}
