//! 通用工具函数

/// 计算体质指数: 体重(kg) / 身高(m)²
pub fn bmi(weight_kg: f64, height_m: f64) -> f64 {
    weight_kg / (height_m * height_m)
}

/// 四舍五入到两位小数
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// 标题化字符串: 每个连续字母段的首字母大写, 其余小写
///
/// 非字母字符视为单词边界, 与城市名单的归一化规则一致。
pub fn title_case(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut word_start = true;
    for c in s.chars() {
        if c.is_alphabetic() {
            if word_start {
                out.extend(c.to_uppercase());
            } else {
                out.extend(c.to_lowercase());
            }
            word_start = false;
        } else {
            out.push(c);
            word_start = true;
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bmi() {
        let value = bmi(85.0, 1.7);
        assert!((value - 29.411764705882355).abs() < 1e-12);
    }

    #[test]
    fn test_round2() {
        assert_eq!(round2(29.411764705882355), 29.41);
        assert_eq!(round2(33.058), 33.06);
        assert_eq!(round2(25.0), 25.0);
    }

    #[test]
    fn test_title_case() {
        assert_eq!(title_case("mumbai"), "Mumbai");
        assert_eq!(title_case("DELHI"), "Delhi");
        assert_eq!(title_case("navi mumbai"), "Navi Mumbai");
        assert_eq!(title_case("  pune  "), "  Pune  ");
        assert_eq!(title_case(""), "");
    }
}
