//! 城市档位划分
//!
//! 两份名单是预归一化(标题化)的固定集合, 调用方在查表前必须完成
//! 同样的归一化, 否则大小写差异会落入默认档位。

/// 一线城市名单
pub const TIER_1_CITIES: [&str; 7] = [
    "Mumbai", "Delhi", "Bangalore", "Chennai", "Kolkata", "Hyderabad", "Pune",
];

/// 二线城市名单
pub const TIER_2_CITIES: [&str; 48] = [
    "Jaipur",
    "Chandigarh",
    "Indore",
    "Lucknow",
    "Patna",
    "Ranchi",
    "Visakhapatnam",
    "Coimbatore",
    "Bhopal",
    "Nagpur",
    "Vadodara",
    "Surat",
    "Rajkot",
    "Jodhpur",
    "Raipur",
    "Amritsar",
    "Varanasi",
    "Agra",
    "Dehradun",
    "Mysore",
    "Jabalpur",
    "Guwahati",
    "Thiruvananthapuram",
    "Ludhiana",
    "Nashik",
    "Allahabad",
    "Udaipur",
    "Aurangabad",
    "Hubli",
    "Belgaum",
    "Salem",
    "Vijayawada",
    "Tiruchirappalli",
    "Bhavnagar",
    "Gwalior",
    "Dhanbad",
    "Bareilly",
    "Aligarh",
    "Gaya",
    "Kozhikode",
    "Warangal",
    "Kolhapur",
    "Bilaspur",
    "Jalandhar",
    "Noida",
    "Guntur",
    "Asansol",
    "Siliguri",
];

/// 城市档位: 一线为1, 二线为2, 其余为3
pub fn city_tier(city: &str) -> u8 {
    if TIER_1_CITIES.contains(&city) {
        1
    } else if TIER_2_CITIES.contains(&city) {
        2
    } else {
        3
    }
}
