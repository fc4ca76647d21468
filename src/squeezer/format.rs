//! Display helpers shared by the renderer and the activity feed.

use super::model::JuiceQuality;
use super::store::StoreChange;
use rand::RngExt;

const MOTIVATIONS: &[&str] = &[
    "Keep squeezing! 🍋",
    "Fresh juice coming up! 🥤",
    "You're doing great! 💪",
    "Almost there! 🎯",
    "Lemon power! ⚡",
    "Squeeze away! 🤏",
    "Juice master! 👑",
    "Vitamin C boost! 🌟",
];

pub const FUN_FACTS: &[&str] = &[
    "A medium lemon contains about 3 tablespoons of juice!",
    "Roll your lemons before squeezing for maximum juice extraction!",
    "Lemons float in water, limes usually sink.",
];

/// `42.25` → `"42.3ml"`.
pub fn format_juice(ml: f64) -> String {
    format!("{:.1}ml", ml)
}

/// Share of `capacity` that was extracted, in percent.
pub fn extraction_percent(extracted: f64, capacity: f64) -> f64 {
    if capacity > 0.0 {
        extracted / capacity * 100.0
    } else {
        0.0
    }
}

/// Fill level of a glass holding `glass_capacity` ml, clamped to `[0, 1]`.
pub fn glass_fill(total: f64, glass_capacity: f64) -> f64 {
    if glass_capacity <= 0.0 {
        return 0.0;
    }
    (total / glass_capacity).clamp(0.0, 1.0)
}

pub fn quality_badge(quality: JuiceQuality) -> &'static str {
    match quality {
        JuiceQuality::Excellent => "🌟",
        JuiceQuality::Good => "👍",
        JuiceQuality::Poor => "😞",
    }
}

/// One-line description of a store change.
pub fn describe_change(change: &StoreChange) -> String {
    match change {
        StoreChange::Added { id, size } => {
            format!("Added a {} lemon [{}] ({})", size, id, size.description())
        }
        StoreChange::SqueezeStarted { id } => format!("Squeezing lemon [{}]...", id),
        StoreChange::SqueezeCompleted {
            id,
            extracted,
            quality,
        } => format!(
            "Lemon [{}] gave {} of juice, quality now {}",
            id,
            format_juice(*extracted),
            quality
        ),
        StoreChange::SqueezeAbandoned { id } => {
            format!("Lemon [{}] was removed before the squeeze finished", id)
        }
        StoreChange::Removed { id } => format!("Removed lemon [{}]", id),
        StoreChange::Reset => "Squeezer reset".to_string(),
    }
}

/// A random cheerful line.
pub fn motivation() -> &'static str {
    let mut rng = rand::rng();
    MOTIVATIONS[rng.random_range(0..MOTIVATIONS.len())]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_juice() {
        assert_eq!(format_juice(0.0), "0.0ml");
        assert_eq!(format_juice(42.26), "42.3ml");
        assert_eq!(format_juice(80.0), "80.0ml");
    }

    #[test]
    fn test_extraction_percent() {
        assert_eq!(extraction_percent(40.0, 50.0), 80.0);
        assert_eq!(extraction_percent(5.0, 0.0), 0.0);
    }

    #[test]
    fn test_glass_fill_clamps() {
        assert_eq!(glass_fill(250.0, 500.0), 0.5);
        assert_eq!(glass_fill(900.0, 500.0), 1.0);
        assert_eq!(glass_fill(10.0, 0.0), 0.0);
    }

    #[test]
    fn test_describe_change() {
        use crate::squeezer::model::{CitrusSize, LemonId};
        let line = describe_change(&StoreChange::Added {
            id: LemonId(1),
            size: CitrusSize::Small,
        });
        assert_eq!(line, "Added a small lemon [001] (~30ml juice)");
        let line = describe_change(&StoreChange::SqueezeCompleted {
            id: LemonId(1),
            extracted: 25.04,
            quality: JuiceQuality::Excellent,
        });
        assert_eq!(line, "Lemon [001] gave 25.0ml of juice, quality now Excellent");
        assert_eq!(describe_change(&StoreChange::Reset), "Squeezer reset");
    }

    #[test]
    fn test_motivation_from_list() {
        for _ in 0..20 {
            assert!(MOTIVATIONS.contains(&motivation()));
        }
    }
}
