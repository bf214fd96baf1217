//! Short human-readable labels for display layers.

use crate::angles::format_degrees;
use crate::chart::settings::CalculationSettings;
use crate::chart::types::BodyPosition;

/// e.g. `Sidereal zodiac (ayanamsa 24°31'), Koch houses`
pub fn describe_calculation_system(settings: &CalculationSettings) -> String {
    let zodiac = if settings.is_sidereal() {
        format!(
            "{} zodiac (ayanamsa {})",
            settings.zodiac.name(),
            format_degrees(settings.ayanamsa)
        )
    } else {
        format!("{} zodiac", settings.zodiac.name())
    };
    format!("{}, {} houses", zodiac, settings.house_system.name())
}

/// e.g. `Mercury 3°07' Cancer R`
pub fn describe_body(position: &BodyPosition) -> String {
    let mut label = format!(
        "{} {} {}",
        position.body.name(),
        format_degrees(position.degree_in_sign),
        position.sign
    );
    if position.retrograde {
        label.push_str(" R");
    }
    label
}
