//! Measurement units a prediction may carry.

/// Canonical unit names, grouped by the entity they measure.
pub const ALLOWED_UNITS: &[&str] = &[
    // length: width, depth, height
    "centimetre",
    "foot",
    "inch",
    "metre",
    "millimetre",
    "yard",
    // weight: item_weight, maximum_weight_recommendation
    "gram",
    "kilogram",
    "microgram",
    "milligram",
    "ounce",
    "pound",
    "ton",
    // voltage
    "kilovolt",
    "millivolt",
    "volt",
    // wattage
    "kilowatt",
    "watt",
    // item_volume
    "centilitre",
    "cubic foot",
    "cubic inch",
    "cup",
    "decilitre",
    "fluid ounce",
    "gallon",
    "imperial gallon",
    "litre",
    "microlitre",
    "millilitre",
    "pint",
    "quart",
];

/// Common spellings and abbreviations mapped onto a canonical unit.
const ALIASES: &[(&str, &str)] = &[
    ("cm", "centimetre"),
    ("centimeter", "centimetre"),
    ("ft", "foot"),
    ("feet", "foot"),
    ("in", "inch"),
    ("inches", "inch"),
    ("m", "metre"),
    ("meter", "metre"),
    ("mm", "millimetre"),
    ("millimeter", "millimetre"),
    ("yd", "yard"),
    ("g", "gram"),
    ("gm", "gram"),
    ("kg", "kilogram"),
    ("mcg", "microgram"),
    ("mg", "milligram"),
    ("oz", "ounce"),
    ("lb", "pound"),
    ("lbs", "pound"),
    ("kv", "kilovolt"),
    ("mv", "millivolt"),
    ("v", "volt"),
    ("kw", "kilowatt"),
    ("w", "watt"),
    ("cl", "centilitre"),
    ("dl", "decilitre"),
    ("fl oz", "fluid ounce"),
    ("gal", "gallon"),
    ("l", "litre"),
    ("liter", "litre"),
    ("ml", "millilitre"),
    ("milliliter", "millilitre"),
];

/// Resolve an alias to its canonical name; unknown units pass through.
pub fn canonical(unit: &str) -> &str {
    ALIASES
        .iter()
        .find(|(alias, _)| *alias == unit)
        .map_or(unit, |(_, name)| *name)
}

pub fn is_allowed(unit: &str) -> bool {
    ALLOWED_UNITS.contains(&unit)
}
