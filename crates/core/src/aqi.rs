use std::fmt;

/// Advisory shown when a category label is not one of the six known ones.
pub const NO_ADVISORY: &str = "No advisory available";

/// Display color for labels outside the known categories.
pub const UNKNOWN_COLOR: Rgb = Rgb(0x77, 0x77, 0x77);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Rgb(pub u8, pub u8, pub u8);

impl Rgb {
    pub const fn red(self) -> u8 {
        self.0
    }

    pub const fn green(self) -> u8 {
        self.1
    }

    pub const fn blue(self) -> u8 {
        self.2
    }
}

impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02x}{:02x}{:02x}", self.0, self.1, self.2)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AqiCategory {
    Good,
    Moderate,
    UnhealthyForSensitiveGroups,
    Unhealthy,
    VeryUnhealthy,
    Hazardous,
}

impl AqiCategory {
    /// Ordered from least to most severe.
    pub const ALL: [Self; 6] = [
        Self::Good,
        Self::Moderate,
        Self::UnhealthyForSensitiveGroups,
        Self::Unhealthy,
        Self::VeryUnhealthy,
        Self::Hazardous,
    ];

    /// Label as it appears on the wire.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Good => "Good",
            Self::Moderate => "Moderate",
            Self::UnhealthyForSensitiveGroups => "Unhealthy for Sensitive Groups",
            Self::Unhealthy => "Unhealthy",
            Self::VeryUnhealthy => "Very Unhealthy",
            Self::Hazardous => "Hazardous",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value.trim() {
            "Good" => Some(Self::Good),
            "Moderate" => Some(Self::Moderate),
            "Unhealthy for Sensitive Groups" => Some(Self::UnhealthyForSensitiveGroups),
            "Unhealthy" => Some(Self::Unhealthy),
            "Very Unhealthy" => Some(Self::VeryUnhealthy),
            "Hazardous" => Some(Self::Hazardous),
            _ => None,
        }
    }

    pub const fn color(self) -> Rgb {
        match self {
            Self::Good => Rgb(0x23, 0xbf, 0x57),
            Self::Moderate => Rgb(0xf1, 0xc4, 0x0f),
            Self::UnhealthyForSensitiveGroups => Rgb(0xf3, 0x9c, 0x12),
            Self::Unhealthy => Rgb(0xe6, 0x7e, 0x22),
            Self::VeryUnhealthy => Rgb(0xd3, 0x54, 0x00),
            Self::Hazardous => Rgb(0xc0, 0x39, 0x2b),
        }
    }

    pub const fn advisory(self) -> &'static str {
        match self {
            Self::Good => "Air quality is satisfactory. Enjoy outdoor activities!",
            Self::Moderate => {
                "Air quality is acceptable. Sensitive individuals should limit prolonged outdoor activity."
            }
            Self::UnhealthyForSensitiveGroups => {
                "Sensitive groups may experience health effects. Reduce prolonged outdoor exertion."
            }
            Self::Unhealthy => {
                "Everyone may begin to experience health effects. Limit outdoor activities."
            }
            Self::VeryUnhealthy => "Health alert. Everyone should avoid outdoor activities.",
            Self::Hazardous => "Health warning. Stay indoors and keep activity levels low.",
        }
    }

    /// Short label used by the legend.
    pub const fn legend_label(self) -> &'static str {
        match self {
            Self::UnhealthyForSensitiveGroups => "Unhealthy-SG",
            other => other.as_str(),
        }
    }

    /// EPA PM2.5 breakpoints, matching what the prediction service reports.
    pub fn from_pm25(pm25: f64) -> Self {
        if pm25 <= 12.0 {
            Self::Good
        } else if pm25 <= 35.4 {
            Self::Moderate
        } else if pm25 <= 55.4 {
            Self::UnhealthyForSensitiveGroups
        } else if pm25 <= 150.4 {
            Self::Unhealthy
        } else if pm25 <= 250.4 {
            Self::VeryUnhealthy
        } else {
            Self::Hazardous
        }
    }
}

impl fmt::Display for AqiCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

pub fn aqi_color(label: &str) -> Rgb {
    AqiCategory::parse(label).map_or(UNKNOWN_COLOR, AqiCategory::color)
}

pub fn health_advisory(label: &str) -> &'static str {
    AqiCategory::parse(label).map_or(NO_ADVISORY, AqiCategory::advisory)
}

/// Card title for a forecast day number. Day 1 is tomorrow.
pub fn day_name(day: i64) -> String {
    if day == 1 {
        "Tomorrow".to_string()
    } else {
        format!("Day {day}")
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LegendEntry {
    pub label: &'static str,
    pub color: Rgb,
}

pub fn legend() -> [LegendEntry; 6] {
    AqiCategory::ALL.map(|category| LegendEntry {
        label: category.legend_label(),
        color: category.color(),
    })
}
