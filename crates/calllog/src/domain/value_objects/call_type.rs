//! CallType - Classification of simulated API calls

use serde::{Deserialize, Serialize};

/// Call type classification
///
/// The store keeps the label as a plain string; this enum covers the
/// labels the API itself produces.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum CallType {
    Normal,
    Error,
    Slow,
    Fast,
    Random,
    Stats,
}

impl CallType {
    pub const ALL: [CallType; 6] = [
        CallType::Normal,
        CallType::Error,
        CallType::Slow,
        CallType::Fast,
        CallType::Random,
        CallType::Stats,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            CallType::Normal => "NORMAL",
            CallType::Error => "ERROR",
            CallType::Slow => "SLOW",
            CallType::Fast => "FAST",
            CallType::Random => "RANDOM",
            CallType::Stats => "STATS",
        }
    }

    /// Path of the endpoint that produces this call type
    pub fn endpoint(&self) -> &'static str {
        match self {
            CallType::Normal => "/api/normal",
            CallType::Error => "/api/error",
            CallType::Slow => "/api/slow",
            CallType::Fast => "/api/fast",
            CallType::Random => "/api/random",
            CallType::Stats => "/api/stats",
        }
    }

    /// Human-facing label used in response messages ("Normal", "Slow", ...)
    pub fn label(&self) -> &'static str {
        match self {
            CallType::Normal => "Normal",
            CallType::Error => "Error",
            CallType::Slow => "Slow",
            CallType::Fast => "Fast",
            CallType::Random => "Random",
            CallType::Stats => "Stats",
        }
    }
}

impl std::fmt::Display for CallType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for CallType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_uppercase().as_str() {
            "NORMAL" => Ok(CallType::Normal),
            "ERROR" => Ok(CallType::Error),
            "SLOW" => Ok(CallType::Slow),
            "FAST" => Ok(CallType::Fast),
            "RANDOM" => Ok(CallType::Random),
            "STATS" => Ok(CallType::Stats),
            _ => Err(format!("Unknown call type: {}", s)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_round_trips_through_from_str() {
        for call_type in CallType::ALL {
            let parsed: CallType = call_type.to_string().parse().unwrap();
            assert_eq!(parsed, call_type);
        }
    }

    #[test]
    fn test_from_str_is_case_insensitive() {
        assert_eq!("stats".parse::<CallType>(), Ok(CallType::Stats));
        assert!("UNKNOWN".parse::<CallType>().is_err());
    }

    #[test]
    fn test_endpoint_paths() {
        assert_eq!(CallType::Normal.endpoint(), "/api/normal");
        assert_eq!(CallType::Stats.endpoint(), "/api/stats");
    }

    #[test]
    fn test_serde_uses_upper_case_labels() {
        let json = serde_json::to_string(&CallType::Random).unwrap();
        assert_eq!(json, "\"RANDOM\"");
    }
}
