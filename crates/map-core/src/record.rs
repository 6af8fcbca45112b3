use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
/// Canonical airport entry derived from one rendered map feature.
pub struct AirportRecord {
    /// Display name, e.g. `"Cairo Intl"`.
    pub name: String,
    /// Short code used as the dedup and filter key, e.g. `"CAI"`.
    pub code: String,
    /// Longitude in degrees.
    pub lon: f64,
    /// Latitude in degrees.
    pub lat: f64,
    /// Optional reference URL; `None` and `""` are treated alike.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reference: Option<String>,
}

impl AirportRecord {
    /// Label shown in popups and listing rows.
    pub fn label(&self) -> String {
        format!("{} ({})", self.name, self.code)
    }

    /// Reference URL if present and non-empty.
    pub fn reference_url(&self) -> Option<&str> {
        self.reference.as_deref().filter(|url| !url.is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(reference: Option<&str>) -> AirportRecord {
        AirportRecord {
            name: "Cairo Intl".into(),
            code: "CAI".into(),
            lon: 31.4,
            lat: 30.1,
            reference: reference.map(str::to_string),
        }
    }

    #[test]
    fn label_joins_name_and_code() {
        assert_eq!(record(None).label(), "Cairo Intl (CAI)");
    }

    #[test]
    fn empty_reference_is_absent() {
        assert_eq!(record(None).reference_url(), None);
        assert_eq!(record(Some("")).reference_url(), None);
        assert_eq!(
            record(Some("https://en.wikipedia.org/wiki/Cairo_International_Airport"))
                .reference_url(),
            Some("https://en.wikipedia.org/wiki/Cairo_International_Airport")
        );
    }
}
