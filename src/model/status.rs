use chrono::{DateTime, Local};

/// Host probed by the "Ping Server" button.
pub const TARGET_HOST: &str = "qromarckserver.thonymarckdev.online";
pub const TARGET_URL: &str = "https://qromarckserver.thonymarckdev.online";

pub const LAST_UPDATED_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Fact {
    pub label: String,
    pub value: String,
}

impl Fact {
    fn new(label: &str, value: &str) -> Self {
        Self {
            label: label.to_string(),
            value: value.to_string(),
        }
    }
}

/// Static description of the server shown on the status board.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerFacts {
    pub title: String,
    pub facts: Vec<Fact>,
}

impl Default for ServerFacts {
    fn default() -> Self {
        Self {
            title: "QROMARCK SERVER".to_string(),
            facts: vec![
                Fact::new("System", "Ubuntu 24.02 LTS"),
                Fact::new("State", "Operational"),
                Fact::new("Cores", "6 Cores"),
                Fact::new("RAM", "8 GB"),
            ],
        }
    }
}

/// Local time string for the "last updated" line.
pub fn format_last_updated(at: DateTime<Local>) -> String {
    at.format(LAST_UPDATED_FORMAT).to_string()
}

/// Same as [`format_last_updated`] for the current moment.
pub fn last_updated_now() -> String {
    format_last_updated(Local::now())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{NaiveDateTime, TimeDelta};

    #[test]
    fn test_default_facts_are_fixed() {
        let facts = ServerFacts::default();
        let pairs: Vec<(&str, &str)> = facts
            .facts
            .iter()
            .map(|f| (f.label.as_str(), f.value.as_str()))
            .collect();
        assert_eq!(
            pairs,
            vec![
                ("System", "Ubuntu 24.02 LTS"),
                ("State", "Operational"),
                ("Cores", "6 Cores"),
                ("RAM", "8 GB"),
            ]
        );
        assert_eq!(ServerFacts::default(), facts);
    }

    #[test]
    fn test_last_updated_differs_between_moments() {
        let first = Local::now();
        let second = first + TimeDelta::seconds(2);

        let a = format_last_updated(first);
        let b = format_last_updated(second);
        assert_ne!(a, b);

        for s in [&a, &b] {
            assert!(
                NaiveDateTime::parse_from_str(s, LAST_UPDATED_FORMAT).is_ok(),
                "{s} is not a valid local time"
            );
        }
    }

    #[test]
    fn test_last_updated_now_parses() {
        let s = last_updated_now();
        assert!(NaiveDateTime::parse_from_str(&s, LAST_UPDATED_FORMAT).is_ok());
    }

    #[test]
    fn test_target_url_points_at_target_host() {
        assert!(TARGET_URL.starts_with("https://"));
        assert!(TARGET_URL.ends_with(TARGET_HOST));
    }
}
