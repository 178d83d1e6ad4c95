//! Sentiment labels returned by the classifier.

use serde::{Serialize, Serializer};

/// Classifier verdict for one article.
///
/// The five ordered labels carry a score in `[-2, 2]`. `Unknown` holds any
/// other answer verbatim; `Unavailable` means the classifier call failed or
/// answered with nothing. Neither of the last two carries a score.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Sentiment {
    VeryPositive,
    Positive,
    Neutral,
    Negative,
    VeryNegative,
    Unknown(String),
    Unavailable,
}

/// Badge color shown next to an article.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum BadgeColor {
    Green,
    Red,
    Orange,
}

impl BadgeColor {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            BadgeColor::Green => "green",
            BadgeColor::Red => "red",
            BadgeColor::Orange => "orange",
        }
    }
}

impl Sentiment {
    /// Parse a raw classifier answer.
    ///
    /// Matching ignores ASCII case, surrounding quotes, a trailing period and
    /// repeated inner whitespace. Blank input is [`Sentiment::Unavailable`].
    #[must_use]
    pub fn parse(raw: &str) -> Self {
        let trimmed = raw
            .trim()
            .trim_matches(|c: char| c == '"' || c == '\'' || c == '*')
            .trim_end_matches('.')
            .trim();
        if trimmed.is_empty() {
            return Sentiment::Unavailable;
        }

        let key = trimmed
            .split_whitespace()
            .collect::<Vec<_>>()
            .join(" ")
            .to_ascii_lowercase();
        match key.as_str() {
            "very positive" => Sentiment::VeryPositive,
            "positive" => Sentiment::Positive,
            "neutral" => Sentiment::Neutral,
            "negative" => Sentiment::Negative,
            "very negative" => Sentiment::VeryNegative,
            _ => Sentiment::Unknown(raw.trim().to_string()),
        }
    }

    /// Integer contribution to the mood sum, `None` for non-scoring verdicts.
    #[must_use]
    pub fn score(&self) -> Option<i8> {
        match self {
            Sentiment::VeryPositive => Some(2),
            Sentiment::Positive => Some(1),
            Sentiment::Neutral => Some(0),
            Sentiment::Negative => Some(-1),
            Sentiment::VeryNegative => Some(-2),
            Sentiment::Unknown(_) | Sentiment::Unavailable => None,
        }
    }

    #[must_use]
    pub fn is_recognized(&self) -> bool {
        self.score().is_some()
    }

    /// Text sent to the insights endpoint and shown when a verdict is listed.
    #[must_use]
    pub fn label(&self) -> &str {
        match self {
            Sentiment::VeryPositive => "Very Positive",
            Sentiment::Positive => "Positive",
            Sentiment::Neutral => "Neutral",
            Sentiment::Negative => "Negative",
            Sentiment::VeryNegative => "Very Negative",
            Sentiment::Unknown(raw) => raw,
            Sentiment::Unavailable => "No sentiment available",
        }
    }

    /// Badge color: green above zero, red below, orange for neutral and
    /// anything unscored.
    #[must_use]
    pub fn badge_color(&self) -> BadgeColor {
        match self.score() {
            Some(s) if s > 0 => BadgeColor::Green,
            Some(s) if s < 0 => BadgeColor::Red,
            _ => BadgeColor::Orange,
        }
    }

    /// Badge caption. Unscored verdicts read `Unknown Sentiment`.
    #[must_use]
    pub fn badge_text(&self) -> &str {
        if self.is_recognized() {
            self.label()
        } else {
            "Unknown Sentiment"
        }
    }
}

impl std::fmt::Display for Sentiment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

impl Serialize for Sentiment {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.label())
    }
}
