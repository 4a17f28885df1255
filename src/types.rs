/// Shared domain types used across handlers and queries
///
/// All three enums are stored as plain text columns, so each carries an
/// `as_str`/`parse` pair used when binding query parameters and when
/// validating caller input.
use serde::{Deserialize, Serialize};

/// Languages a form or question can be translated into
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    En,
    Es,
}

impl Language {
    pub fn as_str(&self) -> &'static str {
        match self {
            Language::En => "en",
            Language::Es => "es",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "en" => Some(Language::En),
            "es" => Some(Language::Es),
            _ => None,
        }
    }
}

/// Form categories partitioning forms per user
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FormCategory {
    Custom,
    Flash,
    Touchup,
}

impl FormCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            FormCategory::Custom => "custom",
            FormCategory::Flash => "flash",
            FormCategory::Touchup => "touchup",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "custom" => Some(FormCategory::Custom),
            "flash" => Some(FormCategory::Flash),
            "touchup" => Some(FormCategory::Touchup),
            _ => None,
        }
    }
}

/// Question input widget types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum QuestionType {
    Text,
    LongText,
    MultipleChoice,
    Checkbox,
    Dropdown,
    Number,
    Date,
    File,
    Radio,
    Description,
    Email,
    Phone,
    RadioImage,
}

impl QuestionType {
    pub fn as_str(&self) -> &'static str {
        match self {
            QuestionType::Text => "text",
            QuestionType::LongText => "long_text",
            QuestionType::MultipleChoice => "multiple_choice",
            QuestionType::Checkbox => "checkbox",
            QuestionType::Dropdown => "dropdown",
            QuestionType::Number => "number",
            QuestionType::Date => "date",
            QuestionType::File => "file",
            QuestionType::Radio => "radio",
            QuestionType::Description => "description",
            QuestionType::Email => "email",
            QuestionType::Phone => "phone",
            QuestionType::RadioImage => "radio_image",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "text" => Some(QuestionType::Text),
            "long_text" => Some(QuestionType::LongText),
            "multiple_choice" => Some(QuestionType::MultipleChoice),
            "checkbox" => Some(QuestionType::Checkbox),
            "dropdown" => Some(QuestionType::Dropdown),
            "number" => Some(QuestionType::Number),
            "date" => Some(QuestionType::Date),
            "file" => Some(QuestionType::File),
            "radio" => Some(QuestionType::Radio),
            "description" => Some(QuestionType::Description),
            "email" => Some(QuestionType::Email),
            "phone" => Some(QuestionType::Phone),
            "radio_image" => Some(QuestionType::RadioImage),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn language_round_trips() {
        assert_eq!(Language::parse("en"), Some(Language::En));
        assert_eq!(Language::parse("es"), Some(Language::Es));
        assert_eq!(Language::parse("fr"), None);
        assert_eq!(Language::Es.as_str(), "es");
    }

    #[test]
    fn category_rejects_unknown() {
        assert_eq!(FormCategory::parse("flash"), Some(FormCategory::Flash));
        assert_eq!(FormCategory::parse("standard"), None);
    }

    #[test]
    fn question_type_codes_match_schema_values() {
        for code in [
            "text",
            "long_text",
            "multiple_choice",
            "checkbox",
            "dropdown",
            "number",
            "date",
            "file",
            "radio",
            "description",
            "email",
            "phone",
            "radio_image",
        ] {
            let qt = QuestionType::parse(code).expect(code);
            assert_eq!(qt.as_str(), code);
        }
    }
}
