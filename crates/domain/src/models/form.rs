//! Application form schemas and the generic submission validator.
//!
//! Each [`ApplicationKind`] owns one ordered field list. The public site
//! renders forms from [`schema_for`] and submissions are checked against the
//! same list by [`FormSchema::validate_submission`].

use serde::Serialize;
use serde_json::{Map, Value};
use shared::validation::{is_valid_email, normalize_email, validate_http_url, validate_phone};
use std::fmt;

use super::application::ApplicationKind;

/// Input type of a form field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum FieldType {
    Text,
    Email,
    Tel,
    Textarea,
    Select,
    Url,
}

/// One field of a form.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FormField {
    pub name: &'static str,
    pub label: &'static str,
    #[serde(rename = "type")]
    pub field_type: FieldType,
    pub required: bool,
    #[serde(skip_serializing_if = "no_options")]
    pub options: &'static [&'static str],
    pub max_length: usize,
}

fn no_options(options: &&'static [&'static str]) -> bool {
    options.is_empty()
}

/// The full definition of one application form.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FormSchema {
    pub kind: ApplicationKind,
    pub title: &'static str,
    pub fields: &'static [FormField],
}

const fn field(
    name: &'static str,
    label: &'static str,
    field_type: FieldType,
    required: bool,
) -> FormField {
    let max_length = match field_type {
        FieldType::Textarea => 3000,
        FieldType::Url => 500,
        _ => 200,
    };
    FormField {
        name,
        label,
        field_type,
        required,
        options: &[],
        max_length,
    }
}

const fn select(
    name: &'static str,
    label: &'static str,
    required: bool,
    options: &'static [&'static str],
) -> FormField {
    FormField {
        name,
        label,
        field_type: FieldType::Select,
        required,
        options,
        max_length: 200,
    }
}

static VOLUNTEER_FIELDS: &[FormField] = &[
    field("fullName", "Full name", FieldType::Text, true),
    field("email", "Email", FieldType::Email, true),
    field("phone", "Phone number", FieldType::Tel, true),
    field("university", "University or workplace", FieldType::Text, false),
    select(
        "team",
        "Preferred team",
        true,
        &["Logistics", "Communication", "Hospitality", "Technical", "Partnerships"],
    ),
    select(
        "availability",
        "Availability on event day",
        true,
        &["Full day", "Morning", "Afternoon"],
    ),
    field("experience", "Previous volunteering experience", FieldType::Textarea, false),
    field("motivation", "Why do you want to volunteer?", FieldType::Textarea, true),
    field("linkedinUrl", "LinkedIn profile", FieldType::Url, false),
];

static PRESS_FIELDS: &[FormField] = &[
    field("fullName", "Full name", FieldType::Text, true),
    field("email", "Email", FieldType::Email, true),
    field("phone", "Phone number", FieldType::Tel, false),
    field("mediaOutlet", "Media outlet", FieldType::Text, true),
    select(
        "mediaType",
        "Media type",
        true,
        &["Print", "Online", "Radio", "Television", "Podcast"],
    ),
    field("role", "Role", FieldType::Text, true),
    field("portfolioUrl", "Portfolio or outlet website", FieldType::Url, false),
    field("coveragePlan", "Planned coverage", FieldType::Textarea, true),
];

static PERFORMER_FIELDS: &[FormField] = &[
    field("fullName", "Full name or stage name", FieldType::Text, true),
    field("email", "Email", FieldType::Email, true),
    field("phone", "Phone number", FieldType::Tel, true),
    select(
        "performanceType",
        "Performance type",
        true,
        &["Music", "Dance", "Spoken word", "Theatre", "Other"],
    ),
    select(
        "groupSize",
        "Group size",
        true,
        &["Solo", "Duo", "Group (3-5)", "Ensemble (6+)"],
    ),
    field("description", "Describe your performance", FieldType::Textarea, true),
    field("demoUrl", "Link to a demo video", FieldType::Url, true),
];

static VOLUNTEER_SCHEMA: FormSchema = FormSchema {
    kind: ApplicationKind::Volunteer,
    title: "Volunteer application",
    fields: VOLUNTEER_FIELDS,
};

static PRESS_SCHEMA: FormSchema = FormSchema {
    kind: ApplicationKind::Press,
    title: "Press accreditation",
    fields: PRESS_FIELDS,
};

static PERFORMER_SCHEMA: FormSchema = FormSchema {
    kind: ApplicationKind::Performer,
    title: "Performer application",
    fields: PERFORMER_FIELDS,
};

/// Returns the form schema for an application kind.
pub fn schema_for(kind: ApplicationKind) -> &'static FormSchema {
    match kind {
        ApplicationKind::Volunteer => &VOLUNTEER_SCHEMA,
        ApplicationKind::Press => &PRESS_SCHEMA,
        ApplicationKind::Performer => &PERFORMER_SCHEMA,
    }
}

/// A problem with one submitted field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldError {
    pub field: String,
    pub message: String,
}

/// All field problems found in a submission.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FormErrors(pub Vec<FieldError>);

impl fmt::Display for FormErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let parts: Vec<String> = self
            .0
            .iter()
            .map(|e| format!("{}: {}", e.field, e.message))
            .collect();
        write!(f, "{}", parts.join(", "))
    }
}

impl std::error::Error for FormErrors {}

/// A submission that passed schema validation.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidatedSubmission {
    pub full_name: String,
    pub email: String,
    /// Trimmed answers keyed by field name. Blank optional fields are omitted.
    pub answers: Map<String, Value>,
}

impl FormField {
    fn check(&self, value: &str) -> Option<String> {
        if value.chars().count() > self.max_length {
            return Some(format!("must be at most {} characters", self.max_length));
        }
        match self.field_type {
            FieldType::Email if !is_valid_email(value) => Some("invalid email".to_string()),
            FieldType::Tel if validate_phone(value).is_err() => {
                Some("invalid phone number".to_string())
            }
            FieldType::Url if validate_http_url(value).is_err() => {
                Some("must be an http(s) URL".to_string())
            }
            FieldType::Select if !self.options.contains(&value) => Some(format!(
                "must be one of: {}",
                self.options.join(", ")
            )),
            _ => None,
        }
    }
}

impl FormSchema {
    pub fn field(&self, name: &str) -> Option<&FormField> {
        self.fields.iter().find(|f| f.name == name)
    }

    /// Validates a submitted JSON object against this schema.
    ///
    /// Every value must be a string. Required fields must be non-blank,
    /// typed fields well formed, and field names known to the schema.
    pub fn validate_submission(
        &self,
        submission: &Map<String, Value>,
    ) -> Result<ValidatedSubmission, FormErrors> {
        let mut errors = Vec::new();
        let mut answers = Map::new();

        for name in submission.keys() {
            if self.field(name).is_none() {
                errors.push(FieldError {
                    field: name.clone(),
                    message: "unknown field".to_string(),
                });
            }
        }

        for field in self.fields {
            let value = match submission.get(field.name) {
                None | Some(Value::Null) => "",
                Some(Value::String(s)) => s.trim(),
                Some(_) => {
                    errors.push(FieldError {
                        field: field.name.to_string(),
                        message: "must be a string".to_string(),
                    });
                    continue;
                }
            };

            if value.is_empty() {
                if field.required {
                    errors.push(FieldError {
                        field: field.name.to_string(),
                        message: "is required".to_string(),
                    });
                }
                continue;
            }

            if let Some(message) = field.check(value) {
                errors.push(FieldError {
                    field: field.name.to_string(),
                    message,
                });
                continue;
            }

            let stored = if field.field_type == FieldType::Email {
                normalize_email(value)
            } else {
                value.to_string()
            };
            answers.insert(field.name.to_string(), Value::String(stored));
        }

        if !errors.is_empty() {
            return Err(FormErrors(errors));
        }

        let text = |key: &str| {
            answers
                .get(key)
                .and_then(Value::as_str)
                .unwrap_or_default()
                .to_string()
        };

        Ok(ValidatedSubmission {
            full_name: text("fullName"),
            email: text("email"),
            answers,
        })
    }
}
