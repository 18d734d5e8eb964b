use once_cell::sync::Lazy;
use regex::Regex;
use std::fmt;

/// Every input the entry forms know about.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Field {
    Name,
    Ndis,
    State,
    Status,
    Email,
    ServiceType,
}

impl Field {
    pub fn label(self) -> &'static str {
        match self {
            Field::Name => "Name",
            Field::Ndis => "NDIS number",
            Field::State => "State",
            Field::Status => "Status",
            Field::Email => "Email",
            Field::ServiceType => "Service type",
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// How one field is scrubbed while typing and checked on submit.
///
/// `allowed` filters characters on every keystroke; `check` runs only on
/// non-empty values, emptiness is the business of `required`.
#[derive(Debug, Clone, Copy)]
pub struct FieldRule {
    pub field: Field,
    pub required: bool,
    pub allowed: Option<fn(char) -> bool>,
    pub check: Option<fn(&str) -> bool>,
    pub initial: &'static str,
}

impl FieldRule {
    pub fn scrub(&self, raw: &str) -> String {
        match self.allowed {
            Some(allowed) => raw.chars().filter(|c| allowed(*c)).collect(),
            None => raw.to_string(),
        }
    }
}

#[derive(Debug)]
pub struct FormSchema {
    pub rules: &'static [FieldRule],
}

impl FormSchema {
    pub fn rule(&self, field: Field) -> Option<&FieldRule> {
        self.rules.iter().find(|r| r.field == field)
    }

    pub fn fields(&self) -> impl Iterator<Item = Field> + '_ {
        self.rules.iter().map(|r| r.field)
    }
}

pub const DEFAULT_SERVICE_TYPE: &str = "Disability Care";

/// Add-contact / add-lead form.
pub static CONTACT_FORM: FormSchema = FormSchema {
    rules: &[
        FieldRule {
            field: Field::Name,
            required: true,
            allowed: Some(is_name_char),
            check: Some(is_name),
            initial: "",
        },
        FieldRule {
            field: Field::Ndis,
            required: true,
            allowed: Some(is_digit),
            check: Some(is_ndis),
            initial: "",
        },
        FieldRule {
            field: Field::State,
            required: true,
            allowed: Some(is_letter_or_space),
            check: Some(is_letters),
            initial: "",
        },
        FieldRule {
            field: Field::Status,
            required: true,
            allowed: Some(is_letter_or_space),
            check: Some(is_contact_status),
            initial: "",
        },
        FieldRule {
            field: Field::Email,
            required: false,
            allowed: None,
            check: Some(is_email),
            initial: "",
        },
        FieldRule {
            field: Field::ServiceType,
            required: false,
            allowed: None,
            check: None,
            initial: DEFAULT_SERVICE_TYPE,
        },
    ],
};

/// Participants form. Status is free text here.
pub static PARTICIPANT_FORM: FormSchema = FormSchema {
    rules: &[
        FieldRule {
            field: Field::Name,
            required: true,
            allowed: Some(is_name_char),
            check: Some(is_name),
            initial: "",
        },
        FieldRule {
            field: Field::Ndis,
            required: true,
            allowed: Some(is_digit),
            check: Some(is_ndis),
            initial: "",
        },
        FieldRule {
            field: Field::State,
            required: true,
            allowed: Some(is_letter_or_space),
            check: Some(is_letters),
            initial: "",
        },
        FieldRule {
            field: Field::Status,
            required: true,
            allowed: Some(is_letter_or_space),
            check: Some(is_letters),
            initial: "",
        },
    ],
};

fn is_name_char(c: char) -> bool {
    c.is_ascii_alphabetic() || c == '.' || c == ' '
}

fn is_letter_or_space(c: char) -> bool {
    c.is_ascii_alphabetic() || c == ' '
}

fn is_digit(c: char) -> bool {
    c.is_ascii_digit()
}

static NAME_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[A-Za-z. ]+$").expect("name regex"));
static NDIS_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[0-9]{9}$").expect("ndis regex"));
static LETTERS_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[A-Za-z ]+$").expect("letters regex"));
static CONTACT_STATUS_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)^(active|inactive)$").expect("status regex"));
static EMAIL_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"^[a-zA-Z0-9!#$%&'*+/=?^_`{|}~-]+(?:\.[a-zA-Z0-9!#$%&'*+/=?^_`{|}~-]+)*@[a-zA-Z0-9](?:[a-zA-Z0-9-]{0,61}[a-zA-Z0-9])?(?:\.[a-zA-Z0-9](?:[a-zA-Z0-9-]{0,61}[a-zA-Z0-9])?)*$",
    )
    .expect("email regex")
});

const EMAIL_MAX_LEN: usize = 254;
const EMAIL_LOCAL_MAX_LEN: usize = 64;

fn is_name(v: &str) -> bool {
    NAME_RE.is_match(v)
}

fn is_ndis(v: &str) -> bool {
    NDIS_RE.is_match(v)
}

fn is_letters(v: &str) -> bool {
    LETTERS_RE.is_match(v)
}

fn is_contact_status(v: &str) -> bool {
    CONTACT_STATUS_RE.is_match(v)
}

fn is_email(v: &str) -> bool {
    let local_len = v.split('@').next().map_or(0, str::len);
    v.len() <= EMAIL_MAX_LEN && local_len <= EMAIL_LOCAL_MAX_LEN && EMAIL_RE.is_match(v)
}
