//! LinkedIn profile -> `about.md`
//!
//! Unlike the other normalizers this one produces a Markdown page: fixed
//! front matter, the headline, a cleaned summary and the most recent
//! positions as a bullet list.

use minijinja::{Environment, context};
use serde::Serialize;
use serde_json::Value;
use serde_yaml::Mapping;

use crate::error::Result;
use crate::frontmatter;
use crate::rules::{FieldRule, Object};
use crate::text::clean_markdown;

/// Tracker prefix of the LinkedIn export
pub const SOURCE: &str = "linkedin";

/// How many positions the page lists
pub const MAX_POSITIONS: usize = 6;

const HEADLINE: FieldRule = FieldRule::new("headline", &["headline", "title"]);
const SUMMARY: FieldRule = FieldRule::new("summary", &["summary", "about", "description"]);
const POSITIONS: FieldRule = FieldRule::new("positions", &["positions", "experience"]);

const ROLE: FieldRule = FieldRule::new("title", &["title", "position", "role"]);
const COMPANY: FieldRule = FieldRule::new("company", &["company", "organization"]);
const START: FieldRule = FieldRule::new("start", &["start_date", "from"]);
const END: FieldRule = FieldRule::new("end", &["end_date", "to"]);
const DESCRIPTION: FieldRule = FieldRule::new("description", &["description"]);

const UNTITLED_ROLE: &str = "Rol sin título";
const ONGOING: &str = "Actualidad";

const TEMPLATE_NAME: &str = "about.md";
const TEMPLATE: &str = r#"# Sobre mí

{% if headline %}
**{{ headline }}**

{% endif %}
{% if summary %}
{{ summary }}

{% endif %}
{% if positions %}
## Experiencia reciente

{% for p in positions %}
- **{{ p.header }}**
{% if p.description %}
  {{ p.description }}
{% endif %}
{% endfor %}
{% endif %}
"#;

/// One experience entry, ready for the template
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Position {
    /// `Role - en Company (start - end)`
    pub header: String,
    /// Cleaned description, possibly empty
    pub description: String,
}

impl Position {
    fn from_object(obj: &Object) -> Self {
        let role = ROLE
            .display(obj)
            .unwrap_or_else(|| UNTITLED_ROLE.to_string());

        let mut header = role;
        if let Some(company) = COMPANY.display(obj) {
            header.push_str(&format!(" - en {company}"));
        }
        if let Some(start) = START.display(obj) {
            let end = END.display(obj).unwrap_or_else(|| ONGOING.to_string());
            header.push_str(&format!(" ({start} - {end})"));
        }

        let description = DESCRIPTION
            .display(obj)
            .map(|d| clean_markdown(&d))
            .unwrap_or_default();

        Self {
            header,
            description,
        }
    }
}

/// The parts of a profile shown on the page
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Profile {
    /// One-line professional headline
    pub headline: String,
    /// Cleaned summary paragraph(s)
    pub summary: String,
    /// At most [`MAX_POSITIONS`] entries
    pub positions: Vec<Position>,
}

impl Profile {
    /// Extract a profile; `None` when the export is not a JSON object
    pub fn from_export(export: &Value) -> Option<Self> {
        let obj = export.as_object()?;

        let positions = POSITIONS
            .value(obj)
            .and_then(Value::as_array)
            .map(|list| {
                list.iter()
                    .take(MAX_POSITIONS)
                    .filter_map(Value::as_object)
                    .map(Position::from_object)
                    .collect()
            })
            .unwrap_or_default();

        Some(Self {
            headline: HEADLINE.display(obj).unwrap_or_default(),
            summary: SUMMARY
                .display(obj)
                .map(|s| clean_markdown(&s))
                .unwrap_or_default(),
            positions,
        })
    }

    /// Render the complete `about.md`, front matter included
    pub fn render(&self) -> Result<String> {
        let mut env = Environment::new();
        env.set_trim_blocks(true);
        env.set_lstrip_blocks(true);
        env.add_template(TEMPLATE_NAME, TEMPLATE)?;

        let body = env.get_template(TEMPLATE_NAME)?.render(context! {
            headline => &self.headline,
            summary => &self.summary,
            positions => &self.positions,
        })?;

        Ok(format!("{}{}\n", frontmatter::build(&page_header())?, body.trim_end()))
    }
}

fn page_header() -> Mapping {
    let mut header = Mapping::new();
    header.insert("layout".into(), "page".into());
    header.insert("title".into(), "Sobre mí".into());
    header.insert("permalink".into(), "/about/".into());
    header
}
