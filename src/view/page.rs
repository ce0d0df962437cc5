use askama::Template;

use crate::error::AppResult;
use crate::models::FormInput;

use super::{fragment_to_markup, Node, SafeMarkup};

const SKIN_TYPES: &[&str] = &["oily", "dry", "combination", "normal", "sensitive"];
const HAIR_TYPES: &[&str] = &["oily", "dry", "normal", "curly", "straight", "wavy"];
const CATEGORIES: &[&str] = &["skin_care", "hair_care", "makeup", "supplements", "wellness"];
const GENDERS: &[&str] = &["female", "male", "unisex"];
const LANGUAGES: &[(&str, &str)] = &[("en", "English"), ("ar", "العربية"), ("fr", "Français")];
const MAX_TOP_K: u32 = 10;

struct Choice {
    value: String,
    label: String,
    selected: bool,
}

impl Choice {
    fn new(value: &str, label: &str, selected: bool) -> Self {
        Self {
            value: value.to_string(),
            label: label.to_string(),
            selected,
        }
    }
}

/// One form control: a dropdown when it has choices, a text input otherwise
struct Field {
    name: &'static str,
    label: &'static str,
    placeholder: &'static str,
    value: String,
    choices: Vec<Choice>,
}

impl Field {
    /// A dropdown whose first entry is the "not specified" choice
    fn optional_select(name: &'static str, label: &'static str, values: &[&str], current: Option<&str>) -> Self {
        let choices = std::iter::once(Choice::new("", "Any", current.is_none()))
            .chain(values.iter().map(|value| Choice::new(value, value, current == Some(*value))))
            .collect();
        Self {
            name,
            label,
            placeholder: "",
            value: String::new(),
            choices,
        }
    }

    fn text(name: &'static str, label: &'static str, placeholder: &'static str, current: Option<&str>) -> Self {
        Self {
            name,
            label,
            placeholder,
            value: current.unwrap_or_default().to_string(),
            choices: Vec::new(),
        }
    }

    fn select(name: &'static str, label: &'static str, choices: Vec<Choice>) -> Self {
        Self {
            name,
            label,
            placeholder: "",
            value: String::new(),
            choices,
        }
    }
}

#[derive(Template)]
#[template(
    source = r#"<!DOCTYPE html>
<html lang="{{ lang }}">
  <head>
    <meta charset="utf-8">
    <meta name="viewport" content="width=device-width, initial-scale=1">
    <title>Beauty &amp; Health Recommendations</title>
  </head>
  <body>
    <h1>Beauty &amp; Health Recommendations</h1>
    <form id="beauty-form" method="post" action="/submit">
      {% for field in fields %}
      <div class="field">
        <label for="{{ field.name }}">{{ field.label }}</label>
        {% if field.choices.is_empty() %}
        <input type="text" id="{{ field.name }}" name="{{ field.name }}" placeholder="{{ field.placeholder }}" value="{{ field.value }}">
        {% else %}
        <select id="{{ field.name }}" name="{{ field.name }}">
          {% for choice in field.choices %}
          <option value="{{ choice.value }}"{% if choice.selected %} selected="selected"{% endif %}>{{ choice.label }}</option>
          {% endfor %}
        </select>
        {% endif %}
      </div>
      {% endfor %}
      <button type="submit">Get recommendations</button>
    </form>
    <div id="recommendations">{{ results|safe }}</div>
  </body>
</html>"#,
    ext = "html"
)]
struct PageTemplate {
    lang: String,
    fields: Vec<Field>,
    results: SafeMarkup,
}

fn trimmed(field: &Option<String>) -> Option<&str> {
    field.as_deref().map(str::trim).filter(|value| !value.is_empty())
}

/// The form controls in page order, pre-filled with the last submitted values
fn form_fields(previous: &FormInput, default_top_k: u32, default_language: &str) -> Vec<Field> {
    let language = previous.language(default_language);
    let top_k = previous.top_k(default_top_k);

    vec![
        Field::optional_select("skin-type", "Skin type", SKIN_TYPES, trimmed(&previous.skin_type)),
        Field::optional_select("hair-type", "Hair type", HAIR_TYPES, trimmed(&previous.hair_type)),
        Field::optional_select("category", "Category", CATEGORIES, trimmed(&previous.category)),
        Field::text("problem", "Problem", "e.g. acne, dandruff", trimmed(&previous.problem)),
        Field::text("budget", "Budget", "e.g. 2500 or low", trimmed(&previous.budget)),
        Field::text("age", "Age", "e.g. 25 or 30-40", trimmed(&previous.age)),
        Field::optional_select("gender", "Gender", GENDERS, trimmed(&previous.gender)),
        Field::select(
            "language",
            "Language",
            LANGUAGES
                .iter()
                .map(|(code, name)| Choice::new(code, name, *code == language))
                .collect(),
        ),
        Field::select(
            "top-k",
            "Results",
            (1..=MAX_TOP_K)
                .map(|k| Choice::new(&k.to_string(), &k.to_string(), k == top_k))
                .collect(),
        ),
    ]
}

/// Full HTML document: the form plus the results container holding `results`
pub fn render_page(
    results: &[Node],
    previous: &FormInput,
    default_top_k: u32,
    default_language: &str,
) -> AppResult<String> {
    let template = PageTemplate {
        lang: previous.language(default_language),
        fields: form_fields(previous, default_top_k, default_language),
        results: fragment_to_markup(results),
    };
    Ok(template.render()?)
}
