//! View renderer.
//!
//! Rendering is a pure function from widget state to a fresh [`View`] tree,
//! so every render replaces the previous output wholesale. Record fields only
//! ever become [`Node::Text`], which is escaped when serialized to HTML.

use std::{fmt, time::Duration};

use crate::{
    input::category_label,
    model::{ExcuseRecord, WeatherRecord},
    state::UiState,
    status::StatusMessage,
};

const FADE_IN: Duration = Duration::from_millis(500);

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Node {
    Element { class: &'static str, children: Vec<Node> },
    Text(String),
}

impl Node {
    pub fn element(class: &'static str, children: Vec<Node>) -> Self {
        Node::Element { class, children }
    }

    /// Element holding a single literal text child.
    pub fn labeled(class: &'static str, text: impl Into<String>) -> Self {
        Node::Element {
            class,
            children: vec![Node::Text(text.into())],
        }
    }

    pub fn class(&self) -> Option<&'static str> {
        match self {
            Node::Element { class, .. } => Some(*class),
            Node::Text(_) => None,
        }
    }

    pub fn text_content(&self) -> String {
        match self {
            Node::Text(text) => text.clone(),
            Node::Element { children, .. } => children.iter().map(Node::text_content).collect(),
        }
    }

    fn find(&self, wanted: &str) -> Option<&Node> {
        match self {
            Node::Element { class, children } => {
                if class.split(' ').any(|c| c == wanted) {
                    return Some(self);
                }
                children.iter().find_map(|child| child.find(wanted))
            }
            Node::Text(_) => None,
        }
    }

    fn write_html(&self, out: &mut String) {
        match self {
            Node::Text(text) => escape_into(text, out),
            Node::Element { class, children } => {
                out.push_str("<div class=\"");
                escape_into(class, out);
                out.push_str("\">");
                for child in children {
                    child.write_html(out);
                }
                out.push_str("</div>");
            }
        }
    }

    fn write_plain(&self, out: &mut String) {
        match self {
            Node::Text(text) => out.push_str(text),
            Node::Element { children, .. } => {
                if children.iter().all(|c| matches!(c, Node::Text(_))) {
                    if !children.is_empty() {
                        out.push_str(&self.text_content());
                        out.push('\n');
                    }
                    return;
                }
                for child in children {
                    child.write_plain(out);
                }
            }
        }
    }
}

/// A visual transition attached to a view. Carries no data.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transition {
    FadeIn(Duration),
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct View {
    pub nodes: Vec<Node>,
    pub transition: Option<Transition>,
}

impl View {
    pub fn empty() -> Self {
        Self::default()
    }

    fn of(nodes: Vec<Node>) -> Self {
        Self { nodes, transition: None }
    }

    fn fading(nodes: Vec<Node>) -> Self {
        Self {
            nodes,
            transition: Some(Transition::FadeIn(FADE_IN)),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// First element carrying `class` (one of its space separated classes).
    pub fn find(&self, class: &str) -> Option<&Node> {
        self.nodes.iter().find_map(|node| node.find(class))
    }

    pub fn text_of(&self, class: &str) -> Option<String> {
        self.find(class).map(Node::text_content)
    }

    pub fn to_html(&self) -> String {
        let mut out = String::new();
        for node in &self.nodes {
            node.write_html(&mut out);
        }
        out
    }
}

impl fmt::Display for View {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut out = String::new();
        for node in &self.nodes {
            node.write_plain(&mut out);
        }
        f.write_str(out.trim_end())
    }
}

fn escape_into(text: &str, out: &mut String) {
    for ch in text.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(ch),
        }
    }
}

pub fn weather_icon(condition_code: &str) -> &'static str {
    match condition_code {
        "Clear" => "☀️",
        "Clouds" => "☁️",
        "Rain" => "🌧️",
        "Drizzle" => "🌦️",
        "Thunderstorm" => "⛈️",
        "Snow" => "❄️",
        "Mist" | "Smoke" | "Haze" | "Dust" | "Fog" | "Sand" => "🌫️",
        "Ash" => "🌋",
        "Squall" => "💨",
        "Tornado" => "🌪️",
        _ => "🌤️",
    }
}

/// Halves round toward positive infinity; negative zero prints as `0`.
pub fn format_celsius(value: f64) -> String {
    format!("{}°C", (value + 0.5).floor() as i64)
}

pub fn render_weather(state: &UiState<WeatherRecord>) -> View {
    match state {
        UiState::Idle => View::empty(),
        UiState::Loading => View::of(vec![Node::labeled("loading", "Loading weather data...")]),
        UiState::Error(message) => View::of(vec![error_node(message)]),
        UiState::Displaying(record) => View::fading(weather_nodes(record)),
    }
}

fn weather_nodes(record: &WeatherRecord) -> Vec<Node> {
    let card = Node::element(
        "weather-card",
        vec![
            Node::labeled("weather-icon", weather_icon(&record.condition_code)),
            Node::labeled(
                "city-name",
                format!("{}, {}", record.location, record.country_code),
            ),
            Node::labeled("temperature", format_celsius(record.temperature_c)),
            Node::labeled("description", record.description.as_str()),
        ],
    );

    let mut details = vec![
        ("Feels like", format_celsius(record.feels_like_c)),
        ("Humidity", format!("{}%", record.humidity_pct)),
        ("Wind Speed", format!("{} m/s", record.wind_speed_ms)),
        ("Pressure", format!("{} hPa", record.pressure_hpa)),
    ];
    if let Some(observed_at) = record.observed_at {
        details.push(("Observed", observed_at.format("%Y-%m-%d %H:%M UTC").to_string()));
    }

    let details = details
        .into_iter()
        .map(|(label, value)| {
            Node::element(
                "detail-item",
                vec![
                    Node::labeled("detail-label", label),
                    Node::labeled("detail-value", value),
                ],
            )
        })
        .collect();

    vec![
        Node::element("weather-main", vec![card]),
        Node::element("weather-details", details),
    ]
}

pub fn render_excuse(state: &UiState<ExcuseRecord>) -> View {
    match state {
        UiState::Idle => View::empty(),
        UiState::Loading => View::of(vec![Node::labeled("loading", "Loading excuse...")]),
        UiState::Error(message) => View::of(vec![
            Node::labeled("excuse-text", message.as_str()),
            Node::element("excuse-category", Vec::new()),
        ]),
        UiState::Displaying(record) => View::fading(vec![
            Node::labeled("excuse-text", record.excuse.as_str()),
            Node::labeled("excuse-category", category_label(&record.category)),
        ]),
    }
}

pub fn render_categories(categories: &[String]) -> View {
    let buttons = categories
        .iter()
        .map(|key| Node::labeled("category-btn", category_label(key)))
        .collect();
    View::of(vec![Node::element("category-buttons", buttons)])
}

pub fn render_status(status: Option<&StatusMessage>) -> View {
    match status {
        Some(status) => View::of(vec![Node::labeled(
            status.severity.class(),
            status.message.as_str(),
        )]),
        None => View::empty(),
    }
}

fn error_node(message: &str) -> Node {
    Node::element("error-message", vec![Node::labeled("error-text", message)])
}
