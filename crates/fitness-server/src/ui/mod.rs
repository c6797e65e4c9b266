//! Server-rendered advisor page

use fitness_kb::{error_sentinel, Recommendation, NUTRITION_FACTS};

const PAGE_TEMPLATE: &str = include_str!("../../templates/index.html");

/// Everything that varies between renders of the advisor page.
#[derive(Debug, Default, Clone)]
pub struct PageView {
    /// Goal echoed back into the input box
    pub goal: String,
    /// Shown under the form when the submission was rejected
    pub validation_error: Option<String>,
    /// Sidebar message after a seeding attempt
    pub notice: Option<String>,
    pub plan: Option<Recommendation>,
}

impl PageView {
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn with_plan(goal: impl Into<String>, plan: Recommendation) -> Self {
        Self {
            goal: goal.into(),
            plan: Some(plan),
            ..Self::default()
        }
    }

    pub fn rejected(goal: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            goal: goal.into(),
            validation_error: Some(message.into()),
            ..Self::default()
        }
    }

    pub fn with_notice(notice: impl Into<String>) -> Self {
        Self {
            notice: Some(notice.into()),
            ..Self::default()
        }
    }
}

/// Escape text for insertion into element content or attribute values.
pub fn escape_html(input: &str) -> String {
    let mut output = String::with_capacity(input.len());
    for ch in input.chars() {
        match ch {
            '&' => output.push_str("&amp;"),
            '<' => output.push_str("&lt;"),
            '>' => output.push_str("&gt;"),
            '"' => output.push_str("&quot;"),
            '\'' => output.push_str("&#x27;"),
            _ => output.push(ch),
        }
    }
    output
}

/// Render the full page.
pub fn render_page(view: &PageView) -> String {
    let notice = view
        .notice
        .as_deref()
        .map(|n| format!("<p class=\"notice\">{}</p>", escape_html(n)))
        .unwrap_or_default();
    let validation = view
        .validation_error
        .as_deref()
        .map(|m| format!("<p class=\"error\">{}</p>", escape_html(m)))
        .unwrap_or_default();
    let results = view
        .plan
        .as_ref()
        .map(|plan| render_plan(&view.goal, plan))
        .unwrap_or_default();

    fill_template(
        PAGE_TEMPLATE,
        &[
            ("GOAL", escape_html(&view.goal).as_str()),
            ("NOTICE", notice.as_str()),
            ("VALIDATION", validation.as_str()),
            ("RESULTS", results.as_str()),
        ],
    )
}

fn render_plan(goal: &str, plan: &Recommendation) -> String {
    let mut html = String::from("<section id=\"exercises\">\n<h2>Suggested Exercises</h2>\n");

    let exercises = plan.exercises();
    if exercises.first() == Some(&error_sentinel()) {
        html.push_str("<p>No matching exercises found.</p>\n");
    } else {
        html.push_str("<ul>\n");
        for exercise in exercises {
            html.push_str(&format!(
                "<li><strong>{}</strong>: {}</li>\n",
                escape_html(&exercise.name),
                escape_html(&exercise.description)
            ));
        }
        html.push_str("</ul>\n");
    }
    if let Some(reason) = plan.failure() {
        html.push_str(&format!(
            "<p class=\"error\">Error fetching data: {}</p>\n",
            escape_html(reason)
        ));
    }
    html.push_str("</section>\n");

    html.push_str("<section id=\"nutrition\">\n<h2>Nutritional Information</h2>\n");
    for line in NUTRITION_FACTS {
        html.push_str(&format!("<p>{}</p>\n", escape_html(line)));
    }
    html.push_str("</section>\n");

    html.push_str(&format!(
        "<section id=\"advice\">\n<h2>AI Recommendations</h2>\n<p>Based on your goal to '{}', focus on exercises and a diet tailored to your preferences.</p>\n</section>\n",
        escape_html(goal)
    ));
    html
}

/// Single pass over `{{KEY}}` placeholders so substituted text is never rescanned.
fn fill_template(template: &str, values: &[(&str, &str)]) -> String {
    let mut output = String::with_capacity(template.len());
    let mut rest = template;
    while let Some(start) = rest.find("{{") {
        output.push_str(&rest[..start]);
        let after = &rest[start + 2..];
        match after.find("}}") {
            Some(end) => {
                let key = &after[..end];
                match values.iter().find(|(k, _)| *k == key) {
                    Some((_, value)) => output.push_str(value),
                    None => output.push_str(&rest[start..start + 2 + end + 2]),
                }
                rest = &after[end + 2..];
            }
            None => {
                output.push_str(&rest[start..]);
                rest = "";
            }
        }
    }
    output.push_str(rest);
    output
}
