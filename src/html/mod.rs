//! Server-rendered upload page.
//!
//! Markup is assembled from `&'static str` fragments so the page ships inside
//! the binary. Every dynamic value goes through [`escape_html`].

mod style;

use crate::{
    labels::{Category, LabelEntry},
    nutrition::CalorieInfo,
    pipeline::PredictionResult,
};
use std::fmt::Write;
use style::STYLE;

#[derive(Debug)]
pub struct Analysis {
    pub prediction: PredictionResult,
    pub calories: CalorieInfo,
}

#[derive(Debug, Default)]
pub enum Outcome {
    #[default]
    Empty,
    Analysis(Analysis),
    Error(String),
}

#[derive(Debug, Default)]
pub struct PageView {
    /// Where the browser can fetch the stored upload.
    pub image_url: Option<String>,
    pub outcome: Outcome,
    pub labels: Vec<LabelEntry>,
}

pub fn render_page(view: &PageView) -> String {
    let mut html = String::with_capacity(STYLE.len() + 4096);
    html.push_str(
        r#"<!doctype html>
<html lang="en">
<head>
  <meta charset="UTF-8" />
  <meta name="viewport" content="width=device-width, initial-scale=1.0" />
  <title>Fruit &amp; Vegetable Classifier</title>
  <style>"#,
    );
    html.push_str(STYLE);
    html.push_str(
        r#"</style>
</head>
<body>
  <h1 class="main-title">🍎 Fruit &amp; Vegetable Classifier 🥦</h1>
  <p class="subtitle">Upload an image to identify fruits/vegetables and get nutritional information</p>
  <div class="layout">
    <main>
      <h3>📷 Upload Your Image</h3>
      <p>Supported formats: JPG, PNG, JPEG</p>
      <form action="/analyze" method="post" enctype="multipart/form-data">
        <input type="file" name="file" accept=".jpg,.jpeg,.png,image/jpeg,image/png" required />
        <button class="analyze-button" type="submit">🔍 Analyze Image</button>
      </form>
"#,
    );

    if let Some(url) = &view.image_url {
        let _ = write!(
            html,
            r#"      <figure><img class="uploaded-img" src="{}" alt="Uploaded image" /><figcaption>📸 Uploaded Image</figcaption></figure>
"#,
            escape_html(url)
        );
    }

    match &view.outcome {
        Outcome::Empty => {}
        Outcome::Error(message) => {
            let _ = write!(
                html,
                r#"      <div class="error-banner">{}</div>
"#,
                escape_html(message)
            );
        }
        Outcome::Analysis(analysis) => render_analysis(&mut html, analysis),
    }

    html.push_str("    </main>\n");
    render_sidebar(&mut html, &view.labels);
    html.push_str("  </div>\n</body>\n</html>\n");
    html
}

fn render_analysis(html: &mut String, analysis: &Analysis) {
    let (card_class, badge_class, badge_text) = match analysis.prediction.category {
        Category::Vegetable => ("vegetable-card", "vegetable-badge", "🥬 VEGETABLE"),
        Category::Fruit => ("fruit-card", "fruit-badge", "🍎 FRUIT"),
    };

    let _ = write!(
        html,
        r#"      <div class="result-card {card_class}">
        <div class="category-badge {badge_class}">{badge_text}</div>
        <div class="prediction-text">🎯 {label}</div>
      </div>
      <div class="calorie-card">
        <h3>🔥 Nutritional Information</h3>
        <h3>{calories} (per 100g)</h3>
      </div>
"#,
        label = escape_html(&analysis.prediction.label),
        calories = escape_html(&analysis.calories.to_string()),
    );
}

fn render_sidebar(html: &mut String, labels: &[LabelEntry]) {
    let fruits = names_in(labels, Category::Fruit);
    let vegetables = names_in(labels, Category::Vegetable);

    let _ = write!(
        html,
        r#"    <aside>
      <div class="info-panel">
        <h3>🎯 How It Works</h3>
        <p>This AI-powered classifier uses deep learning to identify fruits and vegetables from images.</p>
        <h4>📊 Supported Items</h4>
        <div class="supported-grid">
          <div class="supported-items">
            <h5>🍎 Fruits ({fruit_count} types)</h5>
            <small>{fruits}</small>
          </div>
          <div class="supported-items">
            <h5>🥦 Vegetables ({vegetable_count} types)</h5>
            <small>{vegetables}</small>
          </div>
        </div>
        <h4>💡 Tips for Best Results</h4>
        <ul>
          <li>Use clear, well-lit images</li>
          <li>Focus on a single item</li>
          <li>Avoid blurry photos</li>
          <li>Plain background works best</li>
          <li>Close-up shots recommended</li>
        </ul>
      </div>
      <div class="info-panel">
        <h4>📈 Model Statistics</h4>
        <p><strong>{total}</strong> different food items</p>
        <p><strong>{fruit_count}</strong> fruit varieties</p>
        <p><strong>{vegetable_count}</strong> vegetable varieties</p>
        <p><strong>AI-powered</strong> classification</p>
        <p><strong>Real-time</strong> calorie estimation</p>
      </div>
    </aside>
"#,
        fruit_count = fruits.len(),
        vegetable_count = vegetables.len(),
        fruits = escape_html(&fruits.join(", ")),
        vegetables = escape_html(&vegetables.join(", ")),
        total = labels.len(),
    );
}

fn names_in(labels: &[LabelEntry], category: Category) -> Vec<&str> {
    labels
        .iter()
        .filter(|entry| entry.category == category)
        .map(|entry| entry.label.as_str())
        .collect()
}

pub fn escape_html(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for ch in input.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(ch),
        }
    }
    out
}
