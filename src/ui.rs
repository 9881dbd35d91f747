use crate::dom::{
    Document, Element, TOOLTIP_MARKER_ATTR, TOOLTIP_MARKER_VALUE, TOOLTIP_PLACEMENT_ATTR,
    TOOLTIP_TITLE_ATTR,
};
use crate::models::ConsumptionReading;

/// Panels on the dashboard that carry the tooltip-trigger marker:
/// element id, label, default tooltip text.
pub const DASHBOARD_PANELS: [(&str, &str, &str); 4] = [
    ("electricity-chart", "Electricity", "Electricity units this period"),
    ("gas-stats", "Gas", "Gas units this period"),
    ("water-stats", "Water", "Water units this period"),
    ("transport-stats", "Public transport", "Miles travelled by public transport"),
];

pub fn render_dashboard(latest: Option<&ConsumptionReading>) -> String {
    let (stamp, values) = match latest {
        Some(reading) => (
            reading.timestamp.clone(),
            [
                reading.electricity,
                reading.gas,
                reading.water,
                reading.public_transport,
            ]
            .map(|value| format!("{value:.1}")),
        ),
        None => (
            "No readings yet".to_string(),
            ["-", "-", "-", "-"].map(str::to_string),
        ),
    };

    let panels: String = DASHBOARD_PANELS
        .iter()
        .zip(values.iter())
        .map(|((id, label, hint), value)| {
            format!(
                r#"      <div class="stat" id="{id}" {TOOLTIP_MARKER_ATTR}="{TOOLTIP_MARKER_VALUE}" {TOOLTIP_TITLE_ATTR}="{hint}" {TOOLTIP_PLACEMENT_ATTR}="top">
        <span class="label">{label}</span>
        <span class="value">{value}</span>
      </div>
"#
            )
        })
        .collect();

    DASHBOARD_HTML
        .replace("{{UPDATED}}", &stamp)
        .replace("{{PANELS}}", &panels)
}

/// In-memory model of the dashboard page, for hosting a poller outside a browser.
pub fn dashboard_document() -> Document {
    let mut doc = Document::new();
    for (id, _, hint) in DASHBOARD_PANELS {
        doc.insert(
            id,
            Element::default()
                .with_attr(TOOLTIP_MARKER_ATTR, TOOLTIP_MARKER_VALUE)
                .with_attr(TOOLTIP_TITLE_ATTR, hint)
                .with_attr(TOOLTIP_PLACEMENT_ATTR, "top"),
        );
    }
    doc
}

const DASHBOARD_HTML: &str = r#"<!DOCTYPE html>
<html lang="en">
<head>
  <meta charset="UTF-8" />
  <meta name="viewport" content="width=device-width, initial-scale=1.0" />
  <title>Eco Insights</title>
  <link rel="stylesheet" href="https://cdn.jsdelivr.net/npm/bootstrap@5.3.3/dist/css/bootstrap.min.css" />
  <style>
    :root {
      --bg-1: #eef6ee;
      --ink: #1f2d24;
      --accent: #2f8f5b;
      --card: rgba(255, 255, 255, 0.9);
      --shadow: 0 24px 60px rgba(31, 45, 36, 0.16);
    }

    body {
      margin: 0;
      min-height: 100vh;
      background: linear-gradient(135deg, var(--bg-1), #f7fbf4 70%);
      color: var(--ink);
      display: grid;
      place-items: center;
      padding: 32px 18px 48px;
    }

    .app {
      width: min(860px, 100%);
      background: var(--card);
      border-radius: 28px;
      box-shadow: var(--shadow);
      padding: 36px;
      display: grid;
      gap: 28px;
    }

    .panel {
      display: grid;
      grid-template-columns: repeat(auto-fit, minmax(180px, 1fr));
      gap: 16px;
    }

    .stat {
      background: white;
      border-radius: 20px;
      padding: 16px;
      border: 1px solid rgba(31, 45, 36, 0.08);
      display: grid;
      gap: 6px;
    }

    .label {
      color: #5f6b62;
      font-size: 0.9rem;
    }

    .value {
      font-size: 1.8rem;
      font-weight: 600;
      color: var(--accent);
    }

    #agent-alerts {
      position: fixed;
      top: 20px;
      right: 20px;
      z-index: 1050;
      max-width: 360px;
    }
  </style>
</head>
<body>
  <main class="app">
    <header>
      <h1>Eco Insights</h1>
      <p class="subtitle">Latest reading: <span id="reading-time">{{UPDATED}}</span></p>
    </header>

    <section class="panel">
{{PANELS}}    </section>
  </main>
</body>
</html>
"#;
