//! Dashboard page
//!
//! Server-rendered HTML: the interaction form on top, the four charts
//! underneath. Charts are inlined as SVG so the page works without scripts.

use chrono::Datelike;

use crate::charts::svg::escape;
use crate::charts::{ChartKind, ChartOptions};
use crate::panels::{ChartSnapshot, DatasetStatus, InteractionState};

const STYLESHEET: &str = "\
:root { color-scheme: dark; }\
body { margin: 0; min-height: 100vh; background: radial-gradient(circle at 20% 10%, #1b2550 0%, #0b1026 55%, #05070f 100%); color: #E6F0FF; font-family: Inter, Roboto, 'Segoe UI', sans-serif; }\
main { max-width: 1200px; margin: 0 auto; padding: 32px 24px; }\
h1 { font-size: 2.4rem; margin: 0 0 4px; letter-spacing: 0.04em; }\
.tagline { color: #B5C7FF; margin: 0 0 28px; }\
.card { background: rgba(255,255,255,0.04); border: 1px solid rgba(255,255,255,0.08); border-radius: 16px; padding: 20px; margin-bottom: 24px; }\
textarea { width: 100%; min-height: 96px; box-sizing: border-box; background: rgba(5,7,15,0.6); color: inherit; border: 1px solid rgba(125,211,252,0.3); border-radius: 10px; padding: 12px; font: inherit; }\
.actions { display: flex; gap: 12px; margin-top: 12px; }\
button { background: linear-gradient(90deg, #7DD3FC, #B794F4); color: #05070f; border: 0; border-radius: 999px; padding: 10px 22px; font-weight: 700; cursor: pointer; }\
button:disabled { opacity: 0.5; cursor: progress; }\
pre.response { white-space: pre-wrap; word-break: break-word; background: rgba(5,7,15,0.5); border-radius: 10px; padding: 14px; margin: 16px 0 0; }\
.sentiment { margin-top: 12px; font-weight: 700; }\
.grid { display: grid; grid-template-columns: repeat(auto-fit, minmax(480px, 1fr)); gap: 24px; }\
.chart h2 { margin: 0; font-size: 1.15rem; }\
.chart .subtitle { color: #B5C7FF; font-size: 0.85rem; margin: 4px 0 12px; }\
.chart svg { width: 100%; height: auto; }\
.status { font-size: 0.8rem; color: #FFC107; }\
footer { text-align: center; color: #B5C7FF; font-size: 0.85rem; padding: 16px 0 32px; }";

/// Render the whole dashboard
pub fn render_dashboard(
    interaction: &InteractionState,
    charts: &ChartSnapshot,
    options: &ChartOptions,
) -> String {
    let mut html = String::with_capacity(64 * 1024);
    html.push_str(r#"<!DOCTYPE html><html lang="en"><head><meta charset="utf-8">"#);
    html.push_str(r#"<meta name="viewport" content="width=device-width, initial-scale=1">"#);
    html.push_str("<title>Orion</title><style>");
    html.push_str(STYLESHEET);
    html.push_str("</style></head><body><main>");
    html.push_str(r#"<h1>Orion</h1><p class="tagline">AI text analysis and query insights</p>"#);

    html.push_str(&interaction_card(interaction));

    html.push_str(r#"<section class="grid">"#);
    let shown = charts.radar_records(options).len();
    for kind in ChartKind::ALL {
        html.push_str(&chart_card(kind, charts, options, shown));
    }
    html.push_str("</section>");

    html.push_str(&format!(
        "<footer>Powered by Orion • {}</footer>",
        chrono::Local::now().year()
    ));
    html.push_str("</main></body></html>");
    html
}

fn interaction_card(state: &InteractionState) -> String {
    let disabled = if state.loading { " disabled" } else { "" };

    let mut card = String::from(r#"<section class="card"><form method="post" action="/analyze">"#);
    card.push_str(&format!(
        r#"<textarea name="query" placeholder="Type something to analyze...">{}</textarea>"#,
        escape(&state.query)
    ));
    card.push_str(&format!(
        r#"<div class="actions"><button type="submit"{d}>Analyze</button><button type="submit" formaction="/sentiment"{d}>Sentiment</button></div>"#,
        d = disabled
    ));
    card.push_str("</form>");

    if !state.response_text.is_empty() {
        card.push_str(&format!(
            r#"<pre class="response">{}</pre>"#,
            escape(&state.response_text)
        ));
    }

    if let Some(tone) = state.sentiment_tone() {
        card.push_str(&format!(
            r#"<p class="sentiment">Sentiment: <span style="color: {}">{}</span></p>"#,
            tone.color(),
            escape(&state.sentiment_text)
        ));
    }

    card.push_str("</section>");
    card
}

fn chart_card(
    kind: ChartKind,
    charts: &ChartSnapshot,
    options: &ChartOptions,
    engagement_shown: usize,
) -> String {
    let status = match kind {
        ChartKind::TrendLine | ChartKind::TrendArea => charts.trends.status,
        ChartKind::CategoryRing => charts.categories.status,
        ChartKind::EngagementRadar => charts.engagement.status,
    };
    let note = match status {
        DatasetStatus::Loaded => "",
        DatasetStatus::Pending => r#"<p class="status">Still loading</p>"#,
        DatasetStatus::Failed => r#"<p class="status">Could not load data</p>"#,
    };

    format!(
        r#"<article class="card chart" id="{}"><h2>{}</h2><p class="subtitle">{}</p>{}{}</article>"#,
        kind.slug(),
        kind.title(),
        escape(&kind.subtitle(options, engagement_shown)),
        note,
        charts.render(kind, options)
    )
}
