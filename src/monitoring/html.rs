//! Self-contained HTML rendering of a [`DashboardReport`], charts drawn as inline SVG.

use super::{
    metrics::{Histogram, LabelShare},
    report::{Analysis, DashboardReport},
};

pub const PAGE_TITLE: &str = "Sentiment Model Monitoring Dashboard";

const REFERENCE_COLOR: &str = "#1f77b4";
const LOGGED_COLOR: &str = "#ff7f0e";

const CHART_WIDTH: f64 = 640.0;
const CHART_HEIGHT: f64 = 320.0;
const MARGIN_LEFT: f64 = 56.0;
const MARGIN_RIGHT: f64 = 16.0;
const MARGIN_TOP: f64 = 16.0;
const MARGIN_BOTTOM: f64 = 44.0;

const STYLE: &str = r#"
body { font-family: sans-serif; max-width: 760px; margin: 2rem auto; color: #222; }
.banner { padding: 0.8rem 1rem; border-radius: 6px; margin: 0.8rem 0; }
.alert { background: #fdecea; color: #611a15; border: 2px solid #f44336; font-weight: bold; font-size: 1.2rem; }
.warning { background: #fff4e5; color: #663c00; }
.info { background: #e8f4fd; color: #0d3c61; }
.success { background: #edf7ed; color: #1e4620; }
.legend span { margin-right: 1rem; }
"#;

pub fn render_html(report: &DashboardReport) -> String {
    let mut html = String::new();
    html.push_str("<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n<meta charset=\"utf-8\">\n");
    html.push_str(&format!("<title>{}</title>\n", PAGE_TITLE));
    html.push_str(&format!("<style>{}</style>\n</head>\n<body>\n", STYLE));

    // The alert goes above everything else, title included
    if let Some(alert) = report.alert() {
        html.push_str(&format!(
            "<div class=\"banner alert\" role=\"alert\" id=\"accuracy-alert\">{} (accuracy {:.2}%, threshold {:.2}%)</div>\n",
            escape(&alert.message),
            alert.accuracy * 100.0,
            alert.threshold * 100.0
        ));
    }

    html.push_str(&format!("<h1>{}</h1>\n", PAGE_TITLE));

    match &report.analysis {
        None => {
            if let Some(notice) = report.notice() {
                html.push_str(&format!(
                    "<div class=\"banner warning\" id=\"no-data\">{}</div>\n",
                    escape(notice)
                ));
            }
        }
        Some(analysis) => render_analysis(&mut html, report, analysis),
    }

    html.push_str("</body>\n</html>\n");
    html
}

// Everything past the no-data notice lives here, skipped-line count included
fn render_analysis(html: &mut String, report: &DashboardReport, analysis: &Analysis) {
    html.push_str(&format!(
        "<div class=\"banner success\">Loaded {} entries</div>\n",
        analysis.entries
    ));
    if report.skipped_lines > 0 {
        html.push_str(&format!(
            "<div class=\"banner info\" id=\"skipped-lines\">Skipped {} malformed log lines</div>\n",
            report.skipped_lines
        ));
    }

    html.push_str("<h2>Data drift - sentence length</h2>\n");
    let drift = &analysis.length_drift;
    html.push_str(&format!(
        "<p>Reference dataset average sentence length: {}</p>\n<p>Logged requests average sentence length: {}</p>\n",
        format_mean(drift.reference_mean),
        format_mean(drift.logged_mean)
    ));
    html.push_str(&legend("Reference dataset", "Logged requests"));
    html.push_str(&histogram_svg(&drift.histogram));

    html.push_str("<h2>Target drift - sentiment distribution</h2>\n");
    html.push_str(&legend("Training", "Predicted"));
    html.push_str(&bar_chart_svg(&analysis.target_drift));

    html.push_str("<h2>Model performance based on user feedback</h2>\n");
    match &analysis.performance {
        Some(metrics) => {
            html.push_str(&format!(
                "<p>Accuracy: {:.2}%</p>\n<p>Precision: {:.2}%</p>\n<p>Feedback samples: {}</p>\n",
                metrics.accuracy * 100.0,
                metrics.precision * 100.0,
                metrics.samples
            ));
        }
        None => {
            if let Some(notice) = report.notice() {
                html.push_str(&format!(
                    "<div class=\"banner info\" id=\"no-feedback\">{}</div>\n",
                    escape(notice)
                ));
            }
        }
    }
}

fn format_mean(mean: Option<f64>) -> String {
    mean.map(|m| format!("{:.2}", m))
        .unwrap_or_else(|| "n/a".to_string())
}

fn legend(reference: &str, logged: &str) -> String {
    format!(
        "<p class=\"legend\"><span style=\"color:{}\">&#9632; {}</span><span style=\"color:{}\">&#9632; {}</span></p>\n",
        REFERENCE_COLOR, reference, LOGGED_COLOR, logged
    )
}

fn plot_width() -> f64 {
    CHART_WIDTH - MARGIN_LEFT - MARGIN_RIGHT
}

fn plot_height() -> f64 {
    CHART_HEIGHT - MARGIN_TOP - MARGIN_BOTTOM
}

fn svg_open(label: &str) -> String {
    format!(
        "<svg xmlns=\"http://www.w3.org/2000/svg\" width=\"{w}\" height=\"{h}\" viewBox=\"0 0 {w} {h}\" role=\"img\" aria-label=\"{label}\">\n",
        w = CHART_WIDTH,
        h = CHART_HEIGHT,
        label = escape(label)
    )
}

fn axes(svg: &mut String, x_label: &str, y_label: &str, y_max_label: &str) {
    let x0 = MARGIN_LEFT;
    let y0 = MARGIN_TOP + plot_height();
    svg.push_str(&format!(
        "<line x1=\"{x0}\" y1=\"{y0}\" x2=\"{x1}\" y2=\"{y0}\" stroke=\"#444\"/>\n<line x1=\"{x0}\" y1=\"{top}\" x2=\"{x0}\" y2=\"{y0}\" stroke=\"#444\"/>\n",
        x1 = x0 + plot_width(),
        top = MARGIN_TOP
    ));
    svg.push_str(&format!(
        "<text x=\"{x}\" y=\"{y}\" font-size=\"12\" text-anchor=\"end\">{}</text>\n",
        escape(y_max_label),
        x = x0 - 4.0,
        y = MARGIN_TOP + 10.0
    ));
    svg.push_str(&format!(
        "<text x=\"{x}\" y=\"{y}\" font-size=\"12\" text-anchor=\"end\">0</text>\n",
        x = x0 - 4.0,
        y = y0
    ));
    svg.push_str(&format!(
        "<text x=\"{x}\" y=\"{y}\" font-size=\"13\" text-anchor=\"middle\">{}</text>\n",
        escape(x_label),
        x = x0 + plot_width() / 2.0,
        y = CHART_HEIGHT - 6.0
    ));
    svg.push_str(&format!(
        "<text x=\"14\" y=\"{y}\" font-size=\"13\" text-anchor=\"middle\" transform=\"rotate(-90 14 {y})\">{}</text>\n",
        escape(y_label),
        y = MARGIN_TOP + plot_height() / 2.0
    ));
}

fn shares(counts: &[usize]) -> Vec<f64> {
    let total: usize = counts.iter().sum();
    counts
        .iter()
        .map(|&c| if total == 0 { 0.0 } else { c as f64 / total as f64 })
        .collect()
}

/// Each series is normalized to its own total so a small log overlays a large corpus.
fn histogram_svg(hist: &Histogram) -> String {
    let reference = shares(&hist.reference);
    let logged = shares(&hist.logged);
    let y_max = reference
        .iter()
        .chain(logged.iter())
        .copied()
        .fold(0.0_f64, f64::max)
        .max(f64::EPSILON);

    let mut svg = svg_open("Sentence length histogram");
    let bar_width = plot_width() / hist.bins().max(1) as f64;
    let baseline = MARGIN_TOP + plot_height();

    for (series, color) in [(&reference, REFERENCE_COLOR), (&logged, LOGGED_COLOR)] {
        for (i, share) in series.iter().enumerate() {
            let height = share / y_max * plot_height();
            if height <= 0.0 {
                continue;
            }
            svg.push_str(&format!(
                "<rect x=\"{:.2}\" y=\"{:.2}\" width=\"{:.2}\" height=\"{:.2}\" fill=\"{}\" fill-opacity=\"0.5\"/>\n",
                MARGIN_LEFT + bar_width * i as f64,
                baseline - height,
                bar_width,
                height,
                color
            ));
        }
    }

    if let (Some(first), Some(last)) = (hist.edges.first(), hist.edges.last()) {
        svg.push_str(&format!(
            "<text x=\"{x}\" y=\"{y}\" font-size=\"12\">{:.0}</text>\n<text x=\"{x1}\" y=\"{y}\" font-size=\"12\" text-anchor=\"end\">{:.0}</text>\n",
            first,
            last,
            x = MARGIN_LEFT,
            x1 = MARGIN_LEFT + plot_width(),
            y = baseline + 14.0
        ));
    }

    axes(
        &mut svg,
        "Sentence length (characters)",
        "Share of texts",
        &format!("{:.0}%", y_max * 100.0),
    );
    svg.push_str("</svg>\n");
    svg
}

fn bar_chart_svg(shares: &[LabelShare]) -> String {
    let mut svg = svg_open("Sentiment distribution bar chart");
    let baseline = MARGIN_TOP + plot_height();
    let group_width = plot_width() / shares.len().max(1) as f64;
    let bar_width = group_width * 0.35;

    for (i, share) in shares.iter().enumerate() {
        let group_x = MARGIN_LEFT + group_width * i as f64;
        let bars = [
            (share.reference, REFERENCE_COLOR, group_x + group_width * 0.15),
            (share.predicted, LOGGED_COLOR, group_x + group_width * 0.5),
        ];
        for (value, color, x) in bars {
            let height = value.clamp(0.0, 1.0) * plot_height();
            svg.push_str(&format!(
                "<rect x=\"{:.2}\" y=\"{:.2}\" width=\"{:.2}\" height=\"{:.2}\" fill=\"{}\"><title>{:.1}%</title></rect>\n",
                x,
                baseline - height,
                bar_width,
                height,
                color,
                value * 100.0
            ));
        }
        svg.push_str(&format!(
            "<text x=\"{:.2}\" y=\"{:.2}\" font-size=\"12\" text-anchor=\"middle\">{}</text>\n",
            group_x + group_width / 2.0,
            baseline + 14.0,
            escape(&share.label)
        ));
    }

    axes(&mut svg, "Sentiment", "Proportion", "1.0");
    svg.push_str("</svg>\n");
    svg
}

pub fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            other => out.push(other),
        }
    }
    out
}
