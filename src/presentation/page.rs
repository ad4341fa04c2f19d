// HTML rendering of the price chart page
use crate::domain::chart::{ChartPage, PairChart};

pub const UNAVAILABLE_MESSAGE: &str = "Something went wrong. Please, try again";

const CHARTS_SCRIPT_URL: &str =
    "https://unpkg.com/lightweight-charts@4.1.3/dist/lightweight-charts.standalone.production.js";

const STYLE: &str = r#"
body { margin: 0; background: #111; color: #ddd; font-family: sans-serif; }
main { max-width: 1100px; margin: 0 auto; padding: 1rem; }
.tabs { display: grid; grid-template-columns: repeat(3, 1fr); gap: 4px; margin-bottom: 1rem; }
.tabs button { padding: .5rem; background: #222; color: #ddd; border: 0; cursor: pointer; }
.tabs button[aria-selected="true"] { background: #2962FF; }
.chart { position: relative; width: 100%; min-height: 24rem; }
.levels { position: absolute; left: .75rem; top: .5rem; z-index: 10; margin: 0; }
.levels p { margin: 0 0 .25rem; }
"#;

// Charts are created when a tab is shown and removed when it is hidden or the page unloads
const CHART_SCRIPT: &str = r#"
(function () {
  const page = JSON.parse(document.getElementById('chart-data').textContent);
  const byPair = Object.fromEntries(page.charts.map((c) => [c.pair, c]));
  let active = null;

  function mount(pairId) {
    const data = byPair[pairId];
    const el = document.querySelector('.chart[data-pair="' + pairId + '"]');
    if (!data || !data.summary || !el) return null;
    const chart = LightweightCharts.createChart(el, {
      layout: { background: { type: 'solid', color: '#222' }, textColor: '#DDD' },
      grid: { vertLines: { color: '#444' }, horzLines: { color: '#444' } },
      width: el.clientWidth,
      height: el.clientHeight,
    });
    const series = chart.addAreaSeries({
      lineColor: '#2962FF', topColor: '#2962FF', bottomColor: 'rgba(41, 98, 255, 0.28)',
    });
    series.setData(data.series);
    const levels = [
      [data.summary.min, '#ef5350', 2, 'min price'],
      [data.summary.average, 'gray', 1, 'average price'],
      [data.summary.max, '#26a69a', 2, 'max price'],
    ];
    for (const [price, color, lineStyle, title] of levels) {
      series.createPriceLine({ price, color, lineWidth: 2, lineStyle, axisLabelVisible: true, title });
    }
    chart.timeScale().fitContent();
    const onResize = () => chart.applyOptions({ width: el.clientWidth });
    window.addEventListener('resize', onResize);
    return () => { window.removeEventListener('resize', onResize); chart.remove(); };
  }

  function show(pairId) {
    if (active) active();
    active = null;
    document.querySelectorAll('.tabs button').forEach((b) => {
      b.setAttribute('aria-selected', String(b.dataset.pair === pairId));
    });
    document.querySelectorAll('.tab').forEach((t) => { t.hidden = t.dataset.pair !== pairId; });
    active = mount(pairId);
  }

  document.querySelectorAll('.tabs button').forEach((b) => {
    b.addEventListener('click', () => show(b.dataset.pair));
  });
  window.addEventListener('pagehide', () => { if (active) active(); active = null; });
  const first = document.querySelector('.tabs button');
  if (first) show(first.dataset.pair);
})();
"#;

/// Full page with one tab per pair and the data handed to the charting library
pub fn render_page(page: &ChartPage) -> Result<String, serde_json::Error> {
    let data = script_safe_json(page)?;
    let default_pair = page.default_pair().map(|p| p.id());

    let mut html = String::new();
    head(&mut html);
    html.push_str("<main>\n<div class=\"tabs\" role=\"tablist\">\n");
    for chart in &page.charts {
        html.push_str(&format!(
            "<button role=\"tab\" data-pair=\"{id}\" aria-selected=\"{selected}\">{title}</button>\n",
            id = chart.pair.id(),
            selected = Some(chart.pair.id()) == default_pair,
            title = escape_html(&chart.title),
        ));
    }
    html.push_str("</div>\n");

    for chart in &page.charts {
        render_tab(&mut html, chart, Some(chart.pair.id()) == default_pair);
    }

    html.push_str(&format!(
        "<script type=\"application/json\" id=\"chart-data\">{data}</script>\n\
         <script src=\"{CHARTS_SCRIPT_URL}\"></script>\n\
         <script>{CHART_SCRIPT}</script>\n\
         </main>\n</body>\n</html>\n"
    ));

    Ok(html)
}

/// Page shown when price data could not be fetched
pub fn render_unavailable() -> String {
    let mut html = String::new();
    head(&mut html);
    html.push_str(&format!("<main>{UNAVAILABLE_MESSAGE}</main>\n</body>\n</html>\n"));
    html
}

fn head(html: &mut String) {
    html.push_str(&format!(
        "<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n<meta charset=\"utf-8\">\n\
         <meta name=\"viewport\" content=\"width=device-width, initial-scale=1\">\n\
         <title>Token prices</title>\n<style>{STYLE}</style>\n</head>\n<body>\n"
    ));
}

fn render_tab(html: &mut String, chart: &PairChart, visible: bool) {
    html.push_str(&format!(
        "<section class=\"tab\" role=\"tabpanel\" data-pair=\"{}\"{}>\n",
        chart.pair.id(),
        if visible { "" } else { " hidden" }
    ));

    match &chart.summary {
        Some(summary) => {
            html.push_str(&format!("<div class=\"chart\" data-pair=\"{}\">\n", chart.pair.id()));
            html.push_str("<div class=\"levels\">\n");
            html.push_str(&format!("<p>Average Price: ${:.2}</p>\n", summary.average));
            html.push_str(&format!("<p>Maximum Price: ${:.2}</p>\n", summary.max));
            html.push_str(&format!("<p>Minimum Price: ${:.2}</p>\n", summary.min));
            if let Some(change) = chart.price_change_percentage {
                html.push_str(&format!("<p>Change: {:+.2}%</p>\n", change));
            }
            html.push_str("</div>\n</div>\n");
        }
        None => {
            html.push_str(&format!(
                "<p class=\"empty\">No price data for {}</p>\n",
                escape_html(&chart.title)
            ));
        }
    }

    html.push_str("</section>\n");
}

/// JSON that can sit inside a <script> element
fn script_safe_json(page: &ChartPage) -> Result<String, serde_json::Error> {
    Ok(serde_json::to_string(page)?
        .replace('<', "\\u003c")
        .replace('>', "\\u003e")
        .replace('&', "\\u0026"))
}

fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(c),
        }
    }
    escaped
}
