//! HTML dashboard page with D3.js charts
//!
//! The page is one self-contained document: server-rendered controls, KPI
//! cards and track table, plus the full report embedded as JSON for the D3
//! charts. When the filtered table is empty every chart slot gets a static
//! "no data" placeholder instead of a chart.

use crate::analysis::{Column, Summary};
use crate::catalog::Genre;
use crate::dashboard::DashboardReport;
use crate::generator::{TrackRecord, Variant};
use std::io::{self, Write};

pub const NO_DATA_MESSAGE: &str = "No data for the selected filters";

pub fn write<W: Write>(writer: &mut W, report: &DashboardReport) -> io::Result<()> {
    let json_data = serde_json::to_string(report)?.replace("</", "<\\/");
    let charts = if report.is_empty() { placeholder_grid() } else { chart_grid() };

    write!(writer, r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>Tunescope Dashboard</title>
    <script src="https://d3js.org/d3.v7.min.js"></script>
    <style>
        :root {{
            --bg: #0d1117;
            --card: #161b22;
            --border: #30363d;
            --text: #e6edf3;
            --dim: #7d8590;
            --accent: #58a6ff;
            --warm: #f78166;
            --good: #3fb950;
        }}
        * {{ box-sizing: border-box; margin: 0; padding: 0; }}
        body {{
            font-family: -apple-system, BlinkMacSystemFont, 'Segoe UI', 'Noto Sans', Helvetica, Arial, sans-serif;
            background: var(--bg);
            color: var(--text);
            line-height: 1.5;
        }}
        .container {{ max-width: 1600px; margin: 0 auto; padding: 2rem; }}
        .header {{ margin-bottom: 1.5rem; padding-bottom: 1rem; border-bottom: 1px solid var(--border); }}
        .logo {{
            font-size: 2.5rem;
            font-weight: 800;
            background: linear-gradient(135deg, var(--accent), #a371f7);
            -webkit-background-clip: text;
            -webkit-text-fill-color: transparent;
        }}
        .subtitle {{ color: var(--dim); }}

        .layout {{ display: grid; grid-template-columns: 280px 1fr; gap: 1.5rem; }}
        .controls {{
            background: var(--card);
            border: 1px solid var(--border);
            border-radius: 12px;
            padding: 1.25rem;
            align-self: start;
        }}
        .controls label {{ display: block; color: var(--dim); font-size: 0.8rem; margin: 0.75rem 0 0.25rem; text-transform: uppercase; }}
        .controls select, .controls input {{
            width: 100%;
            background: var(--bg);
            color: var(--text);
            border: 1px solid var(--border);
            border-radius: 6px;
            padding: 0.4rem;
        }}
        .controls button {{
            margin-top: 1rem;
            width: 100%;
            padding: 0.6rem;
            border: none;
            border-radius: 6px;
            background: var(--accent);
            color: #0d1117;
            font-weight: 700;
            cursor: pointer;
        }}

        .stats {{ display: grid; grid-template-columns: repeat(5, 1fr); gap: 1rem; margin-bottom: 1.5rem; }}
        .stat {{
            background: var(--card);
            border: 1px solid var(--border);
            border-radius: 12px;
            padding: 1.25rem;
            text-align: center;
        }}
        .stat-value {{ font-size: 2.25rem; font-weight: 700; line-height: 1; color: var(--accent); }}
        .stat-label {{ color: var(--dim); font-size: 0.8rem; text-transform: uppercase; letter-spacing: 0.05em; margin-top: 0.5rem; }}

        .charts {{ display: grid; grid-template-columns: 1fr 1fr; gap: 1.5rem; margin-bottom: 1.5rem; }}
        .chart-card {{
            background: var(--card);
            border: 1px solid var(--border);
            border-radius: 12px;
            padding: 1.25rem;
            min-height: 320px;
        }}
        .chart-title {{ font-size: 1rem; font-weight: 600; margin-bottom: 1rem; color: var(--dim); }}
        .placeholder {{
            display: flex;
            align-items: center;
            justify-content: center;
            height: 260px;
            color: var(--dim);
            border: 1px dashed var(--border);
            border-radius: 8px;
        }}

        .table-container {{ background: var(--card); border: 1px solid var(--border); border-radius: 12px; overflow: hidden; }}
        table {{ width: 100%; border-collapse: collapse; }}
        th, td {{ padding: 0.7rem 1rem; text-align: left; }}
        th {{
            background: rgba(255,255,255,0.03);
            font-size: 0.75rem;
            text-transform: uppercase;
            letter-spacing: 0.05em;
            color: var(--dim);
            border-bottom: 1px solid var(--border);
        }}
        td {{ border-bottom: 1px solid var(--border); }}
        tr:last-child td {{ border-bottom: none; }}
        tr:hover td {{ background: rgba(255,255,255,0.02); }}
        .mono {{ font-family: 'SF Mono', monospace; font-size: 0.85rem; }}
        .dim {{ color: var(--dim); }}

        .tooltip {{
            position: absolute;
            background: var(--card);
            border: 1px solid var(--border);
            border-radius: 8px;
            padding: 0.5rem 0.75rem;
            font-size: 0.85rem;
            pointer-events: none;
            opacity: 0;
            transition: opacity 0.15s;
        }}
        .tooltip.visible {{ opacity: 1; }}
        .footer {{ margin-top: 2rem; color: var(--dim); font-size: 0.85rem; text-align: center; }}
    </style>
</head>
<body>
    <div class="container">
        <div class="header">
            <div class="logo">Tunescope</div>
            <div class="subtitle">{variant} dataset &middot; seed {seed} &middot; {filtered} of {base} tracks &middot; generated {generated}</div>
        </div>

        <div class="layout">
            {controls}
            <div>
                {kpis}
                {charts}
                {table}
            </div>
        </div>

        <div class="footer">Synthetic data. Every refresh regenerates the table.</div>
    </div>

    <div class="tooltip" id="tooltip"></div>

    <script>
    const data = {json_data};
    const palette = d3.schemeTableau10;

    function showTooltip(event, text) {{
        const tooltip = document.getElementById('tooltip');
        tooltip.textContent = text;
        tooltip.classList.add('visible');
        tooltip.style.left = (event.pageX + 10) + 'px';
        tooltip.style.top = (event.pageY - 10) + 'px';
    }}

    function hideTooltip() {{
        document.getElementById('tooltip').classList.remove('visible');
    }}

    function frame(id, height) {{
        const container = document.getElementById(id);
        const margin = {{ top: 10, right: 20, bottom: 60, left: 120 }};
        const width = container.clientWidth - margin.left - margin.right;
        const inner = height - margin.top - margin.bottom;
        const svg = d3.select('#' + id)
            .append('svg')
            .attr('width', width + margin.left + margin.right)
            .attr('height', height)
            .append('g')
            .attr('transform', `translate(${{margin.left}},${{margin.top}})`);
        return {{ svg, width, height: inner }};
    }}

    function horizontalBars(id, rows, label, value, unit) {{
        const {{ svg, width, height }} = frame(id, 300);
        const y = d3.scaleBand().domain(rows.map(label)).range([0, height]).padding(0.2);
        const x = d3.scaleLinear().domain([0, d3.max(rows, value) || 1]).nice().range([0, width]);
        svg.append('g').call(d3.axisLeft(y)).selectAll('text').style('fill', '#7d8590');
        svg.append('g').attr('transform', `translate(0,${{height}})`).call(d3.axisBottom(x).ticks(5))
            .selectAll('text').style('fill', '#7d8590');
        svg.selectAll('.bar').data(rows).enter().append('rect')
            .attr('y', d => y(label(d)))
            .attr('height', y.bandwidth())
            .attr('width', d => x(value(d)))
            .attr('fill', (d, i) => palette[i % palette.length])
            .on('mouseover', (event, d) => showTooltip(event, `${{label(d)}}: ${{value(d).toFixed(1)}} ${{unit}}`))
            .on('mouseout', hideTooltip);
    }}

    // Grouped view: genre / artist / trend
    function drawViewChart() {{
        const rows = data.view.rows;
        if (data.view.mode === 'genre') {{
            horizontalBars('view-chart', rows, d => d.genre, d => d.mean_popularity, 'avg popularity');
        }} else if (data.view.mode === 'artist') {{
            horizontalBars('view-chart', rows, d => d.artist, d => d.total_volume, data.volume_label);
        }} else {{
            const {{ svg, width, height }} = frame('view-chart', 300);
            const x = d3.scalePoint().domain(rows.map(d => d.window)).range([0, width]).padding(0.5);
            const y = d3.scaleLinear().domain(d3.extent(rows, d => d.mean_popularity)).nice().range([height, 0]);
            svg.append('g').call(d3.axisLeft(y)).selectAll('text').style('fill', '#7d8590');
            svg.append('g').attr('transform', `translate(0,${{height}})`).call(d3.axisBottom(x))
                .selectAll('text').style('fill', '#7d8590');
            svg.append('path').datum(rows)
                .attr('fill', 'none').attr('stroke', '#58a6ff').attr('stroke-width', 2)
                .attr('d', d3.line().x(d => x(d.window)).y(d => y(d.mean_popularity)));
            svg.selectAll('circle').data(rows).enter().append('circle')
                .attr('cx', d => x(d.window)).attr('cy', d => y(d.mean_popularity)).attr('r', 5)
                .attr('fill', '#58a6ff')
                .on('mouseover', (event, d) => showTooltip(event, `${{d.window}}: ${{d.total_volume}} ${{data.volume_label}}`))
                .on('mouseout', hideTooltip);
        }}
    }}

    // Track count per artist
    function drawShareChart() {{
        const width = 280, height = 280, radius = 130;
        const svg = d3.select('#share-chart').append('svg')
            .attr('width', width).attr('height', height)
            .append('g').attr('transform', `translate(${{width/2}},${{height/2}})`);
        const pie = d3.pie().value(d => d.tracks).sort(null);
        const arc = d3.arc().innerRadius(radius * 0.55).outerRadius(radius);
        svg.selectAll('path').data(pie(data.artist_share)).enter().append('path')
            .attr('d', arc)
            .attr('fill', (d, i) => palette[i % palette.length])
            .attr('stroke', '#0d1117')
            .on('mouseover', (event, d) => showTooltip(event, `${{d.data.artist}}: ${{d.data.tracks}} tracks`))
            .on('mouseout', hideTooltip);
    }}

    function drawTopChart() {{
        const by = data.filter.top_by;
        horizontalBars('top-chart', data.top_tracks, d => `${{d.track_id}}. ${{d.track_name}}`, d => d[by], by);
    }}

    // Popularity against danceability, bubble size by volume
    function drawScatter() {{
        const {{ svg, width, height }} = frame('scatter-chart', 300);
        const x = d3.scaleLinear().domain([0, 1]).range([0, width]);
        const y = d3.scaleLinear().domain([d3.min(data.tracks, d => d.popularity) - 5, 100]).range([height, 0]);
        const r = d3.scaleSqrt().domain([0, d3.max(data.tracks, d => d.volume)]).range([2, 12]);
        const artists = data.available_artists;
        svg.append('g').call(d3.axisLeft(y)).selectAll('text').style('fill', '#7d8590');
        svg.append('g').attr('transform', `translate(0,${{height}})`).call(d3.axisBottom(x))
            .selectAll('text').style('fill', '#7d8590');
        svg.selectAll('circle').data(data.tracks).enter().append('circle')
            .attr('cx', d => x(d.danceability))
            .attr('cy', d => y(d.popularity))
            .attr('r', d => r(d.volume))
            .attr('fill', d => palette[artists.indexOf(d.artist) % palette.length])
            .attr('fill-opacity', 0.7)
            .on('mouseover', (event, d) => showTooltip(event, `${{d.track_name}} (${{d.artist}})`))
            .on('mouseout', hideTooltip);
    }}

    function drawHeatmap() {{
        const cols = data.correlation.columns;
        const {{ svg, width, height }} = frame('heatmap', 320);
        const size = Math.min(width, height);
        const band = d3.scaleBand().domain(cols).range([0, size]).padding(0.05);
        const color = d3.scaleSequential(d3.interpolateRdBu).domain([1, -1]);
        svg.append('g').call(d3.axisLeft(band)).selectAll('text').style('fill', '#7d8590');
        svg.append('g').attr('transform', `translate(0,${{size}})`).call(d3.axisBottom(band))
            .selectAll('text').style('fill', '#7d8590').attr('transform', 'rotate(-35)').style('text-anchor', 'end');
        data.correlation.values.forEach((row, i) => row.forEach((v, j) => {{
            svg.append('rect')
                .attr('x', band(cols[j])).attr('y', band(cols[i]))
                .attr('width', band.bandwidth()).attr('height', band.bandwidth())
                .attr('fill', v === null ? '#30363d' : color(v))
                .on('mouseover', event => showTooltip(event, `${{cols[i]}} / ${{cols[j]}}: ${{v === null ? 'n/a' : v.toFixed(2)}}`))
                .on('mouseout', hideTooltip);
        }}));
    }}

    // Mean audio features per artist
    function drawRadar() {{
        const axes = ['danceability', 'energy', 'valence', 'acousticness'];
        const size = 300, radius = 110;
        const svg = d3.select('#radar-chart').append('svg').attr('width', size).attr('height', size)
            .append('g').attr('transform', `translate(${{size/2}},${{size/2}})`);
        const angle = i => (Math.PI * 2 * i) / axes.length;
        axes.forEach((a, i) => {{
            svg.append('line').attr('x1', 0).attr('y1', 0)
                .attr('x2', radius * Math.sin(angle(i))).attr('y2', -radius * Math.cos(angle(i)))
                .attr('stroke', '#30363d');
            svg.append('text').attr('x', (radius + 12) * Math.sin(angle(i))).attr('y', -(radius + 12) * Math.cos(angle(i)))
                .attr('text-anchor', 'middle').style('fill', '#7d8590').style('font-size', '0.75rem').text(a);
        }});
        const line = d3.lineRadial().angle((d, i) => angle(i)).radius(d => d * radius).curve(d3.curveLinearClosed);
        data.audio_profiles.forEach((p, i) => {{
            svg.append('path').datum(axes.map(a => p[a]))
                .attr('d', line)
                .attr('fill', palette[i % palette.length]).attr('fill-opacity', 0.15)
                .attr('stroke', palette[i % palette.length])
                .on('mouseover', event => showTooltip(event, p.artist))
                .on('mouseout', hideTooltip);
        }});
    }}

    if (data.tracks.length > 0) {{
        drawViewChart();
        drawShareChart();
        drawTopChart();
        drawScatter();
        drawHeatmap();
        drawRadar();
    }}
    </script>
</body>
</html>
"#,
        variant = report.variant,
        seed = report.seed,
        filtered = report.tracks.len(),
        base = report.base_rows,
        generated = html_escape(&report.generated),
        controls = controls(report),
        kpis = kpi_cards(&report.summary, report.variant),
        charts = charts,
        table = track_table(&report.tracks, report.variant),
        json_data = json_data
    )?;

    Ok(())
}

/// Five headline cards; means show a dash when there are no tracks
pub fn kpi_cards(summary: &Summary, variant: Variant) -> String {
    let volume_title = match variant {
        Variant::Charts => "Streams (M)",
        Variant::Library => "Plays",
    };
    let cards = [
        ("Tracks", summary.tracks.to_string()),
        ("Avg Popularity", fmt_mean(summary.mean_popularity, 0)),
        ("Avg Danceability", fmt_mean(summary.mean_danceability, 2)),
        ("Avg Energy", fmt_mean(summary.mean_energy, 2)),
        (volume_title, summary.total_volume.to_string()),
    ];

    let body: String = cards
        .iter()
        .map(|(label, value)| {
            format!(
                r#"<div class="stat"><div class="stat-value">{}</div><div class="stat-label">{}</div></div>"#,
                value, label
            )
        })
        .collect();
    format!(r#"<div class="stats">{}</div>"#, body)
}

/// Track table with the fixed column subset shown on the dashboard
pub fn track_table(tracks: &[TrackRecord], variant: Variant) -> String {
    if tracks.is_empty() {
        return format!(r#"<div class="table-container"><div class="placeholder">{}</div></div>"#, NO_DATA_MESSAGE);
    }

    let rows: String = tracks
        .iter()
        .map(|t| {
            format!(
                "<tr><td>{}</td><td>{}</td><td>{}</td><td class=\"mono\">{}</td><td class=\"mono\">{:.2}</td><td class=\"mono\">{:.2}</td><td class=\"mono\">{}</td></tr>",
                html_escape(&t.track_name),
                html_escape(&t.artist),
                html_escape(t.genre.name()),
                t.popularity,
                t.features.danceability,
                t.features.energy,
                t.volume
            )
        })
        .collect();

    format!(
        r#"<div class="table-container"><table><thead><tr><th>Track</th><th>Artist</th><th>Genre</th><th>Popularity</th><th>Danceability</th><th>Energy</th><th>{}</th></tr></thead><tbody>{}</tbody></table></div>"#,
        variant.volume_label(),
        rows
    )
}

/// Stand-in for a chart that has nothing to draw
pub fn chart_placeholder(title: &str) -> String {
    format!(
        r#"<div class="chart-card"><div class="chart-title">{}</div><div class="placeholder">{}</div></div>"#,
        html_escape(title),
        NO_DATA_MESSAGE
    )
}

const CHARTS: [(&str, &str); 6] = [
    ("Grouped View", "view-chart"),
    ("Tracks per Artist", "share-chart"),
    ("Top Tracks", "top-chart"),
    ("Popularity vs Danceability", "scatter-chart"),
    ("Correlation Matrix", "heatmap"),
    ("Audio Profile by Artist", "radar-chart"),
];

/// Columns offered for ranking the top-N chart
const RANKING_COLUMNS: [Column; 8] = [
    Column::Popularity,
    Column::Volume,
    Column::Danceability,
    Column::Energy,
    Column::Valence,
    Column::Acousticness,
    Column::Tempo,
    Column::DurationMs,
];

fn chart_grid() -> String {
    let cards: String = CHARTS
        .iter()
        .map(|(title, id)| {
            format!(r#"<div class="chart-card"><div class="chart-title">{}</div><div id="{}"></div></div>"#, title, id)
        })
        .collect();
    format!(r#"<div class="charts">{}</div>"#, cards)
}

fn placeholder_grid() -> String {
    let cards: String = CHARTS.iter().map(|(title, _)| chart_placeholder(title)).collect();
    format!(r#"<div class="charts">{}</div>"#, cards)
}

/// Filter form; submits back to `/` so the page is rebuilt from scratch
fn controls(report: &DashboardReport) -> String {
    let filter = &report.filter;

    let variants: String = [Variant::Charts, Variant::Library]
        .iter()
        .map(|v| option(&v.to_string(), &v.to_string(), *v == report.variant))
        .collect();

    let artists: String = report
        .available_artists
        .iter()
        .map(|a| option(a, a, filter.artists.contains(a)))
        .collect();

    let mut genres = option("all", "All genres", filter.genre == "all");
    for g in Genre::ALL {
        genres.push_str(&option(g.name(), g.name(), filter.genre == g.name()));
    }

    let modes: String = ["genre", "artist", "trend"]
        .iter()
        .map(|m| option(m, m, filter.mode.to_string() == *m))
        .collect();

    let columns: String = RANKING_COLUMNS
        .iter()
        .map(|c| option(c.name(), c.name(), *c == filter.top_by))
        .collect();

    format!(
        r#"<form class="controls" method="get" action="/">
                <label>Dataset</label><select name="variant">{variants}</select>
                <label>Artists</label><select name="artists" multiple size="8">{artists}</select>
                <label>Genre</label><select name="genre">{genres}</select>
                <label>Minimum popularity</label><input type="number" name="min_popularity" min="0" max="100" value="{min_pop}">
                <label>Analysis mode</label><select name="mode">{modes}</select>
                <label>Top N</label><input type="number" name="top" min="1" value="{top}">
                <label>Rank by</label><select name="by">{columns}</select>
                <label>Seed</label><input type="number" name="seed" min="0" placeholder="last: {seed}">
                <button type="submit">Update dashboard</button>
            </form>"#,
        variants = variants,
        artists = artists,
        genres = genres,
        min_pop = filter.min_popularity.map(|p| p.to_string()).unwrap_or_default(),
        modes = modes,
        top = filter.top_n,
        columns = columns,
        seed = report.seed,
    )
}

fn option(value: &str, label: &str, selected: bool) -> String {
    format!(
        r#"<option value="{}"{}>{}</option>"#,
        html_escape(value),
        if selected { " selected" } else { "" },
        html_escape(label)
    )
}

fn fmt_mean(value: Option<f64>, decimals: usize) -> String {
    match value {
        Some(v) => format!("{:.*}", decimals, v),
        None => "—".to_string(),
    }
}

pub fn html_escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}
