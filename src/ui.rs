pub fn render_dashboard(user_name: &str) -> String {
    DASHBOARD_HTML.replace("{{USER}}", user_name)
}

const DASHBOARD_HTML: &str = r#"<!DOCTYPE html>
<html lang="de">
<head>
  <meta charset="UTF-8" />
  <meta name="viewport" content="width=device-width, initial-scale=1.0" />
  <title>DealFlow Dashboard</title>
  <style>
    @import url('https://fonts.googleapis.com/css2?family=Space+Grotesk:wght@400;500;600&family=Fraunces:wght@600&display=swap');

    :root {
      --bg-1: #f1f5f9;
      --bg-2: #dbeafe;
      --ink: #0f172a;
      --accent: #3b82f6;
      --accent-2: #1e3a5f;
      --card: rgba(255, 255, 255, 0.92);
      --shadow: 0 24px 60px rgba(30, 58, 95, 0.14);
    }

    * {
      box-sizing: border-box;
    }

    body {
      margin: 0;
      min-height: 100vh;
      background: radial-gradient(circle at top, var(--bg-2), transparent 60%),
        linear-gradient(135deg, var(--bg-1), #e0ecff 60%, #f4f7fb 100%);
      color: var(--ink);
      font-family: "Space Grotesk", "Trebuchet MS", sans-serif;
      display: grid;
      place-items: start center;
      padding: 32px 18px 48px;
    }

    .app {
      width: min(1080px, 100%);
      background: var(--card);
      backdrop-filter: blur(12px);
      border-radius: 28px;
      box-shadow: var(--shadow);
      padding: 36px;
      display: grid;
      gap: 28px;
      animation: rise 600ms ease;
    }

    header {
      display: flex;
      flex-direction: column;
      gap: 6px;
    }

    h1 {
      font-family: "Fraunces", "Georgia", serif;
      font-weight: 600;
      font-size: clamp(1.8rem, 4vw, 2.6rem);
      margin: 0;
    }

    .subtitle {
      margin: 0;
      color: #55607a;
      font-size: 1rem;
    }

    .banner {
      display: none;
      background: #eff6ff;
      border-left: 4px solid var(--accent);
      border-radius: 12px;
      padding: 14px 18px;
      font-size: 0.95rem;
      color: #1e3a8a;
    }

    .panel {
      display: grid;
      grid-template-columns: repeat(auto-fit, minmax(180px, 1fr));
      gap: 16px;
    }

    .stat {
      background: white;
      border-radius: 18px;
      padding: 18px;
      border: 1px solid rgba(30, 58, 95, 0.08);
      display: grid;
      gap: 8px;
    }

    .stat .label {
      font-size: 0.85rem;
      text-transform: uppercase;
      letter-spacing: 0.12em;
      color: #7d8699;
    }

    .stat .value {
      font-size: 1.6rem;
      font-weight: 600;
      color: var(--accent-2);
    }

    .stat .value.risk {
      color: #dc2626;
    }

    .charts {
      display: grid;
      grid-template-columns: repeat(auto-fit, minmax(320px, 1fr));
      gap: 16px;
    }

    .chart-card {
      background: white;
      border-radius: 20px;
      padding: 18px;
      border: 1px solid rgba(30, 58, 95, 0.08);
      display: grid;
      gap: 10px;
    }

    .chart-card.wide {
      grid-column: 1 / -1;
    }

    .chart-card h2 {
      margin: 0;
      font-size: 1.15rem;
    }

    .chart-card svg {
      width: 100%;
      display: block;
    }

    .chart-card svg text {
      font-family: "Space Grotesk", "Trebuchet MS", sans-serif;
    }

    .chart-label {
      fill: #7a8296;
      font-size: 11px;
    }

    .chart-grid {
      stroke: rgba(30, 58, 95, 0.1);
    }

    .chart-line {
      fill: none;
      stroke: var(--accent);
      stroke-width: 2.5;
    }

    .chart-point {
      fill: var(--accent);
    }

    .legend {
      display: flex;
      flex-wrap: wrap;
      gap: 10px 16px;
      font-size: 0.85rem;
      color: #55607a;
    }

    .legend .swatch {
      display: inline-block;
      width: 10px;
      height: 10px;
      border-radius: 3px;
      margin-right: 6px;
    }

    .status {
      font-size: 0.95rem;
      color: #6b7285;
      min-height: 1.2em;
    }

    .status[data-type="error"] {
      color: #c0392b;
    }

    @keyframes rise {
      from {
        opacity: 0;
        transform: translateY(18px);
      }
      to {
        opacity: 1;
        transform: translateY(0);
      }
    }

    @media (max-width: 640px) {
      .app {
        padding: 28px 22px;
      }
    }
  </style>
</head>
<body>
  <main class="app">
    <header>
      <h1>DealFlow Dashboard</h1>
      <p class="subtitle">Angemeldet als {{USER}}. Pipeline, Deal Health und Velocity auf einen Blick.</p>
    </header>

    <div class="banner" id="weekly-summary"></div>

    <section class="panel">
      <div class="stat">
        <span class="label">Aktive Deals</span>
        <span class="value" id="stat-active">–</span>
      </div>
      <div class="stat">
        <span class="label">Pipeline Wert</span>
        <span class="value" id="stat-pipeline">–</span>
      </div>
      <div class="stat">
        <span class="label">Ø Health Score</span>
        <span class="value" id="stat-health">–</span>
      </div>
      <div class="stat">
        <span class="label">Gefährdeter Umsatz</span>
        <span class="value risk" id="stat-at-risk">–</span>
      </div>
    </section>

    <section class="charts">
      <div class="chart-card">
        <h2>Pipeline nach Stage</h2>
        <svg id="pipeline-chart" viewBox="0 0 480 280" role="img" aria-label="Pipeline nach Stage"></svg>
      </div>
      <div class="chart-card">
        <h2>Deal Health Verteilung</h2>
        <svg id="health-chart" viewBox="0 0 480 280" role="img" aria-label="Deal Health Verteilung"></svg>
        <div class="legend" id="health-legend"></div>
      </div>
      <div class="chart-card wide">
        <h2>Deal Velocity (Letzte 30 Tage)</h2>
        <svg id="velocity-chart" viewBox="0 0 960 240" role="img" aria-label="Deal Velocity"></svg>
      </div>
    </section>

    <div class="status" id="status"></div>
  </main>

  <script>
    const statusEl = document.getElementById('status');
    const pipelineEl = document.getElementById('pipeline-chart');
    const healthEl = document.getElementById('health-chart');
    const healthLegendEl = document.getElementById('health-legend');
    const velocityEl = document.getElementById('velocity-chart');

    const STAGE_COLORS = {
      lead: '#94a3b8',
      qualified: '#60a5fa',
      proposal: '#fbbf24',
      negotiation: '#f97316',
      closed_won: '#22c55e',
      closed_lost: '#ef4444'
    };

    const BAND_COLORS = {
      critical: '#ef4444',
      warning: '#f97316',
      good: '#fbbf24',
      excellent: '#22c55e'
    };

    const euro = new Intl.NumberFormat('de-DE', {
      style: 'currency',
      currency: 'EUR',
      minimumFractionDigits: 0,
      maximumFractionDigits: 0
    });

    const setStatus = (message, type) => {
      statusEl.textContent = message;
      statusEl.dataset.type = type || '';
    };

    const renderPipeline = (buckets) => {
      const width = 480;
      const height = 280;
      const paddingX = 30;
      const bottom = 60;
      const top = 24;

      const max = Math.max(1, ...buckets.map((bucket) => bucket.total_value));
      const barSpace = (width - paddingX * 2) / buckets.length;
      const barWidth = barSpace * 0.62;
      const scaleY = (height - top - bottom) / max;

      const bars = buckets
        .map((bucket, index) => {
          const barHeight = bucket.total_value * scaleY;
          const x = paddingX + index * barSpace + (barSpace - barWidth) / 2;
          const y = height - bottom - barHeight;
          const color = STAGE_COLORS[bucket.stage] || '#94a3b8';
          const label = `<text class="chart-label" x="${x + barWidth / 2}" y="${height - bottom + 16}" text-anchor="middle">${bucket.label}</text>`;
          const amount = `<text class="chart-label" x="${x + barWidth / 2}" y="${y - 6}" text-anchor="middle">${bucket.display_value}</text>`;
          return `<rect x="${x}" y="${y}" width="${barWidth}" height="${barHeight}" rx="6" fill="${color}" />${label}${amount}`;
        })
        .join('');

      pipelineEl.innerHTML = bars;
    };

    const renderHealth = (bands) => {
      const visible = bands.filter((band) => band.count > 0);
      if (!visible.length) {
        healthEl.innerHTML = '<text class="chart-label" x="50%" y="50%" text-anchor="middle">Keine Deals vorhanden</text>';
        healthLegendEl.innerHTML = '';
        return;
      }

      const total = visible.reduce((sum, band) => sum + band.count, 0);
      const cx = 240;
      const cy = 135;
      const radius = 92;
      let angle = -Math.PI / 2;

      const point = (theta) => `${(cx + radius * Math.cos(theta)).toFixed(2)} ${(cy + radius * Math.sin(theta)).toFixed(2)}`;

      const slices = visible
        .map((band) => {
          const sweep = (band.count / total) * Math.PI * 2;
          const color = BAND_COLORS[band.band] || '#94a3b8';
          if (visible.length === 1) {
            return `<circle cx="${cx}" cy="${cy}" r="${radius}" fill="${color}" />`;
          }
          const start = point(angle);
          angle += sweep;
          const end = point(angle);
          const largeArc = sweep > Math.PI ? 1 : 0;
          return `<path d="M ${cx} ${cy} L ${start} A ${radius} ${radius} 0 ${largeArc} 1 ${end} Z" fill="${color}" />`;
        })
        .join('');

      healthEl.innerHTML = slices;
      healthLegendEl.innerHTML = visible
        .map((band) => {
          const pct = Math.round((band.count / total) * 100);
          const color = BAND_COLORS[band.band] || '#94a3b8';
          return `<span><span class="swatch" style="background:${color}"></span>${band.label}: ${pct}%</span>`;
        })
        .join('');
    };

    const renderVelocity = (points) => {
      const width = 960;
      const height = 240;
      const paddingX = 40;
      const bottom = 34;
      const top = 20;

      const max = Math.max(1, ...points.map((pt) => pt.count));
      const xStep = points.length > 1 ? (width - paddingX * 2) / (points.length - 1) : 0;
      const scaleY = (height - top - bottom) / max;
      const x = (index) => paddingX + index * xStep;
      const y = (count) => height - bottom - count * scaleY;

      const path = points
        .map((pt, index) => `${index === 0 ? 'M' : 'L'} ${x(index).toFixed(2)} ${y(pt.count).toFixed(2)}`)
        .join(' ');

      let grid = '';
      for (let tick = 0; tick <= max; tick += Math.max(1, Math.ceil(max / 4))) {
        const yPos = y(tick);
        grid += `<line class="chart-grid" x1="${paddingX}" y1="${yPos}" x2="${width - paddingX}" y2="${yPos}" />`;
        grid += `<text class="chart-label" x="${paddingX - 8}" y="${yPos + 4}" text-anchor="end">${tick}</text>`;
      }

      const labelEvery = Math.ceil(points.length / 10);
      const labels = points
        .map((pt, index) => {
          if (index % labelEvery !== 0) {
            return '';
          }
          return `<text class="chart-label" x="${x(index)}" y="${height - bottom + 18}" text-anchor="middle">${pt.label}</text>`;
        })
        .join('');

      const dots = points
        .map((pt, index) => `<circle class="chart-point" cx="${x(index)}" cy="${y(pt.count)}" r="3" />`)
        .join('');

      velocityEl.innerHTML = `${grid}<path class="chart-line" d="${path}" />${dots}${labels}`;
    };

    const loadCharts = async () => {
      const res = await fetch('/api/charts');
      if (!res.ok) {
        throw new Error(await res.text() || 'Diagramme konnten nicht geladen werden');
      }
      const charts = await res.json();
      renderPipeline(charts.pipeline);
      renderHealth(charts.health);
      renderVelocity(charts.velocity);
    };

    const loadInsights = async () => {
      const res = await fetch('/api/insights');
      if (!res.ok) {
        throw new Error(await res.text() || 'Insights konnten nicht geladen werden');
      }
      const insights = await res.json();
      document.getElementById('stat-active').textContent = insights.summary.active_deals;
      document.getElementById('stat-pipeline').textContent = euro.format(insights.summary.pipeline_value);
      document.getElementById('stat-health').textContent = `${Math.round(insights.summary.average_health_score)}%`;
      document.getElementById('stat-at-risk').textContent = euro.format(insights.summary.revenue_at_risk);
      if (insights.weekly_summary) {
        const banner = document.getElementById('weekly-summary');
        banner.textContent = insights.weekly_summary;
        banner.style.display = 'block';
      }
    };

    const refresh = async () => {
      setStatus('Lade Daten...', '');
      await Promise.all([loadCharts(), loadInsights()]);
      setStatus('', '');
    };

    refresh().catch((err) => setStatus(err.message, 'error'));
    setInterval(() => {
      refresh().catch((err) => setStatus(err.message, 'error'));
    }, 60000);
  </script>
</body>
</html>
"#;
