use crate::models::DailyLog;

pub fn render_index(log: &DailyLog) -> String {
    INDEX_HTML
        .replace("{{DATE}}", &log.date)
        .replace("{{SCORE}}", &format!("{:.1}", log.score))
}

const INDEX_HTML: &str = r#"<!DOCTYPE html>
<html lang="en">
<head>
  <meta charset="UTF-8" />
  <meta name="viewport" content="width=device-width, initial-scale=1.0" />
  <title>Habit Journal</title>
  <style>
    @import url('https://fonts.googleapis.com/css2?family=Space+Grotesk:wght@400;500;600&family=Fraunces:wght@600&display=swap');

    :root {
      --bg-1: #0b0b0d;
      --bg-2: #16161c;
      --ink: #ece9e2;
      --muted: #8b877e;
      --accent: #ff6b4a;
      --accent-soft: rgba(255, 107, 74, 0.14);
      --good: #4cc38a;
      --warn: #e5b567;
      --card: #131318;
      --line: rgba(236, 233, 226, 0.08);
      --shadow: 0 24px 60px rgba(0, 0, 0, 0.5);
    }

    * {
      box-sizing: border-box;
    }

    body {
      margin: 0;
      min-height: 100vh;
      background: radial-gradient(circle at top, var(--bg-2), transparent 55%), var(--bg-1);
      color: var(--ink);
      font-family: "Space Grotesk", "Trebuchet MS", sans-serif;
      display: grid;
      place-items: start center;
      padding: 32px 18px 48px;
    }

    .app {
      width: min(1080px, 100%);
      display: grid;
      gap: 24px;
    }

    header {
      display: flex;
      flex-wrap: wrap;
      align-items: flex-end;
      justify-content: space-between;
      gap: 16px;
    }

    h1 {
      font-family: "Fraunces", "Georgia", serif;
      font-weight: 600;
      font-size: clamp(1.9rem, 4vw, 2.6rem);
      margin: 0;
    }

    h2 {
      margin: 0 0 14px;
      font-size: 1.15rem;
    }

    .subtitle {
      margin: 4px 0 0;
      color: var(--muted);
      font-size: 0.95rem;
    }

    input[type="date"] {
      background: var(--card);
      border: 1px solid var(--line);
      border-radius: 14px;
      color: var(--accent);
      padding: 10px 14px;
      font: inherit;
      font-weight: 600;
    }

    .card {
      background: var(--card);
      border: 1px solid var(--line);
      border-radius: 22px;
      box-shadow: var(--shadow);
      padding: 24px;
    }

    .label {
      display: block;
      font-size: 0.72rem;
      text-transform: uppercase;
      letter-spacing: 0.14em;
      color: var(--muted);
      margin-bottom: 6px;
    }

    .label.good { color: var(--good); }
    .label.warn { color: var(--warn); }

    .value {
      font-size: 1.6rem;
      font-weight: 600;
    }

    .chart-header {
      display: flex;
      flex-wrap: wrap;
      justify-content: space-between;
      align-items: flex-start;
      gap: 16px;
      margin-bottom: 16px;
    }

    .score-line {
      margin: 0;
      font-size: 1.5rem;
      font-weight: 600;
    }

    .score-line .value {
      color: var(--accent);
    }

    .cycle {
      text-align: right;
    }

    .cycle p {
      margin: 0;
      font-weight: 600;
      text-transform: uppercase;
    }

    #chart {
      width: 100%;
      height: 240px;
      display: block;
    }

    #chart text {
      font-family: "Space Grotesk", "Trebuchet MS", sans-serif;
    }

    .chart-line {
      fill: none;
      stroke: var(--accent);
      stroke-width: 2.5;
    }

    .chart-area {
      fill: var(--accent-soft);
      stroke: none;
    }

    .chart-point {
      fill: var(--card);
      stroke: var(--accent);
      stroke-width: 2;
    }

    .chart-grid {
      stroke: var(--line);
    }

    .chart-label {
      fill: var(--muted);
      font-size: 10px;
    }

    .chart-metrics {
      display: grid;
      grid-template-columns: repeat(auto-fit, minmax(160px, 1fr));
      gap: 14px;
      margin-top: 14px;
    }

    .stat {
      background: var(--bg-1);
      border: 1px solid var(--line);
      border-radius: 16px;
      padding: 14px;
    }

    .columns {
      display: grid;
      grid-template-columns: 3fr 2fr;
      gap: 24px;
      align-items: start;
    }

    .pickers {
      display: grid;
      grid-template-columns: 1fr 1fr;
      gap: 16px;
      margin-bottom: 18px;
    }

    .picker {
      display: flex;
      gap: 4px;
      background: var(--bg-1);
      border: 1px solid var(--line);
      border-radius: 16px;
      padding: 6px;
    }

    .picker .grade {
      flex: 1;
      background: transparent;
      border: none;
      border-radius: 12px;
      padding: 8px 0;
      font-size: 1.4rem;
      cursor: pointer;
      opacity: 0.25;
      transition: opacity 150ms ease, background 150ms ease;
    }

    .picker .grade:hover {
      opacity: 1;
    }

    .picker .grade.active {
      opacity: 1;
      background: var(--accent-soft);
    }

    textarea {
      width: 100%;
      min-height: 220px;
      resize: vertical;
      background: var(--bg-1);
      border: 1px solid var(--line);
      border-radius: 16px;
      color: var(--ink);
      font: inherit;
      line-height: 1.5;
      padding: 14px;
    }

    textarea:focus {
      outline: none;
      border-color: rgba(255, 107, 74, 0.4);
    }

    button {
      font: inherit;
      cursor: pointer;
    }

    .btn-primary {
      margin-top: 14px;
      width: 100%;
      border: none;
      border-radius: 999px;
      padding: 14px 20px;
      font-weight: 600;
      background: var(--accent);
      color: #16100d;
      box-shadow: 0 10px 24px rgba(255, 107, 74, 0.25);
      transition: transform 150ms ease;
    }

    .btn-primary:active {
      transform: scale(0.98);
    }

    .btn-ghost {
      background: transparent;
      border: none;
      color: var(--muted);
      font-size: 0.75rem;
      text-transform: uppercase;
      letter-spacing: 0.1em;
    }

    .btn-ghost:hover {
      color: var(--ink);
    }

    .habit-list {
      display: grid;
      gap: 10px;
    }

    .habit {
      display: flex;
      align-items: center;
      gap: 12px;
      background: var(--bg-1);
      border: 1px solid var(--line);
      border-radius: 16px;
      padding: 12px 14px;
      cursor: pointer;
      transition: border-color 150ms ease;
    }

    .habit:hover {
      border-color: rgba(255, 107, 74, 0.35);
    }

    .habit.done {
      background: var(--accent-soft);
      border-color: rgba(255, 107, 74, 0.35);
    }

    .habit input {
      width: 18px;
      height: 18px;
      accent-color: var(--accent);
    }

    .habit-title {
      font-weight: 600;
      font-size: 0.95rem;
    }

    .habit-meta {
      font-size: 0.72rem;
      text-transform: uppercase;
      letter-spacing: 0.08em;
      color: var(--muted);
      margin-top: 2px;
    }

    .habit.done .habit-meta {
      color: var(--accent);
    }

    .periods {
      display: grid;
      grid-template-columns: repeat(auto-fit, minmax(120px, 1fr));
      gap: 10px;
      margin-top: 8px;
    }

    .period {
      background: var(--bg-1);
      border: 1px solid var(--line);
      border-radius: 14px;
      padding: 10px 0;
      color: var(--muted);
      font-size: 0.78rem;
      font-weight: 600;
      text-transform: uppercase;
      letter-spacing: 0.08em;
      transition: color 150ms ease, border-color 150ms ease;
    }

    .period:hover {
      color: var(--accent);
      border-color: rgba(255, 107, 74, 0.4);
    }

    .loading {
      margin-top: 14px;
      color: var(--accent);
      font-weight: 600;
      font-size: 0.85rem;
      text-transform: uppercase;
      letter-spacing: 0.1em;
    }

    .report-head {
      display: flex;
      justify-content: space-between;
      align-items: flex-start;
      border-bottom: 1px solid var(--line);
      padding-bottom: 16px;
      margin: 14px 0 16px;
    }

    .report-score {
      font-size: 3.6rem;
      font-weight: 600;
      line-height: 1;
    }

    .report-performance {
      margin: 0 0 16px;
      font-size: 1.1rem;
      line-height: 1.5;
    }

    .report-columns {
      display: grid;
      grid-template-columns: 1fr 1fr;
      gap: 14px;
      margin-bottom: 16px;
    }

    .report-box {
      background: var(--bg-1);
      border: 1px solid var(--line);
      border-radius: 16px;
      padding: 14px;
    }

    .report-box ul {
      margin: 0;
      padding-left: 18px;
      color: var(--muted);
      font-size: 0.9rem;
      line-height: 1.6;
    }

    .report-plan {
      background: var(--accent);
      border-radius: 18px;
      padding: 18px;
      color: #16100d;
    }

    .report-plan .label {
      color: rgba(22, 16, 13, 0.6);
    }

    .report-plan p {
      margin: 0;
      font-weight: 600;
      font-size: 1.05rem;
      line-height: 1.45;
    }

    .status {
      font-size: 0.9rem;
      color: var(--muted);
      min-height: 1.2em;
    }

    .status[data-type="error"] {
      color: #e0604c;
    }

    .status[data-type="ok"] {
      color: var(--good);
    }

    @media (max-width: 760px) {
      .columns,
      .report-columns,
      .pickers {
        grid-template-columns: 1fr;
      }
    }
  </style>
</head>
<body>
  <main class="app">
    <header>
      <div>
        <h1>Habit Journal</h1>
        <p class="subtitle">Daily habits, mood and notes, with a performance score per day.</p>
      </div>
      <input type="date" id="date-input" value="{{DATE}}" />
    </header>

    <section class="card">
      <div class="chart-header">
        <div>
          <span class="label">Daily status</span>
          <p class="score-line">My performance <span id="score" class="value">{{SCORE}}</span></p>
        </div>
        <div class="cycle">
          <span class="label">Monthly cycle</span>
          <p><span id="month"></span> &mdash; <span id="cycle"></span></p>
        </div>
      </div>
      <svg id="chart" viewBox="0 0 640 240" role="img" aria-label="Score for each day of the month"></svg>
      <div class="chart-metrics">
        <div class="stat">
          <span class="label">Average score</span>
          <span id="avg" class="value">0</span>
        </div>
        <div class="stat">
          <span class="label">Recorded days</span>
          <span id="recorded" class="value">0</span>
        </div>
      </div>
    </section>

    <div class="columns">
      <section class="card">
        <h2>&#128212; Journal</h2>
        <div class="pickers">
          <div>
            <span class="label">Mood</span>
            <div class="picker" id="mood-picker"></div>
          </div>
          <div>
            <span class="label">Weather</span>
            <div class="picker" id="weather-picker"></div>
          </div>
        </div>
        <label class="label" for="notes">Reflections and plans</label>
        <textarea id="notes" placeholder="Plans and thoughts..."></textarea>
        <button id="save-btn" class="btn-primary" type="button">Save entry</button>
      </section>

      <section class="card">
        <h2>Daily habits</h2>
        <div id="habit-list" class="habit-list"></div>
      </section>
    </div>

    <section class="card">
      <h2>Evolution report</h2>
      <p class="subtitle">A coaching take on your performance, based on your journal.</p>
      <button id="report-btn" class="btn-primary" type="button">Generate report</button>
      <div id="periods" class="periods" hidden>
        <button class="period" type="button" data-period="weekly">Weekly</button>
        <button class="period" type="button" data-period="biweekly">Biweekly</button>
        <button class="period" type="button" data-period="monthly">Monthly</button>
        <button class="period" type="button" data-period="quarterly">Quarterly</button>
        <button class="period" type="button" data-period="biannual">Biannual</button>
        <button class="period" type="button" data-period="annual">Annual</button>
      </div>
      <div id="report-loading" class="loading" hidden>Analyzing your history...</div>
      <div id="report" hidden>
        <div class="report-head">
          <div>
            <span class="label">Final score</span>
            <div id="report-score" class="report-score"></div>
          </div>
          <button id="close-report" type="button" class="btn-ghost">Close</button>
        </div>
        <div>
          <span class="label">My performance</span>
          <p id="report-performance" class="report-performance"></p>
        </div>
        <div class="report-columns">
          <div class="report-box">
            <span class="label good">Highlights</span>
            <ul id="report-positives"></ul>
          </div>
          <div class="report-box">
            <span class="label warn">Where to improve</span>
            <ul id="report-improve"></ul>
          </div>
        </div>
        <div class="report-plan">
          <span class="label">Action plan</span>
          <p id="report-alternatives"></p>
        </div>
      </div>
    </section>

    <div class="status" id="status"></div>
  </main>

  <script>
    const dateInput = document.getElementById('date-input');
    const scoreEl = document.getElementById('score');
    const monthEl = document.getElementById('month');
    const cycleEl = document.getElementById('cycle');
    const avgEl = document.getElementById('avg');
    const recordedEl = document.getElementById('recorded');
    const chartEl = document.getElementById('chart');
    const notesEl = document.getElementById('notes');
    const saveBtn = document.getElementById('save-btn');
    const habitListEl = document.getElementById('habit-list');
    const statusEl = document.getElementById('status');
    const reportBtn = document.getElementById('report-btn');
    const periodsEl = document.getElementById('periods');
    const loadingEl = document.getElementById('report-loading');
    const reportEl = document.getElementById('report');
    const reportScoreEl = document.getElementById('report-score');
    const performanceEl = document.getElementById('report-performance');
    const positivesEl = document.getElementById('report-positives');
    const improveEl = document.getElementById('report-improve');
    const alternativesEl = document.getElementById('report-alternatives');
    const closeReportBtn = document.getElementById('close-report');

    const MOOD_EMOJIS = ['😢', '😕', '😐', '🙂', '😁'];
    const WEATHER_EMOJIS = ['⛈️', '🌧️', '☁️', '⛅', '☀️'];

    let currentDate = dateInput.value;

    const setStatus = (message, type) => {
      statusEl.textContent = message;
      statusEl.dataset.type = type || '';
    };

    const flashSaved = () => {
      setStatus('Saved', 'ok');
      setTimeout(() => setStatus('', ''), 1200);
    };

    const buildPicker = (container, emojis, field) => {
      emojis.forEach((emoji, index) => {
        const button = document.createElement('button');
        button.type = 'button';
        button.className = 'grade';
        button.textContent = emoji;
        button.dataset.level = index + 1;
        button.addEventListener('click', () => {
          updateJournal({ [field]: index + 1 }).catch((err) => setStatus(err.message, 'error'));
        });
        container.appendChild(button);
      });
    };

    const setGrade = (field, level) => {
      document.querySelectorAll('#' + field + '-picker .grade').forEach((button) => {
        button.classList.toggle('active', Number(button.dataset.level) === level);
      });
    };

    const applyLog = (log) => {
      scoreEl.textContent = log.score.toFixed(1);
      setGrade('mood', log.mood);
      setGrade('weather', log.weather);
    };

    const loadLog = async () => {
      const res = await fetch('/api/log/' + currentDate);
      if (!res.ok) {
        throw new Error('Unable to load the daily log');
      }
      const log = await res.json();
      applyLog(log);
      notesEl.value = log.notes;
    };

    const loadHabits = async () => {
      const res = await fetch('/api/habits?date=' + currentDate);
      if (!res.ok) {
        throw new Error('Unable to load habits');
      }
      renderHabits((await res.json()).habits);
    };

    const renderHabits = (habits) => {
      habitListEl.innerHTML = '';
      habits.forEach((habit) => {
        const row = document.createElement('label');
        row.className = 'habit' + (habit.done ? ' done' : '');
        const checkbox = document.createElement('input');
        checkbox.type = 'checkbox';
        checkbox.checked = habit.done;
        checkbox.addEventListener('change', () => {
          toggleHabit(habit.id, checkbox.checked).catch((err) => setStatus(err.message, 'error'));
        });
        const body = document.createElement('div');
        const title = document.createElement('div');
        title.className = 'habit-title';
        title.textContent = habit.icon + ' ' + habit.label;
        const meta = document.createElement('div');
        meta.className = 'habit-meta';
        const days = habit.frequency === 1 ? 'day' : 'days';
        meta.textContent = 'Streak ' + habit.streak + ' · ' + habit.frequency + ' ' + days + ' total';
        body.append(title, meta);
        row.append(checkbox, body);
        habitListEl.appendChild(row);
      });
    };

    const toggleHabit = async (habit, done) => {
      setStatus('Saving...', 'info');
      const res = await fetch('/api/log/' + currentDate + '/habit', {
        method: 'POST',
        headers: { 'content-type': 'application/json' },
        body: JSON.stringify({ habit, done })
      });
      if (!res.ok) {
        throw new Error((await res.text()) || 'Save failed');
      }
      applyLog(await res.json());
      await Promise.all([loadHabits(), loadChart()]);
      flashSaved();
    };

    const updateJournal = async (fields) => {
      setStatus('Saving...', 'info');
      const res = await fetch('/api/log/' + currentDate + '/journal', {
        method: 'POST',
        headers: { 'content-type': 'application/json' },
        body: JSON.stringify(fields)
      });
      if (!res.ok) {
        throw new Error((await res.text()) || 'Save failed');
      }
      applyLog(await res.json());
      flashSaved();
    };

    const loadChart = async () => {
      const res = await fetch('/api/chart?date=' + currentDate);
      if (!res.ok) {
        throw new Error('Unable to load chart');
      }
      renderChart(await res.json());
    };

    const renderChart = (chart) => {
      monthEl.textContent = chart.month;
      cycleEl.textContent = chart.days_in_month + ' days';
      avgEl.textContent = chart.average_score.toFixed(1);
      recordedEl.textContent = chart.recorded_days;

      const width = 640;
      const height = 240;
      const paddingX = 36;
      const paddingY = 28;
      const top = 16;
      const points = chart.points;

      const xStep = points.length > 1 ? (width - paddingX * 2) / (points.length - 1) : 0;
      const x = (index) => paddingX + index * xStep;
      const y = (value) => height - paddingY - (value / 10) * (height - top - paddingY);

      let grid = '';
      [0, 5, 10].forEach((value) => {
        const yPos = y(value);
        grid += `<line class="chart-grid" x1="${paddingX}" y1="${yPos}" x2="${width - paddingX}" y2="${yPos}" />`;
        grid += `<text class="chart-label" x="${paddingX - 8}" y="${yPos + 4}" text-anchor="end">${value}</text>`;
      });

      const line = points
        .map((point, index) => `${index === 0 ? 'M' : 'L'} ${x(index).toFixed(2)} ${y(point.score).toFixed(2)}`)
        .join(' ');
      const area = `${line} L ${x(points.length - 1).toFixed(2)} ${y(0).toFixed(2)} L ${x(0).toFixed(2)} ${y(0).toFixed(2)} Z`;

      const labelEvery = points.length > 14 ? 3 : 1;
      const xLabels = points
        .map((point, index) => {
          if (index % labelEvery !== 0) {
            return '';
          }
          return `<text class="chart-label" x="${x(index)}" y="${height - paddingY + 16}" text-anchor="middle">${point.day}</text>`;
        })
        .join('');

      const dots = points
        .map((point, index) => point.score > 0
          ? `<circle class="chart-point" cx="${x(index)}" cy="${y(point.score)}" r="3" />`
          : '')
        .join('');

      chartEl.innerHTML = `
        ${grid}
        <path class="chart-area" d="${area}" />
        <path class="chart-line" d="${line}" />
        ${dots}
        ${xLabels}
      `;
    };

    const loadAll = async () => {
      await Promise.all([loadLog(), loadHabits(), loadChart()]);
    };

    const generateReport = async (period) => {
      periodsEl.hidden = true;
      loadingEl.hidden = false;
      reportEl.hidden = true;
      try {
        const res = await fetch('/api/report', {
          method: 'POST',
          headers: { 'content-type': 'application/json' },
          body: JSON.stringify({ period })
        });
        if (res.status === 409) {
          throw new Error('A report is already being generated');
        }
        if (!res.ok) {
          throw new Error((await res.text()) || 'Report request failed');
        }
        const report = await res.json();
        if (!report) {
          setStatus('No report available: record a few days and make sure the analysis service is configured', 'error');
          reportBtn.hidden = false;
          return;
        }
        renderReport(report);
      } catch (err) {
        setStatus(err.message, 'error');
        reportBtn.hidden = false;
      } finally {
        loadingEl.hidden = true;
      }
    };

    const renderReport = (report) => {
      reportScoreEl.textContent = Math.round(report.score);
      performanceEl.textContent = report.performance;
      positivesEl.innerHTML = '';
      report.positives.forEach((item) => {
        const li = document.createElement('li');
        li.textContent = item;
        positivesEl.appendChild(li);
      });
      improveEl.innerHTML = '';
      report.toImprove.forEach((item) => {
        const li = document.createElement('li');
        li.textContent = item;
        improveEl.appendChild(li);
      });
      alternativesEl.textContent = report.alternatives;
      reportEl.hidden = false;
    };

    buildPicker(document.getElementById('mood-picker'), MOOD_EMOJIS, 'mood');
    buildPicker(document.getElementById('weather-picker'), WEATHER_EMOJIS, 'weather');

    dateInput.addEventListener('change', () => {
      if (!dateInput.value) {
        return;
      }
      currentDate = dateInput.value;
      loadAll().catch((err) => setStatus(err.message, 'error'));
    });

    let notesTimer = null;
    notesEl.addEventListener('input', () => {
      clearTimeout(notesTimer);
      notesTimer = setTimeout(() => {
        updateJournal({ notes: notesEl.value }).catch((err) => setStatus(err.message, 'error'));
      }, 600);
    });

    saveBtn.addEventListener('click', () => {
      clearTimeout(notesTimer);
      updateJournal({ notes: notesEl.value }).catch((err) => setStatus(err.message, 'error'));
    });

    reportBtn.addEventListener('click', () => {
      reportBtn.hidden = true;
      periodsEl.hidden = false;
    });

    document.querySelectorAll('.period').forEach((button) => {
      button.addEventListener('click', () => generateReport(button.dataset.period));
    });

    closeReportBtn.addEventListener('click', () => {
      reportEl.hidden = true;
      reportBtn.hidden = false;
    });

    loadAll().catch((err) => setStatus(err.message, 'error'));
  </script>
</body>
</html>
"#;
