pub fn render_index() -> &'static str {
    INDEX_HTML
}

const INDEX_HTML: &str = r#"<!DOCTYPE html>
<html lang="en">
<head>
  <meta charset="UTF-8" />
  <meta name="viewport" content="width=device-width, initial-scale=1.0" />
  <title>Habits</title>
  <style>
    @import url('https://fonts.googleapis.com/css2?family=Space+Grotesk:wght@400;500;600&family=Fraunces:wght@600&display=swap');

    :root {
      --bg-1: #f8f3e6;
      --bg-2: #d7e8d0;
      --ink: #2b2a28;
      --accent: #3a8f5f;
      --accent-2: #2f4858;
      --card: rgba(255, 255, 255, 0.86);
      --shadow: 0 24px 60px rgba(47, 72, 88, 0.18);
    }

    * {
      box-sizing: border-box;
    }

    body {
      margin: 0;
      min-height: 100vh;
      background: radial-gradient(circle at top, var(--bg-2), transparent 60%),
        linear-gradient(135deg, var(--bg-1), #eaf3e4 60%, #f9f2e9 100%);
      color: var(--ink);
      font-family: "Space Grotesk", "Trebuchet MS", sans-serif;
      display: grid;
      place-items: start center;
      padding: 32px 18px 48px;
    }

    .app {
      width: min(860px, 100%);
      background: var(--card);
      backdrop-filter: blur(12px);
      border-radius: 28px;
      box-shadow: var(--shadow);
      padding: 36px;
      display: grid;
      gap: 24px;
    }

    h1 {
      font-family: "Fraunces", "Georgia", serif;
      font-weight: 600;
      font-size: clamp(2rem, 4vw, 2.6rem);
      margin: 0;
    }

    .subtitle {
      margin: 0;
      color: #5f5c57;
      font-size: 1rem;
    }

    form.create {
      display: flex;
      flex-wrap: wrap;
      gap: 10px;
    }

    form.create input, form.create select {
      font: inherit;
      padding: 10px 14px;
      border-radius: 12px;
      border: 1px solid rgba(47, 72, 88, 0.2);
    }

    form.create input[name="title"] {
      flex: 1;
      min-width: 180px;
    }

    form.create input[name="count"] {
      width: 80px;
    }

    button {
      appearance: none;
      border: none;
      border-radius: 999px;
      padding: 10px 16px;
      font-size: 0.95rem;
      font-weight: 600;
      cursor: pointer;
      background: var(--accent-2);
      color: white;
    }

    button:active {
      transform: scale(0.98);
    }

    .habit {
      background: white;
      border-radius: 18px;
      padding: 18px;
      border: 1px solid rgba(47, 72, 88, 0.08);
      display: grid;
      gap: 10px;
    }

    .habit .row {
      display: flex;
      align-items: center;
      justify-content: space-between;
      gap: 10px;
    }

    .habit h2 {
      margin: 0;
      font-size: 1.15rem;
    }

    .habit .meta {
      color: #8b857d;
      font-size: 0.85rem;
    }

    .habit.complete h2 { color: var(--accent); }
    .habit.untouched h2 { color: #8b857d; }

    .bar {
      height: 10px;
      border-radius: 999px;
      background: rgba(47, 72, 88, 0.1);
      overflow: hidden;
    }

    .bar .fill {
      height: 100%;
      background: var(--accent);
      transition: width 200ms ease;
    }

    .controls {
      display: flex;
      gap: 8px;
    }

    .controls .undo {
      background: transparent;
      color: #8b857d;
      border: 1px solid rgba(47, 72, 88, 0.2);
    }

    .heatmap {
      display: flex;
      gap: 3px;
      flex-wrap: wrap;
    }

    .heatmap .cell {
      width: 12px;
      height: 12px;
      border-radius: 3px;
      background: rgba(47, 72, 88, 0.08);
    }

    .status {
      font-size: 0.95rem;
      color: #6b645d;
      min-height: 1.2em;
    }

    .status[data-type="error"] {
      color: #c63b2b;
    }
  </style>
</head>
<body>
  <main class="app">
    <header>
      <h1>Habits</h1>
      <p class="subtitle">Daily, weekly, and monthly goals with a permanent completion log.</p>
    </header>

    <form class="create" id="create-form">
      <input name="title" placeholder="New habit" required />
      <input name="count" type="number" min="1" max="100" value="1" required />
      <select name="unit">
        <option value="daily">per day</option>
        <option value="weekly">per week</option>
        <option value="monthly">per month</option>
      </select>
      <button type="submit">Add</button>
    </form>

    <section id="habits"></section>

    <div class="status" id="status"></div>
  </main>

  <script>
    const habitsEl = document.getElementById('habits');
    const statusEl = document.getElementById('status');
    const form = document.getElementById('create-form');

    const setStatus = (message, type) => {
      statusEl.textContent = message;
      statusEl.dataset.type = type || '';
    };

    const api = async (path, options) => {
      const res = await fetch(path, options);
      if (!res.ok) {
        throw new Error(await res.text() || 'Request failed');
      }
      return res.status === 204 ? null : res.json();
    };

    const intensityColor = (value) =>
      value === 0 ? 'rgba(47, 72, 88, 0.08)' : `rgba(58, 143, 95, ${value})`;

    const renderHeatmap = async (habit, container) => {
      const map = await api(`/api/habits/${habit.id}/heatmap?days=30`);
      container.innerHTML = map.days
        .map((day) => `<span class="cell" title="${day.date}: ${day.count}" style="background:${intensityColor(day.intensity)}"></span>`)
        .join('');
    };

    const renderHabit = (habit) => {
      const card = document.createElement('article');
      card.className = `habit ${habit.status.replace('_', '-')}`;
      const pct = Math.min(habit.progress, 1) * 100;
      card.innerHTML = `
        <div class="row">
          <div>
            <h2>${habit.title}</h2>
            <span class="meta">${habit.current_count} / ${habit.frequency_count} this cycle (${habit.frequency_unit}) &middot; ${habit.total_count} lifetime</span>
          </div>
          <div class="controls">
            <button data-op="increment">+1</button>
            <button data-op="decrement">-1</button>
            <button data-op="reset" class="undo">undo cycle</button>
          </div>
        </div>
        <div class="bar"><div class="fill" style="width:${pct}%"></div></div>
        <div class="heatmap"></div>
      `;
      card.querySelectorAll('button').forEach((btn) => {
        btn.addEventListener('click', async () => {
          try {
            const updated = await api(`/api/habits/${habit.id}/${btn.dataset.op}`, { method: 'POST' });
            if (updated.just_completed) {
              setStatus(`${habit.title} done for this cycle!`, 'ok');
            }
            await refresh();
          } catch (err) {
            setStatus(err.message, 'error');
          }
        });
      });
      renderHeatmap(habit, card.querySelector('.heatmap')).catch(() => {});
      return card;
    };

    const refresh = async () => {
      const list = await api('/api/habits');
      habitsEl.replaceChildren(...list.habits.map(renderHabit));
    };

    form.addEventListener('submit', (event) => {
      event.preventDefault();
      const fields = new FormData(form);
      api('/api/habits', {
        method: 'POST',
        headers: { 'content-type': 'application/json' },
        body: JSON.stringify({
          title: fields.get('title'),
          frequency_count: Number(fields.get('count')),
          frequency_unit: fields.get('unit')
        })
      })
        .then(() => { form.reset(); return refresh(); })
        .catch((err) => setStatus(err.message, 'error'));
    });

    // Treat page load as a foreground event so stale cycles reset first.
    api('/api/foreground', { method: 'POST' })
      .catch(() => {})
      .then(refresh)
      .catch((err) => setStatus(err.message, 'error'));
  </script>
</body>
</html>
"#;
