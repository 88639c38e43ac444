//! Static HTML form for manual testing of `/predict`.

use std::fmt::Write;

use crate::features::domain::FeatureSchema;
use crate::inference::domain::ModelSummary;

const BINARY_HINT: &str = "1 = yes, 2 = no";
const ENCODED_HINT: &str = "Numeric code used in the original dataset";
const DEFAULT_HINT: &str = "Numeric value on the dataset's original scale";

/// Input hint shown under a field.
pub fn field_hint(name: &str) -> &'static str {
    match name {
        "Sex" => "1 = male, 2 = female",
        "Steroid" | "Antivirals" | "Fatigue" | "Malaise" | "Anorexia" | "Liver_Big"
        | "Liver_Firm" | "Spleen_Palpable" | "Spiders" | "Ascites" | "Varices"
        | "Histology" => BINARY_HINT,
        "Estado_Civil" | "Ciudad" => ENCODED_HINT,
        _ => DEFAULT_HINT,
    }
}

/// Render the form page listing every schema field.
pub fn render(schema: &FeatureSchema, summary: &ModelSummary) -> String {
    let mut fields = String::new();
    for raw in schema.iter() {
        let name = escape(raw);
        // Writing into a String cannot fail.
        let _ = write!(
            fields,
            r#"
        <div>
          <label for="{name}">{name}</label>
          <input id="{name}" name="{name}" type="number" step="any" required />
          <div class="help">{hint}</div>
        </div>"#,
            hint = escape(field_hint(raw)),
        );
    }

    let model = escape(&summary.modelo);
    let count = schema.len().to_string();
    fill(PAGE, |key| match key {
        "MODEL" => Some(model.as_str()),
        "COUNT" => Some(count.as_str()),
        "FIELDS" => Some(fields.as_str()),
        _ => None,
    })
}

// Single pass over the template, so substituted text is never rescanned.
fn fill<'a>(template: &str, lookup: impl Fn(&str) -> Option<&'a str>) -> String {
    let mut out = String::with_capacity(template.len());
    let mut rest = template;
    while let Some(start) = rest.find("{{") {
        out.push_str(&rest[..start]);
        let tail = &rest[start + 2..];
        let Some(end) = tail.find("}}") else {
            rest = &rest[start..];
            break;
        };
        let key = &tail[..end];
        match lookup(key) {
            Some(value) => out.push_str(value),
            None => {
                out.push_str("{{");
                out.push_str(key);
                out.push_str("}}");
            }
        }
        rest = &tail[end + 2..];
    }
    out.push_str(rest);
    out
}

fn escape(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for ch in input.chars() {
        match ch {
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

const PAGE: &str = r#"<!doctype html>
<html lang="en">
<head>
  <meta charset="utf-8" />
  <meta name="viewport" content="width=device-width, initial-scale=1" />
  <title>Hepatitis survival - {{MODEL}}</title>
  <style>
    body { margin: 0; font-family: "Segoe UI", "Helvetica Neue", Arial, sans-serif; background: #f8fafc; color: #0f172a; }
    header { padding: 24px 16px 12px; text-align: center; }
    h1 { margin: 0; font-size: 28px; }
    p.lead { margin: 4px 0 0; color: #475569; }
    main { max-width: 900px; margin: 0 auto; padding: 16px; display: grid; gap: 12px; grid-template-columns: repeat(auto-fit, minmax(260px, 1fr)); }
    section { background: #fff; border-radius: 12px; padding: 16px; box-shadow: 0 10px 30px rgba(15, 23, 42, 0.06); }
    form { display: grid; gap: 10px; }
    label { font-weight: 600; font-size: 14px; }
    input { width: 100%; padding: 10px 12px; border-radius: 10px; border: 1px solid #cbd5e1; background: #f8fafc; font-size: 14px; box-sizing: border-box; }
    .help { font-size: 12px; color: #64748b; margin-top: 2px; }
    button { padding: 12px 14px; background: #4f46e5; color: #fff; border: none; border-radius: 10px; font-weight: 700; cursor: pointer; }
    pre { background: #0f172a; color: #e2e8f0; padding: 12px; border-radius: 10px; font-size: 12px; overflow-x: auto; min-height: 120px; }
  </style>
</head>
<body>
  <header>
    <h1>Hepatitis survival prediction</h1>
    <p class="lead">Model: {{MODEL}} ({{COUNT}} features)</p>
    <p class="lead">Binary fields use the dataset's 1/2 coding; numeric fields use their original scale.</p>
  </header>
  <main>
    <section>
      <h2>Patient record</h2>
      <form id="predict-form">{{FIELDS}}
        <button type="submit">Predict</button>
      </form>
    </section>
    <section>
      <h2>Response</h2>
      <pre id="result">Pending...</pre>
    </section>
  </main>
  <script>
    const form = document.getElementById('predict-form');
    const resultEl = document.getElementById('result');
    form.addEventListener('submit', async (event) => {
      event.preventDefault();
      const entries = [...new FormData(form).entries()].map(([k, v]) => [k, v || null]);
      resultEl.textContent = 'Running...';
      try {
        const resp = await fetch('/predict', {
          method: 'POST',
          headers: { 'Content-Type': 'application/json' },
          body: JSON.stringify(Object.fromEntries(entries)),
        });
        resultEl.textContent = JSON.stringify(await resp.json(), null, 2);
      } catch (err) {
        resultEl.textContent = 'Error: ' + err;
      }
    });
  </script>
</body>
</html>
"#;
