//! Embedded HTML for the attraction page.
//!
//! The templates are `&'static str` so the binary needs no asset directory.
//! Placeholders of the form `{{name}}` are substituted by `presentation`.

/// Escape text for use inside HTML element content or attribute values.
pub fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

/// Make serialized JSON safe to place inside a `<script>` element.
pub fn escape_script_json(json: &str) -> String {
    json.replace("</", "<\\/")
}

pub const PAGE_HTML: &str = r#"<!doctype html>
<html lang="en">

<head>
  <meta charset="UTF-8" />
  <meta name="viewport" content="width=device-width, initial-scale=1.0" />
  <title>{{title}}</title>

  <!-- Leaflet 1.9.4 -->
  <link rel="stylesheet" href="https://cdnjs.cloudflare.com/ajax/libs/leaflet/1.9.4/leaflet.css" crossorigin="anonymous" />
  <script src="https://cdnjs.cloudflare.com/ajax/libs/leaflet/1.9.4/leaflet.js" crossorigin="anonymous"></script>

  <!-- Leaflet.awesome-markers 2.0.2 -->
  <link rel="stylesheet" href="https://cdnjs.cloudflare.com/ajax/libs/Leaflet.awesome-markers/2.0.2/leaflet.awesome-markers.css" />
  <script src="https://cdnjs.cloudflare.com/ajax/libs/Leaflet.awesome-markers/2.0.2/leaflet.awesome-markers.js"></script>
  <link rel="stylesheet" href="https://netdna.bootstrapcdn.com/bootstrap/3.0.0/css/bootstrap-glyphicons.css" />

  <style>
    body { font-family: "Source Sans Pro", system-ui, sans-serif; margin: 0; padding: 1.5rem 3rem; color: #31333f; }
    h1 { font-size: 2.5rem; margin: 0 0 0.5rem; }
    h3 { font-size: 1.4rem; margin: 1.5rem 0 0.5rem; }
    .columns { display: flex; gap: 2rem; align-items: flex-start; }
    .col-map { flex: 7 1 0; }
    .col-stats { flex: 3 1 0; }
    .metric { margin-bottom: 1rem; }
    .metric-label { font-size: 0.9rem; }
    .metric-value { font-size: 2.25rem; }
  </style>
</head>

<body>
  <h1>{{heading}}</h1>
  <p>{{description}}</p>

  <div class="columns">
    <div class="col-map">
      <div id="map" style="width: {{width}}px; height: {{height}}px;"></div>
    </div>
    <div class="col-stats">
{{statistics}}
    </div>
  </div>

  <script type="application/json" id="map-data">{{map_json}}</script>
  <script>
    (function () {
      const view = JSON.parse(document.getElementById('map-data').textContent);
      const map = L.map('map').setView(view.center, view.zoom);
      L.tileLayer('https://tile.openstreetmap.org/{z}/{x}/{y}.png', {
        maxZoom: 19,
        attribution: '&copy; OpenStreetMap contributors'
      }).addTo(map);

      const overlays = {};
      for (const layer of view.layers) {
        const group = L.featureGroup();
        for (const m of layer.markers) {
          L.marker([m.lat, m.lon], {
            icon: L.AwesomeMarkers.icon({ icon: 'info-sign', prefix: 'glyphicon', markerColor: m.color })
          })
            .bindPopup(m.popup)
            .bindTooltip(m.tooltip)
            .addTo(group);
        }
        group.addTo(map);
        overlays[layer.name] = group;
      }
      L.control.layers(null, overlays).addTo(map);
    })();
  </script>
</body>

</html>
"#;

pub const ERROR_HTML: &str = r#"<!doctype html>
<html lang="en">

<head>
  <meta charset="UTF-8" />
  <title>{{title}}</title>
  <style>
    body { font-family: system-ui, sans-serif; padding: 1.5rem 3rem; }
    .error { background: #ffebee; color: #7d1a1a; border-radius: 0.5rem; padding: 1rem; }
  </style>
</head>

<body>
  <h1>{{heading}}</h1>
  <div class="error"><b>The map could not be built.</b><br>{{message}}</div>
</body>

</html>
"#;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_escape_html() {
        assert_eq!(escape_html("Kuala Lumpur"), "Kuala Lumpur");
        assert_eq!(
            escape_html(r#"<a href="x">Tom & Jerry's</a>"#),
            "&lt;a href=&quot;x&quot;&gt;Tom &amp; Jerry&#39;s&lt;/a&gt;"
        );
    }

    #[test]
    fn test_escape_script_json() {
        assert_eq!(escape_script_json(r#"{"a":"</script>"}"#), r#"{"a":"<\/script>"}"#);
    }
}
