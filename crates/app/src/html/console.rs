use crate::console::ConsoleConfig;

/// Substitute the configured map settings into the embedded page.
pub(crate) fn render(config: &ConsoleConfig) -> String {
    CONSOLE_HTML
        .replace("__AIRMAP_TOKEN__", &json_str(&config.access_token))
        .replace("__AIRMAP_STYLE__", &json_str(&config.style_url))
        .replace("__AIRMAP_SOURCE__", &json_str(&config.source_url))
        .replace("__AIRMAP_SOURCE_LAYER__", &json_str(&config.source_layer))
        .replace("__AIRMAP_KEY_PROPERTY__", &json_str(&config.key_property))
        .replace("__AIRMAP_LON__", &config.longitude.to_string())
        .replace("__AIRMAP_LAT__", &config.latitude.to_string())
        .replace("__AIRMAP_ZOOM__", &config.zoom.to_string())
}

fn json_str(value: &str) -> String {
    serde_json::Value::String(value.to_string()).to_string()
}

const CONSOLE_HTML: &str = r##"<!doctype html>
<html lang="en">

<head>
  <meta charset="UTF-8" />
  <meta name="viewport" content="width=device-width, initial-scale=1.0" />
  <title>Airport Map Console</title>

  <link rel="stylesheet" href="https://cdnjs.cloudflare.com/ajax/libs/mapbox-gl/1.13.3/mapbox-gl.min.css"
    crossorigin="anonymous" referrerpolicy="no-referrer" />
  <script src="https://cdnjs.cloudflare.com/ajax/libs/mapbox-gl/1.13.3/mapbox-gl.min.js"
    crossorigin="anonymous" referrerpolicy="no-referrer"></script>

  <style>
    body {
      margin: 0;
      padding: 0;
      font: 14px/1.4 'Helvetica Neue', Arial, Helvetica, sans-serif;
      color: #1f2933;
    }

    #map {
      position: absolute;
      inset: 0;
    }

    .listing-panel {
      position: absolute;
      top: 0;
      right: 0;
      bottom: 0;
      width: 260px;
      overflow: hidden;
      display: flex;
      flex-direction: column;
      background: rgba(255, 255, 255, 0.94);
      border-left: 1px solid #d3dce6;
    }

    .filter-ctrl {
      display: none;
      padding: 10px;
      border-bottom: 1px solid #d3dce6;
    }

    .filter-ctrl input {
      width: 100%;
      box-sizing: border-box;
      padding: 6px 8px;
      border: 1px solid #9aa5b1;
      border-radius: 3px;
    }

    #feature-listing {
      overflow-y: auto;
      padding: 10px;
    }

    #feature-listing a {
      display: block;
      padding: 4px 0;
      color: #0b61a4;
      text-decoration: none;
    }

    #feature-listing a:hover {
      text-decoration: underline;
    }

    #feature-listing p {
      color: #52606d;
    }
  </style>
</head>

<body>
  <div id="map"></div>
  <div class="listing-panel">
    <div class="filter-ctrl" id="filter-ctrl">
      <input id="feature-filter" type="text" placeholder="Filter by name or code" autocomplete="off" />
    </div>
    <div id="feature-listing"></div>
  </div>

  <script>
    const SETTINGS = {
      accessToken: __AIRMAP_TOKEN__,
      styleUrl: __AIRMAP_STYLE__,
      sourceUrl: __AIRMAP_SOURCE__,
      sourceLayer: __AIRMAP_SOURCE_LAYER__,
      keyProperty: __AIRMAP_KEY_PROPERTY__,
      center: [__AIRMAP_LON__, __AIRMAP_LAT__],
      zoom: __AIRMAP_ZOOM__
    };

    const LAYER = 'pulsing-dot';

    if (SETTINGS.accessToken) {
      mapboxgl.accessToken = SETTINGS.accessToken;
    }

    const map = new mapboxgl.Map({
      container: 'map',
      center: SETTINGS.center,
      zoom: SETTINGS.zoom,
      style: SETTINGS.styleUrl
    });

    const popup = new mapboxgl.Popup({
      closeButton: false
    });

    const filterEl = document.getElementById('feature-filter');
    const filterCtrlEl = document.getElementById('filter-ctrl');
    const listingEl = document.getElementById('feature-listing');

    const size = 65;

    // Implements `StyleImageInterface` to draw a pulsing dot icon on the map.
    const pulsingDot = {
      width: size,
      height: size,
      data: new Uint8Array(size * size * 4),

      onAdd: function () {
        const canvas = document.createElement('canvas');
        canvas.width = this.width;
        canvas.height = this.height;
        this.context = canvas.getContext('2d');
      },

      render: function () {
        const duration = 1000;
        const t = (performance.now() % duration) / duration;

        const radius = (size / 2) * 0.3;
        const outerRadius = (size / 2) * 0.7 * t + radius;
        const context = this.context;

        context.clearRect(0, 0, this.width, this.height);
        context.beginPath();
        context.arc(this.width / 2, this.height / 2, outerRadius, 0, Math.PI * 2);
        context.fillStyle = `rgba(255, 200, 200, ${1 - t})`;
        context.fill();

        context.beginPath();
        context.arc(this.width / 2, this.height / 2, radius, 0, Math.PI * 2);
        context.fillStyle = 'rgba(255, 100, 100, 1)';
        context.strokeStyle = 'white';
        context.lineWidth = 2 + 4 * (1 - t);
        context.fill();
        context.stroke();

        this.data = context.getImageData(0, 0, this.width, this.height).data;

        map.triggerRepaint();

        return true;
      }
    };

    async function postJson(url, body) {
      try {
        const response = await fetch(url, {
          method: 'POST',
          headers: {'Content-Type': 'application/json'},
          body: JSON.stringify(body)
        });
        if (!response.ok) throw new Error(`HTTP ${response.status}`);
        return await response.json();
      } catch (error) {
        console.error('console request failed', url, error);
        return null;
      }
    }

    async function getJson(url) {
      try {
        const response = await fetch(url);
        if (!response.ok) throw new Error(`HTTP ${response.status}`);
        return await response.json();
      } catch (error) {
        console.error('console request failed', url, error);
        return null;
      }
    }

    function renderListing(update) {
      const listing = update.listing;
      listingEl.innerHTML = '';

      if (listing.state === 'populated') {
        for (const entry of listing.entries) {
          const itemLink = document.createElement('a');
          itemLink.textContent = entry.label;
          if (entry.reference) {
            itemLink.href = entry.reference;
            itemLink.target = '_blank';
          }
          itemLink.addEventListener('mouseover', () => {
            popup
              .setLngLat([entry.lon, entry.lat])
              .setText(entry.label)
              .addTo(map);
          });
          listingEl.appendChild(itemLink);
        }
      } else {
        const empty = document.createElement('p');
        empty.textContent = listing.notice;
        listingEl.appendChild(empty);
      }

      filterCtrlEl.style.display = listing.show_filter ? 'block' : 'none';
      if (listing.state === 'empty_no_interaction') {
        map.setFilter(LAYER, update.filter);
      }
    }

    map.on('load', () => {
      map.addImage('pulsing-dot', pulsingDot, { pixelRatio: 2 });

      map.addSource(LAYER, {
        'type': 'vector',
        'url': SETTINGS.sourceUrl
      });

      map.addLayer({
        'id': LAYER,
        'source': LAYER,
        'source-layer': SETTINGS.sourceLayer,
        'type': 'symbol',
        'layout': {
          'icon-image': 'pulsing-dot',
          'icon-allow-overlap': true,
        }
      });

      map.on('movestart', () => {
        map.setFilter(LAYER, ['has', SETTINGS.keyProperty]);
      });

      map.on('moveend', async () => {
        const features = map.queryRenderedFeatures({ layers: [LAYER] });
        if (!features) return;

        const payload = features.map((feature) => ({
          name: feature.properties.name || '',
          code: feature.properties[SETTINGS.keyProperty] || '',
          lon: feature.geometry.coordinates[0],
          lat: feature.geometry.coordinates[1],
          reference: feature.properties.wikipedia || null
        }));

        const update = await postJson('/api/viewport', { features: payload });
        if (update) renderListing(update);
      });

      map.on('mousemove', LAYER, (e) => {
        map.getCanvas().style.cursor = 'pointer';

        const feature = e.features[0];
        const code = feature.properties[SETTINGS.keyProperty];
        popup
          .setLngLat(feature.geometry.coordinates)
          .setText(`${feature.properties.name} (${code})`)
          .addTo(map);
      });

      map.on('mouseleave', LAYER, () => {
        map.getCanvas().style.cursor = '';
        popup.remove();
      });

      filterEl.addEventListener('keyup', async (e) => {
        const update = await getJson('/api/filter?q=' + encodeURIComponent(e.target.value));
        if (!update) return;
        renderListing(update);
        map.setFilter(LAYER, update.filter);
      });

      getJson('/api/filter?q=').then((update) => {
        if (update) renderListing(update);
      });
    });
  </script>
</body>

</html>
"##;

#[cfg(test)]
mod tests {
    use super::*;

    fn config() -> ConsoleConfig {
        ConsoleConfig {
            bind: "127.0.0.1:8080".into(),
            access_token: "pk.test".into(),
            style_url: "mapbox://styles/mapbox/light-v10".into(),
            source_url: "mapbox://mapbox.04w69w5j".into(),
            source_layer: "ne_10m_airports".into(),
            key_property: "iata_code".into(),
            longitude: 20.0,
            latitude: -4.0,
            zoom: 4.8,
            verbose: false,
        }
    }

    #[test]
    fn render_substitutes_every_placeholder() {
        let page = render(&config());
        assert!(!page.contains("__AIRMAP_"));
        assert!(page.contains(r#"accessToken: "pk.test""#));
        assert!(page.contains(r#"keyProperty: "iata_code""#));
        assert!(page.contains("center: [20, -4]"));
    }

    #[test]
    fn token_value_is_json_escaped() {
        let mut config = config();
        config.access_token = "quote\"inside".into();
        let page = render(&config);
        assert!(page.contains(r#"accessToken: "quote\"inside""#));
    }
}
