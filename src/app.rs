use leptos::*;
use strum::IntoEnumIterator;

use crate::domain::metrics::MetricKind;

/// Static dashboard shell: one card per metric, each exposing the named
/// slot div the renderer writes into. The cards start as "Loading..." and
/// are filled in place once their metric settles.
#[component]
pub fn App() -> impl IntoView {
    view! {
        <style>
            {r#"
            .market-health-app {
                font-family: 'SF Pro Display', -apple-system, BlinkMacSystemFont, sans-serif;
                background: #f4f6f8;
                min-height: 100vh;
                padding: 20px;
                color: #212529;
            }

            .header {
                text-align: center;
                margin-bottom: 20px;
                background: #ffffff;
                padding: 20px;
                border-radius: 12px;
                box-shadow: 0 1px 4px rgba(0, 0, 0, 0.08);
            }

            .metric-grid {
                display: grid;
                grid-template-columns: repeat(auto-fill, minmax(240px, 1fr));
                gap: 16px;
                max-width: 1100px;
                margin: 0 auto;
            }

            .metric-card {
                background: #ffffff;
                padding: 16px;
                border-radius: 12px;
                box-shadow: 0 1px 4px rgba(0, 0, 0, 0.08);
            }

            .metric-card h3 {
                margin: 0 0 8px 0;
                font-size: 14px;
                font-weight: 600;
                color: #6c757d;
                text-transform: uppercase;
                letter-spacing: 0.04em;
            }

            .metric-value {
                font-size: 18px;
                font-weight: 700;
                padding: 8px 10px;
                border-radius: 8px;
            }
            "#}
        </style>

        <div class="market-health-app">
            <div class="header">
                <h1>"Bitcoin Market Health"</h1>
                <p>"Valuation and momentum metrics, refreshed from public market data"</p>
            </div>

            <div class="metric-grid">
                {MetricKind::iter()
                    .map(|kind| {
                        view! {
                            <div class="metric-card">
                                <h3>{kind.label()}</h3>
                                <div class="metric-value" id=kind.slot_id()>
                                    "Loading..."
                                </div>
                            </div>
                        }
                    })
                    .collect_view()}
            </div>
        </div>
    }
}
