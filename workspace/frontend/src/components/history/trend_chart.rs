use common::TrendPoint;
use plotly::common::{Line, Marker, Mode};
use plotly::Scatter;
use serde_json::{json, Value};
use wasm_bindgen::prelude::*;
use web_sys::HtmlElement;
use yew::prelude::*;

#[wasm_bindgen]
extern "C" {
    #[wasm_bindgen(js_namespace = Plotly)]
    fn newPlot(div_id: &str, data: JsValue, layout: JsValue);
}

/// Minimum number of points before a trend is drawn.
pub const MIN_TREND_POINTS: usize = 2;

/// Layout with one tick per prediction, labelled by date. Positions are used
/// on the x axis so two predictions on the same day stay separate.
fn trend_layout(points: &[TrendPoint]) -> Value {
    let tick_values: Vec<usize> = points.iter().map(|p| p.index).collect();
    let tick_text: Vec<&str> = points.iter().map(|p| p.label.as_str()).collect();

    json!({
        "height": 260,
        "margin": {"t": 10, "r": 10, "l": 50, "b": 40},
        "paper_bgcolor": "rgba(0,0,0,0)",
        "plot_bgcolor": "rgba(0,0,0,0)",
        "xaxis": {"tickmode": "array", "tickvals": tick_values, "ticktext": tick_text, "showgrid": false},
        "yaxis": {"range": [0, 100], "ticksuffix": "%", "gridcolor": "#e2e8f0"},
        "showlegend": false
    })
}

#[derive(Properties, PartialEq)]
pub struct TrendChartProps {
    pub points: Vec<TrendPoint>,
}

#[function_component(RiskTrendChart)]
pub fn risk_trend_chart(props: &TrendChartProps) -> Html {
    let container_ref = use_node_ref();
    let div_id = "chart-risk-trend".to_string();

    use_effect_with((container_ref.clone(), props.points.clone(), div_id.clone()), move |(container_ref, points, div_id)| {
        if let Some(element) = container_ref.cast::<HtmlElement>() {
            element.set_id(div_id);

            let x: Vec<usize> = points.iter().map(|p| p.index).collect();
            let y: Vec<u32> = points.iter().map(|p| p.probability_pct).collect();
            let hover: Vec<String> = points
                .iter()
                .map(|p| format!("{}: {}% risk", p.label, p.probability_pct))
                .collect();

            let trace = Scatter::new(x, y)
                .mode(Mode::LinesMarkers)
                .name("Risk")
                .text_array(hover)
                .line(Line::new().color("#0ea5e9").width(3.0))
                .marker(Marker::new().color("#d946ef").size(8));

            let data = serde_json::to_string(&trace)
                .ok()
                .and_then(|json| js_sys::JSON::parse(&json).ok());
            let layout = js_sys::JSON::parse(&trend_layout(points).to_string()).ok();

            match (data, layout) {
                (Some(trace_js), Some(layout_js)) => {
                    let data_js = js_sys::Array::new();
                    data_js.push(&trace_js);
                    newPlot(div_id, data_js.into(), layout_js);
                }
                _ => log::error!("Failed to prepare risk trend chart"),
            }
        }
        || ()
    });

    html! {
        <div ref={container_ref} style="width:100%; height:260px;"></div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_layout_ticks_follow_points() {
        let points = vec![
            TrendPoint { index: 1, probability_pct: 20, label: "Feb 3".to_string() },
            TrendPoint { index: 2, probability_pct: 35, label: "Feb 3".to_string() },
        ];
        let layout = trend_layout(&points);
        assert_eq!(layout["xaxis"]["tickvals"], json!([1, 2]));
        assert_eq!(layout["xaxis"]["ticktext"], json!(["Feb 3", "Feb 3"]));
        assert_eq!(layout["yaxis"]["range"], json!([0, 100]));
    }
}
