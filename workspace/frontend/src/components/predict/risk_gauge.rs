use std::f64::consts::PI;

use common::RiskLevel;
use gloo_timers::callback::Timeout;
use yew::prelude::*;

const RADIUS: f64 = 90.0;

/// Circumference of the gauge ring.
fn circumference() -> f64 {
    2.0 * PI * RADIUS
}

/// Dash offset that leaves `percentage` of the ring drawn.
pub fn dash_offset(percentage: u32) -> f64 {
    let c = circumference();
    c - (f64::from(percentage.min(100)) / 100.0) * c
}

pub fn risk_color(level: RiskLevel) -> &'static str {
    match level {
        RiskLevel::Low => "#10b981",
        RiskLevel::Moderate => "#f59e0b",
        RiskLevel::High => "#ef4444",
    }
}

#[derive(Properties, PartialEq)]
pub struct RiskGaugeProps {
    pub probability: f64,
    pub risk_level: RiskLevel,
}

#[function_component(RiskGauge)]
pub fn risk_gauge(props: &RiskGaugeProps) -> Html {
    let percentage = (props.probability * 100.0).round().clamp(0.0, 100.0) as u32;
    let animated = use_state(|| 0u32);

    {
        let animated = animated.clone();
        use_effect_with(percentage, move |&percentage| {
            // Start from zero so the ring sweeps in
            let timeout = Timeout::new(100, move || animated.set(percentage));
            move || drop(timeout)
        });
    }

    let color = risk_color(props.risk_level);

    html! {
        <div class="relative w-52 h-52 mx-auto">
            <svg class="w-full h-full -rotate-90" viewBox="0 0 200 200">
                <circle cx="100" cy="100" r="90" fill="none" stroke="currentColor"
                        stroke-width="12" class="text-base-300" />
                <circle cx="100" cy="100" r="90" fill="none" stroke={color}
                        stroke-width="12" stroke-linecap="round"
                        stroke-dasharray={circumference().to_string()}
                        stroke-dashoffset={dash_offset(*animated).to_string()}
                        style="transition: stroke-dashoffset 1s ease-out" />
            </svg>
            <div class="absolute inset-0 flex flex-col items-center justify-center">
                <span class="text-4xl font-bold" style={format!("color: {}", color)}>
                    {format!("{}%", *animated)}
                </span>
                <span class="text-sm text-gray-500">{format!("{} Risk", props.risk_level.label())}</span>
            </div>
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dash_offset() {
        assert!((dash_offset(0) - circumference()).abs() < 1e-9);
        assert!(dash_offset(100).abs() < 1e-9);
        assert!((dash_offset(50) - circumference() / 2.0).abs() < 1e-9);
        assert_eq!(dash_offset(140), dash_offset(100));
    }
}
