use yew::prelude::*;

#[function_component(Footer)]
pub fn footer() -> Html {
    let year = chrono::Local::now().format("%Y").to_string();

    html! {
        <footer class="footer footer-center p-6 bg-base-100 text-base-content border-t border-base-300">
            <aside class="max-w-2xl">
                <p class="font-semibold">{"DiaRisk: Diabetes Risk Prediction"}</p>
                <p class="text-sm text-gray-500">
                    {"This tool is for educational purposes only. Always consult a healthcare professional for medical advice."}
                </p>
                <p class="text-xs text-gray-400">{format!("© {} DiaRisk", year)}</p>
            </aside>
        </footer>
    }
}
