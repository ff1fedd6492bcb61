use yew::prelude::*;
use super::footer::Footer;
use super::navbar::Navbar;

#[derive(Properties, PartialEq)]
pub struct Props {
    pub children: Children,
    pub title: String,
}

#[function_component(Layout)]
pub fn layout(props: &Props) -> Html {
    use_effect_with(props.title.clone(), |title| {
        if let Some(document) = web_sys::window().and_then(|w| w.document()) {
            document.set_title(&format!("{} | Diabetes Risk Prediction", title));
        }
        || ()
    });

    html! {
        <div class="flex flex-col min-h-screen bg-base-200">
            <Navbar />
            <main class="flex-1 py-12">
                <div class="max-w-5xl mx-auto px-4 sm:px-6 lg:px-8">
                    { for props.children.iter() }
                </div>
            </main>
            <Footer />
        </div>
    }
}
